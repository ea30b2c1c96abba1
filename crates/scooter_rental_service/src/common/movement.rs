/*  Copyright 2022-23, Juspay India Pvt Ltd
    This program is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License
    as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version. This program
    is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY
    or FITNESS FOR A PARTICULAR PURPOSE. See the GNU Affero General Public License for more details. You should have received a copy of
    the GNU Affero General Public License along with this program. If not, see <https://www.gnu.org/licenses/>.
*/
//! Scooter movement simulation.
//!
//! A scooter is assumed to ride at about 36 km/h, which is close to one arc-second of
//! latitude (and, at the demo cities, of longitude) per second.

use super::types::*;

/// One arc-second, in degrees.
pub const DEGREES_PER_SECOND: f64 = 0.000278;

const ROTATION: [Direction; 4] = [
    Direction::North,
    Direction::East,
    Direction::South,
    Direction::West,
];

/// Moves `position` for `elapsed_secs` seconds towards `direction` at the default speed.
pub fn advance(position: Point, elapsed_secs: f64, direction: Direction) -> Point {
    advance_at_speed(position, elapsed_secs, direction, DEGREES_PER_SECOND)
}

pub fn advance_at_speed(
    Point {
        lat: Latitude(lat),
        lon: Longitude(lon),
    }: Point,
    elapsed_secs: f64,
    direction: Direction,
    degrees_per_second: f64,
) -> Point {
    let delta = elapsed_secs * degrees_per_second;

    let (lat, lon) = match direction {
        Direction::North => (lat + delta, lon),
        Direction::South => (lat - delta, lon),
        Direction::East => (lat, lon + delta),
        Direction::West => (lat, lon - delta),
    };

    Point {
        lat: Latitude(lat),
        lon: Longitude(lon),
    }
}

impl DirectionPolicy {
    /// Heading for the `tick`-th movement of a rental, counting from zero.
    pub fn direction_for_tick(&self, tick: u64) -> Direction {
        match self {
            DirectionPolicy::Rotate => ROTATION[(tick % ROTATION.len() as u64) as usize],
            DirectionPolicy::Fixed(direction) => *direction,
        }
    }
}
