/*  Copyright 2022-23, Juspay India Pvt Ltd
    This program is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License
    as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version. This program
    is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY
    or FITNESS FOR A PARTICULAR PURPOSE. See the GNU Affero General Public License for more details. You should have received a copy of
    the GNU Affero General Public License along with this program. If not, see <https://www.gnu.org/licenses/>.
*/
use std::fmt;

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};
use uuid::Uuid;

#[derive(Deserialize, Serialize, Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub struct ScooterId(pub Uuid);

impl fmt::Display for ScooterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Deserialize, Serialize, Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct ClientId(pub Uuid);
#[derive(Deserialize, Serialize, Clone, Debug, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub struct CityName(pub String);
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, PartialOrd, Copy)]
pub struct Latitude(pub f64);
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, PartialOrd, Copy)]
pub struct Longitude(pub f64);
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, PartialOrd, Copy)]
pub struct Radius(pub f64);

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Copy)]
pub struct Point {
    pub lat: Latitude,
    pub lon: Longitude,
}

#[derive(
    Debug, Clone, Copy, EnumString, EnumIter, Display, Serialize, Deserialize, Eq, Hash, PartialEq,
)]
pub enum Direction {
    #[strum(serialize = "NORTH")]
    North,
    #[strum(serialize = "EAST")]
    East,
    #[strum(serialize = "SOUTH")]
    South,
    #[strum(serialize = "WEST")]
    West,
}

/// How a tracking task picks the heading of each simulated tick.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum DirectionPolicy {
    /// North, east, south, west, then around again.
    Rotate,
    Fixed(Direction),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScooterLocation {
    pub scooter_id: ScooterId,
    pub location: Point,
}

/// What the outer layer knows about a scooter when asking to rent it. The identifier is
/// still raw text here; the coordinator validates it.
#[derive(Debug, Clone, PartialEq)]
pub struct RentalScooter {
    pub scooter_id: String,
    pub location: Point,
    pub city: CityName,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct APISuccess {
    result: String,
}

impl Default for APISuccess {
    fn default() -> Self {
        Self {
            result: "Success".to_string(),
        }
    }
}
