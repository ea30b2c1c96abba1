/*  Copyright 2022-23, Juspay India Pvt Ltd
    This program is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License
    as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version. This program
    is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY
    or FITNESS FOR A PARTICULAR PURPOSE. See the GNU Affero General Public License for more details. You should have received a copy of
    the GNU Affero General Public License along with this program. If not, see <https://www.gnu.org/licenses/>.
*/
//! Live tracking of rented scooters.
//!
//! Every rental owns one tokio task that moves the scooter on a fixed tick and writes the
//! new position to the location store. The [`registry::RentalRegistry`] keeps the control
//! end of each task, and the [`coordinator::RentalCoordinator`] ties rentals to the
//! availability flag kept in the store.

pub mod coordinator;
pub mod registry;
pub mod report;
pub mod task;

use serde::Deserialize;
use std::time::Duration;

use crate::common::{movement::DEGREES_PER_SECOND, types::DirectionPolicy};

#[derive(Debug, Deserialize, Clone, Copy)]
pub struct TrackingConfig {
    /// Seconds between two simulated moves of a rented scooter.
    pub tick_interval: u64,
    pub degrees_per_second: f64,
    pub direction_policy: DirectionPolicy,
}

impl Default for TrackingConfig {
    fn default() -> Self {
        TrackingConfig {
            tick_interval: 3,
            degrees_per_second: DEGREES_PER_SECOND,
            direction_policy: DirectionPolicy::Rotate,
        }
    }
}

impl TrackingConfig {
    pub fn tick_period(&self) -> Duration {
        Duration::from_secs(self.tick_interval.max(1))
    }
}
