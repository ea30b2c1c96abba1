/*  Copyright 2022-23, Juspay India Pvt Ltd
    This program is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License
    as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version. This program
    is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY
    or FITNESS FOR A PARTICULAR PURPOSE. See the GNU Affero General Public License for more details. You should have received a copy of
    the GNU Affero General Public License along with this program. If not, see <https://www.gnu.org/licenses/>.
*/
//! The geo-indexed location store as seen by the rental service.

pub mod memory;

use async_trait::async_trait;

use crate::{common::types::*, tools::error::AppError};

/// Everything the rental flow and the listing endpoint need from a location store.
///
/// Implementations are shared between all tracking tasks, so they must tolerate concurrent
/// calls.
#[async_trait]
pub trait LocationStore: Send + Sync {
    async fn persist_location(
        &self,
        scooter_id: &ScooterId,
        location: Point,
        city: &CityName,
    ) -> Result<(), AppError>;

    async fn set_availability(&self, scooter_id: &ScooterId, available: bool)
        -> Result<(), AppError>;

    async fn get_availability(&self, scooter_id: &ScooterId) -> Result<bool, AppError>;

    /// Scooters of `city` within `radius` meters of `center`, nearest first.
    async fn query_nearby(
        &self,
        center: Point,
        radius: Radius,
        city: &CityName,
    ) -> Result<Vec<ScooterLocation>, AppError>;

    async fn get_location(
        &self,
        scooter_id: &ScooterId,
        city: &CityName,
    ) -> Result<Option<Point>, AppError>;

    async fn health_check(&self) -> Result<(), AppError> {
        Ok(())
    }
}
