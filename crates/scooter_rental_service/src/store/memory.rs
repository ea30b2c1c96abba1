/*  Copyright 2022-23, Juspay India Pvt Ltd
    This program is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License
    as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version. This program
    is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY
    or FITNESS FOR A PARTICULAR PURPOSE. See the GNU Affero General Public License for more details. You should have received a copy of
    the GNU Affero General Public License along with this program. If not, see <https://www.gnu.org/licenses/>.
*/
use async_trait::async_trait;
use rustc_hash::FxHashMap;
use tokio::sync::RwLock;

use super::LocationStore;
use crate::{
    common::{types::*, utils::distance_between_in_meters},
    tools::error::AppError,
};

/// Process-local store, used when no Redis is configured and by the tests.
#[derive(Default)]
pub struct InMemoryStore {
    locations: RwLock<FxHashMap<CityName, FxHashMap<ScooterId, Point>>>,
    availability: RwLock<FxHashMap<ScooterId, bool>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LocationStore for InMemoryStore {
    async fn persist_location(
        &self,
        scooter_id: &ScooterId,
        location: Point,
        city: &CityName,
    ) -> Result<(), AppError> {
        self.locations
            .write()
            .await
            .entry(city.to_owned())
            .or_default()
            .insert(*scooter_id, location);
        Ok(())
    }

    async fn set_availability(
        &self,
        scooter_id: &ScooterId,
        available: bool,
    ) -> Result<(), AppError> {
        self.availability
            .write()
            .await
            .insert(*scooter_id, available);
        Ok(())
    }

    async fn get_availability(&self, scooter_id: &ScooterId) -> Result<bool, AppError> {
        self.availability
            .read()
            .await
            .get(scooter_id)
            .copied()
            .ok_or_else(|| AppError::AvailabilityNotFound(scooter_id.to_string()))
    }

    async fn query_nearby(
        &self,
        center: Point,
        Radius(radius): Radius,
        city: &CityName,
    ) -> Result<Vec<ScooterLocation>, AppError> {
        let locations = self.locations.read().await;

        let mut nearby: Vec<(f64, ScooterLocation)> = locations
            .get(city)
            .map(|scooters| {
                scooters
                    .iter()
                    .filter_map(|(scooter_id, location)| {
                        let distance = distance_between_in_meters(&center, location);
                        (distance <= radius).then_some((
                            distance,
                            ScooterLocation {
                                scooter_id: *scooter_id,
                                location: *location,
                            },
                        ))
                    })
                    .collect()
            })
            .unwrap_or_default();

        nearby.sort_by(|(left, _), (right, _)| left.total_cmp(right));

        Ok(nearby.into_iter().map(|(_, scooter)| scooter).collect())
    }

    async fn get_location(
        &self,
        scooter_id: &ScooterId,
        city: &CityName,
    ) -> Result<Option<Point>, AppError> {
        Ok(self
            .locations
            .read()
            .await
            .get(city)
            .and_then(|scooters| scooters.get(scooter_id))
            .copied())
    }
}
