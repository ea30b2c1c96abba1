/*  Copyright 2022-23, Juspay India Pvt Ltd
    This program is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License
    as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version. This program
    is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY
    or FITNESS FOR A PARTICULAR PURPOSE. See the GNU Affero General Public License for more details. You should have received a copy of
    the GNU Affero General Public License along with this program. If not, see <https://www.gnu.org/licenses/>.
*/
//! A location store that fails on demand, for exercising the error paths of tracking.

use std::{
    sync::{
        atomic::{AtomicBool, AtomicUsize, Ordering},
        Arc,
    },
    time::Duration,
};

use async_trait::async_trait;
use scooter_rental_service::{
    common::types::*,
    store::{memory::InMemoryStore, LocationStore},
    tools::error::AppError,
};

#[derive(Default)]
pub struct FlakyStore {
    inner: InMemoryStore,
    persist_calls: AtomicUsize,
    /// Zero-based index of a `persist_location` call and the message it fails with.
    persist_failures: Vec<(usize, String)>,
    fail_availability: AtomicBool,
    /// Time every `persist_location` call takes before answering.
    persist_delay: Option<Duration>,
}

impl FlakyStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn failing_persist_on(failures: &[(usize, &str)]) -> Arc<Self> {
        Arc::new(FlakyStore {
            persist_failures: failures
                .iter()
                .map(|(call, message)| (*call, message.to_string()))
                .collect(),
            ..Default::default()
        })
    }

    pub fn slow_persist(delay: Duration) -> Arc<Self> {
        Arc::new(FlakyStore {
            persist_delay: Some(delay),
            ..Default::default()
        })
    }

    pub fn fail_availability_updates(&self, fail: bool) {
        self.fail_availability.store(fail, Ordering::SeqCst);
    }

    pub fn persist_calls(&self) -> usize {
        self.persist_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LocationStore for FlakyStore {
    async fn persist_location(
        &self,
        scooter_id: &ScooterId,
        location: Point,
        city: &CityName,
    ) -> Result<(), AppError> {
        let call = self.persist_calls.fetch_add(1, Ordering::SeqCst);

        if let Some(delay) = self.persist_delay {
            tokio::time::sleep(delay).await;
        }

        if let Some((_, message)) = self.persist_failures.iter().find(|(at, _)| *at == call) {
            return Err(AppError::LocationUpdateFailed(message.to_owned()));
        }

        self.inner.persist_location(scooter_id, location, city).await
    }

    async fn set_availability(
        &self,
        scooter_id: &ScooterId,
        available: bool,
    ) -> Result<(), AppError> {
        if self.fail_availability.load(Ordering::SeqCst) {
            return Err(AppError::AvailabilityUpdateFailed(
                "store unreachable".to_string(),
            ));
        }

        self.inner.set_availability(scooter_id, available).await
    }

    async fn get_availability(&self, scooter_id: &ScooterId) -> Result<bool, AppError> {
        self.inner.get_availability(scooter_id).await
    }

    async fn query_nearby(
        &self,
        center: Point,
        radius: Radius,
        city: &CityName,
    ) -> Result<Vec<ScooterLocation>, AppError> {
        self.inner.query_nearby(center, radius, city).await
    }

    async fn get_location(
        &self,
        scooter_id: &ScooterId,
        city: &CityName,
    ) -> Result<Option<Point>, AppError> {
        self.inner.get_location(scooter_id, city).await
    }
}
