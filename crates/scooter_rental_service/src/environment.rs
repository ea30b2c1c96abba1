/*  Copyright 2022-23, Juspay India Pvt Ltd
    This program is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License
    as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version. This program
    is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY
    or FITNESS FOR A PARTICULAR PURPOSE. See the GNU Affero General Public License for more details. You should have received a copy of
    the GNU Affero General Public License along with this program. If not, see <https://www.gnu.org/licenses/>.
*/
use std::sync::Arc;

use serde::Deserialize;
use tokio::runtime::Handle;

use crate::{
    redis::types::{RedisConnectionPool, RedisSettings},
    store::{memory::InMemoryStore, LocationStore},
    tools::{error::AppError, logger::*},
    tracking::{coordinator::RentalCoordinator, TrackingConfig},
};

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Redis,
    InMemory,
}

/// A scooter placed in the store, available, when the service starts.
#[derive(Debug, Deserialize, Clone)]
pub struct SeedScooter {
    pub id: String,
    pub city: String,
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub workers: usize,
    pub logger_cfg: LoggerConfig,
    pub redis_cfg: RedisSettings,
    pub store_backend: StoreBackend,
    pub tracking_cfg: TrackingConfig,
    /// Milliseconds
    pub request_timeout: u64,
    pub seed_scooters: Vec<SeedScooter>,
}

pub struct AppState {
    pub store: Arc<dyn LocationStore>,
    pub coordinator: Arc<RentalCoordinator>,
    pub request_timeout: u64,
}

impl AppState {
    /// Connects the configured store and builds the coordinator. Tracking tasks are spawned
    /// on `spawner`.
    pub async fn new(app_config: AppConfig, spawner: Handle) -> Result<AppState, AppError> {
        let store: Arc<dyn LocationStore> = match app_config.store_backend {
            StoreBackend::Redis => {
                Arc::new(RedisConnectionPool::new(&app_config.redis_cfg).await?)
            }
            StoreBackend::InMemory => {
                warn!(tag = "[Store Backend]", "Using the in-memory store, nothing survives a restart");
                Arc::new(InMemoryStore::new())
            }
        };

        Ok(AppState::with_store(
            store,
            app_config.tracking_cfg,
            app_config.request_timeout,
            spawner,
        ))
    }

    pub fn with_store(
        store: Arc<dyn LocationStore>,
        tracking_cfg: TrackingConfig,
        request_timeout: u64,
        spawner: Handle,
    ) -> AppState {
        let coordinator = Arc::new(RentalCoordinator::new(
            store.clone(),
            tracking_cfg,
            spawner,
        ));

        AppState {
            store,
            coordinator,
            request_timeout,
        }
    }
}
