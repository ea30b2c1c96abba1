/*  Copyright 2022-23, Juspay India Pvt Ltd
    This program is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License
    as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version. This program
    is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY
    or FITNESS FOR A PARTICULAR PURPOSE. See the GNU Affero General Public License for more details. You should have received a copy of
    the GNU Affero General Public License along with this program. If not, see <https://www.gnu.org/licenses/>.
*/
use futures::future::join_all;
use std::sync::Arc;
use tokio::runtime::Handle;

use crate::{
    common::{
        types::{RentalScooter, ScooterId},
        utils::{parse_scooter_id, validate_city, validate_point},
    },
    store::LocationStore,
    tools::{error::AppError, logger::*},
};

use super::{registry::RentalRegistry, task::spawn_tracking_task, TrackingConfig};

/// Ties the rental lifecycle of a scooter to its availability flag and its tracking task.
pub struct RentalCoordinator {
    store: Arc<dyn LocationStore>,
    registry: Arc<RentalRegistry>,
    tracking_cfg: TrackingConfig,
    spawner: Handle,
}

impl RentalCoordinator {
    /// `spawner` is the runtime the tracking tasks run on. It has to outlive the request
    /// that started a rental, so it is usually the handle of the main runtime.
    pub fn new(
        store: Arc<dyn LocationStore>,
        tracking_cfg: TrackingConfig,
        spawner: Handle,
    ) -> Self {
        RentalCoordinator {
            store,
            registry: Arc::new(RentalRegistry::new()),
            tracking_cfg,
            spawner,
        }
    }

    pub fn registry(&self) -> Arc<RentalRegistry> {
        self.registry.clone()
    }

    /// Marks the scooter unavailable and starts tracking it.
    ///
    /// Nothing is tracked when the availability update fails. A scooter that is already
    /// tracked keeps its task and the call fails with a conflict.
    pub async fn rent(&self, scooter: RentalScooter) -> Result<ScooterId, AppError> {
        let RentalScooter {
            scooter_id,
            location,
            city,
        } = scooter;

        let scooter_id = parse_scooter_id(&scooter_id)?;
        validate_point(&location)?;
        validate_city(&city)?;

        self.store.set_availability(&scooter_id, false).await?;

        let rental = self.registry.start(scooter_id, location, city).await?;

        spawn_tracking_task(
            &self.spawner,
            rental,
            self.store.clone(),
            &self.tracking_cfg,
        );

        info!(tag = "[Scooter Rented]", scooter_id = %scooter_id);

        Ok(scooter_id)
    }

    /// Stops tracking the scooter and makes it available again.
    ///
    /// Failures met while tracking are returned as [`AppError::TrackingFailed`] once the
    /// scooter is available again. If the availability update itself fails, that error wins
    /// and the tracking report only goes to the logs.
    ///
    /// The release runs to completion on the coordinator's runtime even when the caller is
    /// dropped half way.
    pub async fn free(&self, scooter_id: ScooterId) -> Result<(), AppError> {
        self.spawner
            .spawn(release_rental(
                self.registry.clone(),
                self.store.clone(),
                scooter_id,
            ))
            .await
            .map_err(|err| {
                AppError::InternalError(format!("Freeing scooter {scooter_id} failed : {err}"))
            })?
    }

    /// Frees every scooter that is still rented, returning the outcome per scooter.
    pub async fn free_all(&self) -> Vec<(ScooterId, Result<(), AppError>)> {
        let scooters = self.registry.active_scooters().await;

        join_all(scooters.into_iter().map(|scooter_id| async move {
            let result = self.free(scooter_id).await;
            if let Err(err) = &result {
                warn!(tag = "[Free On Shutdown]", scooter_id = %scooter_id, error = %err.message());
            }
            (scooter_id, result)
        }))
        .await
    }
}

async fn release_rental(
    registry: Arc<RentalRegistry>,
    store: Arc<dyn LocationStore>,
    scooter_id: ScooterId,
) -> Result<(), AppError> {
    let report = registry.stop(&scooter_id).await?;

    if let Err(err) = store.set_availability(&scooter_id, true).await {
        if let Some(report) = report {
            error!(tag = "[Tracking Report Dropped]", scooter_id = %scooter_id, report = %report);
        }
        return Err(err);
    }

    match report {
        Some(report) => {
            warn!(tag = "[Scooter Freed]", scooter_id = %scooter_id, report = %report);
            Err(AppError::TrackingFailed(report))
        }
        None => {
            info!(tag = "[Scooter Freed]", scooter_id = %scooter_id);
            Ok(())
        }
    }
}
