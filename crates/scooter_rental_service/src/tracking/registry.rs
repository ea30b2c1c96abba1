/*  Copyright 2022-23, Juspay India Pvt Ltd
    This program is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License
    as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version. This program
    is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY
    or FITNESS FOR A PARTICULAR PURPOSE. See the GNU Affero General Public License for more details. You should have received a copy of
    the GNU Affero General Public License along with this program. If not, see <https://www.gnu.org/licenses/>.
*/
use rustc_hash::FxHashMap;
use std::sync::Arc;
use tokio::sync::{oneshot, Mutex};

use crate::{
    common::types::{CityName, Point, ScooterId},
    tools::{error::AppError, logger::*, prometheus::ACTIVE_RENTALS},
};

use super::report::TrackingReport;

/// Control end of a running tracking task, kept by the registry.
#[derive(Debug)]
pub struct TrackingHandle {
    cancel: oneshot::Sender<()>,
    report: oneshot::Receiver<Option<TrackingReport>>,
}

#[derive(Debug)]
enum RentalSlot {
    Active(TrackingHandle),
    /// Cancellation was sent and the report is being awaited outside the lock.
    Stopping,
}

/// Task end of a rental. Moved into the tracking task, which is the only owner of the
/// position from then on.
#[derive(Debug)]
pub struct TrackedRental {
    pub scooter_id: ScooterId,
    pub position: Point,
    pub city: CityName,
    pub(crate) cancel: oneshot::Receiver<()>,
    pub(crate) report: oneshot::Sender<Option<TrackingReport>>,
}

#[derive(Debug, Default)]
pub struct RentalRegistry {
    rentals: Arc<Mutex<FxHashMap<ScooterId, RentalSlot>>>,
}

impl RentalRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new rental and hands back the task side of its channels.
    ///
    /// Fails with [`AppError::ScooterAlreadyRented`] while any slot exists for the scooter,
    /// including one that is still stopping.
    pub async fn start(
        &self,
        scooter_id: ScooterId,
        position: Point,
        city: CityName,
    ) -> Result<TrackedRental, AppError> {
        let mut rentals = self.rentals.lock().await;

        if rentals.contains_key(&scooter_id) {
            return Err(AppError::ScooterAlreadyRented(scooter_id.to_string()));
        }

        let (cancel_tx, cancel_rx) = oneshot::channel();
        let (report_tx, report_rx) = oneshot::channel();

        rentals.insert(
            scooter_id,
            RentalSlot::Active(TrackingHandle {
                cancel: cancel_tx,
                report: report_rx,
            }),
        );
        ACTIVE_RENTALS.set(rentals.len() as i64);

        Ok(TrackedRental {
            scooter_id,
            position,
            city,
            cancel: cancel_rx,
            report: report_tx,
        })
    }

    /// Cancels the tracking task of a scooter and waits for its report.
    ///
    /// The lock is released before waiting, so other rentals are never blocked by a task
    /// that is slow to acknowledge. Waiting for the report and removing the slot run in a
    /// task of their own: the slot is cleared even if the caller stops waiting.
    pub async fn stop(&self, scooter_id: &ScooterId) -> Result<Option<TrackingReport>, AppError> {
        let handle = {
            let mut rentals = self.rentals.lock().await;
            let slot = rentals
                .get_mut(scooter_id)
                .ok_or_else(|| AppError::ScooterNotRented(scooter_id.to_string()))?;
            match std::mem::replace(slot, RentalSlot::Stopping) {
                RentalSlot::Active(handle) => handle,
                RentalSlot::Stopping => {
                    return Err(AppError::ScooterNotRented(scooter_id.to_string()))
                }
            }
        };

        let TrackingHandle { cancel, report } = handle;

        // The task may already be gone, its report is still waiting in the channel.
        let _ = cancel.send(());

        let rentals = self.rentals.clone();
        let stopped_id = *scooter_id;
        let acknowledged = tokio::spawn(async move {
            let report = report.await;

            let mut rentals = rentals.lock().await;
            rentals.remove(&stopped_id);
            ACTIVE_RENTALS.set(rentals.len() as i64);

            report
        });

        match acknowledged.await {
            Ok(Ok(report)) => Ok(report),
            Ok(Err(err)) => {
                error!(tag = "[Tracking Report]", scooter_id = %scooter_id, "Tracking task ended without a report : {}", err);
                Err(AppError::InternalError(format!(
                    "Tracking task of scooter {scooter_id} ended without reporting"
                )))
            }
            Err(err) => Err(AppError::InternalError(format!(
                "Waiting for the tracking report of scooter {scooter_id} failed : {err}"
            ))),
        }
    }

    pub async fn is_tracking(&self, scooter_id: &ScooterId) -> bool {
        self.rentals.lock().await.contains_key(scooter_id)
    }

    pub async fn active_rentals(&self) -> usize {
        self.rentals.lock().await.len()
    }

    /// Scooters with a running task, in no particular order. Stopping ones are left out.
    pub async fn active_scooters(&self) -> Vec<ScooterId> {
        self.rentals
            .lock()
            .await
            .iter()
            .filter(|(_, slot)| matches!(slot, RentalSlot::Active(_)))
            .map(|(scooter_id, _)| *scooter_id)
            .collect()
    }
}
