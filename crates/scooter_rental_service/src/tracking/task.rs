/*  Copyright 2022-23, Juspay India Pvt Ltd
    This program is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License
    as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version. This program
    is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY
    or FITNESS FOR A PARTICULAR PURPOSE. See the GNU Affero General Public License for more details. You should have received a copy of
    the GNU Affero General Public License along with this program. If not, see <https://www.gnu.org/licenses/>.
*/
use std::sync::Arc;
use tokio::{
    runtime::Handle,
    time::{interval_at, Instant, MissedTickBehavior},
};

use crate::{
    common::movement::advance_at_speed,
    store::LocationStore,
    tools::{logger::*, prometheus::TRACKING_TICKS},
    tracking_tick,
};

use super::{registry::TrackedRental, report::TickErrors, TrackingConfig};

/// Spawns the task that moves a rented scooter until its rental is cancelled.
///
/// The first move happens one full period after the spawn. A persistence failure does not
/// end the task; it is folded into the report handed back on cancellation.
pub fn spawn_tracking_task(
    spawner: &Handle,
    rental: TrackedRental,
    store: Arc<dyn LocationStore>,
    tracking_cfg: &TrackingConfig,
) {
    let tracking_cfg = *tracking_cfg;
    spawner.spawn(track_rental(rental, store, tracking_cfg));
}

async fn track_rental(
    rental: TrackedRental,
    store: Arc<dyn LocationStore>,
    tracking_cfg: TrackingConfig,
) {
    let TrackedRental {
        scooter_id,
        mut position,
        city,
        mut cancel,
        report,
    } = rental;

    let period = tracking_cfg.tick_period();
    let elapsed_secs = period.as_secs_f64();
    let mut ticker = interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let mut tick_errors = TickErrors::default();
    let mut tick: u64 = 0;

    info!(tag = "[Tracking Started]", scooter_id = %scooter_id, city = %city.0);

    loop {
        tokio::select! {
            biased;
            // Err means the sending side is gone, which is handled like a cancellation.
            _ = &mut cancel => break,
            _ = ticker.tick() => {
                let direction = tracking_cfg.direction_policy.direction_for_tick(tick);
                tick += 1;
                position = advance_at_speed(
                    position,
                    elapsed_secs,
                    direction,
                    tracking_cfg.degrees_per_second,
                );
                debug!(tag = "[Tracking Tick]", scooter_id = %scooter_id, direction = %direction, lat = position.lat.0, lon = position.lon.0);

                match store.persist_location(&scooter_id, position, &city).await {
                    Ok(_) => {
                        tracking_tick!("SUCCESS");
                    }
                    Err(err) => {
                        tracking_tick!("FAILURE");
                        warn!(tag = "[Tracking Tick Failed]", scooter_id = %scooter_id, error = %err.message());
                        tick_errors.record(&err);
                    }
                }
            }
        }
    }

    info!(tag = "[Tracking Stopped]", scooter_id = %scooter_id, ticks = tick, failed = !tick_errors.is_empty());

    if report.send(tick_errors.into_report(scooter_id)).is_err() {
        warn!(tag = "[Tracking Report]", scooter_id = %scooter_id, "Nobody is waiting for the tracking report");
    }
}
