/*  Copyright 2022-23, Juspay India Pvt Ltd
    This program is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License
    as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version. This program
    is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY
    or FITNESS FOR A PARTICULAR PURPOSE. See the GNU Affero General Public License for more details. You should have received a copy of
    the GNU Affero General Public License along with this program. If not, see <https://www.gnu.org/licenses/>.
*/
#![allow(clippy::expect_used)]

use actix_web_prom::{PrometheusMetrics, PrometheusMetricsBuilder};
use prometheus::{
    opts, register_int_counter_vec, register_int_gauge, IntCounterVec, IntGauge,
};

pub static ACTIVE_RENTALS: once_cell::sync::Lazy<IntGauge> = once_cell::sync::Lazy::new(|| {
    register_int_gauge!("active_rentals", "Scooters currently rented and tracked")
        .expect("Failed to register active rentals metrics")
});

pub static TRACKING_TICKS: once_cell::sync::Lazy<IntCounterVec> =
    once_cell::sync::Lazy::new(|| {
        register_int_counter_vec!(
            opts!("tracking_ticks_total", "Simulated movement ticks by outcome"),
            &["status"]
        )
        .expect("Failed to register tracking ticks metrics")
    });

pub static RENTAL_REQUESTS: once_cell::sync::Lazy<IntCounterVec> =
    once_cell::sync::Lazy::new(|| {
        register_int_counter_vec!(
            opts!("rental_requests_total", "Rent and free requests by outcome"),
            &["action", "status"]
        )
        .expect("Failed to register rental requests metrics")
    });

#[macro_export]
macro_rules! tracking_tick {
    ($status:expr) => {
        TRACKING_TICKS.with_label_values(&[$status]).inc();
    };
}

#[macro_export]
macro_rules! rental_request {
    ($action:expr, $result:expr) => {
        let status = match $result {
            Ok(_) => "SUCCESS".to_string(),
            Err(err) => err.code(),
        };
        RENTAL_REQUESTS
            .with_label_values(&[$action, status.as_str()])
            .inc();
    };
}

/// Builds the actix middleware exposing `/metrics`, with the rental metrics registered on
/// its registry alongside the per-endpoint HTTP histograms.
///
/// # Panics
///
/// * If the middleware cannot be built or a metric is registered twice.
pub fn prometheus_metrics() -> PrometheusMetrics {
    let prometheus = PrometheusMetricsBuilder::new("scooter_rental")
        .endpoint("/metrics")
        .build()
        .expect("Failed to create Prometheus Metrics");

    prometheus
        .registry
        .register(Box::new(ACTIVE_RENTALS.to_owned()))
        .expect("Failed to register active rentals metrics");

    prometheus
        .registry
        .register(Box::new(TRACKING_TICKS.to_owned()))
        .expect("Failed to register tracking ticks metrics");

    prometheus
        .registry
        .register(Box::new(RENTAL_REQUESTS.to_owned()))
        .expect("Failed to register rental requests metrics");

    prometheus
}
