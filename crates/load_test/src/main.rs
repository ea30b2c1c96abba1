/*  Copyright 2022-23, Juspay India Pvt Ltd
    This program is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License
    as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version. This program
    is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY
    or FITNESS FOR A PARTICULAR PURPOSE. See the GNU Affero General Public License for more details. You should have received a copy of
    the GNU Affero General Public License along with this program. If not, see <https://www.gnu.org/licenses/>.
*/
//! Simulated customers hammering a running rental service.
//!
//! Each customer looks for available scooters around its position, rents one at random,
//! rides it for a while and frees it, until it has completed its rentals. All customers
//! run at the same time, so they regularly race for the same scooter.

use std::{env::var, time::Duration};

use futures::future::join_all;
use rand::Rng;
use reqwest::{Client, StatusCode};
use scooter_rental_service::tools::logger::{
    error, info, setup_tracing, warn, LogLevel, LoggerConfig,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

const RENTALS_PER_CUSTOMER: usize = 5;
const RIDE_DURATION: Duration = Duration::from_secs(10);
const RETRY_DELAY: Duration = Duration::from_secs(1);

#[derive(Debug, thiserror::Error)]
enum LoadTestError {
    #[error("request failed : {0}")]
    Request(#[from] reqwest::Error),
    #[error("unexpected status {0} : {1}")]
    UnexpectedStatus(StatusCode, String),
}

#[derive(Debug, Clone)]
struct Customer {
    client_id: Uuid,
    longitude: f64,
    latitude: f64,
    radius: f64,
    city: String,
}

impl Customer {
    fn new(city: &str, longitude: f64, latitude: f64) -> Self {
        Customer {
            client_id: Uuid::new_v4(),
            longitude,
            latitude,
            radius: 50000.0,
            city: city.to_string(),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug)]
struct Scooter {
    #[serde(rename = "UUID")]
    uuid: String,
    longitude: f64,
    latitude: f64,
    availability: bool,
}

#[derive(Serialize, Debug)]
struct RentRequest<'a> {
    #[serde(rename = "UUID")]
    uuid: &'a str,
    longitude: f64,
    latitude: f64,
    availability: bool,
    city: &'a str,
}

async fn expect_success(response: reqwest::Response) -> Result<reqwest::Response, LoadTestError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(LoadTestError::UnexpectedStatus(status, body))
}

async fn get_scooters(
    http: &Client,
    host: &str,
    customer: &Customer,
) -> Result<Vec<Scooter>, LoadTestError> {
    let response = http
        .get(format!("{host}/v1/scooters"))
        .header("clientUUID", customer.client_id.to_string())
        .query(&[
            ("longitude", customer.longitude.to_string()),
            ("latitude", customer.latitude.to_string()),
            ("radius", customer.radius.to_string()),
            ("city", customer.city.clone()),
        ])
        .send()
        .await?;

    Ok(expect_success(response).await?.json::<Vec<Scooter>>().await?)
}

async fn rent_scooter(
    http: &Client,
    host: &str,
    customer: &Customer,
    scooter: &Scooter,
) -> Result<(), LoadTestError> {
    let response = http
        .post(format!("{host}/v1/rent"))
        .header("clientUUID", customer.client_id.to_string())
        .json(&RentRequest {
            uuid: &scooter.uuid,
            longitude: scooter.longitude,
            latitude: scooter.latitude,
            availability: scooter.availability,
            city: &customer.city,
        })
        .send()
        .await?;

    expect_success(response).await.map(|_| ())
}

async fn free_scooter(
    http: &Client,
    host: &str,
    customer: &Customer,
    scooter_id: &str,
) -> Result<(), LoadTestError> {
    let response = http
        .post(format!("{host}/v1/free"))
        .header("clientUUID", customer.client_id.to_string())
        .json(scooter_id)
        .send()
        .await?;

    expect_success(response).await.map(|_| ())
}

async fn ride(http: Client, host: String, customer: Customer) -> Result<(), LoadTestError> {
    let mut completed = 0;

    while completed < RENTALS_PER_CUSTOMER {
        let available: Vec<Scooter> = get_scooters(&http, &host, &customer)
            .await?
            .into_iter()
            .filter(|scooter| scooter.availability)
            .collect();

        if available.is_empty() {
            info!(tag = "[No Available Scooters]", client_id = %customer.client_id, city = %customer.city);
            tokio::time::sleep(RETRY_DELAY).await;
            continue;
        }

        let scooter = &available[rand::thread_rng().gen_range(0..available.len())];

        if let Err(err) = rent_scooter(&http, &host, &customer, scooter).await {
            warn!(tag = "[Rent Failed]", client_id = %customer.client_id, scooter_id = %scooter.uuid, error = %err);
            tokio::time::sleep(RETRY_DELAY).await;
            continue;
        }
        info!(tag = "[Rented Scooter]", client_id = %customer.client_id, scooter_id = %scooter.uuid);

        tokio::time::sleep(RIDE_DURATION).await;

        match free_scooter(&http, &host, &customer, &scooter.uuid).await {
            Ok(_) => {
                info!(tag = "[Freed Scooter]", client_id = %customer.client_id, scooter_id = %scooter.uuid)
            }
            // The scooter is available again, only its tracking had trouble.
            Err(LoadTestError::UnexpectedStatus(StatusCode::INTERNAL_SERVER_ERROR, body))
                if body.contains("TRACKING_FAILED") =>
            {
                warn!(tag = "[Freed Scooter With Tracking Errors]", client_id = %customer.client_id, scooter_id = %scooter.uuid, body = %body)
            }
            Err(err) => return Err(err),
        }

        completed += 1;
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    let _guard = setup_tracing(LoggerConfig {
        level: LogLevel::INFO,
        log_to_file: false,
    });

    let host = var("SCOOTER_SERVICE_URL").unwrap_or_else(|_| "http://127.0.0.1:8080".to_string());
    let http = Client::new();

    let customers = vec![
        Customer::new("Ottawa", 73.4, 45.4),
        Customer::new("Ottawa", 73.5, 45.5),
        Customer::new("Ottawa", 73.6, 45.6),
        Customer::new("Montreal", 65.5, 30.5),
        Customer::new("Montreal", 65.6, 30.4),
    ];

    let results = join_all(
        customers
            .into_iter()
            .map(|customer| ride(http.clone(), host.clone(), customer)),
    )
    .await;

    let failed = results.iter().filter(|result| result.is_err()).count();
    for err in results.into_iter().filter_map(Result::err) {
        error!(tag = "[Customer Failed]", error = %err);
    }

    info!(tag = "[Load Test Finished]", failed_customers = failed);
}
