/*  Copyright 2022-23, Juspay India Pvt Ltd
    This program is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License
    as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version. This program
    is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY
    or FITNESS FOR A PARTICULAR PURPOSE. See the GNU Affero General Public License for more details. You should have received a copy of
    the GNU Affero General Public License along with this program. If not, see <https://www.gnu.org/licenses/>.
*/
use std::env::var;

use actix_web::{web, App, HttpServer};
use scooter_rental_service::{
    domain::{action::scooter::seed_scooters, api},
    environment::{AppConfig, AppState},
    tools::{
        error::AppError,
        logger::{error, info, setup_tracing},
        prometheus::prometheus_metrics,
    },
};
use tokio::runtime::Handle;
use tracing_actix_web::TracingLogger;

pub fn read_dhall_config(config_path: &str) -> Result<AppConfig, String> {
    let config = serde_dhall::from_file(config_path).parse::<AppConfig>();
    match config {
        Ok(config) => Ok(config),
        Err(e) => Err(format!("Error reading config: {}", e)),
    }
}

#[actix_web::main]
async fn start_server() -> std::io::Result<()> {
    let dhall_config_path = var("DHALL_CONFIG")
        .unwrap_or_else(|_| "./dhall_config/scooter_rental_service.dhall".to_string());
    let app_config = read_dhall_config(&dhall_config_path).unwrap_or_else(|err| {
        println!("Dhall Config Reading Error : {}", err);
        std::process::exit(1);
    });

    let _guard = setup_tracing(app_config.logger_cfg);

    let port = app_config.port;
    let workers = app_config.workers;
    let fleet = app_config.seed_scooters.clone();

    let app_state = AppState::new(app_config, Handle::current())
        .await
        .map_err(|err| std::io::Error::new(std::io::ErrorKind::Other, err.message()))?;

    if let Err(err) = seed_scooters(app_state.store.as_ref(), &fleet).await {
        error!(tag = "[Seed Scooters]", error = %err.message());
        std::process::exit(1);
    }

    let coordinator = app_state.coordinator.clone();
    let data = web::Data::new(app_state);

    HttpServer::new(move || {
        App::new()
            .app_data(data.clone())
            .app_data(
                web::JsonConfig::default()
                    .error_handler(|err, _| AppError::UnprocessibleRequest(err.to_string()).into()),
            )
            .app_data(
                web::QueryConfig::default()
                    .error_handler(|err, _| AppError::InvalidRequest(err.to_string()).into()),
            )
            .wrap(TracingLogger::default())
            .wrap(prometheus_metrics())
            .configure(api::handler)
    })
    .workers(workers)
    .bind(("0.0.0.0", port))?
    .run()
    .await?;

    let freed = coordinator.free_all().await;
    info!(tag = "[Graceful Shutting Down]", freed_rentals = freed.len());

    Ok(())
}

fn main() {
    start_server().expect("Failed to start the server");
}
