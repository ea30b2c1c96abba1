/*  Copyright 2022-23, Juspay India Pvt Ltd
    This program is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License
    as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version. This program
    is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY
    or FITNESS FOR A PARTICULAR PURPOSE. See the GNU Affero General Public License for more details. You should have received a copy of
    the GNU Affero General Public License along with this program. If not, see <https://www.gnu.org/licenses/>.
*/
pub mod healthcheck;
pub mod scooter;

use actix_web::{web::ServiceConfig, HttpRequest};
use uuid::Uuid;

use crate::{common::types::ClientId, tools::error::AppError};

pub fn handler(config: &mut ServiceConfig) {
    config
        .service(scooter::get_scooters)
        .service(scooter::rent_scooter)
        .service(scooter::free_scooter)
        .service(healthcheck::health_check);
}

/// Every rental call names the customer making it in the `clientUUID` header.
pub fn client_id(req: &HttpRequest) -> Result<ClientId, AppError> {
    let client_id = req
        .headers()
        .get("clientUUID")
        .and_then(|header_value| header_value.to_str().ok())
        .ok_or(AppError::InvalidRequest(
            "clientUUID not found".to_string(),
        ))?;

    Uuid::parse_str(client_id)
        .map(ClientId)
        .map_err(|err| AppError::InvalidRequest(format!("Invalid clientUUID ({client_id}) : {err}")))
}
