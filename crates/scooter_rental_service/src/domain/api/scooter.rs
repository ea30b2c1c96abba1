/*  Copyright 2022-23, Juspay India Pvt Ltd
    This program is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License
    as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version. This program
    is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY
    or FITNESS FOR A PARTICULAR PURPOSE. See the GNU Affero General Public License for more details. You should have received a copy of
    the GNU Affero General Public License along with this program. If not, see <https://www.gnu.org/licenses/>.
*/
use actix_web::{
    get, post,
    web::{Data, Json, Query},
    HttpRequest,
};

use crate::{
    common::types::*,
    domain::{
        action::{rental, scooter},
        types::scooter::*,
    },
    environment::AppState,
    tools::{error::AppError, logger::*},
};

use super::client_id;

#[get("/v1/scooters")]
pub async fn get_scooters(
    data: Data<AppState>,
    param_obj: Query<ScooterQueryParams>,
    req: HttpRequest,
) -> Result<Json<Vec<ScooterDetails>>, AppError> {
    let _ = client_id(&req)?;

    Ok(Json(
        scooter::get_scooters(data, param_obj.into_inner()).await?,
    ))
}

#[post("/v1/rent")]
pub async fn rent_scooter(
    data: Data<AppState>,
    param_obj: Json<RentScooterRequest>,
    req: HttpRequest,
) -> Result<Json<APISuccess>, AppError> {
    let ClientId(client_id) = client_id(&req)?;
    let request_body = param_obj.into_inner();

    info!(tag = "[Rent Scooter]", client_id = %client_id, scooter_id = %request_body.uuid);

    Ok(Json(rental::rent_scooter(data, request_body).await?))
}

#[post("/v1/free")]
pub async fn free_scooter(
    data: Data<AppState>,
    param_obj: Json<String>,
    req: HttpRequest,
) -> Result<Json<APISuccess>, AppError> {
    let ClientId(client_id) = client_id(&req)?;
    let scooter_id = param_obj.into_inner();

    info!(tag = "[Free Scooter]", client_id = %client_id, scooter_id = %scooter_id);

    Ok(Json(rental::free_scooter(data, scooter_id).await?))
}
