/*  Copyright 2022-23, Juspay India Pvt Ltd
    This program is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License
    as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version. This program
    is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY
    or FITNESS FOR A PARTICULAR PURPOSE. See the GNU Affero General Public License for more details. You should have received a copy of
    the GNU Affero General Public License along with this program. If not, see <https://www.gnu.org/licenses/>.
*/
use std::time::Duration;

use actix_web::{
    get,
    web::{Data, Json},
};

use crate::{domain::types::scooter::ResponseData, environment::AppState, tools::error::AppError};

#[get("/healthcheck")]
pub async fn health_check(data: Data<AppState>) -> Result<Json<ResponseData>, AppError> {
    tokio::time::timeout(
        Duration::from_millis(data.request_timeout),
        data.store.health_check(),
    )
    .await
    .map_err(|_| AppError::RequestTimeout)??;

    Ok(Json(ResponseData {
        result: "Service Is Up".to_string(),
    }))
}
