/*  Copyright 2022-23, Juspay India Pvt Ltd
    This program is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License
    as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version. This program
    is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY
    or FITNESS FOR A PARTICULAR PURPOSE. See the GNU Affero General Public License for more details. You should have received a copy of
    the GNU Affero General Public License along with this program. If not, see <https://www.gnu.org/licenses/>.
*/

use actix_web::{
    http::{header::ContentType, StatusCode},
    HttpResponse, ResponseError,
};
use serde::{Deserialize, Serialize};

use crate::tracking::report::TrackingReport;

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    error_message: String,
    pub error_code: String,
}

#[derive(Debug, Serialize, thiserror::Error)]
pub enum AppError {
    #[error("INTERNAL_ERROR")]
    InternalError(String),
    #[error("INVALID_REQUEST")]
    InvalidRequest(String),
    #[error("UNPROCESSIBLE_REQUEST")]
    UnprocessibleRequest(String),
    #[error("SCOOTER_ALREADY_RENTED")]
    ScooterAlreadyRented(String),
    #[error("SCOOTER_NOT_RENTED")]
    ScooterNotRented(String),
    #[error("LOCATION_UPDATE_FAILED")]
    LocationUpdateFailed(String),
    #[error("LOCATION_FETCH_FAILED")]
    LocationFetchFailed(String),
    #[error("AVAILABILITY_UPDATE_FAILED")]
    AvailabilityUpdateFailed(String),
    #[error("AVAILABILITY_FETCH_FAILED")]
    AvailabilityFetchFailed(String),
    #[error("AVAILABILITY_NOT_FOUND")]
    AvailabilityNotFound(String),
    #[error("NEARBY_SEARCH_FAILED")]
    NearbySearchFailed(String),
    #[error("REDIS_CONNECTION_ERROR")]
    RedisConnectionError(String),
    #[error("TRACKING_FAILED")]
    TrackingFailed(TrackingReport),
    #[error("REQUEST_TIMEOUT")]
    RequestTimeout,
}

impl AppError {
    fn error_message(&self) -> ErrorBody {
        ErrorBody {
            error_message: self.message(),
            error_code: self.code(),
        }
    }

    pub fn message(&self) -> String {
        match self {
            AppError::InternalError(err) => err.to_string(),
            AppError::InvalidRequest(err) => err.to_string(),
            AppError::UnprocessibleRequest(err) => err.to_string(),
            AppError::ScooterAlreadyRented(scooter_id) => {
                format!("Scooter {scooter_id} is already rented, choose another one")
            }
            AppError::ScooterNotRented(scooter_id) => {
                format!("Can't free scooter {scooter_id} that has not been rented")
            }
            AppError::LocationUpdateFailed(err) => format!("Location Update Failed : {err}"),
            AppError::LocationFetchFailed(err) => format!("Location Fetch Failed : {err}"),
            AppError::AvailabilityUpdateFailed(err) => {
                format!("Availability Update Failed : {err}")
            }
            AppError::AvailabilityFetchFailed(err) => {
                format!("Availability Fetch Failed : {err}")
            }
            AppError::AvailabilityNotFound(scooter_id) => {
                format!("Availability not found for scooter {scooter_id}")
            }
            AppError::NearbySearchFailed(err) => format!("Nearby Search Failed : {err}"),
            AppError::RedisConnectionError(err) => format!("Redis Connection Error : {err}"),
            AppError::TrackingFailed(report) => report.to_string(),
            AppError::RequestTimeout => "Request timed out".to_string(),
        }
    }

    pub fn code(&self) -> String {
        match self {
            AppError::InternalError(_) => "INTERNAL_ERROR",
            AppError::InvalidRequest(_) => "INVALID_REQUEST",
            AppError::UnprocessibleRequest(_) => "UNPROCESSIBLE_REQUEST",
            AppError::ScooterAlreadyRented(_) => "SCOOTER_ALREADY_RENTED",
            AppError::ScooterNotRented(_) => "SCOOTER_NOT_RENTED",
            AppError::LocationUpdateFailed(_) => "LOCATION_UPDATE_FAILED",
            AppError::LocationFetchFailed(_) => "LOCATION_FETCH_FAILED",
            AppError::AvailabilityUpdateFailed(_) => "AVAILABILITY_UPDATE_FAILED",
            AppError::AvailabilityFetchFailed(_) => "AVAILABILITY_FETCH_FAILED",
            AppError::AvailabilityNotFound(_) => "AVAILABILITY_NOT_FOUND",
            AppError::NearbySearchFailed(_) => "NEARBY_SEARCH_FAILED",
            AppError::RedisConnectionError(_) => "REDIS_CONNECTION_FAILED",
            AppError::TrackingFailed(_) => "TRACKING_FAILED",
            AppError::RequestTimeout => "REQUEST_TIMEOUT",
        }
        .to_string()
    }
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code())
            .insert_header(ContentType::json())
            .json(self.error_message())
    }

    fn status_code(&self) -> StatusCode {
        match self {
            AppError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            AppError::UnprocessibleRequest(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::ScooterAlreadyRented(_) => StatusCode::CONFLICT,
            AppError::ScooterNotRented(_) => StatusCode::NOT_FOUND,
            AppError::LocationUpdateFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::LocationFetchFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::AvailabilityUpdateFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::AvailabilityFetchFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::AvailabilityNotFound(_) => StatusCode::NOT_FOUND,
            AppError::NearbySearchFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::RedisConnectionError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::TrackingFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::RequestTimeout => StatusCode::REQUEST_TIMEOUT,
        }
    }
}
