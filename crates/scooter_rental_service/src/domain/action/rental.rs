/*  Copyright 2022-23, Juspay India Pvt Ltd
    This program is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License
    as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version. This program
    is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY
    or FITNESS FOR A PARTICULAR PURPOSE. See the GNU Affero General Public License for more details. You should have received a copy of
    the GNU Affero General Public License along with this program. If not, see <https://www.gnu.org/licenses/>.
*/
use actix_web::web::Data;

use crate::{
    common::{types::*, utils::parse_scooter_id},
    domain::types::scooter::RentScooterRequest,
    environment::AppState,
    rental_request,
    tools::{error::AppError, prometheus::RENTAL_REQUESTS},
};

pub async fn rent_scooter(
    data: Data<AppState>,
    RentScooterRequest {
        uuid,
        longitude,
        latitude,
        city,
        ..
    }: RentScooterRequest,
) -> Result<APISuccess, AppError> {
    let result = data
        .coordinator
        .rent(RentalScooter {
            scooter_id: uuid,
            location: Point {
                lat: Latitude(latitude),
                lon: Longitude(longitude),
            },
            city: CityName(city),
        })
        .await;

    rental_request!("RENT", &result);

    result.map(|_| APISuccess::default())
}

pub async fn free_scooter(data: Data<AppState>, scooter_id: String) -> Result<APISuccess, AppError> {
    let result = match parse_scooter_id(&scooter_id) {
        Ok(scooter_id) => data.coordinator.free(scooter_id).await,
        Err(err) => Err(err),
    };

    rental_request!("FREE", &result);

    result.map(|_| APISuccess::default())
}
