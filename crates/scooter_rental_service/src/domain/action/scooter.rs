/*  Copyright 2022-23, Juspay India Pvt Ltd
    This program is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License
    as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version. This program
    is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY
    or FITNESS FOR A PARTICULAR PURPOSE. See the GNU Affero General Public License for more details. You should have received a copy of
    the GNU Affero General Public License along with this program. If not, see <https://www.gnu.org/licenses/>.
*/
use actix_web::web::Data;

use crate::{
    common::{
        types::*,
        utils::{parse_scooter_id, validate_city, validate_point},
    },
    domain::types::scooter::*,
    environment::{AppState, SeedScooter},
    store::LocationStore,
    tools::{error::AppError, logger::*},
};

pub async fn get_scooters(
    data: Data<AppState>,
    ScooterQueryParams {
        longitude,
        latitude,
        radius,
        city,
    }: ScooterQueryParams,
) -> Result<Vec<ScooterDetails>, AppError> {
    let center = Point {
        lat: Latitude(latitude),
        lon: Longitude(longitude),
    };
    let city = CityName(city);

    validate_point(&center)?;
    validate_city(&city)?;
    if !radius.is_finite() || radius < 0.0 {
        return Err(AppError::InvalidRequest(format!(
            "Radius must be a positive number of meters : {radius}"
        )));
    }

    let nearby = data
        .store
        .query_nearby(center, Radius(radius), &city)
        .await?;

    let mut scooters = Vec::with_capacity(nearby.len());
    for ScooterLocation {
        scooter_id,
        location,
    } in nearby
    {
        let availability = data.store.get_availability(&scooter_id).await?;
        scooters.push(ScooterDetails {
            uuid: scooter_id.to_string(),
            longitude: location.lon.0,
            latitude: location.lat.0,
            availability,
        });
    }

    Ok(scooters)
}

/// Places the configured fleet in the store, every scooter available.
pub async fn seed_scooters(
    store: &dyn LocationStore,
    seed_scooters: &[SeedScooter],
) -> Result<(), AppError> {
    for SeedScooter { id, city, lat, lon } in seed_scooters {
        let scooter_id = parse_scooter_id(id)?;
        let location = Point {
            lat: Latitude(*lat),
            lon: Longitude(*lon),
        };
        let city = CityName(city.to_owned());

        validate_point(&location)?;
        validate_city(&city)?;

        store.persist_location(&scooter_id, location, &city).await?;
        store.set_availability(&scooter_id, true).await?;
    }

    info!(tag = "[Seeded Scooters]", count = seed_scooters.len());

    Ok(())
}
