/*  Copyright 2022-23, Juspay India Pvt Ltd
    This program is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License
    as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version. This program
    is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY
    or FITNESS FOR A PARTICULAR PURPOSE. See the GNU Affero General Public License for more details. You should have received a copy of
    the GNU Affero General Public License along with this program. If not, see <https://www.gnu.org/licenses/>.
*/
use async_trait::async_trait;
use fred::{
    interfaces::{GeoInterface, KeysInterface},
    types::{GeoPosition, GeoRadiusInfo, GeoUnit, GeoValue, RedisValue, SortOrder},
};
use uuid::Uuid;

use super::{keys::*, types::RedisConnectionPool};
use crate::{
    common::types::*,
    store::LocationStore,
    tools::{error::AppError, logger::*},
};

const AVAILABLE: &str = "1";
const UNAVAILABLE: &str = "0";

impl RedisConnectionPool {
    // set key, without expiry
    #[instrument(level = "DEBUG", skip(self))]
    pub async fn set_key(&self, key: &str, value: &str) -> Result<(), fred::error::RedisError> {
        self.pool.set(key, value, None, None, false).await
    }

    // get key
    #[instrument(level = "DEBUG", skip(self))]
    pub async fn get_key(&self, key: &str) -> Result<Option<String>, fred::error::RedisError> {
        self.pool.get(key).await
    }

    //GEOADD
    #[instrument(level = "DEBUG", skip(self))]
    pub async fn geo_add(&self, key: &str, value: GeoValue) -> Result<(), fred::error::RedisError> {
        self.pool.geoadd(key, None, false, value).await
    }

    //GEOSEARCH
    #[instrument(level = "DEBUG", skip(self))]
    pub async fn geo_search_by_radius(
        &self,
        key: &str,
        center: GeoPosition,
        radius_in_meters: f64,
    ) -> Result<Vec<GeoRadiusInfo>, fred::error::RedisError> {
        let redis_val: RedisValue = self
            .pool
            .geosearch(
                key,
                None,
                Some(center),
                Some((radius_in_meters, GeoUnit::Meters)),
                None,
                Some(SortOrder::Asc),
                None,
                true,
                false,
                false,
            )
            .await?;
        redis_val.into_geo_radius_result(true, false, false)
    }

    //GEOPOS
    #[instrument(level = "DEBUG", skip(self))]
    pub async fn geo_pos(
        &self,
        key: &str,
        member: String,
    ) -> Result<Option<GeoPosition>, fred::error::RedisError> {
        let redis_val: RedisValue = self.pool.geopos(key, member).await?;

        // A single member may come back either wrapped in an array or flattened.
        match redis_val {
            RedisValue::Array(items) if items.len() == 1 => items[0].as_geo_position(),
            other => other.as_geo_position(),
        }
    }
}

#[async_trait]
impl LocationStore for RedisConnectionPool {
    async fn persist_location(
        &self,
        scooter_id: &ScooterId,
        Point {
            lat: Latitude(latitude),
            lon: Longitude(longitude),
        }: Point,
        city: &CityName,
    ) -> Result<(), AppError> {
        self.geo_add(
            &scooter_loc_key(city),
            GeoValue {
                coordinates: GeoPosition {
                    latitude,
                    longitude,
                },
                member: scooter_id.to_string().into(),
            },
        )
        .await
        .map_err(|err| AppError::LocationUpdateFailed(err.to_string()))
    }

    async fn set_availability(
        &self,
        scooter_id: &ScooterId,
        available: bool,
    ) -> Result<(), AppError> {
        let value = if available { AVAILABLE } else { UNAVAILABLE };

        self.set_key(&scooter_availability_key(scooter_id), value)
            .await
            .map_err(|err| AppError::AvailabilityUpdateFailed(err.to_string()))
    }

    async fn get_availability(&self, scooter_id: &ScooterId) -> Result<bool, AppError> {
        let availability = self
            .get_key(&scooter_availability_key(scooter_id))
            .await
            .map_err(|err| AppError::AvailabilityFetchFailed(err.to_string()))?;

        match availability.as_deref() {
            Some(AVAILABLE) | Some("true") => Ok(true),
            Some(UNAVAILABLE) | Some("false") => Ok(false),
            Some(other) => Err(AppError::AvailabilityFetchFailed(format!(
                "Unexpected availability value ({other}) for scooter {scooter_id}"
            ))),
            None => Err(AppError::AvailabilityNotFound(scooter_id.to_string())),
        }
    }

    async fn query_nearby(
        &self,
        Point {
            lat: Latitude(latitude),
            lon: Longitude(longitude),
        }: Point,
        Radius(radius): Radius,
        city: &CityName,
    ) -> Result<Vec<ScooterLocation>, AppError> {
        let nearby_scooters = self
            .geo_search_by_radius(
                &scooter_loc_key(city),
                GeoPosition {
                    latitude,
                    longitude,
                },
                radius,
            )
            .await
            .map_err(|err| AppError::NearbySearchFailed(err.to_string()))?;

        let mut resp: Vec<ScooterLocation> = Vec::with_capacity(nearby_scooters.len());

        for scooter in nearby_scooters {
            let scooter_id = scooter
                .member
                .as_string()
                .and_then(|member| Uuid::parse_str(&member).ok());

            match (scooter_id, scooter.position) {
                (Some(scooter_id), Some(position)) => resp.push(ScooterLocation {
                    scooter_id: ScooterId(scooter_id),
                    location: Point {
                        lat: Latitude(position.latitude),
                        lon: Longitude(position.longitude),
                    },
                }),
                _ => {
                    warn!(tag = "[Skipping Geo Member]", member = ?scooter.member);
                }
            }
        }

        Ok(resp)
    }

    async fn get_location(
        &self,
        scooter_id: &ScooterId,
        city: &CityName,
    ) -> Result<Option<Point>, AppError> {
        let position = self
            .geo_pos(&scooter_loc_key(city), scooter_id.to_string())
            .await
            .map_err(|err| AppError::LocationFetchFailed(err.to_string()))?;

        Ok(position.map(|position| Point {
            lat: Latitude(position.latitude),
            lon: Longitude(position.longitude),
        }))
    }

    async fn health_check(&self) -> Result<(), AppError> {
        self.set_key(&health_check_key(), "scooter-rental-service-health-check")
            .await
            .map_err(|err| AppError::InternalError(err.to_string()))?;

        self.get_key(&health_check_key())
            .await
            .map_err(|err| AppError::InternalError(err.to_string()))?
            .map(|_| ())
            .ok_or_else(|| {
                AppError::InternalError(
                    "Health check failed as cannot get key from redis".to_string(),
                )
            })
    }
}
