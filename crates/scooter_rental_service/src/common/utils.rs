/*  Copyright 2022-23, Juspay India Pvt Ltd
    This program is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License
    as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version. This program
    is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY
    or FITNESS FOR A PARTICULAR PURPOSE. See the GNU Affero General Public License for more details. You should have received a copy of
    the GNU Affero General Public License along with this program. If not, see <https://www.gnu.org/licenses/>.
*/
use super::types::*;
use crate::tools::error::AppError;
use std::f64::consts::PI;
use uuid::Uuid;

fn deg2rad(degrees: f64) -> f64 {
    degrees * PI / 180.0
}

pub fn distance_between_in_meters(latlong1: &Point, latlong2: &Point) -> f64 {
    // Haversine, with the mean radius of Earth in meters
    let r: f64 = 6371000.0;

    let Latitude(lat1) = latlong1.lat;
    let Longitude(lon1) = latlong1.lon;
    let Latitude(lat2) = latlong2.lat;
    let Longitude(lon2) = latlong2.lon;

    let dlat = deg2rad(lat2 - lat1);
    let dlon = deg2rad(lon2 - lon1);

    let rlat1 = deg2rad(lat1);
    let rlat2 = deg2rad(lat2);

    let sq = |x: f64| x * x;

    let h = sq((dlat / 2.0).sin()) + rlat1.cos() * rlat2.cos() * sq((dlon / 2.0).sin());

    2.0 * r * h.sqrt().atan2((1.0 - h).sqrt())
}

pub fn parse_scooter_id(raw: &str) -> Result<ScooterId, AppError> {
    Uuid::parse_str(raw.trim())
        .map(ScooterId)
        .map_err(|err| AppError::InvalidRequest(format!("Invalid scooter id ({raw}) : {err}")))
}

pub fn validate_point(point: &Point) -> Result<(), AppError> {
    let Point {
        lat: Latitude(lat),
        lon: Longitude(lon),
    } = *point;

    if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) {
        return Err(AppError::InvalidRequest(format!(
            "Coordinates out of range : (Lat : {lat}, Lon : {lon})"
        )));
    }

    Ok(())
}

pub fn validate_city(CityName(city): &CityName) -> Result<(), AppError> {
    if city.trim().is_empty() {
        return Err(AppError::InvalidRequest("City must not be empty".to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_to_self_is_zero() {
        let point = Point {
            lat: Latitude(45.5017),
            lon: Longitude(73.5673),
        };
        assert!(distance_between_in_meters(&point, &point) < 1e-6);
    }

    #[test]
    fn one_degree_of_latitude_is_about_111_km() {
        let from = Point {
            lat: Latitude(0.0),
            lon: Longitude(0.0),
        };
        let to = Point {
            lat: Latitude(1.0),
            lon: Longitude(0.0),
        };
        let distance = distance_between_in_meters(&from, &to);
        assert!((111_000.0..111_400.0).contains(&distance), "{distance}");
    }

    #[test]
    fn malformed_scooter_id_is_invalid_request() {
        assert!(matches!(
            parse_scooter_id("not-a-uuid"),
            Err(AppError::InvalidRequest(_))
        ));
        assert!(parse_scooter_id("0dae4f8c-dbbf-4bac-90f2-b80f07255ba5").is_ok());
    }

    #[test]
    fn out_of_range_point_is_rejected() {
        let point = Point {
            lat: Latitude(91.0),
            lon: Longitude(0.0),
        };
        assert!(validate_point(&point).is_err());
        assert!(validate_city(&CityName("  ".to_string())).is_err());
    }
}
