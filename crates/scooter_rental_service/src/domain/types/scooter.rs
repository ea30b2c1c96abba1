/*  Copyright 2022-23, Juspay India Pvt Ltd
    This program is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License
    as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version. This program
    is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY
    or FITNESS FOR A PARTICULAR PURPOSE. See the GNU Affero General Public License for more details. You should have received a copy of
    the GNU Affero General Public License along with this program. If not, see <https://www.gnu.org/licenses/>.
*/
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ScooterQueryParams {
    pub longitude: f64,
    pub latitude: f64,
    /// Meters
    pub radius: f64,
    pub city: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ScooterDetails {
    #[serde(rename = "UUID")]
    pub uuid: String,
    pub longitude: f64,
    pub latitude: f64,
    pub availability: bool,
}

/// Body of a rent call. `availability` is what the client last saw and is not trusted.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RentScooterRequest {
    #[serde(rename = "UUID")]
    pub uuid: String,
    pub longitude: f64,
    pub latitude: f64,
    #[serde(default)]
    pub availability: bool,
    pub city: String,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct ResponseData {
    pub result: String,
}
