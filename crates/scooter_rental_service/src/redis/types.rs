/*  Copyright 2022-23, Juspay India Pvt Ltd
    This program is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License
    as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version. This program
    is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY
    or FITNESS FOR A PARTICULAR PURPOSE. See the GNU Affero General Public License for more details. You should have received a copy of
    the GNU Affero General Public License along with this program. If not, see <https://www.gnu.org/licenses/>.
*/

use fred::{
    prelude::{ClientLike, RedisPool},
    types::{Blocking, ReconnectPolicy, RedisConfig, RespVersion},
};
use serde::Deserialize;

use crate::tools::{error::AppError, logger::*};

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct RedisSettings {
    pub host: String,
    pub port: u16,
    pub use_legacy_version: bool,
    pub pool_size: usize,
    pub partition: usize,
    pub reconnect_max_attempts: u32,
    /// Reconnect delay in milliseconds
    pub reconnect_delay: u32,
}

impl Default for RedisSettings {
    fn default() -> Self {
        RedisSettings {
            host: String::from("localhost"),
            port: 6379,
            use_legacy_version: false,
            pool_size: 10,
            partition: 0,
            reconnect_max_attempts: 5,
            reconnect_delay: 1000,
        }
    }
}

pub struct RedisConnectionPool {
    pub pool: RedisPool,
}

impl RedisConnectionPool {
    pub async fn new(conf: &RedisSettings) -> Result<Self, AppError> {
        let redis_connection_url = format!(
            "redis://{}:{}/{}", //URI Schema
            conf.host, conf.port, conf.partition
        );

        let mut config = RedisConfig::from_url(&redis_connection_url)
            .map_err(|err| AppError::RedisConnectionError(err.to_string()))?;

        if !conf.use_legacy_version {
            config.version = RespVersion::RESP3;
        }
        config.blocking = Blocking::Error;

        let reconnect_policy =
            ReconnectPolicy::new_constant(conf.reconnect_max_attempts, conf.reconnect_delay);

        let pool = RedisPool::new(config, None, None, Some(reconnect_policy), conf.pool_size)
            .map_err(|err| AppError::RedisConnectionError(err.to_string()))?;

        let _ = pool.connect();
        pool.wait_for_connect()
            .await
            .map_err(|err| AppError::RedisConnectionError(err.to_string()))?;

        info!(
            tag = "[Redis Connected]",
            host = %conf.host,
            port = conf.port,
            pool_size = conf.pool_size
        );

        Ok(Self { pool })
    }
}
