/*  Copyright 2022-23, Juspay India Pvt Ltd
    This program is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License
    as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version. This program
    is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY
    or FITNESS FOR A PARTICULAR PURPOSE. See the GNU Affero General Public License for more details. You should have received a copy of
    the GNU Affero General Public License along with this program. If not, see <https://www.gnu.org/licenses/>.
*/
use serde::Serialize;
use std::{collections::BTreeMap, fmt};

use crate::{common::types::ScooterId, tools::error::AppError};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TickFailure {
    pub message: String,
    pub count: u32,
}

/// Summary of every distinct store failure a tracking task ran into during one rental.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackingReport {
    pub scooter_id: ScooterId,
    pub failures: Vec<TickFailure>,
}

impl fmt::Display for TrackingReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Tracking of scooter {} met {} distinct error(s)",
            self.scooter_id,
            self.failures.len()
        )?;
        for TickFailure { message, count } in &self.failures {
            write!(f, "; {message}, {count} time(s)")?;
        }
        Ok(())
    }
}

/// Per-rental accumulator, keyed by error message.
#[derive(Debug, Default)]
pub struct TickErrors {
    failures: BTreeMap<String, u32>,
}

impl TickErrors {
    pub fn record(&mut self, err: &AppError) {
        *self.failures.entry(err.message()).or_insert(0) += 1;
    }

    pub fn is_empty(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn into_report(self, scooter_id: ScooterId) -> Option<TrackingReport> {
        if self.failures.is_empty() {
            return None;
        }

        Some(TrackingReport {
            scooter_id,
            failures: self
                .failures
                .into_iter()
                .map(|(message, count)| TickFailure { message, count })
                .collect(),
        })
    }
}
