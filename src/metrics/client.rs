// Copyright 2025 Planfact Sheets Sync Contributors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Client for the internal reporting API.
//!
//! One GET per pass, no retries. Any transport failure or non-success
//! status is fatal for the whole pass before any sheet is touched.

use crate::utils::errors::SyncError;
use serde::Deserialize;
use tracing::info;

/// One plan/fact measurement for an object in a reporting period.
///
/// The upstream API serializes fields in PascalCase.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MetricRecord {
    pub object_name: String,
    pub year: i32,
    /// Month number, 1-12
    pub month: u32,
    pub plan: f64,
    pub fact: f64,
}

pub struct MetricsClient {
    http: reqwest::Client,
    api_url: String,
}

impl MetricsClient {
    pub fn new(api_url: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_url,
        }
    }

    /// Fetches the full set of metric records for this pass.
    pub async fn fetch_records(&self) -> Result<Vec<MetricRecord>, SyncError> {
        info!("📡 Fetching metric records from {}", self.api_url);

        let response = self
            .http
            .get(&self.api_url)
            .send()
            .await
            .map_err(|err| SyncError::Upstream(err.to_string()))?
            .error_for_status()
            .map_err(|err| SyncError::Upstream(err.to_string()))?;

        let records: Vec<MetricRecord> = response
            .json()
            .await
            .map_err(|err| SyncError::Upstream(format!("invalid response body: {}", err)))?;

        info!("📥 Fetched {} metric records", records.len());
        Ok(records)
    }
}
