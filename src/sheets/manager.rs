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

//! Google Sheets client for rectangle reads and batched cell writes.
//!
//! Authenticates with a service account key file and holds the API hub for
//! the lifetime of the process: constructed once, never mutated, safe for
//! concurrent read-only use. External calls are not retried; best-effort
//! synchronization with fail-fast semantics is the contract.

use crate::grid::{CellUpdate, GridLayout};
use crate::sheets::GridStore;
use crate::utils::errors::SyncError;
use google_sheets4::{
    Sheets,
    api::{BatchUpdateValuesRequest, ValueRange},
    hyper_rustls, yup_oauth2,
};
use hyper_util::{client::legacy::connect::HttpConnector, rt::TokioExecutor};
use std::path::Path;
use tracing::{debug, info};

/// Scope required for reading and writing spreadsheet values
const SCOPES: &[&str] = &["https://www.googleapis.com/auth/spreadsheets"];

pub struct SheetsManager {
    spreadsheet_id: String,
    hub: Sheets<hyper_rustls::HttpsConnector<HttpConnector>>,
}

impl SheetsManager {
    /// Builds the authenticated Google Sheets hub from a service account
    /// key file.
    ///
    /// # Errors
    ///
    /// * If the key file cannot be read or parsed
    /// * If the service account token exchange fails
    pub async fn connect(spreadsheet_id: &str, key_file: &Path) -> Result<Self, SyncError> {
        info!("🔑 Initializing Google Sheets API connection...");

        let key = yup_oauth2::read_service_account_key(key_file)
            .await
            .map_err(|err| {
                SyncError::Auth(format!(
                    "failed to read service account key {:?}: {}",
                    key_file, err
                ))
            })?;

        let auth = yup_oauth2::ServiceAccountAuthenticator::builder(key)
            .build()
            .await
            .map_err(|err| {
                SyncError::Auth(format!("failed to build service account authenticator: {}", err))
            })?;

        // Verify the credentials up front so auth problems surface before
        // any sheet is read.
        auth.token(SCOPES).await.map_err(|err| {
            SyncError::Auth(format!("failed to obtain service account token: {}", err))
        })?;

        let connector = hyper_rustls::HttpsConnectorBuilder::new()
            .with_native_roots()
            .map_err(|err| SyncError::Auth(format!("failed to load native TLS roots: {}", err)))?
            .https_or_http()
            .enable_http1()
            .build();

        let client = hyper_util::client::legacy::Client::builder(TokioExecutor::new()).build(connector);

        info!("✅ Google Sheets API connection established");

        Ok(Self {
            spreadsheet_id: spreadsheet_id.to_string(),
            hub: Sheets::new(client, auth),
        })
    }

    fn json_value_to_string(value: &serde_json::Value) -> String {
        match value {
            serde_json::Value::String(s) => s.clone(),
            serde_json::Value::Number(num) => num.to_string(),
            serde_json::Value::Bool(flag) => flag.to_string(),
            serde_json::Value::Null => String::new(),
            other => other.to_string(),
        }
    }
}

impl GridStore for SheetsManager {
    async fn read_rectangle(
        &self,
        sheet: &str,
        layout: &GridLayout,
    ) -> Result<Vec<Vec<String>>, SyncError> {
        let range = format!("{}!{}", sheet, layout.range());
        debug!("📖 Reading grid rectangle {}", range);

        let (_, value_range) = self
            .hub
            .spreadsheets()
            .values_get(&self.spreadsheet_id, &range)
            .doit()
            .await
            .map_err(|err| SyncError::GridRead {
                sheet: sheet.to_string(),
                reason: err.to_string(),
            })?;

        let rows: Vec<Vec<String>> = value_range
            .values
            .unwrap_or_default()
            .into_iter()
            .map(|row| row.iter().map(Self::json_value_to_string).collect())
            .collect();

        debug!("📋 [{}] Rectangle has {} populated rows", sheet, rows.len());
        Ok(rows)
    }

    async fn write_batch(&self, sheet: &str, updates: &[CellUpdate]) -> Result<(), SyncError> {
        if updates.is_empty() {
            info!("📋 [{}] No updates to send", sheet);
            return Ok(());
        }

        let data: Vec<ValueRange> = updates
            .iter()
            .map(|update| ValueRange {
                range: Some(update.range.clone()),
                values: Some(vec![vec![serde_json::Value::from(update.value)]]),
                major_dimension: Some("ROWS".to_string()),
                ..Default::default()
            })
            .collect();

        let request = BatchUpdateValuesRequest {
            // Typed input: numeric-looking values become numbers, not text
            value_input_option: Some("USER_ENTERED".to_string()),
            data: Some(data),
            ..Default::default()
        };

        info!("🚀 [{}] Sending batch update with {} cells...", sheet, updates.len());

        let (_, response) = self
            .hub
            .spreadsheets()
            .values_batch_update(request, &self.spreadsheet_id)
            .doit()
            .await
            .map_err(|err| SyncError::GridWrite {
                sheet: sheet.to_string(),
                reason: err.to_string(),
            })?;

        info!(
            "✅ [{}] Updated {} cells",
            sheet,
            response.total_updated_cells.unwrap_or(0)
        );
        Ok(())
    }
}
