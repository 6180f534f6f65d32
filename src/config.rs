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

//! Configuration for synchronization passes.
//!
//! Required settings come from CLI flags with environment-variable
//! fallbacks; validation happens before any network I/O so that missing
//! configuration never leaves partial effects behind.

use crate::utils::errors::SyncError;
use std::path::PathBuf;

/// Runtime settings for one synchronization pass.
#[derive(Debug, Clone)]
pub struct Config {
    /// URL of the internal reporting API returning metric records
    pub api_url: String,
    /// Target Google spreadsheet ID
    pub spreadsheet_id: String,
    /// Path to the Google service account key file
    pub key_file: PathBuf,
    /// Whether to run in dry-run mode (no actual writes)
    pub dry_run: bool,
}

impl Config {
    pub fn new(api_url: String, spreadsheet_id: String, key_file: PathBuf, dry_run: bool) -> Self {
        Self {
            api_url,
            spreadsheet_id,
            key_file,
            dry_run,
        }
    }

    /// Validates the configuration settings.
    ///
    /// # Errors
    ///
    /// * If the internal API URL is empty
    /// * If the spreadsheet ID is empty
    /// * If the service account key file does not exist
    pub fn validate(&self) -> Result<(), SyncError> {
        if self.api_url.trim().is_empty() {
            return Err(SyncError::Config(
                "INTERNAL_API_URL is not defined in the config".to_string(),
            ));
        }

        if self.spreadsheet_id.trim().is_empty() {
            return Err(SyncError::Config(
                "SPREADSHEET_ID is not defined in the config".to_string(),
            ));
        }

        if !self.key_file.is_file() {
            return Err(SyncError::Config(format!(
                "Service account key file not found: {:?}",
                self.key_file
            )));
        }

        Ok(())
    }
}
