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

use thiserror::Error;

/// Failure taxonomy for a synchronization pass.
///
/// `Config` and `Upstream` are pre-flight failures raised before any sheet
/// is touched. `GridRead` and `GridWrite` abort the failing sheet's group
/// and any groups not yet processed; groups already flushed stay applied.
/// Resolution misses (a record whose period or object name is absent from
/// the current indices) are not errors at all - they are skipped during
/// planning and only visible in diagnostic output.
#[derive(Error, Debug)]
pub enum SyncError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to fetch from internal API: {0}")]
    Upstream(String),

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Failed to read grid rectangle from sheet '{sheet}': {reason}")]
    GridRead { sheet: String, reason: String },

    #[error("Failed to write batch update to sheet '{sheet}': {reason}")]
    GridWrite { sheet: String, reason: String },
}

impl SyncError {
    /// True for failures that happen before any sheet is touched.
    pub fn is_precondition(&self) -> bool {
        matches!(self, SyncError::Config(_) | SyncError::Upstream(_))
    }
}
