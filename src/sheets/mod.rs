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

pub mod manager;

pub use manager::SheetsManager;

use crate::grid::{CellUpdate, GridLayout};
use crate::utils::errors::SyncError;

/// Read/write surface of the external grid store.
///
/// The pass is generic over this trait so the planning pipeline can run
/// against an in-memory store in tests. The production implementation is
/// [`SheetsManager`].
pub trait GridStore {
    /// Fetches the fixed header+data rectangle of one sheet as text cells.
    /// Rows outside the populated area come back absent.
    async fn read_rectangle(
        &self,
        sheet: &str,
        layout: &GridLayout,
    ) -> Result<Vec<Vec<String>>, SyncError>;

    /// Applies the accumulated cell updates for one sheet in a single
    /// batched call with typed input semantics. An empty batch must be a
    /// no-op, not an error.
    async fn write_batch(&self, sheet: &str, updates: &[CellUpdate]) -> Result<(), SyncError>;
}
