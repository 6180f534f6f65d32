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

//! Header-driven grid indexing and update planning.
//!
//! These modules are pure functions over the text rectangle read from a
//! sheet: no network access, no shared state. Indices are rebuilt from
//! scratch on every pass.

pub mod codec;
pub mod header;
pub mod layout;
pub mod planner;
pub mod rows;

pub use header::{PeriodColumns, PeriodKey, build_period_index};
pub use layout::GridLayout;
pub use planner::{CellUpdate, plan_updates};
pub use rows::build_row_index;
