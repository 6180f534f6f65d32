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

//! Header indexing: parses the year/month band and the plan/fact type band
//! into a lookup from reporting period to physical column addresses.
//!
//! The year/month band is sparsely populated because merged header cells
//! come back as one value followed by blanks. A type cell therefore
//! resolves its period by forward-fill: the nearest non-blank year/month
//! cell at or left of its own index.

use crate::grid::codec::month_to_number;
use crate::grid::layout::GridLayout;
use std::collections::HashMap;
use tracing::debug;

/// Type-band marker for a plan column.
pub const PLAN_MARKER: &str = "п";
/// Type-band marker for a fact column.
pub const FACT_MARKER: &str = "ф";

/// One reporting period: a (year, month) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PeriodKey {
    pub year: i32,
    pub month: u32,
}

/// Physical column addresses for one period's plan and fact cells.
///
/// Either field may be absent when the header carries only one of the two
/// type markers for that period.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PeriodColumns {
    /// Absolute 1-based column of the plan cell
    pub plan_column: Option<u32>,
    /// Absolute 1-based column of the fact cell
    pub fact_column: Option<u32>,
}

/// Builds the period index from the two header bands.
///
/// Columns that cannot be addressed to a period (no non-blank year/month
/// cell to the left, unrecognized month abbreviation, non-numeric year)
/// are skipped individually; the scan never aborts. When the same period
/// and type appear under more than one column the later column wins -
/// an explicit last-write-wins policy matching the duplicate handling in
/// [`crate::grid::rows`].
pub fn build_period_index(
    year_row: &[String],
    type_row: &[String],
    layout: &GridLayout,
) -> HashMap<PeriodKey, PeriodColumns> {
    let mut index: HashMap<PeriodKey, PeriodColumns> = HashMap::new();

    for (i, type_cell) in type_row.iter().enumerate() {
        let marker = type_cell.trim().to_lowercase();
        if marker != PLAN_MARKER && marker != FACT_MARKER {
            continue;
        }

        // Forward-fill: nearest non-blank year/month cell at or left of i.
        let Some(year_month) = year_row[..year_row.len().min(i + 1)]
            .iter()
            .rev()
            .map(|cell| cell.trim())
            .find(|cell| !cell.is_empty())
        else {
            debug!("⏭️  Type marker at rectangle column {} has no year/month header, skipping", i);
            continue;
        };

        let Some(key) = parse_period(year_month) else {
            debug!("⏭️  Unparseable year/month header '{}', skipping column {}", year_month, i);
            continue;
        };

        let column = layout.first_column + i as u32;
        let entry = index.entry(key).or_default();
        if marker == PLAN_MARKER {
            entry.plan_column = Some(column);
        } else {
            entry.fact_column = Some(column);
        }
    }

    index
}

/// Parses a header cell like "янв.2024" or "февр 2024" into a period key.
fn parse_period(text: &str) -> Option<PeriodKey> {
    let mut tokens = text
        .split(|c: char| c == '.' || c.is_whitespace())
        .filter(|token| !token.is_empty());

    let month_token = tokens.next()?;
    let year_token = tokens.next()?;

    let month = month_to_number(month_token)?;
    let year = year_token.parse::<i32>().ok()?;

    Some(PeriodKey { year, month })
}
