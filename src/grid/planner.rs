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

//! Update planning: resolves each metric record against the period and row
//! indices and emits exact-cell write instructions.

use crate::grid::codec::column_to_letter;
use crate::grid::header::{PeriodColumns, PeriodKey};
use crate::metrics::MetricRecord;
use std::collections::HashMap;
use tracing::debug;

/// One pending cell write: a sheet-qualified A1 address and its value.
#[derive(Debug, Clone, PartialEq)]
pub struct CellUpdate {
    /// Sheet-qualified cell address, e.g. "ВА!D8"
    pub range: String,
    /// Numeric payload, written with typed input semantics
    pub value: f64,
}

impl CellUpdate {
    fn new(sheet: &str, column: u32, row: u32, value: f64) -> Self {
        Self {
            range: format!("{}!{}{}", sheet, column_to_letter(column), row),
            value,
        }
    }
}

/// Plans the cell updates for one sheet's group of records.
///
/// A record whose period is absent from the period index or whose object
/// name is absent from the row index is skipped entirely; that is a
/// resolution miss, not an error. Once both resolve, plan and fact are
/// emitted independently: a missing plan column suppresses only the plan
/// cell and vice versa. Values pass through without validation and
/// duplicates are not collapsed; output order follows record order, so
/// planning is deterministic for fixed inputs.
pub fn plan_updates(
    sheet: &str,
    records: &[MetricRecord],
    periods: &HashMap<PeriodKey, PeriodColumns>,
    rows: &HashMap<String, u32>,
) -> Vec<CellUpdate> {
    let mut updates = Vec::new();

    for record in records {
        let key = PeriodKey {
            year: record.year,
            month: record.month,
        };

        let (Some(columns), Some(&row)) = (periods.get(&key), rows.get(record.object_name.trim()))
        else {
            debug!(
                "⏭️  Skipping {} {}-{}: missing column or row",
                record.object_name, record.year, record.month
            );
            continue;
        };

        debug!(
            "📝 Updating {} ({}-{}): plan {}, fact {}",
            record.object_name, record.year, record.month, record.plan, record.fact
        );

        if let Some(plan_column) = columns.plan_column {
            updates.push(CellUpdate::new(sheet, plan_column, row, record.plan));
        }
        if let Some(fact_column) = columns.fact_column {
            updates.push(CellUpdate::new(sheet, fact_column, row, record.fact));
        }
    }

    updates
}
