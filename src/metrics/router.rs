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

use crate::metrics::client::MetricRecord;

/// The production routing rule: object names prefixed with "Б" belong to
/// sheet "Б", everything else to sheet "ВА".
pub fn sheet_for_object(object_name: &str) -> &'static str {
    if object_name.starts_with('Б') { "Б" } else { "ВА" }
}

/// Partitions records into per-sheet groups.
///
/// Each record lands in exactly one group via the classification function.
/// Groups keep first-seen order, and that order is the order sheets are
/// processed and flushed, which matters when a later group's flush fails
/// after an earlier one has already been applied.
pub fn route_records<F>(records: Vec<MetricRecord>, classify: F) -> Vec<(String, Vec<MetricRecord>)>
where
    F: Fn(&MetricRecord) -> String,
{
    let mut groups: Vec<(String, Vec<MetricRecord>)> = Vec::new();

    for record in records {
        let sheet = classify(&record);
        match groups.iter_mut().find(|(name, _)| *name == sheet) {
            Some((_, group)) => group.push(record),
            None => groups.push((sheet, vec![record])),
        }
    }

    groups
}
