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

//! One synchronization pass: fetch, route, index, plan, flush.
//!
//! Sheet groups are processed strictly sequentially in router order, and
//! each group's indices are rebuilt from a fresh rectangle read; nothing
//! is cached between passes. A failed flush aborts the remaining groups
//! while already-flushed groups stay applied - partial synchronization is
//! an expected outcome, not corruption.

use crate::config::Config;
use crate::grid::{GridLayout, build_period_index, build_row_index, plan_updates};
use crate::metrics::{MetricRecord, MetricsClient, route_records, sheet_for_object};
use crate::sheets::{GridStore, SheetsManager};
use crate::utils::errors::SyncError;
use serde::Serialize;
use tracing::{debug, info, warn};

/// Result of a completed pass: which sheets were processed, in order.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SyncSummary {
    pub message: String,
    pub updated_sheets: Vec<String>,
}

pub struct SyncPass {
    layout: GridLayout,
    dry_run: bool,
}

impl SyncPass {
    pub fn new(layout: GridLayout, dry_run: bool) -> Self {
        Self { layout, dry_run }
    }

    /// Runs the pass over an already-fetched record set.
    pub async fn run<G: GridStore>(
        &self,
        store: &G,
        records: Vec<MetricRecord>,
    ) -> Result<SyncSummary, SyncError> {
        let groups = route_records(records, |record| {
            sheet_for_object(&record.object_name).to_string()
        });

        if groups.is_empty() {
            warn!("⚠️  No metric records to synchronize");
            return Ok(SyncSummary {
                message: "No metric records to synchronize".to_string(),
                updated_sheets: Vec::new(),
            });
        }

        let mut updated_sheets = Vec::new();

        for (sheet, group) in groups {
            info!("📊 Processing sheet '{}' ({} records)", sheet, group.len());

            let rectangle = store.read_rectangle(&sheet, &self.layout).await?;
            let (year_row, type_row, data_rows) = self.layout.split_rectangle(&rectangle);

            let periods = build_period_index(year_row, type_row, &self.layout);
            let rows = build_row_index(data_rows, &self.layout);
            debug!(
                "🗂️  [{}] Indexed {} periods and {} object rows",
                sheet,
                periods.len(),
                rows.len()
            );

            let updates = plan_updates(&sheet, &group, &periods, &rows);
            info!(
                "📝 [{}] Planned {} cell updates from {} records",
                sheet,
                updates.len(),
                group.len()
            );

            if self.dry_run {
                for update in &updates {
                    info!("🔍 [DRY RUN] Would write {} = {}", update.range, update.value);
                }
            } else {
                store.write_batch(&sheet, &updates).await?;
            }

            updated_sheets.push(sheet);
        }

        let message = if self.dry_run {
            "Dry run completed - no cells were written".to_string()
        } else {
            "Data successfully written to Google Sheet".to_string()
        };

        Ok(SyncSummary {
            message,
            updated_sheets,
        })
    }
}

/// The synchronization entry point.
///
/// Validates configuration, fetches the record set (fatal on failure, no
/// sheet is touched), then runs the pass against the live grid store.
pub async fn synchronize(config: &Config) -> Result<SyncSummary, SyncError> {
    config.validate()?;

    let client = MetricsClient::new(config.api_url.clone());
    let records = client.fetch_records().await?;

    let store = SheetsManager::connect(&config.spreadsheet_id, &config.key_file).await?;
    let pass = SyncPass::new(GridLayout::default(), config.dry_run);

    pass.run(&store, records).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::CellUpdate;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// In-memory grid store recording every batch it receives.
    struct FakeGrid {
        rectangles: HashMap<String, Vec<Vec<String>>>,
        fail_write_for: Option<String>,
        writes: Mutex<Vec<(String, Vec<CellUpdate>)>>,
    }

    impl FakeGrid {
        fn new(rectangles: HashMap<String, Vec<Vec<String>>>) -> Self {
            Self {
                rectangles,
                fail_write_for: None,
                writes: Mutex::new(Vec::new()),
            }
        }

        fn failing_on(mut self, sheet: &str) -> Self {
            self.fail_write_for = Some(sheet.to_string());
            self
        }

        fn written_sheets(&self) -> Vec<String> {
            self.writes
                .lock()
                .unwrap()
                .iter()
                .map(|(sheet, _)| sheet.clone())
                .collect()
        }
    }

    impl GridStore for FakeGrid {
        async fn read_rectangle(
            &self,
            sheet: &str,
            _layout: &GridLayout,
        ) -> Result<Vec<Vec<String>>, SyncError> {
            Ok(self.rectangles.get(sheet).cloned().unwrap_or_default())
        }

        async fn write_batch(
            &self,
            sheet: &str,
            updates: &[CellUpdate],
        ) -> Result<(), SyncError> {
            if self.fail_write_for.as_deref() == Some(sheet) {
                return Err(SyncError::GridWrite {
                    sheet: sheet.to_string(),
                    reason: "injected failure".to_string(),
                });
            }

            if !updates.is_empty() {
                self.writes
                    .lock()
                    .unwrap()
                    .push((sheet.to_string(), updates.to_vec()));
            }
            Ok(())
        }
    }

    fn rectangle(objects: &[&str]) -> Vec<Vec<String>> {
        let to_row = |cells: &[&str]| cells.iter().map(|c| c.to_string()).collect::<Vec<_>>();
        let mut rows = vec![
            to_row(&["", "", "янв.2024", "", "февр.2024", ""]),
            to_row(&["", "", "п", "ф", "п", "ф"]),
        ];
        for object in objects {
            rows.push(to_row(&[object]));
        }
        rows
    }

    fn record(object_name: &str, year: i32, month: u32, plan: f64, fact: f64) -> MetricRecord {
        MetricRecord {
            object_name: object_name.to_string(),
            year,
            month,
            plan,
            fact,
        }
    }

    #[tokio::test]
    async fn end_to_end_plan_and_fact_land_in_exact_cells() {
        let store = FakeGrid::new(HashMap::from([("ВА".to_string(), rectangle(&["Alpha", "", "Beta"]))]));
        let pass = SyncPass::new(GridLayout::default(), false);

        let summary = pass
            .run(&store, vec![record("Alpha", 2024, 1, 100.0, 90.0)])
            .await
            .unwrap();

        assert_eq!(summary.updated_sheets, vec!["ВА".to_string()]);

        let writes = store.writes.lock().unwrap();
        assert_eq!(writes.len(), 1);
        assert_eq!(
            writes[0].1,
            vec![
                CellUpdate {
                    range: "ВА!D8".to_string(),
                    value: 100.0
                },
                CellUpdate {
                    range: "ВА!E8".to_string(),
                    value: 90.0
                },
            ]
        );
    }

    #[tokio::test]
    async fn groups_flush_sequentially_in_router_order() {
        let store = FakeGrid::new(HashMap::from([
            ("ВА".to_string(), rectangle(&["ВА-1"])),
            ("Б".to_string(), rectangle(&["Б-1"])),
        ]));
        let pass = SyncPass::new(GridLayout::default(), false);

        let summary = pass
            .run(
                &store,
                vec![
                    record("ВА-1", 2024, 1, 10.0, 11.0),
                    record("Б-1", 2024, 2, 20.0, 21.0),
                ],
            )
            .await
            .unwrap();

        assert_eq!(summary.updated_sheets, vec!["ВА".to_string(), "Б".to_string()]);
        assert_eq!(store.written_sheets(), vec!["ВА".to_string(), "Б".to_string()]);
    }

    #[tokio::test]
    async fn failed_flush_aborts_later_groups_but_keeps_earlier_ones() {
        let store = FakeGrid::new(HashMap::from([
            ("ВА".to_string(), rectangle(&["ВА-1"])),
            ("Б".to_string(), rectangle(&["Б-1"])),
        ]))
        .failing_on("Б");
        let pass = SyncPass::new(GridLayout::default(), false);

        let result = pass
            .run(
                &store,
                vec![
                    record("ВА-1", 2024, 1, 10.0, 11.0),
                    record("Б-1", 2024, 2, 20.0, 21.0),
                ],
            )
            .await;

        // The first group stays applied, the second is reported failed.
        assert_eq!(store.written_sheets(), vec!["ВА".to_string()]);
        match result {
            Err(SyncError::GridWrite { sheet, .. }) => assert_eq!(sheet, "Б"),
            other => panic!("expected GridWrite error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn resolution_misses_leave_sheet_untouched_without_error() {
        let store = FakeGrid::new(HashMap::from([("ВА".to_string(), rectangle(&["Alpha"]))]));
        let pass = SyncPass::new(GridLayout::default(), false);

        // Period unknown for one record, object unknown for the other.
        let summary = pass
            .run(
                &store,
                vec![
                    record("Alpha", 2023, 7, 1.0, 2.0),
                    record("Gamma", 2024, 1, 3.0, 4.0),
                ],
            )
            .await
            .unwrap();

        assert_eq!(summary.updated_sheets, vec!["ВА".to_string()]);
        assert!(store.writes.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn dry_run_plans_but_never_writes() {
        let store = FakeGrid::new(HashMap::from([("ВА".to_string(), rectangle(&["Alpha"]))]));
        let pass = SyncPass::new(GridLayout::default(), true);

        let summary = pass
            .run(&store, vec![record("Alpha", 2024, 1, 100.0, 90.0)])
            .await
            .unwrap();

        assert!(summary.message.contains("Dry run"));
        assert!(store.writes.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn empty_record_set_performs_no_reads_or_writes() {
        let store = FakeGrid::new(HashMap::new());
        let pass = SyncPass::new(GridLayout::default(), false);

        let summary = pass.run(&store, Vec::new()).await.unwrap();

        assert!(summary.updated_sheets.is_empty());
        assert!(store.writes.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn empty_rectangle_skips_every_record() {
        // Sheet exists but the rectangle comes back unpopulated.
        let store = FakeGrid::new(HashMap::new());
        let pass = SyncPass::new(GridLayout::default(), false);

        let summary = pass
            .run(&store, vec![record("Alpha", 2024, 1, 100.0, 90.0)])
            .await
            .unwrap();

        assert_eq!(summary.updated_sheets, vec!["ВА".to_string()]);
        assert!(store.writes.lock().unwrap().is_empty());
    }

    #[test]
    fn summary_serializes_with_camel_case_fields() {
        let summary = SyncSummary {
            message: "Data successfully written to Google Sheet".to_string(),
            updated_sheets: vec!["ВА".to_string(), "Б".to_string()],
        };

        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["updatedSheets"][0], "ВА");
        assert!(json["message"].as_str().unwrap().contains("successfully"));
    }
}
