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

use crate::grid::layout::GridLayout;
use std::collections::HashMap;

/// Builds the lookup from trimmed object name to absolute 1-based row.
///
/// `data_rows` are the rectangle's rows below the two header bands; the
/// first one maps to the layout's first data row. Rows with a blank or
/// missing name cell still occupy a row number but get no entry.
/// Duplicate names resolve last-write-wins, the same explicit policy as
/// duplicate header columns in [`crate::grid::header`].
pub fn build_row_index(data_rows: &[Vec<String>], layout: &GridLayout) -> HashMap<String, u32> {
    let mut index = HashMap::new();

    for (i, row) in data_rows.iter().enumerate() {
        let name = row.first().map(|cell| cell.trim()).unwrap_or("");
        if name.is_empty() {
            continue;
        }

        index.insert(name.to_string(), layout.first_data_row() + i as u32);
    }

    index
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data_rows(names: &[&str]) -> Vec<Vec<String>> {
        names.iter().map(|name| vec![name.to_string()]).collect()
    }

    #[test]
    fn blank_names_are_skipped_but_still_count_rows() {
        let rows = data_rows(&["Alpha", "", "Beta"]);
        let index = build_row_index(&rows, &GridLayout::default());

        assert_eq!(index.len(), 2);
        assert_eq!(index.get("Alpha"), Some(&8));
        assert_eq!(index.get("Beta"), Some(&10));
    }

    #[test]
    fn names_are_trimmed() {
        let rows = data_rows(&["  ВА-Котельная №3  "]);
        let index = build_row_index(&rows, &GridLayout::default());

        assert_eq!(index.get("ВА-Котельная №3"), Some(&8));
    }

    #[test]
    fn missing_first_cell_is_skipped() {
        let rows = vec![Vec::new(), vec!["Alpha".to_string()]];
        let index = build_row_index(&rows, &GridLayout::default());

        assert_eq!(index.len(), 1);
        assert_eq!(index.get("Alpha"), Some(&9));
    }

    #[test]
    fn duplicate_names_last_write_wins() {
        let rows = data_rows(&["Alpha", "Alpha"]);
        let index = build_row_index(&rows, &GridLayout::default());

        assert_eq!(index.get("Alpha"), Some(&9));
    }

    #[test]
    fn empty_data_block_yields_empty_index() {
        let index = build_row_index(&[], &GridLayout::default());
        assert!(index.is_empty());
    }
}
