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

use crate::grid::codec::column_to_letter;

/// Geometry of the fixed header+data rectangle read from each sheet.
///
/// The rectangle's first row is the merged year/month band, the second is
/// the plan/fact type band, and every row after that is one tracked object.
/// Indices are absolute 1-based sheet coordinates; the rectangle's first
/// column anchors the offset between rectangle indices and sheet columns.
#[derive(Debug, Clone)]
pub struct GridLayout {
    /// Absolute column of the rectangle's left edge (B = 2)
    pub first_column: u32,
    /// Absolute column of the rectangle's right edge (BB = 54)
    pub last_column: u32,
    /// Absolute row of the year/month header band
    pub year_row: u32,
    /// Absolute row of the plan/fact type band
    pub type_row: u32,
    /// Absolute row of the last data row
    pub last_data_row: u32,
}

impl Default for GridLayout {
    /// The production report layout: rectangle B6:BB10, headers in rows
    /// 6 and 7, object rows starting at row 8.
    fn default() -> Self {
        Self {
            first_column: 2,
            last_column: 54,
            year_row: 6,
            type_row: 7,
            last_data_row: 10,
        }
    }
}

impl GridLayout {
    /// Absolute row of the first data row, directly below the type band.
    pub fn first_data_row(&self) -> u32 {
        self.type_row + 1
    }

    /// The rectangle as an A1-notation range, e.g. "B6:BB10".
    pub fn range(&self) -> String {
        format!(
            "{}{}:{}{}",
            column_to_letter(self.first_column),
            self.year_row,
            column_to_letter(self.last_column),
            self.last_data_row
        )
    }

    /// Splits a fetched rectangle into (year row, type row, data rows).
    ///
    /// The grid store omits trailing unpopulated rows, so any of the three
    /// parts may come back empty.
    pub fn split_rectangle<'a>(
        &self,
        rectangle: &'a [Vec<String>],
    ) -> (&'a [String], &'a [String], &'a [Vec<String>]) {
        let year_row = rectangle.first().map(Vec::as_slice).unwrap_or(&[]);
        let type_row = rectangle.get(1).map(Vec::as_slice).unwrap_or(&[]);
        let data_rows = rectangle.get(2..).unwrap_or(&[]);

        (year_row, type_row, data_rows)
    }
}
