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

//! Column-letter and month-name codecs.
//!
//! Column addresses are 1-based and bijective with positive integers via
//! base-26 letters with no zero digit: A=1 ... Z=26, AA=27, ZZ=702.

/// Converts a 1-based column index to its letter address (1=A, 26=Z, 27=AA).
pub fn column_to_letter(index: u32) -> String {
    debug_assert!(index >= 1, "column indices are 1-based");

    let mut letters = String::new();
    let mut n = index;

    while n > 0 {
        let rem = (n - 1) % 26;
        letters.insert(0, (b'A' + rem as u8) as char);
        n = (n - 1) / 26;
    }

    letters
}

/// Converts a column letter address back to its 1-based index.
///
/// Returns `None` for the empty string or any character outside A-Z.
pub fn letter_to_column(letters: &str) -> Option<u32> {
    if letters.is_empty() {
        return None;
    }

    let mut index: u32 = 0;
    for c in letters.chars() {
        if !c.is_ascii_uppercase() {
            return None;
        }
        index = index * 26 + (c as u32 - 'A' as u32 + 1);
    }

    Some(index)
}

/// Maps a Russian month abbreviation to its 1-12 number.
///
/// Matching is case-insensitive and exact: only the twelve abbreviations
/// used in the report headers are recognized, longer or shorter spellings
/// are not. Unrecognized tokens make the owning header column
/// unaddressable, so `None` is returned instead of a sentinel.
pub fn month_to_number(token: &str) -> Option<u32> {
    let month = match token.to_lowercase().as_str() {
        "янв" => 1,
        "февр" => 2,
        "мар" => 3,
        "апр" => 4,
        "мая" => 5,
        "июн" => 6,
        "июл" => 7,
        "авг" => 8,
        "сент" => 9,
        "окт" => 10,
        "нояб" => 11,
        "дек" => 12,
        _ => return None,
    };

    Some(month)
}
