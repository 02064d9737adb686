//! Fixed-width decadal records and the file-level column layout.
//!
//! A record is one line of a decadal file:
//!
//! ```text
//! ABC01   1951   123   145   167   189   201   223   245   267   289
//! |-id---||yr-||--------------- ten 6-character value slots ----------|
//! ```
//!
//! The identifier and year always share the first [`PREFIX_WIDTH`] columns.
//! How those twelve columns split between them is decided once per file
//! (see [`YearField`]).

use std::ops::Range;

use serde::{Deserialize, Serialize};

/// Width of the identifier + year prefix shared by every layout.
pub const PREFIX_WIDTH: usize = 12;

/// Annual value slots in one decade row.
pub const SLOTS_PER_ROW: usize = 10;

/// Standard numeric field width.
pub const FIELD_WIDTH: usize = 6;

/// Field width assumed once fused numeric fields are detected.
pub const WIDE_FIELD_WIDTH: usize = 7;

/// Blank columns spliced in front of every slot when fields are widened.
pub const PADDING_WIDTH: usize = 4;

/// Placeholder value padding partial first/last decade rows.
pub const SENTINEL_FILL: f64 = 9990.0;

/// Terminal marker used by 0.01 mm files.
pub const STOP_MARKER: f64 = 999.0;

/// Terminal marker used by 0.001 mm files.
pub const STOP_MARKER_FINE: f64 = -9999.0;

/// Split of the twelve prefix columns between identifier and year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum YearField {
    /// Identifier in columns 1-8, four-character year in columns 9-12.
    #[default]
    Narrow,
    /// Identifier in columns 1-7, signed five-character year in columns 8-12.
    Wide,
}

impl YearField {
    /// Column range of the identifier.
    pub fn id_range(self) -> Range<usize> {
        match self {
            Self::Narrow => 0..8,
            Self::Wide => 0..7,
        }
    }

    /// Column range of the year.
    pub fn year_range(self) -> Range<usize> {
        match self {
            Self::Narrow => 8..PREFIX_WIDTH,
            Self::Wide => 7..PREFIX_WIDTH,
        }
    }
}

/// File-global column layout, decided once by the column normalizer and
/// threaded through every later stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldLayout {
    pub year_field: YearField,
    /// Width of one numeric field (6, or 7 for fused files).
    pub field_width: usize,
    /// Blank columns in front of every slot (0, or [`PADDING_WIDTH`]).
    pub padding: usize,
}

impl Default for FieldLayout {
    fn default() -> Self {
        Self {
            year_field: YearField::Narrow,
            field_width: FIELD_WIDTH,
            padding: 0,
        }
    }
}

impl FieldLayout {
    /// Distance between the starts of two consecutive value slots.
    pub fn slot_stride(&self) -> usize {
        self.field_width + self.padding
    }
}

/// One line of the input file.
///
/// `line` is the 1-based line number in the original file and never changes,
/// so log entries stay faithful after records are filtered out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub line: usize,
    pub chars: Vec<char>,
}

impl Record {
    pub fn new(line: usize, text: &str) -> Self {
        Self {
            line,
            chars: text.chars().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn text(&self) -> String {
        self.chars.iter().collect()
    }

    fn slice(&self, range: Range<usize>) -> &[char] {
        let end = range.end.min(self.chars.len());
        let start = range.start.min(end);
        &self.chars[start..end]
    }

    /// Trimmed identifier text.
    pub fn identifier(&self, year_field: YearField) -> String {
        let raw: String = self.slice(year_field.id_range()).iter().collect();
        raw.trim().to_string()
    }

    /// Case-insensitive identifier comparison.
    pub fn same_identifier(&self, other: &Record, year_field: YearField) -> bool {
        self.identifier(year_field)
            .eq_ignore_ascii_case(&other.identifier(year_field))
    }

    /// Copy the identifier columns of `source` into this record.
    pub fn copy_identifier_from(&mut self, source: &Record, year_field: YearField) {
        let raw = source.slice(year_field.id_range()).to_vec();
        self.write_columns(year_field.id_range(), &raw);
    }

    pub fn year(&self, year_field: YearField) -> Option<i32> {
        let raw: String = self.slice(year_field.year_range()).iter().collect();
        raw.trim().parse().ok()
    }

    /// Rewrite the year field, right-aligned. Years that do not fit the field
    /// are left untouched.
    pub fn set_year(&mut self, year_field: YearField, year: i32) {
        let range = year_field.year_range();
        let width = range.len();
        let formatted = format!("{year:>width$}");
        if formatted.chars().count() > width {
            return;
        }
        let chars: Vec<char> = formatted.chars().collect();
        self.write_columns(range, &chars);
    }

    /// Decade index of the declared year (`floor(year / 10)`).
    pub fn decade(&self, year_field: YearField) -> Option<i32> {
        self.year(year_field).map(|year| year.div_euclid(10))
    }

    /// Columns right of the year field.
    pub fn numeric_region(&self) -> &[char] {
        self.chars.get(PREFIX_WIDTH..).unwrap_or(&[])
    }

    pub fn numeric_region_mut(&mut self) -> &mut [char] {
        self.chars.get_mut(PREFIX_WIDTH..).unwrap_or(&mut [])
    }

    pub fn numeric_text(&self) -> String {
        self.numeric_region().iter().collect()
    }

    /// True when the numeric region ends with `999` or `-9999`.
    pub fn ends_with_terminal_marker(&self) -> bool {
        let text = self.numeric_text();
        numeric_tokens(&text)
            .last()
            .is_some_and(|token| is_terminal_token(token))
    }

    fn write_columns(&mut self, range: Range<usize>, content: &[char]) {
        if self.chars.len() < range.end {
            self.chars.resize(range.end, ' ');
        }
        for (offset, slot) in self.chars[range].iter_mut().enumerate() {
            *slot = content.get(offset).copied().unwrap_or(' ');
        }
    }
}

/// Whether a token is one of the two terminal markers.
pub fn is_terminal_token(token: &str) -> bool {
    matches!(token.parse::<f64>(), Ok(value) if value == STOP_MARKER || value == STOP_MARKER_FINE)
}

/// Split a numeric region into value tokens.
///
/// Tokens are whitespace separated; a `-` inside a token starts a new token,
/// since negative values are often written flush against their neighbour
/// (`123-9999`).
pub fn numeric_tokens(text: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    for word in text.split_whitespace() {
        let mut start = 0;
        for (idx, ch) in word.char_indices() {
            if ch == '-' && idx > start {
                tokens.push(&word[start..idx]);
                start = idx;
            }
        }
        tokens.push(&word[start..]);
    }
    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn narrow_fields_split_at_column_eight() {
        let record = Record::new(1, "ABC01   1951   123");
        assert_eq!(record.identifier(YearField::Narrow), "ABC01");
        assert_eq!(record.year(YearField::Narrow), Some(1951));
        assert_eq!(record.decade(YearField::Narrow), Some(195));
        assert_eq!(record.numeric_text(), "   123");
    }

    #[test]
    fn wide_fields_host_signed_years() {
        let record = Record::new(1, "ABC01  -0155   123");
        assert_eq!(record.identifier(YearField::Wide), "ABC01");
        assert_eq!(record.year(YearField::Wide), Some(-155));
        assert_eq!(record.decade(YearField::Wide), Some(-16));
    }

    #[test]
    fn set_year_right_aligns() {
        let mut record = Record::new(1, "ABC01   1971   123");
        record.set_year(YearField::Narrow, 1941);
        assert_eq!(record.text(), "ABC01   1941   123");
    }

    #[test]
    fn copy_identifier_pads_and_truncates() {
        let source = Record::new(1, "LONGID01195012");
        let mut target = Record::new(2, "X       1960   123");
        target.copy_identifier_from(&source, YearField::Narrow);
        assert_eq!(target.identifier(YearField::Narrow), "LONGID01");
        assert_eq!(target.year(YearField::Narrow), Some(1960));
    }

    #[test]
    fn terminal_marker_detection() {
        assert!(Record::new(1, "ABC01   1990   123   999").ends_with_terminal_marker());
        assert!(Record::new(1, "ABC01   1990   123-9999").ends_with_terminal_marker());
        assert!(!Record::new(1, "ABC01   1990   123  1999").ends_with_terminal_marker());
        assert!(!Record::new(1, "ABC01   1990").ends_with_terminal_marker());
    }

    #[test]
    fn tokens_split_fused_negatives() {
        assert_eq!(numeric_tokens(" 12-34  -5 6"), vec!["12", "-34", "-5", "6"]);
    }
}
