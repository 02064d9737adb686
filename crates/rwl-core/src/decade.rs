//! Decade row parser.
//!
//! Each core is read row by row through a `CoreCursor`, which knows
//! whether the current row opens the core, continues it, or closes it:
//!
//! - the first row fixes the start year from the count of real values;
//! - interior rows always carry exactly ten years;
//! - the last row gives up its terminal marker and any trailing fill.

use rwl_model::{
    AnomalyLog, ErrorCode, FieldLayout, Record, SENTINEL_FILL, SLOTS_PER_ROW, STOP_MARKER,
    STOP_MARKER_FINE, numeric_tokens,
};

use crate::segment::CoreSpan;

/// One core's series as read from its decade rows.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedCore {
    pub id: String,
    pub first_year: i32,
    /// Values from `first_year` on; `None` for an encoded gap.
    pub values: Vec<Option<f64>>,
    /// Original line numbers of the core's records.
    pub lines: Vec<usize>,
}

impl ParsedCore {
    pub fn first_line(&self) -> usize {
        self.lines.first().copied().unwrap_or_default()
    }

    /// Last covered year, `None` when the core holds no values.
    pub fn last_year(&self) -> Option<i32> {
        let len = i32::try_from(self.values.len()).ok()?;
        (len > 0).then(|| self.first_year + len - 1)
    }
}

/// Where a row sits inside its core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RowPosition {
    Only,
    First,
    Interior,
    Last,
}

impl RowPosition {
    fn of(index: usize, count: usize) -> Self {
        match (index == 0, index + 1 == count) {
            (true, true) => Self::Only,
            (true, false) => Self::First,
            (false, false) => Self::Interior,
            (false, true) => Self::Last,
        }
    }

    fn opens(self) -> bool {
        matches!(self, Self::Only | Self::First)
    }

    fn closes(self) -> bool {
        matches!(self, Self::Only | Self::Last)
    }
}

/// Raw values of one row.
#[derive(Debug, Default, PartialEq)]
struct RowValues {
    values: Vec<Option<f64>>,
    /// A blank slot or unreadable token was turned into a missing value.
    gapped: bool,
}

impl RowValues {
    fn push_tokens(&mut self, text: &str) {
        for token in numeric_tokens(text) {
            let value = token.parse::<f64>().ok();
            self.gapped |= value.is_none();
            self.values.push(value);
        }
    }
}

fn is_blank(slot: &[char]) -> bool {
    slot.iter().all(|ch| *ch == ' ')
}

/// Split a row into values.
///
/// Blank slots before the last filled column are gaps. With `rotate`, blank
/// slots ahead of the data are moved behind it instead, so right-aligned
/// partial decades read like left-aligned ones.
fn read_row(record: &Record, layout: &FieldLayout, rotate: bool) -> RowValues {
    let region = record.numeric_region();
    let mut row = RowValues::default();
    let Some(last_filled) = region.iter().rposition(|ch| *ch != ' ') else {
        return row;
    };
    let used = &region[..=last_filled];
    let mut slots: Vec<&[char]> = used.chunks(layout.slot_stride()).collect();
    if !slots.iter().any(|slot| is_blank(slot)) {
        let text: String = used.iter().collect();
        row.push_tokens(&text);
        return row;
    }
    if rotate {
        let leading = slots.iter().take_while(|slot| is_blank(slot)).count();
        slots.drain(..leading);
        row.gapped |= leading > 0;
    }
    for slot in slots {
        if is_blank(slot) {
            row.values.push(None);
            row.gapped = true;
        } else {
            let text: String = slot.iter().collect();
            row.push_tokens(&text);
        }
    }
    row
}

fn is_fill(value: Option<f64>) -> bool {
    value == Some(SENTINEL_FILL)
}

/// Drop a leading run of fill values; returns how many were dropped.
fn trim_leading_fill(values: &mut Vec<Option<f64>>) -> usize {
    let fill = values.iter().take_while(|value| is_fill(**value)).count();
    values.drain(..fill);
    fill
}

fn trim_trailing_fill(values: &mut Vec<Option<f64>>) -> bool {
    let before = values.len();
    while values.last().is_some_and(|value| is_fill(*value)) {
        values.pop();
    }
    values.len() < before
}

/// Remove a terminal marker closing the row; false when there is none.
fn take_stop_marker(values: &mut Vec<Option<f64>>) -> bool {
    match values.last() {
        Some(Some(value)) if *value == STOP_MARKER || *value == STOP_MARKER_FINE => {
            values.pop();
            true
        }
        _ => false,
    }
}

const SLOTS: i32 = SLOTS_PER_ROW as i32;

fn count(values: &[Option<f64>]) -> i32 {
    i32::try_from(values.len()).unwrap_or(i32::MAX)
}

/// Running state while walking one core's rows.
#[derive(Debug)]
struct CoreCursor<'a> {
    layout: &'a FieldLayout,
    id: String,
    first_year: Option<i32>,
    values: Vec<Option<f64>>,
    lines: Vec<usize>,
}

impl<'a> CoreCursor<'a> {
    fn new(id: impl Into<String>, layout: &'a FieldLayout) -> Self {
        Self {
            layout,
            id: id.into(),
            first_year: None,
            values: Vec::new(),
            lines: Vec::new(),
        }
    }

    fn consume(
        &mut self,
        record: &Record,
        position: RowPosition,
        file_start: bool,
        log: &mut AnomalyLog,
    ) {
        let line = record.line;
        let Some(year) = record.year(self.layout.year_field) else {
            return;
        };
        self.lines.push(line);
        let offset = year.rem_euclid(10);
        let anchor = year - offset;

        let rotate = position.opens() && !file_start && offset > 0;
        let RowValues { mut values, gapped } = read_row(record, self.layout, rotate);
        if gapped {
            log.push(ErrorCode::MissingGap, line);
        }

        let mut fill = 0;
        if position.opens() {
            fill = trim_leading_fill(&mut values);
            if fill > 0 {
                log.push(ErrorCode::SentinelFill, line);
            }
        }
        if position.closes() {
            if !take_stop_marker(&mut values) {
                log.push(ErrorCode::MissingStopMarker, line);
            }
            if trim_trailing_fill(&mut values) {
                log.push(ErrorCode::SentinelFill, line);
            }
        }
        if position == RowPosition::Interior && values.len() != SLOTS_PER_ROW {
            values.resize(SLOTS_PER_ROW, None);
            log.push(ErrorCode::MissingGap, line);
        }

        let parsed = count(&values);
        // Leading fill stands in for the years before the first measurement.
        let declared = match i32::try_from(fill) {
            Ok(fill) if fill > 0 => anchor + fill,
            _ => year,
        };
        match position {
            RowPosition::Only => self.first_year = Some(declared),
            RowPosition::First => {
                let start = anchor + SLOTS - parsed;
                if start != declared {
                    tracing::debug!(line, declared, implied = start, "start year mismatch");
                    log.push(ErrorCode::YearLengthMismatch, line);
                }
                self.first_year = Some(start);
            }
            RowPosition::Interior => {}
            RowPosition::Last => {
                let start = self.first_year.unwrap_or(anchor);
                let end = start + count(&self.values) + parsed - 1;
                let implied_end = anchor + parsed - 1;
                if end != implied_end {
                    tracing::debug!(line, end, implied_end, "end year mismatch");
                    log.push(ErrorCode::YearLengthMismatch, line);
                }
            }
        }
        self.values.extend(values);
    }

    fn finish(self) -> ParsedCore {
        ParsedCore {
            id: self.id,
            first_year: self.first_year.unwrap_or_default(),
            values: self.values,
            lines: self.lines,
        }
    }
}

/// Parse the rows of one core.
pub fn parse_core(
    records: &[Record],
    span: &CoreSpan,
    layout: &FieldLayout,
    log: &mut AnomalyLog,
) -> ParsedCore {
    let rows = &records[span.rows.clone()];
    let file_start = span.rows.start == 0;
    let mut cursor = CoreCursor::new(span.id.clone(), layout);
    for (index, record) in rows.iter().enumerate() {
        cursor.consume(record, RowPosition::of(index, rows.len()), file_start, log);
    }
    let core = cursor.finish();
    tracing::debug!(
        id = %core.id,
        first_year = core.first_year,
        years = core.values.len(),
        "parsed core"
    );
    core
}

/// Parse every core in file order.
pub fn parse_cores(
    records: &[Record],
    spans: &[CoreSpan],
    layout: &FieldLayout,
    log: &mut AnomalyLog,
) -> Vec<ParsedCore> {
    spans
        .iter()
        .map(|span| parse_core(records, span, layout, log))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn core(lines: &[&str], layout: &FieldLayout) -> (ParsedCore, AnomalyLog) {
        let rows: Vec<Record> = lines
            .iter()
            .enumerate()
            .map(|(idx, line)| Record::new(idx + 1, line))
            .collect();
        let span = CoreSpan {
            id: "ABC01".to_string(),
            rows: 0..rows.len(),
        };
        let mut log = AnomalyLog::new();
        let parsed = parse_core(&rows, &span, layout, &mut log);
        (parsed, log)
    }

    fn present(values: &[Option<f64>]) -> Vec<f64> {
        values.iter().flatten().copied().collect()
    }

    #[test]
    fn partial_first_decade_sets_start_year() {
        let (parsed, log) = core(
            &[
                "ABC01   1957    10    11    12",
                "ABC01   1960    20    21   999",
            ],
            &FieldLayout::default(),
        );
        assert_eq!(parsed.first_year, 1957);
        assert_eq!(parsed.last_year(), Some(1961));
        assert_eq!(present(&parsed.values), vec![10.0, 11.0, 12.0, 20.0, 21.0]);
        assert_eq!(parsed.lines, vec![1, 2]);
        assert!(log.is_empty());
    }

    #[test]
    fn missing_stop_marker_is_advisory() {
        let (parsed, log) = core(&["ABC01   1950    10    11"], &FieldLayout::default());
        assert_eq!(parsed.values.len(), 2);
        assert_eq!(log.render(), "5@1");
    }

    #[test]
    fn blank_slot_becomes_missing() {
        let (parsed, log) = core(
            &[
                "ABC01   1950    10          12    13    14    15    16    17    18    19",
                "ABC01   1960    20   999",
            ],
            &FieldLayout::default(),
        );
        assert_eq!(parsed.values[1], None);
        assert_eq!(parsed.values.len(), 11);
        assert_eq!(log.render(), "7.1@1");
    }

    #[test]
    fn fill_values_are_trimmed_at_both_ends() {
        let (parsed, log) = core(
            &[
                "ABC01   1950  9990  9990  9990    13    14    15    16    17    18    19",
                "ABC01   1960    20  9990  9990   999",
            ],
            &FieldLayout::default(),
        );
        assert_eq!(parsed.first_year, 1953);
        assert_eq!(parsed.last_year(), Some(1960));
        assert_eq!(log.render(), "7.2@1 7.2@2");
    }

    #[test]
    fn padded_layout_reads_wide_fields() {
        let layout = FieldLayout {
            field_width: 7,
            padding: 4,
            ..FieldLayout::default()
        };
        let (parsed, log) = core(&["ABC01   1950    1234567       12     999"], &layout);
        assert_eq!(present(&parsed.values), vec![1_234_567.0, 12.0]);
        assert!(log.is_empty());
    }

    #[test]
    fn right_aligned_first_row_is_rotated() {
        let shifted = format!("ABC01   1957{}{:>6}{:>6}{:>6}", " ".repeat(42), 10, 11, 12);
        let rows: Vec<Record> = [
            "XYZ01   1950    10   999",
            shifted.as_str(),
            "ABC01   1960    20   999",
        ]
        .iter()
        .enumerate()
        .map(|(idx, line)| Record::new(idx + 1, line))
        .collect();
        let span = CoreSpan {
            id: "ABC01".to_string(),
            rows: 1..3,
        };
        let mut log = AnomalyLog::new();
        let parsed = parse_core(&rows, &span, &FieldLayout::default(), &mut log);
        assert_eq!(parsed.first_year, 1957);
        assert_eq!(present(&parsed.values), vec![10.0, 11.0, 12.0, 20.0]);
        assert_eq!(log.render(), "7.1@2");
    }
}
