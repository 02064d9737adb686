//! Line filter: drops records that cannot hold decade data.
//!
//! Dropped records keep their original line number in the log; surviving
//! records are never renumbered.

use rwl_model::{AnomalyLog, ErrorCode, PREFIX_WIDTH, Record};

/// Number of lines in a file header.
pub const HEADER_LINES: usize = 3;

/// Column holding the header line number (`1`, `2`, `3`).
const HEADER_MARKER_COL: usize = 7;

/// Whether the first three records carry the header signature: the digits
/// 1, 2, 3 in column 8, preceded by a blank.
pub fn has_header(records: &[Record]) -> bool {
    records.len() >= HEADER_LINES
        && records
            .iter()
            .take(HEADER_LINES)
            .enumerate()
            .all(|(ordinal, record)| is_header_line(record, ordinal))
}

fn is_header_line(record: &Record, ordinal: usize) -> bool {
    let expected = char::from_digit(ordinal as u32 + 1, 10);
    record.chars.get(HEADER_MARKER_COL).copied() == expected
        && record.chars.get(HEADER_MARKER_COL - 1) == Some(&' ')
}

/// Free text in the value columns: two or more letters in a row.
pub fn is_notation_line(record: &Record) -> bool {
    record
        .numeric_region()
        .windows(2)
        .any(|pair| pair.iter().all(char::is_ascii_alphabetic))
}

/// Drop headers, blank lines, short lines (3.1) and notation lines (3.2).
pub fn filter_records(records: Vec<Record>, log: &mut AnomalyLog) -> Vec<Record> {
    let header = has_header(&records);
    let total = records.len();
    let mut kept = Vec::with_capacity(total);
    for (idx, record) in records.into_iter().enumerate() {
        if header && idx < HEADER_LINES {
            continue;
        }
        if record.chars.iter().all(|ch| ch.is_whitespace()) {
            continue;
        }
        if record.len() < PREFIX_WIDTH {
            log.push(ErrorCode::ShortLine, record.line);
            continue;
        }
        if is_notation_line(&record) {
            log.push(ErrorCode::NotationLine, record.line);
            continue;
        }
        kept.push(record);
    }
    tracing::debug!(total, kept = kept.len(), header, "filtered records");
    kept
}
