//! Column normalizer.
//!
//! Every decision here is file-global and made by one scan over all records:
//! the year-field width, and whether fused numeric fields force the whole
//! file onto padded 7-character fields. The resulting [`FieldLayout`] is
//! handed to every later stage.

use rwl_model::{
    AnomalyLog, ErrorCode, FIELD_WIDTH, FieldLayout, PADDING_WIDTH, PREFIX_WIDTH, Record,
    SLOTS_PER_ROW, WIDE_FIELD_WIDTH, YearField,
};

use crate::splice::insert_columns;

/// Column where a sign marks a five-character signed year.
const SIGN_COL: usize = 7;

/// `Wide` when any record carries a sign in column 8 followed by a digit.
pub fn detect_year_field(records: &[Record]) -> YearField {
    let signed = records.iter().any(|record| {
        record.chars.get(SIGN_COL) == Some(&'-')
            && record
                .chars
                .get(SIGN_COL + 1)
                .is_some_and(char::is_ascii_digit)
    });
    if signed {
        YearField::Wide
    } else {
        YearField::Narrow
    }
}

fn is_legal(ch: char) -> bool {
    ch.is_ascii_digit() || matches!(ch, '.' | '-' | ' ')
}

/// Replace anything but digits, `.`, `-` and blanks in the value columns
/// (6.1, once per affected line).
pub fn sanitize_characters(records: &mut [Record], log: &mut AnomalyLog) {
    for record in records.iter_mut() {
        let mut touched = false;
        for ch in record.numeric_region_mut() {
            if !is_legal(*ch) {
                *ch = ' ';
                touched = true;
            }
        }
        if touched {
            log.push(ErrorCode::IllegalCharacter, record.line);
        }
    }
}

/// Blank out decimal points followed by a blank or ending the line (6.2).
pub fn remove_stray_decimals(records: &mut [Record], log: &mut AnomalyLog) {
    for record in records.iter_mut() {
        let region = record.numeric_region_mut();
        let mut touched = false;
        for idx in 0..region.len() {
            if region[idx] != '.' {
                continue;
            }
            let orphaned = region.get(idx + 1).is_none_or(|next| *next == ' ');
            if orphaned {
                region[idx] = ' ';
                touched = true;
            }
        }
        if touched {
            log.push(ErrorCode::StrayDecimal, record.line);
        }
    }
}

/// Longest run of non-blank characters in the value columns.
pub fn longest_filled_run(record: &Record) -> usize {
    let mut longest = 0;
    let mut current = 0;
    for ch in record.numeric_region() {
        if *ch == ' ' {
            current = 0;
        } else {
            current += 1;
            longest = longest.max(current);
        }
    }
    longest
}

/// Whether any record holds two numeric fields run together.
pub fn has_fused_fields(records: &[Record]) -> bool {
    records
        .iter()
        .any(|record| longest_filled_run(record) > FIELD_WIDTH)
}

/// Splice [`PADDING_WIDTH`] blanks in front of each 7-character slot of
/// every record.
pub fn pad_fused_fields(records: &mut [Record]) {
    let offsets: Vec<usize> = (0..SLOTS_PER_ROW)
        .map(|slot| PREFIX_WIDTH + slot * WIDE_FIELD_WIDTH)
        .collect();
    let filler = vec![' '; PADDING_WIDTH];
    let grid: Vec<Vec<char>> = records
        .iter_mut()
        .map(|record| std::mem::take(&mut record.chars))
        .collect();
    let padded = insert_columns(&grid, &offsets, &filler);
    for (record, chars) in records.iter_mut().zip(padded) {
        record.chars = chars;
    }
}

/// Drop records whose year field is not a number (3.3).
pub fn drop_unreadable_years(
    records: Vec<Record>,
    year_field: YearField,
    log: &mut AnomalyLog,
) -> Vec<Record> {
    records
        .into_iter()
        .filter(|record| {
            let readable = record.year(year_field).is_some();
            if !readable {
                log.push(ErrorCode::UnreadableYear, record.line);
            }
            readable
        })
        .collect()
}

/// Run the whole normalizer and return the records with their layout.
pub fn normalize(mut records: Vec<Record>, log: &mut AnomalyLog) -> (Vec<Record>, FieldLayout) {
    let year_field = detect_year_field(&records);
    sanitize_characters(&mut records, log);
    remove_stray_decimals(&mut records, log);
    let mut layout = FieldLayout {
        year_field,
        ..FieldLayout::default()
    };
    if has_fused_fields(&records) {
        pad_fused_fields(&mut records);
        layout.field_width = WIDE_FIELD_WIDTH;
        layout.padding = PADDING_WIDTH;
    }
    let records = drop_unreadable_years(records, year_field, log);
    tracing::info!(
        records = records.len(),
        year_field = ?layout.year_field,
        field_width = layout.field_width,
        padded = layout.padding > 0,
        "normalized columns"
    );
    (records, layout)
}
