//! Identifier corrector.
//!
//! Two fixed-point passes over records whose only boundary signal is an
//! identifier change. Both keep an explicit worklist of candidate rows that
//! is rebuilt from freshly classified signals after every relabeling.

use std::collections::BTreeSet;
use std::ops::Range;

use rwl_model::{AnomalyLog, ErrorCode, Record, YearField};

use crate::boundary::{BoundarySignals, classify};

/// Relabeling plan for one shift repair.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ShiftWindow {
    /// Rows from the backward run start up to the forward run end.
    span: Range<usize>,
    /// First row carrying the forward identifier.
    split: usize,
}

/// Rows whose only fired signal is an identifier change.
fn identifier_only_rows(signals: &[BoundarySignals]) -> BTreeSet<usize> {
    signals
        .iter()
        .enumerate()
        .filter(|(_, signal)| signal.identifier_only())
        .map(|(idx, _)| idx)
        .collect()
}

/// Locate the split behind an identifier-only change at `row`.
///
/// The window runs from the nearest confirmed start before `row` that shares
/// the previous record's identifier up to the next confirmed start after it.
/// It applies only when exactly one data boundary lies inside.
fn shift_window(
    records: &[Record],
    signals: &[BoundarySignals],
    year_field: YearField,
    row: usize,
) -> Option<ShiftWindow> {
    let previous = &records[row.checked_sub(1)?];
    let start = (0..row)
        .rev()
        .find(|&idx| signals[idx].is_confirmed() && records[idx].same_identifier(previous, year_field))?;
    let end = (row + 1..records.len())
        .find(|&idx| signals[idx].is_confirmed())
        .unwrap_or(records.len());
    let mut boundaries = (start + 1..end).filter(|&idx| signals[idx].is_data_boundary());
    let split = boundaries.next()?;
    if boundaries.next().is_some() {
        return None;
    }
    let backward = &records[start];
    let forward = &records[end - 1];
    if backward.same_identifier(forward, year_field) {
        return None;
    }
    let unchanged = (start..split).all(|idx| records[idx].same_identifier(backward, year_field))
        && (split..end).all(|idx| records[idx].same_identifier(forward, year_field));
    if unchanged {
        return None;
    }
    Some(ShiftWindow {
        span: start..end,
        split,
    })
}

fn relabel(records: &mut [Record], window: &ShiftWindow, year_field: YearField) {
    let backward = records[window.span.start].clone();
    let forward = records[window.span.end - 1].clone();
    for idx in window.span.clone() {
        let source = if idx < window.split {
            &backward
        } else {
            &forward
        };
        records[idx].copy_identifier_from(source, year_field);
    }
}

/// Repair identifiers shifted across a true series boundary (2.1).
///
/// Candidates the window search cannot resolve are set aside until another
/// repair changes the record state.
pub fn repair_shifted(records: &mut [Record], year_field: YearField, log: &mut AnomalyLog) {
    let mut signals = classify(records, year_field);
    let mut unresolved = BTreeSet::new();
    let mut worklist = identifier_only_rows(&signals);
    while let Some(row) = worklist.pop_first() {
        if unresolved.contains(&row) || !signals[row].identifier_only() {
            continue;
        }
        let Some(window) = shift_window(records, &signals, year_field, row) else {
            unresolved.insert(row);
            continue;
        };
        tracing::debug!(
            from = records[window.span.start].line,
            to = records[window.span.end - 1].line,
            split = records[window.split].line,
            "repairing shifted identifiers"
        );
        relabel(records, &window, year_field);
        for record in &records[window.span.clone()] {
            log.push(ErrorCode::ShiftedIdentifier, record.line);
        }
        signals = classify(records, year_field);
        unresolved.clear();
        worklist = identifier_only_rows(&signals);
    }
}

/// Overwrite single mistyped identifiers with their predecessor's (2.2).
pub fn repair_mistyped(records: &mut [Record], year_field: YearField, log: &mut AnomalyLog) {
    let mut signals = classify(records, year_field);
    let mut worklist = identifier_only_rows(&signals);
    while let Some(row) = worklist.pop_first() {
        if !signals[row].identifier_only() {
            continue;
        }
        let (head, tail) = records.split_at_mut(row);
        let (Some(previous), Some(record)) = (head.last(), tail.first_mut()) else {
            continue;
        };
        record.copy_identifier_from(previous, year_field);
        log.push(ErrorCode::MistypedIdentifier, record.line);
        signals = classify(records, year_field);
        worklist = identifier_only_rows(&signals);
    }
}

/// Run both identifier passes and return the refreshed signals.
pub fn repair_identifiers(
    records: &mut [Record],
    year_field: YearField,
    log: &mut AnomalyLog,
) -> Vec<BoundarySignals> {
    repair_shifted(records, year_field, log);
    repair_mistyped(records, year_field, log);
    classify(records, year_field)
}
