//! Sentinel and duplicate resolution on the assembled table.

use std::collections::BTreeSet;

use rwl_model::{AnomalyLog, ErrorCode, MISSING, ReadOptions, STOP_MARKER, is_missing};

use crate::assemble::{CoreColumn, CoreTable};

/// Values in this open range suggest a stray 999 is real data.
const PLAUSIBLE_MARKER_RANGE: (f64, f64) = (900.0, 1100.0);

fn cells_mut(table: &mut CoreTable) -> impl Iterator<Item = &mut f64> {
    table
        .columns
        .iter_mut()
        .flat_map(|column| column.values.iter_mut())
}

/// Negative values, and zero when configured, become missing.
pub fn apply_missing_policy(table: &mut CoreTable, options: &ReadOptions) {
    for value in cells_mut(table) {
        if !is_missing(*value) && options.is_missing_value(*value) {
            *value = MISSING;
        }
    }
}

/// Residual 999 values stay only if the table holds other values of that
/// magnitude; otherwise they are leftover terminal markers.
pub fn resolve_residual_markers(table: &mut CoreTable) {
    let (low, high) = PLAUSIBLE_MARKER_RANGE;
    let plausible = table
        .columns
        .iter()
        .flat_map(|column| column.values.iter())
        .any(|value| *value > low && *value < high && *value != STOP_MARKER);
    if plausible {
        return;
    }
    let mut cleared = 0usize;
    for value in cells_mut(table) {
        if *value == STOP_MARKER {
            *value = MISSING;
            cleared += 1;
        }
    }
    if cleared > 0 {
        tracing::debug!(cleared, "treating residual 999 values as missing");
    }
}

/// Drop columns repeating an earlier column's label and values (4.1).
pub fn remove_exact_duplicates(table: &mut CoreTable, log: &mut AnomalyLog) {
    let columns = std::mem::take(&mut table.columns);
    let mut kept: Vec<CoreColumn> = Vec::with_capacity(columns.len());
    for column in columns {
        let duplicate = kept
            .iter()
            .any(|earlier| earlier.same_label(&column) && earlier.same_values(&column));
        if duplicate {
            tracing::debug!(id = %column.id, line = column.first_line(), "dropping duplicate core");
            log.push(ErrorCode::ExactDuplicate, column.first_line());
        } else {
            kept.push(column);
        }
    }
    table.columns = kept;
}

/// Flag columns sharing a label with an earlier, different column (4.2).
///
/// All-missing columns are about to be dropped and count on neither side.
pub fn flag_label_duplicates(table: &CoreTable, log: &mut AnomalyLog) {
    for (idx, column) in table.columns.iter().enumerate() {
        if column.is_all_missing() {
            continue;
        }
        if table.columns[..idx]
            .iter()
            .any(|earlier| !earlier.is_all_missing() && earlier.same_label(column))
        {
            log.push(ErrorCode::LabelDuplicate, column.first_line());
        }
    }
}

/// Drop all-missing columns along with every log entry on their lines.
pub fn drop_empty_columns(table: &mut CoreTable, log: &mut AnomalyLog) {
    let mut dropped = BTreeSet::new();
    table.columns.retain(|column| {
        let empty = column.is_all_missing();
        if empty {
            dropped.extend(column.lines.iter().copied());
        }
        !empty
    });
    if !dropped.is_empty() {
        log.retain(|entry| !dropped.contains(&entry.line));
    }
}

pub fn round_values(table: &mut CoreTable) {
    for value in cells_mut(table) {
        *value = value.round();
    }
}

/// Run every resolution step in order.
pub fn resolve(table: &mut CoreTable, options: &ReadOptions, log: &mut AnomalyLog) {
    apply_missing_policy(table, options);
    resolve_residual_markers(table);
    remove_exact_duplicates(table, log);
    flag_label_duplicates(table, log);
    drop_empty_columns(table, log);
    table.trim_missing_borders();
    if options.round {
        round_values(table);
    }
}
