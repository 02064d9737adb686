//! Segmented-core merger.
//!
//! A core interrupted by a gap in the file shows up as several consecutive
//! columns with one label. They merge only when no year is covered twice.

use rwl_model::{AnomalyLog, ErrorCode, MISSING, is_missing};

use crate::assemble::{CoreColumn, CoreTable};

/// Years covered by at least this many fragments make a group ambiguous.
const OVERLAP_LIMIT: usize = 2;

fn overlaps(group: &[CoreColumn], row: usize) -> bool {
    group
        .iter()
        .filter(|column| column.values.get(row).is_some_and(|value| !is_missing(*value)))
        .count()
        >= OVERLAP_LIMIT
}

/// Missing-aware mean of one row across the group.
fn combine(group: &[CoreColumn], row: usize) -> f64 {
    let present: Vec<f64> = group
        .iter()
        .filter_map(|column| column.values.get(row).copied())
        .filter(|value| !is_missing(*value))
        .collect();
    if present.is_empty() {
        MISSING
    } else {
        present.iter().sum::<f64>() / present.len() as f64
    }
}

fn merge_group(group: Vec<CoreColumn>, rows: usize, log: &mut AnomalyLog) -> Vec<CoreColumn> {
    if group.len() < 2 || (0..rows).any(|row| overlaps(&group, row)) {
        return group;
    }
    tracing::debug!(id = %group[0].id, fragments = group.len(), "merging segmented core");
    for fragment in &group {
        log.push(ErrorCode::SegmentedCore, fragment.first_line());
    }
    let values = (0..rows).map(|row| combine(&group, row)).collect();
    let lines = group
        .iter()
        .flat_map(|fragment| fragment.lines.iter().copied())
        .collect();
    let id = group[0].id.clone();
    vec![CoreColumn { id, lines, values }]
}

/// Merge runs of same-label columns whose year spans do not overlap (8).
pub fn merge_segments(table: &mut CoreTable, log: &mut AnomalyLog) {
    let rows = table.years.len();
    let columns = std::mem::take(&mut table.columns);
    let mut merged = Vec::with_capacity(columns.len());
    let mut group: Vec<CoreColumn> = Vec::new();
    for column in columns {
        if group.last().is_some_and(|last| !last.same_label(&column)) {
            merged.extend(merge_group(std::mem::take(&mut group), rows, log));
        }
        group.push(column);
    }
    merged.extend(merge_group(group, rows, log));
    table.columns = merged;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn column(id: &str, line: usize, values: &[f64]) -> CoreColumn {
        CoreColumn {
            id: id.to_string(),
            lines: vec![line],
            values: values.to_vec(),
        }
    }

    #[test]
    fn disjoint_fragments_become_one_column() {
        let mut table = CoreTable {
            years: vec![2000, 2001, 2002],
            columns: vec![
                column("A", 1, &[1.0, MISSING, MISSING]),
                column("a", 4, &[MISSING, MISSING, 3.0]),
                column("B", 7, &[5.0, 5.0, 5.0]),
            ],
        };
        let mut log = AnomalyLog::new();
        merge_segments(&mut table, &mut log);
        assert_eq!(table.columns.len(), 2);
        assert_eq!(table.columns[0].id, "A");
        assert_eq!(table.columns[0].lines, vec![1, 4]);
        assert_eq!(table.columns[0].values[0], 1.0);
        assert!(is_missing(table.columns[0].values[1]));
        assert_eq!(table.columns[0].values[2], 3.0);
        assert_eq!(log.render(), "8@1 8@4");
    }

    #[test]
    fn overlapping_fragments_stay_apart() {
        let mut table = CoreTable {
            years: vec![2000, 2001],
            columns: vec![column("A", 1, &[1.0, 2.0]), column("A", 3, &[MISSING, 2.0])],
        };
        let mut log = AnomalyLog::new();
        merge_segments(&mut table, &mut log);
        assert_eq!(table.columns.len(), 2);
        assert!(log.is_empty());
    }
}
