//! Core segmentation.

use std::ops::Range;

use rwl_model::{Record, YearField};

use crate::boundary::BoundarySignals;

/// Prefix for cores whose identifier columns are blank.
pub const UNNAMED_PREFIX: &str = "UNNAMED";

/// Contiguous record range belonging to one core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreSpan {
    pub id: String,
    pub rows: Range<usize>,
}

/// Split records into cores; any boundary signal starts a new one.
pub fn segment(
    records: &[Record],
    signals: &[BoundarySignals],
    year_field: YearField,
) -> Vec<CoreSpan> {
    let starts: Vec<usize> = signals
        .iter()
        .enumerate()
        .filter(|(_, signal)| signal.starts_core())
        .map(|(idx, _)| idx)
        .collect();
    starts
        .iter()
        .enumerate()
        .map(|(ordinal, &start)| {
            let end = starts.get(ordinal + 1).copied().unwrap_or(records.len());
            let first = &records[start];
            let mut id = first.identifier(year_field);
            if id.is_empty() {
                id = format!("{UNNAMED_PREFIX}-{}", first.line);
            }
            CoreSpan {
                id,
                rows: start..end,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boundary::classify;

    #[test]
    fn spans_cover_all_records() {
        let rows: Vec<Record> = [
            "ABC01   1953   100",
            "ABC01   1960   100   999",
            "        1950   100   999",
        ]
        .iter()
        .enumerate()
        .map(|(idx, line)| Record::new(idx + 1, line))
        .collect();
        let signals = classify(&rows, YearField::Narrow);
        let spans = segment(&rows, &signals, YearField::Narrow);
        assert_eq!(
            spans,
            vec![
                CoreSpan {
                    id: "ABC01".to_string(),
                    rows: 0..2,
                },
                CoreSpan {
                    id: "UNNAMED-3".to_string(),
                    rows: 2..3,
                },
            ]
        );
    }
}
