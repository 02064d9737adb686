//! Boundary classification.
//!
//! Three independent signals per record decide where one core ends and the
//! next begins. The classifier is a plain function over the current record
//! state; callers re-run it after every identifier or year rewrite.

use rwl_model::{Record, YearField};

/// Boundary signals of one record relative to its predecessor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BoundarySignals {
    /// Identifier differs (case-insensitively) from the previous record.
    pub id_changed: bool,
    /// Decade is not exactly one past the previous record's decade.
    pub decade_break: bool,
    /// Previous record ends with a terminal marker.
    pub after_stop: bool,
}

impl BoundarySignals {
    /// Signals of the first record: a boundary on all three.
    pub const FIRST: Self = Self {
        id_changed: true,
        decade_break: true,
        after_stop: true,
    };

    /// Any signal fired: the record starts a core.
    pub fn starts_core(self) -> bool {
        self.id_changed || self.decade_break || self.after_stop
    }

    /// All three signals agree.
    pub fn is_confirmed(self) -> bool {
        self.id_changed && self.decade_break && self.after_stop
    }

    /// The data itself says a new series starts here.
    pub fn is_data_boundary(self) -> bool {
        self.decade_break && self.after_stop
    }

    /// Only the identifier changed: a likely transcription error.
    pub fn identifier_only(self) -> bool {
        self.id_changed && !self.decade_break && !self.after_stop
    }

    /// Identifier and terminal marker are quiet.
    pub fn continues_core(self) -> bool {
        !self.id_changed && !self.after_stop
    }
}

/// Classify every record against its predecessor.
pub fn classify(records: &[Record], year_field: YearField) -> Vec<BoundarySignals> {
    let mut signals = Vec::with_capacity(records.len());
    for (idx, record) in records.iter().enumerate() {
        let Some(previous) = idx.checked_sub(1).map(|prev| &records[prev]) else {
            signals.push(BoundarySignals::FIRST);
            continue;
        };
        let decade_break = match (previous.decade(year_field), record.decade(year_field)) {
            (Some(before), Some(own)) => own != before + 1,
            _ => true,
        };
        signals.push(BoundarySignals {
            id_changed: !record.same_identifier(previous, year_field),
            decade_break,
            after_stop: previous.ends_with_terminal_marker(),
        });
    }
    signals
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records(lines: &[&str]) -> Vec<Record> {
        lines
            .iter()
            .enumerate()
            .map(|(idx, line)| Record::new(idx + 1, line))
            .collect()
    }

    #[test]
    fn first_record_fires_everything() {
        let signals = classify(&records(&["ABC01   1953   100"]), YearField::Narrow);
        assert_eq!(signals, vec![BoundarySignals::FIRST]);
    }

    #[test]
    fn continuation_rows_are_quiet() {
        let rows = records(&[
            "ABC01   1953   100   101",
            "abc01   1960   100   101",
            "ABC01   1970   100   999",
            "XYZ01   1950   100",
        ]);
        let signals = classify(&rows, YearField::Narrow);
        assert!(!signals[1].starts_core());
        assert!(!signals[2].starts_core());
        assert!(signals[3].is_confirmed());
    }

    #[test]
    fn identifier_only_change() {
        let rows = records(&["ABC01   1950   100", "ABD01   1960   100"]);
        let signals = classify(&rows, YearField::Narrow);
        assert!(signals[1].identifier_only());
        assert!(!signals[1].is_data_boundary());
    }
}
