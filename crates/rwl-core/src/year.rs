//! Year corrector.
//!
//! Looks at isolated decade violations: a record whose decade breaks with
//! both neighbours. Patterns are checked against one snapshot of the
//! signals and the boundary classification is refreshed once afterwards.

use rwl_model::{AnomalyLog, ErrorCode, Record, YearField};

use crate::boundary::{BoundarySignals, classify};

/// Rewrite for one misdated record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct YearFix {
    code: ErrorCode,
    year: i32,
}

fn ones(year: i32) -> i32 {
    year.rem_euclid(10)
}

fn propose(
    row: usize,
    records: &[Record],
    signals: &[BoundarySignals],
    decades: &[Option<i32>],
    year_field: YearField,
) -> Option<YearFix> {
    let own = signals[row];
    let year = records[row].year(year_field)?;
    let next = signals.get(row + 1).copied();
    let before = row.checked_sub(1).and_then(|prev| decades[prev]);
    let after = decades.get(row + 1).copied().flatten();

    // Interior row off by one decade.
    if let (Some(before), Some(after), Some(next)) = (before, after, next)
        && own.continues_core()
        && next.continues_core()
        && after == before + 2
    {
        return Some(YearFix {
            code: ErrorCode::InteriorYear,
            year: (before + 1) * 10 + ones(year),
        });
    }

    // Lone first row of a new core. The successor must itself sit on a
    // clean decade run, otherwise it is the misdated row.
    let successor_settled = signals
        .get(row + 2)
        .is_none_or(|second| !second.decade_break || !second.continues_core());
    if let (Some(after), Some(next)) = (after, next)
        && own.id_changed
        && own.after_stop
        && next.continues_core()
        && successor_settled
    {
        return Some(YearFix {
            code: ErrorCode::FirstRowYear,
            year: (after - 1) * 10 + ones(year),
        });
    }

    // Terminal row, anchored on the previous decade.
    if let Some(before) = before
        && own.continues_core()
        && records[row].ends_with_terminal_marker()
        && !signals[row - 1].starts_core()
    {
        return Some(YearFix {
            code: ErrorCode::LastRowYear,
            year: (before + 1) * 10,
        });
    }
    None
}

/// Correct isolated decade errors and return the refreshed signals.
pub fn repair_years(
    records: &mut [Record],
    signals: &[BoundarySignals],
    year_field: YearField,
    log: &mut AnomalyLog,
) -> Vec<BoundarySignals> {
    let decades: Vec<Option<i32>> = records
        .iter()
        .map(|record| record.decade(year_field))
        .collect();
    let mut fixes = Vec::new();
    for row in 0..records.len() {
        let isolated = signals[row].decade_break
            && signals.get(row + 1).is_none_or(|next| next.decade_break);
        if !isolated {
            continue;
        }
        if let Some(fix) = propose(row, records, signals, &decades, year_field) {
            fixes.push((row, fix));
        }
    }
    for (row, fix) in fixes {
        let record = &mut records[row];
        tracing::debug!(
            line = record.line,
            from = ?record.year(year_field),
            to = fix.year,
            code = %fix.code,
            "correcting decade"
        );
        record.set_year(year_field, fix.year);
        log.push(fix.code, record.line);
    }
    classify(records, year_field)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(lines: &[&str]) -> (Vec<Record>, AnomalyLog) {
        let mut rows: Vec<Record> = lines
            .iter()
            .enumerate()
            .map(|(idx, line)| Record::new(idx + 1, line))
            .collect();
        let mut log = AnomalyLog::new();
        let signals = classify(&rows, YearField::Narrow);
        repair_years(&mut rows, &signals, YearField::Narrow, &mut log);
        (rows, log)
    }

    fn years(rows: &[Record]) -> Vec<Option<i32>> {
        rows.iter().map(|row| row.year(YearField::Narrow)).collect()
    }

    #[test]
    fn interior_decade_is_rebuilt_from_neighbours() {
        let (rows, log) = run(&[
            "ABC01   1930   100",
            "ABC01   1970   100",
            "ABC01   1950   100   999",
        ]);
        assert_eq!(years(&rows), vec![Some(1930), Some(1940), Some(1950)]);
        assert_eq!(log.render(), "1.1@2");
    }

    #[test]
    fn first_row_keeps_its_ones_digit() {
        let (rows, log) = run(&[
            "AAA01   1950   100   999",
            "BBB01   1883   100",
            "BBB01   1960   100   999",
        ]);
        assert_eq!(years(&rows)[1], Some(1953));
        assert_eq!(log.render(), "1.2@2");
    }

    #[test]
    fn terminal_row_is_anchored_on_decade() {
        let (rows, log) = run(&[
            "ABC01   1950   100",
            "ABC01   1960   100",
            "ABC01   1990   100   999",
        ]);
        assert_eq!(years(&rows)[2], Some(1970));
        assert_eq!(log.render(), "1.3@3");
    }

    #[test]
    fn clean_sequences_are_left_alone() {
        let (_, log) = run(&[
            "ABC01   1953   100",
            "ABC01   1960   100   999",
            "XYZ01   1940   100   999",
        ]);
        assert!(log.is_empty());
    }
}
