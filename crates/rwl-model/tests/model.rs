//! Tests for rwl-model types.

use rwl_model::{AnomalyLog, ErrorCode, MISSING, MeasurementMatrix, ReadOptions};

#[test]
fn matrix_reports_core_spans() {
    let matrix = MeasurementMatrix::from_columns(
        vec![1900, 1901, 1902, 1903],
        vec![
            ("A01".to_string(), vec![MISSING, 12.0, MISSING, 14.0]),
            ("B01".to_string(), vec![MISSING; 4]),
        ],
    );
    assert_eq!(matrix.n_years(), 4);
    assert_eq!(matrix.n_cores(), 2);
    assert_eq!(matrix.core_span(0), Some((1901, 1903)));
    assert_eq!(matrix.measured(0), 2);
    assert_eq!(matrix.core_span(1), None);
    assert_eq!(matrix.value_at(1903, "a01"), Some(14.0));
    assert_eq!(matrix.value_at(1902, "A01"), None);
    assert_eq!(matrix.value_at(1899, "A01"), None);
}

#[test]
fn empty_matrix_has_no_cells() {
    let matrix = MeasurementMatrix::empty();
    assert!(matrix.is_empty());
    assert_eq!(matrix.get(0, 0), None);
}

#[test]
fn missing_policy_respects_zero_flag() {
    let default = ReadOptions::default();
    assert!(default.is_missing_value(-1.0));
    assert!(!default.is_missing_value(0.0));
    let strict = ReadOptions::new().with_zero_as_missing(true);
    assert!(strict.is_missing_value(0.0));
    assert!(!strict.is_missing_value(0.5));
}

#[test]
fn log_queries_by_code() {
    let mut log = AnomalyLog::new();
    log.push(ErrorCode::SegmentedCore, 12);
    log.push(ErrorCode::SegmentedCore, 4);
    log.push(ErrorCode::ShortLine, 1);
    log.finalize();
    assert_eq!(log.count(ErrorCode::SegmentedCore), 2);
    assert_eq!(log.lines_with(ErrorCode::SegmentedCore), vec![4, 12]);
    assert!(log.contains(ErrorCode::ShortLine, 1));
    assert_eq!(log.render(), "3.1@1 8@4 8@12");
}

#[test]
fn every_code_has_a_description() {
    for code in ErrorCode::ALL {
        assert!(!code.description().is_empty(), "{code}");
    }
}
