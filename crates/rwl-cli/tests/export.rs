//! Integration tests for matrix and log exports.

use rwl_cli::export::{write_log_json, write_matrix_csv};
use rwl_core::read_str;
use rwl_model::{AnomalyLog, ReadOptions};

const CONTENT: &str = "\
ABC01   1950    10    11   999
XYZ01   1951    20   x21   999
";

#[test]
fn test_matrix_csv_has_year_and_core_columns() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("matrix.csv");
    let output = read_str(CONTENT, &ReadOptions::default());

    write_matrix_csv(&output.matrix, &path).expect("write csv");

    let written = std::fs::read_to_string(&path).expect("read csv");
    let lines: Vec<&str> = written.lines().collect();
    assert_eq!(lines[0], "year,ABC01,XYZ01");
    assert_eq!(lines[1], "1950,10.0,");
    assert_eq!(lines.len(), 4);
}

#[test]
fn test_log_json_lists_codes_and_lines() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("log.json");
    let output = read_str(CONTENT, &ReadOptions::default());

    write_log_json(&output.log, &path).expect("write log");

    let written = std::fs::read_to_string(&path).expect("read log");
    let parsed: AnomalyLog = serde_json::from_str(&written).expect("parse log");
    assert_eq!(parsed, output.log);
    insta::assert_snapshot!(written, @r#"
    [
      {
        "line": 2,
        "code": "6.1"
      }
    ]
    "#);
}

#[test]
fn test_export_to_missing_directory_fails() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("absent").join("matrix.csv");
    let output = read_str(CONTENT, &ReadOptions::default());
    assert!(write_matrix_csv(&output.matrix, &path).is_err());
}
