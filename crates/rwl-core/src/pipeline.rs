//! End-to-end read: file text in, corrected matrix and anomaly log out.

use std::path::Path;

use polars::prelude::{DataFrame, PolarsResult};
use rwl_ingest::{PreparedFile, prepare, read_file};
use rwl_model::{AnomalyLog, LogEntry, MeasurementMatrix, ReadOptions};

use crate::assemble::assemble;
use crate::decade::parse_cores;
use crate::frame::to_dataframe;
use crate::identifier::repair_identifiers;
use crate::merge::merge_segments;
use crate::resolve::resolve;
use crate::segment::segment;
use crate::year::repair_years;

/// Result of reading one decadal file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReadOutput {
    pub matrix: MeasurementMatrix,
    /// Sorted by line, then code; empty whenever the matrix is.
    pub log: AnomalyLog,
}

impl ReadOutput {
    pub fn years(&self) -> &[i32] {
        &self.matrix.years
    }

    pub fn core_ids(&self) -> &[String] {
        &self.matrix.core_ids
    }

    pub fn is_empty(&self) -> bool {
        self.matrix.is_empty()
    }

    /// Split into `(values, years, core_ids, log)`.
    pub fn into_parts(self) -> (Vec<Vec<f64>>, Vec<i32>, Vec<String>, Vec<LogEntry>) {
        let MeasurementMatrix {
            years,
            core_ids,
            values,
        } = self.matrix;
        (values, years, core_ids, self.log.into_entries())
    }

    pub fn to_dataframe(&self) -> PolarsResult<DataFrame> {
        to_dataframe(&self.matrix)
    }
}

/// Read a decadal file from disk.
///
/// Only an unreadable file is an error; every other problem is repaired or
/// dropped and recorded in the log.
pub fn read(path: &Path, options: &ReadOptions) -> rwl_ingest::Result<ReadOutput> {
    let content = read_file(path)?;
    let _span = tracing::info_span!("read", path = %path.display()).entered();
    Ok(read_str(&content, options))
}

/// Run the correction pipeline over file text.
pub fn read_str(content: &str, options: &ReadOptions) -> ReadOutput {
    let mut log = AnomalyLog::new();
    let PreparedFile {
        mut records,
        layout,
    } = prepare(content, &mut log);
    let year_field = layout.year_field;

    let signals = repair_identifiers(&mut records, year_field, &mut log);
    let signals = repair_years(&mut records, &signals, year_field, &mut log);
    let spans = segment(&records, &signals, year_field);
    let cores = parse_cores(&records, &spans, &layout, &mut log);

    let mut table = assemble(cores);
    merge_segments(&mut table, &mut log);
    resolve(&mut table, options, &mut log);

    let matrix = table.into_matrix();
    if matrix.is_empty() {
        log.clear();
    } else {
        log.finalize();
    }
    tracing::info!(
        cores = matrix.n_cores(),
        years = matrix.n_years(),
        anomalies = log.len(),
        "read complete"
    );
    ReadOutput { matrix, log }
}
