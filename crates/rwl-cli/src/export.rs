//! File exports for read results.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use polars::prelude::{CsvWriter, SerWriter};
use rwl_core::to_dataframe;
use rwl_model::{AnomalyLog, MeasurementMatrix};

/// Write the matrix as CSV: a `year` column, then one column per core.
/// Missing cells are left empty.
pub fn write_matrix_csv(matrix: &MeasurementMatrix, path: &Path) -> Result<()> {
    let mut df = to_dataframe(matrix).context("build matrix frame")?;
    let mut file =
        File::create(path).with_context(|| format!("create {}", path.display()))?;
    CsvWriter::new(&mut file)
        .include_header(true)
        .finish(&mut df)
        .with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

/// Write the anomaly log as a JSON array of `{line, code}` objects.
pub fn write_log_json(log: &AnomalyLog, path: &Path) -> Result<()> {
    let file = File::create(path).with_context(|| format!("create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, log).context("serialize anomaly log")?;
    writer
        .flush()
        .with_context(|| format!("write {}", path.display()))?;
    Ok(())
}
