use std::time::Instant;

use anyhow::{Context, Result};
use comfy_table::Table;
use tracing::{info, info_span};

use rwl_cli::export::{write_log_json, write_matrix_csv};
use rwl_core::read;
use rwl_model::{ErrorCode, ReadOptions};

use crate::cli::ReadArgs;
use crate::summary::apply_table_style;
use crate::types::ReadResult;

pub fn run_codes() {
    let mut table = Table::new();
    table.set_header(vec!["Code", "Description"]);
    apply_table_style(&mut table);
    for code in ErrorCode::ALL {
        table.add_row(vec![code.to_string(), code.description().to_string()]);
    }
    println!("{table}");
}

pub fn run_read(args: &ReadArgs) -> Result<ReadResult> {
    let path = &args.file;
    let read_span = info_span!("read_file", path = %path.display());
    let _read_guard = read_span.enter();
    let started = Instant::now();

    let options = ReadOptions::new()
        .with_round(args.round)
        .with_zero_as_missing(args.zero_as_missing);
    let output = read(path, &options).with_context(|| format!("read {}", path.display()))?;

    if let Some(csv) = &args.output {
        write_matrix_csv(&output.matrix, csv)?;
        info!(path = %csv.display(), "wrote matrix");
    }
    if let Some(json) = &args.log_json {
        write_log_json(&output.log, json)?;
        info!(path = %json.display(), entries = output.log.len(), "wrote anomaly log");
    }

    info!(
        cores = output.matrix.n_cores(),
        years = output.matrix.n_years(),
        anomalies = output.log.len(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "read finished"
    );
    Ok(ReadResult {
        path: path.clone(),
        output,
        csv: args.output.clone(),
        log_json: args.log_json.clone(),
    })
}
