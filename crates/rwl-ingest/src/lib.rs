//! Decadal file ingestion.
//!
//! This crate turns raw decadal text into records the correction pipeline
//! can work on:
//!
//! - **Loading**: numbered records with trailing whitespace removed
//! - **Filtering**: header, blank, short (3.1) and notation (3.2) lines dropped
//! - **Column normalization**: year-field width, character cleanup (6.1, 6.2),
//!   fused-field padding, unreadable years (3.3)
//!
//! # Example
//!
//! ```ignore
//! use rwl_ingest::prepare;
//! use rwl_model::AnomalyLog;
//!
//! let mut log = AnomalyLog::new();
//! let prepared = prepare(&content, &mut log);
//! println!("{} records, {:?}", prepared.records.len(), prepared.layout);
//! ```

mod error;
mod filter;
mod loader;
mod normalize;
mod splice;

use rwl_model::{AnomalyLog, FieldLayout, Record};

// === Error Types ===
pub use error::{IngestError, Result};

// === Loading ===
pub use loader::{decode_bytes, load_records, read_file};

// === Filtering ===
pub use filter::{HEADER_LINES, filter_records, has_header, is_notation_line};

// === Normalization ===
pub use normalize::{
    detect_year_field, drop_unreadable_years, has_fused_fields, longest_filled_run, normalize,
    pad_fused_fields, remove_stray_decimals, sanitize_characters,
};

// === Splicing ===
pub use splice::insert_columns;

/// Records ready for boundary classification, with their file layout.
#[derive(Debug, Clone, Default)]
pub struct PreparedFile {
    pub records: Vec<Record>,
    pub layout: FieldLayout,
}

/// Load, filter and normalize raw file content.
pub fn prepare(content: &str, log: &mut AnomalyLog) -> PreparedFile {
    let records = load_records(content);
    let records = filter_records(records, log);
    let (records, layout) = normalize(records, log);
    PreparedFile { records, layout }
}
