//! Shared data model for decadal ring-width ingestion.

pub mod log;
pub mod matrix;
pub mod options;
pub mod record;

pub use log::{AnomalyLog, ErrorCode, LogEntry, UnknownCode};
pub use matrix::{MISSING, MeasurementMatrix, is_missing};
pub use options::{FLAG_ROUND, FLAG_ZERO_AS_MISSING, ReadOptions};
pub use record::{
    FIELD_WIDTH, FieldLayout, PADDING_WIDTH, PREFIX_WIDTH, Record, SENTINEL_FILL, SLOTS_PER_ROW,
    STOP_MARKER, STOP_MARKER_FINE, WIDE_FIELD_WIDTH, YearField, is_terminal_token, numeric_tokens,
};
