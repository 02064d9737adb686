//! Correction pipeline for decadal ring-width files.
//!
//! Stages after ingestion, in order:
//!
//! 1. [`boundary`]: three boundary signals per record
//! 2. [`identifier`]: shift (2.1) and simple (2.2) identifier repairs
//! 3. [`year`]: isolated decade errors (1.1-1.3)
//! 4. [`segment`]: records grouped into cores
//! 5. [`decade`]: rows parsed into year-aligned series
//! 6. [`assemble`]: the union year axis
//! 7. [`merge`]: segmented cores rejoined (8)
//! 8. [`resolve`]: missing values, residual markers and duplicates (4.x)
//!
//! [`read`] and [`read_str`] run the whole chain.

pub mod assemble;
pub mod boundary;
pub mod decade;
pub mod frame;
pub mod identifier;
pub mod merge;
pub mod pipeline;
pub mod resolve;
pub mod segment;
pub mod year;

pub use assemble::{CoreColumn, CoreTable, assemble};
pub use boundary::{BoundarySignals, classify};
pub use decade::{ParsedCore, parse_core, parse_cores};
pub use frame::{YEAR_COLUMN, to_dataframe, unique_column_names};
pub use identifier::{repair_identifiers, repair_mistyped, repair_shifted};
pub use merge::merge_segments;
pub use pipeline::{ReadOutput, read, read_str};
pub use resolve::{
    apply_missing_policy, drop_empty_columns, flag_label_duplicates, remove_exact_duplicates,
    resolve, resolve_residual_markers, round_values,
};
pub use segment::{CoreSpan, UNNAMED_PREFIX, segment};
pub use year::repair_years;
