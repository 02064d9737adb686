//! Line loading: raw bytes to numbered records.

use std::path::Path;

use rwl_model::Record;

use crate::error::{IngestError, Result};

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// Read a decadal file into text.
///
/// Fails only when the file cannot be opened or read.
pub fn read_file(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            IngestError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            IngestError::FileRead {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })?;
    Ok(decode_bytes(&bytes))
}

/// Decode file bytes as UTF-8, stripping a BOM. Invalid sequences are
/// replaced rather than rejected; the character sanitizer deals with them.
pub fn decode_bytes(bytes: &[u8]) -> String {
    let body = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    match std::str::from_utf8(body) {
        Ok(text) => text.to_string(),
        Err(error) => {
            tracing::warn!(
                valid_up_to = error.valid_up_to(),
                "input is not valid UTF-8, decoding lossily"
            );
            String::from_utf8_lossy(body).into_owned()
        }
    }
}

/// Split text into records numbered from 1, trailing whitespace removed.
///
/// Accepts `\n`, `\r\n` and bare `\r` line endings.
pub fn load_records(content: &str) -> Vec<Record> {
    let separator = if content.contains('\n') { '\n' } else { '\r' };
    let mut records: Vec<Record> = content
        .split(separator)
        .enumerate()
        .map(|(idx, line)| Record::new(idx + 1, line.trim_end()))
        .collect();
    if records.last().is_some_and(Record::is_empty) {
        records.pop();
    }
    records
}
