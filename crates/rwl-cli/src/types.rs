use std::path::PathBuf;

use rwl_core::ReadOutput;

#[derive(Debug)]
pub struct ReadResult {
    pub path: PathBuf,
    pub output: ReadOutput,
    pub csv: Option<PathBuf>,
    pub log_json: Option<PathBuf>,
}
