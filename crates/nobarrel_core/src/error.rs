use std::path::PathBuf;
use thiserror::Error;

/// Failure to turn a file into a [`crate::Module`]. Callers skip the file.
#[derive(Debug, Error)]
pub enum ModuleError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {message}")]
    Parse { path: PathBuf, message: String },
}
