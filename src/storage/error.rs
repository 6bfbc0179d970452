use std::{io, path::PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Failed to write entries to {}: {source}", path.display())]
    Write { path: PathBuf, source: io::Error },

    #[error("Failed to read entries from {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("Failed to encode entries: {0}")]
    Encode(#[from] serde_json::Error),
}
