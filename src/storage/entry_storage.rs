use std::{future::Future, io::ErrorKind, ops::Deref, path::PathBuf};

use tracing::{debug, info, warn};

use crate::{fs::operations::replace_file_contents, tracker::entities::FitnessEntry};

use super::{
    error::StorageError,
    schema::{EntryFile, SCHEMA_VERSION},
};

pub const DEFAULT_FILE_NAME: &str = "fitness_entries.json";

/// Interface for abstracting storage of entries.
pub trait EntryStorage {
    /// Replaces everything previously stored with `entries`.
    fn save(&self, entries: &[FitnessEntry]) -> impl Future<Output = Result<(), StorageError>>;

    /// Reads every stored entry in the order it was saved. Missing or undecodable data is
    /// returned as an empty list.
    fn load(&self) -> impl Future<Output = Result<Vec<FitnessEntry>, StorageError>>;
}

impl<T: Deref> EntryStorage for T
where
    T::Target: EntryStorage,
{
    fn save(&self, entries: &[FitnessEntry]) -> impl Future<Output = Result<(), StorageError>> {
        self.deref().save(entries)
    }

    fn load(&self) -> impl Future<Output = Result<Vec<FitnessEntry>, StorageError>> {
        self.deref().load()
    }
}

/// The main realization of [EntryStorage]. Keeps everything in a single JSON file.
pub struct JsonEntryStorage {
    path: PathBuf,
}

impl JsonEntryStorage {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn in_dir(dir: PathBuf) -> Self {
        Self::new(dir.join(DEFAULT_FILE_NAME))
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    fn decode(&self, data: &[u8]) -> Option<Vec<FitnessEntry>> {
        let file = match serde_json::from_slice::<EntryFile>(data) {
            Ok(v) => v,
            Err(e) => {
                warn!("Entries in {:?} could not be parsed: {e}", self.path);
                return None;
            }
        };

        if file.version != SCHEMA_VERSION {
            warn!(
                "Entries in {:?} use unsupported version {}, expected {SCHEMA_VERSION}",
                self.path, file.version
            );
            return None;
        }

        let count = file.entries.len();
        let entries = file
            .entries
            .into_iter()
            .map(|v| v.into_entry())
            .collect::<Option<Vec<_>>>();
        if entries.is_none() {
            warn!(
                "Entries in {:?} contain invalid values among {count} records",
                self.path
            );
        }
        entries
    }
}

impl EntryStorage for JsonEntryStorage {
    async fn save(&self, entries: &[FitnessEntry]) -> Result<(), StorageError> {
        let buffer = serde_json::to_vec_pretty(&EntryFile::from_entries(entries))?;

        replace_file_contents(&self.path, &buffer)
            .await
            .map_err(|source| StorageError::Write {
                path: self.path.clone(),
                source,
            })?;

        info!("Saved {} entries to {:?}", entries.len(), self.path);
        Ok(())
    }

    async fn load(&self) -> Result<Vec<FitnessEntry>, StorageError> {
        let data = match tokio::fs::read(&self.path).await {
            Ok(v) => v,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No entries stored at {:?} yet", self.path);
                return Ok(vec![]);
            }
            Err(source) => {
                return Err(StorageError::Read {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        let entries = self.decode(&data).unwrap_or_default();
        debug!("Loaded {} entries from {:?}", entries.len(), self.path);
        Ok(entries)
    }
}
