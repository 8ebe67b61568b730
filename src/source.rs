//! Index document sources
//!
//! Fetching an index (over HTTP, from object storage, ...) is up to the
//! caller; [`IndexSource`] is the seam where the raw bytes come in.

use std::path::{Path, PathBuf};

#[cfg(test)]
use mockall::automock;
use thiserror::Error;
use tracing::debug;

use crate::config::INDEX_FILE_NAME;
use crate::index::{IndexFile, ParseError, parse_index};

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Index unavailable: {0}")]
    Unavailable(String),
}

/// Error returned by [`load_index`]
#[derive(Debug, Error)]
pub enum LoadError {
    #[error(transparent)]
    Source(#[from] SourceError),

    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Trait for reading the raw bytes of an index document
#[cfg_attr(test, automock)]
pub trait IndexSource: Send + Sync {
    /// Human-readable location of the index, used in logs
    fn describe(&self) -> String;

    /// Read the whole index document
    fn read_index(&self) -> Result<Vec<u8>, SourceError>;
}

/// Index document stored on the local filesystem
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    /// Source reading the index document at `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Source reading `index.yaml` from a repository directory
    pub fn from_repository_dir(dir: impl AsRef<Path>) -> Self {
        Self::new(dir.as_ref().join(INDEX_FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl IndexSource for FileSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn read_index(&self) -> Result<Vec<u8>, SourceError> {
        std::fs::read(&self.path).map_err(|source| SourceError::Io {
            path: self.path.clone(),
            source,
        })
    }
}

/// Read an index document from `source` and parse it
pub fn load_index<S: IndexSource + ?Sized>(source: &S) -> Result<IndexFile, LoadError> {
    debug!("Loading index from {}", source.describe());
    let data = source.read_index()?;
    Ok(parse_index(&data)?)
}
