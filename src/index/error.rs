use thiserror::Error;

use crate::index::IndexFile;
use crate::version::error::ConstraintError;

/// Error returned by [`parse_index`](crate::index::parse_index)
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Failed to decode index file: {0}")]
    Decode(#[from] serde_yaml::Error),

    /// The document decoded but has no `apiVersion`.
    ///
    /// The decoded (and already sorted) index is kept for inspection.
    #[error("No API version specified")]
    MissingApiVersion { index: Box<IndexFile> },
}

impl ParseError {
    /// The index decoded before validation failed, if any
    pub fn index(&self) -> Option<&IndexFile> {
        match self {
            ParseError::Decode(_) => None,
            ParseError::MissingApiVersion { index } => Some(index.as_ref()),
        }
    }

    pub fn into_index(self) -> Option<IndexFile> {
        match self {
            ParseError::Decode(_) => None,
            ParseError::MissingApiVersion { index } => Some(*index),
        }
    }
}

/// Error returned when looking up a package version
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    #[error(transparent)]
    InvalidConstraint(#[from] ConstraintError),

    #[error("No package of given name {name} and version {constraint} found")]
    PackageNotFound { name: String, constraint: String },

    #[error("No package version found for {name}-{constraint}")]
    VersionNotFound { name: String, constraint: String },
}
