//! Index document parser

use tracing::{debug, warn};

use crate::index::IndexFile;
use crate::index::error::ParseError;

/// Parse an index document and put it in canonical order
///
/// JSON documents are accepted too, being valid YAML. Apart from requiring
/// `apiVersion`, no validation is done: records with odd URLs or versions
/// that do not parse are kept and only affect ordering and lookup.
///
/// # Errors
/// * [`ParseError::Decode`] - the bytes are not a valid index document
/// * [`ParseError::MissingApiVersion`] - `apiVersion` is missing or empty;
///   the sorted index is returned inside the error
pub fn parse_index(data: &[u8]) -> Result<IndexFile, ParseError> {
    let mut index: IndexFile = serde_yaml::from_slice(data).map_err(|e| {
        warn!("Failed to decode index file: {}", e);
        ParseError::Decode(e)
    })?;

    index.sort_entries();

    if index.api_version.is_empty() {
        warn!("Index file has no API version");
        return Err(ParseError::MissingApiVersion {
            index: Box::new(index),
        });
    }

    debug!(
        "Parsed index (apiVersion {}) with {} package(s)",
        index.api_version,
        index.entries.len()
    );
    Ok(index)
}
