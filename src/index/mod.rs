//! Repository index model
//!
//! An index document lists, for each package, every published version and
//! where to download it:
//!
//! ```yaml
//! apiVersion: v1
//! generated: 2024-05-01T12:00:00Z
//! entries:
//!   app:
//!     - name: app
//!       version: 2.0.0
//!       urls: [https://example.com/app-2.0.0.tgz]
//!       digest: 3c1a...
//! ```
//!
//! # Modules
//!
//! - [`parser`]: Decodes an index document and validates it
//! - [`canonical`]: Sorts every package's versions newest-first
//! - [`resolver`]: Looks up a version by package name and constraint
//! - [`error`]: Error types for parsing and lookup

pub mod canonical;
pub mod error;
pub mod parser;
pub mod resolver;

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer};

pub use error::{LookupError, ParseError};
pub use parser::parse_index;

/// A parsed repository index
///
/// Once returned by [`parse_index`] every version list is in canonical order
/// (highest version first, unparseable versions last).
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexFile {
    #[serde(default)]
    pub api_version: String,
    #[serde(default)]
    pub generated: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "entries_or_empty")]
    pub entries: IndexMap<String, Vec<VersionRecord>>,
}

/// One published version of a package
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct VersionRecord {
    /// Descriptive fields shared with the package's own manifest
    #[serde(flatten)]
    pub metadata: Metadata,
    /// Download locations, preferred first
    #[serde(default)]
    pub urls: Vec<String>,
    #[serde(default)]
    pub created: Option<DateTime<Utc>>,
    /// Withdrawn versions stay listed so their history is kept
    #[serde(default)]
    pub removed: bool,
    #[serde(default)]
    pub digest: Option<String>,
}

/// Descriptive package metadata embedded in each version record
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    #[serde(default, deserialize_with = "scalar_string")]
    pub name: String,
    #[serde(default, deserialize_with = "scalar_string")]
    pub version: String,
    #[serde(default, deserialize_with = "optional_scalar_string")]
    pub app_version: Option<String>,
    #[serde(default, deserialize_with = "optional_scalar_string")]
    pub description: Option<String>,
    #[serde(default)]
    pub maintainers: Vec<Maintainer>,
    #[serde(default, deserialize_with = "optional_scalar_string")]
    pub url: Option<String>,
    #[serde(default, deserialize_with = "scalar_strings")]
    pub tags: Vec<String>,
    /// Fields this crate does not interpret, kept as written
    #[serde(flatten)]
    pub extra: IndexMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Maintainer {
    #[serde(default, deserialize_with = "scalar_string")]
    pub name: String,
    #[serde(default, deserialize_with = "optional_scalar_string")]
    pub email: Option<String>,
}

impl VersionRecord {
    /// The version string as written in the index
    pub fn version(&self) -> &str {
        &self.metadata.version
    }

    pub fn is_removed(&self) -> bool {
        self.removed
    }
}

impl IndexFile {
    /// Versions of a package in canonical order, or None if the package is unknown
    pub fn versions(&self, name: &str) -> Option<&[VersionRecord]> {
        self.entries.get(name).map(Vec::as_slice)
    }

    /// Names of all packages in the index, in document order
    pub fn package_names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

/// Read any YAML scalar as a string
///
/// Flattened fields are buffered before they reach their target type, which
/// loses serde_yaml's plain-scalar-to-string coercion: `version: 1.0` arrives
/// as a float. Numbers and booleans are turned back into their text here.
fn optional_scalar_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Null => Ok(None),
        serde_json::Value::String(s) => Ok(Some(s)),
        serde_json::Value::Number(n) => Ok(Some(n.to_string())),
        serde_json::Value::Bool(b) => Ok(Some(b.to_string())),
        other => Err(D::Error::custom(format!("expected a scalar, found {other}"))),
    }
}

fn scalar_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    optional_scalar_string(deserializer).map(Option::unwrap_or_default)
}

fn scalar_strings<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let values: Option<Vec<serde_json::Value>> = Option::deserialize(deserializer)?;
    values
        .unwrap_or_default()
        .into_iter()
        .map(|value| optional_scalar_string(value).map_err(D::Error::custom))
        .filter_map(Result::transpose)
        .collect()
}

/// `entries: ~` and `app: ~` both read as empty
fn entries_or_empty<'de, D>(
    deserializer: D,
) -> Result<IndexMap<String, Vec<VersionRecord>>, D::Error>
where
    D: Deserializer<'de>,
{
    let entries: Option<IndexMap<String, Option<Vec<VersionRecord>>>> =
        Option::deserialize(deserializer)?;
    Ok(entries
        .unwrap_or_default()
        .into_iter()
        .map(|(name, versions)| (name, versions.unwrap_or_default()))
        .collect())
}
