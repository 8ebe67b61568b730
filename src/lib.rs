//! Package repository index
//!
//! Parses a repository index document, keeps every package's versions in
//! canonical (newest-first) order, and resolves a package name plus an
//! optional version constraint to a single version record.
//!
//! ```
//! use repo_index::index::parse_index;
//!
//! let index = parse_index(
//!     b"apiVersion: v1\nentries:\n  app:\n    - version: 1.2.0\n    - version: 2.0.0\n",
//! )
//! .unwrap();
//!
//! assert_eq!(index.find_latest("app").unwrap().version(), "2.0.0");
//! assert_eq!(index.find_version("app", "<2.0.0").unwrap().version(), "1.2.0");
//! ```

pub mod config;
pub mod index;
pub mod source;
pub mod version;

pub use index::{IndexFile, LookupError, Metadata, ParseError, VersionRecord, parse_index};
pub use source::{FileSource, IndexSource, LoadError, SourceError, load_index};
pub use version::{Constraint, ConstraintError, VersionError};
