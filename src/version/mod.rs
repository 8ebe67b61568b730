//! Version comparison layer
//!
//! Parses version strings and constraint expressions and orders versions by
//! SemVer precedence.
//!
//! # Modules
//!
//! - [`semver`]: Lenient version parsing and precedence comparison
//! - [`constraint`]: Constraint expressions (`>=1.0, <2.0`, `^1.2`, `*`, ...)
//! - [`error`]: Error types for malformed versions and constraints

pub mod constraint;
pub mod error;
pub mod semver;

pub use constraint::Constraint;
pub use error::{ConstraintError, VersionError};
pub use self::semver::{compare_precedence, parse_version};
