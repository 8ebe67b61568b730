//! Version lookup by package name and constraint
//!
//! Lookups rely on the canonical (newest-first) order established when the
//! index was parsed: the first record satisfying a constraint is the highest
//! version that does.

use tracing::debug;

use crate::index::error::LookupError;
use crate::index::{IndexFile, VersionRecord};
use crate::version::constraint::Constraint;
use crate::version::semver::parse_version;

impl IndexFile {
    /// Find the latest version of a package
    ///
    /// Equivalent to resolving against the `*` constraint.
    pub fn find_latest(&self, name: &str) -> Result<&VersionRecord, LookupError> {
        self.resolve(name, &Constraint::any())
    }

    /// Find the highest version of a package satisfying a constraint expression
    ///
    /// # Errors
    /// * [`LookupError::InvalidConstraint`] - the expression is malformed
    /// * [`LookupError::PackageNotFound`] - no versions are listed for `name`
    /// * [`LookupError::VersionNotFound`] - no listed version satisfies the constraint
    pub fn find_version(
        &self,
        name: &str,
        constraint: &str,
    ) -> Result<&VersionRecord, LookupError> {
        let constraint = Constraint::parse(constraint)?;
        self.resolve(name, &constraint)
    }

    /// Find the first record, in canonical order, whose version satisfies `constraint`
    ///
    /// Records whose version does not parse are skipped.
    pub fn resolve(
        &self,
        name: &str,
        constraint: &Constraint,
    ) -> Result<&VersionRecord, LookupError> {
        let versions = self
            .entries
            .get(name)
            .filter(|versions| !versions.is_empty())
            .ok_or_else(|| LookupError::PackageNotFound {
                name: name.to_string(),
                constraint: constraint.to_string(),
            })?;

        versions
            .iter()
            .find(|record| match parse_version(record.version()) {
                Ok(version) => constraint.matches(&version),
                Err(e) => {
                    debug!("Skipping {} record: {}", name, e);
                    false
                }
            })
            .ok_or_else(|| LookupError::VersionNotFound {
                name: name.to_string(),
                constraint: constraint.to_string(),
            })
    }
}
