//! Canonical ordering of version records
//!
//! In canonical form every package's newest release sits at index 0, so
//! tooling can pick the latest version without parsing any versions itself.

use std::cmp::Ordering;

use tracing::warn;

use crate::index::{IndexFile, VersionRecord};
use crate::version::semver::{compare_precedence, parse_version};

/// Order two records by version, ascending
///
/// Records whose version does not parse compare less than any record whose
/// version does, and equal to each other.
pub fn compare_records(a: &VersionRecord, b: &VersionRecord) -> Ordering {
    match (parse_version(a.version()), parse_version(b.version())) {
        (Ok(a), Ok(b)) => compare_precedence(&a, &b),
        (Ok(_), Err(_)) => Ordering::Greater,
        (Err(_), Ok(_)) => Ordering::Less,
        (Err(_), Err(_)) => Ordering::Equal,
    }
}

/// Sort records newest-first, unparseable versions last
///
/// The sort is stable: records that compare equal keep their input order.
pub fn sort_versions(versions: &mut [VersionRecord]) {
    versions.sort_by(|a, b| compare_records(b, a));
}

impl IndexFile {
    /// Put every package's version list in canonical order
    pub fn sort_entries(&mut self) {
        for (name, versions) in self.entries.iter_mut() {
            sort_versions(versions);

            let invalid = versions
                .iter()
                .rev()
                .take_while(|record| parse_version(record.version()).is_err())
                .count();
            if invalid > 0 {
                warn!(
                    "Package {} has {} record(s) without a valid semantic version",
                    name, invalid
                );
            }
        }
    }
}
