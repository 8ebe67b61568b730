use std::cmp::Ordering;

use semver::Version;

use crate::version::error::VersionError;

/// Parse a version string into a semver::Version, normalizing partial versions.
///
/// Index documents are written by hand as often as by tools, so a leading
/// `v` is accepted and partial versions are padded with zeros. Pre-release
/// and build metadata are kept as written.
///
/// Examples:
/// - "1" -> Version(1, 0, 0)
/// - "v1.2" -> Version(1, 2, 0)
/// - "1.2-beta.1" -> Version(1, 2, 0, pre = "beta.1")
/// - "1.2.3+build" -> Version(1, 2, 3, build = "build")
pub fn parse_version(version: &str) -> Result<Version, VersionError> {
    let stripped = version.strip_prefix('v').unwrap_or(version);
    let (core, suffix) = match stripped.find(['-', '+']) {
        Some(idx) => stripped.split_at(idx),
        None => (stripped, ""),
    };
    let normalized = match core.split('.').count() {
        1 => format!("{core}.0.0{suffix}"),
        2 => format!("{core}.0{suffix}"),
        _ => stripped.to_string(),
    };
    Version::parse(&normalized).map_err(|_| VersionError::InvalidVersion(version.to_string()))
}

/// Compare two versions by SemVer precedence.
///
/// Unlike `Ord for Version`, build metadata does not take part in the
/// comparison, so `1.0.0+a` and `1.0.0+b` are equal.
pub fn compare_precedence(a: &Version, b: &Version) -> Ordering {
    (a.major, a.minor, a.patch)
        .cmp(&(b.major, b.minor, b.patch))
        .then_with(|| a.pre.cmp(&b.pre))
}
