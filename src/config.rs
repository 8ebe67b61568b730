// =============================================================================
// Repository layout constants
// =============================================================================

/// File name of the index document at the root of a repository
pub const INDEX_FILE_NAME: &str = "index.yaml";
