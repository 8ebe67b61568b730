use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VersionError {
    #[error("Invalid semantic version: {0}")]
    InvalidVersion(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConstraintError {
    #[error("Invalid constraint expression: {0}")]
    InvalidExpression(String),

    #[error("Invalid version in constraint {expression:?}: {version}")]
    InvalidVersion { expression: String, version: String },
}
