use thiserror::Error;

/// Errors raised while building or parsing canonical artifacts.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CanonicalError {
    #[error("identifier prefix must be 1-16 uppercase ASCII letters or digits, got `{0}`")]
    InvalidPrefix(String),
    #[error("malformed submission identifier `{0}`")]
    MalformedId(String),
}
