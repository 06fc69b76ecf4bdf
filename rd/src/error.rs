use thiserror::Error;

#[non_exhaustive]
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TransformError {
    #[error("could not set up RD New projection: {0}")]
    Create(String),

    #[error("proj error: {0}")]
    Proj(String),
}
