use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScoringError {
    #[error("Scoring parameters from configuration are invalid: {0}")]
    InvalidParameters(String),
}
