use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MetricsError {
    #[error(transparent)]
    InvalidInput(#[from] core_types::CoreError),

    #[error("Division by zero encountered in metric '{0}'")]
    DivisionByZero(String),

    #[error("Financing parameters from configuration are invalid: {0}")]
    InvalidParameters(String),

    #[error("A calculation error occurred: {0}")]
    Calculation(String),
}
