use thiserror::Error;

/// Run-level failures. Anything here aborts the whole batch before or
/// during orchestration; per-candidate problems never surface through this
/// type, only through the report's failure map.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Duplicate listing id in inventory: {0}")]
    DuplicateListing(String),

    #[error("Screening error: {0}")]
    Screener(#[from] screener::ScreenerError),

    #[error("Metrics engine rejected the run configuration: {0}")]
    Metrics(#[from] analytics::MetricsError),

    #[error("Scoring engine rejected the run configuration: {0}")]
    Scoring(#[from] scoring::ScoringError),

    #[error("Negotiation strategist rejected the run configuration: {0}")]
    Negotiation(#[from] negotiation::NegotiationError),

    #[error("A candidate worker task failed to complete: {0}")]
    Worker(String),
}

impl From<tokio::task::JoinError> for PipelineError {
    fn from(error: tokio::task::JoinError) -> Self {
        PipelineError::Worker(error.to_string())
    }
}
