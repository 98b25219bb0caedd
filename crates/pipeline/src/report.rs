use analytics::{InvestmentMetrics, MetricsError};
use chrono::{DateTime, Utc};
use core_types::Property;
use negotiation::{NegotiationError, NegotiationStrategy};
use scoring::Score;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;
use uuid::Uuid;

/// Everything the pipeline produced for one successful candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub property: Property,
    pub metrics: InvestmentMetrics,
    pub score: Score,
    pub strategy: NegotiationStrategy,
}

/// The aggregate output of one pipeline run.
///
/// Partition invariant: every candidate that survived screening appears in
/// exactly one of `results` (in inventory order) or `failures` (keyed by
/// property id; the pipeline rejects inventories with duplicate ids, so
/// the keys account for every failed candidate). The shape is fixed here;
/// serialization format and transport belong to the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchReport {
    pub run_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub results: Vec<AnalysisResult>,
    pub failures: BTreeMap<String, CandidateFailure>,
}

impl BatchReport {
    /// The number of screened candidates this report accounts for.
    pub fn total_candidates(&self) -> usize {
        self.results.len() + self.failures.len()
    }
}

/// Why one candidate dropped out, tagged with the stage that raised.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateFailure {
    pub stage: Stage,
    pub kind: FailureKind,
    pub detail: String,
}

/// The pipeline stage a candidate failed at. `Scheduling` marks candidates
/// the run cutoff prevented from ever being dispatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Stage {
    Metrics,
    Negotiation,
    Scheduling,
}

/// The error classification recorded in the failure map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FailureKind {
    InvalidInput,
    DivisionByZero,
    InvalidAskingPrice,
    Calculation,
    Cancelled,
}

/// A per-candidate stage failure, caught at the orchestrator boundary and
/// converted into a `CandidateFailure` entry. Scoring has no variant: with
/// a validated configuration it is total and cannot raise per candidate.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StageError {
    #[error("metrics stage failed: {0}")]
    Metrics(#[from] MetricsError),

    #[error("negotiation stage failed: {0}")]
    Negotiation(#[from] NegotiationError),

    #[error("cancelled by the run cutoff before dispatch")]
    Cancelled,
}

impl From<StageError> for CandidateFailure {
    fn from(error: StageError) -> Self {
        let (stage, kind) = match &error {
            StageError::Metrics(MetricsError::InvalidInput(_)) => {
                (Stage::Metrics, FailureKind::InvalidInput)
            }
            StageError::Metrics(MetricsError::DivisionByZero(_)) => {
                (Stage::Metrics, FailureKind::DivisionByZero)
            }
            StageError::Metrics(_) => (Stage::Metrics, FailureKind::Calculation),
            StageError::Negotiation(NegotiationError::InvalidAskingPrice(_)) => {
                (Stage::Negotiation, FailureKind::InvalidAskingPrice)
            }
            StageError::Negotiation(_) => (Stage::Negotiation, FailureKind::Calculation),
            StageError::Cancelled => (Stage::Scheduling, FailureKind::Cancelled),
        };
        CandidateFailure {
            stage,
            kind,
            detail: error.to_string(),
        }
    }
}
