//! Pipeline orchestrator.
//!
//! Sequences screening, metrics, scoring and negotiation for a batch of
//! listings. Each surviving candidate is evaluated independently: a stage
//! failure is caught here and recorded in the report's failure map rather
//! than aborting the batch. Candidates share no mutable state, so the
//! per-candidate work may be fanned out across worker tasks; results land
//! in per-index slots, which keeps the report's content identical at any
//! concurrency level.

use analytics::MetricsEngine;
use configuration::RunConfig;
use core_types::Property;
use negotiation::DealStrategist;
use scoring::ScoringEngine;
use std::collections::{BTreeMap, HashSet};
use std::time::Instant;
use tokio::task::JoinSet;
use tracing::{info, warn};
use uuid::Uuid;

pub mod error;
pub mod report;

// Re-export the core types to provide a clean public API.
pub use error::PipelineError;
pub use report::{AnalysisResult, BatchReport, CandidateFailure, FailureKind, Stage, StageError};

/// The analysis-and-negotiation pipeline for one fully parameterized run.
///
/// Construction validates every engine's parameters; run-level
/// configuration problems are reported here, before any candidate is
/// touched.
#[derive(Debug, Clone)]
pub struct Pipeline {
    config: RunConfig,
    metrics: MetricsEngine,
    scoring: ScoringEngine,
    strategist: DealStrategist,
}

impl Pipeline {
    pub fn new(config: RunConfig) -> Result<Self, PipelineError> {
        let metrics = MetricsEngine::new(config.financing.clone())?;
        let scoring = ScoringEngine::new(config.scoring.clone())?;
        let strategist = DealStrategist::new(config.negotiation.clone())?;
        Ok(Self {
            config,
            metrics,
            scoring,
            strategist,
        })
    }

    /// Screens the inventory and evaluates every surviving candidate.
    ///
    /// Per-candidate failures surface only inside the returned report; the
    /// caller always receives a report for candidate-level problems, never
    /// an error. A run with zero successes, or an empty screening result,
    /// is a valid outcome.
    ///
    /// Listing ids must be unique across the inventory: the report's
    /// failure map is keyed by id, so a duplicate would let one candidate's
    /// record shadow another's. A duplicate id is an inventory integrity
    /// problem and aborts the run before any candidate is touched.
    pub async fn run(&self, inventory: &[Property]) -> Result<BatchReport, PipelineError> {
        let run_id = Uuid::new_v4();
        let started = Instant::now();

        let mut seen = HashSet::with_capacity(inventory.len());
        for property in inventory {
            if !seen.insert(property.id.as_str()) {
                return Err(PipelineError::DuplicateListing(property.id.clone()));
            }
        }

        let candidates = screener::filter(inventory, &self.config.search)?;
        info!(
            %run_id,
            inventory = inventory.len(),
            candidates = candidates.len(),
            "starting analysis run"
        );

        let slots = self.evaluate_batch(&candidates, started).await?;

        // Assemble the partition: each slot is either a success, a stage
        // failure, or was never dispatched because the cutoff fired.
        let mut results = Vec::new();
        let mut failures = BTreeMap::new();
        for (idx, slot) in slots.into_iter().enumerate() {
            match slot {
                Some(Ok(result)) => results.push(result),
                Some(Err(stage_error)) => {
                    warn!(
                        %run_id,
                        property_id = %candidates[idx].id,
                        error = %stage_error,
                        "candidate failed"
                    );
                    failures.insert(candidates[idx].id.clone(), stage_error.into());
                }
                None => {
                    failures.insert(
                        candidates[idx].id.clone(),
                        StageError::Cancelled.into(),
                    );
                }
            }
        }

        info!(
            %run_id,
            succeeded = results.len(),
            failed = failures.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "analysis run complete"
        );

        Ok(BatchReport {
            run_id,
            generated_at: chrono::Utc::now(),
            results,
            failures,
        })
    }

    /// Dispatches candidates onto a bounded `JoinSet`, one result slot per
    /// input index. Once the cutoff fires, in-flight candidates finish but
    /// no new ones start; their slots stay empty and are recorded as
    /// cancelled by the caller.
    async fn evaluate_batch(
        &self,
        candidates: &[Property],
        started: Instant,
    ) -> Result<Vec<Option<Result<AnalysisResult, StageError>>>, PipelineError> {
        let total = candidates.len();
        let mut slots: Vec<Option<Result<AnalysisResult, StageError>>> =
            (0..total).map(|_| None).collect();

        let limit = self.config.run.max_concurrency.max(1);
        let mut set: JoinSet<(usize, Result<AnalysisResult, StageError>)> = JoinSet::new();
        let mut next = 0;

        while next < total && set.len() < limit && !self.cutoff(started, next) {
            self.dispatch(&mut set, next, candidates[next].clone());
            next += 1;
        }

        while let Some(joined) = set.join_next().await {
            let (idx, outcome) = joined?;
            slots[idx] = Some(outcome);

            if next < total && !self.cutoff(started, next) {
                self.dispatch(&mut set, next, candidates[next].clone());
                next += 1;
            }
        }

        Ok(slots)
    }

    fn dispatch(
        &self,
        set: &mut JoinSet<(usize, Result<AnalysisResult, StageError>)>,
        idx: usize,
        property: Property,
    ) {
        let metrics_engine = self.metrics.clone();
        let scoring_engine = self.scoring.clone();
        let strategist = self.strategist.clone();
        set.spawn_blocking(move || {
            let outcome = evaluate(&metrics_engine, &scoring_engine, &strategist, property);
            (idx, outcome)
        });
    }

    /// True once the run should stop dispatching new candidates.
    fn cutoff(&self, started: Instant, dispatched: usize) -> bool {
        if let Some(max) = self.config.run.max_candidates {
            if dispatched >= max {
                return true;
            }
        }
        if let Some(deadline) = self.config.run.deadline {
            if started.elapsed() >= deadline {
                return true;
            }
        }
        false
    }
}

/// One candidate's walk through metrics, scoring and negotiation. Pure:
/// touches only its own property and the immutable engines.
fn evaluate(
    metrics_engine: &MetricsEngine,
    scoring_engine: &ScoringEngine,
    strategist: &DealStrategist,
    property: Property,
) -> Result<AnalysisResult, StageError> {
    let metrics = metrics_engine.calculate(&property)?;
    let score = scoring_engine.score(&property, &metrics);
    let strategy = strategist.build(&property, &metrics, &score)?;
    Ok(AnalysisResult {
        property,
        metrics,
        score,
        strategy,
    })
}
