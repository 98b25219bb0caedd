//! Deal scoring engine.
//!
//! Combines a candidate's investment metrics with its property attributes
//! into a single bounded score on the 0-100 scale and a risk tier. The
//! algorithm is a weighted sum of components normalized against fixed,
//! configured thresholds; given the same inputs it always yields the same
//! score. No randomness, no external calls.

pub mod engine;
pub mod error;
pub mod score;

// Re-export the core types to provide a clean public API.
pub use engine::ScoringEngine;
pub use error::ScoringError;
pub use score::{Score, ScoreBreakdown};
