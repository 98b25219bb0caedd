//! Investment metrics calculator.
//!
//! Pure, deterministic functions that turn one `Property`'s attributes plus
//! the run's financing assumptions into the standard investment metrics
//! (NOI, cap rate, cash flow, cash-on-cash return, ROI). This crate holds no
//! state beyond the financing parameters it was constructed with and touches
//! no I/O.

pub mod engine;
pub mod error;
pub mod metrics;

// Re-export the core types to provide a clean public API.
pub use engine::MetricsEngine;
pub use error::MetricsError;
pub use metrics::InvestmentMetrics;
