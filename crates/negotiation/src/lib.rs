//! Negotiation strategist.
//!
//! Derives a maximum justified offer, a suggested opening offer and an
//! ordered list of talking points from a candidate's asking price, metrics
//! and score. Talking points come from a fixed rule table; any free-text
//! drafting of actual offer emails is an external collaborator that consumes
//! the finished `NegotiationStrategy`, never the other way around.

pub mod error;
pub mod strategist;
pub mod strategy;

// Re-export the core types to provide a clean public API.
pub use error::NegotiationError;
pub use strategist::DealStrategist;
pub use strategy::NegotiationStrategy;
