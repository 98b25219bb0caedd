use core_types::ConfidenceTier;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The negotiation recommendation for one candidate.
///
/// Invariant, enforced by the strategist and asserted in its tests:
/// `opening_offer <= max_offer <= asking_price`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NegotiationStrategy {
    /// The highest price the metrics justify paying.
    pub max_offer: Decimal,
    /// Where to open; always at or below `max_offer`.
    pub opening_offer: Decimal,
    /// The discount factor that produced `max_offer`, kept for reporting.
    pub discount_factor: Decimal,
    /// Ordered, rule-derived arguments supporting the offer.
    pub talking_points: Vec<String>,
    pub confidence: ConfidenceTier,
}
