use core_types::RiskTier;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The composite investment score for one candidate.
///
/// `value` is bounded to [0, 100]; the risk tier is assigned from the
/// configured score bands. Write-once: derived solely from a property and
/// its metrics, never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Score {
    pub value: Decimal,
    pub risk_tier: RiskTier,
    pub breakdown: ScoreBreakdown,
}

/// The normalized [0, 1] contribution of each component before weighting.
///
/// Kept on the score so a report can show *why* a deal rated the way it
/// did, not just the headline number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub cap_rate: Decimal,
    pub cash_on_cash: Decimal,
    pub cash_flow: Decimal,
    pub age: Decimal,
}
