use crate::error::ScoringError;
use crate::score::{Score, ScoreBreakdown};
use analytics::InvestmentMetrics;
use configuration::ScoringConfig;
use core_types::{Property, RiskTier};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::debug;

/// Scores candidates by a weighted sum of normalized metric components.
///
/// Construction validates the configured weights and bands; scoring itself
/// is total and deterministic for any finite metrics.
#[derive(Debug, Clone)]
pub struct ScoringEngine {
    config: ScoringConfig,
}

impl ScoringEngine {
    /// Creates a new `ScoringEngine` with the given configuration parameters.
    pub fn new(config: ScoringConfig) -> Result<Self, ScoringError> {
        let w = &config.weights;
        if w.cap_rate < dec!(0)
            || w.cash_on_cash < dec!(0)
            || w.cash_flow < dec!(0)
            || w.age < dec!(0)
        {
            return Err(ScoringError::InvalidParameters(
                "weights must all be non-negative".to_string(),
            ));
        }
        if w.total() != dec!(1) {
            return Err(ScoringError::InvalidParameters(format!(
                "weights must sum to 1, got {}",
                w.total()
            )));
        }
        let t = &config.thresholds;
        if t.cap_rate_target <= t.cap_rate_floor
            || t.cash_on_cash_target <= t.cash_on_cash_floor
        {
            return Err(ScoringError::InvalidParameters(
                "normalization targets must exceed their floors".to_string(),
            ));
        }
        if t.max_age_years == 0 {
            return Err(ScoringError::InvalidParameters(
                "max_age_years must be at least 1".to_string(),
            ));
        }
        if config.risk_bands.low_min <= config.risk_bands.medium_min {
            return Err(ScoringError::InvalidParameters(
                "risk band low_min must exceed medium_min".to_string(),
            ));
        }
        Ok(Self { config })
    }

    /// Derives the composite score and risk tier for one candidate.
    pub fn score(&self, property: &Property, metrics: &InvestmentMetrics) -> Score {
        let t = &self.config.thresholds;

        let breakdown = ScoreBreakdown {
            cap_rate: normalize(metrics.cap_rate, t.cap_rate_floor, t.cap_rate_target),
            cash_on_cash: normalize(
                metrics.cash_on_cash,
                t.cash_on_cash_floor,
                t.cash_on_cash_target,
            ),
            cash_flow: if metrics.monthly_cash_flow > Decimal::ZERO {
                Decimal::ONE
            } else {
                Decimal::ZERO
            },
            age: self.age_component(property.year_built),
        };

        let w = &self.config.weights;
        let raw = w.cap_rate * breakdown.cap_rate
            + w.cash_on_cash * breakdown.cash_on_cash
            + w.cash_flow * breakdown.cash_flow
            + w.age * breakdown.age;

        let value = (raw * dec!(100)).round_dp(1);
        let risk_tier = self.tier_for(value);

        debug!(property_id = %property.id, %value, ?risk_tier, "scored candidate");

        Score {
            value,
            risk_tier,
            breakdown,
        }
    }

    /// Newer buildings score higher; the component decays linearly to 0 at
    /// the configured maximum age. Age is measured against the configured
    /// valuation year so a score never depends on the wall clock.
    fn age_component(&self, year_built: i32) -> Decimal {
        let age = Decimal::from((self.config.valuation_year - year_built).max(0));
        let horizon = Decimal::from(self.config.thresholds.max_age_years);
        clamp01(Decimal::ONE - age / horizon)
    }

    fn tier_for(&self, value: Decimal) -> RiskTier {
        let bands = &self.config.risk_bands;
        if value >= bands.low_min {
            RiskTier::Low
        } else if value >= bands.medium_min {
            RiskTier::Medium
        } else {
            RiskTier::High
        }
    }
}

/// Linear normalization of `x` into [0, 1] between `floor` and `target`.
fn normalize(x: Decimal, floor: Decimal, target: Decimal) -> Decimal {
    clamp01((x - floor) / (target - floor))
}

fn clamp01(x: Decimal) -> Decimal {
    x.clamp(Decimal::ZERO, Decimal::ONE)
}
