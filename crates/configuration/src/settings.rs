use crate::error::ConfigError;
use core_types::PropertyType;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;
use std::time::Duration;

/// The root configuration structure for a single pipeline run.
///
/// All percentage-style parameters are fractions, not percentages:
/// a 20% down payment is `0.20`, a 5.5% interest rate is `0.055`.
#[derive(Debug, Clone, Deserialize)]
pub struct RunConfig {
    pub search: SearchCriteria,
    pub financing: Financing,
    pub scoring: ScoringConfig,
    pub negotiation: NegotiationConfig,
    #[serde(default)]
    pub run: RunLimits,
}

/// Criteria for selecting candidate listings from the inventory.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchCriteria {
    /// Case-insensitive substring matched against a listing's city and
    /// address. `None` admits every location.
    #[serde(default)]
    pub location: Option<String>,
    /// Inclusive lower bound on asking price.
    #[serde(default)]
    pub min_price: Option<Decimal>,
    /// Inclusive upper bound on asking price.
    #[serde(default)]
    pub max_price: Option<Decimal>,
    /// Accepted property types. `None` admits every type.
    #[serde(default)]
    pub property_types: Option<Vec<PropertyType>>,
}

/// The assumed financing structure used to derive debt service and
/// cash-invested figures for every candidate.
#[derive(Debug, Clone, Deserialize)]
pub struct Financing {
    /// Fraction of the asking price paid down up front (e.g., 0.20).
    pub down_payment_pct: Decimal,
    /// Annual mortgage interest rate as a fraction (e.g., 0.055).
    pub interest_rate: Decimal,
    /// Amortization period of the loan.
    pub loan_term_years: u32,
    /// Flat closing costs added to the cash invested, in dollars.
    pub closing_costs: Decimal,
    /// Expected annual appreciation as a fraction of cash invested,
    /// used only by the ROI calculation (e.g., 0.03).
    pub appreciation_pct: Decimal,
}

/// Parameters for the deal scoring engine.
#[derive(Debug, Clone, Deserialize)]
pub struct ScoringConfig {
    pub weights: ScoringWeights,
    pub thresholds: ScoreThresholds,
    pub risk_bands: RiskBands,
    /// The year property age is measured against. Explicit so that a
    /// score never depends on the wall clock.
    pub valuation_year: i32,
}

/// Relative importance of each normalized score component. Must be
/// non-negative and sum to exactly 1.
#[derive(Debug, Clone, Deserialize)]
pub struct ScoringWeights {
    pub cap_rate: Decimal,
    pub cash_on_cash: Decimal,
    pub cash_flow: Decimal,
    pub age: Decimal,
}

impl ScoringWeights {
    pub fn total(&self) -> Decimal {
        self.cap_rate + self.cash_on_cash + self.cash_flow + self.age
    }
}

/// Fixed normalization thresholds for the score components.
///
/// A component value at or below its floor normalizes to 0, at or above
/// its target normalizes to 1, and linearly in between.
#[derive(Debug, Clone, Deserialize)]
pub struct ScoreThresholds {
    pub cap_rate_floor: Decimal,
    pub cap_rate_target: Decimal,
    pub cash_on_cash_floor: Decimal,
    pub cash_on_cash_target: Decimal,
    /// Age (in years) at which the age component bottoms out at 0.
    pub max_age_years: u32,
}

/// Score bands that assign the risk tier on the 0-100 scale.
#[derive(Debug, Clone, Deserialize)]
pub struct RiskBands {
    /// Scores at or above this are LOW risk (e.g., 70).
    pub low_min: Decimal,
    /// Scores at or above this (but below `low_min`) are MEDIUM risk
    /// (e.g., 40); everything below is HIGH risk.
    pub medium_min: Decimal,
}

/// Parameters for the negotiation strategist.
#[derive(Debug, Clone, Deserialize)]
pub struct NegotiationConfig {
    pub tier_discounts: TierDiscounts,
    /// Cap rate the market is assumed to price against; candidates
    /// yielding below it justify a deeper discount (e.g., 0.065).
    pub target_cap_rate: Decimal,
    /// How much of the cap-rate shortfall translates into extra
    /// discount off asking (e.g., 0.05 = up to 5 points).
    pub cap_shortfall_weight: Decimal,
    /// The discount factor never drops below this fraction of asking
    /// price (e.g., 0.70).
    pub discount_floor_pct: Decimal,
    /// Opening offer as a fraction of the maximum offer, in (0, 1].
    pub opening_ratio: Decimal,
}

/// Base discount factor applied to the asking price for each risk tier.
#[derive(Debug, Clone, Deserialize)]
pub struct TierDiscounts {
    pub low: Decimal,
    pub medium: Decimal,
    pub high: Decimal,
}

/// Run-level cutoffs and parallelism for the orchestrator.
#[derive(Debug, Clone, Deserialize)]
pub struct RunLimits {
    /// Stop dispatching after this many candidates; the rest are
    /// recorded as cancelled.
    #[serde(default)]
    pub max_candidates: Option<usize>,
    /// Wall-clock budget from run start (e.g., "30s"); candidates not
    /// yet dispatched when it elapses are recorded as cancelled.
    #[serde(default, with = "humantime_serde")]
    pub deadline: Option<Duration>,
    /// Number of candidates evaluated concurrently. 1 runs the batch
    /// sequentially; higher values never change the report's content.
    #[serde(default = "default_concurrency")]
    pub max_concurrency: usize,
}

fn default_concurrency() -> usize {
    1
}

impl Default for RunLimits {
    fn default() -> Self {
        Self {
            max_candidates: None,
            deadline: None,
            max_concurrency: default_concurrency(),
        }
    }
}

impl RunConfig {
    /// Validates cross-field constraints that serde cannot express.
    ///
    /// Run-level configuration errors are fatal: they are reported to the
    /// caller before any candidate is processed.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let f = &self.financing;
        if f.down_payment_pct <= dec!(0) || f.down_payment_pct > dec!(1) {
            return Err(ConfigError::invalid(
                "financing.down_payment_pct",
                "must be in (0, 1]",
            ));
        }
        if f.interest_rate < dec!(0) {
            return Err(ConfigError::invalid(
                "financing.interest_rate",
                "must be non-negative",
            ));
        }
        if f.loan_term_years == 0 {
            return Err(ConfigError::invalid(
                "financing.loan_term_years",
                "must be at least 1",
            ));
        }
        if f.closing_costs < dec!(0) {
            return Err(ConfigError::invalid(
                "financing.closing_costs",
                "must be non-negative",
            ));
        }

        let s = &self.scoring;
        let w = &s.weights;
        if w.cap_rate < dec!(0)
            || w.cash_on_cash < dec!(0)
            || w.cash_flow < dec!(0)
            || w.age < dec!(0)
        {
            return Err(ConfigError::invalid(
                "scoring.weights",
                "must all be non-negative",
            ));
        }
        if w.total() != dec!(1) {
            return Err(ConfigError::invalid(
                "scoring.weights",
                format!("must sum to 1, got {}", w.total()),
            ));
        }
        let t = &s.thresholds;
        if t.cap_rate_target <= t.cap_rate_floor {
            return Err(ConfigError::invalid(
                "scoring.thresholds.cap_rate_target",
                "must exceed cap_rate_floor",
            ));
        }
        if t.cash_on_cash_target <= t.cash_on_cash_floor {
            return Err(ConfigError::invalid(
                "scoring.thresholds.cash_on_cash_target",
                "must exceed cash_on_cash_floor",
            ));
        }
        if t.max_age_years == 0 {
            return Err(ConfigError::invalid(
                "scoring.thresholds.max_age_years",
                "must be at least 1",
            ));
        }
        if s.risk_bands.low_min <= s.risk_bands.medium_min {
            return Err(ConfigError::invalid(
                "scoring.risk_bands.low_min",
                "must exceed medium_min",
            ));
        }

        let n = &self.negotiation;
        if n.discount_floor_pct <= dec!(0) || n.discount_floor_pct >= dec!(1) {
            return Err(ConfigError::invalid(
                "negotiation.discount_floor_pct",
                "must be in (0, 1)",
            ));
        }
        for (name, d) in [
            ("low", n.tier_discounts.low),
            ("medium", n.tier_discounts.medium),
            ("high", n.tier_discounts.high),
        ] {
            if d < n.discount_floor_pct || d > dec!(1) {
                return Err(ConfigError::invalid(
                    "negotiation.tier_discounts",
                    format!("{} must be within [discount_floor_pct, 1]", name),
                ));
            }
        }
        if n.target_cap_rate <= dec!(0) {
            return Err(ConfigError::invalid(
                "negotiation.target_cap_rate",
                "must be positive",
            ));
        }
        if n.cap_shortfall_weight < dec!(0) {
            return Err(ConfigError::invalid(
                "negotiation.cap_shortfall_weight",
                "must be non-negative",
            ));
        }
        if n.opening_ratio <= dec!(0) || n.opening_ratio > dec!(1) {
            return Err(ConfigError::invalid(
                "negotiation.opening_ratio",
                "must be in (0, 1]",
            ));
        }

        if self.run.max_concurrency == 0 {
            return Err(ConfigError::invalid(
                "run.max_concurrency",
                "must be at least 1",
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A known-good configuration used as the baseline for the
    /// validation tests below.
    pub(crate) fn baseline() -> RunConfig {
        RunConfig {
            search: SearchCriteria::default(),
            financing: Financing {
                down_payment_pct: dec!(0.20),
                interest_rate: dec!(0.055),
                loan_term_years: 30,
                closing_costs: dec!(5000),
                appreciation_pct: dec!(0.03),
            },
            scoring: ScoringConfig {
                weights: ScoringWeights {
                    cap_rate: dec!(0.35),
                    cash_on_cash: dec!(0.35),
                    cash_flow: dec!(0.15),
                    age: dec!(0.15),
                },
                thresholds: ScoreThresholds {
                    cap_rate_floor: dec!(0.02),
                    cap_rate_target: dec!(0.08),
                    cash_on_cash_floor: dec!(0.02),
                    cash_on_cash_target: dec!(0.08),
                    max_age_years: 40,
                },
                risk_bands: RiskBands {
                    low_min: dec!(70),
                    medium_min: dec!(40),
                },
                valuation_year: 2024,
            },
            negotiation: NegotiationConfig {
                tier_discounts: TierDiscounts {
                    low: dec!(0.96),
                    medium: dec!(0.92),
                    high: dec!(0.85),
                },
                target_cap_rate: dec!(0.065),
                cap_shortfall_weight: dec!(0.05),
                discount_floor_pct: dec!(0.70),
                opening_ratio: dec!(0.95),
            },
            run: RunLimits::default(),
        }
    }

    #[test]
    fn baseline_config_is_valid() {
        assert!(baseline().validate().is_ok());
    }

    #[test]
    fn weights_must_sum_to_one() {
        let mut cfg = baseline();
        cfg.scoring.weights.cap_rate = dec!(0.50);
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::Invalid { field: "scoring.weights", reason }) if reason.contains("sum to 1")
        ));
    }

    #[test]
    fn validation_errors_name_the_offending_field() {
        let mut cfg = baseline();
        cfg.negotiation.opening_ratio = dec!(0);
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("negotiation.opening_ratio"));
    }

    #[test]
    fn down_payment_must_be_a_fraction() {
        let mut cfg = baseline();
        cfg.financing.down_payment_pct = dec!(20);
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn tier_discount_below_floor_is_rejected() {
        let mut cfg = baseline();
        cfg.negotiation.tier_discounts.high = dec!(0.50);
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn risk_bands_must_be_ordered() {
        let mut cfg = baseline();
        cfg.scoring.risk_bands.low_min = dec!(30);
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn zero_concurrency_is_rejected() {
        let mut cfg = baseline();
        cfg.run.max_concurrency = 0;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn full_config_parses_from_toml() {
        let toml = r#"
            [search]
            location = "Austin"
            max_price = 500000
            property_types = ["SingleFamily", "Townhouse"]

            [financing]
            down_payment_pct = 0.20
            interest_rate = 0.055
            loan_term_years = 30
            closing_costs = 5000
            appreciation_pct = 0.03

            [scoring]
            valuation_year = 2024

            [scoring.weights]
            cap_rate = 0.35
            cash_on_cash = 0.35
            cash_flow = 0.15
            age = 0.15

            [scoring.thresholds]
            cap_rate_floor = 0.02
            cap_rate_target = 0.08
            cash_on_cash_floor = 0.02
            cash_on_cash_target = 0.08
            max_age_years = 40

            [scoring.risk_bands]
            low_min = 70
            medium_min = 40

            [negotiation]
            target_cap_rate = 0.065
            cap_shortfall_weight = 0.05
            discount_floor_pct = 0.70
            opening_ratio = 0.95

            [negotiation.tier_discounts]
            low = 0.96
            medium = 0.92
            high = 0.85

            [run]
            max_candidates = 10
            deadline = "30s"
            max_concurrency = 4
        "#;

        let cfg: RunConfig = config::Config::builder()
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()
            .expect("builds")
            .try_deserialize()
            .expect("deserializes");

        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.search.location.as_deref(), Some("Austin"));
        assert_eq!(cfg.run.max_candidates, Some(10));
        assert_eq!(cfg.run.deadline, Some(Duration::from_secs(30)));
        assert_eq!(cfg.run.max_concurrency, 4);
    }
}
