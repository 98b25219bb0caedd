use crate::error::NegotiationError;
use crate::strategy::NegotiationStrategy;
use analytics::InvestmentMetrics;
use configuration::NegotiationConfig;
use core_types::{as_percent, ConfidenceTier, Property, RiskTier};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use scoring::Score;
use tracing::debug;

/// Derives offer prices and talking points from a candidate's analysis.
///
/// The discount off asking is monotone in both inputs: a riskier tier or a
/// lower cap rate always produces an equal or deeper discount, floored at
/// the configured fraction of the asking price.
#[derive(Debug, Clone)]
pub struct DealStrategist {
    config: NegotiationConfig,
}

impl DealStrategist {
    /// Creates a new `DealStrategist` with the given configuration parameters.
    pub fn new(config: NegotiationConfig) -> Result<Self, NegotiationError> {
        if config.discount_floor_pct <= dec!(0) || config.discount_floor_pct >= dec!(1) {
            return Err(NegotiationError::InvalidParameters(
                "discount_floor_pct must be in (0, 1)".to_string(),
            ));
        }
        for (name, d) in [
            ("low", config.tier_discounts.low),
            ("medium", config.tier_discounts.medium),
            ("high", config.tier_discounts.high),
        ] {
            if d < config.discount_floor_pct || d > dec!(1) {
                return Err(NegotiationError::InvalidParameters(format!(
                    "tier_discounts.{} must be within [discount_floor_pct, 1]",
                    name
                )));
            }
        }
        if config.target_cap_rate <= dec!(0) {
            return Err(NegotiationError::InvalidParameters(
                "target_cap_rate must be positive".to_string(),
            ));
        }
        if config.cap_shortfall_weight < dec!(0) {
            return Err(NegotiationError::InvalidParameters(
                "cap_shortfall_weight must be non-negative".to_string(),
            ));
        }
        if config.opening_ratio <= dec!(0) || config.opening_ratio > dec!(1) {
            return Err(NegotiationError::InvalidParameters(
                "opening_ratio must be in (0, 1]".to_string(),
            ));
        }
        Ok(Self { config })
    }

    /// Builds the negotiation recommendation for one candidate.
    pub fn build(
        &self,
        property: &Property,
        metrics: &InvestmentMetrics,
        score: &Score,
    ) -> Result<NegotiationStrategy, NegotiationError> {
        if property.price <= Decimal::ZERO {
            return Err(NegotiationError::InvalidAskingPrice(property.price));
        }

        let discount_factor = self.discount_factor(score.risk_tier, metrics.cap_rate);
        let max_offer = (property.price * discount_factor).round_dp(2);
        let opening_offer = (max_offer * self.config.opening_ratio)
            .round_dp(2)
            .min(max_offer);

        let talking_points = self.talking_points(metrics, score, max_offer, opening_offer);
        let confidence = ConfidenceTier::from_risk(score.risk_tier);

        debug!(
            property_id = %property.id,
            %discount_factor,
            %max_offer,
            %opening_offer,
            "derived negotiation strategy"
        );

        Ok(NegotiationStrategy {
            max_offer,
            opening_offer,
            discount_factor,
            talking_points,
            confidence,
        })
    }

    /// Base discount by risk tier, deepened by any cap-rate shortfall
    /// against the market target, clamped to the configured floor.
    fn discount_factor(&self, tier: RiskTier, cap_rate: Decimal) -> Decimal {
        let base = match tier {
            RiskTier::Low => self.config.tier_discounts.low,
            RiskTier::Medium => self.config.tier_discounts.medium,
            RiskTier::High => self.config.tier_discounts.high,
        };

        let shortfall = ((self.config.target_cap_rate - cap_rate)
            / self.config.target_cap_rate)
            .clamp(Decimal::ZERO, Decimal::ONE);

        (base - self.config.cap_shortfall_weight * shortfall)
            .clamp(self.config.discount_floor_pct, Decimal::ONE)
    }

    /// The fixed rule table behind the talking points. Each rule fires on a
    /// deterministic trigger and appends in a fixed order, so identical
    /// analyses always argue the same case in the same words.
    fn talking_points(
        &self,
        metrics: &InvestmentMetrics,
        score: &Score,
        max_offer: Decimal,
        opening_offer: Decimal,
    ) -> Vec<String> {
        let mut points = Vec::new();

        let cap_pct = as_percent(metrics.cap_rate);
        let target_pct = as_percent(self.config.target_cap_rate);
        if metrics.cap_rate < self.config.target_cap_rate {
            points.push(format!(
                "Cap rate of {}% trails the {}% market target; current rents do not support the asking price.",
                cap_pct, target_pct
            ));
        } else {
            points.push(format!(
                "Cap rate of {}% meets the {}% market target, supporting a clean, quick close at the offered price.",
                cap_pct, target_pct
            ));
        }

        if metrics.monthly_cash_flow < Decimal::ZERO {
            points.push(format!(
                "The property carries negative cash flow of {} per month under standard financing; the price must absorb that drag.",
                metrics.monthly_cash_flow.round_dp(2)
            ));
        }

        if score.risk_tier == RiskTier::High {
            points.push(format!(
                "Composite deal score of {} places this in the highest risk tier; the offer reflects that risk premium.",
                score.value
            ));
        }

        points.push(format!(
            "Opening at {} with room to {} keeps the projected returns within the investment mandate.",
            opening_offer, max_offer
        ));

        points
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use configuration::TierDiscounts;
    use core_types::PropertyType;
    use scoring::ScoreBreakdown;

    fn config() -> NegotiationConfig {
        NegotiationConfig {
            tier_discounts: TierDiscounts {
                low: dec!(0.96),
                medium: dec!(0.92),
                high: dec!(0.85),
            },
            target_cap_rate: dec!(0.065),
            cap_shortfall_weight: dec!(0.05),
            discount_floor_pct: dec!(0.70),
            opening_ratio: dec!(0.95),
        }
    }

    fn listing(price: Decimal) -> Property {
        Property {
            id: "prop_001".to_string(),
            address: "123 Main Street".to_string(),
            city: "Austin".to_string(),
            state: "TX".to_string(),
            property_type: PropertyType::SingleFamily,
            price,
            sqft: 1600,
            monthly_rent: dec!(1800),
            monthly_expenses: dec!(400),
            year_built: 2015,
        }
    }

    fn metrics(cap_rate: Decimal, monthly_cash_flow: Decimal) -> InvestmentMetrics {
        InvestmentMetrics {
            gross_annual_rent: dec!(21600),
            annual_operating_expenses: dec!(4800),
            noi: dec!(16800),
            cap_rate,
            down_payment: dec!(40000),
            loan_amount: dec!(160000),
            monthly_debt_service: dec!(900),
            total_cash_invested: dec!(45000),
            monthly_cash_flow,
            annual_cash_flow: monthly_cash_flow * dec!(12),
            cash_on_cash: dec!(0.05),
            roi: dec!(0.08),
        }
    }

    fn score(value: Decimal, risk_tier: RiskTier) -> Score {
        Score {
            value,
            risk_tier,
            breakdown: ScoreBreakdown {
                cap_rate: dec!(0.5),
                cash_on_cash: dec!(0.5),
                cash_flow: Decimal::ONE,
                age: dec!(0.5),
            },
        }
    }

    #[test]
    fn offer_ordering_invariant_holds_across_tiers_and_cap_rates() {
        let strategist = DealStrategist::new(config()).unwrap();
        let p = listing(dec!(450000));
        for tier in [RiskTier::Low, RiskTier::Medium, RiskTier::High] {
            for cap in [dec!(0.00), dec!(0.03), dec!(0.065), dec!(0.10)] {
                let s = strategist
                    .build(&p, &metrics(cap, dec!(300)), &score(dec!(55), tier))
                    .unwrap();
                assert!(s.opening_offer <= s.max_offer, "opening exceeded max");
                assert!(s.max_offer <= p.price, "max exceeded asking");
            }
        }
    }

    #[test]
    fn riskier_tiers_discount_deeper() {
        let strategist = DealStrategist::new(config()).unwrap();
        let p = listing(dec!(450000));
        let m = metrics(dec!(0.07), dec!(300));
        let low = strategist.build(&p, &m, &score(dec!(80), RiskTier::Low)).unwrap();
        let medium = strategist.build(&p, &m, &score(dec!(55), RiskTier::Medium)).unwrap();
        let high = strategist.build(&p, &m, &score(dec!(20), RiskTier::High)).unwrap();
        assert!(low.max_offer > medium.max_offer);
        assert!(medium.max_offer > high.max_offer);
    }

    #[test]
    fn lower_cap_rates_discount_deeper() {
        let strategist = DealStrategist::new(config()).unwrap();
        let p = listing(dec!(450000));
        let tier = score(dec!(55), RiskTier::Medium);
        let at_target = strategist
            .build(&p, &metrics(dec!(0.065), dec!(300)), &tier)
            .unwrap();
        let below_target = strategist
            .build(&p, &metrics(dec!(0.02), dec!(300)), &tier)
            .unwrap();
        assert!(below_target.max_offer < at_target.max_offer);
    }

    #[test]
    fn discount_never_pierces_the_floor() {
        let mut cfg = config();
        // An aggressive shortfall weight that would otherwise push the
        // factor well below the floor.
        cfg.cap_shortfall_weight = dec!(0.50);
        cfg.tier_discounts.high = dec!(0.75);
        let strategist = DealStrategist::new(cfg).unwrap();
        let p = listing(dec!(450000));
        let s = strategist
            .build(&p, &metrics(dec!(0), dec!(-100)), &score(dec!(10), RiskTier::High))
            .unwrap();
        assert_eq!(s.discount_factor, dec!(0.70));
        assert_eq!(s.max_offer, dec!(315000.00));
    }

    #[test]
    fn non_positive_asking_price_is_rejected() {
        let strategist = DealStrategist::new(config()).unwrap();
        let p = listing(dec!(0));
        assert_eq!(
            strategist.build(&p, &metrics(dec!(0.05), dec!(100)), &score(dec!(50), RiskTier::Medium)),
            Err(NegotiationError::InvalidAskingPrice(dec!(0)))
        );
    }

    #[test]
    fn rule_table_fires_in_fixed_order() {
        let strategist = DealStrategist::new(config()).unwrap();
        let p = listing(dec!(450000));
        let s = strategist
            .build(
                &p,
                &metrics(dec!(0.02), dec!(-150)),
                &score(dec!(20), RiskTier::High),
            )
            .unwrap();

        assert_eq!(s.talking_points.len(), 4);
        assert!(s.talking_points[0].contains("trails"));
        assert!(s.talking_points[1].contains("negative"));
        assert!(s.talking_points[2].contains("risk tier"));
        assert!(s.talking_points[3].contains("Opening at"));
        assert_eq!(s.confidence, ConfidenceTier::Low);
    }

    #[test]
    fn healthy_deal_argues_for_a_quick_close() {
        let strategist = DealStrategist::new(config()).unwrap();
        let p = listing(dec!(450000));
        let s = strategist
            .build(
                &p,
                &metrics(dec!(0.08), dec!(400)),
                &score(dec!(85), RiskTier::Low),
            )
            .unwrap();

        assert_eq!(s.talking_points.len(), 2);
        assert!(s.talking_points[0].contains("meets"));
        assert_eq!(s.confidence, ConfidenceTier::High);
    }

    #[test]
    fn opening_ratio_of_one_opens_at_the_max_offer() {
        let mut cfg = config();
        cfg.opening_ratio = dec!(1);
        let strategist = DealStrategist::new(cfg).unwrap();
        let p = listing(dec!(450000));
        let s = strategist
            .build(&p, &metrics(dec!(0.07), dec!(300)), &score(dec!(80), RiskTier::Low))
            .unwrap();
        assert_eq!(s.opening_offer, s.max_offer);
    }
}
