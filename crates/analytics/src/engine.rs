use crate::error::MetricsError;
use crate::metrics::InvestmentMetrics;
use configuration::Financing;
use core_types::Property;
use rust_decimal::{Decimal, MathematicalOps};
use rust_decimal_macros::dec;
use tracing::debug;

const MONTHS_PER_YEAR: Decimal = dec!(12);

/// A stateless calculator for deriving investment metrics from a listing.
///
/// The engine carries only the run's financing assumptions; given the same
/// property it always produces bit-identical metrics.
#[derive(Debug, Clone)]
pub struct MetricsEngine {
    financing: Financing,
}

impl MetricsEngine {
    /// Creates a new `MetricsEngine` with the given financing assumptions.
    ///
    /// Invalid financing is a run-level error: it is rejected here, before
    /// any candidate is processed.
    pub fn new(financing: Financing) -> Result<Self, MetricsError> {
        if financing.down_payment_pct <= dec!(0) || financing.down_payment_pct > dec!(1) {
            return Err(MetricsError::InvalidParameters(
                "down_payment_pct must be in (0, 1]".to_string(),
            ));
        }
        if financing.interest_rate < dec!(0) {
            return Err(MetricsError::InvalidParameters(
                "interest_rate must be non-negative".to_string(),
            ));
        }
        if financing.loan_term_years == 0 {
            return Err(MetricsError::InvalidParameters(
                "loan_term_years must be at least 1".to_string(),
            ));
        }
        if financing.closing_costs < dec!(0) {
            return Err(MetricsError::InvalidParameters(
                "closing_costs must be non-negative".to_string(),
            ));
        }
        Ok(Self { financing })
    }

    /// The main entry point for computing one property's metrics.
    ///
    /// Numeric edge cases like zero rent or a negative cash flow are valid
    /// results, not failures. The only per-candidate failures are malformed
    /// input fields and the division-by-zero guards on cap rate and
    /// cash-on-cash, which are never silently coerced to zero or infinity.
    pub fn calculate(&self, property: &Property) -> Result<InvestmentMetrics, MetricsError> {
        property.validate()?;

        // --- 1. Operating income ---
        let gross_annual_rent = property.monthly_rent * MONTHS_PER_YEAR;
        let annual_operating_expenses = property.monthly_expenses * MONTHS_PER_YEAR;
        let noi = gross_annual_rent - annual_operating_expenses;

        if property.price <= Decimal::ZERO {
            return Err(MetricsError::DivisionByZero("cap_rate".to_string()));
        }
        let cap_rate = noi / property.price;

        // --- 2. Financing ---
        let down_payment = property.price * self.financing.down_payment_pct;
        let loan_amount = property.price - down_payment;
        let monthly_debt_service = self.monthly_debt_service(loan_amount)?;
        let total_cash_invested = down_payment + self.financing.closing_costs;

        // --- 3. Cash flow and returns ---
        let monthly_cash_flow =
            property.monthly_rent - property.monthly_expenses - monthly_debt_service;
        let annual_cash_flow = monthly_cash_flow * MONTHS_PER_YEAR;

        if total_cash_invested <= Decimal::ZERO {
            return Err(MetricsError::DivisionByZero("cash_on_cash".to_string()));
        }
        let cash_on_cash = annual_cash_flow / total_cash_invested;

        let annual_appreciation = total_cash_invested * self.financing.appreciation_pct;
        let roi = (annual_cash_flow + annual_appreciation) / total_cash_invested;

        debug!(
            property_id = %property.id,
            %cap_rate,
            %cash_on_cash,
            "computed investment metrics"
        );

        Ok(InvestmentMetrics {
            gross_annual_rent,
            annual_operating_expenses,
            noi,
            cap_rate,
            down_payment,
            loan_amount,
            monthly_debt_service,
            total_cash_invested,
            monthly_cash_flow,
            annual_cash_flow,
            cash_on_cash,
            roi,
        })
    }

    /// Standard annuity payment on the financed portion of the price.
    ///
    /// `M = L * r(1+r)^n / ((1+r)^n - 1)` with the monthly rate `r` and the
    /// number of payments `n`; a zero-interest loan divides evenly.
    fn monthly_debt_service(&self, loan_amount: Decimal) -> Result<Decimal, MetricsError> {
        let payments = Decimal::from(self.financing.loan_term_years) * MONTHS_PER_YEAR;
        let monthly_rate = self.financing.interest_rate / MONTHS_PER_YEAR;

        if monthly_rate.is_zero() {
            return Ok(loan_amount / payments);
        }

        let periods = i64::from(self.financing.loan_term_years) * 12;
        let growth = (Decimal::ONE + monthly_rate)
            .checked_powi(periods)
            .ok_or_else(|| {
                MetricsError::Calculation(
                    "amortization growth factor overflowed".to_string(),
                )
            })?;

        Ok(loan_amount * (monthly_rate * growth) / (growth - Decimal::ONE))
    }
}
