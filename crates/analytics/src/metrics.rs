use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The standard investment metrics derived from a single property.
///
/// This struct is the output of the `MetricsEngine` and the data transfer
/// object for per-candidate figures throughout the pipeline. It is always
/// recomputed from its source `Property` and never persisted independently.
///
/// All rates (`cap_rate`, `cash_on_cash`, `roi`) are fractions: 0.084 means
/// 8.4%. All other fields are dollar amounts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvestmentMetrics {
    // I. Income
    pub gross_annual_rent: Decimal,
    pub annual_operating_expenses: Decimal,
    /// Net operating income: annual rent minus annual operating expenses,
    /// excluding debt service.
    pub noi: Decimal,
    pub cap_rate: Decimal,

    // II. Financing
    pub down_payment: Decimal,
    pub loan_amount: Decimal,
    pub monthly_debt_service: Decimal,
    /// Down payment plus closing costs.
    pub total_cash_invested: Decimal,

    // III. Returns
    pub monthly_cash_flow: Decimal,
    pub annual_cash_flow: Decimal,
    pub cash_on_cash: Decimal,
    pub roi: Decimal,
}
