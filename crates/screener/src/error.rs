use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScreenerError {
    #[error("Invalid search criteria: min_price ({min}) exceeds max_price ({max})")]
    InvalidCriteria { min: Decimal, max: Decimal },
}
