use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum NegotiationError {
    #[error("The asking price ({0}) is zero or negative; no offer can be derived")]
    InvalidAskingPrice(Decimal),

    #[error("Negotiation parameters from configuration are invalid: {0}")]
    InvalidParameters(String),
}
