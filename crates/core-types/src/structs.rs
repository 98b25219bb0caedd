use crate::enums::PropertyType;
use crate::error::CoreError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single listed property as supplied by the inventory source.
///
/// Instances are immutable once loaded; every downstream artifact
/// (metrics, score, strategy) is derived fresh from this record on each
/// pipeline run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    /// Stable identifier from the listing source (e.g., "prop_001").
    pub id: String,
    /// Street address of the listing.
    pub address: String,
    pub city: String,
    pub state: String,
    pub property_type: PropertyType,
    /// The asking price, in dollars.
    pub price: Decimal,
    /// Interior square footage.
    pub sqft: u32,
    /// Estimated gross monthly rental income.
    pub monthly_rent: Decimal,
    /// Estimated monthly operating expenses (taxes, insurance, HOA,
    /// maintenance reserve). Excludes debt service, which is derived
    /// from the financing assumptions at analysis time.
    pub monthly_expenses: Decimal,
    pub year_built: i32,
}

impl Property {
    /// Checks the record for fields that make any analysis meaningless.
    ///
    /// A validation failure isolates this one candidate; it never aborts
    /// the batch. Note that a zero or negative price is deliberately NOT
    /// rejected here: it is handled by the metrics calculator's
    /// division-by-zero guard so the failure is tagged to the right stage.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.id.trim().is_empty() {
            return Err(CoreError::MissingField("id".to_string()));
        }
        if self.monthly_rent < Decimal::ZERO {
            return Err(CoreError::InvalidInput {
                field: "monthly_rent".to_string(),
                reason: format!("must be non-negative, got {}", self.monthly_rent),
            });
        }
        if self.monthly_expenses < Decimal::ZERO {
            return Err(CoreError::InvalidInput {
                field: "monthly_expenses".to_string(),
                reason: format!("must be non-negative, got {}", self.monthly_expenses),
            });
        }
        if self.year_built <= 0 {
            return Err(CoreError::InvalidInput {
                field: "year_built".to_string(),
                reason: format!("must be a positive year, got {}", self.year_built),
            });
        }
        Ok(())
    }
}
