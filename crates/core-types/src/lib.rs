pub mod enums;
pub mod error;
pub mod format;
pub mod structs;

// Re-export the core types to provide a clean public API.
pub use enums::{ConfidenceTier, PropertyType, RiskTier};
pub use error::CoreError;
pub use format::as_percent;
pub use structs::Property;
