use serde::{Deserialize, Serialize};
use std::fmt;

/// The category of a listed property, used for filtering candidate inventory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PropertyType {
    SingleFamily,
    Townhouse,
    Condo,
    MultiFamily,
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PropertyType::SingleFamily => "Single Family",
            PropertyType::Townhouse => "Townhouse",
            PropertyType::Condo => "Condo",
            PropertyType::MultiFamily => "Multi-Family",
        };
        write!(f, "{}", name)
    }
}

/// Risk classification derived from the composite investment score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskTier {
    Low,
    Medium,
    High,
}

impl fmt::Display for RiskTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RiskTier::Low => "LOW",
            RiskTier::Medium => "MEDIUM",
            RiskTier::High => "HIGH",
        };
        write!(f, "{}", name)
    }
}

/// How confident the strategist is that the recommended offer will close.
///
/// Mirrors the risk tier: a low-risk deal supports a high-confidence offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfidenceTier {
    High,
    Medium,
    Low,
}

impl ConfidenceTier {
    /// Maps a risk classification to the offer confidence it supports.
    pub fn from_risk(tier: RiskTier) -> Self {
        match tier {
            RiskTier::Low => ConfidenceTier::High,
            RiskTier::Medium => ConfidenceTier::Medium,
            RiskTier::High => ConfidenceTier::Low,
        }
    }
}

impl fmt::Display for ConfidenceTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ConfidenceTier::High => "HIGH",
            ConfidenceTier::Medium => "MEDIUM",
            ConfidenceTier::Low => "LOW",
        };
        write!(f, "{}", name)
    }
}
