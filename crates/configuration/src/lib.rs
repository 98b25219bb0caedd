use crate::error::ConfigError;
use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use settings::{
    Financing, NegotiationConfig, RiskBands, RunConfig, RunLimits, ScoreThresholds,
    ScoringConfig, ScoringWeights, SearchCriteria, TierDiscounts,
};

/// Loads a run configuration from a TOML file.
///
/// This function is the primary entry point for this crate. It reads the
/// configuration file, deserializes it into our strongly-typed `RunConfig`
/// struct, validates the cross-field constraints, and returns it. Every run
/// of the pipeline is fully parameterized by the returned object; nothing is
/// read from process-wide state afterwards.
pub fn load_config(path: &Path) -> Result<RunConfig, ConfigError> {
    let builder = config::Config::builder()
        .add_source(config::File::from(path))
        .build()?;

    let run_config = builder.try_deserialize::<RunConfig>()?;
    run_config.validate()?;

    Ok(run_config)
}
