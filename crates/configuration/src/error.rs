use thiserror::Error;

/// Errors raised while loading or validating a run configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to load run configuration: {0}")]
    Load(#[from] config::ConfigError),

    /// A cross-field constraint failed. `field` is the TOML path of the
    /// offending setting (e.g., `scoring.weights`), so a bad config file
    /// can be corrected without reading the source.
    #[error("invalid run configuration: {field} {reason}")]
    Invalid { field: &'static str, reason: String },
}

impl ConfigError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        ConfigError::Invalid {
            field,
            reason: reason.into(),
        }
    }
}
