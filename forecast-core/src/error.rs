use thiserror::Error;

/// Every failure the forecast client can surface.
///
/// Messages carry enough context to diagnose a failed request, but never the API key itself.
#[derive(Debug, Error)]
pub enum ForecastError {
    /// The client was constructed with an unusable credential or endpoint.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Caller-supplied input was rejected before any network call.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The provider could not be reached, refused the request, or answered with an
    /// unexpected payload.
    #[error("Provider error: {0}")]
    Provider(String),
}

impl ForecastError {
    pub fn is_configuration(&self) -> bool {
        matches!(self, ForecastError::Configuration(_))
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, ForecastError::Validation(_))
    }

    pub fn is_provider(&self) -> bool {
        matches!(self, ForecastError::Provider(_))
    }
}

pub type Result<T> = std::result::Result<T, ForecastError>;
