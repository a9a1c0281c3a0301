//! Crate-wide error handling
//!
//! Every fallible operation returns `GalaxyResult`. Per-frame failures are
//! logged and swallowed by the callers; only initialization errors travel
//! back to the host.

/// Errors produced while configuring, initializing or rendering the field
#[derive(Debug, thiserror::Error)]
pub enum GalaxyError {
    #[error("Invalid configuration: {field} {reason}")]
    InvalidConfig { field: &'static str, reason: String },

    #[error("Failed to read configuration: {0}")]
    ConfigIo(#[from] std::io::Error),

    #[error("Failed to parse TOML configuration: {0}")]
    ConfigToml(#[from] toml::de::Error),

    #[error("Failed to parse JSON configuration: {0}")]
    ConfigJson(#[from] serde_json::Error),

    #[error("Sprite raster unavailable: {reason}")]
    SpriteUnavailable { reason: String },

    #[error("No compatible GPU adapter found")]
    AdapterUnavailable,

    #[error("GPU operation '{operation}' failed: {message}")]
    Gpu { operation: String, message: String },

    #[error("Surface is not configured for rendering")]
    SurfaceUnavailable,

    #[error("Platform error: {0}")]
    Platform(String),
}

/// Type alias for results within the crate
pub type GalaxyResult<T> = Result<T, GalaxyError>;

/// Helper trait for attaching a GPU operation name to foreign errors
pub trait GpuErrorContext<T> {
    fn gpu_context(self, operation: &str) -> GalaxyResult<T>;
}

impl<T, E> GpuErrorContext<T> for Result<T, E>
where
    E: std::fmt::Display,
{
    fn gpu_context(self, operation: &str) -> GalaxyResult<T> {
        self.map_err(|e| gpu_operation_error(operation, e))
    }
}

/// Create a GPU operation error
pub fn gpu_operation_error(operation: &str, error: impl std::fmt::Display) -> GalaxyError {
    GalaxyError::Gpu {
        operation: operation.to_string(),
        message: error.to_string(),
    }
}

/// Create a configuration validation error
pub fn invalid_config(field: &'static str, reason: impl Into<String>) -> GalaxyError {
    GalaxyError::InvalidConfig {
        field,
        reason: reason.into(),
    }
}
