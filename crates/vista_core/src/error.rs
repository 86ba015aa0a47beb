//! Error types for Vista

use thiserror::Error;

/// Errors surfaced by Vista controllers
#[derive(Error, Debug, Clone, PartialEq)]
pub enum VistaError {
    /// Requested carousel page does not exist
    #[error("page {index} is out of range (page count {page_count})")]
    OutOfRange { index: usize, page_count: usize },

    /// Carousel page size of zero
    #[error("page size must be at least 1")]
    InvalidPageSize,

    /// Mapper breakpoints violate their preconditions
    #[error("invalid breakpoints: {0}")]
    InvalidBreakpoints(String),

    /// Root margin string could not be parsed
    #[error("invalid root margin: {0}")]
    InvalidMargin(String),

    /// Configuration could not be loaded
    #[error("configuration error: {0}")]
    Config(String),
}

impl From<toml::de::Error> for VistaError {
    fn from(err: toml::de::Error) -> Self {
        VistaError::Config(err.to_string())
    }
}

/// Result type for Vista operations
pub type Result<T> = std::result::Result<T, VistaError>;
