//! Error handling for OrderDesk Core.
//!
//! Policy decisions never produce errors: a missing user, a missing role or
//! an unmatched transition is a deny. [`OrderDeskError`] covers everything
//! around the decisions: parsing tags supplied by callers, loading
//! configuration and installing the log subscriber.
//!
//! # Usage
//!
//! ```rust
//! use orderdesk_core::{rbac::Role, OrderDeskError};
//!
//! let err = "owner".parse::<Role>().unwrap_err();
//! assert_eq!(err.code(), "UNKNOWN_ROLE");
//! assert!(matches!(err, OrderDeskError::UnknownRole(_)));
//! ```

use thiserror::Error;

// ═══════════════════════════════════════════════════════════════════════════════
// Result Type Alias
// ═══════════════════════════════════════════════════════════════════════════════

/// A specialized Result type for OrderDesk operations.
pub type Result<T> = std::result::Result<T, OrderDeskError>;

// ═══════════════════════════════════════════════════════════════════════════════
// Error
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Error)]
pub enum OrderDeskError {
    #[error("Unknown role: '{0}'")]
    UnknownRole(String),

    #[error("Unknown resource: '{0}'")]
    UnknownResource(String),

    #[error("Unknown action: '{0}'")]
    UnknownAction(String),

    #[error("Unknown order status: '{0}'")]
    UnknownStatus(String),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Logging initialization failed: {0}")]
    Logging(String),
}

impl OrderDeskError {
    /// Machine-readable code, stable across releases.
    pub fn code(&self) -> &'static str {
        match self {
            Self::UnknownRole(_) => "UNKNOWN_ROLE",
            Self::UnknownResource(_) => "UNKNOWN_RESOURCE",
            Self::UnknownAction(_) => "UNKNOWN_ACTION",
            Self::UnknownStatus(_) => "UNKNOWN_STATUS",
            Self::Config(_) => "CONFIGURATION_ERROR",
            Self::Logging(_) => "LOGGING_ERROR",
        }
    }

    /// Whether the error comes from caller input rather than the environment.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::UnknownRole(_)
                | Self::UnknownResource(_)
                | Self::UnknownAction(_)
                | Self::UnknownStatus(_)
        )
    }
}

impl From<tracing_subscriber::filter::ParseError> for OrderDeskError {
    fn from(err: tracing_subscriber::filter::ParseError) -> Self {
        Self::Logging(err.to_string())
    }
}

impl From<tracing_subscriber::util::TryInitError> for OrderDeskError {
    fn from(err: tracing_subscriber::util::TryInitError) -> Self {
        Self::Logging(err.to_string())
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════════════
