//! Telemetry: structured logging for the policy engine and its tools.
//!
//! The library itself only emits `tracing` events. Binaries call
//! [`init_logging`] once at startup to install a subscriber.
//!
//! # Example
//!
//! ```rust,no_run
//! use orderdesk_core::telemetry::{init_logging, LoggingConfig};
//!
//! init_logging(&LoggingConfig::default()).expect("Failed to initialize logging");
//! ```

pub mod logging;

pub use logging::{init_logging, LogFormat, LoggingConfig};
