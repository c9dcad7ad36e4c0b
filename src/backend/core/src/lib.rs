//! # OrderDesk Core
//!
//! Authorization and order-lifecycle policy for the OrderDesk B2B
//! order-management system.
//!
//! ## Architecture
//!
//! - **RBAC**: roles, resources, actions and the pure decision functions
//!   `can_perform`, `can_transition` and `can_edit_order`
//! - **Telemetry**: structured logging setup for binaries
//! - **Config**: layered file and environment configuration
//!
//! The decision functions own no state, do no I/O and never fail: missing
//! or unrecognized input is denied.

pub mod config;
pub mod error;
pub mod rbac;
pub mod telemetry;

pub use error::{OrderDeskError, Result};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::error::{OrderDeskError, Result};
    pub use crate::rbac::{
        allowed_transitions, can_edit_order, can_perform, can_transition, enforce_edit,
        enforce_perform, enforce_transition, evaluate_edit, evaluate_perform,
        evaluate_transition, permission_matrix, Action, Order, OrderStatus, Permissions,
        PolicyDecision, PolicyError, Resource, Role, User, UserId,
    };
}
