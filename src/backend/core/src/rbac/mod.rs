//! Authorization and order-lifecycle policy.
//!
//! This module provides:
//! - **Models**: Role, Resource, Action, OrderStatus, User and Order
//! - **Roles**: informational rank table and the universal-override roles
//! - **Policy**: resource-action and order-edit decisions
//! - **Transitions**: the ordered order-status transition table
//! - **Permissions**: a per-user handle over all of the above
//!
//! # Usage
//!
//! ```rust
//! use orderdesk_core::rbac::{
//!     can_perform, can_transition, Action, OrderStatus, Resource, Role, User,
//! };
//!
//! let clerk = User::new("u-17", Role::Sales);
//!
//! assert!(can_perform(Some(&clerk), Resource::Quotes, Action::Create));
//! assert!(can_transition(Some(&clerk), OrderStatus::Pending, OrderStatus::Cancelled));
//! assert!(!can_transition(Some(&clerk), OrderStatus::Approved, OrderStatus::Cancelled));
//! ```

pub mod models;
pub mod permissions;
pub mod policy;
pub mod roles;
pub mod transitions;

pub use models::{Action, Order, OrderStatus, Resource, Role, User, UserId};
pub use permissions::Permissions;
pub use policy::{
    can_edit_order, can_perform, enforce_edit, enforce_perform, enforce_transition,
    evaluate_edit, evaluate_perform, permission_matrix, PolicyDecision, PolicyError,
};
pub use roles::ROLE_HIERARCHY;
pub use transitions::{
    allowed_transitions, can_transition, evaluate_transition, matching_rule, TransitionRule,
    TRANSITION_RULES,
};
