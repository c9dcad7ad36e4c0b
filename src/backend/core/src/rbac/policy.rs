//! Policy engine for resource-action and order-edit decisions.
//!
//! The engine answers two questions:
//! "Can this user perform action Y on resource Z?" and
//! "Can this user edit line items of this order right now?"
//!
//! Status transitions live in [`super::transitions`]. Every decision is a
//! pure function of its inputs. A missing user or a user without a role is
//! always denied.

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, warn};

use super::models::{Action, Order, OrderStatus, Resource, Role, User};
use super::transitions::evaluate_transition;

// ═══════════════════════════════════════════════════════════════════════════════
// Errors
// ═══════════════════════════════════════════════════════════════════════════════

/// Denials surfaced by the `enforce_*` functions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PolicyError {
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Status change denied: {0}")]
    TransitionDenied(String),

    #[error("Order cannot be edited: {0}")]
    EditDenied(String),
}

impl PolicyError {
    /// Stable machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::PermissionDenied(_) => "FORBIDDEN",
            Self::TransitionDenied(_) => "INVALID_TRANSITION",
            Self::EditDenied(_) => "ORDER_LOCKED",
        }
    }

    pub fn reason(&self) -> &str {
        match self {
            Self::PermissionDenied(r) | Self::TransitionDenied(r) | Self::EditDenied(r) => r,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Decision
// ═══════════════════════════════════════════════════════════════════════════════

/// Result of a policy evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "decision", content = "reason", rename_all = "snake_case")]
pub enum PolicyDecision {
    /// The action is allowed.
    Allow,
    /// The action is denied, with a reason.
    Deny(String),
}

impl PolicyDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allow)
    }

    pub fn is_denied(&self) -> bool {
        matches!(self, Self::Deny(_))
    }

    pub(crate) fn from_bool(allowed: bool, deny_reason: impl FnOnce() -> String) -> Self {
        if allowed {
            Self::Allow
        } else {
            Self::Deny(deny_reason())
        }
    }
}

/// The role decisions are made for, or the denial for a missing user/role.
pub(crate) fn acting_role(user: Option<&User>) -> Result<Role, PolicyDecision> {
    match user {
        None => Err(PolicyDecision::Deny("no authenticated user".to_string())),
        Some(user) => user.role.ok_or_else(|| {
            PolicyDecision::Deny(format!("user '{}' has no role assigned", user.id))
        }),
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Resource rules
// ═══════════════════════════════════════════════════════════════════════════════

fn users_rule(role: Role, action: Action) -> bool {
    role == Role::Admin && action != Action::Delete
}

fn products_rule(role: Role, action: Action) -> bool {
    match action {
        Action::Read => true,
        Action::ViewCost => role == Role::Admin,
        _ => role == Role::Admin,
    }
}

fn inventory_rule(role: Role, _action: Action) -> bool {
    matches!(role, Role::Admin | Role::Warehouse)
}

// Row-level filtering of readable orders is the caller's job.
fn orders_rule(role: Role, action: Action) -> bool {
    match action {
        Action::Read => true,
        Action::Create => matches!(role, Role::Sales | Role::Admin | Role::Customer),
        Action::Update => matches!(role, Role::Sales | Role::Admin | Role::Warehouse),
        Action::Approve => role == Role::Admin,
        Action::Dispatch => matches!(role, Role::Warehouse | Role::Admin),
        _ => false,
    }
}

fn quotes_rule(role: Role, action: Action) -> bool {
    match action {
        Action::Read | Action::Create => matches!(role, Role::Sales | Role::Admin),
        _ => role == Role::Admin,
    }
}

fn customers_rule(role: Role, action: Action) -> bool {
    match action {
        Action::Read => true,
        Action::Create | Action::Update => matches!(role, Role::Sales | Role::Admin),
        _ => false,
    }
}

fn payments_rule(role: Role, action: Action) -> bool {
    match action {
        Action::Create => matches!(role, Role::Sales | Role::Customer | Role::Admin),
        Action::VerifyPayment => role == Role::Admin,
        _ => matches!(role, Role::Admin | Role::Sales),
    }
}

/// Resource rule for a role that is not a universal override.
fn resource_rule(role: Role, resource: Resource, action: Action) -> bool {
    match resource {
        Resource::Users => users_rule(role, action),
        Resource::Products => products_rule(role, action),
        Resource::Inventory => inventory_rule(role, action),
        Resource::Orders => orders_rule(role, action),
        Resource::Quotes => quotes_rule(role, action),
        Resource::Customers => customers_rule(role, action),
        Resource::Payments => payments_rule(role, action),
        // Settings only open to the universal overrides.
        Resource::Settings => false,
        Resource::Commissions | Resource::Reports => false,
    }
}

fn role_may_perform(role: Role, resource: Resource, action: Action) -> bool {
    role.is_universal_override() || resource_rule(role, resource, action)
}

// ═══════════════════════════════════════════════════════════════════════════════
// Resource-action authorization
// ═══════════════════════════════════════════════════════════════════════════════

/// Whether `user` may perform `action` on `resource`.
pub fn can_perform(user: Option<&User>, resource: Resource, action: Action) -> bool {
    user.and_then(|u| u.role)
        .is_some_and(|role| role_may_perform(role, resource, action))
}

/// [`can_perform`] with a reason on denial.
pub fn evaluate_perform(user: Option<&User>, resource: Resource, action: Action) -> PolicyDecision {
    let role = match acting_role(user) {
        Ok(role) => role,
        Err(denied) => return denied,
    };
    PolicyDecision::from_bool(role_may_perform(role, resource, action), || {
        format!("role '{role}' may not {action} {resource}")
    })
}

/// Full resource x action grid for `role`, resources outermost.
pub fn permission_matrix(role: Role) -> Vec<(Resource, Action, bool)> {
    Resource::ALL
        .into_iter()
        .flat_map(|resource| {
            Action::ALL
                .into_iter()
                .map(move |action| (resource, action, role_may_perform(role, resource, action)))
        })
        .collect()
}

// ═══════════════════════════════════════════════════════════════════════════════
// Order-edit authorization
// ═══════════════════════════════════════════════════════════════════════════════

/// Editing line items is gated separately from status changes: admin may
/// always edit, even though its status changes are restricted.
fn role_may_edit(role: Role, status: OrderStatus) -> bool {
    match role {
        Role::Superadmin | Role::Management | Role::Admin => true,
        Role::Warehouse => matches!(status, OrderStatus::Approved | OrderStatus::InPreparation),
        Role::Sales | Role::Customer => status == OrderStatus::Pending,
    }
}

/// Whether `user` may edit `order` in its current status.
pub fn can_edit_order(user: Option<&User>, order: &Order) -> bool {
    user.and_then(|u| u.role)
        .is_some_and(|role| role_may_edit(role, order.status))
}

/// [`can_edit_order`] with a reason on denial.
pub fn evaluate_edit(user: Option<&User>, order: &Order) -> PolicyDecision {
    let role = match acting_role(user) {
        Ok(role) => role,
        Err(denied) => return denied,
    };
    PolicyDecision::from_bool(role_may_edit(role, order.status), || {
        format!("role '{role}' may not edit an order in status {}", order.status)
    })
}

// ═══════════════════════════════════════════════════════════════════════════════
// Enforcement
// ═══════════════════════════════════════════════════════════════════════════════

/// `Ok(())` if allowed, `Err(PolicyError::PermissionDenied)` otherwise.
pub fn enforce_perform(
    user: Option<&User>,
    resource: Resource,
    action: Action,
) -> Result<(), PolicyError> {
    let user_id = user.map(|u| u.id.as_str()).unwrap_or("<none>");
    match evaluate_perform(user, resource, action) {
        PolicyDecision::Allow => {
            debug!(user_id, %resource, %action, "Permission granted");
            Ok(())
        }
        PolicyDecision::Deny(reason) => {
            warn!(user_id, %resource, %action, %reason, "Permission denied");
            Err(PolicyError::PermissionDenied(reason))
        }
    }
}

/// `Ok(())` if the status change is allowed, `Err(PolicyError::TransitionDenied)` otherwise.
pub fn enforce_transition(
    user: Option<&User>,
    current: OrderStatus,
    new: OrderStatus,
) -> Result<(), PolicyError> {
    let user_id = user.map(|u| u.id.as_str()).unwrap_or("<none>");
    match evaluate_transition(user, current, new) {
        PolicyDecision::Allow => {
            debug!(user_id, from = %current, to = %new, "Status change granted");
            Ok(())
        }
        PolicyDecision::Deny(reason) => {
            warn!(user_id, from = %current, to = %new, %reason, "Status change denied");
            Err(PolicyError::TransitionDenied(reason))
        }
    }
}

/// `Ok(())` if the order may be edited, `Err(PolicyError::EditDenied)` otherwise.
pub fn enforce_edit(user: Option<&User>, order: &Order) -> Result<(), PolicyError> {
    let user_id = user.map(|u| u.id.as_str()).unwrap_or("<none>");
    match evaluate_edit(user, order) {
        PolicyDecision::Allow => {
            debug!(user_id, order_id = %order.id, status = %order.status, "Order edit granted");
            Ok(())
        }
        PolicyDecision::Deny(reason) => {
            warn!(user_id, order_id = %order.id, status = %order.status, %reason, "Order edit denied");
            Err(PolicyError::EditDenied(reason))
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════════════
