//! Order-status transition rules.
//!
//! A transition is legal only if some rule admits it for the acting role.
//! Validity and authorization are one check: there is no separate status
//! graph. Rules are evaluated in the order of [`TRANSITION_RULES`] and the
//! first rule whose guard matches decides; later rules are never consulted,
//! even if they would have matched too. A pair no rule matches is denied.

use super::models::OrderStatus::{
    self, Approved, Cancelled, Completed, Dispatched, InPreparation, InVerification, Paid, Pending,
};
use super::models::{Role, User};
use super::policy::{acting_role, PolicyDecision};

/// One entry of the ordered transition table.
#[derive(Debug, Clone, Copy)]
pub struct TransitionRule {
    /// Short identifier used in denial reasons.
    pub name: &'static str,
    /// Whether this rule governs `(current, new)`.
    pub guard: fn(OrderStatus, OrderStatus) -> bool,
    /// Whether `role` may make the change, given the current status.
    pub allows: fn(OrderStatus, Role) -> bool,
}

fn approve_guard(current: OrderStatus, new: OrderStatus) -> bool {
    current == Pending && new == Approved
}

fn fulfilment_guard(current: OrderStatus, new: OrderStatus) -> bool {
    matches!(current, Approved | InPreparation)
        && matches!(new, InPreparation | Dispatched | Completed)
}

fn cancel_guard(_current: OrderStatus, new: OrderStatus) -> bool {
    new == Cancelled
}

fn payment_guard(_current: OrderStatus, new: OrderStatus) -> bool {
    matches!(new, Paid | InVerification)
}

fn admin_only(_current: OrderStatus, role: Role) -> bool {
    role == Role::Admin
}

fn warehouse_or_admin(_current: OrderStatus, role: Role) -> bool {
    matches!(role, Role::Warehouse | Role::Admin)
}

// Sales may still withdraw an order nobody has approved yet.
fn cancel_allows(current: OrderStatus, role: Role) -> bool {
    if current == Pending {
        matches!(role, Role::Sales | Role::Admin)
    } else {
        role == Role::Admin
    }
}

/// Transition table, in evaluation order.
pub static TRANSITION_RULES: &[TransitionRule] = &[
    TransitionRule {
        name: "approve",
        guard: approve_guard,
        allows: admin_only,
    },
    TransitionRule {
        name: "fulfilment",
        guard: fulfilment_guard,
        allows: warehouse_or_admin,
    },
    TransitionRule {
        name: "cancel",
        guard: cancel_guard,
        allows: cancel_allows,
    },
    TransitionRule {
        name: "payment",
        guard: payment_guard,
        allows: admin_only,
    },
];

/// The rule governing `(current, new)`, if any.
pub fn matching_rule(current: OrderStatus, new: OrderStatus) -> Option<&'static TransitionRule> {
    TRANSITION_RULES
        .iter()
        .find(|rule| (rule.guard)(current, new))
}

fn role_may_transition(role: Role, current: OrderStatus, new: OrderStatus) -> bool {
    if role.is_universal_override() {
        return true;
    }
    matching_rule(current, new).is_some_and(|rule| (rule.allows)(current, role))
}

/// Whether `user` may move an order from `current` to `new`.
pub fn can_transition(user: Option<&User>, current: OrderStatus, new: OrderStatus) -> bool {
    user.and_then(|u| u.role)
        .is_some_and(|role| role_may_transition(role, current, new))
}

/// [`can_transition`] with a reason on denial.
pub fn evaluate_transition(
    user: Option<&User>,
    current: OrderStatus,
    new: OrderStatus,
) -> PolicyDecision {
    let role = match acting_role(user) {
        Ok(role) => role,
        Err(denied) => return denied,
    };
    if role.is_universal_override() {
        return PolicyDecision::Allow;
    }
    match matching_rule(current, new) {
        None => PolicyDecision::Deny(format!("no rule permits {current} -> {new}")),
        Some(rule) => PolicyDecision::from_bool((rule.allows)(current, role), || {
            format!(
                "rule '{}' does not allow role '{role}' to move {current} -> {new}",
                rule.name
            )
        }),
    }
}

/// Statuses `user` may move an order to from `current`, in [`OrderStatus::ALL`] order.
pub fn allowed_transitions(user: Option<&User>, current: OrderStatus) -> Vec<OrderStatus> {
    OrderStatus::ALL
        .into_iter()
        .filter(|&new| can_transition(user, current, new))
        .collect()
}

// ═══════════════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════════════
