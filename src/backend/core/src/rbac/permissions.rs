//! A per-user view over the policy engine.
//!
//! Screens usually ask many questions about the same signed-in user, so
//! [`Permissions`] binds that user once.

use super::models::{Action, Order, OrderStatus, Resource, Role, User};
use super::policy::{can_edit_order, can_perform};
use super::transitions::{allowed_transitions, can_transition};

/// Policy answers for one (possibly absent) user.
#[derive(Debug, Clone, Copy)]
pub struct Permissions<'a> {
    user: Option<&'a User>,
}

impl<'a> Permissions<'a> {
    pub fn new(user: Option<&'a User>) -> Self {
        Self { user }
    }

    pub fn role(&self) -> Option<Role> {
        self.user.and_then(|u| u.role)
    }

    pub fn can(&self, action: Action, resource: Resource) -> bool {
        can_perform(self.user, resource, action)
    }

    pub fn can_transition_order(&self, current: OrderStatus, new: OrderStatus) -> bool {
        can_transition(self.user, current, new)
    }

    pub fn can_edit(&self, order: &Order) -> bool {
        can_edit_order(self.user, order)
    }

    pub fn next_statuses(&self, current: OrderStatus) -> Vec<OrderStatus> {
        allowed_transitions(self.user, current)
    }
}

impl<'a> From<&'a User> for Permissions<'a> {
    fn from(user: &'a User) -> Self {
        Self::new(Some(user))
    }
}
