//! Built-in roles and their informational privilege ranks.
//!
//! | Role       | Rank | Description                                              |
//! |------------|------|----------------------------------------------------------|
//! | superadmin | 100  | Universal override; full access including settings       |
//! | management |  90  | Universal override; full access including settings       |
//! | admin      |  80  | Back office: approvals, payments, catalogue, users        |
//! | sales      |  50  | Quotes, customers and orders for their accounts           |
//! | warehouse  |  40  | Inventory and fulfilment of approved orders               |
//! | customer   |  10  | Places and follows their own orders                       |
//!
//! Ranks are documentation and telemetry only. Authorization is decided by
//! the rules in [`super::policy`] and [`super::transitions`], never by
//! comparing ranks.

use super::models::Role;

/// Privilege rank per role, highest first.
pub const ROLE_HIERARCHY: [(Role, u8); 6] = [
    (Role::Superadmin, 100),
    (Role::Management, 90),
    (Role::Admin, 80),
    (Role::Sales, 50),
    (Role::Warehouse, 40),
    (Role::Customer, 10),
];

impl Role {
    /// Informational rank from [`ROLE_HIERARCHY`].
    pub fn rank(&self) -> u8 {
        ROLE_HIERARCHY
            .iter()
            .find(|(role, _)| role == self)
            .map_or(0, |&(_, rank)| rank)
    }

    /// Roles that bypass every resource and transition rule.
    pub fn is_universal_override(&self) -> bool {
        matches!(self, Self::Superadmin | Self::Management)
    }

    /// Human-readable name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Superadmin => "Super Admin",
            Self::Management => "Management",
            Self::Admin => "Admin",
            Self::Sales => "Sales",
            Self::Warehouse => "Warehouse",
            Self::Customer => "Customer",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Superadmin => "Full access to every resource and setting",
            Self::Management => "Full access to every resource and setting",
            Self::Admin => "Approves orders, verifies payments, manages catalogue and users",
            Self::Sales => "Manages quotes, customers and orders for assigned accounts",
            Self::Warehouse => "Manages inventory and prepares and dispatches approved orders",
            Self::Customer => "Places orders and registers payments",
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════════════
