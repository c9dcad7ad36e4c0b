//! Decision commands: `can`, `transition`, `edit` and `next`.
//!
//! Each decision prints ALLOW or DENY with the engine's reason. The caller
//! maps a deny to a non-zero exit code.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use orderdesk_core::rbac::{
    allowed_transitions, enforce_edit, enforce_perform, enforce_transition, Action, Order,
    OrderStatus, PolicyError, Resource, Role,
};

use super::acting_user;
use crate::output::{self, OutputFormat};

#[derive(Args)]
pub struct CanArgs {
    /// Resource (users, products, inventory, orders, quotes, customers, payments, ...)
    pub resource: Resource,
    /// Action (create, read, update, delete, approve, dispatch, verify_payment, view_cost)
    pub action: Action,
}

#[derive(Args)]
pub struct TransitionArgs {
    /// Current order status
    pub from: OrderStatus,
    /// Requested order status
    pub to: OrderStatus,
}

#[derive(Args)]
pub struct EditArgs {
    /// Current order status
    pub status: OrderStatus,
}

#[derive(Args)]
pub struct NextArgs {
    /// Current order status
    pub from: OrderStatus,
}

#[derive(Debug, Serialize)]
struct DecisionReport {
    role: Role,
    query: String,
    allowed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    code: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<String>,
}

impl DecisionReport {
    fn new(role: Role, query: String, outcome: Result<(), PolicyError>) -> Self {
        match outcome {
            Ok(()) => Self {
                role,
                query,
                allowed: true,
                code: None,
                reason: None,
            },
            Err(err) => Self {
                role,
                query,
                allowed: false,
                code: Some(err.code()),
                reason: Some(err.reason().to_string()),
            },
        }
    }

    fn print(&self, format: OutputFormat) -> Result<bool> {
        match format {
            OutputFormat::Table => output::print_verdict(
                self.allowed,
                &format!("{}: {}", self.role, self.query),
                self.reason.as_deref(),
            ),
            _ => output::print_item(self, format)?,
        }
        Ok(self.allowed)
    }
}

#[derive(Debug, Serialize, Tabled)]
struct NextStatusRow {
    #[tabled(rename = "Status")]
    status: OrderStatus,
    #[tabled(rename = "Store label")]
    store_label: &'static str,
    #[tabled(rename = "Terminal")]
    terminal: bool,
}

pub fn can(role: Role, args: CanArgs, format: OutputFormat) -> Result<bool> {
    let user = acting_user(role);
    let outcome = enforce_perform(Some(&user), args.resource, args.action);
    DecisionReport::new(role, format!("{} {}", args.action, args.resource), outcome).print(format)
}

pub fn transition(role: Role, args: TransitionArgs, format: OutputFormat) -> Result<bool> {
    let user = acting_user(role);
    let outcome = enforce_transition(Some(&user), args.from, args.to);
    DecisionReport::new(role, format!("{} -> {}", args.from, args.to), outcome).print(format)
}

pub fn edit(role: Role, args: EditArgs, format: OutputFormat) -> Result<bool> {
    let user = acting_user(role);
    let order = Order::with_status(args.status);
    let outcome = enforce_edit(Some(&user), &order);
    DecisionReport::new(role, format!("edit order in {}", args.status), outcome).print(format)
}

pub fn next(role: Role, args: NextArgs, format: OutputFormat) -> Result<()> {
    let user = acting_user(role);
    let rows: Vec<NextStatusRow> = allowed_transitions(Some(&user), args.from)
        .into_iter()
        .map(|status| NextStatusRow {
            status,
            store_label: status.store_label(),
            terminal: status.is_terminal(),
        })
        .collect();

    if let OutputFormat::Table = format {
        output::print_header(&format!("{} may move {} to", role, args.from));
    }
    output::print_list(&rows, format)
}
