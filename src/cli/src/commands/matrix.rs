//! `matrix`: the full resource x action grid for a role.

use anyhow::Result;
use serde::Serialize;
use tabled::Tabled;

use orderdesk_core::rbac::{permission_matrix, Action, Resource, Role};

use crate::output::{self, OutputFormat};

#[derive(Debug, Serialize)]
struct MatrixEntry {
    resource: Resource,
    action: Action,
    allowed: bool,
}

#[derive(Debug, Serialize, Tabled)]
struct MatrixRow {
    #[tabled(rename = "Resource")]
    resource: Resource,
    create: &'static str,
    read: &'static str,
    update: &'static str,
    delete: &'static str,
    approve: &'static str,
    dispatch: &'static str,
    verify_payment: &'static str,
    view_cost: &'static str,
}

fn mark(allowed: bool) -> &'static str {
    if allowed {
        "yes"
    } else {
        "-"
    }
}

fn rows(role: Role) -> Vec<MatrixRow> {
    let grid = permission_matrix(role);
    let allowed = |resource: Resource, action: Action| {
        grid.iter()
            .any(|&(r, a, ok)| r == resource && a == action && ok)
    };
    Resource::ALL
        .into_iter()
        .map(|resource| MatrixRow {
            resource,
            create: mark(allowed(resource, Action::Create)),
            read: mark(allowed(resource, Action::Read)),
            update: mark(allowed(resource, Action::Update)),
            delete: mark(allowed(resource, Action::Delete)),
            approve: mark(allowed(resource, Action::Approve)),
            dispatch: mark(allowed(resource, Action::Dispatch)),
            verify_payment: mark(allowed(resource, Action::VerifyPayment)),
            view_cost: mark(allowed(resource, Action::ViewCost)),
        })
        .collect()
}

pub fn execute(role: Role, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => {
            output::print_header(&format!("Permissions for {}", role));
            output::print_list(&rows(role), format)
        }
        _ => {
            let entries: Vec<MatrixEntry> = permission_matrix(role)
                .into_iter()
                .map(|(resource, action, allowed)| MatrixEntry {
                    resource,
                    action,
                    allowed,
                })
                .collect();
            output::print_item(&entries, format)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rows_one_per_resource() {
        let rows = rows(Role::Customer);
        assert_eq!(rows.len(), Resource::ALL.len());

        let orders = rows.iter().find(|r| r.resource == Resource::Orders).unwrap();
        assert_eq!(orders.read, "yes");
        assert_eq!(orders.create, "yes");
        assert_eq!(orders.approve, "-");
    }

    #[test]
    fn test_admin_users_delete_unmarked() {
        let rows = rows(Role::Admin);
        let users = rows.iter().find(|r| r.resource == Resource::Users).unwrap();
        assert_eq!(users.update, "yes");
        assert_eq!(users.delete, "-");
    }
}
