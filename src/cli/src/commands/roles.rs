//! `roles`: list built-in roles with their informational rank.

use anyhow::Result;
use serde::Serialize;
use tabled::Tabled;

use orderdesk_core::rbac::{Role, ROLE_HIERARCHY};

use crate::output::{self, OutputFormat};

#[derive(Debug, Serialize, Tabled)]
struct RoleRow {
    #[tabled(rename = "Role")]
    role: Role,
    #[tabled(rename = "Store label")]
    store_label: &'static str,
    #[tabled(rename = "Rank")]
    rank: u8,
    #[tabled(rename = "Override")]
    universal_override: bool,
    #[tabled(rename = "Description")]
    description: &'static str,
}

pub fn execute(format: OutputFormat) -> Result<()> {
    let rows: Vec<RoleRow> = ROLE_HIERARCHY
        .into_iter()
        .map(|(role, rank)| RoleRow {
            role,
            store_label: role.store_label(),
            rank,
            universal_override: role.is_universal_override(),
            description: role.description(),
        })
        .collect();
    output::print_list(&rows, format)
}
