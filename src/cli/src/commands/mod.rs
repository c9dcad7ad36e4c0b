//! Subcommand implementations.

pub mod check;
pub mod config;
pub mod matrix;
pub mod roles;

use anyhow::{bail, Result};
use orderdesk_core::rbac::{Role, User};

/// Pick the acting role: explicit flag or env first, then the config file.
pub fn resolve_role(flag: Option<String>) -> Result<Role> {
    let raw = match flag {
        Some(raw) => raw,
        None => match config::load_default_role()? {
            Some(raw) => raw,
            None => bail!(
                "No role given. Pass --role, set ORDERDESK_ROLE, or run `orderdesk config set role <role>`"
            ),
        },
    };
    Ok(raw.parse()?)
}

/// A throwaway user holding `role`, for asking the engine questions.
pub fn acting_user(role: Role) -> User {
    User::new("orderdesk-cli", role).with_name("OrderDesk CLI")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_wins_and_accepts_store_label() {
        assert_eq!(resolve_role(Some("ventas".to_string())).unwrap(), Role::Sales);
        assert_eq!(resolve_role(Some("admin".to_string())).unwrap(), Role::Admin);
    }

    #[test]
    fn test_unknown_flag_is_error() {
        let err = resolve_role(Some("janitor".to_string())).unwrap_err();
        assert!(err.to_string().contains("janitor"));
    }
}
