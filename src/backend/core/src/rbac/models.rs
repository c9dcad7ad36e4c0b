//! Policy data models: Role, Resource, Action, OrderStatus, User and Order.
//!
//! Every enum is closed and carries two spellings: the canonical tag used by
//! this crate, and the label the document store writes on its records.
//! Parsing and deserialization accept either; output always uses the
//! canonical tag.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::warn;

use crate::error::OrderDeskError;

/// Lowercase and strip separators so `in_preparation`, `In Preparation` and
/// `InPreparation` compare equal.
fn normalize(s: &str) -> String {
    s.trim()
        .chars()
        .filter(|c| !matches!(c, ' ' | '_' | '-'))
        .flat_map(char::to_lowercase)
        .collect()
}

// ═══════════════════════════════════════════════════════════════════════════════
// Role
// ═══════════════════════════════════════════════════════════════════════════════

/// The fixed category assigned to a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Superadmin,
    #[serde(alias = "gerencia")]
    Management,
    Admin,
    #[serde(alias = "ventas")]
    Sales,
    #[serde(alias = "deposito")]
    Warehouse,
    #[serde(alias = "cliente")]
    Customer,
}

impl Role {
    pub const ALL: [Role; 6] = [
        Self::Superadmin,
        Self::Management,
        Self::Admin,
        Self::Sales,
        Self::Warehouse,
        Self::Customer,
    ];

    /// Canonical tag.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Superadmin => "superadmin",
            Self::Management => "management",
            Self::Admin => "admin",
            Self::Sales => "sales",
            Self::Warehouse => "warehouse",
            Self::Customer => "customer",
        }
    }

    /// Label written by the document store.
    pub fn store_label(&self) -> &'static str {
        match self {
            Self::Superadmin => "superadmin",
            Self::Management => "gerencia",
            Self::Admin => "admin",
            Self::Sales => "ventas",
            Self::Warehouse => "deposito",
            Self::Customer => "cliente",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = OrderDeskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = normalize(s);
        Self::ALL
            .into_iter()
            .find(|r| key == r.as_str() || key == r.store_label())
            .ok_or_else(|| OrderDeskError::UnknownRole(s.to_string()))
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Resource
// ═══════════════════════════════════════════════════════════════════════════════

/// A class of protected domain object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Resource {
    Users,
    Products,
    Inventory,
    Orders,
    Quotes,
    Customers,
    Payments,
    Commissions,
    Reports,
    Settings,
}

impl Resource {
    pub const ALL: [Resource; 10] = [
        Self::Users,
        Self::Products,
        Self::Inventory,
        Self::Orders,
        Self::Quotes,
        Self::Customers,
        Self::Payments,
        Self::Commissions,
        Self::Reports,
        Self::Settings,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Users => "users",
            Self::Products => "products",
            Self::Inventory => "inventory",
            Self::Orders => "orders",
            Self::Quotes => "quotes",
            Self::Customers => "customers",
            Self::Payments => "payments",
            Self::Commissions => "commissions",
            Self::Reports => "reports",
            Self::Settings => "settings",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Resource {
    type Err = OrderDeskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = normalize(s);
        Self::ALL
            .into_iter()
            .find(|r| key == r.as_str())
            .ok_or_else(|| OrderDeskError::UnknownResource(s.to_string()))
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Action
// ═══════════════════════════════════════════════════════════════════════════════

/// An operation attempted against a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Create,
    Read,
    Update,
    Delete,
    Approve,
    Dispatch,
    VerifyPayment,
    ViewCost,
}

impl Action {
    pub const ALL: [Action; 8] = [
        Self::Create,
        Self::Read,
        Self::Update,
        Self::Delete,
        Self::Approve,
        Self::Dispatch,
        Self::VerifyPayment,
        Self::ViewCost,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Read => "read",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::Approve => "approve",
            Self::Dispatch => "dispatch",
            Self::VerifyPayment => "verify_payment",
            Self::ViewCost => "view_cost",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = OrderDeskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = normalize(s);
        Self::ALL
            .into_iter()
            .find(|a| key == normalize(a.as_str()))
            .ok_or_else(|| OrderDeskError::UnknownAction(s.to_string()))
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Order status
// ═══════════════════════════════════════════════════════════════════════════════

/// Lifecycle stage of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderStatus {
    #[serde(alias = "Pendiente")]
    Pending,
    #[serde(alias = "Aprobado")]
    Approved,
    #[serde(alias = "En Preparación")]
    InPreparation,
    #[serde(alias = "Completado")]
    Completed,
    #[serde(alias = "Despachado")]
    Dispatched,
    #[serde(alias = "Entregado")]
    Delivered,
    #[serde(alias = "Cancelado")]
    Cancelled,
    #[serde(alias = "En Verificación")]
    InVerification,
    #[serde(alias = "Pagado")]
    Paid,
}

impl OrderStatus {
    /// All statuses in the order the document store presents them.
    pub const ALL: [OrderStatus; 9] = [
        Self::Pending,
        Self::Approved,
        Self::InPreparation,
        Self::Completed,
        Self::Dispatched,
        Self::Delivered,
        Self::InVerification,
        Self::Paid,
        Self::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Approved => "Approved",
            Self::InPreparation => "InPreparation",
            Self::Completed => "Completed",
            Self::Dispatched => "Dispatched",
            Self::Delivered => "Delivered",
            Self::Cancelled => "Cancelled",
            Self::InVerification => "InVerification",
            Self::Paid => "Paid",
        }
    }

    pub fn store_label(&self) -> &'static str {
        match self {
            Self::Pending => "Pendiente",
            Self::Approved => "Aprobado",
            Self::InPreparation => "En Preparación",
            Self::Completed => "Completado",
            Self::Dispatched => "Despachado",
            Self::Delivered => "Entregado",
            Self::Cancelled => "Cancelado",
            Self::InVerification => "En Verificación",
            Self::Paid => "Pagado",
        }
    }

    /// `Delivered`, `Cancelled` and `Paid` end the lifecycle.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Delivered | Self::Cancelled | Self::Paid)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = OrderDeskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = normalize(s);
        Self::ALL
            .into_iter()
            .find(|st| key == normalize(st.as_str()) || key == normalize(st.store_label()))
            .ok_or_else(|| OrderDeskError::UnknownStatus(s.to_string()))
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// User
// ═══════════════════════════════════════════════════════════════════════════════

/// Strongly-typed user identifier (the identity provider's UID).
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for UserId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// The acting user. Only `role` feeds policy decisions.
///
/// A record with a missing, null or unrecognized role deserializes with
/// `role: None`, which every decision treats as deny-all.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(default)]
    pub id: UserId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(
        default,
        deserialize_with = "lenient_role",
        skip_serializing_if = "Option::is_none"
    )]
    pub role: Option<Role>,
}

impl User {
    /// Create a user holding `role`.
    pub fn new(id: impl Into<String>, role: Role) -> Self {
        Self {
            id: UserId::new(id),
            role: Some(role),
            ..Self::default()
        }
    }

    /// A user record with no role assigned.
    pub fn without_role(id: impl Into<String>) -> Self {
        Self {
            id: UserId::new(id),
            ..Self::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }
}

fn lenient_role<'de, D>(deserializer: D) -> Result<Option<Role>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.and_then(|value| match value.parse::<Role>() {
        Ok(role) => Some(role),
        Err(_) => {
            warn!(role = %value, "Unrecognized role on user record, treating as unassigned");
            None
        }
    }))
}

// ═══════════════════════════════════════════════════════════════════════════════
// Order
// ═══════════════════════════════════════════════════════════════════════════════

/// An order as seen by the policy engine. Other fields on the stored record
/// are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    #[serde(default)]
    pub id: String,
    pub status: OrderStatus,
}

impl Order {
    pub fn new(id: impl Into<String>, status: OrderStatus) -> Self {
        Self {
            id: id.into(),
            status,
        }
    }

    /// An anonymous order in `status`; enough for edit checks.
    pub fn with_status(status: OrderStatus) -> Self {
        Self::new(String::new(), status)
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parse_canonical_and_store_label() {
        assert_eq!("management".parse::<Role>().unwrap(), Role::Management);
        assert_eq!("gerencia".parse::<Role>().unwrap(), Role::Management);
        assert_eq!("Deposito".parse::<Role>().unwrap(), Role::Warehouse);
        assert_eq!(" cliente ".parse::<Role>().unwrap(), Role::Customer);
        assert!(matches!(
            "root".parse::<Role>(),
            Err(OrderDeskError::UnknownRole(r)) if r == "root"
        ));
    }

    #[test]
    fn test_action_parse_separators() {
        assert_eq!("verify_payment".parse::<Action>().unwrap(), Action::VerifyPayment);
        assert_eq!("view-cost".parse::<Action>().unwrap(), Action::ViewCost);
        assert_eq!("VIEWCOST".parse::<Action>().unwrap(), Action::ViewCost);
        assert!("approve_all".parse::<Action>().is_err());
    }

    #[test]
    fn test_resource_parse() {
        for resource in Resource::ALL {
            assert_eq!(resource.as_str().parse::<Resource>().unwrap(), resource);
        }
        assert!("widgets".parse::<Resource>().is_err());
    }

    #[test]
    fn test_status_parse_labels() {
        assert_eq!(
            "En Preparación".parse::<OrderStatus>().unwrap(),
            OrderStatus::InPreparation
        );
        assert_eq!(
            "in_preparation".parse::<OrderStatus>().unwrap(),
            OrderStatus::InPreparation
        );
        assert_eq!("pagado".parse::<OrderStatus>().unwrap(), OrderStatus::Paid);
        assert!("Lost".parse::<OrderStatus>().is_err());
    }

    #[test]
    fn test_status_all_order() {
        assert_eq!(OrderStatus::ALL.len(), 9);
        assert_eq!(OrderStatus::ALL[0], OrderStatus::Pending);
        assert_eq!(OrderStatus::ALL[8], OrderStatus::Cancelled);
    }

    #[test]
    fn test_terminal_statuses() {
        let terminal: Vec<_> = OrderStatus::ALL
            .into_iter()
            .filter(OrderStatus::is_terminal)
            .collect();
        assert_eq!(
            terminal,
            vec![OrderStatus::Delivered, OrderStatus::Paid, OrderStatus::Cancelled]
        );
    }

    #[test]
    fn test_user_deserialize_store_record() {
        let user: User = serde_json::from_str(
            r#"{"id":"u1","name":"Ana","email":"ana@example.com","role":"ventas","status":"Activo"}"#,
        )
        .unwrap();
        assert_eq!(user.role, Some(Role::Sales));
        assert_eq!(user.id.as_str(), "u1");
    }

    #[test]
    fn test_user_deserialize_missing_or_unknown_role() {
        let missing: User = serde_json::from_str(r#"{"id":"u2"}"#).unwrap();
        assert_eq!(missing.role, None);

        let null: User = serde_json::from_str(r#"{"id":"u3","role":null}"#).unwrap();
        assert_eq!(null.role, None);

        let unknown: User = serde_json::from_str(r#"{"id":"u4","role":"owner"}"#).unwrap();
        assert_eq!(unknown.role, None);
    }

    #[test]
    fn test_user_serializes_canonical_role() {
        let user = User::new("u5", Role::Warehouse).with_name("Luis");
        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["role"], "warehouse");

        let json = serde_json::to_value(User::without_role("u6")).unwrap();
        assert!(json.get("role").is_none());
    }

    #[test]
    fn test_order_deserialize_store_record() {
        let order: Order = serde_json::from_str(
            r#"{"id":"o1","customerName":"Club Atlético","status":"En Verificación","totalAmount":120.5}"#,
        )
        .unwrap();
        assert_eq!(order.status, OrderStatus::InVerification);

        let json = serde_json::to_value(&order).unwrap();
        assert_eq!(json["status"], "InVerification");
    }
}
