use serde::{Deserialize, Serialize};
use std::fmt;

use super::{Permission, Role, Subject};

/// Role identified by name
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NamedRole {
    name: String,
}

impl NamedRole {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Role for NamedRole {
    fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for NamedRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Permission identified by its value (e.g., "printers.edit")
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PermissionValue {
    value: String,
}

impl PermissionValue {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }
}

impl Permission for PermissionValue {
    fn value(&self) -> &str {
        &self.value
    }
}

impl fmt::Display for PermissionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// Principal (user, service account) as delivered by an identity layer
///
/// `roles` and `permissions` are `None` when the identity layer supplied no
/// list; `null` entries inside a JSON list deserialize to absent entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    /// Principal identifier (e.g., "user:alice@example.com")
    pub id: String,

    /// Roles held by the principal
    #[serde(default)]
    pub roles: Option<Vec<Option<NamedRole>>>,

    /// Permissions held by the principal
    #[serde(default)]
    pub permissions: Option<Vec<Option<PermissionValue>>>,
}

impl Principal {
    /// Create a principal with no role or permission lists
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            roles: None,
            permissions: None,
        }
    }

    /// Add a role to the principal
    pub fn with_role(mut self, name: impl Into<String>) -> Self {
        self.roles
            .get_or_insert_with(Vec::new)
            .push(Some(NamedRole::new(name)));
        self
    }

    /// Add several roles to the principal
    pub fn with_roles<I, N>(self, names: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<String>,
    {
        names.into_iter().fold(self, |p, name| p.with_role(name))
    }

    /// Add a permission to the principal
    pub fn with_permission(mut self, value: impl Into<String>) -> Self {
        self.permissions
            .get_or_insert_with(Vec::new)
            .push(Some(PermissionValue::new(value)));
        self
    }

    /// Add several permissions to the principal
    pub fn with_permissions<I, V>(self, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        values
            .into_iter()
            .fold(self, |p, value| p.with_permission(value))
    }
}

impl Subject for Principal {
    type Role = NamedRole;
    type Permission = PermissionValue;

    fn identifier(&self) -> &str {
        &self.id
    }

    fn roles(&self) -> Option<&[Option<NamedRole>]> {
        self.roles.as_deref()
    }

    fn permissions(&self) -> Option<&[Option<PermissionValue>]> {
        self.permissions.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_principal_has_no_lists() {
        let principal = Principal::new("user:alice");
        assert_eq!(principal.identifier(), "user:alice");
        assert!(principal.roles().is_none());
        assert!(principal.permissions().is_none());
    }

    #[test]
    fn test_builder_preserves_order() {
        let principal = Principal::new("user:bob")
            .with_roles(["admin", "editor"])
            .with_permissions(["printers.edit", "printers.view"]);

        let roles: Vec<&str> = principal
            .roles()
            .unwrap()
            .iter()
            .flatten()
            .map(|r| r.name())
            .collect();
        assert_eq!(roles, vec!["admin", "editor"]);
        assert_eq!(principal.permissions().unwrap().len(), 2);
    }

    #[test]
    fn test_deserialize_with_null_entries() {
        let json = r#"{
            "id": "user:carol",
            "roles": ["admin", null, "editor"],
            "permissions": null
        }"#;
        let principal: Principal = serde_json::from_str(json).unwrap();

        let roles = principal.roles().unwrap();
        assert_eq!(roles.len(), 3);
        assert!(roles[1].is_none());
        assert!(principal.permissions().is_none());
    }

    #[test]
    fn test_deserialize_missing_lists() {
        let principal: Principal = serde_json::from_str(r#"{"id": "user:dave"}"#).unwrap();
        assert_eq!(principal, Principal::new("user:dave"));
    }

    #[test]
    fn test_serialize_roundtrip_shape() {
        let principal = Principal::new("user:erin").with_role("admin");
        let value = serde_json::to_value(&principal).unwrap();
        assert_eq!(value["roles"], serde_json::json!(["admin"]));
        assert_eq!(value["permissions"], serde_json::Value::Null);
    }
}
