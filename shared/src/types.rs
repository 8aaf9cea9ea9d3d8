//! Common types for the shared crate

use serde::{Deserialize, Serialize};

/// Permission string such as `sales:checkout`, `sales:*` or `*`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Permission(pub String);

impl Permission {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Check if this permission grants access to the given resource action
    pub fn grants(&self, action: &str) -> bool {
        if self.0 == "*" {
            return true;
        }
        if let Some(prefix) = self.0.strip_suffix(":*") {
            return action
                .strip_prefix(prefix)
                .is_some_and(|rest| rest.starts_with(':'));
        }
        self.0 == action
    }
}

impl std::fmt::Display for Permission {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wildcard_scoped_to_resource() {
        let perm = Permission::new("sales:*");
        assert!(perm.grants("sales:checkout"));
        assert!(!perm.grants("salesreport:read"));
        assert!(!perm.grants("sales"));
        assert!(Permission::new("*").grants("anything"));
        assert!(Permission::new("classes:create").grants("classes:create"));
    }
}
