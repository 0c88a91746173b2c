//! Permission checks
//!
//! Row actions are gated on named permissions supplied by the host rather
//! than read from a global store.

use std::collections::HashSet;

/// Answers whether the current user holds a permission.
pub trait PermissionCheck: Send + Sync {
    /// Returns `true` if `permission` is granted.
    fn has_permission(&self, permission: &str) -> bool;
}

/// Grants every permission.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllowAll;

impl PermissionCheck for AllowAll {
    fn has_permission(&self, _permission: &str) -> bool {
        true
    }
}

/// A fixed set of granted permissions.
#[derive(Debug, Clone, Default)]
pub struct PermissionSet {
    granted: HashSet<String>,
}

impl PermissionSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Grants a permission (builder pattern).
    pub fn grant(mut self, permission: impl Into<String>) -> Self {
        self.granted.insert(permission.into());
        self
    }
}

impl<S: Into<String>> FromIterator<S> for PermissionSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            granted: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl PermissionCheck for PermissionSet {
    fn has_permission(&self, permission: &str) -> bool {
        self.granted.contains(permission)
    }
}
