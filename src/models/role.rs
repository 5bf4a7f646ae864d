//! Service role model.

use serde::{Deserialize, Serialize};

/// A recurring service role (one grid column).
///
/// A *floating* role does not count as "already serving" when other,
/// non-floating roles are filled on the same date. Its assignee is still
/// subject to every other exclusion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    /// Role name (column header).
    pub name: String,
    /// Whether the role is floating.
    pub floating: bool,
}

impl Role {
    /// Creates a non-floating role.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            floating: false,
        }
    }

    /// Creates a floating role.
    pub fn floating(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            floating: true,
        }
    }

    /// Sets the floating flag.
    pub fn with_floating(mut self, floating: bool) -> Self {
        self.floating = floating;
        self
    }
}
