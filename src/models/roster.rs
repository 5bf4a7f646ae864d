//! Roster: the ordered role list and the ordered volunteer list.
//!
//! Declaration order matters twice: roles are filled left to right on each
//! date, and each role's round-robin pool follows volunteer order.

use serde::{Deserialize, Serialize};

use super::{Role, Volunteer};

/// Roles and volunteers as supplied by the surrounding system.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roster {
    /// Roles in column order.
    pub roles: Vec<Role>,
    /// Volunteers in declaration order.
    pub volunteers: Vec<Volunteer>,
}

impl Roster {
    /// Creates an empty roster.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a role.
    pub fn with_role(mut self, role: Role) -> Self {
        self.roles.push(role);
        self
    }

    /// Appends a volunteer.
    pub fn with_volunteer(mut self, volunteer: Volunteer) -> Self {
        self.volunteers.push(volunteer);
        self
    }

    /// Finds a role by name.
    pub fn role(&self, name: &str) -> Option<&Role> {
        self.roles.iter().find(|r| r.name == name)
    }

    /// Finds a volunteer by name.
    pub fn volunteer(&self, name: &str) -> Option<&Volunteer> {
        self.volunteers.iter().find(|v| v.name == name)
    }

    /// Volunteers qualified for `role`, in declaration order.
    pub fn qualified_for(&self, role: &str) -> Vec<&Volunteer> {
        self.volunteers
            .iter()
            .filter(|v| v.is_qualified_for(role))
            .collect()
    }

    /// Marks the named roles as floating.
    ///
    /// Names that match no role are logged and ignored.
    pub fn apply_floating<S: AsRef<str>>(&mut self, names: &[S]) {
        for name in names {
            let name = name.as_ref();
            match self.roles.iter_mut().find(|r| r.name == name) {
                Some(role) => role.floating = true,
                None => tracing::warn!(role = name, "Floating role not found in roster"),
            }
        }
    }
}
