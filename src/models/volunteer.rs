//! Volunteer model.
//!
//! A volunteer is identified by name (unique within a roster), qualifies
//! for a set of roles, and may have one partner with whom they never serve
//! on the same date.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A person who can be assigned to service roles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Volunteer {
    /// Unique name within the roster.
    pub name: String,
    /// Roles this volunteer is qualified for.
    pub roles: BTreeSet<String>,
    /// Paired partner's name, if any.
    pub partner: Option<String>,
    /// Contact address passed through to notification collaborators.
    pub email: Option<String>,
}

impl Volunteer {
    /// Creates a volunteer with no qualifications.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            roles: BTreeSet::new(),
            partner: None,
            email: None,
        }
    }

    /// Adds a role qualification.
    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.roles.insert(role.into());
        self
    }

    /// Adds several role qualifications.
    pub fn with_roles<I, S>(mut self, roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.roles.extend(roles.into_iter().map(Into::into));
        self
    }

    /// Sets the paired partner.
    pub fn with_partner(mut self, partner: impl Into<String>) -> Self {
        self.partner = Some(partner.into());
        self
    }

    /// Sets the contact address.
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Whether this volunteer may serve in `role`.
    pub fn is_qualified_for(&self, role: &str) -> bool {
        self.roles.contains(role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_volunteer_builder() {
        let v = Volunteer::new("Alice")
            .with_role("Usher")
            .with_roles(["Reader", "Usher"])
            .with_partner("Bob")
            .with_email("alice@example.org");

        assert_eq!(v.name, "Alice");
        assert_eq!(v.roles.len(), 2);
        assert!(v.is_qualified_for("Usher"));
        assert!(v.is_qualified_for("Reader"));
        assert!(!v.is_qualified_for("Greeter"));
        assert_eq!(v.partner.as_deref(), Some("Bob"));
        assert_eq!(v.email.as_deref(), Some("alice@example.org"));
    }

    #[test]
    fn test_serde_roundtrip_keeps_partner() {
        let v = Volunteer::new("Carol").with_role("Usher").with_partner("Dan");
        let json = serde_json::to_string(&v).unwrap();
        let back: Volunteer = serde_json::from_str(&json).unwrap();
        assert_eq!(back, v);
    }
}
