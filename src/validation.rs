//! Roster validation.
//!
//! Checks structural integrity of the roster before a run. Detects:
//! - Roles or volunteers without a name, or with surrounding whitespace
//! - Duplicate role or volunteer names
//! - Qualifications for roles that are not declared
//! - Partner references to unknown volunteers, self-pairing, and
//!   volunteers who would end up with more than one partner
//!
//! A role with no qualified volunteers is *not* an error: its column is
//! simply left empty.

use crate::models::Roster;
use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::fmt;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two roles or two volunteers share a name.
    DuplicateName,
    /// A role has an empty name.
    UnnamedRole,
    /// A volunteer has an empty name.
    UnnamedVolunteer,
    /// A role or volunteer name has leading or trailing whitespace.
    PaddedName,
    /// A volunteer is qualified for a role that is not declared.
    UnknownRole,
    /// A partner reference names nobody on the roster.
    UnknownPartner,
    /// A volunteer is paired with themself.
    SelfPairing,
    /// A volunteer is linked to more than one partner.
    ConflictingPartner,
}

impl ValidationError {
    pub(crate) fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Validates a roster.
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with every detected issue.
pub fn validate_roster(roster: &Roster) -> ValidationResult {
    let mut errors = Vec::new();

    let mut role_names = HashSet::new();
    for (position, role) in roster.roles.iter().enumerate() {
        if role.name.trim().is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::UnnamedRole,
                format!("Role #{} has no name", position + 1),
            ));
            continue;
        }
        if role.name.trim() != role.name {
            errors.push(ValidationError::new(
                ValidationErrorKind::PaddedName,
                format!("Role name '{}' has surrounding whitespace", role.name),
            ));
        }
        if !role_names.insert(role.name.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateName,
                format!("Duplicate role name: {}", role.name),
            ));
        }
    }

    let mut volunteer_names = HashSet::new();
    for (position, v) in roster.volunteers.iter().enumerate() {
        if v.name.trim().is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::UnnamedVolunteer,
                format!("Volunteer #{} has no name", position + 1),
            ));
            continue;
        }
        // Grid cells are stored trimmed.
        if v.name.trim() != v.name {
            errors.push(ValidationError::new(
                ValidationErrorKind::PaddedName,
                format!("Volunteer name '{}' has surrounding whitespace", v.name),
            ));
        }
        if !volunteer_names.insert(v.name.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateName,
                format!("Duplicate volunteer name: {}", v.name),
            ));
        }
    }

    for v in &roster.volunteers {
        for role in &v.roles {
            if !role_names.contains(role.as_str()) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::UnknownRole,
                    format!("Volunteer '{}' is qualified for undeclared role '{}'", v.name, role),
                ));
            }
        }
    }

    // Symmetric partner links; more than one distinct link is a conflict.
    let mut links: BTreeMap<&str, BTreeSet<&str>> = BTreeMap::new();
    for v in &roster.volunteers {
        let Some(partner) = v.partner.as_deref() else {
            continue;
        };
        if partner == v.name {
            errors.push(ValidationError::new(
                ValidationErrorKind::SelfPairing,
                format!("Volunteer '{}' is paired with themself", v.name),
            ));
        } else if !volunteer_names.contains(partner) {
            errors.push(ValidationError::new(
                ValidationErrorKind::UnknownPartner,
                format!("Volunteer '{}' is paired with unknown '{}'", v.name, partner),
            ));
        } else {
            links.entry(v.name.as_str()).or_default().insert(partner);
            links.entry(partner).or_default().insert(v.name.as_str());
        }
    }

    for (name, partners) in &links {
        if partners.len() > 1 {
            let list: Vec<&str> = partners.iter().copied().collect();
            errors.push(ValidationError::new(
                ValidationErrorKind::ConflictingPartner,
                format!("Volunteer '{}' is linked to several partners: {}", name, list.join(", ")),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Role, Volunteer};

    fn sample_roster() -> Roster {
        Roster::new()
            .with_role(Role::new("Usher"))
            .with_role(Role::new("Reader"))
            .with_volunteer(Volunteer::new("Alice").with_role("Usher").with_partner("Bob"))
            .with_volunteer(Volunteer::new("Bob").with_role("Reader").with_partner("Alice"))
            .with_volunteer(Volunteer::new("Carol").with_roles(["Usher", "Reader"]))
    }

    fn kinds(roster: &Roster) -> Vec<ValidationErrorKind> {
        validate_roster(roster)
            .unwrap_err()
            .into_iter()
            .map(|e| e.kind)
            .collect()
    }

    #[test]
    fn test_valid_roster() {
        assert!(validate_roster(&sample_roster()).is_ok());
    }

    #[test]
    fn test_one_sided_partner_is_valid() {
        let roster = Roster::new()
            .with_role(Role::new("Usher"))
            .with_volunteer(Volunteer::new("Alice").with_partner("Bob"))
            .with_volunteer(Volunteer::new("Bob"));
        assert!(validate_roster(&roster).is_ok());
    }

    #[test]
    fn test_role_without_volunteers_is_valid() {
        let roster = sample_roster().with_role(Role::new("Greeter"));
        assert!(validate_roster(&roster).is_ok());
    }

    #[test]
    fn test_unnamed_role() {
        let roster = sample_roster().with_role(Role::new("  "));
        let errors = validate_roster(&roster).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ValidationErrorKind::UnnamedRole);
        assert!(errors[0].message.contains("#3"));
    }

    #[test]
    fn test_duplicate_names() {
        let roster = sample_roster()
            .with_role(Role::new("Usher"))
            .with_volunteer(Volunteer::new("Carol"));
        let kinds = kinds(&roster);
        assert_eq!(
            kinds,
            vec![ValidationErrorKind::DuplicateName, ValidationErrorKind::DuplicateName]
        );
    }

    #[test]
    fn test_unnamed_volunteer() {
        let roster = sample_roster().with_volunteer(Volunteer::new(""));
        assert!(kinds(&roster).contains(&ValidationErrorKind::UnnamedVolunteer));
    }

    #[test]
    fn test_padded_names() {
        let roster = sample_roster()
            .with_role(Role::new(" Greeter"))
            .with_volunteer(Volunteer::new("Dan ").with_role(" Greeter").with_partner("Erin"))
            .with_volunteer(Volunteer::new("Erin"));
        let errors = validate_roster(&roster).unwrap_err();
        let padded: Vec<&str> = errors
            .iter()
            .filter(|e| e.kind == ValidationErrorKind::PaddedName)
            .map(|e| e.message.as_str())
            .collect();
        assert_eq!(padded.len(), 2);
        assert!(padded[0].contains("' Greeter'"));
        assert!(padded[1].contains("'Dan '"));
        // The padded role is still declared, so Dan's qualification resolves.
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn test_unknown_role() {
        let roster = sample_roster().with_volunteer(Volunteer::new("Dan").with_role("Cantor"));
        let errors = validate_roster(&roster).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::UnknownRole && e.message.contains("Cantor")));
    }

    #[test]
    fn test_unknown_partner() {
        let roster = sample_roster().with_volunteer(Volunteer::new("Dan").with_partner("Zed"));
        assert_eq!(kinds(&roster), vec![ValidationErrorKind::UnknownPartner]);
    }

    #[test]
    fn test_self_pairing() {
        let roster = sample_roster().with_volunteer(Volunteer::new("Dan").with_partner("Dan"));
        assert_eq!(kinds(&roster), vec![ValidationErrorKind::SelfPairing]);
    }

    #[test]
    fn test_conflicting_partner() {
        // Dan claims Alice, who is already paired with Bob.
        let roster = sample_roster().with_volunteer(Volunteer::new("Dan").with_partner("Alice"));
        let errors = validate_roster(&roster).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ValidationErrorKind::ConflictingPartner);
        assert!(errors[0].message.contains("'Alice'"));
    }

    #[test]
    fn test_multiple_errors() {
        let roster = Roster::new()
            .with_role(Role::new(""))
            .with_volunteer(Volunteer::new("Ann").with_role("Usher").with_partner("Nobody"));
        let errors = validate_roster(&roster).unwrap_err();
        assert!(errors.len() >= 3);
    }
}
