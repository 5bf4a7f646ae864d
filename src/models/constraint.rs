//! Constraint model shared by the rotation engine and the conflict detector.
//!
//! Built once per run from the roster and availability table and never
//! mutated afterwards. Holds three typed relations:
//!
//! | Relation | Shape |
//! |----------|-------|
//! | Qualification | role → ordered volunteer list |
//! | Pairing | volunteer → at most one partner (symmetric) |
//! | Availability | (volunteer, date) → unavailable |

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::{Availability, Role, Roster};
use crate::error::{Result, RotaError};
use crate::validation::validate_roster;

/// Symmetric partner relation. Each volunteer has at most one partner.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pairing {
    partners: HashMap<String, String>,
}

impl Pairing {
    /// Creates an empty relation.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the relation from a roster, completing one-sided declarations.
    ///
    /// Assumes the roster passed validation; self links are skipped.
    pub fn from_roster(roster: &Roster) -> Self {
        let mut pairing = Self::new();
        for v in &roster.volunteers {
            if let Some(partner) = &v.partner {
                pairing.link(&v.name, partner);
            }
        }
        pairing
    }

    /// Pairs `a` with `b` in both directions.
    pub fn with_pair(mut self, a: impl Into<String>, b: impl Into<String>) -> Self {
        let (a, b) = (a.into(), b.into());
        self.link(&a, &b);
        self
    }

    fn link(&mut self, a: &str, b: &str) {
        if a == b {
            return;
        }
        self.partners.insert(a.to_string(), b.to_string());
        self.partners.insert(b.to_string(), a.to_string());
    }

    /// Partner of `name`, if any.
    #[inline]
    pub fn partner_of(&self, name: &str) -> Option<&str> {
        self.partners.get(name).map(String::as_str)
    }

    /// Whether `a` and `b` are partners.
    pub fn are_paired(&self, a: &str, b: &str) -> bool {
        self.partner_of(a) == Some(b)
    }

    /// Number of pairs.
    pub fn pair_count(&self) -> usize {
        self.partners.len() / 2
    }

    /// Whether no pairs exist.
    pub fn is_empty(&self) -> bool {
        self.partners.is_empty()
    }
}

/// Per-run constraint tables.
#[derive(Debug, Clone)]
pub struct ConstraintModel {
    roles: Vec<Role>,
    qualified: Vec<Vec<String>>,
    pairing: Pairing,
    availability: Availability,
}

impl ConstraintModel {
    /// Validates the roster and builds the constraint tables.
    ///
    /// # Errors
    /// [`RotaError::InvalidRoster`] listing every structural problem.
    pub fn build(roster: &Roster, availability: Availability) -> Result<Self> {
        validate_roster(roster).map_err(RotaError::InvalidRoster)?;

        let qualified: Vec<Vec<String>> = roster
            .roles
            .iter()
            .map(|role| {
                roster
                    .qualified_for(&role.name)
                    .into_iter()
                    .map(|v| v.name.clone())
                    .collect()
            })
            .collect();

        for (role, pool) in roster.roles.iter().zip(&qualified) {
            if pool.is_empty() {
                tracing::debug!(role = %role.name, "Role has no qualified volunteers");
            }
        }

        let model = Self {
            roles: roster.roles.clone(),
            qualified,
            pairing: Pairing::from_roster(roster),
            availability,
        };
        tracing::debug!(
            roles = model.roles.len(),
            volunteers = roster.volunteers.len(),
            pairs = model.pairing.pair_count(),
            blackouts = model.availability.len(),
            "Built constraint model"
        );
        Ok(model)
    }

    /// Roles in column order.
    pub fn roles(&self) -> &[Role] {
        &self.roles
    }

    /// Role names in column order.
    pub fn role_names(&self) -> Vec<String> {
        self.roles.iter().map(|r| r.name.clone()).collect()
    }

    /// Qualified volunteers for the role at `index`, in declaration order.
    pub fn qualified(&self, index: usize) -> &[String] {
        self.qualified.get(index).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Qualified volunteers for a role by name.
    pub fn qualified_for(&self, role: &str) -> &[String] {
        self.roles
            .iter()
            .position(|r| r.name == role)
            .map(|i| self.qualified(i))
            .unwrap_or(&[])
    }

    /// Partner relation.
    pub fn pairing(&self) -> &Pairing {
        &self.pairing
    }

    /// Partner of `name`, if any.
    pub fn partner_of(&self, name: &str) -> Option<&str> {
        self.pairing.partner_of(name)
    }

    /// Whether `name` is unavailable on `date`.
    pub fn is_unavailable(&self, name: &str, date: NaiveDate) -> bool {
        self.availability.is_unavailable(name, date)
    }

    /// Availability relation.
    pub fn availability(&self) -> &Availability {
        &self.availability
    }
}
