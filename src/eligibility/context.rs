//! Selection context for eligibility rule evaluation.

use chrono::NaiveDate;
use std::collections::HashSet;

use crate::models::{ConstraintModel, Role};

/// Volunteers already placed on the date being filled.
///
/// `fixed` holds only holders of non-floating roles; `any` holds everyone.
#[derive(Debug, Clone, Default)]
pub struct DayAssignments {
    any: HashSet<String>,
    fixed: HashSet<String>,
}

impl DayAssignments {
    /// Creates an empty day.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an accepted assignment.
    pub fn record(&mut self, volunteer: &str, floating: bool) {
        self.any.insert(volunteer.to_string());
        if !floating {
            self.fixed.insert(volunteer.to_string());
        }
    }

    /// Whether the volunteer holds any role on this date.
    pub fn holds_any(&self, volunteer: &str) -> bool {
        self.any.contains(volunteer)
    }

    /// Whether the volunteer holds a non-floating role on this date.
    pub fn holds_fixed(&self, volunteer: &str) -> bool {
        self.fixed.contains(volunteer)
    }

    /// Number of distinct volunteers placed.
    pub fn len(&self) -> usize {
        self.any.len()
    }

    /// Whether nobody is placed yet.
    pub fn is_empty(&self) -> bool {
        self.any.is_empty()
    }

    /// Everyone who served, consumed as the next date's "served last" set.
    pub fn into_served(self) -> HashSet<String> {
        self.any
    }
}

/// Everything a rule may look at when judging one candidate.
#[derive(Debug, Clone, Copy)]
pub struct SelectionContext<'a> {
    /// Date being filled.
    pub date: NaiveDate,
    /// Role being filled.
    pub role: &'a Role,
    /// Assignments accepted so far on `date`.
    pub day: &'a DayAssignments,
    /// Everyone who served on the immediately preceding service date.
    pub served_last_date: &'a HashSet<String>,
    /// Per-run constraint tables.
    pub constraints: &'a ConstraintModel,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_day_assignments_tracks_floating_separately() {
        let mut day = DayAssignments::new();
        assert!(day.is_empty());

        day.record("Alice", false);
        day.record("Bob", true);

        assert!(day.holds_any("Alice"));
        assert!(day.holds_fixed("Alice"));
        assert!(day.holds_any("Bob"));
        assert!(!day.holds_fixed("Bob"));
        assert_eq!(day.len(), 2);

        let served = day.into_served();
        assert!(served.contains("Alice") && served.contains("Bob"));
    }
}
