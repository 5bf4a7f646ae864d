//! Built-in eligibility rules.
//!
//! | Rule | Rejects when |
//! |------|--------------|
//! | `SameDayExclusion` | non-floating role, candidate already holds a non-floating role that date |
//! | `ConsecutiveWeekExclusion` | candidate served (any role) on the preceding service date |
//! | `PartnerExclusion` | candidate's partner already holds any role that date |
//! | `Unavailability` | candidate is blacked out that date |

use super::{EligibilityRule, SelectionContext};

/// One non-floating role per volunteer per date.
///
/// Floating roles are exempt on both sides: filling a floating role
/// ignores earlier placements, and holding a floating role does not block
/// a later non-floating one.
#[derive(Debug, Clone, Copy)]
pub struct SameDayExclusion;

impl EligibilityRule for SameDayExclusion {
    fn name(&self) -> &'static str {
        "same-day"
    }

    fn permits(&self, candidate: &str, context: &SelectionContext<'_>) -> bool {
        context.role.floating || !context.day.holds_fixed(candidate)
    }

    fn description(&self) -> &'static str {
        "At most one non-floating role per volunteer per date"
    }
}

/// No service on two adjacent service dates.
#[derive(Debug, Clone, Copy)]
pub struct ConsecutiveWeekExclusion;

impl EligibilityRule for ConsecutiveWeekExclusion {
    fn name(&self) -> &'static str {
        "consecutive-week"
    }

    fn permits(&self, candidate: &str, context: &SelectionContext<'_>) -> bool {
        !context.served_last_date.contains(candidate)
    }

    fn description(&self) -> &'static str {
        "No service on the immediately preceding service date"
    }
}

/// Partners never serve on the same date.
#[derive(Debug, Clone, Copy)]
pub struct PartnerExclusion;

impl EligibilityRule for PartnerExclusion {
    fn name(&self) -> &'static str {
        "partner"
    }

    fn permits(&self, candidate: &str, context: &SelectionContext<'_>) -> bool {
        match context.constraints.partner_of(candidate) {
            Some(partner) => !context.day.holds_any(partner),
            None => true,
        }
    }

    fn description(&self) -> &'static str {
        "Partner not already serving on this date"
    }
}

/// Respects the availability table.
#[derive(Debug, Clone, Copy)]
pub struct Unavailability;

impl EligibilityRule for Unavailability {
    fn name(&self) -> &'static str {
        "unavailable"
    }

    fn permits(&self, candidate: &str, context: &SelectionContext<'_>) -> bool {
        !context.constraints.is_unavailable(candidate, context.date)
    }

    fn description(&self) -> &'static str {
        "Not marked unavailable on this date"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eligibility::DayAssignments;
    use crate::models::{Availability, ConstraintModel, Role, Roster, Volunteer};
    use chrono::NaiveDate;
    use std::collections::HashSet;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 4, 7).unwrap()
    }

    fn model() -> ConstraintModel {
        let roster = Roster::new()
            .with_role(Role::new("Usher"))
            .with_role(Role::floating("Greeter"))
            .with_volunteer(Volunteer::new("Alice").with_roles(["Usher", "Greeter"]).with_partner("Bob"))
            .with_volunteer(Volunteer::new("Bob").with_roles(["Usher", "Greeter"]))
            .with_volunteer(Volunteer::new("Carol").with_role("Usher"));
        let availability = Availability::new().with_unavailable("Carol", date());
        ConstraintModel::build(&roster, availability).unwrap()
    }

    fn ctx<'a>(
        model: &'a ConstraintModel,
        role: usize,
        day: &'a DayAssignments,
        last: &'a HashSet<String>,
    ) -> SelectionContext<'a> {
        SelectionContext {
            date: date(),
            role: &model.roles()[role],
            day,
            served_last_date: last,
            constraints: model,
        }
    }

    #[test]
    fn test_same_day_exclusion() {
        let model = model();
        let last = HashSet::new();
        let mut day = DayAssignments::new();
        day.record("Alice", false);

        // Usher (fixed) blocked, Greeter (floating) allowed.
        assert!(!SameDayExclusion.permits("Alice", &ctx(&model, 0, &day, &last)));
        assert!(SameDayExclusion.permits("Alice", &ctx(&model, 1, &day, &last)));
        assert!(SameDayExclusion.permits("Bob", &ctx(&model, 0, &day, &last)));

        // Holding only a floating role does not block a fixed one.
        let mut day = DayAssignments::new();
        day.record("Bob", true);
        assert!(SameDayExclusion.permits("Bob", &ctx(&model, 0, &day, &last)));
    }

    #[test]
    fn test_consecutive_week_exclusion() {
        let model = model();
        let day = DayAssignments::new();
        let last: HashSet<String> = ["Bob".to_string()].into_iter().collect();
        assert!(!ConsecutiveWeekExclusion.permits("Bob", &ctx(&model, 0, &day, &last)));
        // Applies to floating roles too.
        assert!(!ConsecutiveWeekExclusion.permits("Bob", &ctx(&model, 1, &day, &last)));
        assert!(ConsecutiveWeekExclusion.permits("Alice", &ctx(&model, 0, &day, &last)));
    }

    #[test]
    fn test_partner_exclusion() {
        let model = model();
        let last = HashSet::new();
        let mut day = DayAssignments::new();
        day.record("Bob", true);
        // Alice's partner Bob holds a floating role: still blocks.
        assert!(!PartnerExclusion.permits("Alice", &ctx(&model, 0, &day, &last)));
        assert!(PartnerExclusion.permits("Carol", &ctx(&model, 0, &day, &last)));
    }

    #[test]
    fn test_unavailability() {
        let model = model();
        let last = HashSet::new();
        let day = DayAssignments::new();
        assert!(!Unavailability.permits("Carol", &ctx(&model, 0, &day, &last)));
        assert!(Unavailability.permits("Alice", &ctx(&model, 0, &day, &last)));
    }
}
