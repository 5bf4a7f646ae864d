//! Eligibility rules for rotation candidates.
//!
//! Each rule inspects one candidate for one (date, role) slot and either
//! permits or rejects them. A candidate is eligible only when every rule
//! in the [`RuleSet`] permits.
//!
//! # Usage
//!
//! ```
//! use u_rotation::eligibility::{rules, RuleSet};
//!
//! let standard = RuleSet::standard();
//! assert_eq!(standard.len(), 4);
//!
//! let relaxed = RuleSet::empty()
//!     .with_rule(rules::SameDayExclusion)
//!     .with_rule(rules::Unavailability);
//! assert_eq!(relaxed.rule_names(), vec!["same-day", "unavailable"]);
//! ```

mod context;
mod engine;
pub mod rules;

pub use context::{DayAssignments, SelectionContext};
pub use engine::RuleSet;

use std::fmt::Debug;

/// A hard exclusion check applied to rotation candidates.
pub trait EligibilityRule: Send + Sync + Debug {
    /// Rule name used in logs (e.g., "same-day").
    fn name(&self) -> &'static str;

    /// Whether `candidate` may take the slot described by `context`.
    fn permits(&self, candidate: &str, context: &SelectionContext<'_>) -> bool;

    /// Rule description.
    fn description(&self) -> &'static str {
        self.name()
    }
}
