//! Rule set: an ordered conjunction of eligibility rules.

use std::sync::Arc;

use super::{rules, EligibilityRule, SelectionContext};

/// Ordered set of hard rules; a candidate must pass all of them.
///
/// Rules are evaluated in insertion order and evaluation stops at the
/// first rejection, whose name is reported for logging.
#[derive(Clone)]
pub struct RuleSet {
    rules: Vec<Arc<dyn EligibilityRule>>,
}

impl RuleSet {
    /// Creates a rule set with no rules, so every candidate is eligible.
    ///
    /// Use [`RuleSet::standard`] (also the `Default`) for the rotation
    /// exclusions.
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    /// The four standard rotation exclusions.
    pub fn standard() -> Self {
        Self::empty()
            .with_rule(rules::SameDayExclusion)
            .with_rule(rules::ConsecutiveWeekExclusion)
            .with_rule(rules::PartnerExclusion)
            .with_rule(rules::Unavailability)
    }

    /// Appends a rule.
    pub fn with_rule<R: EligibilityRule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Arc::new(rule));
        self
    }

    /// Name of the first rule rejecting `candidate`, or `None` if eligible.
    pub fn first_rejection(
        &self,
        candidate: &str,
        context: &SelectionContext<'_>,
    ) -> Option<&'static str> {
        self.rules
            .iter()
            .find(|rule| !rule.permits(candidate, context))
            .map(|rule| rule.name())
    }

    /// Whether `candidate` passes every rule.
    pub fn permits(&self, candidate: &str, context: &SelectionContext<'_>) -> bool {
        self.first_rejection(candidate, context).is_none()
    }

    /// Rule names in evaluation order.
    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    /// Number of rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether the set has no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::standard()
    }
}

impl std::fmt::Debug for RuleSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleSet")
            .field("rules", &self.rule_names())
            .finish()
    }
}
