//! Availability relation.
//!
//! Sparse: only unavailability is stored. A volunteer with no entry for a
//! date is available on it.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

/// Per-volunteer blackout dates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Availability {
    blackouts: HashMap<String, BTreeSet<NaiveDate>>,
}

impl Availability {
    /// Creates an empty relation (everyone available).
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks a volunteer unavailable on a date.
    pub fn with_unavailable(mut self, volunteer: impl Into<String>, date: NaiveDate) -> Self {
        self.mark_unavailable(volunteer, date);
        self
    }

    /// Marks a volunteer unavailable on a date.
    pub fn mark_unavailable(&mut self, volunteer: impl Into<String>, date: NaiveDate) {
        self.blackouts
            .entry(volunteer.into())
            .or_default()
            .insert(date);
    }

    /// Sets an entry. `false` removes any blackout for that date.
    pub fn set(&mut self, volunteer: &str, date: NaiveDate, unavailable: bool) {
        if unavailable {
            self.mark_unavailable(volunteer, date);
        } else if let Some(dates) = self.blackouts.get_mut(volunteer) {
            dates.remove(&date);
            if dates.is_empty() {
                self.blackouts.remove(volunteer);
            }
        }
    }

    /// Whether the volunteer is marked unavailable on `date`.
    #[inline]
    pub fn is_unavailable(&self, volunteer: &str, date: NaiveDate) -> bool {
        self.blackouts
            .get(volunteer)
            .is_some_and(|dates| dates.contains(&date))
    }

    /// Blackout dates for a volunteer, ascending.
    pub fn blackouts_for(&self, volunteer: &str) -> Vec<NaiveDate> {
        self.blackouts
            .get(volunteer)
            .map(|dates| dates.iter().copied().collect())
            .unwrap_or_default()
    }

    /// Total number of (volunteer, date) blackout entries.
    pub fn len(&self) -> usize {
        self.blackouts.values().map(BTreeSet::len).sum()
    }

    /// Whether no blackouts are recorded.
    pub fn is_empty(&self) -> bool {
        self.blackouts.is_empty()
    }
}
