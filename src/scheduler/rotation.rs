//! Round-robin rotation scheduler.
//!
//! # Algorithm
//!
//! Dates are processed in ascending order; within a date, roles in column
//! order. For each (date, role):
//!
//! 1. `start = (cursor[role] + 1) mod |pool|`, or 0 if the role has no
//!    cursor yet.
//! 2. Scan the role's qualified pool circularly from `start`, at most once
//!    around.
//! 3. The first candidate passing every eligibility rule is assigned and
//!    the cursor moves to them.
//! 4. If nobody passes, the cell stays empty and the cursor stays put.
//!
//! After each date, the "served last date" set becomes exactly that date's
//! assignees.
//!
//! # Complexity
//! O(d * r * v * k) where d=dates, r=roles, v=pool size, k=rules.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use crate::config::RotationConfig;
use crate::eligibility::{DayAssignments, RuleSet, SelectionContext};
use crate::error::Result;
use crate::models::calendar::{ensure_ascending, upcoming_service_dates};
use crate::models::{AssignmentGrid, Availability, ConstraintModel, Roster};

/// Per-role round-robin cursors.
///
/// A cursor is the pool index of the last volunteer assigned to the role.
/// A role with no cursor starts at the first qualified volunteer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RotationState {
    cursors: HashMap<String, usize>,
}

impl RotationState {
    /// Creates a state with every role before its first volunteer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Cursor for a role, if it has assigned anyone.
    pub fn cursor(&self, role: &str) -> Option<usize> {
        self.cursors.get(role).copied()
    }

    /// Pool index where the next scan for `role` begins.
    ///
    /// `pool_len` must be non-zero.
    pub fn next_start(&self, role: &str, pool_len: usize) -> usize {
        match self.cursor(role) {
            Some(cursor) => (cursor + 1) % pool_len,
            None => 0,
        }
    }

    /// Moves a role's cursor to a successfully assigned index.
    pub fn advance(&mut self, role: &str, index: usize) {
        self.cursors.insert(role.to_string(), index);
    }

    /// Forgets every cursor.
    pub fn reset(&mut self) {
        self.cursors.clear();
    }

    /// Whether no role has a cursor.
    pub fn is_fresh(&self) -> bool {
        self.cursors.is_empty()
    }
}

/// Input container for one rotation run.
#[derive(Debug, Clone, Default)]
pub struct RotationRequest {
    /// Service dates, strictly ascending.
    pub dates: Vec<NaiveDate>,
    /// Roles and volunteers.
    pub roster: Roster,
    /// Blackout dates.
    pub availability: Availability,
}

impl RotationRequest {
    /// Creates a request over explicit dates.
    pub fn new(dates: Vec<NaiveDate>, roster: Roster) -> Self {
        Self {
            dates,
            roster,
            availability: Availability::new(),
        }
    }

    /// Creates a request covering the planning cycle after `today`.
    pub fn for_next_cycle(today: NaiveDate, roster: Roster, config: &RotationConfig) -> Result<Self> {
        let dates =
            upcoming_service_dates(today, config.cycle_start_month, config.service_weekday)?;
        Ok(Self::new(dates, roster))
    }

    /// Sets the availability table.
    pub fn with_availability(mut self, availability: Availability) -> Self {
        self.availability = availability;
        self
    }
}

/// Result of a rotation run.
#[derive(Debug, Clone)]
pub struct RotationRun {
    /// The filled grid.
    pub grid: AssignmentGrid,
    /// Cursors after the last date, for callers that carry rotation.
    pub state: RotationState,
}

/// Round-robin rotation scheduler.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use u_rotation::models::{Availability, ConstraintModel, Role, Roster, Volunteer};
/// use u_rotation::scheduler::{RotationScheduler, RotationState};
///
/// let roster = Roster::new()
///     .with_role(Role::new("Usher"))
///     .with_volunteer(Volunteer::new("Alice").with_role("Usher"))
///     .with_volunteer(Volunteer::new("Bob").with_role("Usher"));
/// let model = ConstraintModel::build(&roster, Availability::new()).unwrap();
/// let dates: Vec<NaiveDate> = [7, 14, 21]
///     .iter()
///     .map(|&d| NaiveDate::from_ymd_opt(2024, 4, d).unwrap())
///     .collect();
///
/// let mut state = RotationState::new();
/// let grid = RotationScheduler::new()
///     .schedule(&dates, &model, &mut state)
///     .unwrap();
/// assert_eq!(grid.column("Usher").unwrap(), vec![Some("Alice"), Some("Bob"), Some("Alice")]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct RotationScheduler {
    rules: RuleSet,
}

impl RotationScheduler {
    /// Creates a scheduler with the standard rule set.
    pub fn new() -> Self {
        Self {
            rules: RuleSet::standard(),
        }
    }

    /// Replaces the eligibility rules.
    pub fn with_rules(mut self, rules: RuleSet) -> Self {
        self.rules = rules;
        self
    }

    /// Eligibility rules in use.
    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Fills a grid for `dates`, advancing `state`.
    ///
    /// # Errors
    /// [`crate::RotaError::UnsortedDates`] if dates are not strictly
    /// ascending. Unfillable slots are never errors.
    pub fn schedule(
        &self,
        dates: &[NaiveDate],
        constraints: &ConstraintModel,
        state: &mut RotationState,
    ) -> Result<AssignmentGrid> {
        ensure_ascending(dates)?;

        let roles = constraints.roles();
        let mut grid = AssignmentGrid::new(dates.to_vec(), constraints.role_names());
        let mut served_last_date: HashSet<String> = HashSet::new();

        for (row, &date) in dates.iter().enumerate() {
            let mut day = DayAssignments::new();

            for (col, role) in roles.iter().enumerate() {
                let pool = constraints.qualified(col);
                if pool.is_empty() {
                    continue;
                }

                let start = state.next_start(&role.name, pool.len());
                let chosen = {
                    let context = SelectionContext {
                        date,
                        role,
                        day: &day,
                        served_last_date: &served_last_date,
                        constraints,
                    };
                    (0..pool.len())
                        .map(|step| (start + step) % pool.len())
                        .find(|&index| match self.rules.first_rejection(&pool[index], &context) {
                            Some(rule) => {
                                tracing::trace!(
                                    %date,
                                    role = %role.name,
                                    candidate = %pool[index],
                                    rule,
                                    "Candidate rejected"
                                );
                                false
                            }
                            None => true,
                        })
                };

                match chosen {
                    Some(index) => {
                        let volunteer = &pool[index];
                        state.advance(&role.name, index);
                        day.record(volunteer, role.floating);
                        grid.put(row, col, Some(volunteer.clone()));
                    }
                    None => {
                        tracing::debug!(%date, role = %role.name, "No eligible volunteer, leaving slot empty");
                    }
                }
            }

            served_last_date = day.into_served();
        }

        Ok(grid)
    }

    /// Runs a full request: applies configuration, builds the constraint
    /// model and fills the grid.
    ///
    /// `carried` cursors are only honoured when
    /// [`RotationConfig::carry_rotation`] is set; otherwise every role
    /// starts from its first qualified volunteer.
    ///
    /// # Errors
    /// Roster validation and date ordering errors; nothing is produced on
    /// failure.
    pub fn run(
        &self,
        request: &RotationRequest,
        config: &RotationConfig,
        carried: Option<RotationState>,
    ) -> Result<RotationRun> {
        let mut roster = request.roster.clone();
        roster.apply_floating(&config.floating_roles);
        let constraints = ConstraintModel::build(&roster, request.availability.clone())?;

        let mut state = match carried {
            Some(prior) if config.carry_rotation => prior,
            Some(_) => {
                tracing::debug!("Rotation carry-over disabled, starting fresh");
                RotationState::new()
            }
            None => RotationState::new(),
        };

        let grid = self.schedule(&request.dates, &constraints, &mut state)?;
        tracing::info!(
            dates = grid.row_count(),
            roles = grid.column_count(),
            filled = grid.filled_count(),
            empty = grid.empty_count(),
            "Rotation complete"
        );

        Ok(RotationRun { grid, state })
    }
}
