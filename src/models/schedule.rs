//! Assignment grid (the rotation output).
//!
//! Rows are service dates in ascending order, columns are roles in
//! declared order, and each cell holds a volunteer name or nothing. An
//! empty cell means no eligible candidate was found (or a human cleared it).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::{Result, RotaError};
use crate::models::calendar::ensure_ascending;

/// A rectangular dates × roles grid of volunteer names.
///
/// Deserialization goes through [`AssignmentGrid::from_rows`], so a
/// loaded grid is always rectangular with ascending dates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawAssignmentGrid")]
pub struct AssignmentGrid {
    dates: Vec<NaiveDate>,
    roles: Vec<String>,
    cells: Vec<Vec<Option<String>>>,
}

/// Unchecked wire form of [`AssignmentGrid`].
#[derive(Deserialize)]
struct RawAssignmentGrid {
    dates: Vec<NaiveDate>,
    roles: Vec<String>,
    cells: Vec<Vec<Option<String>>>,
}

impl TryFrom<RawAssignmentGrid> for AssignmentGrid {
    type Error = RotaError;

    fn try_from(raw: RawAssignmentGrid) -> Result<Self> {
        Self::from_rows(raw.dates, raw.roles, &raw.cells)
    }
}

/// One filled cell, as seen from a volunteer's point of view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Duty {
    /// Service date.
    pub date: NaiveDate,
    /// Role served.
    pub role: String,
}

impl AssignmentGrid {
    /// Creates a grid with every cell empty.
    pub fn new(dates: Vec<NaiveDate>, roles: Vec<String>) -> Self {
        let cells = vec![vec![None; roles.len()]; dates.len()];
        Self {
            dates,
            roles,
            cells,
        }
    }

    /// Builds a grid from existing rows, e.g. a hand-edited sheet.
    ///
    /// Blank or whitespace-only names are stored as empty cells.
    ///
    /// # Errors
    /// - [`RotaError::UnsortedDates`] if dates are not strictly ascending.
    /// - [`RotaError::ShapeMismatch`] if any row length differs from the
    ///   role count or the row count differs from the date count.
    pub fn from_rows<S: AsRef<str>>(
        dates: Vec<NaiveDate>,
        roles: Vec<String>,
        rows: &[Vec<Option<S>>],
    ) -> Result<Self> {
        ensure_ascending(&dates)?;
        let mismatch = |row_len: usize| RotaError::ShapeMismatch {
            expected_rows: dates.len(),
            expected_cols: roles.len(),
            rows: rows.len(),
            cols: row_len,
        };
        if rows.len() != dates.len() {
            return Err(mismatch(rows.first().map_or(roles.len(), Vec::len)));
        }
        if let Some(bad) = rows.iter().find(|r| r.len() != roles.len()) {
            return Err(mismatch(bad.len()));
        }

        let cells = rows
            .iter()
            .map(|row| {
                row.iter()
                    .map(|cell| cell.as_ref().and_then(|s| normalize_name(s.as_ref())))
                    .collect()
            })
            .collect();
        Ok(Self {
            dates,
            roles,
            cells,
        })
    }

    /// Service dates (row keys).
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// Role names (column keys).
    pub fn roles(&self) -> &[String] {
        &self.roles
    }

    /// Number of rows.
    pub fn row_count(&self) -> usize {
        self.dates.len()
    }

    /// Number of columns.
    pub fn column_count(&self) -> usize {
        self.roles.len()
    }

    /// Whether the grid has no cells.
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty() || self.roles.is_empty()
    }

    /// Cells of one row.
    pub fn row(&self, row: usize) -> Option<&[Option<String>]> {
        self.cells.get(row).map(Vec::as_slice)
    }

    /// Volunteer in a cell by index.
    pub fn cell(&self, row: usize, col: usize) -> Option<&str> {
        self.cells.get(row)?.get(col)?.as_deref()
    }

    /// Column index of a role.
    pub fn role_index(&self, role: &str) -> Option<usize> {
        self.roles.iter().position(|r| r == role)
    }

    /// Row index of a date.
    pub fn date_index(&self, date: NaiveDate) -> Option<usize> {
        self.dates.binary_search(&date).ok()
    }

    /// Volunteer assigned to `role` on `date`.
    pub fn get(&self, date: NaiveDate, role: &str) -> Option<&str> {
        let row = self.date_index(date)?;
        let col = self.role_index(role)?;
        self.cell(row, col)
    }

    /// Overwrites a cell by key (manual edit). `None` or a blank name
    /// clears it.
    pub fn assign(&mut self, date: NaiveDate, role: &str, volunteer: Option<&str>) -> Result<()> {
        let row = self.date_index(date).ok_or(RotaError::UnknownDate(date))?;
        let col = self
            .role_index(role)
            .ok_or_else(|| RotaError::UnknownRole(role.to_string()))?;
        self.put(row, col, volunteer.and_then(normalize_name));
        Ok(())
    }

    pub(crate) fn put(&mut self, row: usize, col: usize, volunteer: Option<String>) {
        if let Some(cell) = self.cells.get_mut(row).and_then(|r| r.get_mut(col)) {
            *cell = volunteer;
        }
    }

    /// One role's column, top to bottom.
    pub fn column(&self, role: &str) -> Option<Vec<Option<&str>>> {
        let col = self.role_index(role)?;
        Some(
            self.cells
                .iter()
                .map(|row| row.get(col).and_then(Option::as_deref))
                .collect(),
        )
    }

    /// Every duty held by a volunteer, in date then column order.
    pub fn duties_for(&self, volunteer: &str) -> Vec<Duty> {
        let mut duties = Vec::new();
        for (date, row) in self.dates.iter().zip(&self.cells) {
            for (role, cell) in self.roles.iter().zip(row) {
                if cell.as_deref() == Some(volunteer) {
                    duties.push(Duty {
                        date: *date,
                        role: role.clone(),
                    });
                }
            }
        }
        duties
    }

    /// Duties grouped by volunteer, for notification collaborators.
    pub fn duties_by_volunteer(&self) -> BTreeMap<String, Vec<Duty>> {
        let mut by_volunteer: BTreeMap<String, Vec<Duty>> = BTreeMap::new();
        for (date, row) in self.dates.iter().zip(&self.cells) {
            for (role, cell) in self.roles.iter().zip(row) {
                if let Some(name) = cell {
                    by_volunteer.entry(name.clone()).or_default().push(Duty {
                        date: *date,
                        role: role.clone(),
                    });
                }
            }
        }
        by_volunteer
    }

    /// Number of filled cells.
    pub fn filled_count(&self) -> usize {
        self.cells.iter().flatten().filter(|c| c.is_some()).count()
    }

    /// Number of empty cells.
    pub fn empty_count(&self) -> usize {
        (self.row_count() * self.column_count()).saturating_sub(self.filled_count())
    }
}

/// Trims a name; blank becomes `None`.
fn normalize_name(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
