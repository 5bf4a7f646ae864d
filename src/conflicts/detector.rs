//! Three-pass conflict detector.
//!
//! Each pass produces an independent boolean mask over the grid; the
//! masks are then merged cell by cell, keeping the highest-precedence
//! category. The grid's values are never touched.

use std::collections::{HashMap, HashSet};

use crate::error::Result;
use crate::models::{AnnotationGrid, AssignmentGrid, Pairing, Violation, ViolationKind};

type Mask = Vec<Vec<bool>>;

/// Audit result: per-cell annotations plus their flattened records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConflictReport {
    /// One annotation per grid cell.
    pub annotations: AnnotationGrid,
    /// Flagged cells in row-major order.
    pub violations: Vec<Violation>,
}

impl ConflictReport {
    /// Whether nothing was flagged.
    pub fn is_clean(&self) -> bool {
        self.violations.is_empty()
    }

    /// Flagged cell count per category.
    pub fn counts(&self) -> HashMap<ViolationKind, usize> {
        let mut counts = HashMap::new();
        for v in &self.violations {
            *counts.entry(v.kind).or_insert(0) += 1;
        }
        counts
    }
}

/// Scans assignment grids for rule violations.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use u_rotation::conflicts::ConflictDetector;
/// use u_rotation::models::{AssignmentGrid, Pairing, ViolationKind};
///
/// let date = NaiveDate::from_ymd_opt(2024, 4, 7).unwrap();
/// let grid = AssignmentGrid::from_rows(
///     vec![date],
///     vec!["Usher".into(), "Reader".into()],
///     &[vec![Some("Alice"), Some("Bob")]],
/// )
/// .unwrap();
/// let pairing = Pairing::new().with_pair("Alice", "Bob");
///
/// let annotations = ConflictDetector::new(&pairing).detect(&grid);
/// assert_eq!(annotations.get(0, 0), ViolationKind::PairedConflict);
/// assert_eq!(annotations.get(0, 1), ViolationKind::PairedConflict);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ConflictDetector<'a> {
    pairing: &'a Pairing,
}

impl<'a> ConflictDetector<'a> {
    /// Creates a detector using the given partner relation.
    pub fn new(pairing: &'a Pairing) -> Self {
        Self { pairing }
    }

    /// Computes a fresh annotation grid for `grid`.
    pub fn detect(&self, grid: &AssignmentGrid) -> AnnotationGrid {
        let layers = [
            (ViolationKind::SameDayDuplicate, same_day_duplicates(grid)),
            (
                ViolationKind::ConsecutiveWeekDuplicate,
                consecutive_week_duplicates(grid),
            ),
            (
                ViolationKind::PairedConflict,
                paired_conflicts(grid, self.pairing),
            ),
        ];

        let mut annotations = AnnotationGrid::for_grid(grid);
        for (kind, mask) in &layers {
            for (row, flags) in mask.iter().enumerate() {
                for (col, &flagged) in flags.iter().enumerate() {
                    if flagged {
                        annotations.raise(row, col, *kind);
                    }
                }
            }
        }

        tracing::debug!(
            same_day = annotations.count(ViolationKind::SameDayDuplicate),
            consecutive_week = annotations.count(ViolationKind::ConsecutiveWeekDuplicate),
            paired = annotations.count(ViolationKind::PairedConflict),
            "Conflict scan complete"
        );
        annotations
    }

    /// Replaces `annotations` with a fresh scan of `grid`.
    ///
    /// # Errors
    /// [`crate::RotaError::ShapeMismatch`] if the grids differ in shape;
    /// `annotations` is left untouched in that case.
    pub fn annotate(&self, grid: &AssignmentGrid, annotations: &mut AnnotationGrid) -> Result<()> {
        annotations.ensure_matches(grid)?;
        *annotations = self.detect(grid);
        Ok(())
    }

    /// Scans `grid` and resolves flagged cells into violation records.
    pub fn report(&self, grid: &AssignmentGrid) -> ConflictReport {
        let annotations = self.detect(grid);
        let violations = annotations.collect_violations(grid);
        if !violations.is_empty() {
            tracing::info!(violations = violations.len(), "Assignment grid has conflicts");
        }
        ConflictReport {
            annotations,
            violations,
        }
    }
}

/// Resets every annotation without touching assignments.
pub fn clear_annotations(annotations: &mut AnnotationGrid) {
    annotations.clear();
}

fn empty_mask(grid: &AssignmentGrid) -> Mask {
    vec![vec![false; grid.column_count()]; grid.row_count()]
}

fn row_names(grid: &AssignmentGrid, row: usize) -> HashSet<&str> {
    (0..grid.column_count())
        .filter_map(|col| grid.cell(row, col))
        .collect()
}

/// Pass 1: a name appearing in two or more cells of one row.
fn same_day_duplicates(grid: &AssignmentGrid) -> Mask {
    let mut mask = empty_mask(grid);
    for (row, flags) in mask.iter_mut().enumerate() {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for col in 0..grid.column_count() {
            if let Some(name) = grid.cell(row, col) {
                *counts.entry(name).or_insert(0) += 1;
            }
        }
        for (col, flag) in flags.iter_mut().enumerate() {
            if let Some(name) = grid.cell(row, col) {
                *flag = counts.get(name).is_some_and(|&n| n > 1);
            }
        }
    }
    mask
}

/// Pass 2: a name present in two adjacent rows, marked in both.
fn consecutive_week_duplicates(grid: &AssignmentGrid) -> Mask {
    let mut mask = empty_mask(grid);
    for row in 1..grid.row_count() {
        let previous = row_names(grid, row - 1);
        let current = row_names(grid, row);
        let repeated: HashSet<&str> = previous.intersection(&current).copied().collect();
        if repeated.is_empty() {
            continue;
        }
        for r in [row - 1, row] {
            for col in 0..grid.column_count() {
                if grid.cell(r, col).is_some_and(|name| repeated.contains(name)) {
                    mask[r][col] = true;
                }
            }
        }
    }
    mask
}

/// Pass 3: a cell whose volunteer's partner is in the same row.
fn paired_conflicts(grid: &AssignmentGrid, pairing: &Pairing) -> Mask {
    let mut mask = empty_mask(grid);
    for (row, flags) in mask.iter_mut().enumerate() {
        let names = row_names(grid, row);
        for (col, flag) in flags.iter_mut().enumerate() {
            *flag = grid
                .cell(row, col)
                .and_then(|name| pairing.partner_of(name))
                .is_some_and(|partner| names.contains(partner));
        }
    }
    mask
}
