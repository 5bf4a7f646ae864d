//! Violation annotations over an assignment grid.
//!
//! # Precedence
//! When several categories apply to one cell, the highest wins:
//! `PairedConflict > ConsecutiveWeekDuplicate > SameDayDuplicate > None`.
//! The ordering is the derived `Ord` of [`ViolationKind`].

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::AssignmentGrid;
use crate::error::{Result, RotaError};

/// Classification of a cell.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum ViolationKind {
    /// No rule broken.
    #[default]
    None,
    /// Same volunteer appears more than once on one date.
    SameDayDuplicate,
    /// Volunteer serves on two adjacent service dates.
    ConsecutiveWeekDuplicate,
    /// Volunteer and their partner serve on the same date.
    PairedConflict,
}

impl ViolationKind {
    /// All violation categories, lowest precedence first.
    pub const VIOLATIONS: [ViolationKind; 3] = [
        ViolationKind::SameDayDuplicate,
        ViolationKind::ConsecutiveWeekDuplicate,
        ViolationKind::PairedConflict,
    ];

    /// Whether this marks a violation.
    #[inline]
    pub fn is_violation(self) -> bool {
        self != ViolationKind::None
    }

    /// Short label for reports.
    pub fn label(self) -> &'static str {
        match self {
            ViolationKind::None => "none",
            ViolationKind::SameDayDuplicate => "same-day duplicate",
            ViolationKind::ConsecutiveWeekDuplicate => "consecutive-week duplicate",
            ViolationKind::PairedConflict => "paired conflict",
        }
    }
}

/// One annotation per grid cell.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawAnnotationGrid")]
pub struct AnnotationGrid {
    cells: Vec<Vec<ViolationKind>>,
    cols: usize,
}

#[derive(Deserialize)]
struct RawAnnotationGrid {
    cells: Vec<Vec<ViolationKind>>,
    cols: usize,
}

impl TryFrom<RawAnnotationGrid> for AnnotationGrid {
    type Error = RotaError;

    fn try_from(raw: RawAnnotationGrid) -> Result<Self> {
        let rows = raw.cells.len();
        if let Some(bad) = raw.cells.iter().find(|r| r.len() != raw.cols) {
            return Err(RotaError::ShapeMismatch {
                expected_rows: rows,
                expected_cols: raw.cols,
                rows,
                cols: bad.len(),
            });
        }
        Ok(Self {
            cells: raw.cells,
            cols: raw.cols,
        })
    }
}

/// A flagged cell, resolved to grid keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// Row date.
    pub date: NaiveDate,
    /// Column role.
    pub role: String,
    /// Volunteer in the cell.
    pub volunteer: String,
    /// Category.
    pub kind: ViolationKind,
    /// Human-readable description.
    pub message: String,
}

impl AnnotationGrid {
    /// Creates an all-`None` grid of the given shape.
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            cells: vec![vec![ViolationKind::None; cols]; rows],
            cols,
        }
    }

    /// Creates an all-`None` grid matching an assignment grid.
    pub fn for_grid(grid: &AssignmentGrid) -> Self {
        Self::new(grid.row_count(), grid.column_count())
    }

    /// (rows, cols).
    pub fn shape(&self) -> (usize, usize) {
        (self.cells.len(), self.cols)
    }

    /// Fails unless this grid has the same shape as `grid`.
    pub fn ensure_matches(&self, grid: &AssignmentGrid) -> Result<()> {
        let (rows, cols) = self.shape();
        if rows != grid.row_count() || cols != grid.column_count() {
            return Err(RotaError::ShapeMismatch {
                expected_rows: grid.row_count(),
                expected_cols: grid.column_count(),
                rows,
                cols,
            });
        }
        Ok(())
    }

    /// Annotation of a cell (`None` when out of bounds).
    pub fn get(&self, row: usize, col: usize) -> ViolationKind {
        self.cells
            .get(row)
            .and_then(|r| r.get(col))
            .copied()
            .unwrap_or_default()
    }

    /// Cells of one row.
    pub fn row(&self, row: usize) -> Option<&[ViolationKind]> {
        self.cells.get(row).map(Vec::as_slice)
    }

    /// Overwrites a cell.
    pub fn set(&mut self, row: usize, col: usize, kind: ViolationKind) {
        if let Some(cell) = self.cells.get_mut(row).and_then(|r| r.get_mut(col)) {
            *cell = kind;
        }
    }

    /// Raises a cell to `kind` if it outranks the current mark.
    pub fn raise(&mut self, row: usize, col: usize, kind: ViolationKind) {
        if let Some(cell) = self.cells.get_mut(row).and_then(|r| r.get_mut(col)) {
            *cell = (*cell).max(kind);
        }
    }

    /// Resets every cell to `None`.
    pub fn clear(&mut self) {
        for row in &mut self.cells {
            row.fill(ViolationKind::None);
        }
    }

    /// Whether no cell is flagged.
    pub fn is_clean(&self) -> bool {
        self.cells.iter().flatten().all(|k| !k.is_violation())
    }

    /// Number of cells carrying `kind`.
    pub fn count(&self, kind: ViolationKind) -> usize {
        self.cells.iter().flatten().filter(|&&k| k == kind).count()
    }

    /// Flagged cells as violation records, in row-major order.
    pub fn violations(&self, grid: &AssignmentGrid) -> Result<Vec<Violation>> {
        self.ensure_matches(grid)?;
        Ok(self.collect_violations(grid))
    }

    /// Caller guarantees matching shapes.
    pub(crate) fn collect_violations(&self, grid: &AssignmentGrid) -> Vec<Violation> {
        let mut out = Vec::new();
        for (row, date) in grid.dates().iter().enumerate() {
            for (col, role) in grid.roles().iter().enumerate() {
                let kind = self.get(row, col);
                if !kind.is_violation() {
                    continue;
                }
                if let Some(volunteer) = grid.cell(row, col) {
                    out.push(Violation {
                        date: *date,
                        role: role.clone(),
                        volunteer: volunteer.to_string(),
                        kind,
                        message: format!("{volunteer} ({role}, {date}): {}", kind.label()),
                    });
                }
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_precedence_order() {
        assert!(ViolationKind::PairedConflict > ViolationKind::ConsecutiveWeekDuplicate);
        assert!(ViolationKind::ConsecutiveWeekDuplicate > ViolationKind::SameDayDuplicate);
        assert!(ViolationKind::SameDayDuplicate > ViolationKind::None);
        assert_eq!(ViolationKind::default(), ViolationKind::None);
    }

    #[test]
    fn test_raise_keeps_highest() {
        let mut a = AnnotationGrid::new(1, 2);
        a.raise(0, 0, ViolationKind::ConsecutiveWeekDuplicate);
        a.raise(0, 0, ViolationKind::SameDayDuplicate);
        assert_eq!(a.get(0, 0), ViolationKind::ConsecutiveWeekDuplicate);
        a.raise(0, 0, ViolationKind::PairedConflict);
        assert_eq!(a.get(0, 0), ViolationKind::PairedConflict);
        assert_eq!(a.get(5, 5), ViolationKind::None);
    }

    #[test]
    fn test_clear_and_counts() {
        let mut a = AnnotationGrid::new(2, 2);
        assert!(a.is_clean());
        a.set(0, 1, ViolationKind::SameDayDuplicate);
        a.set(1, 1, ViolationKind::SameDayDuplicate);
        a.set(1, 0, ViolationKind::PairedConflict);
        assert!(!a.is_clean());
        assert_eq!(a.count(ViolationKind::SameDayDuplicate), 2);
        assert_eq!(a.count(ViolationKind::PairedConflict), 1);
        a.clear();
        assert!(a.is_clean());
        assert_eq!(a.shape(), (2, 2));
    }

    #[test]
    fn test_violations_records() {
        let d = NaiveDate::from_ymd_opt(2024, 4, 7).unwrap();
        let grid = AssignmentGrid::from_rows(
            vec![d],
            vec!["Usher".into(), "Reader".into()],
            &[vec![Some("Alice"), Some("Alice")]],
        )
        .unwrap();
        let mut a = AnnotationGrid::for_grid(&grid);
        a.set(0, 0, ViolationKind::SameDayDuplicate);
        a.set(0, 1, ViolationKind::SameDayDuplicate);

        let v = a.violations(&grid).unwrap();
        assert_eq!(v.len(), 2);
        assert_eq!(v[1].role, "Reader");
        assert_eq!(v[1].volunteer, "Alice");
        assert_eq!(v[0].message, "Alice (Usher, 2024-04-07): same-day duplicate");

        let wrong = AnnotationGrid::new(3, 3);
        assert!(matches!(
            wrong.violations(&grid),
            Err(RotaError::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn test_json_rejects_ragged_annotations() {
        let a = AnnotationGrid::new(2, 2);
        let json = serde_json::to_string(&a).unwrap();
        let back: AnnotationGrid = serde_json::from_str(&json).unwrap();
        assert_eq!(back, a);

        let ragged = r#"{"cells":[["None","None"],["None"]],"cols":2}"#;
        let err = serde_json::from_str::<AnnotationGrid>(ragged).unwrap_err();
        assert!(err.to_string().contains("grid shape mismatch"));

        let wide = r#"{"cells":[["None","PairedConflict"]],"cols":1}"#;
        assert!(serde_json::from_str::<AnnotationGrid>(wide).is_err());
    }
}
