//! Rotation quality metrics (KPIs).
//!
//! Computes coverage and fairness indicators from a filled grid.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Fill Rate | filled cells / total cells |
//! | Unfilled by Role | empty cells per column |
//! | Load by Volunteer | duties per volunteer (0 for qualified but idle) |
//! | Load Spread | max load - min load |

use std::collections::HashMap;

use crate::models::{AssignmentGrid, ConstraintModel};

/// Rotation performance indicators.
#[derive(Debug, Clone)]
pub struct RotationKpi {
    /// Cells in the grid.
    pub total_cells: usize,
    /// Cells with a volunteer.
    pub filled_cells: usize,
    /// Fraction of cells filled (1.0 for an empty grid).
    pub fill_rate: f64,
    /// Empty cells per role.
    pub unfilled_by_role: HashMap<String, usize>,
    /// Duties per volunteer.
    pub load_by_volunteer: HashMap<String, usize>,
    /// Highest load.
    pub max_load: usize,
    /// Lowest load.
    pub min_load: usize,
}

impl RotationKpi {
    /// Computes KPIs for a grid.
    ///
    /// Every volunteer qualified for at least one role is counted, even if
    /// never assigned; names in hand-edited cells that are not qualified
    /// anywhere are counted as well.
    pub fn calculate(grid: &AssignmentGrid, constraints: &ConstraintModel) -> Self {
        let mut load_by_volunteer: HashMap<String, usize> = HashMap::new();
        for index in 0..constraints.roles().len() {
            for name in constraints.qualified(index) {
                load_by_volunteer.entry(name.clone()).or_insert(0);
            }
        }

        let mut unfilled_by_role: HashMap<String, usize> =
            grid.roles().iter().map(|r| (r.clone(), 0)).collect();

        for row in 0..grid.row_count() {
            for (col, role) in grid.roles().iter().enumerate() {
                match grid.cell(row, col) {
                    Some(name) => *load_by_volunteer.entry(name.to_string()).or_insert(0) += 1,
                    None => *unfilled_by_role.entry(role.clone()).or_insert(0) += 1,
                }
            }
        }

        let total_cells = grid.row_count() * grid.column_count();
        let filled_cells = grid.filled_count();
        let fill_rate = if total_cells == 0 {
            1.0
        } else {
            filled_cells as f64 / total_cells as f64
        };

        let max_load = load_by_volunteer.values().copied().max().unwrap_or(0);
        let min_load = load_by_volunteer.values().copied().min().unwrap_or(0);

        Self {
            total_cells,
            filled_cells,
            fill_rate,
            unfilled_by_role,
            load_by_volunteer,
            max_load,
            min_load,
        }
    }

    /// Difference between the busiest and idlest volunteer.
    pub fn load_spread(&self) -> usize {
        self.max_load - self.min_load
    }

    /// Whether the rotation meets the given quality thresholds.
    pub fn meets_thresholds(&self, min_fill_rate: f64, max_spread: usize) -> bool {
        self.fill_rate >= min_fill_rate && self.load_spread() <= max_spread
    }
}
