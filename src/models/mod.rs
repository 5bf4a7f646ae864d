//! Rotation domain models.
//!
//! Provides the data types shared by the rotation engine and the conflict
//! detector: who can serve, when, with which restrictions, and the grids
//! both engines produce.
//!
//! # Grid Shapes
//!
//! | Type | Rows | Columns | Cell |
//! |------|------|---------|------|
//! | `AssignmentGrid` | service dates | roles | volunteer name or empty |
//! | `AnnotationGrid` | service dates | roles | `ViolationKind` |

mod annotation;
mod availability;
pub mod calendar;
mod constraint;
mod role;
mod roster;
mod schedule;
mod volunteer;

pub use annotation::{AnnotationGrid, Violation, ViolationKind};
pub use availability::Availability;
pub use calendar::ServiceWindow;
pub use constraint::{ConstraintModel, Pairing};
pub use role::Role;
pub use roster::Roster;
pub use schedule::{AssignmentGrid, Duty};
pub use volunteer::Volunteer;
