//! Conflict detection over completed (possibly hand-edited) grids.
//!
//! Flags three categories of rule violations:
//! - **Same-day duplicate**: one volunteer in several cells of a row
//! - **Consecutive-week duplicate**: one volunteer in two adjacent rows
//! - **Paired conflict**: a volunteer and their partner in the same row
//!
//! Overlapping marks resolve by `ViolationKind` precedence (paired beats
//! consecutive beats same-day).

mod detector;

pub use detector::{clear_annotations, ConflictDetector, ConflictReport};
