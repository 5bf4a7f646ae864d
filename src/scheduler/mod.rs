//! Rotation scheduler and KPI evaluation.
//!
//! # Algorithm
//!
//! `RotationScheduler` fills a dates × roles grid with a per-role
//! round-robin cursor, skipping candidates that fail any eligibility rule.
//! Skipped volunteers are not penalized: the cursor only moves to whoever
//! is actually assigned.
//!
//! # KPI
//!
//! `RotationKpi` computes coverage (fill rate, gaps per role) and fairness
//! (load per volunteer, load spread).

mod kpi;
mod rotation;

pub use kpi::RotationKpi;
pub use rotation::{RotationRequest, RotationRun, RotationScheduler, RotationState};
