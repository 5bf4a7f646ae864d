//! Volunteer rotation scheduling for recurring services.
//!
//! Builds a dates × roles assignment grid for the next quarterly cycle of
//! service dates, rotating through each role's qualified volunteers, and
//! audits finished (or hand-edited) grids for rule violations.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Volunteer`, `Role`, `Roster`,
//!   `Availability`, `AssignmentGrid`, `AnnotationGrid`, service calendar
//! - **`validation`**: Roster integrity checks (duplicate names, unknown
//!   roles, partner links)
//! - **`eligibility`**: Pluggable candidate rules (same-day, consecutive
//!   week, partner, unavailability)
//! - **`scheduler`**: Round-robin rotation engine and rotation KPIs
//! - **`conflicts`**: Three-pass violation detector
//! - **`config`**: TOML-backed rotation settings
//! - **`error`**: Crate error type
//!
//! # Rules
//!
//! | Rule | Scheduler | Detector |
//! |------|-----------|----------|
//! | One duty per date (fixed roles) | skip candidate | `SameDayDuplicate` |
//! | No two adjacent dates | skip candidate | `ConsecutiveWeekDuplicate` |
//! | Partners never share a date | skip candidate | `PairedConflict` |
//! | Unavailable dates | skip candidate | not checked |
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use u_rotation::config::RotationConfig;
//! use u_rotation::conflicts::ConflictDetector;
//! use u_rotation::models::{Role, Roster, Volunteer};
//! use u_rotation::scheduler::{RotationRequest, RotationScheduler};
//!
//! let roster = Roster::new()
//!     .with_role(Role::new("Usher"))
//!     .with_volunteer(Volunteer::new("Alice").with_role("Usher"))
//!     .with_volunteer(Volunteer::new("Bob").with_role("Usher"));
//!
//! let today = NaiveDate::from_ymd_opt(2024, 2, 15).unwrap();
//! let config = RotationConfig::new().with_cycle_start_month(1);
//! let request = RotationRequest::for_next_cycle(today, roster.clone(), &config).unwrap();
//!
//! let run = RotationScheduler::new().run(&request, &config, None).unwrap();
//! assert_eq!(run.grid.row_count(), 13);
//! assert_eq!(run.grid.cell(0, 0), Some("Alice"));
//! assert_eq!(run.grid.cell(1, 0), Some("Bob"));
//!
//! let pairing = u_rotation::models::Pairing::from_roster(&roster);
//! assert!(ConflictDetector::new(&pairing).report(&run.grid).is_clean());
//! ```

pub mod config;
pub mod conflicts;
pub mod eligibility;
pub mod error;
pub mod models;
pub mod scheduler;
pub mod validation;

pub use error::{Result, RotaError};
