//! # takeoff_core - Building Quantity Takeoff Engine
//!
//! `takeoff_core` turns raw component dimensions entered by a user into
//! derived areas, volumes and costs, keeps them in per-category
//! repositories, and builds door/window schedules that cut across several
//! wall categories.
//!
//! ## Design Philosophy
//!
//! - **Soft failures**: bad input becomes `"0.00"`, `false` or a no-op, never a panic
//! - **Derived, not edited**: volumes and costs are recomputed from raw fields on every write
//! - **No globals**: a [`Project`] owns every repository and is passed by reference
//! - **No hidden I/O**: mutate a repository, then push a snapshot to a [`PersistencePort`]
//!
//! ## Quick Start
//!
//! ```rust
//! use takeoff_core::components::{OpeningKind, RetainingWallForm};
//! use takeoff_core::project::Project;
//! use uuid::Uuid;
//!
//! let mut project = Project::new("Site Engineer", "24-117", "Client");
//!
//! // Live preview while the form is being typed
//! project.retaining_walls.set_form_data(RetainingWallForm::new("10", "6", "12"));
//! assert_eq!(project.retaining_walls.calculate_volume(), "60.00");
//!
//! // Confirm
//! if project.retaining_walls.validate_form() {
//!     let form = project.retaining_walls.form_data().clone();
//!     project.retaining_walls.add(Uuid::new_v4(), form);
//! }
//! assert_eq!(project.retaining_walls.total_volume(), 60.0);
//! assert!(project.schedule(OpeningKind::Door).is_empty());
//! ```
//!
//! ## Modules
//!
//! - [`components`] - Category records, forms and openings
//! - [`calculations`] - Pure area/volume/cost formulas
//! - [`repository`] - Ordered per-category collections with serial renumbering
//! - [`schedule`] - Door/window schedules across wall categories
//! - [`rollup`] - Volume and cost sums
//! - [`validation`] - Required-field checks
//! - [`project`] - Application context and persistence port
//! - [`file_io`] - Snapshot directories and project files with atomic saves and locking
//! - [`units`] - Feet/inch unit wrappers
//! - [`errors`] - Structured error types

pub mod calculations;
pub mod components;
pub mod errors;
pub mod file_io;
pub mod project;
pub mod repository;
pub mod rollup;
pub mod schedule;
pub mod units;
pub mod validation;

// Re-export commonly used types at crate root for convenience
pub use components::{Category, Component, ComponentForm, OpeningKind};
pub use errors::{TakeoffError, TakeoffResult};
pub use file_io::{load_project, save_project, FileSnapshotStore, StoreLock};
pub use project::{MemorySnapshotStore, PersistencePort, Project};
pub use repository::Repository;
pub use schedule::{build_schedule, ScheduleRow};
