//! # Project Context
//!
//! The `Project` struct owns one repository per component category and is
//! passed by reference to anything that reads or mutates them. There is no
//! global store.
//!
//! ## Structure
//!
//! ```text
//! Project
//! ├── meta: ProjectMetadata (version, engineer, job info, timestamps)
//! ├── exterior_walls / interior_walls / mumty_walls: Repository<WallRecord>
//! ├── basement_walls: Repository<BasementWallRecord>
//! ├── beams, columns, slabs, roofs, retaining_walls, septic_tanks
//! ```
//!
//! ## Persistence
//!
//! Repositories do no I/O. After a mutation the caller hands the touched
//! category to a [`PersistencePort`] with [`Project::notify`]:
//!
//! ```rust
//! use takeoff_core::components::{Category, SlabForm};
//! use takeoff_core::project::{MemorySnapshotStore, Project};
//! use uuid::Uuid;
//!
//! let mut project = Project::new("Site Engineer", "24-117", "Client");
//! let mut store = MemorySnapshotStore::default();
//!
//! project.slabs.add(Uuid::new_v4(), SlabForm::new("400", "6"));
//! project.notify(Category::Slab, &mut store)?;
//!
//! assert!(store.get("slab-storage").is_some());
//! # Ok::<(), takeoff_core::errors::TakeoffError>(())
//! ```

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::components::{
    BasementWallRecord, BeamRecord, Category, ColumnRecord, OpeningKind, RetainingWallRecord,
    RoofRecord, SepticTankRecord, SlabRecord, WallRecord,
};
use crate::errors::TakeoffResult;
use crate::repository::Repository;
use crate::schedule::{build_schedule, ScheduleRow};

/// Current schema version for project files
pub const SCHEMA_VERSION: &str = "0.1.0";

/// Receives a category snapshot after every mutation.
///
/// Implementations decide where snapshots live. Writes are independent per
/// category; nothing ties two categories into one transaction.
pub trait PersistencePort {
    /// Store `snapshot` under `storage_key` (e.g. `"beam-storage"`)
    fn persist(&mut self, storage_key: &str, snapshot: &Value) -> TakeoffResult<()>;

    /// Fetch the snapshot stored under `storage_key`, if any
    fn fetch(&self, storage_key: &str) -> TakeoffResult<Option<Value>>;
}

/// In-memory persistence port
#[derive(Debug, Clone, Default)]
pub struct MemorySnapshotStore {
    snapshots: BTreeMap<String, Value>,
}

impl MemorySnapshotStore {
    pub fn get(&self, storage_key: &str) -> Option<&Value> {
        self.snapshots.get(storage_key)
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}

impl PersistencePort for MemorySnapshotStore {
    fn persist(&mut self, storage_key: &str, snapshot: &Value) -> TakeoffResult<()> {
        self.snapshots.insert(storage_key.to_string(), snapshot.clone());
        Ok(())
    }

    fn fetch(&self, storage_key: &str) -> TakeoffResult<Option<Value>> {
        Ok(self.snapshots.get(storage_key).cloned())
    }
}

/// Project metadata stored in the file header.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectMetadata {
    /// Schema version (for migration compatibility)
    pub version: String,

    /// Name of the responsible engineer or estimator
    pub engineer: String,

    /// Job/project number
    pub job_id: String,

    /// Client name
    pub client: String,

    /// When the project was created
    pub created: DateTime<Utc>,

    /// When the project was last modified
    pub modified: DateTime<Utc>,
}

/// Per-category rollup line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotals {
    pub category: Category,
    pub records: usize,
    /// Cubic feet
    pub volume: f64,
    pub cost: f64,
}

/// Application context owning every component repository.
#[derive(Debug, Clone)]
pub struct Project {
    pub meta: ProjectMetadata,
    pub exterior_walls: Repository<WallRecord>,
    pub interior_walls: Repository<WallRecord>,
    pub mumty_walls: Repository<WallRecord>,
    pub basement_walls: Repository<BasementWallRecord>,
    pub beams: Repository<BeamRecord>,
    pub columns: Repository<ColumnRecord>,
    pub slabs: Repository<SlabRecord>,
    pub roofs: Repository<RoofRecord>,
    pub retaining_walls: Repository<RetainingWallRecord>,
    pub septic_tanks: Repository<SepticTankRecord>,
}

/// Run `$body` with `$repo` bound to the repository for `$category`
macro_rules! with_repository {
    ($project:expr, $category:expr, |$repo:ident| $body:expr) => {
        match $category {
            Category::ExteriorWall => { let $repo = &$project.exterior_walls; $body }
            Category::InteriorWall => { let $repo = &$project.interior_walls; $body }
            Category::MumtyWall => { let $repo = &$project.mumty_walls; $body }
            Category::BasementWall => { let $repo = &$project.basement_walls; $body }
            Category::Beam => { let $repo = &$project.beams; $body }
            Category::Column => { let $repo = &$project.columns; $body }
            Category::Slab => { let $repo = &$project.slabs; $body }
            Category::Roof => { let $repo = &$project.roofs; $body }
            Category::RetainingWall => { let $repo = &$project.retaining_walls; $body }
            Category::SepticTank => { let $repo = &$project.septic_tanks; $body }
        }
    };
}

impl Project {
    /// Create a new empty project.
    ///
    /// # Example
    ///
    /// ```rust
    /// use takeoff_core::project::Project;
    ///
    /// let project = Project::new("John Doe", "25-001", "Client Corp");
    /// assert_eq!(project.meta.engineer, "John Doe");
    /// assert!(project.beams.is_empty());
    /// ```
    pub fn new(engineer: impl Into<String>, job_id: impl Into<String>, client: impl Into<String>) -> Self {
        let now = Utc::now();
        Project {
            meta: ProjectMetadata {
                version: SCHEMA_VERSION.to_string(),
                engineer: engineer.into(),
                job_id: job_id.into(),
                client: client.into(),
                created: now,
                modified: now,
            },
            exterior_walls: Repository::new(Category::ExteriorWall),
            interior_walls: Repository::new(Category::InteriorWall),
            mumty_walls: Repository::new(Category::MumtyWall),
            basement_walls: Repository::new(Category::BasementWall),
            beams: Repository::new(Category::Beam),
            columns: Repository::new(Category::Column),
            slabs: Repository::new(Category::Slab),
            roofs: Repository::new(Category::Roof),
            retaining_walls: Repository::new(Category::RetainingWall),
            septic_tanks: Repository::new(Category::SepticTank),
        }
    }

    /// Update the modified timestamp.
    pub fn touch(&mut self) {
        self.meta.modified = Utc::now();
    }

    pub fn record_count(&self, category: Category) -> usize {
        with_repository!(self, category, |repo| repo.len())
    }

    /// Persisted snapshot of one category
    pub fn snapshot(&self, category: Category) -> TakeoffResult<Value> {
        with_repository!(self, category, |repo| repo.snapshot())
    }

    /// Replace one category's repository with the contents of a snapshot
    pub fn restore(&mut self, category: Category, snapshot: &Value) -> TakeoffResult<()> {
        match category {
            Category::ExteriorWall => self.exterior_walls = Repository::restore(category, snapshot)?,
            Category::InteriorWall => self.interior_walls = Repository::restore(category, snapshot)?,
            Category::MumtyWall => self.mumty_walls = Repository::restore(category, snapshot)?,
            Category::BasementWall => self.basement_walls = Repository::restore(category, snapshot)?,
            Category::Beam => self.beams = Repository::restore(category, snapshot)?,
            Category::Column => self.columns = Repository::restore(category, snapshot)?,
            Category::Slab => self.slabs = Repository::restore(category, snapshot)?,
            Category::Roof => self.roofs = Repository::restore(category, snapshot)?,
            Category::RetainingWall => self.retaining_walls = Repository::restore(category, snapshot)?,
            Category::SepticTank => self.septic_tanks = Repository::restore(category, snapshot)?,
        }
        Ok(())
    }

    /// Push the current snapshot of `category` to a persistence port
    pub fn notify<P: PersistencePort + ?Sized>(&mut self, category: Category, port: &mut P) -> TakeoffResult<()> {
        self.touch();
        let snapshot = self.snapshot(category)?;
        port.persist(&category.storage_key(), &snapshot)?;
        tracing::debug!(%category, "snapshot persisted");
        Ok(())
    }

    /// Push every category to a persistence port
    pub fn notify_all<P: PersistencePort + ?Sized>(&mut self, port: &mut P) -> TakeoffResult<()> {
        for category in Category::ALL {
            self.notify(category, port)?;
        }
        Ok(())
    }

    /// Build a project from whatever snapshots a port holds.
    ///
    /// Categories with no stored snapshot start empty.
    pub fn load_from<P: PersistencePort + ?Sized>(port: &P) -> TakeoffResult<Project> {
        let mut project = Project::default();
        for category in Category::ALL {
            if let Some(snapshot) = port.fetch(&category.storage_key())? {
                project.restore(category, &snapshot)?;
                tracing::debug!(%category, records = project.record_count(category), "snapshot restored");
            }
        }
        Ok(project)
    }

    /// Volume and cost rollup for one category
    pub fn totals(&self, category: Category) -> CategoryTotals {
        with_repository!(self, category, |repo| CategoryTotals {
            category,
            records: repo.len(),
            volume: repo.total_volume(),
            cost: repo.total_cost(),
        })
    }

    /// Rollups for every category, in [`Category::ALL`] order
    pub fn all_totals(&self) -> Vec<CategoryTotals> {
        Category::ALL.into_iter().map(|c| self.totals(c)).collect()
    }

    /// Door or window schedule across the wall repositories
    pub fn schedule(&self, kind: OpeningKind) -> Vec<ScheduleRow> {
        build_schedule(self, kind)
    }

    /// Serializable form of the whole project
    pub fn to_file(&self) -> TakeoffResult<ProjectFile> {
        let mut snapshots = BTreeMap::new();
        for category in Category::ALL {
            snapshots.insert(category.storage_key(), self.snapshot(category)?);
        }
        Ok(ProjectFile {
            meta: self.meta.clone(),
            snapshots,
        })
    }

    /// Rebuild a project from its serialized form
    pub fn from_file(file: &ProjectFile) -> TakeoffResult<Project> {
        let mut project = Project::default();
        project.meta = file.meta.clone();
        for (key, snapshot) in &file.snapshots {
            let category = Category::from_key(key)?;
            project.restore(category, snapshot)?;
        }
        Ok(project)
    }
}

impl Default for Project {
    fn default() -> Self {
        Project::new("", "", "")
    }
}

/// On-disk shape of a whole project: metadata plus one snapshot per category
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectFile {
    pub meta: ProjectMetadata,
    pub snapshots: BTreeMap<String, Value>,
}

impl ProjectFile {
    pub fn version(&self) -> &str {
        &self.meta.version
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{BeamForm, OpeningForm, RoofForm, SepticTankForm, WallForm};
    use uuid::Uuid;

    #[test]
    fn test_project_creation() {
        let project = Project::new("John Doe", "25-001", "Acme Corp");
        assert_eq!(project.meta.engineer, "John Doe");
        assert_eq!(project.meta.version, SCHEMA_VERSION);
        for category in Category::ALL {
            assert_eq!(project.record_count(category), 0);
            assert_eq!(project.snapshot(category).unwrap()[category.data_key()], serde_json::json!([]));
        }
    }

    #[test]
    fn test_notify_persists_only_touched_category() {
        let mut project = Project::default();
        let mut store = MemorySnapshotStore::default();

        project.beams.add(Uuid::new_v4(), BeamForm::new("4", "10", "12", "18"));
        project.notify(Category::Beam, &mut store).unwrap();

        assert_eq!(store.len(), 1);
        let snapshot = store.get("beam-storage").unwrap();
        assert_eq!(snapshot["beamData"][0]["volume"], "60.00");
        assert!(snapshot["editingId"].is_null());
    }

    #[test]
    fn test_load_from_port() {
        let mut project = Project::default();
        let mut store = MemorySnapshotStore::default();
        let wall_id = Uuid::new_v4();

        let mut wall = WallForm::default();
        wall.door = OpeningForm::new("Wood", "21", "500", "2");
        project.exterior_walls.add(wall_id, wall);
        project.septic_tanks.add(Uuid::new_v4(), SepticTankForm::new("8", "48", "60"));
        project.notify_all(&mut store).unwrap();

        let loaded = Project::load_from(&store).unwrap();
        assert_eq!(loaded.exterior_walls.get_by_id(wall_id).unwrap().sr_no, 1);
        assert_eq!(loaded.septic_tanks.total_volume(), 160.0);
        assert_eq!(loaded.schedule(OpeningKind::Door).len(), 1);
    }

    #[test]
    fn test_restore_wrong_shape_is_error() {
        let mut project = Project::default();
        let err = project
            .restore(Category::Roof, &serde_json::json!({ "roofData": "nope" }))
            .unwrap_err();
        assert_eq!(err.error_code(), "INVALID_SNAPSHOT");
    }

    #[test]
    fn test_totals() {
        let mut project = Project::default();
        let mut roof = RoofForm::new("120", "12");
        roof.cost_per_unit = "5".to_string();
        project.roofs.add(Uuid::new_v4(), roof);
        project.roofs.add(Uuid::new_v4(), RoofForm::new("30", "6"));

        let totals = project.totals(Category::Roof);
        assert_eq!(totals.records, 2);
        assert_eq!(totals.volume, 135.0);
        assert_eq!(totals.cost, 600.0);
        assert_eq!(project.all_totals().len(), Category::ALL.len());
    }

    #[test]
    fn test_project_file_roundtrip() {
        let mut project = Project::new("Jane Estimator", "25-042", "Test Client");
        let id = Uuid::new_v4();
        project.beams.add(id, BeamForm::new("4", "10", "12", "18"));

        let json = serde_json::to_string_pretty(&project.to_file().unwrap()).unwrap();
        assert!(json.contains("Jane Estimator"));
        assert!(json.contains("beam-storage"));

        let file: ProjectFile = serde_json::from_str(&json).unwrap();
        let loaded = Project::from_file(&file).unwrap();
        assert_eq!(loaded.meta.job_id, "25-042");
        assert_eq!(loaded.beams.get_by_id(id).unwrap().volume, "60.00");
    }
}
