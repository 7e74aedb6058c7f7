//! # File I/O Module
//!
//! Durable storage for projects:
//! - **Snapshot store**: one `<category>-storage.json` file per category in a
//!   directory, implementing [`PersistencePort`]
//! - **Project files**: a whole project as one `.tko` JSON file
//! - **Atomic saves**: write to .tmp, sync, rename to prevent corruption
//! - **Store locking**: one writer per storage directory
//! - **Version validation**: ensure schema compatibility
//!
//! ## Example
//!
//! ```rust,no_run
//! use takeoff_core::components::{BeamForm, Category};
//! use takeoff_core::file_io::FileSnapshotStore;
//! use takeoff_core::project::Project;
//! use std::path::Path;
//! use uuid::Uuid;
//!
//! let mut store = FileSnapshotStore::open(Path::new("takeoff-data"), "estimator@company.com")?;
//! let mut project = Project::load_from(&store)?;
//!
//! project.beams.add(Uuid::new_v4(), BeamForm::new("4", "10", "12", "18"));
//! project.notify(Category::Beam, &mut store)?;
//!
//! // Lock is released when the store is dropped
//! drop(store);
//! # Ok::<(), takeoff_core::errors::TakeoffError>(())
//! ```

use std::fs::{self, File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::{TakeoffError, TakeoffResult};
use crate::project::{PersistencePort, Project, ProjectFile, SCHEMA_VERSION};

/// Name of the lock file kept inside a storage directory
pub const LOCK_FILE_NAME: &str = ".takeoff.lock";

/// Who holds a storage directory, as written into its lock file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreHolder {
    pub user_id: String,
    pub opened_at: DateTime<Utc>,
}

/// Exclusive writer lock on a storage directory.
///
/// The OS lock (fs2) decides ownership. The holder JSON in the lock file is
/// only there to name the holder in errors, so a lock file left behind by a
/// crashed writer does not block anyone.
#[derive(Debug)]
pub struct StoreLock {
    path: PathBuf,
    file: File,
    holder: StoreHolder,
}

impl StoreLock {
    pub fn acquire(dir: &Path, user_id: impl Into<String>) -> TakeoffResult<Self> {
        let path = dir.join(LOCK_FILE_NAME);
        let io_error = |operation: &str, e: std::io::Error| {
            TakeoffError::file_error(operation, path.display().to_string(), e.to_string())
        };

        let mut file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&path)
            .map_err(|e| io_error("open lock", e))?;

        if file.try_lock_exclusive().is_err() {
            let (locked_by, since) = match read_holder(&mut file) {
                Some(holder) => (holder.user_id, holder.opened_at.to_rfc3339()),
                None => ("another process".to_string(), "unknown".to_string()),
            };
            return Err(TakeoffError::file_locked(dir.display().to_string(), locked_by, since));
        }

        let holder = StoreHolder {
            user_id: user_id.into(),
            opened_at: Utc::now(),
        };
        let json = serde_json::to_vec_pretty(&holder)?;
        file.set_len(0).map_err(|e| io_error("truncate lock", e))?;
        file.seek(SeekFrom::Start(0)).map_err(|e| io_error("rewind lock", e))?;
        file.write_all(&json).map_err(|e| io_error("write lock", e))?;
        file.sync_all().map_err(|e| io_error("sync lock", e))?;

        Ok(StoreLock { path, file, holder })
    }

    /// Current holder of `dir`, if a live writer has it open
    pub fn holder_of(dir: &Path) -> Option<StoreHolder> {
        let mut file = File::open(dir.join(LOCK_FILE_NAME)).ok()?;
        if file.try_lock_shared().is_ok() {
            // Unlocked on drop
            return None;
        }
        read_holder(&mut file)
    }

    pub fn holder(&self) -> &StoreHolder {
        &self.holder
    }
}

impl Drop for StoreLock {
    fn drop(&mut self) {
        let _ = self.file.unlock();
        let _ = fs::remove_file(&self.path);
    }
}

fn read_holder(file: &mut File) -> Option<StoreHolder> {
    let mut contents = String::new();
    file.read_to_string(&mut contents).ok()?;
    serde_json::from_str(&contents).ok()
}

fn read_to_string(path: &Path, operation: &str) -> TakeoffResult<String> {
    fs::read_to_string(path)
        .map_err(|e| TakeoffError::file_error(operation, path.display().to_string(), e.to_string()))
}

/// Write `bytes` to `path` through a synced temp file and a rename
fn write_atomic(path: &Path, bytes: &[u8]) -> TakeoffResult<()> {
    let mut tmp_name = path.as_os_str().to_owned();
    tmp_name.push(".tmp");
    let tmp_path = PathBuf::from(tmp_name);

    let mut tmp_file = File::create(&tmp_path).map_err(|e| {
        TakeoffError::file_error("create temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.write_all(bytes).map_err(|e| {
        TakeoffError::file_error("write temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.sync_all().map_err(|e| {
        TakeoffError::file_error("sync temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        TakeoffError::file_error("rename to final", path.display().to_string(), e.to_string())
    })?;

    Ok(())
}

// ============================================================================
// Snapshot store
// ============================================================================

/// Directory-backed [`PersistencePort`]: one JSON file per storage key.
#[derive(Debug)]
pub struct FileSnapshotStore {
    dir: PathBuf,
    lock: Option<StoreLock>,
}

impl FileSnapshotStore {
    /// Open (creating if needed) a storage directory for writing.
    ///
    /// Holds an exclusive lock on the directory until dropped.
    pub fn open(dir: &Path, user_id: impl Into<String>) -> TakeoffResult<Self> {
        fs::create_dir_all(dir)
            .map_err(|e| TakeoffError::file_error("create dir", dir.display().to_string(), e.to_string()))?;
        let lock = StoreLock::acquire(dir, user_id)?;
        tracing::info!(dir = %dir.display(), user = %lock.holder().user_id, "snapshot store opened");
        Ok(FileSnapshotStore {
            dir: dir.to_path_buf(),
            lock: Some(lock),
        })
    }

    /// Open a storage directory for reading only. No lock is taken and
    /// [`PersistencePort::persist`] is refused.
    pub fn open_read_only(dir: &Path) -> TakeoffResult<Self> {
        if !dir.is_dir() {
            return Err(TakeoffError::file_error(
                "open",
                dir.display().to_string(),
                "not a directory",
            ));
        }
        if let Some(holder) = StoreLock::holder_of(dir) {
            tracing::info!(dir = %dir.display(), holder = %holder.user_id, "reading store locked by another user");
        }
        Ok(FileSnapshotStore {
            dir: dir.to_path_buf(),
            lock: None,
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn is_read_only(&self) -> bool {
        self.lock.is_none()
    }

    /// File holding the snapshot for `storage_key`
    pub fn path_for(&self, storage_key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", storage_key))
    }
}

impl PersistencePort for FileSnapshotStore {
    fn persist(&mut self, storage_key: &str, snapshot: &Value) -> TakeoffResult<()> {
        let path = self.path_for(storage_key);
        if self.is_read_only() {
            return Err(TakeoffError::file_error(
                "write",
                path.display().to_string(),
                "store was opened read-only",
            ));
        }
        let json = serde_json::to_string_pretty(snapshot)?;
        write_atomic(&path, json.as_bytes())?;
        tracing::debug!(storage_key, path = %path.display(), "snapshot written");
        Ok(())
    }

    fn fetch(&self, storage_key: &str) -> TakeoffResult<Option<Value>> {
        let path = self.path_for(storage_key);
        if !path.exists() {
            return Ok(None);
        }
        let contents = read_to_string(&path, "read snapshot")?;
        let value = serde_json::from_str(&contents).map_err(|e| {
            TakeoffError::invalid_snapshot(storage_key, format!("invalid JSON in {}: {}", path.display(), e))
        })?;
        Ok(Some(value))
    }
}

// ============================================================================
// Project files
// ============================================================================

/// Save a whole project to one file with atomic write semantics.
///
/// ```rust,no_run
/// use takeoff_core::file_io::save_project;
/// use takeoff_core::project::Project;
/// use std::path::Path;
///
/// let project = Project::new("Estimator", "25-001", "Client");
/// save_project(&project, Path::new("myproject.tko"))?;
/// # Ok::<(), takeoff_core::errors::TakeoffError>(())
/// ```
pub fn save_project(project: &Project, path: &Path) -> TakeoffResult<()> {
    let json = serde_json::to_string_pretty(&project.to_file()?)?;
    write_atomic(path, json.as_bytes())?;
    tracing::info!(path = %path.display(), "project saved");
    Ok(())
}

/// Load a whole project from a file.
///
/// # Returns
///
/// * `Ok(Project)` - Successfully loaded project
/// * `Err(TakeoffError::VersionMismatch)` - File version is incompatible
/// * `Err(TakeoffError::SerializationError)` - Invalid JSON
/// * `Err(TakeoffError::FileError)` - I/O error
pub fn load_project(path: &Path) -> TakeoffResult<Project> {
    let contents = read_to_string(path, "read")?;

    let file: ProjectFile = serde_json::from_str(&contents).map_err(|e| TakeoffError::SerializationError {
        reason: format!("Invalid JSON in {}: {}", path.display(), e),
    })?;

    validate_version(file.version())?;

    let project = Project::from_file(&file)?;
    tracing::info!(path = %path.display(), job = %project.meta.job_id, "project loaded");
    Ok(project)
}

/// `major.minor` of a version string
fn schema_line(version: &str) -> Option<(u32, u32)> {
    let mut parts = version.trim().split('.');
    let major = parts.next()?.parse().ok()?;
    let minor = parts.next()?.parse().ok()?;
    Some((major, minor))
}

/// A file is readable when it was written under the same major version and
/// an equal or older minor version. Patch levels never matter.
fn validate_version(file_version: &str) -> TakeoffResult<()> {
    let readable = match (schema_line(file_version), schema_line(SCHEMA_VERSION)) {
        (Some((file_major, file_minor)), Some((major, minor))) => file_major == major && file_minor <= minor,
        _ => false,
    };
    if readable {
        Ok(())
    } else {
        Err(TakeoffError::VersionMismatch {
            file_version: file_version.to_string(),
            expected_version: SCHEMA_VERSION.to_string(),
        })
    }
}
