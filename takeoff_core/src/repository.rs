//! # Component Repository
//!
//! An ordered, in-memory collection of records for one category, together
//! with the draft form being typed and an advisory editing pointer.
//!
//! ## Structure
//!
//! ```text
//! Repository<R>
//! ├── category: Category
//! ├── form_data: R::Form        (current draft)
//! ├── records: Vec<R>           (srNo always 1..=N in order)
//! └── editing_id: Option<Uuid>  (advisory UI state, not a lock)
//! ```
//!
//! Mutations never fail. Unknown ids on update/delete and duplicate ids on
//! add are ignored and logged. The repository does no I/O; the owner pushes a
//! [`Repository::snapshot`] to a persistence port after mutating.
//!
//! ## Example
//!
//! ```rust
//! use takeoff_core::components::{BeamForm, BeamRecord, Category};
//! use takeoff_core::repository::Repository;
//! use uuid::Uuid;
//!
//! let mut beams: Repository<BeamRecord> = Repository::new(Category::Beam);
//! let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
//! beams.add(a, BeamForm::new("4", "10", "12", "18"));
//! beams.add(b, BeamForm::new("1", "10", "12", "12"));
//! beams.delete(a);
//!
//! assert_eq!(beams.get_by_id(b).map(|r| r.sr_no), Some(1));
//! assert_eq!(beams.total_volume(), 10.0);
//! ```

use std::collections::HashSet;

use serde_json::{Map, Value};
use uuid::Uuid;

use crate::components::{Category, Component, ComponentForm};
use crate::errors::{TakeoffError, TakeoffResult};
use crate::{rollup, validation};

/// Snapshot key holding the draft form
pub const FORM_DATA_KEY: &str = "formData";

/// Snapshot key holding the editing pointer
pub const EDITING_ID_KEY: &str = "editingId";

#[derive(Debug, Clone)]
pub struct Repository<R: Component> {
    category: Category,
    form_data: R::Form,
    records: Vec<R>,
    editing_id: Option<Uuid>,
}

impl<R: Component> Repository<R> {
    pub fn new(category: Category) -> Self {
        Repository {
            category,
            form_data: R::Form::default(),
            records: Vec::new(),
            editing_id: None,
        }
    }

    pub fn category(&self) -> Category {
        self.category
    }

    /// Records in display order
    pub fn records(&self) -> &[R] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    // ------------------------------------------------------------------------
    // Draft form
    // ------------------------------------------------------------------------

    pub fn form_data(&self) -> &R::Form {
        &self.form_data
    }

    pub fn set_form_data(&mut self, form: R::Form) {
        self.form_data = form;
    }

    pub fn reset_form(&mut self) {
        self.form_data = R::Form::default();
    }

    /// Live volume preview of the draft form
    pub fn calculate_volume(&self) -> String {
        self.form_data.calculate_volume()
    }

    pub fn validate_form(&self) -> bool {
        validation::validate(&self.form_data)
    }

    pub fn error_message(&self) -> String {
        validation::error_message(&self.form_data)
    }

    // ------------------------------------------------------------------------
    // Records
    // ------------------------------------------------------------------------

    /// Append a record built from `form`. Returns `false` if `id` is taken.
    pub fn add(&mut self, id: Uuid, form: R::Form) -> bool {
        if self.position(id).is_some() {
            tracing::warn!(category = %self.category, %id, "duplicate id ignored on add");
            return false;
        }
        let sr_no = self.next_sr_no();
        self.records.push(R::from_form(id, sr_no, &form));
        tracing::debug!(category = %self.category, %id, sr_no, "record added");
        true
    }

    /// Replace the record matching `id` in place. Returns `false` if absent.
    pub fn update(&mut self, id: Uuid, form: R::Form) -> bool {
        let Some(index) = self.position(id) else {
            tracing::warn!(category = %self.category, %id, "update of unknown id ignored");
            return false;
        };
        let sr_no = self.records[index].sr_no();
        self.records[index] = R::from_form(id, sr_no, &form);
        if self.editing_id == Some(id) {
            self.editing_id = None;
        }
        tracing::debug!(category = %self.category, %id, sr_no, "record replaced");
        true
    }

    /// Remove the record matching `id` and renumber the rest. Returns `false` if absent.
    pub fn delete(&mut self, id: Uuid) -> bool {
        let Some(index) = self.position(id) else {
            tracing::warn!(category = %self.category, %id, "delete of unknown id ignored");
            return false;
        };
        self.records.remove(index);
        self.renumber();
        if self.editing_id == Some(id) {
            self.editing_id = None;
        }
        tracing::debug!(category = %self.category, %id, remaining = self.records.len(), "record deleted");
        true
    }

    pub fn get_by_id(&self, id: Uuid) -> Option<&R> {
        self.records.iter().find(|r| r.id() == id)
    }

    fn position(&self, id: Uuid) -> Option<usize> {
        self.records.iter().position(|r| r.id() == id)
    }

    fn next_sr_no(&self) -> u32 {
        u32::try_from(self.records.len() + 1).unwrap_or(u32::MAX)
    }

    fn renumber(&mut self) {
        for (sr_no, record) in (1u32..).zip(self.records.iter_mut()) {
            record.set_sr_no(sr_no);
        }
    }

    // ------------------------------------------------------------------------
    // Editing pointer
    // ------------------------------------------------------------------------

    pub fn editing_id(&self) -> Option<Uuid> {
        self.editing_id
    }

    pub fn set_editing_id(&mut self, id: Uuid) {
        self.editing_id = Some(id);
    }

    pub fn clear_editing_id(&mut self) {
        self.editing_id = None;
    }

    /// The record the pointer names, if it still exists
    pub fn editing_row(&self) -> Option<&R> {
        self.editing_id.and_then(|id| self.get_by_id(id))
    }

    /// Point at `id` and load its raw fields into the draft form
    pub fn begin_edit(&mut self, id: Uuid) -> bool {
        let Some(form) = self.get_by_id(id).map(Component::to_form) else {
            return false;
        };
        self.form_data = form;
        self.editing_id = Some(id);
        true
    }

    // ------------------------------------------------------------------------
    // Rollups
    // ------------------------------------------------------------------------

    /// Sum of stored volumes in cubic feet
    pub fn total_volume(&self) -> f64 {
        rollup::total_volume(&self.records)
    }

    /// Sum of stored costs
    pub fn total_cost(&self) -> f64 {
        rollup::total_cost(&self.records)
    }

    // ------------------------------------------------------------------------
    // Snapshots
    // ------------------------------------------------------------------------

    /// Persisted shape: `{ formData, <category>Data, editingId }`
    pub fn snapshot(&self) -> TakeoffResult<Value> {
        let mut map = Map::new();
        map.insert(
            FORM_DATA_KEY.to_string(),
            serde_json::to_value(&self.form_data).map_err(TakeoffError::serialization)?,
        );
        map.insert(
            self.category.data_key(),
            serde_json::to_value(&self.records).map_err(TakeoffError::serialization)?,
        );
        map.insert(
            EDITING_ID_KEY.to_string(),
            serde_json::to_value(self.editing_id).map_err(TakeoffError::serialization)?,
        );
        Ok(Value::Object(map))
    }

    /// Rebuild a repository from a persisted snapshot.
    ///
    /// `formData` and `editingId` may be absent; the record list may not.
    /// Stored derived fields are kept. Serial numbers are reassigned from list
    /// order and a repeated id keeps only its first record.
    pub fn restore(category: Category, snapshot: &Value) -> TakeoffResult<Self> {
        let storage_key = category.storage_key();
        let object = snapshot
            .as_object()
            .ok_or_else(|| TakeoffError::invalid_snapshot(&storage_key, "expected a JSON object"))?;

        let data_key = category.data_key();
        let records_value = object.get(&data_key).ok_or_else(|| {
            TakeoffError::invalid_snapshot(&storage_key, format!("missing '{}'", data_key))
        })?;
        let stored: Vec<R> = serde_json::from_value(records_value.clone())
            .map_err(|e| TakeoffError::invalid_snapshot(&storage_key, e.to_string()))?;
        let stored_len = stored.len();
        let mut seen = HashSet::new();
        let records: Vec<R> = stored.into_iter().filter(|r| seen.insert(r.id())).collect();
        if records.len() < stored_len {
            tracing::warn!(%category, kept = records.len(), "duplicate ids dropped on restore");
        }

        let form_data = match object.get(FORM_DATA_KEY) {
            Some(Value::Null) | None => R::Form::default(),
            Some(value) => serde_json::from_value(value.clone())
                .map_err(|e| TakeoffError::invalid_snapshot(&storage_key, e.to_string()))?,
        };

        let editing_id = match object.get(EDITING_ID_KEY) {
            Some(Value::Null) | None => None,
            Some(value) => serde_json::from_value(value.clone())
                .map_err(|e| TakeoffError::invalid_snapshot(&storage_key, e.to_string()))?,
        };

        let mut repo = Repository {
            category,
            form_data,
            records,
            editing_id,
        };
        repo.renumber();
        Ok(repo)
    }
}
