//! # Building Components
//!
//! Each component category follows the same pattern:
//!
//! - `*Form` - The raw draft fields typed by the user (numeric strings)
//! - `*Record` - A persisted entry: id, serial number, raw fields and the
//!   derived fields computed from them
//!
//! Derived fields are only ever produced by [`Component::from_form`], so a
//! record can never carry a volume that disagrees with its dimensions.
//!
//! ## Available Categories
//!
//! - [`wall`] - Exterior, interior, mumty and basement walls with door/window openings
//! - [`beam`] - Rectangular beams
//! - [`column`] - Rectangular columns
//! - [`slab`] - Slabs and roofs (area times thickness)
//! - [`retaining_wall`] - Retaining walls
//! - [`septic_tank`] - Septic tanks

pub mod beam;
pub mod column;
pub mod opening;
pub mod retaining_wall;
pub mod septic_tank;
pub mod slab;
pub mod wall;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{TakeoffError, TakeoffResult};

pub use beam::{BeamForm, BeamRecord};
pub use column::{ColumnForm, ColumnRecord};
pub use opening::{Opening, OpeningForm, OpeningKind};
pub use retaining_wall::{RetainingWallForm, RetainingWallRecord};
pub use septic_tank::{SepticTankForm, SepticTankRecord};
pub use slab::{RoofForm, RoofRecord, SlabForm, SlabRecord};
pub use wall::{BasementWallForm, BasementWallRecord, WallForm, WallRecord};

/// Component category. One repository exists per category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    ExteriorWall,
    InteriorWall,
    MumtyWall,
    BasementWall,
    Beam,
    Column,
    Slab,
    Roof,
    RetainingWall,
    SepticTank,
}

impl Category {
    pub const ALL: [Category; 10] = [
        Category::ExteriorWall,
        Category::InteriorWall,
        Category::MumtyWall,
        Category::BasementWall,
        Category::Beam,
        Category::Column,
        Category::Slab,
        Category::Roof,
        Category::RetainingWall,
        Category::SepticTank,
    ];

    /// Kebab-case identifier, e.g. `"exterior-wall"`
    pub fn slug(&self) -> &'static str {
        match self {
            Category::ExteriorWall => "exterior-wall",
            Category::InteriorWall => "interior-wall",
            Category::MumtyWall => "mumty-wall",
            Category::BasementWall => "basement-wall",
            Category::Beam => "beam",
            Category::Column => "column",
            Category::Slab => "slab",
            Category::Roof => "roof",
            Category::RetainingWall => "retaining-wall",
            Category::SepticTank => "septic-tank",
        }
    }

    /// Human-readable label. Schedules use this as the `wallOrigin` of a row.
    pub fn display_name(&self) -> &'static str {
        match self {
            Category::ExteriorWall => "Exterior Wall",
            Category::InteriorWall => "Interior Wall",
            Category::MumtyWall => "Mumty Wall",
            Category::BasementWall => "Basement Wall",
            Category::Beam => "Beam",
            Category::Column => "Column",
            Category::Slab => "Slab",
            Category::Roof => "Roof",
            Category::RetainingWall => "Retaining Wall",
            Category::SepticTank => "Septic Tank",
        }
    }

    /// External storage key: `"<category>-storage"`
    pub fn storage_key(&self) -> String {
        format!("{}-storage", self.slug())
    }

    /// Key of the record list inside a snapshot, e.g. `"exteriorWallData"`
    pub fn data_key(&self) -> String {
        let mut key = String::new();
        for (i, part) in self.slug().split('-').enumerate() {
            if i == 0 {
                key.push_str(part);
            } else {
                let mut chars = part.chars();
                if let Some(first) = chars.next() {
                    key.extend(first.to_uppercase());
                    key.push_str(chars.as_str());
                }
            }
        }
        key.push_str("Data");
        key
    }

    /// Resolve a category from its slug or storage key
    pub fn from_key(key: &str) -> TakeoffResult<Category> {
        let slug = key.strip_suffix("-storage").unwrap_or(key);
        Category::ALL
            .into_iter()
            .find(|c| c.slug() == slug)
            .ok_or_else(|| TakeoffError::unknown_category(key))
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Raw draft fields for one category.
///
/// Implementors supply the live volume preview and the list of required
/// fields; the [`crate::validation`] helpers build on top of that.
pub trait ComponentForm: std::fmt::Debug + Clone + Default + Serialize + DeserializeOwned {
    /// Sentence shown when any required field of this category is missing
    const REQUIRED_MESSAGE: &'static str;

    /// Live volume preview, `"0.00"` when inputs are incomplete
    fn calculate_volume(&self) -> String;

    /// `(field name, raw value)` for every required field
    fn required_fields(&self) -> Vec<(&'static str, &str)>;
}

/// A persisted component record.
pub trait Component: std::fmt::Debug + Clone + Serialize + DeserializeOwned {
    type Form: ComponentForm;

    /// Build a record from raw fields, computing every derived field
    fn from_form(id: Uuid, sr_no: u32, form: &Self::Form) -> Self;

    /// Recover the raw fields, e.g. to prefill an edit dialog
    fn to_form(&self) -> Self::Form;

    fn id(&self) -> Uuid;
    fn sr_no(&self) -> u32;
    fn set_sr_no(&mut self, sr_no: u32);

    /// Stored derived volume (cubic feet, two decimals)
    fn volume(&self) -> &str;

    /// Stored derived cost, empty when no rate was entered
    fn total_cost(&self) -> &str;
}

/// Records that can carry door/window openings
pub trait OpeningHost {
    fn host_id(&self) -> Uuid;
    fn opening(&self, kind: OpeningKind) -> Option<&Opening>;
}
