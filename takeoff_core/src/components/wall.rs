//! # Walls
//!
//! Exterior, interior and mumty walls share [`WallRecord`], which can carry
//! both a door and a window. Basement walls use [`BasementWallRecord`], which
//! only models a door. The window schedule therefore never sees basement walls.
//!
//! ## JSON Example
//!
//! ```json
//! {
//!   "id": "5b0c7c1e-6d3a-4a55-9a57-2f5c4d1e8b11",
//!   "srNo": 1,
//!   "length": "20",
//!   "height": "10",
//!   "thickness": "9",
//!   "costPerUnit": "",
//!   "door": { "type": "Wood", "area": 21.0, "costPerUnit": 500.0, "quantity": 2.0 },
//!   "window": null,
//!   "area": "200.00",
//!   "volume": "150.00",
//!   "totalCost": ""
//! }
//! ```

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::opening::{Opening, OpeningForm, OpeningKind};
use super::{Component, ComponentForm, OpeningHost};
use crate::calculations::{volume_cost, wall_area, wall_volume};

/// Dimensions shared by every wall form
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WallDimensions {
    /// Length in feet
    pub length: String,
    /// Height in feet
    pub height: String,
    /// Thickness in inches
    pub thickness: String,
    /// Cost per cubic foot
    pub cost_per_unit: String,
}

impl WallDimensions {
    pub fn new(length: impl Into<String>, height: impl Into<String>, thickness: impl Into<String>) -> Self {
        WallDimensions {
            length: length.into(),
            height: height.into(),
            thickness: thickness.into(),
            cost_per_unit: String::new(),
        }
    }

    fn volume(&self) -> String {
        wall_volume(&self.length, &self.height, &self.thickness)
    }

    fn required(&self) -> Vec<(&'static str, &str)> {
        vec![
            ("length", self.length.as_str()),
            ("height", self.height.as_str()),
            ("thickness", self.thickness.as_str()),
        ]
    }
}

/// Derived wall quantities
struct Derived {
    area: String,
    volume: String,
    total_cost: String,
}

impl Derived {
    fn of(dims: &WallDimensions) -> Self {
        let volume = dims.volume();
        Derived {
            area: wall_area(&dims.length, &dims.height),
            total_cost: volume_cost(&volume, &dims.cost_per_unit),
            volume,
        }
    }
}

// ============================================================================
// Exterior / interior / mumty walls
// ============================================================================

/// Draft fields for a wall with door and window openings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WallForm {
    #[serde(flatten)]
    pub dimensions: WallDimensions,
    pub door: OpeningForm,
    pub window: OpeningForm,
}

impl ComponentForm for WallForm {
    const REQUIRED_MESSAGE: &'static str = "Please fill in the wall length, height and thickness.";

    fn calculate_volume(&self) -> String {
        self.dimensions.volume()
    }

    fn required_fields(&self) -> Vec<(&'static str, &str)> {
        self.dimensions.required()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WallRecord {
    pub id: Uuid,
    pub sr_no: u32,
    #[serde(flatten)]
    pub dimensions: WallDimensions,
    #[serde(default)]
    pub door: Option<Opening>,
    #[serde(default)]
    pub window: Option<Opening>,
    /// Gross face area in square feet
    pub area: String,
    /// Volume in cubic feet
    pub volume: String,
    #[serde(default)]
    pub total_cost: String,
}

impl Component for WallRecord {
    type Form = WallForm;

    fn from_form(id: Uuid, sr_no: u32, form: &WallForm) -> Self {
        let derived = Derived::of(&form.dimensions);
        WallRecord {
            id,
            sr_no,
            dimensions: form.dimensions.clone(),
            door: Opening::from_form(&form.door),
            window: Opening::from_form(&form.window),
            area: derived.area,
            volume: derived.volume,
            total_cost: derived.total_cost,
        }
    }

    fn to_form(&self) -> WallForm {
        WallForm {
            dimensions: self.dimensions.clone(),
            door: self.door.as_ref().map(Opening::to_form).unwrap_or_default(),
            window: self.window.as_ref().map(Opening::to_form).unwrap_or_default(),
        }
    }

    fn id(&self) -> Uuid {
        self.id
    }

    fn sr_no(&self) -> u32 {
        self.sr_no
    }

    fn set_sr_no(&mut self, sr_no: u32) {
        self.sr_no = sr_no;
    }

    fn volume(&self) -> &str {
        &self.volume
    }

    fn total_cost(&self) -> &str {
        &self.total_cost
    }
}

impl OpeningHost for WallRecord {
    fn host_id(&self) -> Uuid {
        self.id
    }

    fn opening(&self, kind: OpeningKind) -> Option<&Opening> {
        match kind {
            OpeningKind::Door => self.door.as_ref(),
            OpeningKind::Window => self.window.as_ref(),
        }
    }
}

// ============================================================================
// Basement walls
// ============================================================================

/// Draft fields for a basement wall (door only)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BasementWallForm {
    #[serde(flatten)]
    pub dimensions: WallDimensions,
    pub door: OpeningForm,
}

impl ComponentForm for BasementWallForm {
    const REQUIRED_MESSAGE: &'static str =
        "Please fill in the basement wall length, height and thickness.";

    fn calculate_volume(&self) -> String {
        self.dimensions.volume()
    }

    fn required_fields(&self) -> Vec<(&'static str, &str)> {
        self.dimensions.required()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BasementWallRecord {
    pub id: Uuid,
    pub sr_no: u32,
    #[serde(flatten)]
    pub dimensions: WallDimensions,
    #[serde(default)]
    pub door: Option<Opening>,
    pub area: String,
    pub volume: String,
    #[serde(default)]
    pub total_cost: String,
}

impl Component for BasementWallRecord {
    type Form = BasementWallForm;

    fn from_form(id: Uuid, sr_no: u32, form: &BasementWallForm) -> Self {
        let derived = Derived::of(&form.dimensions);
        BasementWallRecord {
            id,
            sr_no,
            dimensions: form.dimensions.clone(),
            door: Opening::from_form(&form.door),
            area: derived.area,
            volume: derived.volume,
            total_cost: derived.total_cost,
        }
    }

    fn to_form(&self) -> BasementWallForm {
        BasementWallForm {
            dimensions: self.dimensions.clone(),
            door: self.door.as_ref().map(Opening::to_form).unwrap_or_default(),
        }
    }

    fn id(&self) -> Uuid {
        self.id
    }

    fn sr_no(&self) -> u32 {
        self.sr_no
    }

    fn set_sr_no(&mut self, sr_no: u32) {
        self.sr_no = sr_no;
    }

    fn volume(&self) -> &str {
        &self.volume
    }

    fn total_cost(&self) -> &str {
        &self.total_cost
    }
}

impl OpeningHost for BasementWallRecord {
    fn host_id(&self) -> Uuid {
        self.id
    }

    fn opening(&self, kind: OpeningKind) -> Option<&Opening> {
        match kind {
            OpeningKind::Door => self.door.as_ref(),
            OpeningKind::Window => None,
        }
    }
}
