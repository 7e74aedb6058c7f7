//! # Retaining Walls
//!
//! Measured like an ordinary wall (`length * height * thickness / 12`) but
//! with no openings.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Component, ComponentForm};
use crate::calculations::{volume_cost, wall_area, wall_volume};

/// Draft fields for a retaining wall entry.
///
/// ## JSON Example
///
/// ```json
/// { "length": "10", "height": "6", "thickness": "12", "costPerUnit": "" }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RetainingWallForm {
    /// Length in feet
    pub length: String,
    /// Height in feet
    pub height: String,
    /// Thickness in inches
    pub thickness: String,
    pub cost_per_unit: String,
}

impl RetainingWallForm {
    pub fn new(length: impl Into<String>, height: impl Into<String>, thickness: impl Into<String>) -> Self {
        RetainingWallForm {
            length: length.into(),
            height: height.into(),
            thickness: thickness.into(),
            cost_per_unit: String::new(),
        }
    }
}

impl ComponentForm for RetainingWallForm {
    const REQUIRED_MESSAGE: &'static str =
        "Please fill in the retaining wall length, height and thickness.";

    fn calculate_volume(&self) -> String {
        wall_volume(&self.length, &self.height, &self.thickness)
    }

    fn required_fields(&self) -> Vec<(&'static str, &str)> {
        vec![
            ("length", self.length.as_str()),
            ("height", self.height.as_str()),
            ("thickness", self.thickness.as_str()),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RetainingWallRecord {
    pub id: Uuid,
    pub sr_no: u32,
    #[serde(flatten)]
    pub form: RetainingWallForm,
    /// Face area in square feet
    pub area: String,
    pub volume: String,
    #[serde(default)]
    pub total_cost: String,
}

impl Component for RetainingWallRecord {
    type Form = RetainingWallForm;

    fn from_form(id: Uuid, sr_no: u32, form: &RetainingWallForm) -> Self {
        let volume = form.calculate_volume();
        RetainingWallRecord {
            id,
            sr_no,
            form: form.clone(),
            area: wall_area(&form.length, &form.height),
            total_cost: volume_cost(&volume, &form.cost_per_unit),
            volume,
        }
    }

    fn to_form(&self) -> RetainingWallForm {
        self.form.clone()
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
