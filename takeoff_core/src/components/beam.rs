//! # Beams
//!
//! Rectangular concrete beams. Length is in feet, width and depth in inches.
//!
//! ## Example
//!
//! ```rust
//! use takeoff_core::components::{BeamForm, ComponentForm};
//!
//! let form = BeamForm::new("4", "10", "12", "18");
//! assert_eq!(form.calculate_volume(), "60.00");
//! ```

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Component, ComponentForm};
use crate::calculations::{beam_volume, volume_cost};

/// Draft fields for a beam entry.
///
/// ## JSON Example
///
/// ```json
/// {
///   "numberOfBeams": "4",
///   "length": "10",
///   "width": "12",
///   "depth": "18",
///   "costPerUnit": "150"
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BeamForm {
    /// Number of identical beams
    pub number_of_beams: String,
    /// Length in feet
    pub length: String,
    /// Width in inches
    pub width: String,
    /// Depth in inches
    pub depth: String,
    /// Cost per cubic foot
    pub cost_per_unit: String,
}

impl BeamForm {
    pub fn new(
        number_of_beams: impl Into<String>,
        length: impl Into<String>,
        width: impl Into<String>,
        depth: impl Into<String>,
    ) -> Self {
        BeamForm {
            number_of_beams: number_of_beams.into(),
            length: length.into(),
            width: width.into(),
            depth: depth.into(),
            cost_per_unit: String::new(),
        }
    }
}

impl ComponentForm for BeamForm {
    const REQUIRED_MESSAGE: &'static str =
        "Please fill in the number of beams, length, width and depth.";

    fn calculate_volume(&self) -> String {
        beam_volume(&self.number_of_beams, &self.length, &self.width, &self.depth)
    }

    fn required_fields(&self) -> Vec<(&'static str, &str)> {
        vec![
            ("numberOfBeams", self.number_of_beams.as_str()),
            ("length", self.length.as_str()),
            ("width", self.width.as_str()),
            ("depth", self.depth.as_str()),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BeamRecord {
    pub id: Uuid,
    pub sr_no: u32,
    #[serde(flatten)]
    pub form: BeamForm,
    /// Total volume of all beams in cubic feet
    pub volume: String,
    #[serde(default)]
    pub total_cost: String,
}

impl Component for BeamRecord {
    type Form = BeamForm;

    fn from_form(id: Uuid, sr_no: u32, form: &BeamForm) -> Self {
        let volume = form.calculate_volume();
        BeamRecord {
            id,
            sr_no,
            form: form.clone(),
            total_cost: volume_cost(&volume, &form.cost_per_unit),
            volume,
        }
    }

    fn to_form(&self) -> BeamForm {
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
