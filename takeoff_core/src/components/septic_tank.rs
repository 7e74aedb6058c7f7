//! # Septic Tanks

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Component, ComponentForm};
use crate::calculations::{septic_tank_volume, volume_cost};

/// Draft fields for a septic tank. Length is in feet, width and depth in inches.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SepticTankForm {
    pub length: String,
    pub width: String,
    pub depth: String,
    pub cost_per_unit: String,
}

impl SepticTankForm {
    pub fn new(length: impl Into<String>, width: impl Into<String>, depth: impl Into<String>) -> Self {
        SepticTankForm {
            length: length.into(),
            width: width.into(),
            depth: depth.into(),
            cost_per_unit: String::new(),
        }
    }
}

impl ComponentForm for SepticTankForm {
    const REQUIRED_MESSAGE: &'static str = "Please fill in the septic tank length, width and depth.";

    fn calculate_volume(&self) -> String {
        septic_tank_volume(&self.length, &self.width, &self.depth)
    }

    fn required_fields(&self) -> Vec<(&'static str, &str)> {
        vec![
            ("length", self.length.as_str()),
            ("width", self.width.as_str()),
            ("depth", self.depth.as_str()),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SepticTankRecord {
    pub id: Uuid,
    pub sr_no: u32,
    #[serde(flatten)]
    pub form: SepticTankForm,
    pub volume: String,
    #[serde(default)]
    pub total_cost: String,
}

impl Component for SepticTankRecord {
    type Form = SepticTankForm;

    fn from_form(id: Uuid, sr_no: u32, form: &SepticTankForm) -> Self {
        let volume = form.calculate_volume();
        SepticTankRecord {
            id,
            sr_no,
            form: form.clone(),
            total_cost: volume_cost(&volume, &form.cost_per_unit),
            volume,
        }
    }

    fn to_form(&self) -> SepticTankForm {
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
