//! # Columns
//!
//! Rectangular concrete columns. Height is in feet; the cross-section
//! length and width are in inches.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Component, ComponentForm};
use crate::calculations::{column_volume, volume_cost};

/// Draft fields for a column entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ColumnForm {
    pub number_of_columns: String,
    /// Height in feet
    pub height: String,
    /// Section length in inches
    pub length: String,
    /// Section width in inches
    pub width: String,
    pub cost_per_unit: String,
}

impl ColumnForm {
    pub fn new(
        number_of_columns: impl Into<String>,
        height: impl Into<String>,
        length: impl Into<String>,
        width: impl Into<String>,
    ) -> Self {
        ColumnForm {
            number_of_columns: number_of_columns.into(),
            height: height.into(),
            length: length.into(),
            width: width.into(),
            cost_per_unit: String::new(),
        }
    }
}

impl ComponentForm for ColumnForm {
    const REQUIRED_MESSAGE: &'static str =
        "Please fill in the number of columns, height, length and width.";

    fn calculate_volume(&self) -> String {
        column_volume(&self.number_of_columns, &self.height, &self.length, &self.width)
    }

    fn required_fields(&self) -> Vec<(&'static str, &str)> {
        vec![
            ("numberOfColumns", self.number_of_columns.as_str()),
            ("height", self.height.as_str()),
            ("length", self.length.as_str()),
            ("width", self.width.as_str()),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnRecord {
    pub id: Uuid,
    pub sr_no: u32,
    #[serde(flatten)]
    pub form: ColumnForm,
    pub volume: String,
    #[serde(default)]
    pub total_cost: String,
}

impl Component for ColumnRecord {
    type Form = ColumnForm;

    fn from_form(id: Uuid, sr_no: u32, form: &ColumnForm) -> Self {
        let volume = form.calculate_volume();
        ColumnRecord {
            id,
            sr_no,
            form: form.clone(),
            total_cost: volume_cost(&volume, &form.cost_per_unit),
            volume,
        }
    }

    fn to_form(&self) -> ColumnForm {
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
