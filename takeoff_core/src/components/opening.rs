//! Door and window openings embedded in wall records.
//!
//! A wall form always has an opening sub-form, but the record only carries an
//! [`Opening`] when the sub-form names a type. Numeric opening fields are kept
//! as `Option<f64>` because "no cost entered" must survive into schedules as
//! an empty cell rather than a zero.

use serde::{Deserialize, Serialize};

use crate::calculations::parse_amount;

/// Which opening a schedule or lookup is about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OpeningKind {
    Door,
    Window,
}

impl OpeningKind {
    pub fn display_name(&self) -> &'static str {
        match self {
            OpeningKind::Door => "Door",
            OpeningKind::Window => "Window",
        }
    }
}

impl std::fmt::Display for OpeningKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl std::str::FromStr for OpeningKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "door" => Ok(OpeningKind::Door),
            "window" => Ok(OpeningKind::Window),
            other => Err(format!("unknown opening kind '{}'", other)),
        }
    }
}

/// Raw opening fields as typed into a wall form
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OpeningForm {
    #[serde(rename = "type")]
    pub opening_type: String,
    pub area: String,
    pub cost_per_unit: String,
    pub quantity: String,
}

impl OpeningForm {
    pub fn new(
        opening_type: impl Into<String>,
        area: impl Into<String>,
        cost_per_unit: impl Into<String>,
        quantity: impl Into<String>,
    ) -> Self {
        OpeningForm {
            opening_type: opening_type.into(),
            area: area.into(),
            cost_per_unit: cost_per_unit.into(),
            quantity: quantity.into(),
        }
    }
}

/// A door or window attached to a wall record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Opening {
    /// Empty when the stored opening named no type
    #[serde(rename = "type", default)]
    pub opening_type: String,
    #[serde(default)]
    pub area: Option<f64>,
    #[serde(default)]
    pub cost_per_unit: Option<f64>,
    #[serde(default)]
    pub quantity: Option<f64>,
}

impl Opening {
    /// Convert a sub-form. An empty type means the wall has no such opening.
    pub fn from_form(form: &OpeningForm) -> Option<Opening> {
        let opening_type = form.opening_type.trim();
        if opening_type.is_empty() {
            return None;
        }
        Some(Opening {
            opening_type: opening_type.to_string(),
            area: parse_amount(&form.area),
            cost_per_unit: parse_amount(&form.cost_per_unit),
            quantity: parse_amount(&form.quantity),
        })
    }

    pub fn to_form(&self) -> OpeningForm {
        let raw = |v: Option<f64>| v.map(|v| v.to_string()).unwrap_or_default();
        OpeningForm {
            opening_type: self.opening_type.clone(),
            area: raw(self.area),
            cost_per_unit: raw(self.cost_per_unit),
            quantity: raw(self.quantity),
        }
    }

    /// Whether this opening should appear in a schedule
    pub fn has_type(&self) -> bool {
        !self.opening_type.trim().is_empty()
    }
}
