//! # Slabs and Roofs
//!
//! Both categories are measured the same way: a plan area in square feet and
//! a thickness in inches. They are kept as separate types so each repository
//! holds only its own records.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Component, ComponentForm};
use crate::calculations::{area_volume, volume_cost};

macro_rules! area_component {
    ($form:ident, $record:ident, $message:expr) => {
        #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
        #[serde(rename_all = "camelCase", default)]
        pub struct $form {
            /// Plan area in square feet
            pub area: String,
            /// Thickness in inches
            pub thickness: String,
            pub cost_per_unit: String,
        }

        impl $form {
            pub fn new(area: impl Into<String>, thickness: impl Into<String>) -> Self {
                $form {
                    area: area.into(),
                    thickness: thickness.into(),
                    cost_per_unit: String::new(),
                }
            }
        }

        impl ComponentForm for $form {
            const REQUIRED_MESSAGE: &'static str = $message;

            fn calculate_volume(&self) -> String {
                area_volume(&self.area, &self.thickness)
            }

            fn required_fields(&self) -> Vec<(&'static str, &str)> {
                vec![("area", self.area.as_str()), ("thickness", self.thickness.as_str())]
            }
        }

        #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
        #[serde(rename_all = "camelCase")]
        pub struct $record {
            pub id: Uuid,
            pub sr_no: u32,
            #[serde(flatten)]
            pub form: $form,
            pub volume: String,
            #[serde(default)]
            pub total_cost: String,
        }

        impl Component for $record {
            type Form = $form;

            fn from_form(id: Uuid, sr_no: u32, form: &$form) -> Self {
                let volume = form.calculate_volume();
                $record {
                    id,
                    sr_no,
                    form: form.clone(),
                    total_cost: volume_cost(&volume, &form.cost_per_unit),
                    volume,
                }
            }

            fn to_form(&self) -> $form {
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
    };
}

area_component!(SlabForm, SlabRecord, "Please fill in the slab area and thickness.");
area_component!(RoofForm, RoofRecord, "Please fill in the roof area and thickness.");
