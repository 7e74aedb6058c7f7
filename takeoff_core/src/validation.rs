//! # Form Validation
//!
//! Presence checks run before a record is saved. A required field passes when
//! it reads as a finite number greater than zero. Results are plain booleans and
//! sentences; callers branch on [`validate`] and show [`error_message`].
//!
//! ## Example
//!
//! ```rust
//! use takeoff_core::components::BeamForm;
//! use takeoff_core::validation::{error_message, validate};
//!
//! let form = BeamForm::new("4", "10", "", "18");
//! assert!(!validate(&form));
//! assert_eq!(
//!     error_message(&form),
//!     "Please fill in the number of beams, length, width and depth."
//! );
//! ```

use crate::calculations::parse_dimension;
use crate::components::ComponentForm;

/// Fallback sentence when no category-specific check fires
pub const GENERIC_MESSAGE: &str = "Please fill all required fields.";

/// Only a positive finite number fills a required field
pub fn is_filled(raw: &str) -> bool {
    parse_dimension(raw).is_some()
}

/// Names of required fields that are not filled
pub fn missing_fields<F: ComponentForm>(form: &F) -> Vec<&'static str> {
    form.required_fields()
        .into_iter()
        .filter(|(_, raw)| !is_filled(raw))
        .map(|(name, _)| name)
        .collect()
}

/// Whether every required field of the form is filled
pub fn validate<F: ComponentForm>(form: &F) -> bool {
    missing_fields(form).is_empty()
}

/// The category's required-fields sentence when [`validate`] fails,
/// otherwise [`GENERIC_MESSAGE`]
pub fn error_message<F: ComponentForm>(form: &F) -> String {
    if validate(form) {
        GENERIC_MESSAGE.to_string()
    } else {
        F::REQUIRED_MESSAGE.to_string()
    }
}
