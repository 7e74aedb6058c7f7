//! # Unit Types
//!
//! Newtype wrappers for takeoff units. Form fields arrive as strings in mixed
//! units: lengths and heights in feet, thicknesses, widths and depths in
//! inches. Calculators convert everything to feet before multiplying, so a
//! volume is always in cubic feet.
//!
//! ## Example
//!
//! ```rust
//! use takeoff_core::units::{Feet, Inches};
//!
//! let thickness: Feet = Inches(9.0).into();
//! assert_eq!(thickness.0, 0.75);
//!
//! let face = Feet(10.0) * Feet(6.0);
//! let volume = face * thickness;
//! assert_eq!(volume.0, 45.0);
//! ```

use serde::{Deserialize, Serialize};
use std::ops::Mul;

/// Inches per foot
pub const INCHES_PER_FOOT: f64 = 12.0;

// ============================================================================
// Length Units
// ============================================================================

/// Length in feet
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Feet(pub f64);

/// Length in inches
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Inches(pub f64);

impl From<Inches> for Feet {
    fn from(inches: Inches) -> Self {
        Feet(inches.0 / INCHES_PER_FOOT)
    }
}

// ============================================================================
// Area and Volume Units
// ============================================================================

/// Area in square feet
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SqFt(pub f64);

impl SqFt {
    pub fn value(self) -> f64 {
        self.0
    }
}

/// Volume in cubic feet
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CuFt(pub f64);

impl CuFt {
    pub fn value(self) -> f64 {
        self.0
    }
}

impl Mul for Feet {
    type Output = SqFt;
    fn mul(self, rhs: Feet) -> SqFt {
        SqFt(self.0 * rhs.0)
    }
}

impl Mul<Feet> for SqFt {
    type Output = CuFt;
    fn mul(self, rhs: Feet) -> CuFt {
        CuFt(self.0 * rhs.0)
    }
}

/// Scale a single-piece volume by a piece count
impl Mul<f64> for CuFt {
    type Output = CuFt;
    fn mul(self, count: f64) -> CuFt {
        CuFt(self.0 * count)
    }
}
