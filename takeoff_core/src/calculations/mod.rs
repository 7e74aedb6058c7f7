//! # Geometry and Cost Calculations
//!
//! Pure formulas that turn raw form fields into derived quantities. Every
//! formula follows the same pattern:
//!
//! - inputs are the raw strings typed into a form
//! - lengths and heights are feet, thicknesses, widths and depths are inches
//! - the result is a volume in cubic feet formatted to two decimals
//!
//! Missing, zero, negative or non-numeric inputs produce [`ZERO_PREVIEW`]
//! rather than an error. These strings feed the live preview and the derived
//! fields stored on a record.
//!
//! ## Available Formulas
//!
//! | Category | Volume |
//! |---|---|
//! | Wall, retaining wall | `length * height * (thickness / 12)` |
//! | Roof, slab | `area * (thickness / 12)` |
//! | Beam | `beams * length * (width / 12) * (depth / 12)` |
//! | Column | `columns * height * (length / 12) * (width / 12)` |
//! | Septic tank | `length * (width / 12) * (depth / 12)` |
//!
//! ## Example
//!
//! ```rust
//! use takeoff_core::calculations::{beam_volume, wall_volume};
//!
//! assert_eq!(wall_volume("10", "6", "12"), "60.00");
//! assert_eq!(beam_volume("4", "10", "12", "18"), "60.00");
//! assert_eq!(wall_volume("10", "", "12"), "0.00");
//! ```

use crate::units::{CuFt, Feet, Inches, SqFt};

/// Preview value returned whenever a required input is unusable
pub const ZERO_PREVIEW: &str = "0.00";

/// Parse a raw dimension field. Only finite, strictly positive numbers count.
pub fn parse_dimension(raw: &str) -> Option<f64> {
    let value: f64 = raw.trim().parse().ok()?;
    (value.is_finite() && value > 0.0).then_some(value)
}

/// Parse a raw amount (cost, quantity, stored derived value). Any finite number counts.
pub fn parse_amount(raw: &str) -> Option<f64> {
    let value: f64 = raw.trim().parse().ok()?;
    value.is_finite().then_some(value)
}

/// Format a quantity to two decimal places
pub fn format_quantity(value: f64) -> String {
    format!("{:.2}", value)
}

fn preview(value: Option<f64>) -> String {
    value
        .map(format_quantity)
        .unwrap_or_else(|| ZERO_PREVIEW.to_string())
}

fn feet(raw: &str) -> Option<Feet> {
    parse_dimension(raw).map(Feet)
}

fn inches_as_feet(raw: &str) -> Option<Feet> {
    parse_dimension(raw).map(|v| Inches(v).into())
}

fn count(raw: &str) -> Option<f64> {
    parse_dimension(raw)
}

// ============================================================================
// Areas
// ============================================================================

/// Gross face area of a wall: `length * height`
pub fn wall_area(length_ft: &str, height_ft: &str) -> String {
    let area = || -> Option<SqFt> { Some(feet(length_ft)? * feet(height_ft)?) };
    preview(area().map(SqFt::value))
}

// ============================================================================
// Volumes
// ============================================================================

/// Wall or retaining wall volume: `length * height * (thickness / 12)`
pub fn wall_volume(length_ft: &str, height_ft: &str, thickness_in: &str) -> String {
    let volume = || -> Option<CuFt> {
        Some(feet(length_ft)? * feet(height_ft)? * inches_as_feet(thickness_in)?)
    };
    preview(volume().map(CuFt::value))
}

/// Slab or roof volume: `area * (thickness / 12)`
pub fn area_volume(area_sqft: &str, thickness_in: &str) -> String {
    let volume = || -> Option<CuFt> {
        let area = SqFt(parse_dimension(area_sqft)?);
        Some(area * inches_as_feet(thickness_in)?)
    };
    preview(volume().map(CuFt::value))
}

/// Beam volume: `beams * length * (width / 12) * (depth / 12)`
pub fn beam_volume(beams: &str, length_ft: &str, width_in: &str, depth_in: &str) -> String {
    let volume = || -> Option<CuFt> {
        let per_beam = feet(length_ft)? * inches_as_feet(width_in)? * inches_as_feet(depth_in)?;
        Some(per_beam * count(beams)?)
    };
    preview(volume().map(CuFt::value))
}

/// Column volume: `columns * height * (length / 12) * (width / 12)`
pub fn column_volume(columns: &str, height_ft: &str, length_in: &str, width_in: &str) -> String {
    let volume = || -> Option<CuFt> {
        let per_column = feet(height_ft)? * inches_as_feet(length_in)? * inches_as_feet(width_in)?;
        Some(per_column * count(columns)?)
    };
    preview(volume().map(CuFt::value))
}

/// Septic tank volume: `length * (width / 12) * (depth / 12)`
pub fn septic_tank_volume(length_ft: &str, width_in: &str, depth_in: &str) -> String {
    let volume = || -> Option<CuFt> {
        Some(feet(length_ft)? * inches_as_feet(width_in)? * inches_as_feet(depth_in)?)
    };
    preview(volume().map(CuFt::value))
}

// ============================================================================
// Costs
// ============================================================================

/// Cost of a derived volume at `rate` per cubic foot.
///
/// Returns an empty string when the rate is missing or unusable, so that
/// "no cost entered" stays distinct from a cost of zero.
pub fn volume_cost(volume: &str, rate: &str) -> String {
    match (parse_amount(volume), parse_dimension(rate)) {
        (Some(volume), Some(rate)) => format_quantity(volume * rate),
        _ => String::new(),
    }
}

/// `cost_per_unit * quantity` when both are present
pub fn extended_cost(cost_per_unit: Option<f64>, quantity: Option<f64>) -> Option<f64> {
    Some(cost_per_unit? * quantity?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn value(s: &str) -> f64 {
        s.parse().unwrap()
    }

    #[test]
    fn test_retaining_wall_volume() {
        // 10 * 6 * (12/12) = 60
        assert_eq!(wall_volume("10", "6", "12"), "60.00");
    }

    #[test]
    fn test_beam_volume() {
        // per beam: 10 * (12/12) * (18/12) = 15, four beams = 60
        assert_eq!(beam_volume("4", "10", "12", "18"), "60.00");
    }

    #[test]
    fn test_column_volume() {
        // 3 * 10 * (12/12) * (9/12) = 22.5
        assert_eq!(column_volume("3", "10", "12", "9"), "22.50");
    }

    #[test]
    fn test_slab_and_septic_volume() {
        assert_eq!(area_volume("200", "6"), "100.00");
        assert_eq!(septic_tank_volume("8", "48", "60"), "160.00");
        assert_eq!(septic_tank_volume("5", "40", "36"), "50.00");
    }

    #[test]
    fn test_missing_inputs_preview_zero() {
        assert_eq!(wall_volume("10", "", "12"), ZERO_PREVIEW);
        assert_eq!(wall_volume("10", "abc", "12"), ZERO_PREVIEW);
        assert_eq!(wall_volume("10", "0", "12"), ZERO_PREVIEW);
        assert_eq!(wall_volume("10", "-6", "12"), ZERO_PREVIEW);
        assert_eq!(beam_volume("", "10", "12", "18"), ZERO_PREVIEW);
        assert_eq!(area_volume("NaN", "6"), ZERO_PREVIEW);
        assert_eq!(wall_area("inf", "6"), ZERO_PREVIEW);
    }

    #[test]
    fn test_whitespace_is_tolerated() {
        assert_eq!(wall_volume(" 10 ", "6", "12\n"), "60.00");
    }

    #[test]
    fn test_thickness_normalization() {
        // 12 inches behaves like a pre-normalized 1 foot
        let inches = area_volume("150", "12");
        let feet = format_quantity(150.0 * 1.0);
        assert_eq!(inches, feet);
    }

    #[test]
    fn test_volume_cost_presence() {
        assert_eq!(volume_cost("60.00", "12.5"), "750.00");
        assert_eq!(volume_cost("60.00", ""), "");
        assert_eq!(volume_cost("60.00", "0"), "");
        assert_eq!(volume_cost("garbage", "10"), "");
        assert_eq!(volume_cost("0.00", "10"), "0.00");
    }

    #[test]
    fn test_extended_cost() {
        assert_eq!(extended_cost(Some(500.0), Some(2.0)), Some(1000.0));
        assert_eq!(extended_cost(Some(300.0), None), None);
        assert_eq!(extended_cost(None, Some(2.0)), None);
    }

    proptest! {
        #[test]
        fn prop_wall_volume_monotonic(
            l in 0.1f64..500.0, h in 0.1f64..50.0, t in 0.1f64..48.0, bump in 0.0f64..10.0
        ) {
            let base = value(&wall_volume(&l.to_string(), &h.to_string(), &t.to_string()));
            let longer = value(&wall_volume(&(l + bump).to_string(), &h.to_string(), &t.to_string()));
            let taller = value(&wall_volume(&l.to_string(), &(h + bump).to_string(), &t.to_string()));
            let thicker = value(&wall_volume(&l.to_string(), &h.to_string(), &(t + bump).to_string()));
            prop_assert!(longer >= base);
            prop_assert!(taller >= base);
            prop_assert!(thicker >= base);
        }

        #[test]
        fn prop_beam_volume_monotonic(
            n in 1u32..20, l in 0.1f64..60.0, w in 0.1f64..36.0, d in 0.1f64..48.0, bump in 0.0f64..10.0
        ) {
            let (ns, ls, ws, ds) = (n.to_string(), l.to_string(), w.to_string(), d.to_string());
            let base = value(&beam_volume(&ns, &ls, &ws, &ds));
            let more = value(&beam_volume(&(n + 1).to_string(), &ls, &ws, &ds));
            let longer = value(&beam_volume(&ns, &(l + bump).to_string(), &ws, &ds));
            let wider = value(&beam_volume(&ns, &ls, &(w + bump).to_string(), &ds));
            let deeper = value(&beam_volume(&ns, &ls, &ws, &(d + bump).to_string()));
            prop_assert!(more >= base);
            prop_assert!(longer >= base);
            prop_assert!(wider >= base);
            prop_assert!(deeper >= base);
        }

        #[test]
        fn prop_column_volume_monotonic(
            n in 1u32..20, h in 0.1f64..40.0, l in 0.1f64..36.0, w in 0.1f64..36.0, bump in 0.0f64..10.0
        ) {
            let (ns, hs, ls, ws) = (n.to_string(), h.to_string(), l.to_string(), w.to_string());
            let base = value(&column_volume(&ns, &hs, &ls, &ws));
            let more = value(&column_volume(&(n + 1).to_string(), &hs, &ls, &ws));
            let taller = value(&column_volume(&ns, &(h + bump).to_string(), &ls, &ws));
            let longer = value(&column_volume(&ns, &hs, &(l + bump).to_string(), &ws));
            let wider = value(&column_volume(&ns, &hs, &ls, &(w + bump).to_string()));
            prop_assert!(more >= base);
            prop_assert!(taller >= base);
            prop_assert!(longer >= base);
            prop_assert!(wider >= base);
        }

        #[test]
        fn prop_area_volume_monotonic(a in 0.1f64..5000.0, t in 0.1f64..24.0, bump in 0.0f64..10.0) {
            let (as_, ts) = (a.to_string(), t.to_string());
            let base = value(&area_volume(&as_, &ts));
            let bigger = value(&area_volume(&(a + bump).to_string(), &ts));
            let thicker = value(&area_volume(&as_, &(t + bump).to_string()));
            prop_assert!(bigger >= base);
            prop_assert!(thicker >= base);
        }

        #[test]
        fn prop_septic_tank_volume_monotonic(
            l in 0.1f64..40.0, w in 0.1f64..120.0, d in 0.1f64..120.0, bump in 0.0f64..10.0
        ) {
            let (ls, ws, ds) = (l.to_string(), w.to_string(), d.to_string());
            let base = value(&septic_tank_volume(&ls, &ws, &ds));
            let longer = value(&septic_tank_volume(&(l + bump).to_string(), &ws, &ds));
            let wider = value(&septic_tank_volume(&ls, &(w + bump).to_string(), &ds));
            let deeper = value(&septic_tank_volume(&ls, &ws, &(d + bump).to_string()));
            prop_assert!(longer >= base);
            prop_assert!(wider >= base);
            prop_assert!(deeper >= base);
        }

        #[test]
        fn prop_twelve_inches_is_one_foot(a in 0.1f64..500.0, b in 0.1f64..50.0, n in 1u32..20) {
            let (as_, bs, ns) = (a.to_string(), b.to_string(), n.to_string());
            let n = f64::from(n);
            prop_assert_eq!(area_volume(&as_, "12"), format_quantity(a));
            prop_assert_eq!(wall_volume(&as_, &bs, "12"), format_quantity(a * b));
            prop_assert_eq!(beam_volume(&ns, &as_, "12", "12"), format_quantity(a * n));
            prop_assert_eq!(column_volume(&ns, &bs, "12", "12"), format_quantity(b * n));
            prop_assert_eq!(septic_tank_volume(&as_, "12", "12"), format_quantity(a));
        }

        #[test]
        fn prop_calculation_is_idempotent(l in 0.1f64..500.0, h in 0.1f64..50.0, t in 0.1f64..48.0) {
            let (l, h, t) = (l.to_string(), h.to_string(), t.to_string());
            prop_assert_eq!(wall_volume(&l, &h, &t), wall_volume(&l, &h, &t));
        }
    }
}
