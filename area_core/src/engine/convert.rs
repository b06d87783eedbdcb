//! # Converter
//!
//! Expands a canonical total into a value for every registered unit.
//!
//! ## Formatting
//!
//! Values are rendered with [`format_value`]: an integral value prints as an
//! integer, anything else prints with four decimals and then loses trailing
//! zeros and a trailing point.
//!
//! | value      | rendered   |
//! |------------|------------|
//! | 5476.0     | `5476`     |
//! | 4.1        | `4.1`      |
//! | 0.0625     | `0.0625`   |
//! | 2.00004    | `2`        |
//! | 1/3        | `0.3333`   |
//! | 1.03125    | `1.0313`   |
//!
//! Ties round half away from zero, the same rule the decomposer uses.
//!
//! ## Example
//!
//! ```rust
//! use area_core::engine::convert::convert_all;
//! use area_core::registry::UnitId;
//! use area_core::units::SqFt;
//!
//! let table = convert_all(SqFt(5476.0));
//! assert_eq!(table[&UnitId::Ropani], "1");
//! assert_eq!(table[&UnitId::Aana], "16");
//! assert_eq!(table[&UnitId::SqFeet], "5476");
//! ```

use std::collections::BTreeMap;

use crate::registry::{unit, UnitId, UNITS};
use crate::units::SqFt;

/// Placeholder rendered for values that cannot be shown
pub const PLACEHOLDER: &str = "-";

/// Decimal places kept by [`format_value`]
const DISPLAY_DECIMALS: usize = 4;

/// Round `value` to `decimals` places, ties away from zero
pub(crate) fn round_to(value: f64, decimals: usize) -> f64 {
    let scale = 10f64.powi(decimals as i32);
    (value * scale).round() / scale
}

/// Value of `total` expressed in `id`
pub fn value_in(total: SqFt, id: UnitId) -> f64 {
    total.0 / unit(id).factor
}

/// Render a value per the display contract
pub fn format_value(value: f64) -> String {
    if !value.is_finite() {
        return PLACEHOLDER.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }
    if value.fract() == 0.0 {
        return format!("{:.0}", value);
    }

    let fixed = format!("{:.*}", DISPLAY_DECIMALS, round_to(value, DISPLAY_DECIMALS));
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    if trimmed == "-0" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Formatted value of `total` in every registered unit
pub fn convert_all(total: SqFt) -> BTreeMap<UnitId, String> {
    UNITS
        .iter()
        .map(|u| (u.id, format_value(value_in(total, u.id))))
        .collect()
}
