//! # Decomposer
//!
//! Expresses a canonical total as a mixed-unit ("composite") amount within one
//! system, the way land is spoken about: "2 Ropani, 3 Aana" rather than
//! "2.1875 Ropani".
//!
//! ## Algorithm
//!
//! Greedy, largest unit first:
//!
//! 1. Every unit except the smallest takes `floor(remaining / factor)` whole
//!    units; the remainder carries down.
//! 2. The smallest unit takes the fractional count, rounded to two decimals.
//!    It is shown only when that rounded count is above 0.01.
//! 3. The standard system is split into whole square meters and the leftover
//!    square centimeters (one decimal, shown only above 0.1).
//!
//! Zero-count parts are left out. If nothing qualifies the result is `"-"`.
//!
//! Negative totals are decomposed by magnitude and prefixed with `-`.
//! Non-finite totals decompose to `"-"`.
//!
//! ## Example
//!
//! ```rust
//! use area_core::engine::decompose::decompose;
//! use area_core::registry::UnitGroup;
//! use area_core::units::SqFt;
//!
//! // 2 Ropani + 3 Aana
//! let total = SqFt(2.0 * 5476.0 + 3.0 * 342.25);
//! assert_eq!(decompose(total, UnitGroup::Hill), "2 Ropani, 3 Aana");
//! assert_eq!(decompose(SqFt(0.0), UnitGroup::Terai), "-");
//! ```

use std::fmt;

use serde::Serialize;

use crate::engine::convert::{round_to, PLACEHOLDER};
use crate::registry::{units_by_group, UnitGroup};
use crate::units::{SqFt, SqM, SQ_CM_PER_SQ_M};

/// Separator between parts of a composite string
pub const PART_SEPARATOR: &str = ", ";

/// Smallest-unit counts at or below this (after rounding) are dropped
const MIN_FRACTIONAL_COUNT: f64 = 0.01;

/// Square-centimeter remainders at or below this (after rounding) are dropped
const MIN_SQ_CM: f64 = 0.1;

/// One (count, unit) entry of a breakdown
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Part {
    /// Count of the unit, already rounded to `decimals`
    pub count: f64,
    /// Unit label as rendered
    pub label: &'static str,
    /// Decimal places used when rendering `count`
    pub decimals: usize,
}

impl Part {
    fn whole(count: f64, label: &'static str) -> Self {
        Part { count, label, decimals: 0 }
    }

    fn rounded(value: f64, decimals: usize, label: &'static str) -> Self {
        Part {
            count: round_to(value, decimals),
            label,
            decimals,
        }
    }
}

impl fmt::Display for Part {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.*} {}", self.decimals, self.count, self.label)
    }
}

/// Composite breakdown of an area within one group
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Breakdown {
    pub group: UnitGroup,
    /// True when the decomposed total was negative
    pub negative: bool,
    /// Nonzero parts, largest unit first
    pub parts: Vec<Part>,
}

impl fmt::Display for Breakdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.parts.is_empty() {
            return write!(f, "{}", PLACEHOLDER);
        }
        if self.negative {
            write!(f, "-")?;
        }
        for (i, part) in self.parts.iter().enumerate() {
            if i > 0 {
                write!(f, "{}", PART_SEPARATOR)?;
            }
            write!(f, "{}", part)?;
        }
        Ok(())
    }
}

/// Break `total` into parts of `group`'s units
pub fn breakdown(total: SqFt, group: UnitGroup) -> Breakdown {
    let mut result = Breakdown {
        group,
        negative: false,
        parts: Vec::new(),
    };

    if !total.is_finite() {
        return result;
    }
    result.negative = total.0 < 0.0;
    let remaining = total.abs();

    result.parts = match group {
        UnitGroup::Standard => metric_parts(remaining),
        UnitGroup::Hill | UnitGroup::Terai => chain_parts(remaining, group),
    };
    result
}

/// Composite string of `total` in `group`
pub fn decompose(total: SqFt, group: UnitGroup) -> String {
    breakdown(total, group).to_string()
}

fn chain_parts(total: SqFt, group: UnitGroup) -> Vec<Part> {
    let units = units_by_group(group);
    let Some((smallest, larger)) = units.split_last() else {
        return Vec::new();
    };

    let mut parts = Vec::new();
    let mut remaining = total.0;

    for u in larger {
        let count = (remaining / u.factor).floor();
        if count > 0.0 {
            parts.push(Part::whole(count, u.label));
        }
        remaining %= u.factor;
    }

    let last = Part::rounded(remaining / smallest.factor, 2, smallest.label);
    if last.count > MIN_FRACTIONAL_COUNT {
        parts.push(last);
    }

    parts
}

fn metric_parts(total: SqFt) -> Vec<Part> {
    let sq_m = SqM::from(total).0;
    let whole = sq_m.floor();

    let mut parts = Vec::new();
    if whole > 0.0 {
        parts.push(Part::whole(whole, "Sq. Meter"));
    }

    let sq_cm = Part::rounded((sq_m - whole) * SQ_CM_PER_SQ_M, 1, "Sq. cm");
    if sq_cm.count > MIN_SQ_CM {
        parts.push(sq_cm);
    }

    parts
}
