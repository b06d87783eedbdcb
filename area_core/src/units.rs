//! # Area Quantities
//!
//! Type-safe wrappers for the two standard area quantities the engine hands
//! around. The canonical total produced by the aggregator is always a
//! [`SqFt`]; [`SqM`] appears in the standard-system breakdown.
//!
//! ## Design Philosophy
//!
//! Like the rest of the crate these are plain `f64` newtypes:
//! - JSON stays clean (just numbers)
//! - No runtime overhead
//! - The traditional units (Ropani, Bigha, ...) are not newtypes; they live in
//!   the [`registry`](crate::registry) as data, since the engine iterates over them.
//!
//! ## Two square-meter factors
//!
//! The registry lists `sq_meter` at 10.7639 sq ft (the rounded figure used on
//! land documents), which drives per-unit conversion. Breaking an area into
//! whole square meters and square centimeters uses the exact definition
//! 1 sq ft = 0.09290304 sq m, exposed here as [`SQ_M_PER_SQ_FT`].
//!
//! ## Example
//!
//! ```rust
//! use area_core::units::{SqFt, SqM};
//!
//! let plot = SqFt(5476.0); // one Ropani
//! let metric: SqM = plot.into();
//! assert!((metric.0 - 508.73704704).abs() < 1e-9);
//! ```

use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul};

/// Exact square meters in one square foot (0.3048 m squared)
pub const SQ_M_PER_SQ_FT: f64 = 0.09290304;

/// Square centimeters in one square meter
pub const SQ_CM_PER_SQ_M: f64 = 10_000.0;

// ============================================================================
// Area Units
// ============================================================================

/// Area in square feet (the canonical unit)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SqFt(pub f64);

/// Area in square meters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SqM(pub f64);

impl From<SqFt> for SqM {
    fn from(sqft: SqFt) -> Self {
        SqM(sqft.0 * SQ_M_PER_SQ_FT)
    }
}

impl SqFt {
    /// True when the value is a finite number
    pub fn is_finite(self) -> bool {
        self.0.is_finite()
    }

    /// Magnitude, dropping the sign
    pub fn abs(self) -> Self {
        Self(self.0.abs())
    }
}

// ============================================================================
// Arithmetic Implementations (macro to reduce boilerplate)
// ============================================================================

macro_rules! impl_arithmetic {
    ($type:ty) => {
        impl Add for $type {
            type Output = Self;
            fn add(self, rhs: Self) -> Self::Output {
                Self(self.0 + rhs.0)
            }
        }

        impl Mul<f64> for $type {
            type Output = Self;
            fn mul(self, rhs: f64) -> Self::Output {
                Self(self.0 * rhs)
            }
        }
    };
}

impl_arithmetic!(SqFt);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sqft_to_sqm() {
        let sqm: SqM = SqFt(1.0).into();
        assert_eq!(sqm.0, SQ_M_PER_SQ_FT);
    }

    #[test]
    fn test_one_ropani_in_sqm() {
        let sqm: SqM = SqFt(5476.0).into();
        assert!((sqm.0 - 508.73704704).abs() < 1e-9);
    }

    #[test]
    fn test_arithmetic() {
        let a = SqFt(10.0);
        let b = SqFt(5.0);
        assert_eq!((a + b).0, 15.0);
        assert_eq!((a * 2.0).0, 20.0);
    }

    #[test]
    fn test_serialization() {
        let area = SqFt(5476.0);
        let json = serde_json::to_string(&area).unwrap();
        assert_eq!(json, "5476.0");

        let roundtrip: SqFt = serde_json::from_str(&json).unwrap();
        assert_eq!(area, roundtrip);
    }
}
