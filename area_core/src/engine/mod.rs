//! # Conversion Engine
//!
//! The pure pipeline that runs on every change to the input set:
//!
//! ```text
//! InputSet ──aggregate──▶ SqFt ──┬──convert_all──▶ value per unit
//!                                └──decompose────▶ composite per group
//! ```
//!
//! Each stage is a free function with no hidden state:
//!
//! - [`aggregate`] - text fields to one canonical total
//! - [`convert`] - canonical total to every registered unit
//! - [`decompose`] - canonical total to a mixed-unit string per system
//!
//! ## Example
//!
//! ```rust
//! use area_core::engine::{aggregate, convert_all, decompose, InputSet};
//! use area_core::registry::{UnitGroup, UnitId};
//!
//! let inputs = InputSet::from_pairs([("aana", "16")]).unwrap();
//! let agg = aggregate(&inputs);
//!
//! assert_eq!(convert_all(agg.canonical_total)[&UnitId::SqFeet], "5476");
//! assert_eq!(decompose(agg.canonical_total, UnitGroup::Hill), "1 Ropani");
//! ```

pub mod aggregate;
pub mod convert;
pub mod decompose;

// Re-export commonly used items
pub use aggregate::{aggregate, aggregate_with, Aggregate, AggregationPolicy, InputSet};
pub use convert::{convert_all, format_value, value_in, PLACEHOLDER};
pub use decompose::{breakdown, decompose, Breakdown, Part};
