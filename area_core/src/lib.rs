//! # area_core - Land-Area Unit Conversion Engine
//!
//! `area_core` converts land area between Nepal's traditional Hill-system units
//! (Ropani, Aana, Paisa, Daam), Terai-system units (Bigha, Kattha, Dhur), and
//! standard units (square feet, square meters). It accepts simultaneous text
//! inputs in several units, and produces a precise value for every unit plus a
//! mixed-unit breakdown per system.
//!
//! ## Design Philosophy
//!
//! - **Pure**: the pipeline is free functions over an explicit input set
//! - **Forgiving input**: half-typed numbers are ignored, never errors
//! - **JSON-First**: results and errors implement Serialize
//! - **Closed taxonomy**: units are an enum; strings only at the text boundary
//!
//! ## Quick Start
//!
//! ```rust
//! use area_core::engine::{aggregate, convert_all, decompose, InputSet};
//! use area_core::registry::{UnitGroup, UnitId};
//!
//! let inputs = InputSet::from_pairs([("ropani", "1")]).unwrap();
//! let agg = aggregate(&inputs);
//! assert!(agg.has_valid_input);
//!
//! assert_eq!(convert_all(agg.canonical_total)[&UnitId::SqFeet], "5476");
//! assert_eq!(decompose(agg.canonical_total, UnitGroup::Hill), "1 Ropani");
//! ```
//!
//! ## Modules
//!
//! - [`registry`] - The nine supported units and their groups
//! - [`engine`] - Aggregate, convert, decompose
//! - [`session`] - Input state, active-group gate, reset
//! - [`settings`] - Aggregation policy and host settings (TOML)
//! - [`units`] - Type-safe area wrappers
//! - [`errors`] - Structured error types

pub mod engine;
pub mod errors;
pub mod registry;
pub mod session;
pub mod settings;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use engine::{aggregate, convert_all, decompose, AggregationPolicy, InputSet};
pub use errors::{AreaError, AreaResult};
pub use registry::{UnitGroup, UnitId};
pub use session::{ActiveGroup, InputEffect, Session, Snapshot};
pub use settings::EngineSettings;
