//! # Unit Registry
//!
//! The fixed table of land-area units the engine understands, their factor to
//! the canonical unit (square feet), and the measurement system each belongs to.
//!
//! ## Systems
//!
//! | System   | Units (largest first)          |
//! |----------|--------------------------------|
//! | Hill     | Ropani, Aana, Paisa, Daam      |
//! | Terai    | Bigha, Kattha, Dhur            |
//! | Standard | Square Feet, Square Meter      |
//!
//! 1 Ropani = 16 Aana = 64 Paisa = 256 Daam = 5476 sq ft.
//! 1 Bigha = 20 Kattha = 400 Dhur = 72900 sq ft.
//!
//! ## Example
//!
//! ```rust
//! use area_core::registry::{unit, units_by_group, UnitGroup, UnitId};
//!
//! let ropani = unit(UnitId::Ropani);
//! assert_eq!(ropani.factor, 5476.0);
//! assert_eq!(ropani.group, UnitGroup::Hill);
//!
//! let hill: Vec<UnitId> = units_by_group(UnitGroup::Hill).iter().map(|u| u.id).collect();
//! assert_eq!(hill, vec![UnitId::Ropani, UnitId::Aana, UnitId::Paisa, UnitId::Daam]);
//! ```

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::errors::{AreaError, AreaResult};

/// Measurement system a unit belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum UnitGroup {
    /// Hill/mountain region units
    Hill,
    /// Plains region units
    Terai,
    /// Square feet and square meters
    Standard,
}

impl UnitGroup {
    /// All groups, in display order
    pub const ALL: [UnitGroup; 3] = [UnitGroup::Hill, UnitGroup::Terai, UnitGroup::Standard];

    /// Human-readable name
    pub fn display_name(&self) -> &'static str {
        match self {
            UnitGroup::Hill => "Hill System",
            UnitGroup::Terai => "Terai System",
            UnitGroup::Standard => "Standard",
        }
    }
}

impl fmt::Display for UnitGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Identifier for one of the nine supported units.
///
/// Serializes as the snake_case id used by input fields (`"ropani"`, `"sq_feet"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitId {
    Ropani,
    Aana,
    Paisa,
    Daam,
    Bigha,
    Kattha,
    Dhur,
    SqFeet,
    SqMeter,
}

impl UnitId {
    /// All unit ids in registry order
    pub const ALL: [UnitId; 9] = [
        UnitId::Ropani,
        UnitId::Aana,
        UnitId::Paisa,
        UnitId::Daam,
        UnitId::Bigha,
        UnitId::Kattha,
        UnitId::Dhur,
        UnitId::SqFeet,
        UnitId::SqMeter,
    ];

    /// The text id used at the input boundary
    pub fn as_str(&self) -> &'static str {
        match self {
            UnitId::Ropani => "ropani",
            UnitId::Aana => "aana",
            UnitId::Paisa => "paisa",
            UnitId::Daam => "daam",
            UnitId::Bigha => "bigha",
            UnitId::Kattha => "kattha",
            UnitId::Dhur => "dhur",
            UnitId::SqFeet => "sq_feet",
            UnitId::SqMeter => "sq_meter",
        }
    }

    /// Which group this unit belongs to
    pub fn group(&self) -> UnitGroup {
        unit(*self).group
    }
}

impl fmt::Display for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for UnitId {
    type Err = AreaError;

    /// Parse a text id. Matching is case-insensitive and ignores surrounding
    /// whitespace; anything else outside the nine ids is `UnitNotFound`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase();
        UnitId::ALL
            .iter()
            .copied()
            .find(|id| id.as_str() == needle)
            .ok_or_else(|| AreaError::unit_not_found(s))
    }
}

/// A registered unit
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Unit {
    /// Identifier
    pub id: UnitId,
    /// Display label
    pub label: &'static str,
    /// Square feet per one of this unit (always > 0)
    pub factor: f64,
    /// Measurement system
    pub group: UnitGroup,
}

/// The registry table, in `UnitId::ALL` order
pub static UNITS: [Unit; 9] = [
    Unit { id: UnitId::Ropani, label: "Ropani", factor: 5476.0, group: UnitGroup::Hill },
    Unit { id: UnitId::Aana, label: "Aana", factor: 342.25, group: UnitGroup::Hill },
    Unit { id: UnitId::Paisa, label: "Paisa", factor: 85.5625, group: UnitGroup::Hill },
    Unit { id: UnitId::Daam, label: "Daam", factor: 21.390625, group: UnitGroup::Hill },
    Unit { id: UnitId::Bigha, label: "Bigha", factor: 72900.0, group: UnitGroup::Terai },
    Unit { id: UnitId::Kattha, label: "Kattha", factor: 3645.0, group: UnitGroup::Terai },
    Unit { id: UnitId::Dhur, label: "Dhur", factor: 182.25, group: UnitGroup::Terai },
    Unit { id: UnitId::SqFeet, label: "Square Feet", factor: 1.0, group: UnitGroup::Standard },
    Unit { id: UnitId::SqMeter, label: "Square Meter", factor: 10.7639, group: UnitGroup::Standard },
];

/// Units of each group sorted by descending factor
static BY_GROUP: Lazy<HashMap<UnitGroup, Vec<&'static Unit>>> = Lazy::new(|| {
    let mut map: HashMap<UnitGroup, Vec<&'static Unit>> = HashMap::new();
    for u in UNITS.iter() {
        map.entry(u.group).or_default().push(u);
    }
    for units in map.values_mut() {
        units.sort_by(|a, b| b.factor.total_cmp(&a.factor));
    }
    map
});

/// Look up a unit by id.
///
/// Infallible for the typed id; see [`lookup`] for the text boundary.
pub fn unit(id: UnitId) -> &'static Unit {
    // UNITS is laid out in UnitId::ALL order
    &UNITS[id as usize]
}

/// Look up a unit by its text id, failing with `UnitNotFound`
pub fn lookup(id: &str) -> AreaResult<&'static Unit> {
    let id: UnitId = id.parse()?;
    Ok(unit(id))
}

/// Units of a group, largest factor first
pub fn units_by_group(group: UnitGroup) -> &'static [&'static Unit] {
    BY_GROUP.get(&group).map(Vec::as_slice).unwrap_or(&[])
}

/// Check the registry invariants: positive factors, and a strictly
/// descending chain within the Hill and Terai groups.
pub fn validate_registry() -> AreaResult<()> {
    for u in UNITS.iter() {
        if u.factor <= 0.0 || !u.factor.is_finite() {
            return Err(AreaError::invalid_input(
                u.id.as_str(),
                u.factor.to_string(),
                "Unit factor must be a positive finite number",
            ));
        }
    }

    for group in [UnitGroup::Hill, UnitGroup::Terai] {
        let chain: Vec<&Unit> = UNITS.iter().filter(|u| u.group == group).collect();
        for pair in chain.windows(2) {
            if pair[0].factor <= pair[1].factor {
                return Err(AreaError::invalid_input(
                    pair[1].id.as_str(),
                    pair[1].factor.to_string(),
                    format!("Factor must be smaller than {}", pair[0].label),
                ));
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_is_valid() {
        assert!(validate_registry().is_ok());
    }

    #[test]
    fn test_table_order_matches_ids() {
        for id in UnitId::ALL {
            assert_eq!(unit(id).id, id);
        }
    }

    #[test]
    fn test_traditional_ratios() {
        let ropani = unit(UnitId::Ropani).factor;
        assert_eq!(ropani / unit(UnitId::Aana).factor, 16.0);
        assert_eq!(unit(UnitId::Aana).factor / unit(UnitId::Paisa).factor, 4.0);
        assert_eq!(unit(UnitId::Paisa).factor / unit(UnitId::Daam).factor, 4.0);

        let bigha = unit(UnitId::Bigha).factor;
        assert_eq!(bigha / unit(UnitId::Kattha).factor, 20.0);
        assert_eq!(unit(UnitId::Kattha).factor / unit(UnitId::Dhur).factor, 20.0);
    }

    #[test]
    fn test_units_by_group_descending() {
        for group in UnitGroup::ALL {
            let units = units_by_group(group);
            assert!(!units.is_empty());
            assert!(units.iter().all(|u| u.group == group));
            for pair in units.windows(2) {
                assert!(pair[0].factor > pair[1].factor);
            }
        }

        let standard: Vec<UnitId> = units_by_group(UnitGroup::Standard).iter().map(|u| u.id).collect();
        assert_eq!(standard, vec![UnitId::SqMeter, UnitId::SqFeet]);
    }

    #[test]
    fn test_parse_ids() {
        assert_eq!("ropani".parse::<UnitId>().unwrap(), UnitId::Ropani);
        assert_eq!(" SQ_FEET ".parse::<UnitId>().unwrap(), UnitId::SqFeet);
        for id in UnitId::ALL {
            assert_eq!(id.as_str().parse::<UnitId>().unwrap(), id);
        }
    }

    #[test]
    fn test_unknown_id_is_unit_not_found() {
        let err = lookup("acre").unwrap_err();
        assert_eq!(err, AreaError::unit_not_found("acre"));
        assert_eq!(err.error_code(), "UNIT_NOT_FOUND");
    }

    #[test]
    fn test_group_of_unit() {
        assert_eq!(UnitId::Daam.group(), UnitGroup::Hill);
        assert_eq!(UnitId::Dhur.group(), UnitGroup::Terai);
        assert_eq!(UnitId::SqMeter.group(), UnitGroup::Standard);
    }

    #[test]
    fn test_serialization_uses_text_ids() {
        assert_eq!(serde_json::to_string(&UnitId::SqMeter).unwrap(), "\"sq_meter\"");
        let id: UnitId = serde_json::from_str("\"kattha\"").unwrap();
        assert_eq!(id, UnitId::Kattha);
    }
}
