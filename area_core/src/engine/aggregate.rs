//! # Aggregator
//!
//! Turns the raw text of every populated unit field into one canonical total
//! in square feet.
//!
//! Fields are typed character by character, so partial text such as `"-"` or
//! `"1e"` is normal. Empty or unparsable text contributes nothing and raises no
//! error. Non-finite parses (`"inf"`, `"NaN"`) are treated the same way.
//!
//! ## Example
//!
//! ```rust
//! use area_core::engine::aggregate::{aggregate, InputSet};
//! use area_core::registry::UnitId;
//!
//! let mut inputs = InputSet::new();
//! inputs.set(UnitId::Ropani, "1");
//! inputs.set(UnitId::Aana, "2.");   // mid-keystroke, still parses
//! inputs.set(UnitId::Daam, "abc");  // ignored
//!
//! let agg = aggregate(&inputs);
//! assert!(agg.has_valid_input);
//! assert_eq!(agg.canonical_total.0, 5476.0 + 2.0 * 342.25);
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::errors::AreaResult;
use crate::registry::{unit, UnitGroup, UnitId};
use crate::units::SqFt;

/// How fields outside the locked group take part in the total.
///
/// Which reading the product wants is unresolved, so all are offered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AggregationPolicy {
    /// Sum every populated field, locked or not
    #[default]
    AllFields,
    /// Only fields of the locked group count; with no lock, everything counts
    ActiveGroupOnly,
    /// Fields of other groups are dropped from the input set when the gate
    /// locks; whatever remains is summed
    ClearOnLock,
}

impl AggregationPolicy {
    /// All policies, for listing in help text
    pub const ALL: [AggregationPolicy; 3] = [
        AggregationPolicy::AllFields,
        AggregationPolicy::ActiveGroupOnly,
        AggregationPolicy::ClearOnLock,
    ];

    /// The text name used in settings files
    pub fn as_str(&self) -> &'static str {
        match self {
            AggregationPolicy::AllFields => "all_fields",
            AggregationPolicy::ActiveGroupOnly => "active_group_only",
            AggregationPolicy::ClearOnLock => "clear_on_lock",
        }
    }

    /// Parse a settings-file name, returning None for anything unknown
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL.into_iter().find(|p| p.as_str().eq_ignore_ascii_case(name))
    }
}

/// Raw text per unit field, as typed
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InputSet {
    fields: BTreeMap<UnitId, String>,
}

impl InputSet {
    /// Empty input set
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from text ids, failing on the first unknown id
    ///
    /// ```rust
    /// use area_core::engine::aggregate::InputSet;
    ///
    /// let inputs = InputSet::from_pairs([("bigha", "1"), ("dhur", "4")]).unwrap();
    /// assert_eq!(inputs.len(), 2);
    /// assert!(InputSet::from_pairs([("acre", "1")]).is_err());
    /// ```
    pub fn from_pairs<I, K, V>(pairs: I) -> AreaResult<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut inputs = Self::new();
        for (key, value) in pairs {
            let id: UnitId = key.as_ref().parse()?;
            inputs.set(id, value);
        }
        Ok(inputs)
    }

    /// Record the text of a field. Empty text removes the field.
    pub fn set(&mut self, id: UnitId, text: impl Into<String>) {
        let text = text.into();
        if text.is_empty() {
            self.fields.remove(&id);
        } else {
            self.fields.insert(id, text);
        }
    }

    /// Raw text of a field, if populated
    pub fn get(&self, id: UnitId) -> Option<&str> {
        self.fields.get(&id).map(String::as_str)
    }

    /// Drop every field whose unit is not in `group`
    pub fn retain_group(&mut self, group: UnitGroup) {
        self.fields.retain(|id, _| id.group() == group);
    }

    /// Remove all fields
    pub fn clear(&mut self) {
        self.fields.clear();
    }

    /// Populated fields in registry order
    pub fn iter(&self) -> impl Iterator<Item = (UnitId, &str)> {
        self.fields.iter().map(|(id, text)| (*id, text.as_str()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Output of aggregation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aggregate {
    /// Sum of every counted field, in square feet
    pub canonical_total: SqFt,
    /// True iff at least one counted field parsed to a nonzero number.
    ///
    /// A total of exactly zero reports `false`, same as no input at all.
    pub has_valid_input: bool,
}

/// Parse one field's text, returning None for anything that should be ignored
pub fn parse_field(text: &str) -> Option<f64> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    text.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Sum every populated field (no group filtering)
pub fn aggregate(inputs: &InputSet) -> Aggregate {
    aggregate_with(inputs, AggregationPolicy::AllFields, None)
}

/// Sum populated fields under a policy, given the currently locked group
pub fn aggregate_with(inputs: &InputSet, policy: AggregationPolicy, locked: Option<UnitGroup>) -> Aggregate {
    let mut total = SqFt(0.0);
    let mut has_valid_input = false;

    for (id, text) in inputs.iter() {
        if let (AggregationPolicy::ActiveGroupOnly, Some(group)) = (policy, locked) {
            if id.group() != group {
                continue;
            }
        }

        let Some(value) = parse_field(text) else {
            continue;
        };

        if value != 0.0 {
            has_valid_input = true;
        }
        total = total + SqFt(unit(id).factor) * value;
    }

    tracing::debug!(
        total_sqft = total.0,
        has_valid_input,
        fields = inputs.len(),
        policy = policy.as_str(),
        "aggregated inputs"
    );

    Aggregate {
        canonical_total: total,
        has_valid_input,
    }
}
