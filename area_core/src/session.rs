//! # Conversion Session
//!
//! A `Session` is the state one interactive converter owns: the raw text of
//! every populated field, and the active-group gate. It is an explicit value
//! held by the host, not a global, so several sessions can coexist.
//!
//! ## Active-group gate
//!
//! ```text
//!            first nonempty input in group g
//!   Unset ─────────────────────────────────────▶ LockedTo(g)
//!     ▲                                              │
//!     └──────────────────── reset() ─────────────────┘
//! ```
//!
//! Once locked the gate never moves to another group without a reset, even
//! when later input lands in a different group. Hosts use
//! [`Session::group_visible`] to hide the other groups.
//!
//! ## Example
//!
//! ```rust
//! use area_core::registry::{UnitGroup, UnitId};
//! use area_core::session::{ActiveGroup, Session};
//! use area_core::settings::EngineSettings;
//!
//! let mut session = Session::new(EngineSettings::default());
//! session.set_input(UnitId::Aana, "16");
//! assert_eq!(session.active_group(), ActiveGroup::LockedTo(UnitGroup::Hill));
//!
//! let snapshot = session.compute();
//! assert_eq!(snapshot.composite(UnitGroup::Hill), Some("1 Ropani"));
//!
//! session.reset();
//! assert!(!session.compute().has_valid_input);
//! ```

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::engine::{aggregate_with, convert_all, decompose, Aggregate, AggregationPolicy, InputSet};
use crate::errors::AreaResult;
use crate::registry::{UnitGroup, UnitId};
use crate::settings::EngineSettings;
use crate::units::SqFt;

/// State of the active-group gate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "state", content = "group")]
pub enum ActiveGroup {
    /// Nothing entered since the last reset
    #[default]
    Unset,
    /// Locked to the group of the first nonempty input
    LockedTo(UnitGroup),
}

impl ActiveGroup {
    /// The locked group, if any
    pub fn group(&self) -> Option<UnitGroup> {
        match self {
            ActiveGroup::Unset => None,
            ActiveGroup::LockedTo(group) => Some(*group),
        }
    }
}

/// What a single input did to the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEffect {
    /// Text recorded, gate unchanged
    Recorded,
    /// Text recorded and the gate moved from `Unset` to `LockedTo(group)`
    Locked(UnitGroup),
    /// Text dropped: it belongs outside the locked group and the policy is
    /// `ClearOnLock`
    Discarded { locked: UnitGroup },
}

/// Session timestamps
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SessionMeta {
    /// When the session was created
    pub started: DateTime<Utc>,
    /// Last input or reset
    pub modified: DateTime<Utc>,
}

/// Everything a host renders after one change.
///
/// `conversions` and `composites` are `None` when there is no valid input;
/// hosts must not show a result panel in that case.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub canonical_total: SqFt,
    pub has_valid_input: bool,
    pub active_group: ActiveGroup,
    /// Formatted value per unit
    pub conversions: Option<BTreeMap<UnitId, String>>,
    /// Composite string per group
    pub composites: Option<BTreeMap<UnitGroup, String>>,
    /// When the session started and last changed
    pub meta: SessionMeta,
}

impl Snapshot {
    /// Formatted value in one unit, when there is a result
    pub fn value(&self, id: UnitId) -> Option<&str> {
        self.conversions.as_ref()?.get(&id).map(String::as_str)
    }

    /// Composite string for one group, when there is a result
    pub fn composite(&self, group: UnitGroup) -> Option<&str> {
        self.composites.as_ref()?.get(&group).map(String::as_str)
    }
}

/// One interactive conversion session
#[derive(Debug, Clone)]
pub struct Session {
    settings: EngineSettings,
    inputs: InputSet,
    active: ActiveGroup,
    meta: SessionMeta,
}

impl Session {
    /// Create an empty session
    pub fn new(settings: EngineSettings) -> Self {
        let now = Utc::now();
        Session {
            settings,
            inputs: InputSet::new(),
            active: ActiveGroup::Unset,
            meta: SessionMeta {
                started: now,
                modified: now,
            },
        }
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    pub fn inputs(&self) -> &InputSet {
        &self.inputs
    }

    pub fn meta(&self) -> &SessionMeta {
        &self.meta
    }

    pub fn active_group(&self) -> ActiveGroup {
        self.active
    }

    /// Whether a host should show `group` right now
    pub fn group_visible(&self, group: UnitGroup) -> bool {
        if !self.settings.hide_inactive_groups {
            return true;
        }
        match self.active {
            ActiveGroup::Unset => true,
            ActiveGroup::LockedTo(locked) => locked == group,
        }
    }

    /// Record the text of one field (one keystroke's worth of state).
    ///
    /// Empty text clears the field. The first input with non-blank text locks
    /// the gate to that unit's group. Under `ClearOnLock`, locking drops every
    /// field of the other groups and later input to them is discarded.
    pub fn set_input(&mut self, id: UnitId, text: impl Into<String>) -> InputEffect {
        let text = text.into();
        let group = id.group();
        self.meta.modified = Utc::now();

        let clear_on_lock = self.settings.aggregation == AggregationPolicy::ClearOnLock;
        if let ActiveGroup::LockedTo(locked) = self.active {
            if clear_on_lock && locked != group {
                tracing::debug!(unit = %id, locked = %locked, "discarded input outside locked group");
                return InputEffect::Discarded { locked };
            }
            self.inputs.set(id, text);
            return InputEffect::Recorded;
        }

        let nonblank = !text.trim().is_empty();
        self.inputs.set(id, text);
        if !nonblank {
            return InputEffect::Recorded;
        }

        self.active = ActiveGroup::LockedTo(group);
        if clear_on_lock {
            let before = self.inputs.len();
            self.inputs.retain_group(group);
            tracing::debug!(dropped = before - self.inputs.len(), "cleared fields outside locked group");
        }
        tracing::info!(group = %group, unit = %id, "active group locked");
        InputEffect::Locked(group)
    }

    /// Like [`set_input`](Self::set_input), with the unit given as text
    pub fn set_input_str(&mut self, id: &str, text: impl Into<String>) -> AreaResult<InputEffect> {
        let id: UnitId = id.parse()?;
        Ok(self.set_input(id, text))
    }

    /// Clear every field and the gate in one step
    pub fn reset(&mut self) {
        self.inputs.clear();
        self.active = ActiveGroup::Unset;
        self.meta.modified = Utc::now();
        tracing::info!("session reset");
    }

    /// Aggregate the current inputs under the session's policy
    pub fn aggregate(&self) -> Aggregate {
        aggregate_with(&self.inputs, self.settings.aggregation, self.active.group())
    }

    /// Run the whole pipeline for the current inputs
    pub fn compute(&self) -> Snapshot {
        let agg = self.aggregate();
        let total = agg.canonical_total;

        let (conversions, composites) = if agg.has_valid_input {
            let composites: BTreeMap<UnitGroup, String> = UnitGroup::ALL
                .iter()
                .map(|group| (*group, decompose(total, *group)))
                .collect();
            (Some(convert_all(total)), Some(composites))
        } else {
            (None, None)
        };

        Snapshot {
            canonical_total: total,
            has_valid_input: agg.has_valid_input,
            active_group: self.active,
            conversions,
            composites,
            meta: self.meta,
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(EngineSettings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_policy(policy: AggregationPolicy) -> Session {
        Session::new(EngineSettings {
            aggregation: policy,
            ..EngineSettings::default()
        })
    }

    #[test]
    fn test_new_session_is_empty() {
        let session = Session::default();
        assert_eq!(session.active_group(), ActiveGroup::Unset);
        assert!(session.inputs().is_empty());
        let snapshot = session.compute();
        assert!(!snapshot.has_valid_input);
        assert!(snapshot.conversions.is_none());
        assert!(snapshot.composites.is_none());
    }

    #[test]
    fn test_scenario_one_ropani() {
        let mut session = Session::default();
        session.set_input(UnitId::Ropani, "1");
        let snapshot = session.compute();

        assert_eq!(snapshot.canonical_total, SqFt(5476.0));
        assert_eq!(snapshot.composite(UnitGroup::Hill), Some("1 Ropani"));
        assert_eq!(snapshot.value(UnitId::SqFeet), Some("5476"));
    }

    #[test]
    fn test_scenario_one_bigha() {
        let mut session = Session::default();
        session.set_input(UnitId::Bigha, "1");
        let snapshot = session.compute();

        assert_eq!(snapshot.canonical_total, SqFt(72900.0));
        assert_eq!(snapshot.composite(UnitGroup::Terai), Some("1 Bigha"));
        assert_eq!(snapshot.value(UnitId::SqFeet), Some("72900"));
    }

    #[test]
    fn test_scenario_zero_has_no_result() {
        let mut session = Session::default();
        session.set_input(UnitId::SqFeet, "0");
        let snapshot = session.compute();
        assert!(!snapshot.has_valid_input);
        assert_eq!(snapshot.value(UnitId::SqFeet), None);
    }

    #[test]
    fn test_scenario_half_daam() {
        let mut session = Session::default();
        session.set_input(UnitId::Daam, "0.5");
        let snapshot = session.compute();
        assert!((snapshot.canonical_total.0 - 10.6953125).abs() < 1e-12);
        assert_eq!(snapshot.composite(UnitGroup::Hill), Some("0.50 Daam"));
    }

    #[test]
    fn test_first_nonblank_input_locks() {
        let mut session = Session::default();
        assert_eq!(session.set_input(UnitId::Kattha, " "), InputEffect::Recorded);
        assert_eq!(session.active_group(), ActiveGroup::Unset);

        assert_eq!(session.set_input(UnitId::Kattha, "2"), InputEffect::Locked(UnitGroup::Terai));
        assert_eq!(session.active_group(), ActiveGroup::LockedTo(UnitGroup::Terai));
    }

    #[test]
    fn test_unparsable_text_still_locks() {
        let mut session = Session::default();
        assert_eq!(session.set_input(UnitId::Paisa, "-"), InputEffect::Locked(UnitGroup::Hill));
        assert!(!session.compute().has_valid_input);
    }

    #[test]
    fn test_lock_never_switches_groups() {
        let mut session = Session::default();
        session.set_input(UnitId::Ropani, "1");
        assert_eq!(session.set_input(UnitId::Bigha, "1"), InputEffect::Recorded);
        session.set_input(UnitId::Ropani, "");
        assert_eq!(session.active_group(), ActiveGroup::LockedTo(UnitGroup::Hill));
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut session = Session::default();
        session.set_input(UnitId::Ropani, "3");
        session.set_input(UnitId::Aana, "2");
        session.reset();

        assert!(session.inputs().is_empty());
        assert_eq!(session.active_group(), ActiveGroup::Unset);
        assert!(!session.compute().has_valid_input);

        // Gate can lock to a different group afterwards
        session.set_input(UnitId::SqMeter, "10");
        assert_eq!(session.active_group(), ActiveGroup::LockedTo(UnitGroup::Standard));
    }

    #[test]
    fn test_group_visibility() {
        let mut session = Session::default();
        assert!(UnitGroup::ALL.iter().all(|g| session.group_visible(*g)));

        session.set_input(UnitId::Dhur, "5");
        assert!(session.group_visible(UnitGroup::Terai));
        assert!(!session.group_visible(UnitGroup::Hill));
        assert!(!session.group_visible(UnitGroup::Standard));
    }

    #[test]
    fn test_visibility_when_hiding_disabled() {
        let mut session = Session::new(EngineSettings {
            hide_inactive_groups: false,
            ..EngineSettings::default()
        });
        session.set_input(UnitId::Dhur, "5");
        assert!(UnitGroup::ALL.iter().all(|g| session.group_visible(*g)));
    }

    #[test]
    fn test_all_fields_counts_hidden_group() {
        let mut session = with_policy(AggregationPolicy::AllFields);
        session.set_input(UnitId::Aana, "2");
        session.set_input(UnitId::Kattha, "1");
        assert_eq!(session.compute().canonical_total, SqFt(2.0 * 342.25 + 3645.0));
    }

    #[test]
    fn test_active_group_only_skips_hidden_group() {
        let mut session = with_policy(AggregationPolicy::ActiveGroupOnly);
        session.set_input(UnitId::Aana, "2");
        session.set_input(UnitId::Kattha, "1");
        assert_eq!(session.compute().canonical_total, SqFt(2.0 * 342.25));
        // The stale text is kept, just not counted
        assert_eq!(session.inputs().get(UnitId::Kattha), Some("1"));
    }

    #[test]
    fn test_clear_on_lock_drops_blank_fields_of_other_groups() {
        let mut session = with_policy(AggregationPolicy::ClearOnLock);
        session.set_input(UnitId::Kattha, "  ");
        assert_eq!(session.set_input(UnitId::Aana, "2"), InputEffect::Locked(UnitGroup::Hill));
        assert_eq!(session.inputs().get(UnitId::Kattha), None);
    }

    #[test]
    fn test_clear_on_lock_discards_hidden_group_input() {
        let mut session = with_policy(AggregationPolicy::ClearOnLock);
        session.set_input(UnitId::Aana, "2");
        assert_eq!(
            session.set_input(UnitId::Kattha, "1"),
            InputEffect::Discarded { locked: UnitGroup::Hill }
        );

        assert_eq!(session.inputs().get(UnitId::Kattha), None);
        assert_eq!(session.compute().canonical_total, SqFt(2.0 * 342.25));

        // Same-group input is still recorded
        assert_eq!(session.set_input(UnitId::Ropani, "1"), InputEffect::Recorded);
        assert_eq!(session.compute().canonical_total, SqFt(5476.0 + 2.0 * 342.25));
    }

    #[test]
    fn test_policies_disagree_on_hidden_input() {
        let totals: Vec<SqFt> = AggregationPolicy::ALL
            .iter()
            .map(|policy| {
                let mut session = with_policy(*policy);
                session.set_input(UnitId::Aana, "2");
                session.set_input(UnitId::Kattha, "1");
                session.compute().canonical_total
            })
            .collect();

        assert_eq!(totals[0], SqFt(2.0 * 342.25 + 3645.0));
        assert_eq!(totals[1], SqFt(2.0 * 342.25));
        assert_eq!(totals[2], SqFt(2.0 * 342.25));
    }

    #[test]
    fn test_snapshot_serialization() {
        let mut session = Session::default();
        session.set_input(UnitId::Ropani, "1");
        let json = serde_json::to_string(&session.compute()).unwrap();

        assert!(json.contains("\"canonical_total\":5476.0"));
        assert!(json.contains("\"Hill\":\"1 Ropani\""));
        assert!(json.contains("\"sq_feet\":\"5476\""));
        assert!(json.contains("\"state\":\"LockedTo\""));
    }

    #[test]
    fn test_input_and_reset_touch_modified() {
        let mut session = Session::default();
        let started = session.meta().started;
        assert_eq!(session.meta().modified, started);

        session.set_input(UnitId::Ropani, "1");
        let after_input = session.meta().modified;
        assert!(after_input >= started);
        assert_eq!(session.compute().meta, *session.meta());

        session.reset();
        assert!(session.meta().modified >= after_input);
        assert_eq!(session.meta().started, started);
    }

    #[test]
    fn test_snapshot_carries_timestamps() {
        let mut session = Session::default();
        session.set_input(UnitId::Bigha, "1");
        let value = serde_json::to_value(session.compute()).unwrap();

        let modified: DateTime<Utc> = serde_json::from_value(value["meta"]["modified"].clone()).unwrap();
        assert_eq!(modified, session.meta().modified);
        assert!(value["meta"]["started"].is_string());
    }

    #[test]
    fn test_set_input_str_rejects_unknown_unit() {
        let mut session = Session::default();
        let err = session.set_input_str("acre", "1").unwrap_err();
        assert_eq!(err.error_code(), "UNIT_NOT_FOUND");
        assert!(session.inputs().is_empty());

        assert_eq!(session.set_input_str("Bigha", "1").unwrap(), InputEffect::Locked(UnitGroup::Terai));
    }
}
