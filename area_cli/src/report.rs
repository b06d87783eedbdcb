//! Text rendering of a session snapshot.

use std::fmt::Write;

use area_core::engine::format_value;
use area_core::registry::{units_by_group, UNITS};
use area_core::{Session, Snapshot, UnitGroup};

const RULE: &str = "═══════════════════════════════════════";

/// Render the result panel for a snapshot
pub fn render_report(session: &Session, snapshot: &Snapshot) -> String {
    let mut out = String::new();

    let gate = match snapshot.active_group.group() {
        Some(group) => group.display_name(),
        None => "(none)",
    };
    let _ = writeln!(out, "Active group: {}", gate);
    let _ = writeln!(out, "Last change:  {}", snapshot.meta.modified.format("%H:%M:%S UTC"));

    if !session.inputs().is_empty() {
        let fields: Vec<String> = session
            .inputs()
            .iter()
            .map(|(id, text)| format!("{}={}", id, text))
            .collect();
        let _ = writeln!(out, "Inputs:       {}", fields.join(" "));
    }

    let (Some(conversions), Some(composites)) = (&snapshot.conversions, &snapshot.composites) else {
        let _ = writeln!(out);
        let _ = writeln!(out, "No results. Enter a value, e.g. `ropani 1`.");
        return out;
    };

    let _ = writeln!(out);
    let _ = writeln!(out, "{}", RULE);
    let _ = writeln!(out, "  TOTAL: {} sq ft", format_value(snapshot.canonical_total.0));
    let _ = writeln!(out, "{}", RULE);
    let _ = writeln!(out);

    let _ = writeln!(out, "Composite:");
    for group in UnitGroup::ALL {
        if let Some(text) = composites.get(&group) {
            let _ = writeln!(out, "  {:<14} {}", group.display_name(), text);
        }
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "Per unit:");
    for u in UNITS.iter() {
        if let Some(text) = conversions.get(&u.id) {
            let _ = writeln!(out, "  {:<14} {}", u.label, text);
        }
    }

    out
}

/// Render the unit table for the `units` command
pub fn render_units(session: &Session) -> String {
    let mut out = String::new();
    for group in UnitGroup::ALL {
        let marker = if session.group_visible(group) { "" } else { "  (hidden)" };
        let _ = writeln!(out, "{}{}", group.display_name(), marker);
        for u in units_by_group(group) {
            let _ = writeln!(out, "  {:<10} {:<14} {} sq ft", u.id.as_str(), u.label, format_value(u.factor));
        }
    }
    out
}
