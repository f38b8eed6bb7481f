//! Plain-text rendering of the form, targets and history

use mushroom_log_core::export::{self, BLANK_CELL};
use mushroom_log_core::{all_phases, BatchField, Clipboard, EntryStore, Phase, PhaseKey, Session};
use std::fmt::Write;

/// Phase selector: one line per phase, active one marked
pub fn phases(active: PhaseKey) -> String {
    let mut out = String::new();
    for p in all_phases() {
        let marker = if p.key == active { '*' } else { ' ' };
        let _ = writeln!(out, "{} {:<13} {} - {}", marker, p.key, p.key.short_name(), p.title);
    }
    out
}

/// Target parameter block
pub fn targets(phase: &Phase) -> String {
    let mut out = String::from("🎯 TARGET PARAMETERS\n");
    for (name, range) in phase.targets.pairs() {
        let _ = writeln!(out, "  {:<9} {}", format!("{}:", name), range);
    }
    out
}

/// Batch info, targets and the in-progress entry for the active phase
pub fn form<C: Clipboard>(session: &Session<C>) -> String {
    let store = session.store();
    let phase = store.active_phase_def();
    let mut out = String::new();

    let _ = writeln!(out, "Today's Entry - {}", phase.title);
    let _ = writeln!(out);
    for field in BatchField::ALL {
        // Sterilization is recorded with the batch only while colonizing
        if field == BatchField::Sterilization && phase.key != PhaseKey::Colonization {
            continue;
        }
        let _ = writeln!(
            out,
            "  {:<20} {:<15} {}",
            field.label(),
            format!("[{}]", field),
            store.batch_info().get(field)
        );
    }
    let _ = writeln!(out);
    out.push_str(&targets(phase));
    let _ = writeln!(out);

    for col in phase.columns {
        let value = store
            .current_entry()
            .get(col.key)
            .map(String::as_str)
            .unwrap_or("");
        let _ = writeln!(
            out,
            "  {:<15} {:<20} {:<6} {:<20} ({})",
            col.key, col.label, col.kind, value, col.hint
        );
    }
    let _ = write!(out, "\n{} saved entries", store.len());
    out
}

/// Saved entries laid out under the active phase, numbered from 1
pub fn history(store: &EntryStore) -> String {
    let phase = store.active_phase_def();
    if store.is_empty() {
        return "No saved entries.".to_string();
    }

    let mut rows = export::history_rows(store, phase);
    for (i, row) in rows.iter_mut().enumerate() {
        let index = if i == 0 { "#".to_string() } else { i.to_string() };
        row.insert(0, index);
    }

    let widths: Vec<usize> = (0..rows[0].len())
        .map(|c| rows.iter().map(|r| r[c].chars().count()).max().unwrap_or(0))
        .collect();

    let mut out = format!("Saved Entries - {}\n", phase.title);
    for row in &rows {
        let line: Vec<String> = row
            .iter()
            .zip(&widths)
            .map(|(cell, w)| format!("{}{}", cell, " ".repeat(w - cell.chars().count())))
            .collect();
        let _ = writeln!(out, "{}", line.join(" | ").trim_end());
    }
    let _ = write!(out, "({} = not recorded)", BLANK_CELL);
    out
}
