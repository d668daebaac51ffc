//! Textdarstellung von Ring und Status.

use crate::app::AppState;
use crate::core::BubbleItemType;
use std::fmt::Write;

fn kind_marker(kind: BubbleItemType) -> &'static str {
    match kind {
        BubbleItemType::File => "[F]",
        BubbleItemType::Folder => "[D]",
        BubbleItemType::Collection => "[*]",
        BubbleItemType::Command => "[>]",
    }
}

/// Rendert die sichtbaren Bubbles mit Ring-Position.
pub fn render_ring(state: &AppState) -> String {
    let items = state.visible_items();
    if items.is_empty() {
        return "(keine Bubbles auf dieser Ebene)\n".to_string();
    }

    let slots = state.ring_layout();
    let mut out = String::new();
    for (index, (item, slot)) in items.iter().zip(&slots).enumerate() {
        let _ = write!(
            out,
            "{:>3} {} {:<24} ({:>7.1}, {:>7.1}) {:>5.0}°  {}",
            index + 1,
            kind_marker(item.kind),
            item.display_name,
            slot.center.x,
            slot.center.y,
            slot.angle.to_degrees(),
            item.id
        );
        if item.is_collection() {
            let _ = write!(out, "  ({} Einträge)", item.children.as_ref().map_or(0, Vec::len));
        }
        out.push('\n');
    }
    out
}

/// Rendert die Statuszeile (Ebene, Menü, Auto-Save, Gesten).
pub fn render_status(state: &AppState) -> String {
    let nav = state.catalog.state();
    let level = nav
        .current_collection()
        .map_or("Root", |collection| collection.display_name.as_str());

    let mut out = format!(
        "Ebene: {level} (Tiefe {}) | Bubbles: {} | Menü: {} | Gesten: {}",
        nav.current_path().len(),
        nav.root().total_count(),
        if state.menu.open { "offen" } else { "zu" },
        if state.gesture.is_running() { "an" } else { "aus" },
    );
    if state.catalog.is_dirty() {
        out.push_str(" | ungespeichert");
    }
    if let Some(message) = &state.ui.status_message {
        let _ = write!(out, " | {message}");
    }
    out
}

/// Rendert die letzten `count` Commands, neuester zuletzt.
pub fn render_history(state: &AppState, count: usize) -> String {
    let log = &state.command_log;
    if log.is_empty() {
        return "(noch keine Commands)\n".to_string();
    }

    let shown = count.min(log.len());
    let first_number = log.len() - shown + 1;
    let mut out = String::new();
    for (offset, command) in log.recent(count).enumerate() {
        let _ = writeln!(out, "{:>4} {command:?}", first_number + offset);
    }
    out
}
