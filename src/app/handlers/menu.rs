//! Handler für das Bubble-Menü (Overlay) und die Anwendungssteuerung.

use crate::app::AppState;
use crate::shared::MenuRequestSource;

/// Schaltet das Menü um.
pub fn toggle(state: &mut AppState, source: MenuRequestSource) {
    state.menu.open = !state.menu.open;
    state.menu.last_source = Some(source);
    log::info!(
        "Menü {} (Auslöser: {source})",
        if state.menu.open { "geöffnet" } else { "geschlossen" }
    );
}

/// Schließt das Menü.
pub fn close(state: &mut AppState) {
    state.menu.open = false;
}

/// Signalisiert dem Host das Beenden.
pub fn request_exit(state: &mut AppState) {
    state.should_exit = true;
}
