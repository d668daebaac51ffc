//! Handler für Katalog-Operationen (Laden, Speichern, Bubbles, Navigation).
//!
//! Fachliche Fehler (leerer Pfad, unbekannte ID, …) landen als Statusmeldung im
//! UI-State; nur Store-Fehler beim expliziten Laden/Speichern werden an den
//! Aufrufer weitergereicht.

use crate::app::use_cases::OpenOutcome;
use crate::app::AppState;
use crate::core::BubbleId;
use crate::shared::CatalogResult;
use anyhow::Context;

/// Lädt den Katalog aus dem Store.
pub fn load(state: &mut AppState) -> anyhow::Result<()> {
    state.catalog.load().context("Katalog konnte nicht geladen werden")?;
    state.ui.status_message = None;
    Ok(())
}

/// Speichert den Katalog synchron.
pub fn save(state: &mut AppState) -> anyhow::Result<()> {
    state
        .catalog
        .save_now()
        .context("Katalog konnte nicht gespeichert werden")
}

/// Legt eine Datei-Bubble an.
pub fn add_file(state: &mut AppState, path: &str, display_name: Option<&str>) {
    let result = state.catalog.add_file(path, display_name);
    report(state, "Datei hinzufügen", result);
}

/// Legt eine Ordner-Bubble an.
pub fn add_folder(state: &mut AppState, path: &str, display_name: Option<&str>) {
    let result = state.catalog.add_folder(path, display_name);
    report(state, "Ordner hinzufügen", result);
}

/// Legt eine Kommando-Bubble an.
pub fn add_command(
    state: &mut AppState,
    command: &str,
    args: Option<&str>,
    display_name: Option<&str>,
) {
    let result = state.catalog.add_command(command, args, display_name);
    report(state, "Kommando hinzufügen", result);
}

/// Entfernt eine Bubble der aktuellen Ebene.
pub fn remove(state: &mut AppState, id: &BubbleId) {
    let result = state.catalog.remove(id);
    report(state, "Entfernen", result);
}

/// Führt zwei Bubbles zusammen.
pub fn merge(state: &mut AppState, source_id: &BubbleId, target_id: &BubbleId) {
    let result = state.catalog.merge_into_collection(source_id, target_id);
    report(state, "Zusammenführen", result);
}

/// Öffnet eine Bubble (Collection betreten oder starten).
pub fn open(state: &mut AppState, id: &BubbleId) {
    let result = state.catalog.open(id, state.launcher.as_ref());
    if let Some(OpenOutcome::Launched(item)) = report(state, "Öffnen", result) {
        log::debug!("Bubble gestartet: {}", item.display_name);
    }
}

/// Navigiert eine Ebene zurück.
pub fn back(state: &mut AppState) {
    state.catalog.back();
}

/// Navigiert zur Root-Ebene.
pub fn reset_to_root(state: &mut AppState) {
    state.catalog.reset_to_root();
}

fn report<T>(state: &mut AppState, action: &str, result: CatalogResult<T>) -> Option<T> {
    match result {
        Ok(value) => {
            state.ui.status_message = None;
            Some(value)
        }
        Err(e) => {
            log::warn!("{action} fehlgeschlagen: {e}");
            state.ui.status_message = Some(format!("{action} fehlgeschlagen: {}", e.message));
            None
        }
    }
}
