//! Bubble-Katalog-Service: Mutations-API über Navigation, Use-Cases und Auto-Save.
//!
//! Alle Mutationen laufen im interaktiven Kontext. Nach jeder erfolgreichen
//! Änderung wird ein O(1)-Snapshot des Roots an den `SaveScheduler`
//! veröffentlicht; geschrieben wird erst nach der Debounce-Pause.

use super::autosave::SaveScheduler;
use super::launcher::Launcher;
use super::use_cases::{self, AddOutcome, OpenOutcome};
use crate::core::{BubbleId, BubbleItem, NavigationState};
use crate::shared::options::AUTOSAVE_DELAY_MS;
use crate::shared::CatalogResult;
use crate::store::BubbleStore;
use std::sync::Arc;
use std::time::Duration;

/// Mutations-API des Bubble-Katalogs
pub struct BubbleCatalogService {
    nav: NavigationState,
    saver: SaveScheduler,
}

impl BubbleCatalogService {
    /// Erstellt den Service mit leerem Katalog und Standard-Debounce (500 ms).
    pub fn new(store: Arc<dyn BubbleStore>) -> Self {
        Self::with_delay(store, Duration::from_millis(AUTOSAVE_DELAY_MS))
    }

    /// Erstellt den Service mit eigener Debounce-Verzögerung.
    pub fn with_delay(store: Arc<dyn BubbleStore>, delay: Duration) -> Self {
        let nav = NavigationState::default();
        let saver = SaveScheduler::new(store, delay, nav.root_snapshot());
        Self { nav, saver }
    }

    /// Read-only Navigationszustand (Root, aktuelle Ebene, Historie).
    pub fn state(&self) -> &NavigationState {
        &self.nav
    }

    /// Sichtbare Bubbles der aktuellen Ebene.
    pub fn visible_items(&self) -> &[BubbleItem] {
        self.nav.visible_items()
    }

    /// Gibt `true` zurück, wenn ungespeicherte Änderungen vorliegen.
    pub fn is_dirty(&self) -> bool {
        self.saver.is_dirty()
    }

    /// Lädt den Katalog aus dem Store und ersetzt den Zustand komplett.
    ///
    /// Bei Fehler bleibt der bisherige Zustand erhalten.
    pub fn load(&mut self) -> CatalogResult<()> {
        let root = self.saver.store().load()?;
        self.nav = NavigationState::new(root);
        self.saver.reset(self.nav.root_snapshot());
        log::info!(
            "Katalog geladen: {} Top-Level-Bubbles",
            self.nav.root().items.len()
        );
        Ok(())
    }

    /// Fügt eine Datei-Bubble hinzu oder liefert die bestehende.
    pub fn add_file(&mut self, path: &str, display_name: Option<&str>) -> CatalogResult<BubbleItem> {
        let outcome = use_cases::add::add_file(&mut self.nav, path, display_name)?;
        Ok(self.finish_add(outcome))
    }

    /// Fügt eine Ordner-Bubble hinzu oder liefert die bestehende.
    pub fn add_folder(
        &mut self,
        path: &str,
        display_name: Option<&str>,
    ) -> CatalogResult<BubbleItem> {
        let outcome = use_cases::add::add_folder(&mut self.nav, path, display_name)?;
        Ok(self.finish_add(outcome))
    }

    /// Fügt eine Kommando-Bubble hinzu oder liefert die bestehende.
    pub fn add_command(
        &mut self,
        command: &str,
        args: Option<&str>,
        display_name: Option<&str>,
    ) -> CatalogResult<BubbleItem> {
        let outcome = use_cases::add::add_command(&mut self.nav, command, args, display_name)?;
        Ok(self.finish_add(outcome))
    }

    /// Entfernt eine Bubble der aktuellen Ebene.
    pub fn remove(&mut self, id: &BubbleId) -> CatalogResult<()> {
        let removed = use_cases::remove::remove_bubble(&mut self.nav, id)?;
        log::info!(
            "Bubble entfernt: {} ({}, {} Nachfahren)",
            removed.id,
            removed.kind,
            removed.descendant_count()
        );
        self.request_save();
        Ok(())
    }

    /// Führt `source` in `target` zusammen; liefert die resultierende Collection.
    pub fn merge_into_collection(
        &mut self,
        source_id: &BubbleId,
        target_id: &BubbleId,
    ) -> CatalogResult<BubbleItem> {
        let collection =
            use_cases::merge::merge_into_collection(&mut self.nav, source_id, target_id)?;
        self.request_save();
        Ok(collection)
    }

    /// Betritt eine Collection der aktuellen Ebene.
    pub fn enter_collection(&mut self, id: &BubbleId) -> CatalogResult<BubbleItem> {
        let collection = use_cases::navigation::enter_collection(&mut self.nav, id)?;
        log::info!(
            "Collection betreten: {} ({})",
            collection.id,
            collection.display_name
        );
        Ok(collection)
    }

    /// Einen Schritt zurück; `false` ist ein No-op auf Root-Ebene.
    pub fn back(&mut self) -> bool {
        let moved = use_cases::navigation::back(&mut self.nav);
        if moved {
            log::debug!("Navigation zurück, Tiefe {}", self.nav.history_depth());
        }
        moved
    }

    /// Springt auf die Root-Ebene.
    pub fn reset_to_root(&mut self) {
        use_cases::navigation::reset_to_root(&mut self.nav);
    }

    /// Öffnet eine Bubble: Collection betreten, sonst über den Launcher starten.
    pub fn open(&mut self, id: &BubbleId, launcher: &dyn Launcher) -> CatalogResult<OpenOutcome> {
        use_cases::open::open_bubble(&mut self.nav, id, launcher)
    }

    /// Speichert sofort; ein geplanter Auto-Save entfällt.
    pub fn save_now(&mut self) -> CatalogResult<()> {
        self.saver.save_now(self.nav.root_snapshot())
    }

    /// Markiert dirty und plant einen Auto-Save nach der Debounce-Pause.
    pub fn request_save(&mut self) {
        self.saver.request_save(self.nav.root_snapshot());
    }

    /// Beendet den Auto-Save ohne abschließendes Speichern. Mehrfach aufrufbar.
    pub fn shutdown(&mut self) {
        self.saver.shutdown();
    }

    fn finish_add(&mut self, outcome: AddOutcome) -> BubbleItem {
        if outcome.is_new() {
            let item = outcome.item();
            log::info!(
                "Bubble hinzugefügt: {} {} ({})",
                item.kind,
                item.id,
                item.path.as_deref().unwrap_or_default()
            );
            self.request_save();
        }
        outcome.into_item()
    }
}
