//! Application State: zentrale Datenhaltung.

use super::catalog::BubbleCatalogService;
use super::gesture_detection::GestureDetectionService;
use super::launcher::{Launcher, ShellLauncher};
use super::CommandLog;
use crate::core::{layout_ring, BubbleItem, RingSlot};
use crate::shared::{AppOptions, MenuRequest, MenuRequestSource, PointerSample};
use crate::store::BubbleStore;
use glam::DVec2;
use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::time::Duration;

/// Zustand des Bubble-Menüs (Overlay)
#[derive(Debug, Clone, Default)]
pub struct MenuState {
    /// Ob das Overlay sichtbar ist
    pub open: bool,
    /// Auslöser der letzten Umschaltung
    pub last_source: Option<MenuRequestSource>,
    /// Mittelpunkt des Hubs (DIP)
    pub hub: DVec2,
    /// Drehung des Rings in Radiant
    pub angle_offset: f64,
}

/// UI-bezogener Anwendungszustand
#[derive(Debug, Clone, Default)]
pub struct UiState {
    /// Temporäre Statusnachricht (z.B. fehlgeschlagenes Hinzufügen)
    pub status_message: Option<String>,
}

impl UiState {
    /// Erstellt den Standard-UI-Zustand.
    pub fn new() -> Self {
        Self {
            status_message: None,
        }
    }
}

/// Hauptzustand der Anwendung
pub struct AppState {
    /// Bubble-Katalog mit Navigation und Auto-Save
    pub catalog: BubbleCatalogService,
    /// Kreisgesten-Erkennung
    pub gesture: GestureDetectionService,
    /// Starter für Nicht-Collection-Bubbles
    pub launcher: Box<dyn Launcher>,
    /// Menü-/Overlay-State
    pub menu: MenuState,
    /// UI-State
    pub ui: UiState,
    /// Verlauf ausgeführter Commands
    pub command_log: CommandLog,
    /// Laufzeit-Optionen
    pub options: AppOptions,
    /// Zieldatei für geänderte Optionen (`None` = nicht persistieren)
    pub options_path: Option<PathBuf>,
    /// Signalisiert dem Host, die Anwendung kontrolliert zu beenden
    pub should_exit: bool,
    menu_tx: Sender<MenuRequest>,
    menu_rx: Receiver<MenuRequest>,
    pointer_tx: Sender<PointerSample>,
}

impl AppState {
    /// Erstellt den App-State über einem Store (Katalog noch nicht geladen).
    pub fn new(store: Arc<dyn BubbleStore>, options: AppOptions) -> Self {
        let (menu_tx, menu_rx) = mpsc::channel();
        let catalog = BubbleCatalogService::with_delay(
            store,
            Duration::from_millis(options.autosave_delay_ms),
        );
        let (pointer_tx, pointer_rx) = mpsc::channel();
        let mut gesture = GestureDetectionService::new(options.gesture.clone(), menu_tx.clone());
        if options.gesture_enabled {
            gesture.start(pointer_rx);
        }
        Self {
            catalog,
            gesture,
            launcher: Box::new(ShellLauncher),
            menu: MenuState::default(),
            ui: UiState::new(),
            command_log: CommandLog::new(),
            options,
            options_path: None,
            should_exit: false,
            menu_tx,
            menu_rx,
            pointer_tx,
        }
    }

    /// Reicht ein Zeiger-Sample an die Gesten-Erkennung weiter.
    ///
    /// Verarbeitet wird es beim nächsten `pump`; bei abgeschalteter Erkennung
    /// wird es verworfen.
    pub fn submit_pointer(&self, sample: PointerSample) {
        if self.pointer_tx.send(sample).is_err() {
            log::trace!("Gesten-Erkennung inaktiv, Sample verworfen");
        }
    }

    /// Sender für Zeiger-Samples aus anderen Threads (z.B. Maus-Hook).
    pub fn pointer_sender(&self) -> Sender<PointerSample> {
        self.pointer_tx.clone()
    }

    /// Ersetzt die Sample-Quelle; bisherige Sender laufen ins Leere.
    pub fn reconnect_pointer_source(&mut self) -> Receiver<PointerSample> {
        let (pointer_tx, pointer_rx) = mpsc::channel();
        self.pointer_tx = pointer_tx;
        pointer_rx
    }

    /// Sender für Menü-Anforderungen externer Quellen (Hotkey, Hub-Klick).
    pub fn menu_sender(&self) -> Sender<MenuRequest> {
        self.menu_tx.clone()
    }

    /// Entnimmt alle wartenden Menü-Anforderungen in Eingangsreihenfolge.
    pub fn drain_menu_requests(&self) -> Vec<MenuRequest> {
        self.menu_rx.try_iter().collect()
    }

    /// Sichtbare Bubbles der aktuellen Ebene.
    pub fn visible_items(&self) -> &[BubbleItem] {
        self.catalog.visible_items()
    }

    /// Ring-Positionen der sichtbaren Bubbles um den Hub.
    pub fn ring_layout(&self) -> Vec<RingSlot> {
        layout_ring(
            self.visible_items(),
            self.menu.hub,
            self.options.ring_radius_dip,
            self.menu.angle_offset,
        )
    }
}
