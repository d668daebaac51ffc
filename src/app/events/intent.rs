use crate::core::BubbleId;
use crate::shared::{AppOptions, MenuRequestSource};

/// App-Intent Events.
/// Intents sind Eingaben aus UI/System ohne direkte Mutationslogik.
#[derive(Debug, Clone)]
pub enum AppIntent {
    /// Menü-Anforderung (Hotkey, Geste, Hub-Klick)
    MenuRequested { source: MenuRequestSource },
    /// Menü schließen (Escape, Klick daneben)
    CloseMenuRequested,
    /// Katalog neu aus dem Store laden
    ReloadRequested,
    /// Katalog sofort speichern
    SaveRequested,
    /// Datei als Bubble hinzufügen
    AddFileRequested {
        path: String,
        display_name: Option<String>,
    },
    /// Ordner als Bubble hinzufügen
    AddFolderRequested {
        path: String,
        display_name: Option<String>,
    },
    /// Kommando als Bubble hinzufügen
    AddCommandRequested {
        command: String,
        args: Option<String>,
        display_name: Option<String>,
    },
    /// Dateien/Ordner per Drag & Drop auf den Ring gezogen
    PathsDropped { paths: Vec<String> },
    /// Bubble entfernen
    RemoveRequested { id: BubbleId },
    /// Bubble auf eine andere Bubble gezogen
    BubbleDroppedOnBubble {
        source_id: BubbleId,
        target_id: BubbleId,
    },
    /// Bubble angeklickt
    BubbleClicked { id: BubbleId },
    /// Eine Ebene zurück
    BackRequested,
    /// Zur Root-Ebene
    HomeRequested,
    /// Gesten-Erkennung ein-/ausschalten
    GestureToggled { enabled: bool },
    /// Optionen wurden geändert (sofortige Anwendung)
    OptionsChanged { options: AppOptions },
    /// Anwendung beenden
    ExitRequested,
}
