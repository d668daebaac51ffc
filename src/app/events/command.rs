use crate::core::BubbleId;
use crate::shared::{AppOptions, MenuRequestSource};

/// Commands sind mutierende Schritte, die zentral ausgeführt werden.
#[derive(Debug, Clone)]
pub enum AppCommand {
    /// Menü umschalten
    ToggleMenu { source: MenuRequestSource },
    /// Menü schließen
    CloseMenu,
    /// Katalog aus dem Store laden
    LoadCatalog,
    /// Katalog synchron speichern
    SaveCatalog,
    /// Datei-Bubble anlegen
    AddFile {
        path: String,
        display_name: Option<String>,
    },
    /// Ordner-Bubble anlegen
    AddFolder {
        path: String,
        display_name: Option<String>,
    },
    /// Kommando-Bubble anlegen
    AddCommand {
        command: String,
        args: Option<String>,
        display_name: Option<String>,
    },
    /// Bubble der aktuellen Ebene entfernen
    RemoveBubble { id: BubbleId },
    /// Quelle in Ziel zusammenführen
    MergeBubbles {
        source_id: BubbleId,
        target_id: BubbleId,
    },
    /// Bubble öffnen (Collection betreten oder starten)
    OpenBubble { id: BubbleId },
    /// Navigation zurück
    NavigateBack,
    /// Navigation zur Root-Ebene
    ResetToRoot,
    /// Gesten-Erkennung ein-/ausschalten
    SetGestureEnabled { enabled: bool },
    /// Optionen übernehmen
    ApplyOptions { options: AppOptions },
    /// Anwendung beenden
    RequestExit,
}
