//! Strukturierte Fehler des Bubble-Katalogs und der Persistenz.

use std::error::Error as StdError;
use thiserror::Error;

/// Ergebnis-Alias für Katalog- und Store-Operationen
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Grobe Fehlerklasse für Verzweigungen beim Aufrufer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Ungültige Eingabe (leerer Pfad, leere ID, gleiche IDs)
    Validation,
    /// Ziel existiert nicht (Dateisystem oder Katalog)
    NotFound,
    /// Falsche Bubble-Art (z.B. Betreten einer Nicht-Collection)
    TypeMismatch,
    /// Lese-/Schreibfehler
    Io,
    /// Katalog-Datei nicht lesbar
    Parse,
    /// Sonstiger Fehler
    Unknown,
}

/// Fehler mit stabilem Code, Meldung und optionaler Ursache.
#[derive(Debug, Error)]
#[error("{code}: {message}")]
pub struct CatalogError {
    /// Fehlerklasse
    pub kind: ErrorKind,
    /// Stabiler, maschinenlesbarer Code (z.B. `MERGE_SAME_ID`)
    pub code: &'static str,
    /// Menschenlesbare Meldung
    pub message: String,
    /// Ursprünglicher Fehler, falls vorhanden
    #[source]
    pub cause: Option<Box<dyn StdError + Send + Sync + 'static>>,
}

impl CatalogError {
    /// Erstellt einen Fehler ohne Ursache.
    pub fn new(kind: ErrorKind, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            kind,
            code,
            message: message.into(),
            cause: None,
        }
    }

    /// Hängt eine Ursache an.
    #[must_use]
    pub fn with_cause(mut self, cause: impl StdError + Send + Sync + 'static) -> Self {
        self.cause = Some(Box::new(cause));
        self
    }

    /// Eingabe verletzt eine Vorbedingung (leerer Pfad, gleiche IDs, …).
    #[must_use]
    pub fn validation(code: &'static str, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, code, message)
    }

    /// Pfad oder Bubble existiert nicht.
    #[must_use]
    pub fn not_found(code: &'static str, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, code, message)
    }

    /// Bubble hat die falsche Art für die Operation.
    #[must_use]
    pub fn type_mismatch(code: &'static str, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::TypeMismatch, code, message)
    }
}

/// Stabile Fehlercodes
pub mod codes {
    /// Pfad beim Hinzufügen leer
    pub const BUBBLE_PATH_EMPTY: &str = "BUBBLE_PATH_EMPTY";
    /// Datei zum Hinzufügen existiert nicht
    pub const BUBBLE_FILE_NOT_FOUND: &str = "BUBBLE_FILE_NOT_FOUND";
    /// Ordner zum Hinzufügen existiert nicht
    pub const BUBBLE_DIR_NOT_FOUND: &str = "BUBBLE_DIR_NOT_FOUND";
    /// Kommando beim Hinzufügen leer
    pub const BUBBLE_COMMAND_EMPTY: &str = "BUBBLE_COMMAND_EMPTY";
    /// Leere Bubble-ID
    pub const BUBBLE_ID_EMPTY: &str = "BUBBLE_ID_EMPTY";
    /// Bubble nicht auf der aktuellen Ebene
    pub const BUBBLE_NOT_FOUND: &str = "BUBBLE_NOT_FOUND";
    /// Quelle und Ziel sind identisch
    pub const MERGE_SAME_ID: &str = "MERGE_SAME_ID";
    /// Quelle oder Ziel fehlt auf der aktuellen Ebene
    pub const MERGE_NOT_FOUND: &str = "MERGE_NOT_FOUND";
    /// Collection nicht auf der aktuellen Ebene
    pub const NAV_NOT_FOUND: &str = "NAV_NOT_FOUND";
    /// Bubble ist keine Collection
    pub const NAV_NOT_COLLECTION: &str = "NAV_NOT_COLLECTION";
    /// Katalog-Datei ist kein gültiges JSON
    pub const STORE_JSON_PARSE: &str = "STORE_JSON_PARSE";
    /// Lesen oder Schreiben der Katalog-Datei fehlgeschlagen
    pub const STORE_IO: &str = "STORE_IO";
    /// Sonstiger Store-Fehler
    pub const STORE_UNKNOWN: &str = "STORE_UNKNOWN";
    /// Zu startende Datei existiert nicht
    pub const LAUNCH_FILE_NOT_FOUND: &str = "LAUNCH_FILE_NOT_FOUND";
    /// Zu öffnender Ordner existiert nicht
    pub const LAUNCH_DIR_NOT_FOUND: &str = "LAUNCH_DIR_NOT_FOUND";
    /// Kommando-Bubble ohne Kommando
    pub const LAUNCH_CMD_EMPTY: &str = "LAUNCH_CMD_EMPTY";
    /// Collection an den Launcher übergeben
    pub const LAUNCH_COLLECTION: &str = "LAUNCH_COLLECTION";
    /// Prozessstart fehlgeschlagen
    pub const LAUNCH_EXCEPTION: &str = "LAUNCH_EXCEPTION";
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_display_enthaelt_code_und_meldung() {
        let error = CatalogError::validation(codes::MERGE_SAME_ID, "Quelle und Ziel identisch");
        assert_eq!(error.to_string(), "MERGE_SAME_ID: Quelle und Ziel identisch");
        assert_eq!(error.kind, ErrorKind::Validation);
        assert!(error.source().is_none());
    }

    #[test]
    fn test_ursache_ist_als_source_erreichbar() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "gesperrt");
        let error = CatalogError::new(ErrorKind::Io, codes::STORE_IO, "Schreiben fehlgeschlagen")
            .with_cause(io);
        let source = error.source().expect("Ursache vorhanden");
        assert_eq!(source.to_string(), "gesperrt");
    }
}
