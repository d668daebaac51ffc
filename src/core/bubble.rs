//! Bubble-Datenmodell: einzelne Einträge, Collections und der persistierte Root.

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Metadaten-Schlüssel für das auszuführende Kommando einer Command-Bubble
pub const METADATA_COMMAND: &str = "command";
/// Metadaten-Schlüssel für die Argumente einer Command-Bubble
pub const METADATA_ARGS: &str = "args";

/// Global eindeutige, unveränderliche Bubble-ID (opakes Token).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BubbleId(String);

impl BubbleId {
    /// Erzeugt eine neue zufällige ID (32 Hex-Zeichen, ohne Bindestriche).
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().simple().to_string())
    }

    /// Liefert die ID als String-Slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Gibt `true` zurück, wenn die ID leer oder nur Whitespace ist.
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for BubbleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for BubbleId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for BubbleId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl PartialEq<str> for BubbleId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for BubbleId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Art einer Bubble
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum BubbleItemType {
    /// Einzelne Datei
    File,
    /// Ordner
    Folder,
    /// Gruppe weiterer Bubbles (einzige navigierbare Art)
    Collection,
    /// Ausführbares Kommando (Metadaten `command`/`args`)
    Command,
}

impl BubbleItemType {
    const ALL: [BubbleItemType; 4] = [
        BubbleItemType::File,
        BubbleItemType::Folder,
        BubbleItemType::Collection,
        BubbleItemType::Command,
    ];

    /// Kanonischer Name wie in der JSON-Datei.
    pub fn as_str(self) -> &'static str {
        match self {
            BubbleItemType::File => "File",
            BubbleItemType::Folder => "Folder",
            BubbleItemType::Collection => "Collection",
            BubbleItemType::Command => "Command",
        }
    }
}

impl fmt::Display for BubbleItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Akzeptiert Namen (case-insensitive) sowie die numerische Legacy-Kodierung 0..=3.
impl<'de> Deserialize<'de> for BubbleItemType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct TypeVisitor;

        impl Visitor<'_> for TypeVisitor {
            type Value = BubbleItemType;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("\"File\", \"Folder\", \"Collection\", \"Command\" oder 0..=3")
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
                BubbleItemType::ALL
                    .into_iter()
                    .find(|t| t.as_str().eq_ignore_ascii_case(value.trim()))
                    .ok_or_else(|| E::invalid_value(de::Unexpected::Str(value), &self))
            }

            fn visit_u64<E: de::Error>(self, value: u64) -> Result<Self::Value, E> {
                usize::try_from(value)
                    .ok()
                    .and_then(|i| BubbleItemType::ALL.get(i).copied())
                    .ok_or_else(|| E::invalid_value(de::Unexpected::Unsigned(value), &self))
            }

            fn visit_i64<E: de::Error>(self, value: i64) -> Result<Self::Value, E> {
                u64::try_from(value)
                    .map_err(|_| E::invalid_value(de::Unexpected::Signed(value), &self))
                    .and_then(|v| self.visit_u64(v))
            }
        }

        deserializer.deserialize_any(TypeVisitor)
    }
}

/// Ein Eintrag im Bubble-Katalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BubbleItem {
    /// Eindeutige ID (fehlt sie in der Datei, wird eine neue vergeben)
    #[serde(default = "BubbleId::generate")]
    pub id: BubbleId,
    /// Anzeigename im Ring
    #[serde(default)]
    pub display_name: String,
    /// Art der Bubble
    #[serde(rename = "type")]
    pub kind: BubbleItemType,
    /// Ziel-Pfad (File/Folder) bzw. Kommando (Command)
    #[serde(default)]
    pub path: Option<String>,
    /// Kinder, nur bei Collections befüllt
    #[serde(default)]
    pub children: Option<Vec<BubbleItem>>,
    /// Freie Zusatzdaten (Command: `command`, `args`)
    #[serde(default)]
    pub metadata: Option<BTreeMap<String, String>>,
}

impl BubbleItem {
    /// Erstellt eine Datei- oder Ordner-Bubble mit frischer ID.
    pub fn with_path(kind: BubbleItemType, path: &str, display_name: String) -> Self {
        Self {
            id: BubbleId::generate(),
            display_name,
            kind,
            path: Some(path.to_string()),
            children: None,
            metadata: None,
        }
    }

    /// Erstellt eine Collection mit den gegebenen Kindern.
    pub fn collection(display_name: String, children: Vec<BubbleItem>) -> Self {
        Self {
            id: BubbleId::generate(),
            display_name,
            kind: BubbleItemType::Collection,
            path: None,
            children: Some(children),
            metadata: None,
        }
    }

    /// Erstellt eine Command-Bubble; `path` spiegelt das Kommando.
    pub fn command(display_name: String, command: &str, args: Option<&str>) -> Self {
        let mut metadata = BTreeMap::new();
        metadata.insert(METADATA_COMMAND.to_string(), command.to_string());
        if let Some(args) = args {
            metadata.insert(METADATA_ARGS.to_string(), args.to_string());
        }
        Self {
            id: BubbleId::generate(),
            display_name,
            kind: BubbleItemType::Command,
            path: Some(command.to_string()),
            children: None,
            metadata: Some(metadata),
        }
    }

    /// Gibt `true` zurück, wenn die Bubble eine Collection ist.
    pub fn is_collection(&self) -> bool {
        self.kind == BubbleItemType::Collection
    }

    /// Liefert einen Metadaten-Wert.
    pub fn metadata_value(&self, key: &str) -> Option<&str> {
        self.metadata.as_ref()?.get(key).map(String::as_str)
    }

    /// Vergleicht Art und Pfad (Pfad case-insensitive) für die Duplikat-Erkennung.
    pub fn matches_target(&self, kind: BubbleItemType, path: &str) -> bool {
        self.kind == kind
            && self
                .path
                .as_deref()
                .is_some_and(|own| own.to_lowercase() == path.to_lowercase())
    }

    /// Anzahl aller Nachfahren (rekursiv).
    pub fn descendant_count(&self) -> usize {
        self.children
            .as_deref()
            .unwrap_or_default()
            .iter()
            .map(|child| 1 + child.descendant_count())
            .sum()
    }
}

/// Aktuelle Schema-Version der Katalog-Datei
pub const CATALOG_VERSION: i64 = 1;

fn default_version() -> i64 {
    CATALOG_VERSION
}

/// Wurzel des Katalogs: Version und sichtbare Top-Level-Reihenfolge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BubbleRoot {
    /// Schema-Version (immer >= 1 nach Laden/Speichern)
    #[serde(default = "default_version")]
    pub version: i64,
    /// Top-Level-Bubbles in Anzeige-Reihenfolge
    #[serde(default)]
    pub items: Vec<BubbleItem>,
}

impl BubbleRoot {
    /// Erstellt einen leeren Root mit aktueller Version.
    pub fn new() -> Self {
        Self {
            version: CATALOG_VERSION,
            items: Vec::new(),
        }
    }

    /// Anzahl aller Bubbles im Baum.
    pub fn total_count(&self) -> usize {
        self.items
            .iter()
            .map(|item| 1 + item.descendant_count())
            .sum()
    }
}

impl Default for BubbleRoot {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_ids_are_unique_hex() {
        let a = BubbleId::generate();
        let b = BubbleId::generate();
        assert_ne!(a, b);
        assert_eq!(a.as_str().len(), 32);
        assert!(a.as_str().chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_type_accepts_names_case_insensitive_and_legacy_numbers() {
        let parsed: Vec<BubbleItemType> =
            serde_json::from_str(r#"["file", "FOLDER", "Collection", 3]"#).expect("parse");
        assert_eq!(
            parsed,
            vec![
                BubbleItemType::File,
                BubbleItemType::Folder,
                BubbleItemType::Collection,
                BubbleItemType::Command
            ]
        );
        assert!(serde_json::from_str::<BubbleItemType>("7").is_err());
        assert!(serde_json::from_str::<BubbleItemType>(r#""Shortcut""#).is_err());
    }

    #[test]
    fn test_matches_target_ignoriert_gross_kleinschreibung() {
        let item = BubbleItem::with_path(BubbleItemType::Folder, r"C:\Projects", "Projects".into());
        assert!(item.matches_target(BubbleItemType::Folder, r"c:\projects"));
        assert!(!item.matches_target(BubbleItemType::File, r"C:\Projects"));
    }

    #[test]
    fn test_total_count_zaehlt_verschachtelte_kinder() {
        let leaf = BubbleItem::with_path(BubbleItemType::File, "/a", "a".into());
        let inner = BubbleItem::collection("inner".into(), vec![leaf]);
        let outer = BubbleItem::collection("outer".into(), vec![inner]);
        let root = BubbleRoot {
            version: 1,
            items: vec![outer],
        };
        assert_eq!(root.total_count(), 3);
    }

    #[test]
    fn test_command_bubble_traegt_metadaten() {
        let item = BubbleItem::command("Terminal".into(), "wt.exe", Some("-d ."));
        assert_eq!(item.metadata_value(METADATA_COMMAND), Some("wt.exe"));
        assert_eq!(item.metadata_value(METADATA_ARGS), Some("-d ."));
        assert_eq!(item.path.as_deref(), Some("wt.exe"));
    }
}
