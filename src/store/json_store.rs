//! JSON-Datei als Bubble-Store.
//!
//! Schreiben erfolgt über eine temporäre Nachbardatei plus `rename`, damit die
//! Zieldatei nach einem Absturz nie halb geschrieben ist.

use super::BubbleStore;
use crate::core::{BubbleItem, BubbleRoot, CATALOG_VERSION};
use crate::shared::options::CATALOG_FILE_NAME;
use crate::shared::{codes, data_dir, CatalogError, CatalogResult, ErrorKind};
use serde::Serialize;
use serde_json::{Map, Value};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

const ROOT_KEYS: [&str; 2] = ["version", "items"];
const ITEM_KEYS: [&str; 6] = ["id", "displayName", "type", "path", "children", "metadata"];

/// Bubble-Katalog als formatierte JSON-Datei
#[derive(Debug, Clone)]
pub struct JsonBubbleStore {
    path: PathBuf,
}

/// Serialisierungs-Sicht, damit beim Speichern nicht der ganze Baum geklont wird.
#[derive(Serialize)]
struct RootView<'a> {
    version: i64,
    items: &'a [BubbleItem],
}

impl JsonBubbleStore {
    /// Store auf einer expliziten Datei.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store am Standardort `<data-dir>/OrbitBubble/bubbles.json`.
    pub fn default_location() -> Self {
        Self::new(data_dir().join(CATALOG_FILE_NAME))
    }

    /// Pfad der Katalog-Datei.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        self.path.with_extension("json.tmp")
    }

    fn write_atomically(&self, bytes: &[u8]) -> io::Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let temp = self.temp_path();
        let written = fs::File::create(&temp).and_then(|mut file| {
            file.write_all(bytes)?;
            file.sync_all()
        });
        let result = written.and_then(|()| fs::rename(&temp, &self.path));
        if result.is_err() {
            let _ = fs::remove_file(&temp);
        }
        result
    }
}

impl BubbleStore for JsonBubbleStore {
    fn load(&self) -> CatalogResult<BubbleRoot> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::info!(
                    "Keine Katalog-Datei unter {}, starte mit leerem Katalog",
                    self.path.display()
                );
                return Ok(BubbleRoot::new());
            }
            Err(e) => return Err(io_error("Katalog-Datei nicht lesbar", &self.path, e)),
        };

        let mut raw: Value = serde_json::from_slice(&bytes).map_err(|e| json_error(&self.path, e))?;
        normalize_root(&mut raw);
        let mut root: BubbleRoot =
            serde_json::from_value(raw).map_err(|e| json_error(&self.path, e))?;

        if root.version <= 0 {
            log::warn!("Katalog-Version {} ungültig, setze {}", root.version, CATALOG_VERSION);
            root.version = CATALOG_VERSION;
        }

        log::info!(
            "Katalog geladen: {} Bubbles ({} Top-Level) aus {}",
            root.total_count(),
            root.items.len(),
            self.path.display()
        );
        Ok(root)
    }

    fn save(&self, root: &BubbleRoot) -> CatalogResult<()> {
        let view = RootView {
            version: root.version.max(CATALOG_VERSION),
            items: &root.items,
        };
        let bytes = serde_json::to_vec_pretty(&view).map_err(|e| {
            CatalogError::new(
                ErrorKind::Unknown,
                codes::STORE_UNKNOWN,
                "Katalog konnte nicht serialisiert werden",
            )
            .with_cause(e)
        })?;

        self.write_atomically(&bytes)
            .map_err(|e| io_error("Katalog-Datei nicht schreibbar", &self.path, e))?;

        log::debug!(
            "Katalog gespeichert: {} Bubbles nach {}",
            root.total_count(),
            self.path.display()
        );
        Ok(())
    }
}

fn io_error(context: &str, path: &Path, error: io::Error) -> CatalogError {
    CatalogError::new(
        ErrorKind::Io,
        codes::STORE_IO,
        format!("{context}: {}", path.display()),
    )
    .with_cause(error)
}

fn json_error(path: &Path, error: serde_json::Error) -> CatalogError {
    if error.is_io() {
        return CatalogError::new(
            ErrorKind::Io,
            codes::STORE_IO,
            format!("Katalog-Datei nicht lesbar: {}", path.display()),
        )
        .with_cause(error);
    }
    CatalogError::new(
        ErrorKind::Parse,
        codes::STORE_JSON_PARSE,
        format!(
            "Katalog-Datei fehlerhaft (Zeile {}, Spalte {}): {}",
            error.line(),
            error.column(),
            path.display()
        ),
    )
    .with_cause(error)
}

/// Bringt Feldnamen in die kanonische Schreibweise und entfernt `null`-Werte.
///
/// Metadaten-Schlüssel bleiben unverändert.
fn normalize_root(value: &mut Value) {
    let Value::Object(map) = value else {
        return;
    };
    normalize_keys(map, &ROOT_KEYS);
    if let Some(Value::Array(items)) = map.get_mut("items") {
        items.iter_mut().for_each(normalize_item);
    }
}

fn normalize_item(value: &mut Value) {
    let Value::Object(map) = value else {
        return;
    };
    normalize_keys(map, &ITEM_KEYS);
    if let Some(Value::Array(children)) = map.get_mut("children") {
        children.iter_mut().for_each(normalize_item);
    }
}

fn normalize_keys(map: &mut Map<String, Value>, canonical: &[&str]) {
    let entries = std::mem::take(map);
    for (key, value) in entries {
        if value.is_null() {
            continue;
        }
        let key = canonical
            .iter()
            .find(|known| known.eq_ignore_ascii_case(&key))
            .map_or(key, |known| (*known).to_string());
        map.insert(key, value);
    }
}
