//! Zentrale Konfiguration für OrbitBubble.
//!
//! `AppOptions` enthält alle zur Laufzeit änderbaren Werte.
//! Die `const`-Werte bleiben als Fallback/Default erhalten.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

// ── Gesten ──────────────────────────────────────────────────────────

/// Zeitfenster der Punkt-Historie (Kreise dauern typisch 700–1500 ms).
pub const GESTURE_WINDOW_MS: u64 = 1200;
/// Mindestanzahl Punkte für eine Klassifikation.
pub const GESTURE_MIN_POINTS: usize = 24;
/// Punkte näher als dieser Abstand zum letzten Punkt werden verworfen (DIP).
pub const GESTURE_MIN_DISTANCE_DIP: f64 = 3.0;
/// Kleinster zulässiger mittlerer Kreisradius (DIP).
pub const GESTURE_MIN_RADIUS_DIP: f64 = 35.0;
/// Größter zulässiger mittlerer Kreisradius (DIP).
pub const GESTURE_MAX_RADIUS_DIP: f64 = 450.0;
/// Winkelabdeckung (0..1); 0.85 entspricht rund 306°.
pub const GESTURE_ANGLE_COVERAGE_THRESHOLD: f64 = 0.85;
/// Maximales Verhältnis Radius-Standardabweichung / mittlerer Radius.
pub const GESTURE_RADIUS_STDDEV_RATIO_MAX: f64 = 0.50;
/// Sperrzeit nach einem Treffer.
pub const GESTURE_COOLDOWN_MS: u64 = 500;
/// Harte Obergrenze des Punktpuffers.
pub const GESTURE_BUFFER_CAP: usize = 128;
/// Intervall der Statistik-Zusammenfassung.
pub const GESTURE_STATS_INTERVAL_MS: u64 = 5000;

// ── Katalog ─────────────────────────────────────────────────────────

/// Debounce-Verzögerung für das automatische Speichern.
pub const AUTOSAVE_DELAY_MS: u64 = 500;
/// Unterordner im benutzerbezogenen Datenverzeichnis.
pub const APP_DIR_NAME: &str = "OrbitBubble";
/// Dateiname des Bubble-Katalogs.
pub const CATALOG_FILE_NAME: &str = "bubbles.json";
/// Dateiname der Optionen.
pub const OPTIONS_FILE_NAME: &str = "orbit_bubble.toml";

// ── Ring ────────────────────────────────────────────────────────────

/// Radius des Bubble-Rings um den Hub (DIP).
pub const RING_RADIUS_DIP: f64 = 180.0;

/// Schwellwerte der Kreisgesten-Erkennung (unveränderlicher Snapshot).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureOptions {
    /// Maximales Alter gepufferter Punkte in ms
    pub window_ms: u64,
    /// Mindestanzahl Punkte
    pub min_points: usize,
    /// Jitter-Filter: Mindestabstand zum letzten angenommenen Punkt (DIP)
    pub min_distance_dip: f64,
    /// Kleinster mittlerer Radius (DIP)
    pub min_radius_dip: f64,
    /// Größter mittlerer Radius (DIP)
    pub max_radius_dip: f64,
    /// Erforderliche Winkelabdeckung (0..1)
    pub angle_coverage_threshold: f64,
    /// Maximale Radius-Streuung relativ zum mittleren Radius
    pub radius_std_dev_ratio_max: f64,
    /// Sperrzeit nach einem Treffer in ms
    pub cooldown_ms: u64,
}

impl Default for GestureOptions {
    fn default() -> Self {
        Self {
            window_ms: GESTURE_WINDOW_MS,
            min_points: GESTURE_MIN_POINTS,
            min_distance_dip: GESTURE_MIN_DISTANCE_DIP,
            min_radius_dip: GESTURE_MIN_RADIUS_DIP,
            max_radius_dip: GESTURE_MAX_RADIUS_DIP,
            angle_coverage_threshold: GESTURE_ANGLE_COVERAGE_THRESHOLD,
            radius_std_dev_ratio_max: GESTURE_RADIUS_STDDEV_RATIO_MAX,
            cooldown_ms: GESTURE_COOLDOWN_MS,
        }
    }
}

/// Alle zur Laufzeit änderbaren Optionen.
/// Wird als `orbit_bubble.toml` im Datenverzeichnis gespeichert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppOptions {
    /// Gesten-Schwellwerte
    #[serde(default)]
    pub gesture: GestureOptions,
    /// Debounce-Verzögerung für Auto-Save in ms
    #[serde(default = "default_autosave_delay_ms")]
    pub autosave_delay_ms: u64,
    /// Ring-Radius für das Layout der sichtbaren Bubbles
    #[serde(default = "default_ring_radius_dip")]
    pub ring_radius_dip: f64,
    /// Gesten-Erkennung beim Start aktivieren
    #[serde(default = "default_true")]
    pub gesture_enabled: bool,
}

impl Default for AppOptions {
    fn default() -> Self {
        Self {
            gesture: GestureOptions::default(),
            autosave_delay_ms: AUTOSAVE_DELAY_MS,
            ring_radius_dip: RING_RADIUS_DIP,
            gesture_enabled: true,
        }
    }
}

/// Serde-Default für `autosave_delay_ms` (Abwärtskompatibilität).
fn default_autosave_delay_ms() -> u64 {
    AUTOSAVE_DELAY_MS
}

/// Serde-Default für `ring_radius_dip`.
fn default_ring_radius_dip() -> f64 {
    RING_RADIUS_DIP
}

fn default_true() -> bool {
    true
}

impl AppOptions {
    /// Lädt Optionen aus einer TOML-Datei. Bei Fehler: Standardwerte.
    pub fn load_from_file(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(opts) => {
                    log::info!("Optionen geladen aus: {}", path.display());
                    opts
                }
                Err(e) => {
                    log::warn!("Optionen-Datei fehlerhaft, verwende Standardwerte: {}", e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Keine Optionen-Datei gefunden, verwende Standardwerte");
                Self::default()
            }
        }
    }

    /// Speichert Optionen als TOML-Datei; fehlende Ordner werden angelegt.
    pub fn save_to_file(&self, path: &Path) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        log::info!("Optionen gespeichert nach: {}", path.display());
        Ok(())
    }

    /// Pfad der Optionen-Datei im Datenverzeichnis.
    pub fn config_path() -> PathBuf {
        data_dir().join(OPTIONS_FILE_NAME)
    }
}

/// Benutzerbezogenes Datenverzeichnis der Anwendung.
///
/// Reihenfolge: `ORBIT_BUBBLE_HOME`, `APPDATA`, `XDG_DATA_HOME`,
/// `$HOME/.local/share`, zuletzt das Arbeitsverzeichnis.
pub fn data_dir() -> PathBuf {
    if let Some(home) = env_path("ORBIT_BUBBLE_HOME") {
        return home;
    }
    let base = env_path("APPDATA")
        .or_else(|| env_path("XDG_DATA_HOME"))
        .or_else(|| env_path("HOME").map(|home| home.join(".local").join("share")))
        .unwrap_or_else(|| PathBuf::from("."));
    base.join(APP_DIR_NAME)
}

fn env_path(key: &str) -> Option<PathBuf> {
    std::env::var_os(key)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}
