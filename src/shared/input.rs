//! Eingabe-Ereignisse zwischen Host, Gesten-Erkennung und App-Layer.

use std::fmt;

/// Zeiger-Sample in DIP, wie von der Sample-Quelle geliefert
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerSample {
    /// X-Koordinate (DIP)
    pub x: f64,
    /// Y-Koordinate (DIP)
    pub y: f64,
}

impl PointerSample {
    /// Erstellt ein Sample.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Auslöser einer Menü-Anforderung
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MenuRequestSource {
    /// Globaler Hotkey
    Hotkey,
    /// Kreisgeste
    Gesture,
    /// Klick auf den Hub
    CenterClick,
    /// Unbekannt
    #[default]
    Unknown,
}

impl fmt::Display for MenuRequestSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MenuRequestSource::Hotkey => "Hotkey",
            MenuRequestSource::Gesture => "Gesture",
            MenuRequestSource::CenterClick => "CenterClick",
            MenuRequestSource::Unknown => "Unknown",
        };
        f.write_str(name)
    }
}

/// Anforderung, das Bubble-Menü umzuschalten
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MenuRequest {
    /// Auslöser
    pub source: MenuRequestSource,
}

impl MenuRequest {
    /// Erstellt eine Anforderung mit Auslöser.
    pub fn new(source: MenuRequestSource) -> Self {
        Self { source }
    }
}
