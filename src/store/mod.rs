//! Persistenz des Bubble-Katalogs.
//!
//! Der Katalog wird immer als ganzer Snapshot gelesen und geschrieben.

mod json_store;
mod memory_store;

pub use json_store::JsonBubbleStore;
pub use memory_store::MemoryBubbleStore;

use crate::core::BubbleRoot;
use crate::shared::CatalogResult;

/// Lädt und speichert den kompletten Bubble-Root.
///
/// Implementierungen müssen von mehreren Threads aus aufrufbar sein
/// (Autosave-Timer und interaktiver Kontext).
pub trait BubbleStore: Send + Sync {
    /// Lädt den Root. Fehlt die Datei, ist das Ergebnis ein leerer Root.
    fn load(&self) -> CatalogResult<BubbleRoot>;

    /// Schreibt den Root atomar (alles oder nichts).
    fn save(&self, root: &BubbleRoot) -> CatalogResult<()>;
}
