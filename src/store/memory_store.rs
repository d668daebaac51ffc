//! Flüchtiger Bubble-Store im Speicher.

use super::BubbleStore;
use crate::core::{BubbleRoot, CATALOG_VERSION};
use crate::shared::CatalogResult;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

/// Hält den zuletzt gespeicherten Root im Speicher.
///
/// Gleiche Load/Save-Semantik wie der JSON-Store (leerer Root beim ersten
/// Laden, Version ≥ 1), nützlich für Tests und `--memory`.
#[derive(Debug, Default)]
pub struct MemoryBubbleStore {
    saved: Mutex<Option<BubbleRoot>>,
    save_count: AtomicUsize,
}

impl MemoryBubbleStore {
    /// Leerer Store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store mit vorbelegtem Inhalt.
    pub fn with_root(root: BubbleRoot) -> Self {
        Self {
            saved: Mutex::new(Some(root)),
            save_count: AtomicUsize::new(0),
        }
    }

    /// Anzahl erfolgreicher `save`-Aufrufe.
    pub fn save_count(&self) -> usize {
        self.save_count.load(Ordering::SeqCst)
    }

    /// Zuletzt gespeicherter Root.
    pub fn saved(&self) -> Option<BubbleRoot> {
        self.saved
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl BubbleStore for MemoryBubbleStore {
    fn load(&self) -> CatalogResult<BubbleRoot> {
        let mut root = self.saved().unwrap_or_default();
        root.version = root.version.max(CATALOG_VERSION);
        Ok(root)
    }

    fn save(&self, root: &BubbleRoot) -> CatalogResult<()> {
        let mut copy = root.clone();
        copy.version = copy.version.max(CATALOG_VERSION);
        *self.saved.lock().unwrap_or_else(PoisonError::into_inner) = Some(copy);
        self.save_count.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
