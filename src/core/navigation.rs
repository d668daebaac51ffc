//! Navigationszustand über dem Bubble-Baum.
//!
//! Die aktuelle Collection wird nicht als Referenz, sondern als ID-Pfad ab dem
//! Root gehalten. Dadurch bleibt der Zustand gültig, wenn der Root per
//! Copy-on-Write (`Arc::make_mut`) geklont wird.

use super::{BubbleId, BubbleItem, BubbleRoot};
use std::sync::Arc;

/// Fehler beim Betreten einer Collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum NavigationError {
    /// ID ist auf der aktuellen Ebene nicht vorhanden
    #[error("Bubble nicht auf der aktuellen Ebene gefunden")]
    NotFound,
    /// Bubble existiert, ist aber keine Collection
    #[error("Bubble ist keine Collection")]
    NotCollection,
}

/// Root, aktuelle Ebene und Zurück-Historie
#[derive(Debug, Clone)]
pub struct NavigationState {
    /// Besitzender Verweis auf den aktuellen Root (Arc für O(1)-Snapshots)
    root: Arc<BubbleRoot>,
    /// ID-Pfad zur aktuellen Collection (leer = Root-Ebene)
    current: Vec<BubbleId>,
    /// Frühere Werte von `current`
    history: Vec<Vec<BubbleId>>,
}

impl NavigationState {
    /// Erstellt den Zustand auf Root-Ebene.
    pub fn new(root: BubbleRoot) -> Self {
        Self {
            root: Arc::new(root),
            current: Vec::new(),
            history: Vec::new(),
        }
    }

    /// Read-only Sicht auf den Root.
    pub fn root(&self) -> &BubbleRoot {
        &self.root
    }

    /// O(1)-Snapshot des Roots für Hintergrund-Leser (Autosave).
    pub fn root_snapshot(&self) -> Arc<BubbleRoot> {
        Arc::clone(&self.root)
    }

    /// ID-Pfad zur aktuellen Collection.
    pub fn current_path(&self) -> &[BubbleId] {
        &self.current
    }

    /// Aktuell betretene Collection (`None` = Root-Ebene).
    pub fn current_collection(&self) -> Option<&BubbleItem> {
        let (last, parents) = self.current.split_last()?;
        resolve_level(&self.root.items, parents)?
            .iter()
            .find(|item| &item.id == last)
    }

    /// Sichtbare Bubbles der aktuellen Ebene.
    pub fn visible_items(&self) -> &[BubbleItem] {
        match resolve_level(&self.root.items, &self.current) {
            Some(items) => items,
            None => {
                log::warn!(
                    "Navigationspfad nicht mehr auflösbar ({} Ebenen), zeige Root",
                    self.current.len()
                );
                self.root.items.as_slice()
            }
        }
    }

    /// Sucht eine Bubble auf der aktuellen Ebene.
    pub fn find_visible(&self, id: &BubbleId) -> Option<&BubbleItem> {
        self.visible_items().iter().find(|item| &item.id == id)
    }

    /// Mutable Liste der aktuellen Ebene.
    ///
    /// Klont den Root nur, wenn noch ein Snapshot darauf verweist (COW).
    /// Eine betretene Collection ohne Kinderliste bekommt eine leere Liste.
    pub fn visible_items_mut(&mut self) -> &mut Vec<BubbleItem> {
        if resolve_level(&self.root.items, &self.current).is_none() {
            log::warn!("Navigationspfad ungültig, setze auf Root zurück");
            self.reset_to_root();
        }
        let root = Arc::make_mut(&mut self.root);
        resolve_level_mut(&mut root.items, &self.current)
    }

    /// Betritt eine Collection der aktuellen Ebene.
    pub fn enter_collection(&mut self, id: &BubbleId) -> Result<&BubbleItem, NavigationError> {
        let target = self.find_visible(id).ok_or(NavigationError::NotFound)?;
        if !target.is_collection() {
            return Err(NavigationError::NotCollection);
        }

        let mut next = self.current.clone();
        next.push(id.clone());
        let previous = std::mem::replace(&mut self.current, next);
        self.history.push(previous);

        self.current_collection().ok_or(NavigationError::NotFound)
    }

    /// Gibt `true` zurück, wenn ein Zurück-Schritt möglich ist.
    pub fn can_back(&self) -> bool {
        !self.history.is_empty()
    }

    /// Geht einen Schritt zurück. `false` bedeutet No-op (Historie leer).
    pub fn back(&mut self) -> bool {
        match self.history.pop() {
            Some(previous) => {
                self.current = previous;
                true
            }
            None => false,
        }
    }

    /// Springt auf die Root-Ebene und leert die Historie.
    pub fn reset_to_root(&mut self) {
        self.history.clear();
        self.current.clear();
    }

    /// Tiefe der Zurück-Historie.
    pub fn history_depth(&self) -> usize {
        self.history.len()
    }
}

impl Default for NavigationState {
    fn default() -> Self {
        Self::new(BubbleRoot::new())
    }
}

fn resolve_level<'a>(items: &'a [BubbleItem], path: &[BubbleId]) -> Option<&'a [BubbleItem]> {
    let Some((head, rest)) = path.split_first() else {
        return Some(items);
    };
    let node = items
        .iter()
        .find(|item| &item.id == head && item.is_collection())?;
    resolve_level(node.children.as_deref().unwrap_or_default(), rest)
}

/// Setzt voraus, dass `path` vorher per `resolve_level` geprüft wurde;
/// bei einem Bruch endet der Abstieg auf der letzten gültigen Ebene.
fn resolve_level_mut<'a>(
    items: &'a mut Vec<BubbleItem>,
    path: &[BubbleId],
) -> &'a mut Vec<BubbleItem> {
    let Some((head, rest)) = path.split_first() else {
        return items;
    };
    match items
        .iter()
        .position(|item| &item.id == head && item.is_collection())
    {
        Some(index) => {
            resolve_level_mut(items[index].children.get_or_insert_with(Vec::new), rest)
        }
        None => items,
    }
}
