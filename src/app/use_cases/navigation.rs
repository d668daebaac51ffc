//! Use-Case: Navigation zwischen Collections.

use crate::core::{BubbleId, BubbleItem, NavigationError, NavigationState};
use crate::shared::{codes, CatalogError, CatalogResult};

/// Betritt die Collection `id` der aktuellen Ebene.
pub fn enter_collection(nav: &mut NavigationState, id: &BubbleId) -> CatalogResult<BubbleItem> {
    match nav.enter_collection(id) {
        Ok(collection) => Ok(collection.clone()),
        Err(NavigationError::NotFound) => Err(CatalogError::not_found(
            codes::NAV_NOT_FOUND,
            format!("Ziel nicht gefunden: {id}"),
        )),
        Err(NavigationError::NotCollection) => Err(CatalogError::type_mismatch(
            codes::NAV_NOT_COLLECTION,
            format!("Ziel ist keine Collection: {id}"),
        )),
    }
}

/// Einen Schritt zurück; `false` auf Root-Ebene (kein Fehler).
pub fn back(nav: &mut NavigationState) -> bool {
    nav.back()
}

/// Zurück auf die Root-Ebene.
pub fn reset_to_root(nav: &mut NavigationState) {
    nav.reset_to_root();
}
