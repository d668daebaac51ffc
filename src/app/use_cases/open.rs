//! Use-Case: Bubble öffnen (Collection betreten oder Ziel starten).

use super::navigation;
use crate::app::launcher::Launcher;
use crate::core::{BubbleId, BubbleItem, NavigationState};
use crate::shared::{codes, CatalogError, CatalogResult};

/// Was beim Öffnen passiert ist
#[derive(Debug, Clone, PartialEq)]
pub enum OpenOutcome {
    /// Collection wurde betreten
    Entered(BubbleItem),
    /// Ziel wurde an den Launcher übergeben
    Launched(BubbleItem),
}

/// Öffnet die Bubble `id` der aktuellen Ebene.
///
/// Collections werden nie an den Launcher gereicht.
pub fn open_bubble(
    nav: &mut NavigationState,
    id: &BubbleId,
    launcher: &dyn Launcher,
) -> CatalogResult<OpenOutcome> {
    let Some(item) = nav.find_visible(id).cloned() else {
        return Err(CatalogError::not_found(
            codes::BUBBLE_NOT_FOUND,
            format!("Bubble nicht gefunden: {id}"),
        ));
    };

    if item.is_collection() {
        return navigation::enter_collection(nav, id).map(OpenOutcome::Entered);
    }

    launcher.launch(&item)?;
    Ok(OpenOutcome::Launched(item))
}
