//! Use-Case: Bubble per Drag & Drop mit einer anderen zusammenführen.

use crate::core::{BubbleId, BubbleItem, NavigationState};
use crate::shared::{codes, CatalogError, CatalogResult};

/// Führt `source` in `target` zusammen (beide auf der aktuellen Ebene).
///
/// - Ziel ist Collection: `source` wird als letztes Kind angehängt, Ziel bleibt
///   an seiner Position.
/// - Sonst: neue Collection `"<target> + <source>"` mit Kindern
///   `[target, source]` an der früheren Position des Ziels.
///
/// Rückgabe ist die resultierende Collection.
pub fn merge_into_collection(
    nav: &mut NavigationState,
    source_id: &BubbleId,
    target_id: &BubbleId,
) -> CatalogResult<BubbleItem> {
    if source_id == target_id {
        return Err(CatalogError::validation(
            codes::MERGE_SAME_ID,
            "Bubble kann nicht mit sich selbst zusammengeführt werden",
        ));
    }

    let visible = nav.visible_items();
    let source_index = visible.iter().position(|item| &item.id == source_id);
    let target_index = visible.iter().position(|item| &item.id == target_id);
    let (Some(source_index), Some(target_index)) = (source_index, target_index) else {
        return Err(CatalogError::not_found(
            codes::MERGE_NOT_FOUND,
            format!("Quelle {source_id} oder Ziel {target_id} nicht auf der aktuellen Ebene"),
        ));
    };

    let list = nav.visible_items_mut();
    let source = list.remove(source_index);
    // Ziel rückt eine Position vor, wenn die Quelle davor lag
    let target_index = if target_index > source_index {
        target_index - 1
    } else {
        target_index
    };

    if list[target_index].is_collection() {
        let target = &mut list[target_index];
        log::info!(
            "Bubble {} in bestehende Collection {} verschoben",
            source.id,
            target.id
        );
        target.children.get_or_insert_with(Vec::new).push(source);
        return Ok(target.clone());
    }

    let target = list.remove(target_index);
    let collection = BubbleItem::collection(
        format!("{} + {}", target.display_name, source.display_name),
        vec![target, source],
    );
    log::info!(
        "Neue Collection {} aus {} Bubbles erstellt",
        collection.id,
        collection.descendant_count()
    );
    let index = target_index.min(list.len());
    list.insert(index, collection.clone());
    Ok(collection)
}
