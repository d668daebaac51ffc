//! Use-Case: Bubble von der aktuellen Ebene entfernen.

use crate::core::{BubbleId, BubbleItem, NavigationState};
use crate::shared::{codes, CatalogError, CatalogResult};

/// Entfernt die Bubble `id` von der aktuellen Ebene (nicht rekursiv).
pub fn remove_bubble(nav: &mut NavigationState, id: &BubbleId) -> CatalogResult<BubbleItem> {
    if id.is_blank() {
        return Err(CatalogError::validation(codes::BUBBLE_ID_EMPTY, "ID ist leer"));
    }
    let Some(index) = nav.visible_items().iter().position(|item| &item.id == id) else {
        return Err(CatalogError::not_found(
            codes::BUBBLE_NOT_FOUND,
            format!("Bubble nicht gefunden: {id}"),
        ));
    };
    Ok(nav.visible_items_mut().remove(index))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{BubbleItemType, BubbleRoot};

    #[test]
    fn test_remove_sucht_nur_auf_aktueller_ebene() {
        let nested = BubbleItem::with_path(BubbleItemType::File, "/x", "x".into());
        let nested_id = nested.id.clone();
        let group = BubbleItem::collection("g".into(), vec![nested]);
        let mut nav = NavigationState::new(BubbleRoot {
            version: 1,
            items: vec![group],
        });

        let error = remove_bubble(&mut nav, &nested_id).unwrap_err();
        assert_eq!(error.code, codes::BUBBLE_NOT_FOUND);
        assert_eq!(nav.root().total_count(), 2);

        let blank = remove_bubble(&mut nav, &BubbleId::from(" ")).unwrap_err();
        assert_eq!(blank.code, codes::BUBBLE_ID_EMPTY);
    }
}
