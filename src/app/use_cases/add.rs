//! Use-Case: Datei-, Ordner- und Kommando-Bubbles auf der aktuellen Ebene anlegen.

use crate::core::{BubbleItem, BubbleItemType, NavigationState};
use crate::shared::{codes, CatalogError, CatalogResult};
use std::path::Path;

/// Ergebnis eines Add-Aufrufs
#[derive(Debug, Clone, PartialEq)]
pub enum AddOutcome {
    /// Neue Bubble wurde angehängt
    Added(BubbleItem),
    /// Gleiches Ziel existierte bereits auf dieser Ebene
    Existing(BubbleItem),
}

impl AddOutcome {
    /// Betroffene Bubble (neu oder bestehend).
    pub fn item(&self) -> &BubbleItem {
        match self {
            AddOutcome::Added(item) | AddOutcome::Existing(item) => item,
        }
    }

    /// Gibt `true` zurück, wenn der Katalog verändert wurde.
    pub fn is_new(&self) -> bool {
        matches!(self, AddOutcome::Added(_))
    }

    /// Entnimmt die Bubble.
    pub fn into_item(self) -> BubbleItem {
        match self {
            AddOutcome::Added(item) | AddOutcome::Existing(item) => item,
        }
    }
}

/// Fügt eine Datei-Bubble hinzu (Datei muss existieren).
pub fn add_file(
    nav: &mut NavigationState,
    path: &str,
    display_name: Option<&str>,
) -> CatalogResult<AddOutcome> {
    ensure_path_given(path)?;
    if !Path::new(path).is_file() {
        return Err(CatalogError::not_found(
            codes::BUBBLE_FILE_NOT_FOUND,
            format!("Datei nicht gefunden: {path}"),
        ));
    }
    Ok(add_unique(nav, BubbleItemType::File, path, || {
        BubbleItem::with_path(BubbleItemType::File, path, name_or_default(display_name, path))
    }))
}

/// Fügt eine Ordner-Bubble hinzu (Ordner muss existieren).
pub fn add_folder(
    nav: &mut NavigationState,
    path: &str,
    display_name: Option<&str>,
) -> CatalogResult<AddOutcome> {
    ensure_path_given(path)?;
    if !Path::new(path).is_dir() {
        return Err(CatalogError::not_found(
            codes::BUBBLE_DIR_NOT_FOUND,
            format!("Ordner nicht gefunden: {path}"),
        ));
    }
    Ok(add_unique(nav, BubbleItemType::Folder, path, || {
        BubbleItem::with_path(BubbleItemType::Folder, path, name_or_default(display_name, path))
    }))
}

/// Fügt eine Kommando-Bubble hinzu. Das Kommando wird nicht geprüft.
pub fn add_command(
    nav: &mut NavigationState,
    command: &str,
    args: Option<&str>,
    display_name: Option<&str>,
) -> CatalogResult<AddOutcome> {
    if command.trim().is_empty() {
        return Err(CatalogError::validation(
            codes::BUBBLE_COMMAND_EMPTY,
            "Kommando ist leer",
        ));
    }
    let args = args.filter(|a| !a.trim().is_empty());
    Ok(add_unique(nav, BubbleItemType::Command, command, || {
        BubbleItem::command(name_or_default(display_name, command), command, args)
    }))
}

fn ensure_path_given(path: &str) -> CatalogResult<()> {
    if path.trim().is_empty() {
        return Err(CatalogError::validation(codes::BUBBLE_PATH_EMPTY, "Pfad ist leer"));
    }
    Ok(())
}

/// Dedup auf der aktuellen Ebene über (Art, Pfad), Pfad case-insensitive.
fn add_unique(
    nav: &mut NavigationState,
    kind: BubbleItemType,
    path: &str,
    create: impl FnOnce() -> BubbleItem,
) -> AddOutcome {
    if let Some(existing) = nav
        .visible_items()
        .iter()
        .find(|item| item.matches_target(kind, path))
    {
        log::debug!("Bubble existiert bereits: {} ({})", existing.id, path);
        return AddOutcome::Existing(existing.clone());
    }

    let item = create();
    nav.visible_items_mut().push(item.clone());
    AddOutcome::Added(item)
}

fn name_or_default(display_name: Option<&str>, path: &str) -> String {
    match display_name.map(str::trim).filter(|name| !name.is_empty()) {
        Some(name) => name.to_string(),
        None => last_segment(path).to_string(),
    }
}

/// Letztes Pfadsegment, Trenner `/` und `\` unabhängig von der Plattform.
pub fn last_segment(path: &str) -> &str {
    let trimmed = path.trim_end_matches(['/', '\\']);
    match trimmed.rsplit(['/', '\\']).next() {
        Some(segment) if !segment.is_empty() => segment,
        _ => path,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_segment_beachtet_beide_trenner() {
        assert_eq!(last_segment(r"C:\Projects\"), "Projects");
        assert_eq!(last_segment("/home/anna/notes.md"), "notes.md");
        assert_eq!(last_segment("wt.exe"), "wt.exe");
        assert_eq!(last_segment("/"), "/");
    }

    #[test]
    fn test_leerer_pfad_ist_validierungsfehler() {
        let mut nav = NavigationState::default();
        let error = add_file(&mut nav, "   ", None).unwrap_err();
        assert_eq!(error.code, codes::BUBBLE_PATH_EMPTY);
        assert!(nav.visible_items().is_empty());
    }

    #[test]
    fn test_ordner_wird_nur_einmal_angelegt() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().to_string_lossy().into_owned();
        let mut nav = NavigationState::default();

        let first = add_folder(&mut nav, &path, None).expect("anlegen");
        assert!(first.is_new());

        let again = add_folder(&mut nav, &path, Some("anders")).expect("erneut");
        assert!(!again.is_new());
        assert_eq!(again.item().id, first.item().id);
        assert_eq!(nav.visible_items().len(), 1);
    }

    #[test]
    fn test_kommando_dedup_und_anzeigename() {
        let mut nav = NavigationState::default();
        let added = add_command(&mut nav, "/usr/bin/htop", Some(""), None).expect("anlegen");
        assert_eq!(added.item().display_name, "htop");
        assert!(added.item().metadata_value(crate::core::METADATA_ARGS).is_none());

        let again = add_command(&mut nav, "/USR/BIN/HTOP", None, None).expect("dedup");
        assert!(!again.is_new());
        assert_eq!(nav.visible_items().len(), 1);
    }
}
