use orbit_bubble::app::use_cases::OpenOutcome;
use orbit_bubble::core::{BubbleItem, BubbleItemType, BubbleRoot};
use orbit_bubble::shared::{codes, CatalogError, CatalogResult, ErrorKind};
use orbit_bubble::store::{BubbleStore, JsonBubbleStore, MemoryBubbleStore};
use orbit_bubble::{BubbleCatalogService, Launcher};
use std::cell::RefCell;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

fn service(store: Arc<MemoryBubbleStore>) -> BubbleCatalogService {
    let mut catalog = BubbleCatalogService::new(store);
    catalog.load().expect("Laden sollte funktionieren");
    catalog
}

fn temp_file(dir: &tempfile::TempDir, name: &str) -> String {
    let path = dir.path().join(name);
    std::fs::write(&path, "inhalt").expect("Datei anlegen");
    path.to_string_lossy().into_owned()
}

#[derive(Default)]
struct RecordingLauncher {
    launched: RefCell<Vec<String>>,
}

impl Launcher for RecordingLauncher {
    fn launch(&self, item: &BubbleItem) -> CatalogResult<()> {
        if item.is_collection() {
            return Err(CatalogError::type_mismatch(
                codes::LAUNCH_COLLECTION,
                "Collection kann nicht gestartet werden",
            ));
        }
        self.launched.borrow_mut().push(item.display_name.clone());
        Ok(())
    }
}

#[test]
fn test_add_burst_ergibt_genau_einen_schreibvorgang() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = Arc::new(MemoryBubbleStore::new());
    let mut catalog = service(store.clone());

    for i in 0..5 {
        let path = temp_file(&dir, &format!("datei_{i}.txt"));
        catalog.add_file(&path, None).expect("hinzufügen");
        thread::sleep(Duration::from_millis(20));
    }
    assert!(catalog.is_dirty());
    assert_eq!(store.save_count(), 0);

    thread::sleep(Duration::from_millis(800));

    assert_eq!(store.save_count(), 1);
    assert!(!catalog.is_dirty());
    let saved = store.saved().expect("gespeichert");
    assert_eq!(saved.items.len(), 5);
}

#[test]
fn test_add_folder_ist_idempotent() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().to_string_lossy().into_owned();
    let mut catalog = service(Arc::new(MemoryBubbleStore::new()));

    let first = catalog.add_folder(&path, Some("Projekte")).expect("erstes Mal");
    let second = catalog.add_folder(&path, None).expect("zweites Mal");

    assert_eq!(first.id, second.id);
    assert_eq!(second.display_name, "Projekte");
    assert_eq!(catalog.visible_items().len(), 1);
    assert_eq!(catalog.visible_items()[0].kind, BubbleItemType::Folder);
}

#[test]
fn test_fehlender_pfad_veraendert_nichts() {
    let dir = tempfile::tempdir().expect("tempdir");
    let missing = dir.path().join("gibt_es_nicht.txt");
    let store = Arc::new(MemoryBubbleStore::new());
    let mut catalog = service(store.clone());

    let err = catalog
        .add_file(&missing.to_string_lossy(), None)
        .expect_err("fehlende Datei");
    assert_eq!(err.code, codes::BUBBLE_FILE_NOT_FOUND);
    assert_eq!(err.kind, ErrorKind::NotFound);

    let err = catalog.add_file("   ", None).expect_err("leerer Pfad");
    assert_eq!(err.code, codes::BUBBLE_PATH_EMPTY);
    assert_eq!(err.kind, ErrorKind::Validation);

    let err = catalog
        .add_folder(&missing.to_string_lossy(), None)
        .expect_err("fehlender Ordner");
    assert_eq!(err.code, codes::BUBBLE_DIR_NOT_FOUND);

    assert!(catalog.visible_items().is_empty());
    assert!(!catalog.is_dirty());
}

#[test]
fn test_merge_zweier_dateien_erzeugt_collection_an_zielposition() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut catalog = service(Arc::new(MemoryBubbleStore::new()));
    let a = catalog.add_file(&temp_file(&dir, "a.txt"), None).expect("a");
    let b = catalog.add_file(&temp_file(&dir, "b.txt"), None).expect("b");
    let c = catalog.add_file(&temp_file(&dir, "c.txt"), None).expect("c");

    let merged = catalog.merge_into_collection(&a.id, &c.id).expect("merge");

    assert_eq!(merged.kind, BubbleItemType::Collection);
    assert_eq!(merged.display_name, "c.txt + a.txt");
    let children = merged.children.as_ref().expect("Kinder");
    assert_eq!(children[0].id, c.id);
    assert_eq!(children[1].id, a.id);

    let ids: Vec<_> = catalog.visible_items().iter().map(|i| i.id.clone()).collect();
    assert_eq!(ids, vec![b.id.clone(), merged.id.clone()]);
    assert_eq!(catalog.state().root().total_count(), 4);
}

#[test]
fn test_merge_in_bestehende_collection_haengt_an() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut catalog = service(Arc::new(MemoryBubbleStore::new()));
    let a = catalog.add_file(&temp_file(&dir, "a.txt"), None).expect("a");
    let b = catalog.add_file(&temp_file(&dir, "b.txt"), None).expect("b");
    let group = catalog.merge_into_collection(&a.id, &b.id).expect("merge");
    let c = catalog.add_file(&temp_file(&dir, "c.txt"), None).expect("c");

    let updated = catalog.merge_into_collection(&c.id, &group.id).expect("merge");

    assert_eq!(updated.id, group.id);
    let names: Vec<_> = updated
        .children
        .as_ref()
        .expect("Kinder")
        .iter()
        .map(|i| i.display_name.as_str())
        .collect();
    assert_eq!(names, vec!["b.txt", "a.txt", "c.txt"]);
    assert_eq!(catalog.visible_items().len(), 1);
}

#[test]
fn test_merge_fehlerfaelle_lassen_katalog_unveraendert() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut catalog = service(Arc::new(MemoryBubbleStore::new()));
    let a = catalog.add_file(&temp_file(&dir, "a.txt"), None).expect("a");
    let before = catalog.state().root().clone();

    let err = catalog
        .merge_into_collection(&a.id, &a.id)
        .expect_err("gleiche ID");
    assert_eq!(err.code, codes::MERGE_SAME_ID);

    let unknown = orbit_bubble::BubbleId::generate();
    let err = catalog
        .merge_into_collection(&a.id, &unknown)
        .expect_err("unbekanntes Ziel");
    assert_eq!(err.code, codes::MERGE_NOT_FOUND);

    assert_eq!(catalog.state().root(), &before);
}

#[test]
fn test_verschachtelter_baum_uebersteht_speichern_und_laden() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("daten").join("bubbles.json");
    let store = Arc::new(JsonBubbleStore::new(path.clone()));

    let leaf = BubbleItem::command("Build".into(), "cargo", Some("build --release"));
    let level3 = BubbleItem::collection("Ebene 3".into(), vec![leaf]);
    let level2 = BubbleItem::collection("Ebene 2".into(), vec![level3]);
    let level1 = BubbleItem::collection(
        "Ebene 1".into(),
        vec![
            level2,
            BubbleItem::with_path(BubbleItemType::Folder, "/tmp", "Temp".into()),
        ],
    );
    let root = BubbleRoot {
        version: 1,
        items: vec![level1],
    };

    store.save(&root).expect("speichern");
    let loaded = store.load().expect("laden");

    assert_eq!(loaded, root);
    assert_eq!(loaded.total_count(), 5);
    assert!(path.exists());
}

#[test]
fn test_fehlgeschlagenes_laden_behaelt_zustand() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("bubbles.json");
    let mut catalog = BubbleCatalogService::new(Arc::new(JsonBubbleStore::new(path.clone())));
    catalog.load().expect("fehlende Datei ist leer");
    let a = catalog.add_file(&temp_file(&dir, "a.txt"), None).expect("a");
    catalog.save_now().expect("speichern");

    std::fs::write(&path, "{ kaputt").expect("überschreiben");
    let err = catalog.load().expect_err("kaputtes JSON");

    assert_eq!(err.code, codes::STORE_JSON_PARSE);
    assert_eq!(catalog.visible_items().len(), 1);
    assert_eq!(catalog.visible_items()[0].id, a.id);
    catalog.shutdown();
}

#[test]
fn test_navigation_und_oeffnen() {
    let leaf = BubbleItem::command("Editor".into(), "vim", None);
    let inner = BubbleItem::collection("Innen".into(), vec![leaf.clone()]);
    let outer = BubbleItem::collection("Außen".into(), vec![inner.clone()]);
    let root = BubbleRoot {
        version: 1,
        items: vec![outer.clone()],
    };
    let mut catalog = service(Arc::new(MemoryBubbleStore::with_root(root)));
    let launcher = RecordingLauncher::default();

    assert!(!catalog.back(), "Zurück auf Root-Ebene ist ein No-op");

    let outcome = catalog.open(&outer.id, &launcher).expect("betreten");
    assert!(matches!(outcome, OpenOutcome::Entered(ref item) if item.id == outer.id));
    catalog.open(&inner.id, &launcher).expect("betreten");
    assert_eq!(catalog.state().history_depth(), 2);

    let outcome = catalog.open(&leaf.id, &launcher).expect("starten");
    assert!(matches!(outcome, OpenOutcome::Launched(_)));
    assert_eq!(launcher.launched.borrow().as_slice(), ["Editor"]);

    assert!(catalog.back());
    assert_eq!(catalog.visible_items()[0].id, inner.id);
    catalog.reset_to_root();
    assert_eq!(catalog.visible_items()[0].id, outer.id);
    assert!(!catalog.state().can_back());

    let err = catalog.enter_collection(&leaf.id).expect_err("nicht sichtbar");
    assert_eq!(err.code, codes::NAV_NOT_FOUND);
}

#[test]
fn test_entfernen_unbekannter_id_ist_fehler() {
    let mut catalog = service(Arc::new(MemoryBubbleStore::new()));
    let err = catalog
        .remove(&orbit_bubble::BubbleId::generate())
        .expect_err("unbekannt");
    assert_eq!(err.code, codes::BUBBLE_NOT_FOUND);
    assert!(!catalog.is_dirty());
}

#[test]
fn test_mutation_in_collection_aendert_nur_aktuelle_ebene() {
    let dir = tempfile::tempdir().expect("tempdir");
    let group = BubbleItem::collection("Gruppe".into(), Vec::new());
    let root = BubbleRoot {
        version: 1,
        items: vec![group.clone()],
    };
    let store = Arc::new(MemoryBubbleStore::with_root(root));
    let mut catalog = service(store.clone());

    catalog.enter_collection(&group.id).expect("betreten");
    let added = catalog.add_file(&temp_file(&dir, "x.txt"), None).expect("x");
    catalog.save_now().expect("speichern");

    let saved = store.saved().expect("gespeichert");
    assert_eq!(saved.items.len(), 1);
    let children = saved.items[0].children.as_ref().expect("Kinder");
    assert_eq!(children[0].id, added.id);
    catalog.shutdown();
}
