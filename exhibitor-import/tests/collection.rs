use std::io::Write;

use exhibitor_catalog::{CatalogError, Crosswalk, Field, Record};
use exhibitor_import::*;
use serde_json::json;
use tempfile::TempDir;

fn brick_rows() -> (serde_json::Value, serde_json::Value) {
    (
        json!({"id": "2", "title": "Brick fragment", "inventory_num": "VA 17462"}),
        json!({"id": "2", "title": "Brick fragment", "inventory_num": "VA 17479"}),
    )
}

#[test]
fn duplicate_without_merge_is_a_collision() {
    let (a, b) = brick_rows();
    let mut collection = Collection::default();
    collection.insert(a, None, false).unwrap();

    match collection.insert(b, None, false) {
        Err(ExhibitError::Collision { id }) => assert_eq!(id, "2"),
        other => panic!("Expected collision, got {other:?}"),
    }
    assert_eq!(collection.len(), 1);
    assert_eq!(collection.get("2").unwrap().get(Field::InventoryNum), Some("VA 17462"));
}

#[test]
fn merge_joins_divergent_values() {
    let (a, b) = brick_rows();
    let mut collection = Collection::default();
    assert_eq!(collection.insert(a, None, true).unwrap(), InsertOutcome::Inserted("2".into()));
    assert_eq!(collection.insert(b, None, true).unwrap(), InsertOutcome::Merged("2".into()));

    assert_eq!(collection.len(), 1);
    let record = collection.get("2").unwrap();
    assert_eq!(record.id(), "2");
    assert_eq!(record.get(Field::Title), Some("Brick fragment"));
    assert_eq!(record.get(Field::InventoryNum), Some("VA 17462; VA 17479"));
}

#[test]
fn merge_uses_configured_delimiter() {
    let (a, b) = brick_rows();
    let mut collection = Collection::default().with_delimiter(" | ");
    collection.insert(a, None, true).unwrap();
    collection.insert(b, None, true).unwrap();
    assert_eq!(
        collection.get("2").unwrap().get(Field::InventoryNum),
        Some("VA 17462 | VA 17479")
    );
}

#[test]
fn explicit_identifier_retargets_a_record() {
    let original = Record::new("old").with(Field::Title, "Bowl");
    let mut collection = Collection::default();
    collection.insert(original.clone(), Some("new"), false).unwrap();

    assert!(collection.contains("new"));
    assert!(!collection.contains("old"));
    assert_eq!(collection.get("new").unwrap().get(Field::Title), Some("Bowl"));
    assert_eq!(original.id(), "old");
}

#[test]
fn adapter_faults_propagate() {
    let mut collection = Collection::default();
    assert!(matches!(
        collection.insert(json!(["not", "a", "row"]), None, false),
        Err(ExhibitError::Catalog(CatalogError::InvalidInput(_)))
    ));
    assert!(matches!(
        collection.insert(json!({"id": "1"}), Some("2"), false),
        Err(ExhibitError::Catalog(CatalogError::IdentifierConflict { .. }))
    ));
    assert!(collection.is_empty());
}

#[test]
fn title_lookup_follows_insertions_and_edits() {
    let mut collection = Collection::default();
    collection.insert(json!({"id": "1", "title": "Brick"}), None, false).unwrap();
    collection.insert(json!({"id": "2", "title": "Bowl"}), None, false).unwrap();
    assert_eq!(collection.lookup_by_title("Brick"), ["1"]);
    assert!(collection.lookup_by_title("Crate").is_empty());

    collection.insert(json!({"id": "3", "title": "Brick"}), None, false).unwrap();
    assert_eq!(collection.lookup_by_title("Brick"), ["1", "3"]);

    collection.get_mut("1").unwrap().set(Field::Title, Some("Crate".into()));
    assert_eq!(collection.lookup_by_title("Brick"), ["3"]);
    assert_eq!(collection.lookup_by_title("Crate"), ["1"]);
}

#[test]
fn incomplete_records_are_listed() {
    let mut collection = Collection::default();
    collection
        .insert(json!({"id": "1", "title": "Brick", "inventory_num": "VA 1"}), None, false)
        .unwrap();
    collection.insert(json!({"id": "2", "title": "Bowl"}), None, false).unwrap();

    let incomplete = collection.incomplete();
    assert_eq!(incomplete, vec![("2", vec![Field::InventoryNum])]);
}

#[test]
fn load_csv_through_crosswalk() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("objects.csv");
    let mut file = std::fs::File::create(&path).unwrap();
    writeln!(file, "Catalogue Check. #,Title,Inv. No.").unwrap();
    writeln!(file, "2,Brick fragment,VA 17462").unwrap();
    writeln!(file, "2,Brick fragment,VA 17479").unwrap();
    writeln!(file, "3,  Bowl   with bulls ,VA 100").unwrap();
    drop(file);

    let crosswalk = Crosswalk::from_pairs([
        ("Catalogue Check. #", Field::Id),
        ("Title", Field::Title),
        ("Inv. No.", Field::InventoryNum),
    ]);
    let mut collection = Collection::new(crosswalk);
    let rows = collection.load(&path, Format::Csv, true).unwrap();

    assert_eq!(rows, 3);
    assert_eq!(collection.ids().collect::<Vec<_>>(), ["2", "3"]);
    assert_eq!(
        collection.get("2").unwrap().get(Field::InventoryNum),
        Some("VA 17462; VA 17479")
    );
    assert_eq!(collection.get("3").unwrap().get(Field::Title), Some("Bowl with bulls"));
}

#[test]
fn unmapped_csv_column_is_rejected() {
    let csv = "Catalogue Check. #,Colour\n2,blue\n";
    let crosswalk = Crosswalk::from_pairs([("Catalogue Check. #", Field::Id)]);
    let mut collection = Collection::new(crosswalk);
    assert!(matches!(
        collection.load_reader(csv.as_bytes(), Format::Csv, false),
        Err(ExhibitError::Catalog(CatalogError::UnknownColumn(_)))
    ));
}

#[test]
fn csv_cannot_be_dumped() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("out.csv");
    let collection = Collection::default();

    assert!(matches!(
        collection.dump_to_path(&path, Format::Csv),
        Err(ExhibitError::UnsupportedFormat { .. })
    ));
    assert!(!path.exists());
}

#[test]
fn dump_is_sorted_pretty_and_complete() {
    let mut collection = Collection::default();
    collection.insert(json!({"id": "b", "title": "Mušhuššu"}), None, false).unwrap();
    collection.insert(json!({"id": "a", "title": "Bowl"}), None, false).unwrap();

    let mut out = Vec::new();
    collection.dump(&mut out, Format::Json).unwrap();
    let text = String::from_utf8(out).unwrap();

    assert!(text.contains("Mušhuššu"));
    assert!(text.ends_with("}\n"));
    assert!(text.contains("\n    \"a\": {\n        \"alt\": null,"));
    assert!(text.find("\"a\"").unwrap() < text.find("\"b\"").unwrap());

    let document: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(document["a"].as_object().unwrap().len(), Field::ALL.len());
    assert_eq!(document["a"]["id"], "a");
}

#[test]
fn dump_then_load_round_trips() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("objects.json");

    let mut collection = Collection::default();
    collection
        .insert(
            json!({
                "id": "45",
                "title": "Mušhuššu-dragon",
                "lender": "Vorderasiatisches Museum",
                "inventory_num": "VA 17462"
            }),
            None,
            false,
        )
        .unwrap();
    collection.insert(json!({"id": "7", "title": "Bowl"}), None, false).unwrap();
    collection.dump_to_path(&path, Format::Json).unwrap();

    let mut reloaded = Collection::default();
    assert_eq!(reloaded.load(&path, Format::Json, false).unwrap(), 2);
    for record in collection.iter() {
        assert_eq!(reloaded.get(record.id()), Some(record));
    }
}

#[test]
fn missing_source_is_an_io_error() {
    let dir = TempDir::new().unwrap();
    let mut collection = Collection::default();
    assert!(matches!(
        collection.load(&dir.path().join("absent.json"), Format::Json, false),
        Err(ExhibitError::Io { .. })
    ));
}

#[test]
fn rows_without_identifiers_get_fresh_uuids() {
    let mut collection = Collection::default();
    let row = json!({"title": "Brick fragment"});
    let first = collection.insert(row.clone(), None, false).unwrap();
    let second = collection.insert(row, None, false).unwrap();

    assert_ne!(first.id(), second.id());
    assert_eq!(collection.len(), 2);
    for outcome in [first, second] {
        let id = uuid::Uuid::parse_str(outcome.id()).unwrap();
        assert_eq!(id.get_version_num(), 4);
    }
}

#[test]
fn stored_identifier_survives_mutable_access() {
    let mut collection = Collection::default();
    collection.insert(Record::new("a").with(Field::Title, "Bowl"), None, false).unwrap();
    collection.get_mut("a").unwrap().set(Field::Id, Some("b".into()));
    assert_eq!(collection.get("a").unwrap().id(), "a");

    let mut out = Vec::new();
    collection.dump(&mut out, Format::Json).unwrap();
    let mut reloaded = Collection::default();
    reloaded.load_reader(out.as_slice(), Format::Json, false).unwrap();
    assert_eq!(reloaded.ids().collect::<Vec<_>>(), ["a"]);
}
