use std::path::Path;

use exhibitor_catalog::{Field, Record};
use exhibitor_import::*;
use tempfile::TempDir;

fn touch(dir: &Path, name: &str) {
    std::fs::write(dir.join(name), b"").unwrap();
}

fn collection() -> Collection {
    let mut collection = Collection::default();
    for id in ["foo", "bar", "baz"] {
        collection
            .insert(Record::new(id).with(Field::Title, id), None, false)
            .unwrap();
    }
    collection
}

#[test]
fn images_attach_by_trailing_identifier() {
    let dir = TempDir::new().unwrap();
    touch(dir.path(), "test_foo.jpg");
    touch(dir.path(), "some_long_name_bar.PNG");
    touch(dir.path(), "README.txt");
    touch(dir.path(), "cover.jpeg");

    let mut collection = collection();
    let stats = attach_images(&mut collection, dir.path(), true).unwrap();

    assert_eq!(stats, ImageStats { attached: 2, unmatched: 0, skipped: 1 });
    assert_eq!(collection.get("foo").unwrap().get(Field::Image), Some("test_foo.jpg"));
    assert_eq!(
        collection.get("bar").unwrap().get(Field::Image),
        Some("some_long_name_bar.PNG")
    );
    assert!(collection.get("baz").unwrap().get(Field::Image).is_none());
}

#[test]
fn unknown_image_identifier() {
    let dir = TempDir::new().unwrap();
    touch(dir.path(), "test_qux.jpg");

    let mut strict = collection();
    assert!(matches!(
        attach_images(&mut strict, dir.path(), true),
        Err(ExhibitError::ImageMismatch { ref id, .. }) if id == "qux"
    ));

    let mut lenient = collection();
    let stats = attach_images(&mut lenient, dir.path(), false).unwrap();
    assert_eq!(stats.unmatched, 1);
}

#[test]
fn alt_text_attaches_and_checks_image() {
    let dir = TempDir::new().unwrap();
    touch(dir.path(), "test_foo.jpg");
    touch(dir.path(), "test_bar.jpg");
    let alt = dir.path().join("alt.csv");
    std::fs::write(
        &alt,
        "id,image,alt\n\
         foo,test_foo.jpg,A  glazed brick   with a lion\n\
         bar,wrong.jpg,A bowl\n",
    )
    .unwrap();

    let mut collection = collection();
    attach_images(&mut collection, dir.path(), true).unwrap();
    let stats = attach_alt_text(&mut collection, &alt, AltTextOptions::default()).unwrap();

    assert_eq!(stats, AltTextStats { attached: 1, mismatched: 1, missing_image: 0 });
    assert_eq!(
        collection.get("foo").unwrap().get(Field::Alt),
        Some("A glazed brick with a lion")
    );
    assert!(collection.get("bar").unwrap().get(Field::Alt).is_none());

    let strict = AltTextOptions {
        fail_on_image_missing: false,
        fail_on_mismatch: true,
    };
    assert!(matches!(
        attach_alt_text(&mut collection, &alt, strict),
        Err(ExhibitError::AltTextMismatch { ref id, .. }) if id == "bar"
    ));
}

#[test]
fn alt_text_for_record_without_image() {
    let dir = TempDir::new().unwrap();
    let alt = dir.path().join("alt.csv");
    std::fs::write(&alt, "id,alt\nbaz,A crate\n").unwrap();

    let mut collection = collection();
    let stats = attach_alt_text(&mut collection, &alt, AltTextOptions::default()).unwrap();
    assert_eq!(stats.missing_image, 1);

    let strict = AltTextOptions {
        fail_on_image_missing: true,
        fail_on_mismatch: false,
    };
    assert!(matches!(
        attach_alt_text(&mut collection, &alt, strict),
        Err(ExhibitError::MissingImage { .. })
    ));
}

#[test]
fn alt_text_requires_columns() {
    let dir = TempDir::new().unwrap();
    let alt = dir.path().join("alt.csv");
    std::fs::write(&alt, "id,description\nfoo,A brick\n").unwrap();

    let mut collection = collection();
    assert!(matches!(
        attach_alt_text(&mut collection, &alt, AltTextOptions::default()),
        Err(ExhibitError::MissingColumn { column: "alt", .. })
    ));
}
