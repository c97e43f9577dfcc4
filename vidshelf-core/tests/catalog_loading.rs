//! Loading catalogs from disk.

mod support;

use support::{CATALOG_JSON, write_temp};
use vidshelf_core::prelude::*;

#[test]
fn loads_catalog_file_in_order() {
    let file = write_temp(CATALOG_JSON);

    let catalog = Catalog::load(file.path()).expect("catalog loads");

    let titles: Vec<&str> = catalog.iter().map(|item| item.title.as_str()).collect();
    assert_eq!(titles, vec!["Coastal Cliffs", "Night Market"]);

    let first = catalog
        .get(&MediaItemId::new("v1").expect("id"))
        .expect("v1 present");
    assert_eq!(first.price.cents(), 499);
    assert_eq!(first.price.to_string(), "$4.99");
    assert_eq!(first.source.poster.as_str(), "https://cdn.example.com/v1.jpg");
    assert_eq!(catalog.categories().len(), 2);
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let err = Catalog::load(&dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, CoreError::Io(_)));
}

#[test]
fn malformed_json_is_a_serialization_error() {
    let file = write_temp("{ not json");
    let err = Catalog::load(file.path()).unwrap_err();
    assert!(matches!(err, CoreError::Serialization(_)));
}

#[test]
fn negative_price_is_rejected() {
    let raw = CATALOG_JSON.replace("4.99", "-1.0");
    let err = Catalog::from_json_str(&raw).unwrap_err();
    assert!(matches!(err, CoreError::Serialization(_)));
}

#[test]
fn duplicate_ids_on_disk_are_rejected() {
    let raw = CATALOG_JSON.replace("\"id\": \"v2\"", "\"id\": \"v1\"");
    let file = write_temp(&raw);
    let err = Catalog::load(file.path()).unwrap_err();
    assert!(matches!(err, CoreError::DuplicateItem(id) if id.as_str() == "v1"));
}
