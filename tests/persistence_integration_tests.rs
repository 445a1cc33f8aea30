/// Persistence integration tests
///
/// Catalog snapshots written to disk and reopened
/// Run with: cargo test --test persistence_integration_tests
use tempfile::TempDir;
use vocabdb::{Catalog, NamedEntity, Profile, SnapshotFormat, StoreConfig, StoreError};

fn seed(catalog: &Catalog) {
    for (name, description) in [("Databases", Some("Storage systems")), ("Networks", None)] {
        catalog
            .interests()
            .define(NamedEntity::new(name, description))
            .unwrap();
    }
    catalog
        .favorites()
        .define(NamedEntity::new("Coffee", Some("Hot")))
        .unwrap();

    let mut profile = Profile::new("ann")
        .with_interests(["Networks", "Databases"])
        .with_favorites(["Coffee"]);
    profile.first_name = Some("Ann".into());
    catalog.profiles().define(profile).unwrap();
}

fn reopen_preserves_contents(format: SnapshotFormat) {
    let dir = TempDir::new().unwrap();
    let config = StoreConfig::new()
        .data_path(dir.path().join("catalog.snapshot"))
        .format(format);

    let catalog = Catalog::open(config.clone()).unwrap();
    assert_eq!(catalog.interests().count().unwrap(), 0);
    seed(&catalog);
    catalog.save().unwrap();
    let before = catalog.snapshot().unwrap();

    let reopened = Catalog::open(config).unwrap();
    let after = reopened.snapshot().unwrap();

    assert_eq!(after.interests, before.interests);
    assert_eq!(after.favorites, before.favorites);
    assert_eq!(after.profiles, before.profiles);

    // references still resolve after reopening
    let ids = reopened.profiles().interest_ids("ann").unwrap();
    assert_eq!(
        reopened.interests().find_names(ids).unwrap(),
        vec!["Networks", "Databases"]
    );
}

#[test]
fn test_reopen_json() {
    reopen_preserves_contents(SnapshotFormat::Json);
}

#[test]
fn test_reopen_msgpack() {
    reopen_preserves_contents(SnapshotFormat::MessagePack);
}

#[test]
fn test_save_without_path_is_noop() {
    let catalog = Catalog::in_memory(StoreConfig::default()).unwrap();
    seed(&catalog);
    catalog.save().unwrap();
}

#[test]
fn test_reset_then_save_persists_empty_catalog() {
    let dir = TempDir::new().unwrap();
    let config = StoreConfig::new().data_path(dir.path().join("catalog.json"));

    let catalog = Catalog::open(config.clone()).unwrap();
    seed(&catalog);
    catalog.save().unwrap();

    assert_eq!(catalog.remove_all_entities().unwrap(), 4);
    catalog.save().unwrap();

    let reopened = Catalog::open(config).unwrap();
    assert!(reopened.interests().find_all().unwrap().is_empty());
    assert!(reopened.profiles().find_all().unwrap().is_empty());
}

#[test]
fn test_corrupt_snapshot_reports_serialization_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("catalog.json");
    std::fs::write(&path, b"{ not json").unwrap();

    let result = Catalog::open(StoreConfig::new().data_path(&path));
    assert!(matches!(result, Err(StoreError::Serialization(_))));
}
