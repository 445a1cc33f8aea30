/// Named collection tests
///
/// Definition, uniqueness and id/name resolution through the public API
/// Run with: cargo test --test named_collection_tests
use vocabdb::{
    Catalog, DefineGuard, DocId, NamedCollection, NamedEntity, Selector, StoreConfig, StoreError,
};

fn interests() -> NamedCollection {
    NamedCollection::in_memory("Interests", DefineGuard::UniqueIndex).unwrap()
}

#[test]
fn test_databases_scenario() {
    let interests = interests();
    let i1 = interests
        .define(NamedEntity::new("Databases", Some("Storage systems")))
        .unwrap();

    assert_eq!(interests.find_name(i1).unwrap(), "Databases");
    assert_eq!(interests.find_id("Databases").unwrap(), i1);
    interests.assert_names(["Databases"]).unwrap();

    let err = interests.assert_names(["Databases", "Networks"]).unwrap_err();
    assert!(matches!(
        err,
        StoreError::NotFound { ref selector, .. } if selector.contains("Networks")
    ));
}

#[test]
fn test_second_define_with_same_name_fails() {
    let interests = interests();
    interests.define(NamedEntity::new("Rust", None::<String>)).unwrap();

    let err = interests
        .define(NamedEntity::new("Rust", Some("again")))
        .unwrap_err();
    assert!(matches!(
        err,
        StoreError::DuplicateName { ref collection, ref name }
            if collection == "Interests" && name == "Rust"
    ));
    assert_eq!(
        interests
            .find(&Selector::field("name", "Rust"))
            .unwrap()
            .count(),
        1
    );
}

#[test]
fn test_names_are_case_sensitive() {
    let interests = interests();
    interests.define(NamedEntity::new("rust", None::<String>)).unwrap();
    interests.define(NamedEntity::new("Rust", None::<String>)).unwrap();
    assert_eq!(interests.count().unwrap(), 2);
    assert!(interests.find_id("RUST").unwrap_err().is_not_found());
}

#[test]
fn test_absence_and_malformed_ids() {
    let interests = interests();
    assert!(interests.find_id("does-not-exist").unwrap_err().is_not_found());
    assert!(interests.find_name(DocId::generate()).unwrap_err().is_not_found());
    assert!(matches!(
        interests.find_name("definitely not an id").unwrap_err(),
        StoreError::InvalidIdentifier(_)
    ));
    let id = interests
        .define(NamedEntity::new("Databases", None::<String>))
        .unwrap();
    assert!(matches!(
        interests.find_name(format!("  {}  ", id)).unwrap_err(),
        StoreError::InvalidIdentifier(_)
    ));
    assert!(matches!(
        interests.assert_defined("12345").unwrap_err(),
        StoreError::InvalidIdentifier(_)
    ));
}

#[test]
fn test_find_ids_defaults_to_empty() {
    let interests = interests();
    let none: Option<&[String]> = None;
    assert_eq!(interests.find_ids(none).unwrap(), Vec::<DocId>::new());
    let empty: Vec<String> = Vec::new();
    assert_eq!(interests.find_ids(Some(empty.as_slice())).unwrap(), Vec::<DocId>::new());
}

#[test]
fn test_bulk_resolution_keeps_input_order() {
    let interests = interests();
    let names = ["Compilers", "Databases", "Networks"];
    let ids: Vec<DocId> = names
        .iter()
        .map(|n| interests.define(NamedEntity::new(*n, None::<String>)).unwrap())
        .collect();

    let reversed: Vec<DocId> = ids.iter().rev().copied().collect();
    assert_eq!(
        interests.find_names(&reversed).unwrap(),
        vec!["Networks", "Databases", "Compilers"]
    );
    assert_eq!(interests.find_ids(Some(&names[..])).unwrap(), ids);

    // string forms of ids resolve too
    let as_strings: Vec<String> = ids.iter().map(|id| id.to_string()).collect();
    assert_eq!(interests.find_names(&as_strings).unwrap(), names);
}

#[test]
fn test_find_all_in_definition_order() {
    let interests = interests();
    for name in ["b", "a", "c"] {
        interests.define(NamedEntity::new(name, None::<String>)).unwrap();
    }

    let cursor = interests.find_all().unwrap();
    let names: Vec<String> = cursor.iter().map(|e| e.doc.name.clone()).collect();
    assert_eq!(names, vec!["b", "a", "c"]);

    // restartable
    assert_eq!(cursor.iter().count(), 3);
    assert_eq!(cursor.iter().count(), 3);
}

#[test]
fn test_teardown() {
    let interests = interests();
    let id = interests
        .define(NamedEntity::new("Databases", None::<String>))
        .unwrap();

    assert_eq!(interests.remove_all().unwrap(), 1);
    assert!(interests.find_all().unwrap().is_empty());
    assert!(interests.find_name(id).unwrap_err().is_not_found());
    assert!(interests.assert_defined(id).unwrap_err().is_not_found());
}

#[test]
fn test_schema_exposed_for_pre_validation() {
    let interests = interests();
    let schema = interests.schema();

    let cleaned = schema.clean(NamedEntity::new("  Databases ", Some("")));
    assert!(schema.validate(&cleaned).is_valid());
    assert_eq!(cleaned, NamedEntity::new("Databases", None::<String>));

    let mut context = schema.named_context("Interest_Form");
    assert!(!context.validate(&NamedEntity::new("", None::<String>)));
    assert_eq!(context.violations()[0].field, "name");
}

#[test]
fn test_catalog_collections_are_independent() {
    let first = Catalog::in_memory(StoreConfig::default()).unwrap();
    let second = Catalog::in_memory(StoreConfig::default()).unwrap();

    first
        .interests()
        .define(NamedEntity::new("Databases", None::<String>))
        .unwrap();
    first
        .favorites()
        .define(NamedEntity::new("Databases", None::<String>))
        .unwrap();

    assert!(second.interests().find_id("Databases").unwrap_err().is_not_found());
    assert_ne!(
        first.interests().find_id("Databases").unwrap(),
        first.favorites().find_id("Databases").unwrap()
    );
}
