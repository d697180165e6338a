use docmap_driver_memory::MemoryStore;
use tests::prelude::*;

use pretty_assertions::assert_eq;
use std::sync::Arc;

#[derive(Debug, Default, docmap::Model)]
struct Person {
    #[key]
    #[column("uid")]
    id: Option<String>,

    #[column]
    name: String,

    #[column]
    age: i64,

    binding: Binding,
}

fn setup() -> (Arc<Manager>, Arc<MemoryStore>) {
    init_tracing();

    let store = Arc::new(MemoryStore::new());
    let manager = assert_ok!(models!(Person).storage(store.clone()).build());
    (manager, store)
}

fn person(name: &str, age: i64) -> Person {
    Person {
        name: name.to_string(),
        age,
        ..Default::default()
    }
}

#[test]
fn save_inserts_then_updates() {
    let (manager, store) = setup();

    let mut ann = person("Ann", 31);
    assert_ok!(manager.save(&mut ann));

    let id = assert_some!(ann.id.clone());
    assert!(ann.binding.is_bound());
    assert_eq!(store.len("person"), 1);

    ann.age = 32;
    assert_ok!(manager.save(&mut ann));

    assert_eq!(ann.id.as_deref(), Some(id.as_str()));
    assert_eq!(store.len("person"), 1);

    let loaded = assert_ok!(manager.get_by_id::<Person>(id.as_str()));
    assert_eq!(loaded.name, "Ann");
    assert_eq!(loaded.age, 32);
    assert_eq!(loaded.id, Some(id));
}

#[test]
fn stored_documents_use_the_logical_identifier() {
    let (manager, store) = setup();

    let mut ann = person("Ann", 31);
    assert_ok!(manager.save(&mut ann));

    let stored = assert_ok!(docmap::driver::Storage::find_all(&*store, "person"));
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].get("id"), Some(&Value::from(ann.id.clone())));
    assert!(!stored[0].contains_key("uid"));
}

#[test]
fn find_records() {
    let (manager, _store) = setup();

    for (name, age) in [("Ann", 31), ("Bob", 40), ("Cid", 31)] {
        assert_ok!(manager.save(&mut person(name, age)));
    }

    let all = assert_ok!(manager.find_all::<Person>());
    let names: Vec<_> = all.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["Ann", "Bob", "Cid"]);

    let thirty_one = assert_ok!(manager.find_by::<Person>("age", "31"));
    let names: Vec<_> = thirty_one.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["Ann", "Cid"]);

    let bob = assert_some!(assert_ok!(manager.find_one_by::<Person>("name", "Bob")));
    assert_eq!(bob.age, 40);
    assert!(bob.id.is_some());

    assert_none!(assert_ok!(manager.find_one_by::<Person>("name", "Dee")));
}

#[test]
fn find_by_identifier_column() {
    let (manager, _store) = setup();

    let mut ann = person("Ann", 31);
    assert_ok!(manager.save(&mut ann));
    assert_ok!(manager.save(&mut person("Bob", 40)));
    let id = assert_some!(ann.id.clone());

    let found = assert_some!(assert_ok!(manager.find_one_by::<Person>("uid", id.as_str())));
    assert_eq!(found.name, "Ann");
    assert_eq!(found.id.as_deref(), Some(id.as_str()));

    let found = assert_ok!(manager.find_by::<Person>("uid", id.as_str()));
    let names: Vec<_> = found.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["Ann"]);
}

#[test]
fn missing_records() {
    let (manager, _store) = setup();

    assert_none!(assert_ok!(manager.find_by_id::<Person>("missing")));

    let err = assert_err!(manager.get_by_id::<Person>("missing"));
    assert!(err.is_record_not_found());
    assert_eq!(err.to_string(), "record not found: `Person` with id missing");
}

#[test]
fn remove_records() {
    let (manager, store) = setup();

    let unsaved = person("Ann", 31);
    assert!(!assert_ok!(manager.remove(&unsaved)));

    let mut ann = person("Ann", 31);
    assert_ok!(manager.save(&mut ann));

    assert!(assert_ok!(manager.remove(&ann)));
    assert!(!assert_ok!(manager.remove(&ann)));
    assert!(store.is_empty("person"));
}

#[test]
fn collection_can_be_overridden() {
    let store = Arc::new(MemoryStore::new());
    let manager = assert_ok!(models!(Person)
        .collection::<Person>("people")
        .storage(store.clone())
        .build());

    assert_ok!(manager.save(&mut person("Ann", 31)));

    assert_eq!(assert_ok!(manager.collection(&docmap::ModelType::of::<Person>())), "people");
    assert_eq!(store.len("people"), 1);
    assert!(store.is_empty("person"));
}

#[test]
fn storage_is_required() {
    let manager = assert_ok!(models!(Person).build());

    let err = assert_err!(manager.save(&mut person("Ann", 31)));
    assert!(err.is_configuration());
    assert_eq!(err.to_string(), "invalid configuration: no storage configured");
}
