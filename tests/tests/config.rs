use docmap::Config;
use docmap_driver_memory::MemoryStore;
use tests::prelude::*;

use pretty_assertions::assert_eq;
use std::sync::Arc;

#[derive(Debug, Default, docmap::Model)]
struct Account {
    #[key]
    #[column]
    id: Option<i64>,

    #[column]
    #[relates(resource = "settings")]
    settings: Relation,

    binding: Binding,
}

#[test]
fn config_sets_resource_and_collection() {
    init_tracing();

    let config = assert_ok!(Config::from_json(
        r#"{
            "models": {
                "Account": { "resource": "accounts/:id", "collection": "accounts" }
            }
        }"#
    ));

    let routes = Routes::new().route("accounts/5/settings", json!({"theme": "dark"}));
    let store = Arc::new(MemoryStore::new());

    let manager = assert_ok!(models!(Account)
        .resource::<Account>("ignored/:id")
        .transport(routes.clone())
        .storage(store.clone())
        .config(config)
        .build());

    let mut account = assert_ok!(Account::from_data(&doc(json!({"id": 5})), &manager));
    let settings = assert_ok!(account.related("settings"));
    assert_eq!(
        settings.raw(),
        Some(&Value::from(doc(json!({"theme": "dark"}))))
    );
    assert_eq!(routes.paths(), ["accounts/5/settings"]);

    assert_eq!(
        assert_ok!(manager.collection(&docmap::ModelType::of::<Account>())),
        "accounts"
    );
}

#[test]
fn config_must_name_registered_models() {
    let config = assert_ok!(Config::from_json(
        r#"{ "models": { "Missing": { "collection": "missing" } } }"#
    ));

    let err = assert_err!(models!(Account).config(config).build());
    assert_eq!(
        err.to_string(),
        "invalid configuration: config names model `Missing`, which is not registered"
    );
}

#[test]
fn malformed_config() {
    let err = assert_err!(Config::from_json(r#"{ "models": [] }"#));
    assert!(err.is_configuration());

    let err = assert_err!(Config::from_json(
        r#"{ "models": { "Account": { "path": "accounts" } } }"#
    ));
    assert!(err.is_configuration());
    assert!(err.to_string().contains("unknown field `path`"), "{err}");
}
