use tests::prelude::*;

use pretty_assertions::assert_eq;
use std::sync::Arc;

#[derive(Debug, Default, docmap::Model)]
struct User {
    #[key]
    #[column]
    id: i64,

    #[column]
    name: String,

    #[column]
    #[relates(model = Address, resource = "addresses/:id")]
    address: Relation,

    #[column]
    #[relates(model = Comment, collection, resource = "comments")]
    comments: Relation,

    #[column]
    #[relates(resource = "stats")]
    stats: Relation,

    binding: Binding,
}

#[derive(Debug, Default, docmap::Model)]
struct Address {
    #[key]
    #[column]
    id: i64,

    #[column]
    street: String,

    binding: Binding,
}

#[derive(Debug, Default, docmap::Model)]
struct Comment {
    #[key]
    #[column]
    id: i64,

    #[column]
    body: String,

    binding: Binding,
}

fn setup(routes: &Routes) -> Arc<Manager> {
    init_tracing();

    assert_ok!(models!(User, Address, Comment)
        .resource::<User>("users/:id")
        .transport(routes.clone())
        .build())
}

fn ann(manager: &Arc<Manager>) -> User {
    assert_ok!(User::from_data(
        &doc(json!({"id": 7, "name": "Ann", "address": 42})),
        manager,
    ))
}

#[test]
fn single_relation_is_fetched_once() {
    let routes = Routes::new().route(
        "users/7/addresses/42",
        json!({"id": 42, "street": "Main St"}),
    );
    let manager = setup(&routes);
    let mut user = ann(&manager);

    assert!(!user.address.is_resolved());
    assert_eq!(user.address.raw(), Some(&Value::I64(42)));

    let address = assert_some!(assert_ok!(user.related("address")).one::<Address>());
    assert_eq!(address.id, 42);
    assert_eq!(address.street, "Main St");
    assert!(address.binding.is_bound());

    assert_ok!(user.related("address"));

    assert!(user.address.is_resolved());
    assert_eq!(routes.paths(), ["users/7/addresses/42"]);
    assert_eq!(routes.calls()[0].method, "GET");
    assert!(routes.calls()[0].params.is_empty());
}

#[test]
fn collection_relation_keeps_fetch_order() {
    let routes = Routes::new().route(
        "users/7/comments",
        json!([
            {"id": 1, "body": "first"},
            {"id": 2, "body": "second"},
        ]),
    );
    let manager = setup(&routes);
    let mut user = ann(&manager);

    let comments = assert_some!(assert_ok!(user.related("comments")).many::<Comment>());
    let bodies: Vec<_> = comments.iter().map(|c| c.body.as_str()).collect();
    assert_eq!(bodies, ["first", "second"]);

    assert_eq!(routes.paths(), ["users/7/comments"]);
}

#[test]
fn collection_relation_reads_document_values() {
    let routes = Routes::new().route(
        "users/7/comments",
        json!({
            "a": {"id": 3, "body": "third"},
            "b": {"id": 4, "body": "fourth"},
        }),
    );
    let manager = setup(&routes);
    let mut user = ann(&manager);

    let comments = assert_some!(assert_ok!(user.related("comments")).many::<Comment>());
    let ids: Vec<_> = comments.iter().map(|c| c.id).collect();
    assert_eq!(ids, [3, 4]);
}

#[test]
fn relation_without_model_stays_raw() {
    let routes = Routes::new().route("users/7/stats", json!({"visits": 3}));
    let manager = setup(&routes);
    let mut user = ann(&manager);

    let related = assert_ok!(user.related("stats"));
    assert_eq!(
        related.raw(),
        Some(&Value::from(doc(json!({"visits": 3}))))
    );
    assert_none!(related.one::<Address>());
}

#[test]
fn embedded_relation_is_materialized_on_load() {
    let routes = Routes::new();
    let manager = setup(&routes);

    let mut user = assert_ok!(User::from_data(
        &doc(json!({
            "id": 7,
            "address": {"id": 1, "street": "Embedded"},
            "comments": [{"id": 5, "body": "hi"}],
        })),
        &manager,
    ));

    assert!(user.address.is_resolved());
    assert_eq!(
        assert_some!(user.address.one::<Address>()).street,
        "Embedded"
    );

    let comments = assert_some!(assert_ok!(user.related("comments")).many::<Comment>());
    assert_eq!(comments.len(), 1);
    assert!(routes.calls().is_empty());

    let data = assert_ok!(user.to_data(&manager));
    assert_eq!(
        data.get("address"),
        Some(&Value::from(doc(json!({"id": 1, "street": "Embedded"}))))
    );
    assert_eq!(
        data.get("comments"),
        Some(&Value::List(vec![doc(json!({"id": 5, "body": "hi"})).into()]))
    );
}

#[test]
fn unresolved_relation_writes_its_raw_value() {
    let manager = setup(&Routes::new());
    let user = ann(&manager);

    let data = assert_ok!(user.to_data(&manager));
    assert_eq!(data.get("address"), Some(&Value::I64(42)));
    assert_eq!(data.get("stats"), Some(&Value::Null));
}

#[test]
fn failed_fetch_leaves_relation_unresolved() {
    let routes = Routes::new();
    let manager = setup(&routes);
    let mut user = ann(&manager);

    let err = assert_err!(user.related("address"));
    assert!(err.is_transport());
    assert_eq!(err.to_string(), "no route for `users/7/addresses/42`");

    assert!(!user.address.is_resolved());
    assert_eq!(user.address.raw(), Some(&Value::I64(42)));
}

#[test]
fn malformed_related_data_leaves_relation_unresolved() {
    let routes = Routes::new().route("users/7/addresses/42", json!("not a document"));
    let manager = setup(&routes);
    let mut user = ann(&manager);

    let err = assert_err!(user.related("address"));
    assert!(err.is_type_conversion());
    assert!(!user.address.is_resolved());
}

#[test]
fn location_follows_identifier_changes() {
    let routes = Routes::new()
        .route("users/7/addresses/42", json!({"id": 42}))
        .route("users/8/comments", json!([]));
    let manager = setup(&routes);
    let mut user = ann(&manager);

    assert_ok!(user.related("address"));
    assert_ok!(user.set_identifier_value(&manager, 8));
    assert_ok!(user.related("comments"));

    assert_eq!(routes.paths(), ["users/7/addresses/42", "users/8/comments"]);
}

#[test]
fn reload_with_new_identifier_moves_location() {
    let routes = Routes::new()
        .route("users/7/addresses/42", json!({"id": 42}))
        .route("users/8/addresses/43", json!({"id": 43, "street": "Second"}));
    let manager = setup(&routes);
    let mut user = ann(&manager);

    assert_ok!(user.related("address"));
    assert_ok!(user.load_data(&doc(json!({"id": 8, "address": 43})), &manager));

    let address = assert_some!(assert_ok!(user.related("address")).one::<Address>());
    assert_eq!(address.street, "Second");

    assert_eq!(routes.paths(), ["users/7/addresses/42", "users/8/addresses/43"]);
}

#[test]
fn composite_raw_value_resolves_without_fetch() {
    let routes = Routes::new();
    let manager = setup(&routes);
    let mut user = ann(&manager);

    user.address = Relation::unresolved(doc(json!({"id": 9, "street": "Local"})));

    let address = assert_some!(assert_ok!(user.related("address")).one::<Address>());
    assert_eq!(address.id, 9);
    assert_eq!(address.street, "Local");

    assert!(user.address.is_resolved());
    assert!(routes.calls().is_empty());
}

#[test]
fn owner_without_identifier_has_no_location() {
    #[derive(Debug, Default, docmap::Model)]
    struct Draft {
        #[key]
        #[column]
        id: Option<i64>,

        #[column]
        #[relates(resource = "notes")]
        notes: Relation,

        binding: Binding,
    }

    let routes = Routes::new().route("drafts/null/notes", json!([]));
    let manager = assert_ok!(models!(Draft)
        .resource::<Draft>("drafts/:id")
        .transport(routes.clone())
        .build());

    let mut draft = assert_ok!(Draft::from_data(&doc(json!({})), &manager));

    let err = assert_err!(draft.related("notes"));
    assert_eq!(
        err.to_string(),
        "invalid configuration: `Draft` instance has no identifier; its resource location is unknown"
    );
    assert!(routes.calls().is_empty());
    assert!(!draft.notes.is_resolved());
}

#[test]
fn unbound_model_cannot_resolve() {
    let mut user = User {
        address: Relation::unresolved(1),
        ..Default::default()
    };

    let err = assert_err!(user.related("address"));
    assert!(err.is_configuration());
}

#[test]
fn missing_resource_template() {
    let routes = Routes::new();
    let manager = assert_ok!(models!(User, Address, Comment)
        .transport(routes.clone())
        .build());
    let mut user = ann(&manager);

    let err = assert_err!(user.related("address"));
    assert_eq!(
        err.to_string(),
        "invalid configuration: no resource template registered for `User`"
    );
    assert!(routes.calls().is_empty());
}

#[test]
fn only_relation_fields_resolve() {
    let manager = setup(&Routes::new());
    let mut user = ann(&manager);

    let err = assert_err!(user.related("name"));
    assert!(err.is_configuration());

    let err = assert_err!(user.related("nope"));
    assert_eq!(
        err.to_string(),
        "invalid configuration: model `User` has no field `nope`"
    );
}
