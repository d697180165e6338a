use tests::prelude::*;

use pretty_assertions::assert_eq;
use std::sync::Arc;

#[derive(Debug, Default, docmap::Model)]
struct Point {
    #[key]
    #[column]
    id: Option<i64>,

    #[column]
    label: String,

    #[column]
    #[extract(a = "x", b = "y")]
    group: (),

    x: i64,
    y: i64,

    #[column("is_visible")]
    visible: bool,

    note: String,

    binding: Binding,
}

#[derive(Debug, Default, docmap::Model)]
struct Badge {
    #[key]
    #[column]
    id: Option<i64>,

    #[column]
    #[extract(inner = "inner", owner = "owner")]
    outer: (),

    #[column]
    #[extract(a = "x")]
    inner: (),

    x: i64,

    #[column]
    #[relates(model = Tag)]
    owner: Relation,

    binding: Binding,
}

#[derive(Debug, Default, docmap::Model)]
struct Tag {
    #[key]
    #[column]
    id: i64,

    binding: Binding,
}

fn manager() -> Arc<Manager> {
    init_tracing();
    assert_ok!(models!(Point, Badge, Tag).build())
}

#[test]
fn extract_group_spreads_over_fields() {
    let manager = manager();

    let point = assert_ok!(Point::from_data(
        &doc(json!({"id": 1, "label": "p", "group": {"a": 1, "b": 2}})),
        &manager,
    ));

    assert_eq!(point.x, 1);
    assert_eq!(point.y, 2);

    assert_eq!(
        assert_ok!(point.to_data(&manager)),
        doc(json!({
            "id": 1,
            "label": "p",
            "group": {"a": 1, "b": 2},
            "is_visible": false,
        }))
    );
}

#[test]
fn round_trip() {
    let manager = manager();

    let point = Point {
        id: Some(9),
        label: "origin".to_string(),
        x: -3,
        y: 4,
        visible: true,
        ..Default::default()
    };

    let data = assert_ok!(point.to_data(&manager));
    let loaded = assert_ok!(Point::from_data(&data, &manager));

    assert_eq!(loaded.id, Some(9));
    assert_eq!(loaded.label, "origin");
    assert_eq!((loaded.x, loaded.y), (-3, 4));
    assert!(loaded.visible);
    assert_eq!(assert_ok!(loaded.to_data(&manager)), data);
}

#[test]
fn missing_keys_keep_current_values() {
    let manager = manager();

    let mut point = Point {
        label: "keep".to_string(),
        x: 5,
        ..Default::default()
    };

    assert_ok!(point.load_data(
        &doc(json!({"id": 3, "group": {"b": 8}, "note": "ignored", "extra": true})),
        &manager,
    ));

    assert_eq!(point.id, Some(3));
    assert_eq!(point.label, "keep");
    assert_eq!((point.x, point.y), (5, 8));
    assert_eq!(point.note, "");
}

#[test]
fn null_group_is_treated_as_missing() {
    let manager = manager();

    let mut point = Point {
        x: 1,
        ..Default::default()
    };

    assert_ok!(point.load_data(&doc(json!({"group": null, "label": "z"})), &manager));

    assert_eq!(point.x, 1);
    assert_eq!(point.label, "z");
}

#[test]
fn failed_load_leaves_model_unchanged() {
    let manager = manager();

    let mut point = Point {
        label: "before".to_string(),
        ..Default::default()
    };

    let err = assert_err!(point.load_data(
        &doc(json!({"label": "after", "group": {"a": "one"}})),
        &manager,
    ));

    assert!(err.is_type_conversion());
    assert!(
        err.to_string().starts_with("failed to populate `Point::x`"),
        "{err}"
    );
    assert_eq!(point.label, "before");
    assert!(!point.binding.is_bound());
}

#[test]
fn group_must_hold_a_document() {
    let manager = manager();

    let err = assert_err!(Point::from_data(&doc(json!({"group": 5})), &manager));

    assert!(err.is_type_conversion());
    assert!(
        err.to_string()
            .starts_with("extract group `Point::group` does not hold a document"),
        "{err}"
    );
}

#[test]
fn loading_binds_the_model() {
    let manager = manager();

    let point = assert_ok!(Point::from_data(&doc(json!({"id": 1})), &manager));

    assert!(point.binding.is_bound());
    assert!(Arc::ptr_eq(point.binding.manager().unwrap(), &manager));
}

#[test]
fn identifier_accessors() {
    let manager = manager();

    let mut point = Point::default();

    assert_eq!(assert_ok!(Point::identifier_column(&manager)), "id");
    assert_eq!(assert_ok!(point.identifier_value(&manager)), Value::Null);

    assert_ok!(point.set_identifier_value(&manager, 12));
    assert_eq!(point.id, Some(12));
    assert_eq!(assert_ok!(point.identifier_value(&manager)), Value::I64(12));

    let err = assert_err!(point.set_identifier_value(&manager, "twelve"));
    assert!(err.is_type_conversion());
    assert_eq!(point.id, Some(12));
}

#[test]
fn extract_group_targets_group_and_relation() {
    let manager = manager();

    let badge = assert_ok!(Badge::from_data(
        &doc(json!({"id": 1, "outer": {"inner": {"a": 5}, "owner": {"id": 3}}})),
        &manager,
    ));

    assert_eq!(badge.x, 5);
    assert!(badge.owner.is_resolved());
    let owner = assert_some!(badge.owner.one::<Tag>());
    assert_eq!(owner.id, 3);
    assert!(owner.binding.is_bound());

    let data = assert_ok!(badge.to_data(&manager));
    assert_eq!(
        data,
        doc(json!({
            "id": 1,
            "outer": {"inner": {"a": 5}, "owner": {"id": 3}},
            "inner": {"a": 5},
            "owner": {"id": 3},
        }))
    );

    let reloaded = assert_ok!(Badge::from_data(&data, &manager));
    assert_eq!(reloaded.x, 5);
    assert_eq!(assert_some!(reloaded.owner.one::<Tag>()).id, 3);
    assert_eq!(assert_ok!(reloaded.to_data(&manager)), data);
}

#[test]
fn extract_group_keeps_scalar_relation_unresolved() {
    let manager = manager();

    let badge = assert_ok!(Badge::from_data(
        &doc(json!({"outer": {"owner": 3}})),
        &manager,
    ));

    assert!(!badge.owner.is_resolved());
    assert_eq!(badge.owner.raw(), Some(&Value::I64(3)));
    assert_eq!(badge.x, 0);
}
