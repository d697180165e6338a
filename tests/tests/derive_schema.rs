use docmap::{
    schema::{FieldTy, Identifier, Registry},
    Reflect,
};
use tests::prelude::*;

use pretty_assertions::assert_eq;

#[derive(Debug, Default, docmap::Model)]
struct User {
    #[key]
    #[column("_uid")]
    id: i64,

    #[column]
    name: String,

    #[column]
    #[extract(street = "street", "zip-code" = "zip")]
    address: (),

    street: String,
    zip: Option<String>,

    #[column]
    #[relates(model = Company, resource = "companies/:id")]
    employer: Relation,

    #[skip]
    scratch: Vec<String>,

    binding: Binding,
}

#[derive(Debug, Default, docmap::Model)]
struct Company {
    #[key]
    #[column]
    id: i64,

    #[column]
    r#type: String,

    binding: Binding,
}

#[test]
fn reflect_lists_declared_fields() {
    assert_eq!(User::NAME, "User");
    assert_eq!(
        User::FIELDS,
        ["id", "name", "address", "street", "zip", "employer"]
    );
    assert_eq!(Company::FIELDS, ["id", "type"]);

    assert!(User::attributes("street").is_empty());
    assert!(User::attributes("scratch").is_empty());
}

#[test]
fn resolved_schema_reflects_attributes() {
    let manager = assert_ok!(models!(User, Company).build());
    let schema = assert_ok!(manager.schema_of::<User>());

    assert_eq!(
        schema.identifier(),
        Some(&Identifier {
            field: "id".to_string(),
            column: "_uid".to_string(),
        })
    );

    let name = schema.field("name").unwrap();
    assert!(matches!(name.ty, FieldTy::Column));
    assert_eq!(name.storage_name(), "name");

    let address = schema.field("address").unwrap();
    let extract = address.ty.as_extract().unwrap();
    assert_eq!(
        extract.columns.iter().collect::<Vec<_>>(),
        [
            (&"street".to_string(), &"street".to_string()),
            (&"zip-code".to_string(), &"zip".to_string()),
        ]
    );

    assert!(schema.field("street").unwrap().ty.is_unmapped());

    let employer = schema.field("employer").unwrap().ty.expect_relation();
    assert!(employer.model.unwrap().is::<Company>());
    assert!(!employer.collection);
    assert_eq!(employer.resource, "companies/:id");

    assert_none!(schema.field("scratch"));
    assert_none!(schema.field("binding"));
}

#[test]
fn schema_is_shared_between_lookups() {
    let manager = assert_ok!(models!(User, Company).build());

    let first = manager.schema_of::<Company>().unwrap();
    let second = manager.schema_of::<Company>().unwrap();
    assert!(std::sync::Arc::ptr_eq(&first, &second));

    assert_eq!(first.field("type").unwrap().storage_name(), "type");
}

#[test]
fn invalid_directives_fail_the_build() {
    let mut registry = Registry::new();
    registry.field::<Company>("id", [docmap::schema::Directive::Key]);

    let err = assert_err!(models!(Company).directives(registry).build());

    assert!(err.is_configuration());
    assert_eq!(
        err.to_string(),
        "invalid configuration: identifier field `Company::id` must also be declared as a column"
    );
}

#[test]
fn relation_target_must_be_registered() {
    let err = assert_err!(models!(User).build());

    assert!(err.is_configuration());
    assert_eq!(
        err.to_string(),
        "invalid configuration: relation `User::employer` targets `Company`, which is not registered"
    );
}
