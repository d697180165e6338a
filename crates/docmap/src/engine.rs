//! The mapping engine: document to model ([`populate`]), model to document
//! ([`extract`]), and lazy relation resolution ([`resolve_relation`]).

mod extract;
pub use extract::extract;

mod populate;
pub use populate::populate;

pub mod relation;
pub use relation::resolve_relation;

use crate::{Entity, Relation, Result, Slot};

use docmap_core::{Error, ModelSchema};

fn slot<'a>(entity: &'a dyn Entity, schema: &ModelSchema, field: &str) -> Result<&'a dyn Slot> {
    entity.slot(field).ok_or_else(|| missing_slot(schema, field))
}

fn slot_mut<'a>(
    entity: &'a mut dyn Entity,
    schema: &ModelSchema,
    field: &str,
) -> Result<&'a mut dyn Slot> {
    entity.slot_mut(field).ok_or_else(|| missing_slot(schema, field))
}

fn relation<'a>(entity: &'a dyn Entity, schema: &ModelSchema, field: &str) -> Result<&'a Relation> {
    slot(entity, schema, field)?
        .as_relation()
        .ok_or_else(|| not_a_relation(schema, field))
}

fn relation_mut<'a>(
    entity: &'a mut dyn Entity,
    schema: &ModelSchema,
    field: &str,
) -> Result<&'a mut Relation> {
    slot_mut(entity, schema, field)?
        .as_relation_mut()
        .ok_or_else(|| not_a_relation(schema, field))
}

fn missing_slot(schema: &ModelSchema, field: &str) -> Error {
    Error::configuration(format!(
        "field `{}::{field}` has no storage on the model",
        schema.name()
    ))
}

fn not_a_relation(schema: &ModelSchema, field: &str) -> Error {
    Error::configuration(format!(
        "field `{}::{field}` is not declared as a `Relation`",
        schema.name()
    ))
}
