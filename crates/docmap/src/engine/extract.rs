use crate::{Entity, Manager, Related, Relation, Result, Slot};

use docmap_core::{
    schema::{Field, FieldTy},
    Document, ModelSchema, Value,
};

/// Builds the document representation of `entity`.
///
/// Every mapped field writes its current value under its storage name.
/// Extract groups are written as sub-documents of their targets, and resolved
/// relations are written as the documents of the related models.
pub fn extract(manager: &Manager, entity: &dyn Entity) -> Result<Document> {
    let schema = manager.schema(&entity.model_type())?;
    let mut document = Document::new();

    for field in schema.fields() {
        if field.is_mapped() {
            let value = field_value(manager, &schema, entity, field)?;
            document.insert(field.storage_name(), value);
        }
    }

    Ok(document)
}

fn field_value(
    manager: &Manager,
    schema: &ModelSchema,
    entity: &dyn Entity,
    field: &Field,
) -> Result<Value> {
    match &field.ty {
        FieldTy::Extract(extract) => {
            let mut group = Document::new();

            for (sub_key, target) in &extract.columns {
                let target = schema.expect_field(target)?;
                group.insert(
                    sub_key.as_str(),
                    field_value(manager, schema, entity, target)?,
                );
            }

            Ok(group.into())
        }
        FieldTy::Relation(_) => {
            let slot = super::slot(entity, schema, &field.name.app_name)?;

            match slot.as_relation() {
                Some(relation) => relation_value(manager, relation),
                None => Ok(slot.get()),
            }
        }
        FieldTy::Unmapped | FieldTy::Column => {
            Ok(super::slot(entity, schema, &field.name.app_name)?.get())
        }
    }
}

fn relation_value(manager: &Manager, relation: &Relation) -> Result<Value> {
    match relation.get() {
        Some(Related::One(entity)) => Ok(extract(manager, &**entity)?.into()),
        Some(Related::Many(entities)) => entities
            .iter()
            .map(|entity| extract(manager, &**entity).map(Value::from))
            .collect::<Result<Vec<_>>>()
            .map(Value::List),
        Some(Related::Raw(_)) | None => Ok(Slot::get(relation)),
    }
}
