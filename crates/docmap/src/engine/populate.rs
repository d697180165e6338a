use super::relation::materialize;
use crate::{Entity, Manager, Relation, Result};

use docmap_core::{
    schema::{Field, FieldTy},
    Document, Error, ModelSchema, Value,
};

use std::sync::Arc;

/// Applies `data` to `entity` according to its model schema.
///
/// Keys the schema does not reference are ignored, and fields whose key is
/// missing keep their current value. Relation fields holding embedded data
/// (a list or a document) are materialized immediately; scalar references
/// are stored unresolved.
///
/// Every assignment is planned and checked against its field before any field
/// is written, so on error the entity is left as it was. A changed identifier
/// discards the entity's cached resource location.
pub fn populate(manager: &Arc<Manager>, entity: &mut dyn Entity, data: &Document) -> Result<()> {
    let schema = manager.schema(&entity.model_type())?;
    let mut plan = Plan::default();

    for field in schema.fields() {
        if !field.is_mapped() {
            continue;
        }

        if let Some(value) = data.get(field.storage_name()) {
            plan.field(manager, &schema, field, value)?;
        }
    }

    plan.check(&schema, entity)?;

    let before = identifier(&schema, entity)?;
    plan.apply(&schema, entity)?;

    // The cached resource location is derived from the identifier.
    if identifier(&schema, entity)? != before {
        entity.binding_mut().reset_location();
    }

    Ok(())
}

fn identifier(schema: &ModelSchema, entity: &dyn Entity) -> Result<Option<Value>> {
    let Some(identifier) = schema.identifier() else {
        return Ok(None);
    };

    Ok(Some(super::slot(entity, schema, &identifier.field)?.get()))
}

#[derive(Default)]
struct Plan<'a> {
    assignments: Vec<(&'a Field, Assignment)>,
}

enum Assignment {
    Value(Value),
    Relation(Relation),
}

impl<'a> Plan<'a> {
    fn field(
        &mut self,
        manager: &Arc<Manager>,
        schema: &'a ModelSchema,
        field: &'a Field,
        value: &Value,
    ) -> Result<()> {
        match &field.ty {
            FieldTy::Unmapped | FieldTy::Column => {
                self.assignments
                    .push((field, Assignment::Value(value.clone())));
            }
            FieldTy::Extract(extract) => {
                let group = match value {
                    // An explicit null group is treated like a missing one.
                    Value::Null => return Ok(()),
                    Value::Document(group) => group,
                    other => {
                        return Err(Error::type_conversion(other, "Document").context(format!(
                            "extract group `{}` does not hold a document",
                            schema.full_name(field)
                        )))
                    }
                };

                for (sub_key, target) in &extract.columns {
                    if let Some(value) = group.get(sub_key) {
                        let target = schema.expect_field(target)?;
                        self.field(manager, schema, target, value)?;
                    }
                }
            }
            FieldTy::Relation(relates) => {
                let relation = if value.is_composite() {
                    let related = materialize(manager, relates, value.clone()).map_err(|err| {
                        err.context(format!(
                            "failed to materialize embedded `{}`",
                            schema.full_name(field)
                        ))
                    })?;
                    Relation::resolved(related)
                } else {
                    Relation::unresolved(value.clone())
                };

                self.assignments
                    .push((field, Assignment::Relation(relation)));
            }
        }

        Ok(())
    }

    fn check(&self, schema: &ModelSchema, entity: &dyn Entity) -> Result<()> {
        for (field, assignment) in &self.assignments {
            let name = &field.name.app_name;

            match assignment {
                Assignment::Value(value) => {
                    super::slot(entity, schema, name)?
                        .check(value)
                        .map_err(|err| {
                            err.context(format!(
                                "failed to populate `{}`",
                                schema.full_name(field)
                            ))
                        })?;
                }
                Assignment::Relation(_) => {
                    super::relation(entity, schema, name)?;
                }
            }
        }

        Ok(())
    }

    fn apply(self, schema: &ModelSchema, entity: &mut dyn Entity) -> Result<()> {
        for (field, assignment) in self.assignments {
            let name = &field.name.app_name;

            match assignment {
                Assignment::Value(value) => super::slot_mut(entity, schema, name)?.set(value)?,
                Assignment::Relation(relation) => {
                    *super::relation_mut(entity, schema, name)? = relation;
                }
            }
        }

        Ok(())
    }
}
