//! Lazy relation resolution.

use super::populate;
use crate::{Entity, Manager, Related, Result, Slot};

use docmap_core::{schema::Relates, Document, Error, ModelSchema, ModelType, Value};

use std::sync::Arc;
use tracing::debug;

/// Resolves the relation `field` of `entity`, fetching it on first access.
///
/// A resolved relation is returned as is, and an unresolved one already
/// holding a list or document is materialized in place. Otherwise the
/// related resource is fetched from the manager's transport at the entity's
/// own resource location joined with the relation path, then materialized and
/// stored in the field. The entity is unchanged if the fetch or the
/// materialization fails.
pub fn resolve_relation<'a>(entity: &'a mut dyn Entity, field: &str) -> Result<&'a Related> {
    let model = entity.model_type();
    let manager = entity.binding().manager().cloned().ok_or_else(|| {
        Error::configuration(format!(
            "`{model}` instance is not bound to a manager; load it through one first"
        ))
    })?;

    let schema = manager.schema(&model)?;
    let descriptor = schema.expect_field(field)?;
    let relates = descriptor
        .ty
        .as_relation()
        .ok_or_else(|| super::not_a_relation(&schema, field))?;

    if super::relation(entity, &schema, field)?.is_resolved() {
        return super::relation(entity, &schema, field)?
            .get()
            .ok_or_else(|| super::not_a_relation(&schema, field));
    }

    let raw = super::relation(entity, &schema, field)?
        .raw()
        .cloned()
        .unwrap_or_default();

    // Composite raw data is already present; only references are fetched.
    if raw.is_composite() {
        let related = materialize(&manager, relates, raw)?;
        return Ok(super::relation_mut(entity, &schema, field)?.resolve_with(related));
    }

    let owner = location(&manager, &schema, entity)?;
    let path = relates.path(&raw);
    let location = join(&owner, &path);

    debug!(
        model = model.name(),
        field,
        %location,
        "fetching related resource"
    );

    let data = manager
        .transport()?
        .call(&location, "GET", &Document::new())?;
    let related = materialize(&manager, relates, data)?;

    Ok(super::relation_mut(entity, &schema, field)?.resolve_with(related))
}

/// Turns fetched or embedded relation data into [`Related`].
///
/// Without a target model the data is kept raw. A collection becomes one
/// model per element, in order; a document given for a collection is read as
/// the list of its values.
pub(crate) fn materialize(manager: &Arc<Manager>, relates: &Relates, data: Value) -> Result<Related> {
    let Some(model) = relates.model else {
        return Ok(Related::Raw(data));
    };

    if !relates.collection {
        return instantiate(manager, &model, data).map(Related::One);
    }

    let items: Vec<Value> = match data {
        Value::List(items) => items,
        Value::Document(document) => document.into_values().collect(),
        other => return Err(Error::type_conversion(&other, "List")),
    };

    items
        .into_iter()
        .map(|item| instantiate(manager, &model, item))
        .collect::<Result<Vec<_>>>()
        .map(Related::Many)
}

fn instantiate(manager: &Arc<Manager>, model: &ModelType, data: Value) -> Result<Box<dyn Entity>> {
    let data = match data {
        Value::Document(data) => data,
        other => return Err(Error::type_conversion(&other, model.name())),
    };

    let mut entity = manager.instantiate(model)?;
    populate(manager, &mut *entity, &data)?;
    manager.bind(&mut *entity);
    Ok(entity)
}

/// The owner's resource location: its model's resource template with the
/// identifier filled in. Cached on the binding until the identifier changes.
fn location(manager: &Manager, schema: &ModelSchema, entity: &mut dyn Entity) -> Result<String> {
    if let Some(location) = entity.binding().location() {
        return Ok(location.to_string());
    }

    let template = manager.resource(&schema.model).ok_or_else(|| {
        Error::configuration(format!(
            "no resource template registered for `{}`",
            schema.name()
        ))
    })?;

    let identifier = schema.expect_identifier()?;
    let id = super::slot(entity, schema, &identifier.field)?.get();

    if id.is_null() {
        return Err(Error::configuration(format!(
            "`{}` instance has no identifier; its resource location is unknown",
            schema.name()
        )));
    }

    let location = template.replace(":id", &id.to_string());

    entity.binding_mut().set_location(location.clone());
    Ok(location)
}

fn join(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}
