use super::{Attributes, DirectiveProvider, Field, Identifier, ModelSchema, ModelType};
use crate::Result;

use std::{
    any::TypeId,
    collections::HashMap,
    fmt,
    sync::{Arc, PoisonError, RwLock},
};
use tracing::{debug, warn};

/// Resolves and caches [`ModelSchema`]s, one per model type.
///
/// Resolution is a pure function of the type and the provider. Concurrent
/// first-time resolutions of the same type may each compute the schema; the
/// first one stored wins and every caller receives that instance. Failed
/// resolutions are not cached.
pub struct Resolver {
    provider: Box<dyn DirectiveProvider>,
    cache: RwLock<HashMap<TypeId, Arc<ModelSchema>>>,
}

impl Resolver {
    pub fn new(provider: impl DirectiveProvider + 'static) -> Resolver {
        Resolver {
            provider: Box::new(provider),
            cache: RwLock::default(),
        }
    }

    /// Returns the schema of `model`, computing it on first use.
    pub fn resolve(&self, model: &ModelType) -> Result<Arc<ModelSchema>> {
        if let Some(schema) = self.cached(model) {
            return Ok(schema);
        }

        let schema = Arc::new(self.build(model)?);

        // Cached schemas are immutable, so a poisoned lock still guards valid data.
        let mut cache = self.cache.write().unwrap_or_else(PoisonError::into_inner);
        Ok(cache.entry(model.id()).or_insert(schema).clone())
    }

    /// Returns the schema of `model` if it has already been resolved.
    pub fn cached(&self, model: &ModelType) -> Option<Arc<ModelSchema>> {
        let cache = self.cache.read().unwrap_or_else(PoisonError::into_inner);
        cache.get(&model.id()).cloned()
    }

    fn build(&self, model: &ModelType) -> Result<ModelSchema> {
        let mut fields = Vec::with_capacity(model.fields().len());
        let mut identifier: Option<Identifier> = None;

        for name in model.fields() {
            let directives = self.provider.directives(model, name);
            let mut field = Field::from_directives(model, name, directives)?;

            if field.key {
                match &identifier {
                    None => {
                        identifier = Some(Identifier {
                            field: field.name.app_name.clone(),
                            column: field.storage_name().to_string(),
                        });
                    }
                    Some(first) => {
                        field.key = false;
                        warn!(
                            model = model.name(),
                            field = %name,
                            identifier = %first.field,
                            "ignoring additional identifier field"
                        );
                    }
                }
            }

            fields.push(field);
        }

        let schema = ModelSchema {
            model: *model,
            identifier,
            fields,
        };

        schema.verify()?;

        debug!(
            model = model.name(),
            fields = schema.fields.len(),
            identifier = schema.identifier.as_ref().map(|id| id.column.as_str()),
            "resolved model schema"
        );

        Ok(schema)
    }
}

impl Default for Resolver {
    fn default() -> Resolver {
        Resolver::new(Attributes)
    }
}

impl fmt::Debug for Resolver {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cache = self.cache.read().unwrap_or_else(PoisonError::into_inner);
        let mut models: Vec<_> = cache.values().map(|schema| schema.name()).collect();
        models.sort_unstable();
        fmt.debug_struct("Resolver").field("models", &models).finish()
    }
}
