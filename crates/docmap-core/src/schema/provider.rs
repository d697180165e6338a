use super::{Directive, ModelType, Reflect};

use indexmap::IndexMap;
use std::any::TypeId;

/// Source of the directives attached to model fields.
///
/// The [`Resolver`](super::Resolver) queries the provider once per declared
/// field the first time a model is resolved, and never again for that model.
pub trait DirectiveProvider: Send + Sync {
    /// Directives attached to `field` of `model`. Unannotated fields return
    /// an empty list.
    fn directives(&self, model: &ModelType, field: &str) -> Vec<Directive>;
}

/// Reads the directives a type declares through its field attributes
/// ([`Reflect::attributes`]).
#[derive(Debug, Default, Clone, Copy)]
pub struct Attributes;

impl DirectiveProvider for Attributes {
    fn directives(&self, model: &ModelType, field: &str) -> Vec<Directive> {
        model.attributes(field)
    }
}

/// Directives registered explicitly at startup, for types that do not carry
/// attributes.
///
/// ```
/// use docmap_core::schema::{Directive, Reflect, Registry};
///
/// struct Tag;
///
/// impl Reflect for Tag {
///     const NAME: &'static str = "Tag";
///     const FIELDS: &'static [&'static str] = &["id", "label"];
/// }
///
/// let mut registry = Registry::new();
/// registry
///     .field::<Tag>("id", [Directive::Key, Directive::column()])
///     .field::<Tag>("label", [Directive::column_named("text")]);
/// ```
#[derive(Debug, Default)]
pub struct Registry {
    fields: IndexMap<(TypeId, String), Vec<Directive>>,
}

impl Registry {
    pub fn new() -> Registry {
        Registry::default()
    }

    /// Attaches `directives` to `field` of `T`, replacing earlier registrations.
    pub fn field<T: Reflect>(
        &mut self,
        field: &str,
        directives: impl IntoIterator<Item = Directive>,
    ) -> &mut Self {
        self.fields.insert(
            (TypeId::of::<T>(), field.to_string()),
            directives.into_iter().collect(),
        );
        self
    }
}

impl DirectiveProvider for Registry {
    fn directives(&self, model: &ModelType, field: &str) -> Vec<Directive> {
        self.fields
            .get(&(model.id(), field.to_string()))
            .cloned()
            .unwrap_or_default()
    }
}
