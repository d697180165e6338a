use super::Directive;

use std::{
    any::TypeId,
    fmt,
    hash::{Hash, Hasher},
};

/// Compile-time introspection of a mapped type.
///
/// Usually implemented by `#[derive(Model)]`. `FIELDS` lists every declared
/// field in declaration order; `attributes` returns the directives attached
/// to a field by its attributes.
pub trait Reflect: 'static {
    /// Model name, used in messages and configuration.
    const NAME: &'static str;

    /// Declared field names, in declaration order.
    const FIELDS: &'static [&'static str];

    fn attributes(field: &str) -> Vec<Directive> {
        let _ = field;
        Vec::new()
    }
}

/// A copyable handle on a [`Reflect`] type.
///
/// Equality and hashing only consider the underlying [`TypeId`].
#[derive(Clone, Copy)]
pub struct ModelType {
    id: TypeId,
    name: &'static str,
    fields: fn() -> &'static [&'static str],
    attributes: fn(&str) -> Vec<Directive>,
}

impl ModelType {
    pub fn of<T: Reflect>() -> ModelType {
        ModelType {
            id: TypeId::of::<T>(),
            name: T::NAME,
            fields: fields_of::<T>,
            attributes: T::attributes,
        }
    }

    pub fn id(&self) -> TypeId {
        self.id
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Declared field names, in declaration order.
    pub fn fields(&self) -> &'static [&'static str] {
        (self.fields)()
    }

    /// Directives the type attached to `field`.
    pub fn attributes(&self, field: &str) -> Vec<Directive> {
        (self.attributes)(field)
    }

    pub fn is<T: Reflect>(&self) -> bool {
        self.id == TypeId::of::<T>()
    }
}

fn fields_of<T: Reflect>() -> &'static [&'static str] {
    T::FIELDS
}

impl PartialEq for ModelType {
    fn eq(&self, other: &ModelType) -> bool {
        self.id == other.id
    }
}

impl Eq for ModelType {}

impl Hash for ModelType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for ModelType {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmt, "ModelType({})", self.name)
    }
}

impl fmt::Display for ModelType {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt.write_str(self.name)
    }
}
