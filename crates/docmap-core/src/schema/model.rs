use super::{Field, ModelType};
use crate::{Error, Result};

/// Resolved mapping metadata for one model type.
///
/// Built once per type by the [`Resolver`](super::Resolver) and shared,
/// immutable, by every instance of that type.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelSchema {
    /// The model type this schema describes
    pub model: ModelType,

    /// The identifier field, if the model declares one
    pub identifier: Option<Identifier>,

    /// Field descriptors, in declaration order
    pub fields: Vec<Field>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identifier {
    /// Name of the model field holding the identifier
    pub field: String,

    /// Document key the identifier is stored under
    pub column: String,
}

impl ModelSchema {
    pub fn name(&self) -> &'static str {
        self.model.name()
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|field| field.name.app_name == name)
    }

    /// Like [`field`](Self::field), but a missing field is a configuration error.
    pub fn expect_field(&self, name: &str) -> Result<&Field> {
        self.field(name).ok_or_else(|| {
            Error::configuration(format!("model `{}` has no field `{name}`", self.name()))
        })
    }

    pub fn identifier(&self) -> Option<&Identifier> {
        self.identifier.as_ref()
    }

    /// The identifier, or a configuration error if the model declares none.
    pub fn expect_identifier(&self) -> Result<&Identifier> {
        self.identifier.as_ref().ok_or_else(|| {
            Error::configuration(format!(
                "model `{}` does not declare an identifier field",
                self.name()
            ))
        })
    }

    /// Fully qualified name of a field, for messages.
    pub fn full_name(&self, field: &Field) -> String {
        format!("{}::{}", self.name(), field.name.app_name)
    }
}
