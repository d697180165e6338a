use super::{Column, Directive, Extract, ModelType, Relates};
use crate::{Error, Result};

use std::fmt;

/// Mapping descriptor for one declared field of a model.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    /// The field name
    pub name: FieldName,

    /// How the field maps onto the document
    pub ty: FieldTy,

    /// True if the field holds the model's identifier
    pub key: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldName {
    pub app_name: String,
    pub storage_name: Option<String>,
}

impl FieldName {
    pub fn storage_name(&self) -> &str {
        self.storage_name.as_ref().unwrap_or(&self.app_name)
    }
}

#[derive(Clone, PartialEq)]
pub enum FieldTy {
    /// Not stored directly. May still receive values as an extract target.
    Unmapped,

    /// Stored under its storage name.
    Column,

    /// Stored as a sub-document spread over other fields.
    Extract(Extract),

    /// Stored as a raw reference or embedded data, materialized on demand.
    Relation(Relates),
}

impl Field {
    /// Builds a descriptor from the directives attached to `name`.
    pub(crate) fn from_directives(
        model: &ModelType,
        name: &str,
        directives: Vec<Directive>,
    ) -> Result<Field> {
        let full_name = || format!("{model}::{name}");

        let mut key = false;
        let mut column: Option<Column> = None;
        let mut extract: Option<Extract> = None;
        let mut relates: Option<Relates> = None;

        for directive in directives {
            let kind = directive.kind_name();
            let duplicate = match directive {
                Directive::Key => std::mem::replace(&mut key, true),
                Directive::Column(c) => column.replace(c).is_some(),
                Directive::Extract(e) => extract.replace(e).is_some(),
                Directive::Relates(r) => relates.replace(r).is_some(),
            };

            if duplicate {
                return Err(Error::configuration(format!(
                    "field `{}` declares more than one `{}` directive",
                    full_name(),
                    kind,
                )));
            }
        }

        if key && column.is_none() {
            return Err(Error::configuration(format!(
                "identifier field `{}` must also be declared as a column",
                full_name()
            )));
        }

        if extract.is_some() && relates.is_some() {
            return Err(Error::configuration(format!(
                "field `{}` cannot be both an extract group and a relation",
                full_name()
            )));
        }

        if let Some(extract) = &extract {
            if extract.columns.is_empty() {
                return Err(Error::configuration(format!(
                    "no columns defined for the extract directive on `{}`",
                    full_name()
                )));
            }
        }

        let Some(column) = column else {
            if extract.is_some() || relates.is_some() {
                return Err(Error::configuration(format!(
                    "field `{}` needs a column directive to name its document key",
                    full_name()
                )));
            }

            return Ok(Field {
                name: FieldName {
                    app_name: name.to_string(),
                    storage_name: None,
                },
                ty: FieldTy::Unmapped,
                key: false,
            });
        };

        let ty = match (extract, relates) {
            (Some(extract), _) => FieldTy::Extract(extract),
            (_, Some(relates)) => FieldTy::Relation(relates),
            _ => FieldTy::Column,
        };

        Ok(Field {
            name: FieldName {
                app_name: name.to_string(),
                storage_name: column.name,
            },
            ty,
            key,
        })
    }

    pub fn name(&self) -> &FieldName {
        &self.name
    }

    pub fn ty(&self) -> &FieldTy {
        &self.ty
    }

    /// Document key the field reads and writes.
    pub fn storage_name(&self) -> &str {
        self.name.storage_name()
    }

    pub fn is_mapped(&self) -> bool {
        !matches!(self.ty, FieldTy::Unmapped)
    }
}

impl FieldTy {
    pub fn is_unmapped(&self) -> bool {
        matches!(self, Self::Unmapped)
    }

    pub fn is_extract(&self) -> bool {
        matches!(self, Self::Extract(..))
    }

    pub fn as_extract(&self) -> Option<&Extract> {
        match self {
            Self::Extract(extract) => Some(extract),
            _ => None,
        }
    }

    pub fn is_relation(&self) -> bool {
        matches!(self, Self::Relation(..))
    }

    pub fn as_relation(&self) -> Option<&Relates> {
        match self {
            Self::Relation(relates) => Some(relates),
            _ => None,
        }
    }

    #[track_caller]
    pub fn expect_relation(&self) -> &Relates {
        match self {
            Self::Relation(relates) => relates,
            _ => panic!("expected field to be a relation, but was {self:?}"),
        }
    }
}

impl fmt::Debug for FieldTy {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unmapped => fmt.write_str("Unmapped"),
            Self::Column => fmt.write_str("Column"),
            Self::Extract(extract) => extract.fmt(fmt),
            Self::Relation(relates) => relates.fmt(fmt),
        }
    }
}
