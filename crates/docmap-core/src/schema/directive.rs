use super::{ModelType, Reflect};
use crate::Value;

use indexmap::IndexMap;

/// A declarative annotation on a model field.
#[derive(Debug, Clone, PartialEq)]
pub enum Directive {
    /// The field holds the model's identifier. Must be paired with a column.
    Key,

    /// The field is stored under a document key.
    Column(Column),

    /// The field's document key holds a sub-document whose keys are spread
    /// over other fields of the model.
    Extract(Extract),

    /// The field references another model, or a collection of them.
    Relates(Relates),
}

/// Document key a field reads and writes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Column {
    /// Overrides the storage name; defaults to the field name.
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extract {
    /// Sub-document key → name of the model field receiving that value.
    pub columns: IndexMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relates {
    /// Target model. `None` keeps the fetched data as a raw value.
    pub model: Option<ModelType>,

    /// `true` when the relation holds a list of targets.
    pub collection: bool,

    /// Resource path of the related data, relative to the owner's resource
    /// location. A `:id` placeholder receives the field's raw value.
    pub resource: String,
}

impl Directive {
    pub fn column() -> Directive {
        Directive::Column(Column::default())
    }

    pub fn column_named(name: impl Into<String>) -> Directive {
        Directive::Column(Column {
            name: Some(name.into()),
        })
    }

    pub fn extract<K, V>(columns: impl IntoIterator<Item = (K, V)>) -> Directive
    where
        K: Into<String>,
        V: Into<String>,
    {
        Directive::Extract(Extract::new(columns))
    }

    pub fn relates(relates: Relates) -> Directive {
        Directive::Relates(relates)
    }

    /// Short name used in configuration errors.
    pub(crate) fn kind_name(&self) -> &'static str {
        match self {
            Directive::Key => "key",
            Directive::Column(_) => "column",
            Directive::Extract(_) => "extract",
            Directive::Relates(_) => "relates",
        }
    }
}

impl Extract {
    pub fn new<K, V>(columns: impl IntoIterator<Item = (K, V)>) -> Extract
    where
        K: Into<String>,
        V: Into<String>,
    {
        Extract {
            columns: columns
                .into_iter()
                .map(|(key, field)| (key.into(), field.into()))
                .collect(),
        }
    }

    /// Names of the fields this group spreads into.
    pub fn targets(&self) -> impl Iterator<Item = &str> {
        self.columns.values().map(String::as_str)
    }
}

impl Relates {
    /// A relation kept as raw data, fetched from `resource`.
    pub fn new(resource: impl Into<String>) -> Relates {
        Relates {
            model: None,
            collection: false,
            resource: resource.into(),
        }
    }

    /// Materializes the fetched data as `T`.
    pub fn model<T: Reflect>(mut self) -> Relates {
        self.model = Some(ModelType::of::<T>());
        self
    }

    /// Treats the fetched data as a list of targets.
    pub fn collection(mut self) -> Relates {
        self.collection = true;
        self
    }

    /// Path of the related resource for a field currently holding `raw`.
    ///
    /// Numeric raw values fill the `:id` placeholder. Anything else (for
    /// example a relation listing a fixed sub-resource) uses the template as
    /// written.
    pub fn path(&self, raw: &Value) -> String {
        if raw.is_numeric() {
            self.resource.replace(":id", raw.to_string().trim())
        } else {
            self.resource.clone()
        }
    }
}
