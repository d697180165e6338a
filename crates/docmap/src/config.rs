use crate::{manager::Registration, Result};

use docmap_core::{Error, ModelType};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Per-model settings loaded at startup, keyed by model name.
///
/// ```
/// let config = docmap::Config::from_json(r#"{
///     "models": {
///         "User": { "resource": "users/:id", "collection": "people" }
///     }
/// }"#).unwrap();
///
/// assert_eq!(config.models["User"].collection.as_deref(), Some("people"));
/// ```
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub models: IndexMap<String, ModelConfig>,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModelConfig {
    /// Resource location template, with a `:id` placeholder
    #[serde(default)]
    pub resource: Option<String>,

    /// Storage collection name
    #[serde(default)]
    pub collection: Option<String>,
}

impl Config {
    pub fn from_json(json: &str) -> Result<Config> {
        serde_json::from_str(json)
            .map_err(|err| Error::configuration(format!("malformed config: {err}")))
    }

    pub(crate) fn apply(self, models: &mut IndexMap<ModelType, Registration>) -> Result<()> {
        for (name, settings) in self.models {
            let registration = models
                .iter_mut()
                .find(|(model, _)| model.name() == name)
                .map(|(_, registration)| registration)
                .ok_or_else(|| {
                    Error::configuration(format!(
                        "config names model `{name}`, which is not registered"
                    ))
                })?;

            if let Some(resource) = settings.resource {
                registration.resource = Some(resource);
            }

            if let Some(collection) = settings.collection {
                registration.collection = collection;
            }
        }

        Ok(())
    }
}
