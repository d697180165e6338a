mod builder;
pub use builder::Builder;

use crate::{Entity, Model, Result};

use docmap_core::{
    driver::{Storage, Transport, ID_KEY},
    Document, Error, ModelSchema, ModelType, Reflect, Resolver, Value,
};

use indexmap::IndexMap;
use std::{fmt, sync::Arc};

/// Owns the mapping metadata of registered models and the collaborators
/// they are loaded from and saved to.
///
/// Built once at startup with [`Manager::builder`] and shared through an
/// `Arc`; model instances loaded through a manager keep a handle on it to
/// resolve their relations.
pub struct Manager {
    resolver: Resolver,
    models: IndexMap<ModelType, Registration>,
    transport: Option<Box<dyn Transport>>,
    storage: Option<Box<dyn Storage>>,
}

/// What the manager knows about one registered model.
#[derive(Clone)]
pub(crate) struct Registration {
    new: fn() -> Box<dyn Entity>,

    /// Resource location template, with a `:id` placeholder
    pub(crate) resource: Option<String>,

    /// Storage collection name
    pub(crate) collection: String,
}

impl Manager {
    pub fn builder() -> Builder {
        Builder::default()
    }

    /// The mapping schema of `model`, resolved on first use.
    pub fn schema(&self, model: &ModelType) -> Result<Arc<ModelSchema>> {
        self.resolver.resolve(model)
    }

    pub fn schema_of<T: Reflect>(&self) -> Result<Arc<ModelSchema>> {
        self.schema(&ModelType::of::<T>())
    }

    pub fn resolver(&self) -> &Resolver {
        &self.resolver
    }

    /// Attaches `entity` to this manager.
    pub fn bind(self: &Arc<Self>, entity: &mut dyn Entity) {
        entity.binding_mut().bind(self.clone());
    }

    /// Registered models, in registration order.
    pub fn models(&self) -> impl Iterator<Item = &ModelType> {
        self.models.keys()
    }

    pub fn is_registered(&self, model: &ModelType) -> bool {
        self.models.contains_key(model)
    }

    /// Resource location template of `model`.
    pub fn resource(&self, model: &ModelType) -> Option<&str> {
        self.models.get(model)?.resource.as_deref()
    }

    /// Storage collection of `model`.
    pub fn collection(&self, model: &ModelType) -> Result<&str> {
        Ok(&self.registration(model)?.collection)
    }

    pub fn transport(&self) -> Result<&dyn Transport> {
        self.transport
            .as_deref()
            .ok_or_else(|| Error::configuration("no transport configured"))
    }

    pub fn storage(&self) -> Result<&dyn Storage> {
        self.storage
            .as_deref()
            .ok_or_else(|| Error::configuration("no storage configured"))
    }

    /// Writes `model` to storage, inserting it when its identifier is unset,
    /// then reloads it from the stored document.
    pub fn save<T: Model>(self: &Arc<Self>, model: &mut T) -> Result<()> {
        let column = T::identifier_column(self)?;
        let mut data = model.to_data(self)?;

        match data.remove(&column) {
            Some(id) if !id.is_null() => {
                data.insert(ID_KEY, id);
            }
            _ => {}
        }

        let stored = self.storage()?.save(self.collection_of::<T>()?, data)?;
        model.load_data(&from_storage(&column, stored), self)?;
        model.binding_mut().reset_location();
        Ok(())
    }

    /// Removes `model` from storage. Returns `false` if no record matched.
    pub fn remove<T: Model>(&self, model: &T) -> Result<bool> {
        let id = model.identifier_value(self)?;

        if id.is_null() {
            return Ok(false);
        }

        self.storage()?.remove(self.collection_of::<T>()?, &id)
    }

    pub fn find_all<T: Model>(self: &Arc<Self>) -> Result<Vec<T>> {
        let documents = self.storage()?.find_all(self.collection_of::<T>()?)?;
        self.load_all(documents)
    }

    pub fn find_by_id<T: Model>(self: &Arc<Self>, id: impl Into<Value>) -> Result<Option<T>> {
        let document = self
            .storage()?
            .find_one_by_id(self.collection_of::<T>()?, &id.into())?;
        document.map(|document| self.load::<T>(document)).transpose()
    }

    /// Like [`find_by_id`](Self::find_by_id), but a missing record is an
    /// error.
    pub fn get_by_id<T: Model>(self: &Arc<Self>, id: impl Into<Value>) -> Result<T> {
        let id = id.into();

        self.find_by_id::<T>(id.clone())?.ok_or_else(|| {
            Error::record_not_found(format!("`{}` with id {id}", T::NAME))
        })
    }

    /// The first record whose `key` holds `value`. The model's identifier
    /// column matches the stored identifier.
    pub fn find_one_by<T: Model>(
        self: &Arc<Self>,
        key: &str,
        value: impl Into<Value>,
    ) -> Result<Option<T>> {
        let document = self.storage()?.find_one_by_key_val(
            self.collection_of::<T>()?,
            self.storage_key::<T>(key)?,
            &value.into(),
        )?;
        document.map(|document| self.load::<T>(document)).transpose()
    }

    pub fn find_by<T: Model>(self: &Arc<Self>, key: &str, value: impl Into<Value>) -> Result<Vec<T>> {
        let documents = self.storage()?.find_by_key_val(
            self.collection_of::<T>()?,
            self.storage_key::<T>(key)?,
            &value.into(),
        )?;
        self.load_all(documents)
    }

    /// A fresh, unbound instance of `model`.
    pub(crate) fn instantiate(&self, model: &ModelType) -> Result<Box<dyn Entity>> {
        Ok((self.registration(model)?.new)())
    }

    fn registration(&self, model: &ModelType) -> Result<&Registration> {
        self.models.get(model).ok_or_else(|| {
            Error::configuration(format!("model `{model}` is not registered"))
        })
    }

    fn collection_of<T: Model>(&self) -> Result<&str> {
        self.collection(&ModelType::of::<T>())
    }

    /// Storage key for a document key of `T`: the identifier column is stored
    /// under [`ID_KEY`].
    fn storage_key<'a, T: Model>(&self, key: &'a str) -> Result<&'a str> {
        let schema = self.schema_of::<T>()?;

        match schema.identifier() {
            Some(identifier) if identifier.column == key => Ok(ID_KEY),
            _ => Ok(key),
        }
    }

    fn load<T: Model>(self: &Arc<Self>, document: Document) -> Result<T> {
        let column = T::identifier_column(self)?;
        T::from_data(&from_storage(&column, document), self)
    }

    fn load_all<T: Model>(self: &Arc<Self>, documents: Vec<Document>) -> Result<Vec<T>> {
        documents
            .into_iter()
            .map(|document| self.load::<T>(document))
            .collect()
    }

    /// Checks every registered model resolves and relates only to registered
    /// models.
    fn verify(&self) -> Result<()> {
        for model in self.models.keys() {
            let schema = self.schema(model)?;

            for field in schema.fields() {
                let Some(target) = field.ty.as_relation().and_then(|relates| relates.model) else {
                    continue;
                };

                if !self.is_registered(&target) {
                    return Err(Error::configuration(format!(
                        "relation `{}` targets `{target}`, which is not registered",
                        schema.full_name(field)
                    )));
                }
            }
        }

        Ok(())
    }
}

/// Moves the storage identifier back under the model's identifier column.
fn from_storage(column: &str, mut document: Document) -> Document {
    if column != ID_KEY {
        if let Some(id) = document.remove(ID_KEY) {
            document.insert(column, id);
        }
    }

    document
}

impl Registration {
    pub(crate) fn new<T: Model>() -> Registration {
        use heck::ToSnakeCase;

        Registration {
            new: new_boxed::<T>,
            resource: None,
            collection: T::NAME.to_snake_case(),
        }
    }
}

fn new_boxed<T: Model>() -> Box<dyn Entity> {
    Box::new(T::default())
}

impl fmt::Debug for Manager {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt.debug_struct("Manager")
            .field("models", &self.models.keys().collect::<Vec<_>>())
            .field("transport", &self.transport)
            .field("storage", &self.storage)
            .finish()
    }
}
