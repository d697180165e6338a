use super::{Manager, Registration};
use crate::{Config, Model, Result};

use docmap_core::{
    driver::{Storage, Transport},
    schema::DirectiveProvider,
    ModelType, Resolver,
};

use indexmap::IndexMap;
use std::sync::Arc;

#[derive(Default)]
pub struct Builder {
    /// Registered models, in registration order
    models: IndexMap<ModelType, Registration>,

    /// Resolver using the configured directive provider
    resolver: Option<Resolver>,

    transport: Option<Box<dyn Transport>>,

    storage: Option<Box<dyn Storage>>,

    config: Option<Config>,
}

impl Builder {
    pub fn register<T: Model>(&mut self) -> &mut Self {
        self.entry::<T>();
        self
    }

    /// Sets the resource location template of `T`, registering it if needed.
    /// A `:id` placeholder receives the identifier of each instance.
    pub fn resource<T: Model>(&mut self, template: impl Into<String>) -> &mut Self {
        self.entry::<T>().resource = Some(template.into());
        self
    }

    /// Overrides the storage collection of `T`, registering it if needed.
    pub fn collection<T: Model>(&mut self, name: impl Into<String>) -> &mut Self {
        self.entry::<T>().collection = name.into();
        self
    }

    /// Reads field directives from `provider` instead of model attributes.
    pub fn directives(&mut self, provider: impl DirectiveProvider + 'static) -> &mut Self {
        self.resolver = Some(Resolver::new(provider));
        self
    }

    pub fn transport(&mut self, transport: impl Transport + 'static) -> &mut Self {
        self.transport = Some(Box::new(transport));
        self
    }

    pub fn storage(&mut self, storage: impl Storage + 'static) -> &mut Self {
        self.storage = Some(Box::new(storage));
        self
    }

    /// Applies `config` on build, overriding resources and collections set
    /// on the builder.
    pub fn config(&mut self, config: Config) -> &mut Self {
        self.config = Some(config);
        self
    }

    /// Builds the manager, resolving the schema of every registered model.
    ///
    /// Directive errors in any registered model, relations targeting
    /// unregistered models, and configuration naming unknown models all fail
    /// here rather than on first use.
    pub fn build(&mut self) -> Result<Arc<Manager>> {
        let mut models = std::mem::take(&mut self.models);

        if let Some(config) = self.config.take() {
            config.apply(&mut models)?;
        }

        let manager = Manager {
            resolver: self.resolver.take().unwrap_or_default(),
            models,
            transport: self.transport.take(),
            storage: self.storage.take(),
        };

        manager.verify()?;

        Ok(Arc::new(manager))
    }

    fn entry<T: Model>(&mut self) -> &mut Registration {
        self.models
            .entry(ModelType::of::<T>())
            .or_insert_with(Registration::new::<T>)
    }
}
