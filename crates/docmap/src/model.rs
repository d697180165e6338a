use crate::{engine, Entity, Manager, Related, Result, Slot};

use docmap_core::{Document, Error, Reflect, Value};

use std::sync::Arc;

/// A typed model mapped to documents.
///
/// Usually derived with `#[derive(Model)]`; every method has a default
/// implementation driven by the model's schema.
pub trait Model: Entity + Reflect + Default {
    /// Builds a new instance from `data` and binds it to `manager`.
    fn from_data(data: &Document, manager: &Arc<Manager>) -> Result<Self> {
        let mut model = Self::default();
        model.load_data(data, manager)?;
        Ok(model)
    }

    /// Populates this instance from `data` and binds it to `manager`.
    ///
    /// Fields whose keys are missing from `data` keep their values. Nothing is
    /// changed if `data` does not fit the model.
    fn load_data(&mut self, data: &Document, manager: &Arc<Manager>) -> Result<()> {
        engine::populate(manager, self, data)?;
        manager.bind(self);
        Ok(())
    }

    fn to_data(&self, manager: &Manager) -> Result<Document> {
        engine::extract(manager, self)
    }

    /// Document key the identifier is stored under.
    fn identifier_column(manager: &Manager) -> Result<String> {
        let schema = manager.schema_of::<Self>()?;
        Ok(schema.expect_identifier()?.column.clone())
    }

    fn identifier_value(&self, manager: &Manager) -> Result<Value> {
        let schema = manager.schema_of::<Self>()?;
        let identifier = schema.expect_identifier()?;

        let slot = self
            .slot(&identifier.field)
            .ok_or_else(|| missing_identifier_slot::<Self>(&identifier.field))?;
        Ok(slot.get())
    }

    /// Sets the identifier. The cached resource location is discarded.
    fn set_identifier_value(&mut self, manager: &Manager, value: impl Into<Value>) -> Result<()> {
        let schema = manager.schema_of::<Self>()?;
        let identifier = schema.expect_identifier()?;

        self.slot_mut(&identifier.field)
            .ok_or_else(|| missing_identifier_slot::<Self>(&identifier.field))?
            .set(value.into())?;
        self.binding_mut().reset_location();
        Ok(())
    }

    /// The materialized relation `field`, fetched through the bound
    /// manager's transport on first access.
    fn related(&mut self, field: &str) -> Result<&Related> {
        engine::resolve_relation(self, field)
    }
}

fn missing_identifier_slot<T: Model>(field: &str) -> Error {
    Error::configuration(format!(
        "identifier field `{}::{field}` has no storage on the model",
        T::NAME
    ))
}
