use crate::{Binding, Slot};

use docmap_core::ModelType;

use std::{any::Any, fmt};

/// Object-safe view of a model instance.
///
/// The mapping engine works on `dyn Entity` so related models of any type can
/// be materialized and stored behind a [`Relation`](crate::Relation).
/// Implemented by `#[derive(Model)]`.
pub trait Entity: Any + fmt::Debug + Send {
    fn model_type(&self) -> ModelType;

    /// The slot backing `field`, or `None` if the field has no storage of its
    /// own (extract groups, skipped fields).
    fn slot(&self, field: &str) -> Option<&dyn Slot>;

    fn slot_mut(&mut self, field: &str) -> Option<&mut dyn Slot>;

    fn binding(&self) -> &Binding;

    fn binding_mut(&mut self) -> &mut Binding;

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl dyn Entity {
    pub fn is<T: Entity>(&self) -> bool {
        self.as_any().is::<T>()
    }

    pub fn downcast_ref<T: Entity>(&self) -> Option<&T> {
        self.as_any().downcast_ref()
    }

    pub fn downcast_mut<T: Entity>(&mut self) -> Option<&mut T> {
        self.as_any_mut().downcast_mut()
    }
}
