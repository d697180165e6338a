mod binding;
pub use binding::Binding;

mod config;
pub use config::{Config, ModelConfig};

pub mod engine;

mod entity;
pub use entity::Entity;

pub mod manager;
pub use manager::Manager;

mod model;
pub use model::Model;

pub mod relation;
pub use relation::{Related, Relation};

mod slot;
pub use slot::{Primitive, Slot};

pub use docmap_core::{
    driver, schema, Document, Error, ModelSchema, ModelType, Reflect, Result, Value,
};

pub use docmap_macros::Model;

#[doc(hidden)]
pub mod codegen_support {
    pub use crate::{Binding, Entity, Model, Relation, Slot};
    pub use docmap_core::schema::{Directive, ModelType, Reflect, Relates};
    pub use std::{
        any::Any,
        option::Option::{self, None, Some},
        string::String,
        vec::Vec,
    };
}
