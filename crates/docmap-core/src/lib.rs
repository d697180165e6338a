pub mod document;
pub use document::{Document, Value};

pub mod driver;

mod error;
pub use error::{Error, IntoError};

pub mod schema;
pub use schema::{ModelSchema, ModelType, Reflect, Resolver};

/// A Result type alias that uses docmap's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;
