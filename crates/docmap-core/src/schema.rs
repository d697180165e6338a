//! Per-model mapping metadata: the directives attached to fields, the field
//! descriptors built from them, and the resolver that caches them per type.

mod directive;
pub use directive::{Column, Directive, Extract, Relates};

mod field;
pub use field::{Field, FieldName, FieldTy};

mod model;
pub use model::{Identifier, ModelSchema};

mod model_type;
pub use model_type::{ModelType, Reflect};

mod provider;
pub use provider::{Attributes, DirectiveProvider, Registry};

mod resolver;
pub use resolver::Resolver;

mod verify;
