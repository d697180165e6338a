//! Common imports for test files
//!
//! This module provides a convenient way to import frequently used items
//! in test files with `use tests::prelude::*;`

pub use crate::{doc, init_tracing, models, Call, Routes};

pub use docmap::{Binding, Document, Manager, Model, Related, Relation, Value};

pub use std_util::prelude::*;

pub use serde_json::json;
