#[macro_use]
mod macros;

mod routes;
pub use routes::{Call, Routes};

pub mod prelude;

pub use std_util::*;

use docmap::Document;

/// Builds a document from a JSON object literal.
#[track_caller]
pub fn doc(json: serde_json::Value) -> Document {
    match Document::from_json(json) {
        Ok(document) => document,
        Err(e) => panic!("fixture is not a JSON object; error={e}"),
    }
}

/// Routes `tracing` output through the test harness. Filter with `RUST_LOG`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
