use docmap::{driver::Transport, Document, Error, Result, Value};

use indexmap::IndexMap;
use std::sync::{Arc, Mutex};

/// A transport serving canned responses by path.
///
/// Clones share their routes and call log, so a test can keep a handle after
/// handing the transport to a manager.
#[derive(Debug, Clone, Default)]
pub struct Routes {
    routes: Arc<Mutex<IndexMap<String, Value>>>,

    /// Log of all calls made through this transport
    calls: Arc<Mutex<Vec<Call>>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub path: String,
    pub method: String,
    pub params: Document,
}

impl Routes {
    pub fn new() -> Routes {
        Routes::default()
    }

    /// Serves `response` for `path`.
    pub fn route(self, path: &str, response: serde_json::Value) -> Routes {
        self.routes
            .lock()
            .unwrap()
            .insert(path.to_string(), response.into());
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    /// Paths of all calls, in call order.
    pub fn paths(&self) -> Vec<String> {
        self.calls().into_iter().map(|call| call.path).collect()
    }
}

impl Transport for Routes {
    fn call(&self, path: &str, method: &str, params: &Document) -> Result<Value> {
        self.calls.lock().unwrap().push(Call {
            path: path.to_string(),
            method: method.to_string(),
            params: params.clone(),
        });

        self.routes.lock().unwrap().get(path).cloned().ok_or_else(|| {
            Error::transport(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("no route for `{path}`"),
            ))
        })
    }
}
