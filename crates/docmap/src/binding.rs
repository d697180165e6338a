use crate::Manager;

use std::{fmt, sync::Arc};

/// Ties a model instance to the [`Manager`] it was loaded through.
///
/// Also caches the instance's own resource location, computed from the
/// manager's resource template and the identifier on first relation fetch.
#[derive(Clone, Default)]
pub struct Binding {
    manager: Option<Arc<Manager>>,
    location: Option<String>,
}

impl Binding {
    pub fn manager(&self) -> Option<&Arc<Manager>> {
        self.manager.as_ref()
    }

    pub fn is_bound(&self) -> bool {
        self.manager.is_some()
    }

    pub(crate) fn bind(&mut self, manager: Arc<Manager>) {
        let same = self
            .manager
            .as_ref()
            .is_some_and(|current| Arc::ptr_eq(current, &manager));

        if !same {
            self.location = None;
        }

        self.manager = Some(manager);
    }

    pub(crate) fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    pub(crate) fn set_location(&mut self, location: String) {
        self.location = Some(location);
    }

    /// Forgets the cached resource location.
    pub(crate) fn reset_location(&mut self) {
        self.location = None;
    }
}

impl fmt::Debug for Binding {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt.debug_struct("Binding")
            .field("bound", &self.is_bound())
            .field("location", &self.location)
            .finish()
    }
}

impl PartialEq for Binding {
    /// Bindings never distinguish otherwise equal models.
    fn eq(&self, _: &Binding) -> bool {
        true
    }
}
