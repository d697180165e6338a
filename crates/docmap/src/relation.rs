//! Relation fields: references to other models that materialize on demand.

use crate::{Entity, Result, Slot};

use docmap_core::Value;

use std::fmt;

/// A field referencing another model, a list of models, or raw remote data.
///
/// A relation starts either unresolved, holding the raw reference found in
/// the document (usually an identifier), or resolved, when the document
/// embedded the related data. Resolution happens at most once and is never
/// undone.
#[derive(Default)]
pub struct Relation {
    state: State,
}

enum State {
    Unresolved(Value),
    Resolved(Related),
}

/// Materialized relation data.
pub enum Related {
    /// Data kept as fetched, for relations without a target model.
    Raw(Value),

    /// A single related model.
    One(Box<dyn Entity>),

    /// Related models, in the order they were received.
    Many(Vec<Box<dyn Entity>>),
}

impl Relation {
    pub fn unresolved(raw: impl Into<Value>) -> Relation {
        Relation {
            state: State::Unresolved(raw.into()),
        }
    }

    pub fn resolved(related: Related) -> Relation {
        Relation {
            state: State::Resolved(related),
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self.state, State::Resolved(_))
    }

    /// The raw reference, while unresolved.
    pub fn raw(&self) -> Option<&Value> {
        match &self.state {
            State::Unresolved(raw) => Some(raw),
            State::Resolved(_) => None,
        }
    }

    /// The materialized data, once resolved.
    pub fn get(&self) -> Option<&Related> {
        match &self.state {
            State::Unresolved(_) => None,
            State::Resolved(related) => Some(related),
        }
    }

    /// The resolved single model, if it is a `T`.
    pub fn one<T: Entity>(&self) -> Option<&T> {
        self.get()?.one()
    }

    /// The resolved models, if they are all `T`s.
    pub fn many<T: Entity>(&self) -> Option<Vec<&T>> {
        self.get()?.many()
    }

    pub(crate) fn resolve_with(&mut self, related: Related) -> &Related {
        self.state = State::Resolved(related);

        match &self.state {
            State::Resolved(related) => related,
            State::Unresolved(_) => unreachable!(),
        }
    }
}

impl Related {
    pub fn raw(&self) -> Option<&Value> {
        match self {
            Related::Raw(value) => Some(value),
            _ => None,
        }
    }

    pub fn one<T: Entity>(&self) -> Option<&T> {
        match self {
            Related::One(entity) => entity.downcast_ref(),
            _ => None,
        }
    }

    pub fn many<T: Entity>(&self) -> Option<Vec<&T>> {
        match self {
            Related::Many(entities) => entities.iter().map(|e| e.downcast_ref()).collect(),
            _ => None,
        }
    }
}

impl Slot for Relation {
    /// The raw reference, or the raw data of a resolved relation without a
    /// target model. Relations resolved into models read as `Null`; the
    /// engine re-extracts those through [`Slot::as_relation`].
    fn get(&self) -> Value {
        match &self.state {
            State::Unresolved(raw) | State::Resolved(Related::Raw(raw)) => raw.clone(),
            State::Resolved(_) => Value::Null,
        }
    }

    fn check(&self, _: &Value) -> Result<()> {
        Ok(())
    }

    fn set(&mut self, value: Value) -> Result<()> {
        self.state = State::Unresolved(value);
        Ok(())
    }

    fn as_relation(&self) -> Option<&Relation> {
        Some(self)
    }

    fn as_relation_mut(&mut self) -> Option<&mut Relation> {
        Some(self)
    }
}

impl Default for State {
    fn default() -> State {
        State::Unresolved(Value::Null)
    }
}

impl From<Related> for Relation {
    fn from(related: Related) -> Relation {
        Relation::resolved(related)
    }
}

impl fmt::Debug for Relation {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.state {
            State::Unresolved(raw) => write!(fmt, "<unresolved {raw}>"),
            State::Resolved(related) => fmt::Debug::fmt(related, fmt),
        }
    }
}

impl fmt::Debug for Related {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Related::Raw(value) => fmt.debug_tuple("Raw").field(value).finish(),
            Related::One(entity) => fmt::Debug::fmt(entity, fmt),
            Related::Many(entities) => fmt.debug_list().entries(entities).finish(),
        }
    }
}
