use crate::{Relation, Result};

use docmap_core::{Document, Error, Value};

/// Type-erased access to one field of a model.
///
/// The mapping engine reads and writes model fields exclusively through
/// slots. `check` must accept exactly the values `set` accepts, so the engine
/// can validate a whole document before mutating anything.
pub trait Slot: Send {
    /// The field's current value.
    fn get(&self) -> Value;

    /// Returns an error if `set` would reject `value`.
    fn check(&self, value: &Value) -> Result<()>;

    fn set(&mut self, value: Value) -> Result<()>;

    fn as_relation(&self) -> Option<&Relation> {
        None
    }

    fn as_relation_mut(&mut self) -> Option<&mut Relation> {
        None
    }
}

/// A field type that converts to and from a single [`Value`].
pub trait Primitive: Sized + Send {
    fn load(value: Value) -> Result<Self>;

    fn to_value(&self) -> Value;
}

impl<T: Primitive> Slot for T {
    fn get(&self) -> Value {
        self.to_value()
    }

    fn check(&self, value: &Value) -> Result<()> {
        T::load(value.clone()).map(drop)
    }

    fn set(&mut self, value: Value) -> Result<()> {
        *self = T::load(value)?;
        Ok(())
    }
}

impl Primitive for bool {
    fn load(value: Value) -> Result<Self> {
        match value {
            Value::Bool(v) => Ok(v),
            _ => Err(Error::type_conversion(&value, "bool")),
        }
    }

    fn to_value(&self) -> Value {
        Value::Bool(*self)
    }
}

impl Primitive for i32 {
    fn load(value: Value) -> Result<Self> {
        match value {
            Value::I64(v) => i32::try_from(v).map_err(|_| Error::type_conversion(&value, "i32")),
            _ => Err(Error::type_conversion(&value, "i32")),
        }
    }

    fn to_value(&self) -> Value {
        Value::I64(i64::from(*self))
    }
}

impl Primitive for i64 {
    fn load(value: Value) -> Result<Self> {
        match value {
            Value::I64(v) => Ok(v),
            _ => Err(Error::type_conversion(&value, "i64")),
        }
    }

    fn to_value(&self) -> Value {
        Value::I64(*self)
    }
}

impl Primitive for f64 {
    fn load(value: Value) -> Result<Self> {
        match value {
            Value::F64(v) => Ok(v),
            Value::I64(v) => Ok(v as f64),
            _ => Err(Error::type_conversion(&value, "f64")),
        }
    }

    fn to_value(&self) -> Value {
        Value::F64(*self)
    }
}

impl Primitive for String {
    fn load(value: Value) -> Result<Self> {
        match value {
            Value::String(v) => Ok(v),
            _ => Err(Error::type_conversion(&value, "String")),
        }
    }

    fn to_value(&self) -> Value {
        Value::String(self.clone())
    }
}

impl Primitive for Value {
    fn load(value: Value) -> Result<Self> {
        Ok(value)
    }

    fn to_value(&self) -> Value {
        self.clone()
    }
}

impl Primitive for Document {
    fn load(value: Value) -> Result<Self> {
        match value {
            Value::Document(v) => Ok(v),
            _ => Err(Error::type_conversion(&value, "Document")),
        }
    }

    fn to_value(&self) -> Value {
        Value::Document(self.clone())
    }
}

impl<T: Primitive> Primitive for Option<T> {
    fn load(value: Value) -> Result<Self> {
        match value {
            Value::Null => Ok(None),
            value => T::load(value).map(Some),
        }
    }

    fn to_value(&self) -> Value {
        match self {
            Some(v) => v.to_value(),
            None => Value::Null,
        }
    }
}

impl<T: Primitive> Primitive for Vec<T> {
    fn load(value: Value) -> Result<Self> {
        match value {
            Value::List(items) => items.into_iter().map(T::load).collect(),
            _ => Err(Error::type_conversion(&value, "Vec")),
        }
    }

    fn to_value(&self) -> Value {
        Value::List(self.iter().map(T::to_value).collect())
    }
}
