use crate::NATIVE_ID;

use docmap_core::{driver::ID_KEY, Document, Error, Result, Value};

/// Key a logical identifier is stored under.
pub(crate) fn native_id(id: &Value) -> Result<String> {
    match id {
        Value::String(id) => Ok(id.clone()),
        Value::I64(id) => Ok(id.to_string()),
        _ => Err(Error::type_conversion(id, "String")),
    }
}

/// Copies a stored record, exposing its identifier under the logical key.
pub(crate) fn to_logical(record: &Document) -> Document {
    let mut document = Document::new();

    if let Some(id) = record.get(NATIVE_ID) {
        document.insert(ID_KEY, id.clone());
    }

    for (key, val) in record.iter().filter(|(key, _)| *key != NATIVE_ID) {
        document.insert(key, val.clone());
    }

    document
}

/// Numeric strings compare as numbers.
pub(crate) fn coerce(val: &Value) -> Value {
    let Value::String(s) = val else {
        return val.clone();
    };

    if let Ok(n) = s.parse::<i64>() {
        Value::I64(n)
    } else if let Some(n) = s.parse::<f64>().ok().filter(|n| n.is_finite()) {
        Value::F64(n)
    } else {
        val.clone()
    }
}
