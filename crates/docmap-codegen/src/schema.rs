mod column;
pub(crate) use column::Column;

mod error;
pub(crate) use error::ErrorSet;

mod extract;
pub(crate) use extract::Extract;

mod field;
pub(crate) use field::Field;

mod model;
pub(crate) use model::Model;

mod relates;
pub(crate) use relates::Relates;
