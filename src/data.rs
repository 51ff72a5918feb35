use serde_json::{Map, Value};

pub mod student;

/// A stored record exactly as the store sees it: a JSON object of named fields.
pub type Document = Map<String, Value>;

/// The field the store uses to address a document.
pub const ID_FIELD: &str = "id";
