//! Reading attributes off the records being validated.
//!
//! Validators never see a record's concrete type. They ask for one attribute
//! at a time through [`ReadAttribute`] and get back a `serde_json::Value`.

use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::foundation::ValidatorError;

// ============================================================================
// ATTRIBUTE ACCESS
// ============================================================================

/// A record whose attributes can be read by name.
///
/// `None` means the record has no such attribute; dispatch treats it as
/// `null`.
///
/// # Examples
///
/// ```rust
/// use serde_json::{Value, json};
/// use verity_validator::record::ReadAttribute;
///
/// struct Shirt {
///     color: String,
/// }
///
/// impl ReadAttribute for Shirt {
///     fn read_attribute(&self, name: &str) -> Option<Value> {
///         match name {
///             "color" => Some(json!(self.color)),
///             _ => None,
///         }
///     }
/// }
///
/// let shirt = Shirt { color: "red".into() };
/// assert_eq!(shirt.read_attribute("color"), Some(json!("red")));
/// ```
pub trait ReadAttribute {
    /// Returns the current value of `name`.
    fn read_attribute(&self, name: &str) -> Option<Value>;
}

impl<R: ReadAttribute + ?Sized> ReadAttribute for &R {
    fn read_attribute(&self, name: &str) -> Option<Value> {
        (**self).read_attribute(name)
    }
}

impl ReadAttribute for Value {
    fn read_attribute(&self, name: &str) -> Option<Value> {
        self.get(name).cloned()
    }
}

impl ReadAttribute for Map<String, Value> {
    fn read_attribute(&self, name: &str) -> Option<Value> {
        self.get(name).cloned()
    }
}

impl<S: BuildHasher> ReadAttribute for HashMap<String, Value, S> {
    fn read_attribute(&self, name: &str) -> Option<Value> {
        self.get(name).cloned()
    }
}

impl ReadAttribute for BTreeMap<String, Value> {
    fn read_attribute(&self, name: &str) -> Option<Value> {
        self.get(name).cloned()
    }
}

// ============================================================================
// SNAPSHOT
// ============================================================================

/// The attributes of any `Serialize` record, captured once.
///
/// ```rust
/// use serde::Serialize;
/// use serde_json::json;
/// use verity_validator::record::{ReadAttribute, Snapshot};
///
/// #[derive(Serialize)]
/// struct Shirt {
///     color: &'static str,
///     size: Option<u8>,
/// }
///
/// let snapshot = Snapshot::capture(&Shirt { color: "red", size: None }).unwrap();
/// assert_eq!(snapshot.read_attribute("color"), Some(json!("red")));
/// assert_eq!(snapshot.read_attribute("size"), Some(json!(null)));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    attributes: Map<String, Value>,
}

impl Snapshot {
    /// Serializes `record` and keeps its top-level fields.
    ///
    /// Fails when `record` does not serialize to a JSON object.
    pub fn capture<T: Serialize + ?Sized>(record: &T) -> Result<Self, ValidatorError> {
        match serde_json::to_value(record) {
            Ok(Value::Object(attributes)) => Ok(Self { attributes }),
            Ok(other) => Err(ValidatorError::Unreadable {
                reason: format!("expected an object, got {}", kind_of(&other)).into(),
                source: None,
            }),
            Err(source) => Err(ValidatorError::Unreadable {
                reason: "serialization failed".into(),
                source: Some(source),
            }),
        }
    }

    /// Returns the captured attributes.
    pub fn attributes(&self) -> &Map<String, Value> {
        &self.attributes
    }
}

impl ReadAttribute for Snapshot {
    fn read_attribute(&self, name: &str) -> Option<Value> {
        self.attributes.get(name).cloned()
    }
}

impl From<Map<String, Value>> for Snapshot {
    fn from(attributes: Map<String, Value>) -> Self {
        Self { attributes }
    }
}

// ============================================================================
// BLANK VALUES
// ============================================================================

/// Returns true for `null`, `false`, strings that are empty or whitespace
/// only, and empty arrays or objects.
pub fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::String(s) => s.trim().is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(fields) => fields.is_empty(),
        Value::Number(_) => false,
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

// ============================================================================
// TESTS
// ============================================================================
