//! Error types for validation
//!
//! Two kinds of errors come out of a validation pass:
//!
//! - [`ValidationError`] is a recorded failure on one attribute. It is data:
//!   validators push it into a [`ValidationErrors`] collection and the pass
//!   carries on with the next attribute.
//! - [`ValidatorError`] is fatal. A misconfigured validator or a failing
//!   collection callback aborts the pass and is returned to the caller.
//!
//! String fields use `Cow<'static, str>` so the static codes and default
//! messages never allocate.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

/// Boxed error produced by a collection callback.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

// ============================================================================
// VALIDATION ERROR
// ============================================================================

/// A recorded validation failure.
///
/// # Examples
///
/// ```rust
/// use verity_validator::foundation::ValidationError;
///
/// let error = ValidationError::new("inclusion", "is not included in the list")
///     .with_field("color")
///     .with_param("value", "\"purple\"");
///
/// assert_eq!(error.field.as_deref(), Some("color"));
/// assert_eq!(error.param("value"), Some("\"purple\""));
/// assert_eq!(error.full_message(), "color is not included in the list");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationError {
    /// Machine-readable code, `inclusion` or `exclusion` unless overridden.
    pub code: Cow<'static, str>,

    /// Message phrased to follow the attribute name.
    pub message: Cow<'static, str>,

    /// Attribute the failure is recorded on.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<Cow<'static, str>>,

    /// Interpolation parameters, such as the rejected `value`.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub params: BTreeMap<Cow<'static, str>, Cow<'static, str>>,
}

impl ValidationError {
    pub fn new(code: impl Into<Cow<'static, str>>, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            field: None,
            params: BTreeMap::new(),
        }
    }

    /// Sets the attribute this error is recorded on.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_field(mut self, field: impl Into<Cow<'static, str>>) -> Self {
        self.field = Some(field.into());
        self
    }

    /// Sets a parameter, replacing an earlier value under the same key.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_param(
        mut self,
        key: impl Into<Cow<'static, str>>,
        value: impl Into<Cow<'static, str>>,
    ) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(AsRef::as_ref)
    }

    /// Returns the attribute name followed by the message, e.g.
    /// `color is not included in the list`.
    #[must_use]
    pub fn full_message(&self) -> String {
        match &self.field {
            Some(field) => format!("{field} {}", self.message),
            None => self.message.to_string(),
        }
    }

    pub fn to_json_value(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.full_message(), self.code)?;
        if let Some(value) = self.param("value") {
            write!(f, " (got {value})")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

// ============================================================================
// ERROR COLLECTION
// ============================================================================

/// The error report of one validation pass.
///
/// Owned by the caller of a validation pass; validators only append.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors {
    errors: Vec<ValidationError>,
}

impl ValidationErrors {
    #[must_use]
    pub fn new() -> Self {
        Self { errors: Vec::new() }
    }

    /// Records one failure.
    pub fn add(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    /// Merges the failures of another pass, keeping their order.
    pub fn extend(&mut self, errors: impl IntoIterator<Item = ValidationError>) {
        self.errors.extend(errors);
    }

    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// All failures in insertion order.
    #[must_use]
    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    /// Errors recorded on `attribute`, in insertion order.
    pub fn on<'a>(&'a self, attribute: &'a str) -> impl Iterator<Item = &'a ValidationError> + 'a {
        self.errors
            .iter()
            .filter(move |e| e.field.as_deref() == Some(attribute))
    }

    /// Number of errors recorded on `attribute`.
    #[must_use]
    pub fn count_on(&self, attribute: &str) -> usize {
        self.on(attribute).count()
    }

    /// `full_message` of every error, in insertion order.
    #[must_use]
    pub fn full_messages(&self) -> Vec<String> {
        self.errors.iter().map(ValidationError::full_message).collect()
    }

    /// `Ok(record)` when nothing was recorded, otherwise the report itself.
    pub fn into_result<T>(self, record: T) -> Result<T, Self> {
        if self.is_empty() { Ok(record) } else { Err(self) }
    }

    /// Converts the report to a JSON array.
    pub fn to_json_value(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

impl FromIterator<ValidationError> for ValidationErrors {
    fn from_iter<I: IntoIterator<Item = ValidationError>>(iter: I) -> Self {
        Self {
            errors: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for ValidationErrors {
    type Item = ValidationError;
    type IntoIter = std::vec::IntoIter<ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.errors.as_slice() {
            [] => f.write_str("no validation errors"),
            [only] => write!(f, "{only}"),
            errors => {
                write!(f, "{} validation errors:", errors.len())?;
                for error in errors {
                    write!(f, "\n  - {error}")?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ValidationErrors {}

// ============================================================================
// FATAL ERRORS
// ============================================================================

/// Errors that abort a validation pass.
///
/// Unlike [`ValidationError`], these are never recorded against an attribute:
/// they mean the validator itself could not run.
#[derive(Debug, thiserror::Error)]
pub enum ValidatorError {
    /// The validator has neither a static collection nor a collection callback.
    #[error("{validator} validator for {attributes:?} has neither a collection nor a collection callback")]
    Configuration {
        validator: &'static str,
        attributes: Vec<String>,
    },

    /// The collection callback failed. The callback's error is kept as-is in
    /// `source`.
    #[error("collection callback for `{attribute}` failed")]
    Callback {
        attribute: String,
        #[source]
        source: BoxError,
    },

    /// A record could not be captured as a set of attributes.
    #[error("record cannot be read as attributes: {reason}")]
    Unreadable {
        reason: Cow<'static, str>,
        #[source]
        source: Option<serde_json::Error>,
    },
}

impl ValidatorError {
    /// Returns true for [`ValidatorError::Configuration`].
    #[must_use]
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration { .. })
    }

    /// Returns true for [`ValidatorError::Callback`].
    #[must_use]
    pub fn is_callback(&self) -> bool {
        matches!(self, Self::Callback { .. })
    }
}

// ============================================================================
// TESTS
// ============================================================================
