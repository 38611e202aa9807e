//! Options shared by every attribute validator.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::record::is_blank;

/// Per-validator options.
///
/// Deserializes from the same keys a declarative rule uses, with every key
/// optional:
///
/// ```rust
/// use verity_validator::foundation::ValidatorOptions;
///
/// let options: ValidatorOptions =
///     serde_json::from_str(r#"{ "allow_nil": true, "message": "is not a known plan" }"#).unwrap();
///
/// assert!(options.allow_nil);
/// assert!(!options.allow_blank);
/// assert_eq!(options.message.as_deref(), Some("is not a known plan"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidatorOptions {
    /// Skip the check when the attribute is `null` or missing.
    pub allow_nil: bool,
    /// Skip the check when the attribute is blank (see [`is_blank`]).
    pub allow_blank: bool,
    /// Replaces the validator's default message.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Replaces the validator's default error code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl ValidatorOptions {
    /// Returns true when `value` should not be checked at all.
    pub fn skips(&self, value: &Value) -> bool {
        (self.allow_nil && value.is_null()) || (self.allow_blank && is_blank(value))
    }
}
