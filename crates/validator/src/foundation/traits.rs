//! Core traits for the validation system
//!
//! An attribute validator is configured once, with a list of attributes and a
//! set of [`ValidatorOptions`], and then run against many records.

use serde_json::Value;

use crate::foundation::{ValidationErrors, ValidatorError, ValidatorOptions};
use crate::record::ReadAttribute;

// ============================================================================
// CORE VALIDATOR TRAIT
// ============================================================================

/// A rule checked against each of its attributes in turn.
///
/// Implementors supply [`validate_each`](EachValidator::validate_each); the
/// provided methods read the attribute, honor `allow_nil` / `allow_blank`,
/// and dispatch.
///
/// Failures are appended to the caller's [`ValidationErrors`]. An `Err`
/// return means the validator could not run at all and the pass must stop.
///
/// # Examples
///
/// ```rust
/// use serde_json::{Value, json};
/// use verity_validator::foundation::{
///     EachValidator, ValidationError, ValidationErrors, ValidatorError, ValidatorOptions,
/// };
/// use verity_validator::record::ReadAttribute;
///
/// struct Present {
///     attributes: Vec<String>,
///     options: ValidatorOptions,
/// }
///
/// impl<M: ReadAttribute + ?Sized> EachValidator<M> for Present {
///     fn kind(&self) -> &'static str {
///         "presence"
///     }
///
///     fn attributes(&self) -> &[String] {
///         &self.attributes
///     }
///
///     fn options(&self) -> &ValidatorOptions {
///         &self.options
///     }
///
///     fn validate_each(
///         &self,
///         _record: &M,
///         attribute: &str,
///         value: &Value,
///         errors: &mut ValidationErrors,
///     ) -> Result<(), ValidatorError> {
///         if value.is_null() {
///             errors.add(ValidationError::new("blank", "can't be blank").with_field(attribute.to_owned()));
///         }
///         Ok(())
///     }
/// }
///
/// let rule = Present { attributes: vec!["name".into()], options: ValidatorOptions::default() };
/// let mut errors = ValidationErrors::new();
/// rule.validate(&json!({}), &mut errors).unwrap();
/// assert_eq!(errors.count_on("name"), 1);
/// ```
pub trait EachValidator<M: ReadAttribute + ?Sized>: Send + Sync {
    /// Short name of the rule, used in logs and fatal errors.
    fn kind(&self) -> &'static str;

    /// Attributes this validator checks.
    fn attributes(&self) -> &[String];

    /// Options shared by every attribute.
    fn options(&self) -> &ValidatorOptions;

    /// Checks one attribute's current value.
    fn validate_each(
        &self,
        record: &M,
        attribute: &str,
        value: &Value,
        errors: &mut ValidationErrors,
    ) -> Result<(), ValidatorError>;

    /// Verifies the validator is usable before any attribute is read.
    fn check_validity(&self) -> Result<(), ValidatorError> {
        Ok(())
    }

    /// Reads `attribute` off `record` and checks it.
    ///
    /// A missing attribute reads as `null`.
    fn validate_attribute(
        &self,
        record: &M,
        attribute: &str,
        errors: &mut ValidationErrors,
    ) -> Result<(), ValidatorError> {
        self.check_validity()?;

        let value = record.read_attribute(attribute).unwrap_or(Value::Null);
        if self.options().skips(&value) {
            tracing::trace!(validator = self.kind(), attribute, "skipped by allow_nil/allow_blank");
            return Ok(());
        }

        self.validate_each(record, attribute, &value, errors)
    }

    /// Checks every configured attribute of `record`.
    fn validate(&self, record: &M, errors: &mut ValidationErrors) -> Result<(), ValidatorError> {
        self.check_validity()?;

        for attribute in self.attributes() {
            self.validate_attribute(record, attribute, errors)?;
        }
        Ok(())
    }
}

impl<M, V> EachValidator<M> for Box<V>
where
    M: ReadAttribute + ?Sized,
    V: EachValidator<M> + ?Sized,
{
    fn kind(&self) -> &'static str {
        (**self).kind()
    }

    fn attributes(&self) -> &[String] {
        (**self).attributes()
    }

    fn options(&self) -> &ValidatorOptions {
        (**self).options()
    }

    fn validate_each(
        &self,
        record: &M,
        attribute: &str,
        value: &Value,
        errors: &mut ValidationErrors,
    ) -> Result<(), ValidatorError> {
        (**self).validate_each(record, attribute, value, errors)
    }

    fn check_validity(&self) -> Result<(), ValidatorError> {
        (**self).check_validity()
    }

    fn validate_attribute(
        &self,
        record: &M,
        attribute: &str,
        errors: &mut ValidationErrors,
    ) -> Result<(), ValidatorError> {
        (**self).validate_attribute(record, attribute, errors)
    }

    fn validate(&self, record: &M, errors: &mut ValidationErrors) -> Result<(), ValidatorError> {
        (**self).validate(record, errors)
    }
}

// ============================================================================
// TESTS
// ============================================================================
