//! The validation set of one model type.
//!
//! A [`Validations`] is built once, typically next to the model definition,
//! and run against every record of that model.

use std::fmt;

use crate::foundation::{EachValidator, PassResult, ValidationErrors, ValidatorError};
use crate::record::ReadAttribute;

/// An ordered set of attribute validators for records of type `M`.
///
/// # Examples
///
/// ```rust
/// use serde_json::{Value, json};
/// use verity_validator::validations::Validations;
/// use verity_validator::validators::{exclusion_of, inclusion_of};
///
/// let validations = Validations::<Value>::new()
///     .with(inclusion_of(["color"]).in_collection(vec![json!("red"), json!("green")]))
///     .with(exclusion_of(["name"]).in_collection(vec![json!("admin")]));
///
/// let errors = validations.validate(&json!({"color": "teal", "name": "admin"}))?;
/// assert_eq!(errors.len(), 2);
/// assert!(validations.is_valid(&json!({"color": "red", "name": "ann"}))?);
/// # Ok::<(), verity_validator::foundation::ValidatorError>(())
/// ```
pub struct Validations<M: ReadAttribute + ?Sized> {
    validators: Vec<Box<dyn EachValidator<M>>>,
}

impl<M: ReadAttribute + ?Sized> Validations<M> {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self {
            validators: Vec::new(),
        }
    }

    /// Adds a validator.
    #[must_use = "builder methods must be chained or built"]
    pub fn with<V>(mut self, validator: V) -> Self
    where
        V: EachValidator<M> + 'static,
    {
        self.push(validator);
        self
    }

    /// Adds a validator in place.
    pub fn push<V>(&mut self, validator: V)
    where
        V: EachValidator<M> + 'static,
    {
        self.validators.push(Box::new(validator));
    }

    /// Number of validators.
    pub fn len(&self) -> usize {
        self.validators.len()
    }

    /// Returns true if no validators are configured.
    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }

    /// Runs every validator against `record`.
    ///
    /// Failures from all validators are collected into one report. The first
    /// fatal error stops the pass and is returned instead.
    #[tracing::instrument(level = "debug", skip_all, fields(validators = self.validators.len()))]
    pub fn validate(&self, record: &M) -> PassResult {
        let mut errors = ValidationErrors::new();
        self.validate_into(record, &mut errors)?;
        tracing::debug!(errors = errors.len(), "validation pass finished");
        Ok(errors)
    }

    /// Runs every validator against `record`, appending to `errors`.
    pub fn validate_into(
        &self,
        record: &M,
        errors: &mut ValidationErrors,
    ) -> Result<(), ValidatorError> {
        for validator in &self.validators {
            if let Err(err) = validator.validate(record, errors) {
                tracing::debug!(validator = validator.kind(), error = %err, "validation pass aborted");
                return Err(err);
            }
        }
        Ok(())
    }

    /// Runs only the validators that cover `attribute`, and only on it.
    pub fn validate_attribute(&self, record: &M, attribute: &str) -> PassResult {
        let mut errors = ValidationErrors::new();
        for validator in self
            .validators
            .iter()
            .filter(|v| v.attributes().iter().any(|a| a == attribute))
        {
            validator.validate_attribute(record, attribute, &mut errors)?;
        }
        Ok(errors)
    }

    /// Returns true when `record` passes every validator.
    pub fn is_valid(&self, record: &M) -> Result<bool, ValidatorError> {
        self.validate(record).map(|errors| errors.is_empty())
    }
}

impl<M: ReadAttribute + ?Sized> Default for Validations<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: ReadAttribute + ?Sized> fmt::Debug for Validations<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(
                self.validators
                    .iter()
                    .map(|v| (v.kind(), v.attributes())),
            )
            .finish()
    }
}

impl<M, V> Extend<V> for Validations<M>
where
    M: ReadAttribute + ?Sized,
    V: EachValidator<M> + 'static,
{
    fn extend<I: IntoIterator<Item = V>>(&mut self, iter: I) {
        for validator in iter {
            self.push(validator);
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
