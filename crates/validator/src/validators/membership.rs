//! Membership validators: inclusion and exclusion.
//!
//! A [`MembershipValidator`] checks an attribute's value against a reference
//! collection. The collection is either fixed at configuration time or
//! produced by a callback on every validation call.
//!
//! # Examples
//!
//! ```rust
//! use serde_json::json;
//! use verity_validator::foundation::{EachValidator, ValidationErrors};
//! use verity_validator::validators::{exclusion_of, inclusion_of};
//!
//! let color = inclusion_of(["color"])
//!     .in_collection(vec!["red".to_owned(), "green".to_owned(), "blue".to_owned()]);
//! let subdomain = exclusion_of(["subdomain"]).in_collection(vec![json!("www"), json!("admin")]);
//!
//! let record = json!({ "color": "purple", "subdomain": "www" });
//! let mut errors = ValidationErrors::new();
//! color.validate(&record, &mut errors)?;
//! subdomain.validate(&record, &mut errors)?;
//!
//! assert_eq!(
//!     errors.full_messages(),
//!     vec!["color is not included in the list", "subdomain is reserved"],
//! );
//! # Ok::<(), verity_validator::foundation::ValidatorError>(())
//! ```

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::collection::{Collection, SharedCollection};
use crate::foundation::{
    BoxError, EachValidator, ValidationError, ValidationErrors, ValidatorError, ValidatorOptions,
};
use crate::record::ReadAttribute;

/// A zero-argument callback producing the reference collection.
pub type CollectionBlock<T> =
    Arc<dyn Fn() -> Result<SharedCollection<T>, BoxError> + Send + Sync>;

// ============================================================================
// MODE
// ============================================================================

/// Whether a value must be in the collection or must stay out of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Membership {
    /// The value must be one of the collection's elements.
    #[default]
    Inclusion,
    /// The value must not be one of the collection's elements.
    Exclusion,
}

impl Membership {
    /// Name of the rule, also its default error code.
    pub const fn kind(self) -> &'static str {
        match self {
            Self::Inclusion => "inclusion",
            Self::Exclusion => "exclusion",
        }
    }

    /// Message recorded when no custom message is configured.
    pub const fn default_message(self) -> &'static str {
        match self {
            Self::Inclusion => "is not included in the list",
            Self::Exclusion => "is reserved",
        }
    }

    /// Whether a value with the given membership passes.
    pub const fn accepts(self, is_member: bool) -> bool {
        match self {
            Self::Inclusion => is_member,
            Self::Exclusion => !is_member,
        }
    }
}

impl fmt::Display for Membership {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.kind())
    }
}

// ============================================================================
// MEMBERSHIP VALIDATOR
// ============================================================================

/// Checks attribute values against a static collection or a collection
/// callback.
///
/// When both are configured the callback wins and the static collection is
/// never consulted. With neither, validation fails fast with
/// [`ValidatorError::Configuration`].
///
/// The callback runs on every validation call unless [`memoize`] is set, in
/// which case its first successful result is kept for the validator's
/// lifetime.
///
/// Attribute values are converted to `T` through serde. A value that does not
/// convert is not a member.
///
/// [`memoize`]: MembershipValidator::memoize
pub struct MembershipValidator<T> {
    mode: Membership,
    attributes: Vec<String>,
    options: ValidatorOptions,
    collection: Option<SharedCollection<T>>,
    collection_block: Option<CollectionBlock<T>>,
    memoize: bool,
    memo: RwLock<Option<SharedCollection<T>>>,
}

impl<T: 'static> MembershipValidator<T> {
    /// Creates a validator for `attributes` with no membership source yet.
    pub fn new<I, S>(mode: Membership, attributes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            mode,
            attributes: attributes.into_iter().map(Into::into).collect(),
            options: ValidatorOptions::default(),
            collection: None,
            collection_block: None,
            memoize: false,
            memo: RwLock::new(None),
        }
    }

    /// Sets the static collection.
    #[must_use = "builder methods must be chained or built"]
    pub fn in_collection<C>(self, collection: C) -> Self
    where
        C: Collection<T> + 'static,
    {
        self.in_shared(Arc::new(collection))
    }

    /// Alias of [`in_collection`](Self::in_collection).
    #[must_use = "builder methods must be chained or built"]
    pub fn within<C>(self, collection: C) -> Self
    where
        C: Collection<T> + 'static,
    {
        self.in_collection(collection)
    }

    /// Sets a static collection already shared with other validators.
    #[must_use = "builder methods must be chained or built"]
    pub fn in_shared(mut self, collection: SharedCollection<T>) -> Self {
        self.collection = Some(collection);
        self
    }

    /// Sets an infallible collection callback.
    #[must_use = "builder methods must be chained or built"]
    pub fn in_fn<F, C>(self, block: F) -> Self
    where
        F: Fn() -> C + Send + Sync + 'static,
        C: Collection<T> + 'static,
    {
        self.try_in_fn(move || Ok::<_, BoxError>(block()))
    }

    /// Sets a fallible collection callback. Its error is returned from
    /// validation as [`ValidatorError::Callback`].
    #[must_use = "builder methods must be chained or built"]
    pub fn try_in_fn<F, C, E>(mut self, block: F) -> Self
    where
        F: Fn() -> Result<C, E> + Send + Sync + 'static,
        C: Collection<T> + 'static,
        E: Into<BoxError> + 'static,
    {
        self.collection_block = Some(Arc::new(move || {
            block()
                .map(|collection| Arc::new(collection) as SharedCollection<T>)
                .map_err(Into::into)
        }));
        *self.memo.get_mut() = None;
        self
    }

    /// Keeps the first successful callback result instead of calling the
    /// callback again.
    #[must_use = "builder methods must be chained or built"]
    pub fn memoize(mut self) -> Self {
        self.memoize = true;
        self
    }

    /// Skips `null` and missing values.
    #[must_use = "builder methods must be chained or built"]
    pub fn allow_nil(mut self) -> Self {
        self.options.allow_nil = true;
        self
    }

    /// Skips blank values.
    #[must_use = "builder methods must be chained or built"]
    pub fn allow_blank(mut self) -> Self {
        self.options.allow_blank = true;
        self
    }

    /// Replaces the default message.
    #[must_use = "builder methods must be chained or built"]
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.options.message = Some(message.into());
        self
    }

    /// Replaces the default error code.
    #[must_use = "builder methods must be chained or built"]
    pub fn code(mut self, code: impl Into<String>) -> Self {
        self.options.code = Some(code.into());
        self
    }

    /// Replaces all options at once.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_options(mut self, options: ValidatorOptions) -> Self {
        self.options = options;
        self
    }

    /// Returns the mode.
    pub fn mode(&self) -> Membership {
        self.mode
    }

    /// Returns the static collection, if configured.
    pub fn collection(&self) -> Option<&SharedCollection<T>> {
        self.collection.as_ref()
    }

    /// Returns true if a collection callback is configured.
    pub fn has_collection_block(&self) -> bool {
        self.collection_block.is_some()
    }

    /// Resolves the collection to test against for this call.
    ///
    /// The callback, when set, is the only source consulted.
    pub fn resolve(&self, attribute: &str) -> Result<SharedCollection<T>, ValidatorError> {
        if let Some(block) = &self.collection_block {
            if self.memoize
                && let Some(memoized) = self.memo.read().as_ref()
            {
                return Ok(Arc::clone(memoized));
            }

            tracing::debug!(validator = self.mode.kind(), attribute, "invoking collection callback");
            let resolved = block().map_err(|source| ValidatorError::Callback {
                attribute: attribute.to_owned(),
                source,
            })?;

            if self.memoize {
                *self.memo.write() = Some(Arc::clone(&resolved));
            }
            return Ok(resolved);
        }

        self.collection
            .as_ref()
            .map(Arc::clone)
            .ok_or_else(|| self.configuration_error())
    }

    /// Returns whether `value` passes this rule for `attribute`.
    ///
    /// Typed counterpart of [`EachValidator::validate_attribute`]: no record
    /// is read and nothing is recorded.
    pub fn permits(&self, attribute: &str, value: &T) -> Result<bool, ValidatorError> {
        if !self.is_configured() {
            return Err(self.configuration_error());
        }
        let collection = self.resolve(attribute)?;
        Ok(self.mode.accepts(collection.contains_value(value)))
    }

    /// Builds the failure recorded for `attribute` holding `value`.
    pub fn failure(&self, attribute: &str, value: &Value) -> ValidationError {
        let code = self
            .options
            .code
            .clone()
            .map_or(Cow::Borrowed(self.mode.kind()), Cow::Owned);
        let message = self
            .options
            .message
            .clone()
            .map_or(Cow::Borrowed(self.mode.default_message()), Cow::Owned);

        ValidationError::new(code, message)
            .with_field(attribute.to_owned())
            .with_param("value", value.to_string())
    }

    fn is_configured(&self) -> bool {
        self.collection.is_some() || self.collection_block.is_some()
    }

    fn configuration_error(&self) -> ValidatorError {
        ValidatorError::Configuration {
            validator: self.mode.kind(),
            attributes: self.attributes.clone(),
        }
    }
}

impl<T, M> EachValidator<M> for MembershipValidator<T>
where
    T: DeserializeOwned + 'static,
    M: ReadAttribute + ?Sized,
{
    fn kind(&self) -> &'static str {
        self.mode.kind()
    }

    fn attributes(&self) -> &[String] {
        &self.attributes
    }

    fn options(&self) -> &ValidatorOptions {
        &self.options
    }

    fn check_validity(&self) -> Result<(), ValidatorError> {
        if self.is_configured() {
            Ok(())
        } else {
            Err(self.configuration_error())
        }
    }

    fn validate_each(
        &self,
        _record: &M,
        attribute: &str,
        value: &Value,
        errors: &mut ValidationErrors,
    ) -> Result<(), ValidatorError> {
        let collection = self.resolve(attribute)?;

        let is_member = match T::deserialize(value) {
            Ok(candidate) => collection.contains_value(&candidate),
            Err(err) => {
                tracing::trace!(
                    validator = self.mode.kind(),
                    attribute,
                    error = %err,
                    "value does not convert to the collection's element type"
                );
                false
            }
        };

        if !self.mode.accepts(is_member) {
            tracing::debug!(validator = self.mode.kind(), attribute, %value, "membership check failed");
            errors.add(self.failure(attribute, value));
        }
        Ok(())
    }
}

impl<T> Clone for MembershipValidator<T> {
    fn clone(&self) -> Self {
        Self {
            mode: self.mode,
            attributes: self.attributes.clone(),
            options: self.options.clone(),
            collection: self.collection.clone(),
            collection_block: self.collection_block.clone(),
            memoize: self.memoize,
            memo: RwLock::new(self.memo.read().clone()),
        }
    }
}

impl<T> fmt::Debug for MembershipValidator<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MembershipValidator")
            .field("mode", &self.mode)
            .field("attributes", &self.attributes)
            .field("options", &self.options)
            .field(
                "collection",
                &self.collection.as_ref().map(|_| "<collection>"),
            )
            .field(
                "collection_block",
                &self.collection_block.as_ref().map(|_| "<function>"),
            )
            .field("memoize", &self.memoize)
            .finish()
    }
}

// ============================================================================
// HELPER FUNCTIONS
// ============================================================================

/// Creates an inclusion validator for `attributes`.
pub fn inclusion_of<T: 'static, I, S>(attributes: I) -> MembershipValidator<T>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    MembershipValidator::new(Membership::Inclusion, attributes)
}

/// Creates an exclusion validator for `attributes`.
pub fn exclusion_of<T: 'static, I, S>(attributes: I) -> MembershipValidator<T>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    MembershipValidator::new(Membership::Exclusion, attributes)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::collections::HashSet;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn colors() -> Vec<String> {
        vec!["red".into(), "green".into(), "blue".into()]
    }

    fn run<V: EachValidator<Value>>(validator: &V, record: &Value) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        validator.validate(record, &mut errors).unwrap();
        errors
    }

    #[test]
    fn test_member_passes() {
        let validator = inclusion_of(["color"]).in_collection(colors());
        assert!(run(&validator, &json!({"color": "green"})).is_empty());
    }

    #[test]
    fn test_non_member_records_one_failure() {
        let validator = inclusion_of(["color"]).in_collection(colors());
        let errors = run(&validator, &json!({"color": "purple"}));

        assert_eq!(errors.len(), 1);
        let error = &errors.errors()[0];
        assert_eq!(error.code, "inclusion");
        assert_eq!(error.message, "is not included in the list");
        assert_eq!(error.field.as_deref(), Some("color"));
        assert_eq!(error.param("value"), Some("\"purple\""));
    }

    #[test]
    fn test_exclusion() {
        let validator = exclusion_of(["subdomain"]).in_collection(vec![json!("www"), json!("admin")]);

        assert!(run(&validator, &json!({"subdomain": "shop"})).is_empty());

        let errors = run(&validator, &json!({"subdomain": "www"}));
        assert_eq!(errors.full_messages(), vec!["subdomain is reserved"]);
        assert_eq!(errors.errors()[0].code, "exclusion");
    }

    #[test]
    fn test_callback_result_is_used() {
        let validator = inclusion_of(["color"]).in_fn(|| vec!["red".to_owned()]);
        assert!(run(&validator, &json!({"color": "red"})).is_empty());
        assert_eq!(run(&validator, &json!({"color": "green"})).len(), 1);
    }

    #[test]
    fn test_callback_takes_precedence_over_collection() {
        let validator = inclusion_of(["color"])
            .in_collection(colors())
            .in_fn(|| vec!["purple".to_owned()]);

        assert!(run(&validator, &json!({"color": "purple"})).is_empty());
        assert_eq!(run(&validator, &json!({"color": "red"})).len(), 1);
    }

    #[test]
    fn test_callback_runs_on_every_call() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let validator = inclusion_of(["color"]).in_fn(move || {
            counter.fetch_add(1, Ordering::SeqCst);
            vec!["red".to_owned()]
        });

        run(&validator, &json!({"color": "red"}));
        run(&validator, &json!({"color": "red"}));

        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_memoized_callback_runs_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let validator = inclusion_of(["color"])
            .in_fn(move || {
                counter.fetch_add(1, Ordering::SeqCst);
                vec!["red".to_owned()]
            })
            .memoize();

        run(&validator, &json!({"color": "red"}));
        run(&validator, &json!({"color": "blue"}));

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_unconfigured_validator_fails_fast() {
        let validator: MembershipValidator<String> = inclusion_of(["color"]);
        let mut errors = ValidationErrors::new();

        let err = EachValidator::<Value>::validate(&validator, &json!({"color": "red"}), &mut errors)
            .unwrap_err();

        assert!(err.is_configuration());
        assert!(errors.is_empty());
    }

    #[test]
    fn test_unconfigured_validator_fails_even_when_value_is_skipped() {
        let validator: MembershipValidator<String> = inclusion_of(["color"]).allow_nil();
        let mut errors = ValidationErrors::new();

        let err = EachValidator::<Value>::validate(&validator, &json!({}), &mut errors).unwrap_err();
        assert!(err.is_configuration());
    }

    #[derive(Debug, thiserror::Error)]
    #[error("palette service unavailable")]
    struct PaletteDown;

    #[test]
    fn test_callback_error_is_propagated_unmodified() {
        let validator = inclusion_of(["color"]).try_in_fn(|| Err::<Vec<String>, _>(PaletteDown));
        let mut errors = ValidationErrors::new();

        let err = EachValidator::<Value>::validate(&validator, &json!({"color": "red"}), &mut errors)
            .unwrap_err();

        assert!(err.is_callback());
        let source = std::error::Error::source(&err).unwrap();
        assert!(source.downcast_ref::<PaletteDown>().is_some());
        assert!(errors.is_empty());
    }

    #[test]
    fn test_failed_callback_is_not_memoized() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let validator = inclusion_of(["color"])
            .try_in_fn(move || {
                if counter.fetch_add(1, Ordering::SeqCst) == 0 {
                    Err(PaletteDown)
                } else {
                    Ok(vec!["red".to_owned()])
                }
            })
            .memoize();
        let mut errors = ValidationErrors::new();

        assert!(EachValidator::<Value>::validate(&validator, &json!({"color": "red"}), &mut errors).is_err());
        assert!(EachValidator::<Value>::validate(&validator, &json!({"color": "red"}), &mut errors).is_ok());
        assert!(errors.is_empty());
    }

    #[test]
    fn test_allow_nil_and_allow_blank() {
        let strict = inclusion_of(["color"]).in_collection(colors());
        assert_eq!(run(&strict, &json!({})).len(), 1);

        let allow_nil = inclusion_of(["color"]).in_collection(colors()).allow_nil();
        assert!(run(&allow_nil, &json!({})).is_empty());
        assert!(run(&allow_nil, &json!({"color": null})).is_empty());
        assert_eq!(run(&allow_nil, &json!({"color": ""})).len(), 1);

        let allow_blank = inclusion_of(["color"]).in_collection(colors()).allow_blank();
        assert!(run(&allow_blank, &json!({"color": " "})).is_empty());
    }

    #[test]
    fn test_custom_message_and_code() {
        let validator = inclusion_of(["plan"])
            .in_collection(vec![json!("free"), json!("pro")])
            .message("is not a plan we sell")
            .code("unknown_plan");

        let errors = run(&validator, &json!({"plan": "gold"}));
        assert_eq!(errors.errors()[0].code, "unknown_plan");
        assert_eq!(errors.full_messages(), vec!["plan is not a plan we sell"]);
    }

    #[test]
    fn test_typed_collections() {
        let sizes: HashSet<u8> = [1, 2, 3].into_iter().collect();
        let validator = inclusion_of(["size"]).in_collection(sizes);
        assert!(run(&validator, &json!({"size": 2})).is_empty());
        assert_eq!(run(&validator, &json!({"size": 7})).len(), 1);

        let adult = inclusion_of(["age"]).in_collection(18_u32..=130);
        assert!(run(&adult, &json!({"age": 18})).is_empty());
        assert_eq!(run(&adult, &json!({"age": 17})).len(), 1);
    }

    #[test]
    fn test_unconvertible_value_is_not_a_member() {
        let inclusion = inclusion_of(["size"]).in_collection(vec![1_u8, 2]);
        assert_eq!(run(&inclusion, &json!({"size": "two"})).len(), 1);

        let exclusion = exclusion_of(["size"]).in_collection(vec![1_u8, 2]);
        assert!(run(&exclusion, &json!({"size": "two"})).is_empty());
    }

    #[test]
    fn test_multiple_attributes() {
        let validator = inclusion_of(["primary", "secondary"]).in_collection(colors());
        let errors = run(&validator, &json!({"primary": "red", "secondary": "teal"}));

        assert_eq!(errors.count_on("primary"), 0);
        assert_eq!(errors.count_on("secondary"), 1);
    }

    #[test]
    fn test_validate_single_attribute() {
        let validator = inclusion_of(["primary", "secondary"]).in_collection(colors());
        let mut errors = ValidationErrors::new();

        validator
            .validate_attribute(&json!({"primary": "teal"}), "primary", &mut errors)
            .unwrap();

        assert_eq!(errors.count_on("primary"), 1);
        assert_eq!(errors.count_on("secondary"), 0);
    }

    #[test]
    fn test_permits() {
        let validator = inclusion_of(["color"]).in_collection(colors());
        assert!(validator.permits("color", &"red".to_owned()).unwrap());
        assert!(!validator.permits("color", &"teal".to_owned()).unwrap());

        let unconfigured: MembershipValidator<String> = exclusion_of(["color"]);
        assert!(unconfigured.permits("color", &"red".to_owned()).unwrap_err().is_configuration());
    }

    #[test]
    fn test_shared_collection_between_validators() {
        let palette: SharedCollection<String> = Arc::new(colors());
        let primary = inclusion_of(["primary"]).in_shared(Arc::clone(&palette));
        let secondary = inclusion_of(["secondary"]).in_shared(palette);

        assert!(run(&primary, &json!({"primary": "red"})).is_empty());
        assert!(run(&secondary, &json!({"secondary": "blue"})).is_empty());
    }

    #[test]
    fn test_debug_hides_functions() {
        let validator = inclusion_of(["color"]).in_fn(colors);
        let debug = format!("{validator:?}");
        assert!(debug.contains("MembershipValidator"));
        assert!(debug.contains("<function>"));
    }

    #[test]
    fn test_mode_serde() {
        assert_eq!(serde_json::to_value(Membership::Exclusion).unwrap(), json!("exclusion"));
        assert_eq!(
            serde_json::from_value::<Membership>(json!("inclusion")).unwrap(),
            Membership::Inclusion
        );
        assert_eq!(Membership::Exclusion.to_string(), "exclusion");
    }
}
