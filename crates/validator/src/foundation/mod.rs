//! Core validation types and traits
//!
//! - **Traits**: [`EachValidator`]
//! - **Errors**: [`ValidationError`], [`ValidationErrors`], [`ValidatorError`]
//! - **Options**: [`ValidatorOptions`]
//!
//! # Architecture
//!
//! A validation pass reads one attribute at a time off a record, checks it,
//! and appends failures to an error report owned by the caller:
//!
//! ```rust
//! use serde_json::json;
//! use verity_validator::foundation::{EachValidator, ValidationErrors};
//! use verity_validator::validators::inclusion_of;
//!
//! let rule = inclusion_of(["color"]).in_collection(vec![json!("red"), json!("green")]);
//!
//! let mut errors = ValidationErrors::new();
//! rule.validate(&json!({"color": "purple"}), &mut errors)?;
//! assert_eq!(errors.count_on("color"), 1);
//! # Ok::<(), verity_validator::foundation::ValidatorError>(())
//! ```
//!
//! Recorded failures and fatal errors are kept apart: a value outside the
//! list is a [`ValidationError`] in the report, while a validator that cannot
//! run returns [`ValidatorError`] and stops the pass.

pub mod error;
pub mod options;
pub mod traits;

pub use error::{BoxError, ValidationError, ValidationErrors, ValidatorError};
pub use options::ValidatorOptions;
pub use traits::EachValidator;

/// Result of a validation pass: the error report, or a fatal error.
pub type PassResult = Result<ValidationErrors, ValidatorError>;
