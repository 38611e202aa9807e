//! # verity-validator
//!
//! Declarative model validations with inclusion and exclusion rules.
//!
//! ## Quick Start
//!
//! ```rust
//! use serde_json::{Value, json};
//! use verity_validator::prelude::*;
//!
//! let validations = Validations::<Value>::new()
//!     .with(inclusion_of(["color"]).in_collection(vec![json!("red"), json!("green"), json!("blue")]))
//!     .with(exclusion_of(["subdomain"]).in_fn(|| vec![json!("www"), json!("admin")]));
//!
//! let errors = validations.validate(&json!({"color": "purple", "subdomain": "shop"}))?;
//! assert_eq!(errors.full_messages(), vec!["color is not included in the list"]);
//! # Ok::<(), ValidatorError>(())
//! ```
//!
//! ## Building Blocks
//!
//! - [`record::ReadAttribute`] reads one attribute off a record as a JSON value.
//! - [`collection::Collection`] is the membership test; `Vec`, arrays, slices,
//!   `HashSet`, `BTreeSet`, `IndexSet`, and ranges implement it.
//! - [`validators::MembershipValidator`] checks attributes against a static
//!   collection or a collection callback.
//! - [`validations::Validations`] runs a model's validators and collects the
//!   failures.
//! - [`rules::MembershipRule`] loads rules from configuration.

pub mod collection;
pub mod foundation;
pub mod prelude;
pub mod record;
pub mod rules;
pub mod validations;
pub mod validators;
