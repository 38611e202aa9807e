//! Built-in validators
//!
//! # Categories
//!
//! - **Membership**: [`inclusion_of`], [`exclusion_of`]
//!
//! # Examples
//!
//! ```rust
//! use serde_json::json;
//! use verity_validator::foundation::{EachValidator, ValidationErrors};
//! use verity_validator::validators::inclusion_of;
//!
//! let size = inclusion_of(["size"]).in_collection(["s".to_owned(), "m".to_owned(), "l".to_owned()]);
//!
//! let mut errors = ValidationErrors::new();
//! size.validate(&json!({"size": "xl"}), &mut errors)?;
//! assert_eq!(errors.count_on("size"), 1);
//! # Ok::<(), verity_validator::foundation::ValidatorError>(())
//! ```

pub mod membership;

// ============================================================================
// RE-EXPORTS: Membership validators
// ============================================================================

pub use membership::{
    CollectionBlock, Membership, MembershipValidator, exclusion_of, inclusion_of,
};
