//! Prelude module for convenient imports.
//!
//! ```rust
//! use verity_validator::prelude::*;
//! ```

// ============================================================================
// FOUNDATION: Core traits, errors, options
// ============================================================================

pub use crate::foundation::{
    BoxError, EachValidator, PassResult, ValidationError, ValidationErrors,
    ValidatorError, ValidatorOptions,
};

// ============================================================================
// RECORDS AND COLLECTIONS
// ============================================================================

pub use crate::collection::{Collection, SharedCollection};
pub use crate::record::{ReadAttribute, Snapshot, is_blank};

// ============================================================================
// VALIDATORS
// ============================================================================

pub use crate::rules::MembershipRule;
pub use crate::validations::Validations;
pub use crate::validators::{Membership, MembershipValidator, exclusion_of, inclusion_of};
