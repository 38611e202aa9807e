//! Declarative membership rules.
//!
//! Rules can be kept in configuration files and loaded with any serde
//! format. Each rule becomes a [`MembershipValidator`] over
//! `serde_json::Value`.
//!
//! ```json
//! [
//!   { "attributes": ["color"], "in": ["red", "green", "blue"] },
//!   { "attributes": ["subdomain"], "mode": "exclusion", "in": ["www", "admin"],
//!     "message": "is not available" }
//! ]
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::foundation::ValidatorOptions;
use crate::record::ReadAttribute;
use crate::validations::Validations;
use crate::validators::{Membership, MembershipValidator};

/// One inclusion or exclusion rule.
///
/// `in` (alias `within`) is optional so that a rule without a collection
/// still loads; it fails with a configuration error when it is run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MembershipRule {
    /// Attributes the rule applies to.
    pub attributes: Vec<String>,

    /// Inclusion (default) or exclusion.
    #[serde(default)]
    pub mode: Membership,

    /// The static collection.
    #[serde(default, rename = "in", alias = "within", skip_serializing_if = "Option::is_none")]
    pub collection: Option<Vec<Value>>,

    #[serde(flatten)]
    pub options: ValidatorOptions,
}

impl MembershipRule {
    /// Builds the validator described by this rule.
    pub fn into_validator(self) -> MembershipValidator<Value> {
        let validator =
            MembershipValidator::new(self.mode, self.attributes).with_options(self.options);
        match self.collection {
            Some(collection) => validator.in_collection(collection),
            None => validator,
        }
    }
}

impl From<MembershipRule> for MembershipValidator<Value> {
    fn from(rule: MembershipRule) -> Self {
        rule.into_validator()
    }
}

impl<M: ReadAttribute + ?Sized> Validations<M> {
    /// Builds a validation set from declarative rules, in order.
    pub fn from_rules<I>(rules: I) -> Self
    where
        I: IntoIterator<Item = MembershipRule>,
    {
        let mut validations = Self::new();
        validations.extend(rules.into_iter().map(MembershipRule::into_validator));
        tracing::debug!(validators = validations.len(), "loaded membership rules");
        validations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_minimal_rule_defaults() {
        let rule: MembershipRule =
            serde_json::from_value(json!({"attributes": ["color"], "in": ["red"]})).unwrap();

        assert_eq!(
            rule,
            MembershipRule {
                attributes: vec!["color".into()],
                mode: Membership::Inclusion,
                collection: Some(vec![json!("red")]),
                options: ValidatorOptions::default(),
            }
        );
    }

    #[test]
    fn test_full_rule() {
        let rule: MembershipRule = serde_json::from_value(json!({
            "attributes": ["subdomain"],
            "mode": "exclusion",
            "within": ["www"],
            "allow_blank": true,
            "message": "is not available",
            "code": "taken",
        }))
        .unwrap();

        assert_eq!(rule.mode, Membership::Exclusion);
        assert_eq!(rule.collection, Some(vec![json!("www")]));
        assert!(rule.options.allow_blank);
        assert_eq!(rule.options.message.as_deref(), Some("is not available"));
        assert_eq!(rule.options.code.as_deref(), Some("taken"));
    }

    #[test]
    fn test_rule_without_collection_is_a_configuration_error_at_run_time() {
        let rule: MembershipRule = serde_json::from_value(json!({"attributes": ["color"]})).unwrap();
        let validations = Validations::<Value>::from_rules([rule]);

        let err = validations.validate(&json!({"color": "red"})).unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_from_rules() {
        let rules: Vec<MembershipRule> = serde_json::from_value(json!([
            {"attributes": ["color"], "in": ["red", "green", "blue"]},
            {"attributes": ["subdomain"], "mode": "exclusion", "in": ["www"], "message": "is not available"},
        ]))
        .unwrap();

        let validations = Validations::<Value>::from_rules(rules);
        let errors = validations
            .validate(&json!({"color": "purple", "subdomain": "www"}))
            .unwrap();

        assert_eq!(
            errors.full_messages(),
            vec!["color is not included in the list", "subdomain is not available"]
        );
    }

    #[test]
    fn test_rule_round_trips_through_json() {
        let rule = MembershipRule {
            attributes: vec!["size".into()],
            mode: Membership::Exclusion,
            collection: None,
            options: ValidatorOptions {
                allow_nil: true,
                ..ValidatorOptions::default()
            },
        };

        assert_eq!(
            serde_json::to_value(&rule).unwrap(),
            json!({"attributes": ["size"], "mode": "exclusion", "allow_nil": true, "allow_blank": false})
        );
    }
}
