//! The validation adapter: runs a rule set against a candidate object.

use crate::error::{FieldErrorMap, ValidationError, ValidationResult};
use crate::rule::{FieldInput, RuleContext, RuleSet};
use futures::future::join_all;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::collections::BTreeSet;
use tracing::debug;

static ABSENT: Value = Value::Null;

/// Options for a single validation call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidateOptions {
    /// Only check these fields. `None` checks every field in the rule set.
    pub fields: Option<BTreeSet<String>>,
    /// Report only the first failing field, in rule-set order.
    pub first: bool,
}

impl ValidateOptions {
    /// Restricts validation to `fields`.
    pub fn only<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            fields: Some(fields.into_iter().map(Into::into).collect()),
            first: false,
        }
    }

    fn includes(&self, field: &str) -> bool {
        self.fields.as_ref().is_none_or(|fields| fields.contains(field))
    }
}

/// Validates `candidate` against `rules` and decodes it as `T`.
///
/// Every selected field is checked; within a field, rules run in declared
/// order and stop at the first failure. Fields are checked concurrently and
/// the call resolves only once all of them are done. Resolves to
/// [`ValidationError::Failed`] listing every failing field (or only the
/// first one with [`ValidateOptions::first`]).
pub async fn validate<T: DeserializeOwned>(
    rules: &RuleSet,
    candidate: &Value,
    context: &RuleContext,
    options: &ValidateOptions,
) -> ValidationResult<T> {
    let object = candidate
        .as_object()
        .ok_or_else(|| ValidationError::Malformed("candidate must be an object".to_string()))?;

    let errors = check_fields(rules, object, context, options).await;
    if !errors.is_empty() {
        debug!(fields = ?errors.keys().collect::<Vec<_>>(), "validation failed");
        return Err(ValidationError::Failed(errors));
    }

    serde_json::from_value(candidate.clone()).map_err(|e| ValidationError::Malformed(e.to_string()))
}

/// Runs the rules and returns the field errors without decoding.
pub async fn check_fields(
    rules: &RuleSet,
    object: &Map<String, Value>,
    context: &RuleContext,
    options: &ValidateOptions,
) -> FieldErrorMap {
    let checks = rules
        .fields()
        .filter(|(name, _)| options.includes(name))
        .map(|(name, field_rules)| async move {
            let input = FieldInput {
                field: name,
                value: object.get(name).unwrap_or(&ABSENT),
                candidate: object,
                context,
            };
            for rule in field_rules {
                if let Err(message) = rule.check(&input).await {
                    return Some((name.to_string(), message));
                }
            }
            None
        });

    let mut failures = join_all(checks).await.into_iter().flatten();
    if options.first {
        failures.next().into_iter().collect()
    } else {
        failures.collect()
    }
}
