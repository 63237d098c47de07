//! Rules, rule context and rule sets.

use async_trait::async_trait;
use regex_lite::Regex;
use serde_json::{Map, Value};
use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

/// Object-level context shared by every rule in one validation call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleContext {
    /// Whether the candidate is a new entry rather than an edit.
    pub creating: bool,
    /// Keys already present in the collection the candidate belongs to.
    pub existing_keys: BTreeSet<String>,
    /// Key of the entry being edited; `None` on create.
    pub original_key: Option<String>,
}

impl RuleContext {
    /// Context for a form that does not belong to a collection.
    pub fn standalone() -> Self {
        Self::default()
    }

    /// Context for a new entry joining a collection with `existing_keys`.
    pub fn for_create(existing_keys: impl IntoIterator<Item = String>) -> Self {
        Self {
            creating: true,
            existing_keys: existing_keys.into_iter().collect(),
            original_key: None,
        }
    }

    /// Context for an edit of the entry stored under `original_key`.
    pub fn for_edit(
        original_key: impl Into<String>,
        existing_keys: impl IntoIterator<Item = String>,
    ) -> Self {
        Self {
            creating: false,
            existing_keys: existing_keys.into_iter().collect(),
            original_key: Some(original_key.into()),
        }
    }

    pub fn key_exists(&self, key: &str) -> bool {
        self.existing_keys.contains(key)
    }

    /// Whether `key` belongs to some entry other than the one being edited.
    pub fn key_taken(&self, key: &str) -> bool {
        self.key_exists(key) && self.original_key.as_deref() != Some(key)
    }
}

/// What a rule sees when it runs.
#[derive(Debug, Clone, Copy)]
pub struct FieldInput<'a> {
    /// Name of the field being checked.
    pub field: &'a str,
    /// The field's value; `Value::Null` when absent.
    pub value: &'a Value,
    /// The whole candidate, for rules that depend on sibling fields.
    pub candidate: &'a Map<String, Value>,
    pub context: &'a RuleContext,
}

impl FieldInput<'_> {
    /// The value as a string, if it is one.
    pub fn as_str(&self) -> Option<&str> {
        self.value.as_str()
    }

    /// Absent, null, or the empty string.
    pub fn is_blank(&self) -> bool {
        match self.value {
            Value::Null => true,
            Value::String(s) => s.is_empty(),
            _ => false,
        }
    }
}

/// A single check against one field.
///
/// Rules return `Err(message)` with a human-readable message on failure.
/// Checks may await, but the adapter only reports once every field is done.
#[async_trait]
pub trait FieldRule: Send + Sync {
    async fn check(&self, input: &FieldInput<'_>) -> Result<(), String>;
}

/// Shared, type-erased rule.
pub type Rule = Arc<dyn FieldRule>;

struct FnRule<F>(F);

#[async_trait]
impl<F> FieldRule for FnRule<F>
where
    F: Fn(&FieldInput<'_>) -> Result<(), String> + Send + Sync,
{
    async fn check(&self, input: &FieldInput<'_>) -> Result<(), String> {
        (self.0)(input)
    }
}

/// Wraps a synchronous check as a rule.
pub fn rule_fn<F>(check: F) -> Rule
where
    F: Fn(&FieldInput<'_>) -> Result<(), String> + Send + Sync + 'static,
{
    Arc::new(FnRule(check))
}

/// Rejects absent, null and empty-string values.
pub fn required(message: impl Into<String>) -> Rule {
    let message = message.into();
    rule_fn(move |input| {
        if input.is_blank() {
            Err(message.clone())
        } else {
            Ok(())
        }
    })
}

/// Rejects strings longer than `max` characters. Blank values pass.
pub fn max_length(max: usize, message: impl Into<String>) -> Rule {
    length_between(0, max, message)
}

/// Rejects strings whose character count is outside `min..=max`. Blank
/// values pass; presence is the job of [`required`].
pub fn length_between(min: usize, max: usize, message: impl Into<String>) -> Rule {
    let message = message.into();
    rule_fn(move |input| match input.as_str() {
        Some(s) if !s.is_empty() => {
            let len = s.chars().count();
            if len < min || len > max {
                Err(message.clone())
            } else {
                Ok(())
            }
        }
        _ => Ok(()),
    })
}

/// Rejects strings not matching `regex`. Blank values pass.
pub fn pattern(regex: Regex, message: impl Into<String>) -> Rule {
    let message = message.into();
    rule_fn(move |input| {
        if input.is_blank() {
            return Ok(());
        }
        match input.as_str() {
            Some(s) if regex.is_match(s) => Ok(()),
            _ => Err(message.clone()),
        }
    })
}

/// Rejects a key owned by another entry of the collection. An edit may
/// keep its own key.
pub fn unique_key(message: impl Into<String>) -> Rule {
    let message = message.into();
    rule_fn(move |input| match input.as_str() {
        Some(key) if input.context.key_taken(key) => Err(message.clone()),
        _ => Ok(()),
    })
}

/// Applies `rule` only when `condition` holds for the candidate.
pub fn when<C>(condition: C, rule: Rule) -> Rule
where
    C: Fn(&Map<String, Value>) -> bool + Send + Sync + 'static,
{
    Arc::new(When { condition, rule })
}

struct When<C> {
    condition: C,
    rule: Rule,
}

#[async_trait]
impl<C> FieldRule for When<C>
where
    C: Fn(&Map<String, Value>) -> bool + Send + Sync,
{
    async fn check(&self, input: &FieldInput<'_>) -> Result<(), String> {
        if (self.condition)(input.candidate) {
            self.rule.check(input).await
        } else {
            Ok(())
        }
    }
}

/// Field name to ordered rules, in declaration order.
#[derive(Clone, Default)]
pub struct RuleSet {
    fields: Vec<(String, Vec<Rule>)>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares rules for `name`. Declaring the same field again appends to
    /// its rules.
    #[must_use]
    pub fn field(mut self, name: impl Into<String>, rules: impl IntoIterator<Item = Rule>) -> Self {
        let name = name.into();
        match self.fields.iter_mut().find(|(field, _)| *field == name) {
            Some((_, existing)) => existing.extend(rules),
            None => self.fields.push((name, rules.into_iter().collect())),
        }
        self
    }

    /// Fields and their rules in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &[Rule])> {
        self.fields
            .iter()
            .map(|(name, rules)| (name.as_str(), rules.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl fmt::Debug for RuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.fields.iter().map(|(name, rules)| (name, rules.len())))
            .finish()
    }
}
