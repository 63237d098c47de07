use async_trait::async_trait;
use devconsole_validate::{
    FieldInput, FieldRule, RuleContext, RuleSet, ValidateOptions, ValidationError, max_length,
    required, rule_fn, unique_key, validate, when,
};
use pretty_assertions::assert_eq;
use serde::Deserialize;
use serde_json::{Value, json};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

#[derive(Debug, Deserialize, PartialEq)]
struct Account {
    name: String,
    email: String,
}

fn account_rules() -> RuleSet {
    RuleSet::new()
        .field("name", [required("name is required"), max_length(8, "name too long")])
        .field("email", [required("email is required")])
}

fn errors(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

// ── Success ──────────────────────────────────────────────────────

#[tokio::test]
async fn valid_candidate_decodes_to_typed_value() {
    let candidate = json!({"name": "alice", "email": "a@example.com"});
    let account: Account = validate(
        &account_rules(),
        &candidate,
        &RuleContext::standalone(),
        &ValidateOptions::default(),
    )
    .await
    .unwrap();
    assert_eq!(
        account,
        Account {
            name: "alice".into(),
            email: "a@example.com".into()
        }
    );
}

#[tokio::test]
async fn empty_rule_set_accepts_anything_decodable() {
    let candidate = json!({"name": "x", "email": "y"});
    let result: Result<Account, _> = validate(
        &RuleSet::new(),
        &candidate,
        &RuleContext::standalone(),
        &ValidateOptions::default(),
    )
    .await;
    assert!(result.is_ok());
}

// ── Failure reporting ────────────────────────────────────────────

#[tokio::test]
async fn every_failing_field_is_reported() {
    let candidate = json!({"name": "", "email": ""});
    let err = validate::<Account>(
        &account_rules(),
        &candidate,
        &RuleContext::standalone(),
        &ValidateOptions::default(),
    )
    .await
    .unwrap_err();
    assert_eq!(
        err,
        ValidationError::Failed(errors(&[
            ("name", "name is required"),
            ("email", "email is required"),
        ]))
    );
}

#[tokio::test]
async fn first_failing_rule_wins_within_a_field() {
    let rules = RuleSet::new().field(
        "name",
        [
            max_length(2, "first message"),
            max_length(3, "second message"),
        ],
    );
    let candidate = json!({"name": "abcdef"});
    let found = devconsole_validate::check_fields(
        &rules,
        candidate.as_object().unwrap(),
        &RuleContext::standalone(),
        &ValidateOptions::default(),
    )
    .await;
    assert_eq!(found, errors(&[("name", "first message")]));
}

#[tokio::test]
async fn first_option_reports_only_earliest_declared_field() {
    let candidate = json!({});
    let err = validate::<Account>(
        &account_rules(),
        &candidate,
        &RuleContext::standalone(),
        &ValidateOptions {
            first: true,
            ..Default::default()
        },
    )
    .await
    .unwrap_err();
    assert_eq!(err.field_errors(), Some(&errors(&[("name", "name is required")])));
}

#[tokio::test]
async fn field_selection_skips_other_fields() {
    let candidate = json!({"name": "ok", "email": ""});
    let found = devconsole_validate::check_fields(
        &account_rules(),
        candidate.as_object().unwrap(),
        &RuleContext::standalone(),
        &ValidateOptions::only(["name"]),
    )
    .await;
    assert!(found.is_empty());
}

#[tokio::test]
async fn non_object_candidate_is_malformed() {
    let err = validate::<Account>(
        &account_rules(),
        &json!(["not", "an", "object"]),
        &RuleContext::standalone(),
        &ValidateOptions::default(),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, ValidationError::Malformed(_)));
    assert_eq!(err.field_errors(), None);
}

#[tokio::test]
async fn passing_rules_but_wrong_shape_is_malformed() {
    let candidate = json!({"name": "alice", "email": 5});
    let err = validate::<Account>(
        &RuleSet::new().field("name", [required("name is required")]),
        &candidate,
        &RuleContext::standalone(),
        &ValidateOptions::default(),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, ValidationError::Malformed(_)));
}

#[test]
fn failed_error_message_lists_fields() {
    let err = ValidationError::Failed(errors(&[("a", "bad a"), ("b", "bad b")]));
    assert_eq!(err.to_string(), "validation failed: a: bad a; b: bad b");
}

// ── Context-aware rules ──────────────────────────────────────────

#[tokio::test]
async fn unique_key_lets_an_edit_keep_its_own_key() {
    let rules = RuleSet::new().field("name", [unique_key("taken")]);
    let candidate = json!({"name": "alice"});
    let object = candidate.as_object().unwrap();
    let keys = vec!["alice".to_string(), "bob".to_string()];

    let on_create = devconsole_validate::check_fields(
        &rules,
        object,
        &RuleContext::for_create(keys.clone()),
        &ValidateOptions::default(),
    )
    .await;
    assert_eq!(on_create, errors(&[("name", "taken")]));

    let on_edit = devconsole_validate::check_fields(
        &rules,
        object,
        &RuleContext::for_edit("alice", keys.clone()),
        &ValidateOptions::default(),
    )
    .await;
    assert!(on_edit.is_empty());

    let renamed_onto_other = devconsole_validate::check_fields(
        &rules,
        object,
        &RuleContext::for_edit("bob", keys),
        &ValidateOptions::default(),
    )
    .await;
    assert_eq!(renamed_onto_other, errors(&[("name", "taken")]));
}

#[tokio::test]
async fn unique_key_is_case_sensitive() {
    let rules = RuleSet::new().field("name", [unique_key("taken")]);
    let candidate = json!({"name": "Alice"});
    let found = devconsole_validate::check_fields(
        &rules,
        candidate.as_object().unwrap(),
        &RuleContext::for_create(["alice".to_string()]),
        &ValidateOptions::default(),
    )
    .await;
    assert!(found.is_empty());
}

#[tokio::test]
async fn conditional_rule_reads_sibling_fields() {
    let rules = RuleSet::new().field(
        "detail",
        [when(
            |c| c.get("enabled") == Some(&Value::Bool(true)),
            required("detail needed"),
        )],
    );

    let off = json!({"enabled": false});
    let on = json!({"enabled": true});
    let ctx = RuleContext::standalone();
    let opts = ValidateOptions::default();

    assert!(
        devconsole_validate::check_fields(&rules, off.as_object().unwrap(), &ctx, &opts)
            .await
            .is_empty()
    );
    assert_eq!(
        devconsole_validate::check_fields(&rules, on.as_object().unwrap(), &ctx, &opts).await,
        errors(&[("detail", "detail needed")])
    );
}

#[tokio::test]
async fn custom_closure_rule() {
    let rules = RuleSet::new().field(
        "name",
        [rule_fn(|input| {
            if input.as_str() == Some("root") {
                Err("reserved".to_string())
            } else {
                Ok(())
            }
        })],
    );
    let candidate = json!({"name": "root"});
    let found = devconsole_validate::check_fields(
        &rules,
        candidate.as_object().unwrap(),
        &RuleContext::standalone(),
        &ValidateOptions::default(),
    )
    .await;
    assert_eq!(found, errors(&[("name", "reserved")]));
}

#[test]
fn redeclaring_a_field_appends_rules() {
    let rules = RuleSet::new()
        .field("name", [required("a")])
        .field("name", [max_length(1, "b")]);
    assert_eq!(rules.len(), 1);
    let (_, field_rules) = rules.fields().next().unwrap();
    assert_eq!(field_rules.len(), 2);
}

// ── Async rules ──────────────────────────────────────────────────

struct SlowReject {
    delay: Duration,
    calls: Arc<AtomicUsize>,
}

#[async_trait]
impl FieldRule for SlowReject {
    async fn check(&self, _input: &FieldInput<'_>) -> Result<(), String> {
        tokio::time::sleep(self.delay).await;
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err("slow check failed".to_string())
    }
}

#[tokio::test]
async fn async_rules_are_all_collected_before_resolving() {
    let calls = Arc::new(AtomicUsize::new(0));
    let rules = RuleSet::new()
        .field(
            "name",
            [Arc::new(SlowReject {
                delay: Duration::from_millis(20),
                calls: calls.clone(),
            }) as devconsole_validate::Rule],
        )
        .field(
            "email",
            [Arc::new(SlowReject {
                delay: Duration::from_millis(1),
                calls: calls.clone(),
            }) as devconsole_validate::Rule],
        );

    let err = validate::<Account>(
        &rules,
        &json!({"name": "x", "email": "y"}),
        &RuleContext::standalone(),
        &ValidateOptions::default(),
    )
    .await
    .unwrap_err();

    assert_eq!(calls.load(Ordering::SeqCst), 2);
    assert_eq!(err.field_errors().unwrap().len(), 2);
}

#[tokio::test]
async fn later_rules_in_a_failed_field_do_not_run() {
    let calls = Arc::new(AtomicUsize::new(0));
    let rules = RuleSet::new().field(
        "name",
        [
            required("name is required"),
            Arc::new(SlowReject {
                delay: Duration::from_millis(1),
                calls: calls.clone(),
            }) as devconsole_validate::Rule,
        ],
    );
    let candidate = json!({});
    let _ = devconsole_validate::check_fields(
        &rules,
        candidate.as_object().unwrap(),
        &RuleContext::standalone(),
        &ValidateOptions::default(),
    )
    .await;
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}
