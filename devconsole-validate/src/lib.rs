//! Field validation for the device console.
//!
//! A [`RuleSet`] maps field names to ordered [`FieldRule`]s. The
//! [`validate`] adapter runs every field's rules against a candidate JSON
//! object and resolves either to the decoded, fully-typed value or to a
//! [`FieldErrorMap`] naming every failing field.
//!
//! # Modules
//!
//! - **rule**: the rule trait, rule context and the generic rules
//!   (`required`, `max_length`, `pattern`, `unique_key`, `when`, ...)
//! - **format**: IP address and hostname syntax rules
//! - **forms**: the rule sets used by the console's forms
//!
//! # Example
//!
//! ```
//! use devconsole_validate::{RuleContext, RuleSet, ValidateOptions, format, required, validate};
//! use serde_json::{Value, json};
//!
//! let rules = RuleSet::new().field("server", [required("Server is required"), format::ip_or_hostname()]);
//! let candidate = json!({"server": "pool.ntp.org"});
//!
//! let checked: Value = futures::executor::block_on(validate(
//!     &rules,
//!     &candidate,
//!     &RuleContext::standalone(),
//!     &ValidateOptions::default(),
//! ))
//! .unwrap();
//! assert_eq!(checked, candidate);
//! ```

mod adapter;
mod error;
pub mod format;
pub mod forms;
mod rule;

pub use adapter::{ValidateOptions, check_fields, validate};
pub use error::{FieldErrorMap, ValidationError, ValidationResult};
pub use rule::{
    FieldInput, FieldRule, Rule, RuleContext, RuleSet, length_between, max_length, pattern,
    required, rule_fn, unique_key, when,
};
