//! Rule sets for the console's forms.
//!
//! Field names match the serialized field names of the model types, so a
//! [`FieldErrorMap`](crate::FieldErrorMap) can be displayed inline next to
//! the matching form input.

use crate::format;
use crate::rule::{RuleSet, length_between, max_length, pattern, required, unique_key, when};
use regex_lite::Regex;
use serde_json::{Map, Value};
use std::sync::LazyLock;

static USERNAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9_.]{1,24}$").expect("username pattern compiles"));

/// Rules for a user entry. Uniqueness of `username` is only enforced when
/// the rule context says the entry is being created.
pub fn user_rules() -> RuleSet {
    RuleSet::new()
        .field(
            "username",
            [
                required("Please provide a username"),
                pattern(
                    USERNAME.clone(),
                    "Must be 1-24 characters: alpha numeric, '_' or '.'",
                ),
                unique_key("Username already in use"),
            ],
        )
        .field(
            "password",
            [
                required("Please provide a password"),
                max_length(64, "Password must be 64 characters or less"),
            ],
        )
}

pub fn security_settings_rules() -> RuleSet {
    RuleSet::new().field(
        "jwt_secret",
        [
            required("JWT secret is required"),
            length_between(1, 64, "JWT secret must be between 1 and 64 characters"),
        ],
    )
}

fn static_ip_enabled(candidate: &Map<String, Value>) -> bool {
    candidate
        .get("static_ip_config")
        .and_then(Value::as_bool)
        .unwrap_or(false)
}

/// Rules for station-mode WiFi settings. The addressing fields become
/// mandatory once static IP configuration is switched on.
pub fn wifi_settings_rules() -> RuleSet {
    RuleSet::new()
        .field(
            "ssid",
            [
                required("Please provide an SSID"),
                max_length(32, "SSID must be 32 characters or less"),
            ],
        )
        .field(
            "password",
            [max_length(64, "Password must be 64 characters or less")],
        )
        .field("hostname", [format::hostname()])
        .field(
            "local_ip",
            [
                when(static_ip_enabled, required("Local IP is required")),
                format::ip_address(),
            ],
        )
        .field(
            "gateway_ip",
            [
                when(static_ip_enabled, required("Gateway IP is required")),
                format::ip_address(),
            ],
        )
        .field(
            "subnet_mask",
            [
                when(static_ip_enabled, required("Subnet mask is required")),
                format::ip_address(),
            ],
        )
        .field("dns_ip_1", [format::ip_address()])
        .field("dns_ip_2", [format::ip_address()])
}

pub fn ntp_settings_rules() -> RuleSet {
    RuleSet::new()
        .field(
            "server",
            [required("Server is required"), format::ip_or_hostname()],
        )
        .field("tz_label", [required("Time zone is required")])
}
