//! IP address and hostname syntax rules.
//!
//! These rules check format only. An absent or empty value passes; combine
//! with [`required`](crate::required) when the field must be present.

use crate::rule::{FieldInput, Rule, rule_fn};
use regex_lite::Regex;
use std::sync::LazyLock;

pub const IP_ADDRESS_MESSAGE: &str = "Must be an IP address";
pub const HOSTNAME_MESSAGE: &str = "Must be a valid hostname of up to 253 characters";
pub const IP_OR_HOSTNAME_MESSAGE: &str =
    "Must be a valid IP address or hostname of up to 253 characters";

/// Longest hostname accepted, in characters.
pub const MAX_HOSTNAME_LEN: usize = 253;

const OCTET: &str = r"(25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)";
const LABEL: &str = r"([a-zA-Z0-9]|[a-zA-Z0-9][a-zA-Z0-9-]{0,61}[a-zA-Z0-9])";

static IP_ADDRESS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"^{OCTET}\.{OCTET}\.{OCTET}\.{OCTET}$"))
        .expect("IP address pattern compiles")
});

static HOSTNAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"^{LABEL}(\.{LABEL})*$")).expect("hostname pattern compiles")
});

/// Four dot-separated decimal octets, each `0..=255`.
pub fn is_valid_ip_address(value: &str) -> bool {
    IP_ADDRESS.is_match(value)
}

/// At most 253 characters of dot-separated labels; each label is 1-63
/// alphanumerics with hyphens allowed only inside.
pub fn is_valid_hostname(value: &str) -> bool {
    value.chars().count() <= MAX_HOSTNAME_LEN && HOSTNAME.is_match(value)
}

pub fn is_valid_ip_or_hostname(value: &str) -> bool {
    is_valid_ip_address(value) || is_valid_hostname(value)
}

fn format_rule(accepts: fn(&str) -> bool, message: &'static str) -> Rule {
    rule_fn(move |input: &FieldInput<'_>| {
        if input.is_blank() {
            return Ok(());
        }
        match input.as_str() {
            Some(s) if accepts(s) => Ok(()),
            _ => Err(message.to_string()),
        }
    })
}

pub fn ip_address() -> Rule {
    format_rule(is_valid_ip_address, IP_ADDRESS_MESSAGE)
}

pub fn hostname() -> Rule {
    format_rule(is_valid_hostname, HOSTNAME_MESSAGE)
}

pub fn ip_or_hostname() -> Rule {
    format_rule(is_valid_ip_or_hostname, IP_OR_HOSTNAME_MESSAGE)
}
