use serde::{Deserialize, Serialize};

/// Station-mode WiFi settings.
///
/// The static addressing fields are only meaningful (and only required)
/// when `static_ip_config` is set.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WiFiSettings {
    pub ssid: String,
    pub password: String,
    pub hostname: String,
    pub static_ip_config: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local_ip: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gateway_ip: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subnet_mask: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dns_ip_1: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dns_ip_2: Option<String>,
}

/// Network time settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NtpSettings {
    pub enabled: bool,
    pub server: String,
    pub tz_label: String,
    pub tz_format: String,
}

impl Default for NtpSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            server: "time.google.com".to_string(),
            tz_label: "Europe/London".to_string(),
            tz_format: "GMT0BST,M3.5.0/1,M10.5.0".to_string(),
        }
    }
}
