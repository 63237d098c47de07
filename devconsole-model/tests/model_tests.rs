use devconsole_model::{Entry, HasEntries, Identity, NtpSettings, SecuritySettings, User, WiFiSettings, key_of};
use pretty_assertions::assert_eq;
use serde_json::json;

// ── User as an entry ─────────────────────────────────────────────

#[test]
fn user_key_is_username() {
    let user = User::new("alice", "secret", true);
    assert_eq!(user.key(), "alice");
    assert_eq!(User::KEY_FIELD, "username");
}

#[test]
fn user_template_defaults_to_admin() {
    let template = User::template();
    assert_eq!(template.username, "");
    assert_eq!(template.password, "");
    assert!(template.admin);
}

#[test]
fn key_of_reads_key_field_from_object() {
    let value = json!({"username": "bob", "password": "pw", "admin": false});
    let object = value.as_object().unwrap();
    assert_eq!(key_of::<User>(object), Some("bob"));
}

#[test]
fn key_of_missing_or_non_string_is_none() {
    let missing = json!({"password": "pw"});
    assert_eq!(key_of::<User>(missing.as_object().unwrap()), None);

    let numeric = json!({"username": 7});
    assert_eq!(key_of::<User>(numeric.as_object().unwrap()), None);
}

#[test]
fn user_json_shape_matches_field_names() {
    let user = User::new("alice", "pw", false);
    let value = serde_json::to_value(&user).unwrap();
    assert_eq!(value, json!({"username": "alice", "password": "pw", "admin": false}));
}

// ── SecuritySettings ─────────────────────────────────────────────

#[test]
fn factory_default_has_one_admin_and_one_guest() {
    let settings = SecuritySettings::factory_default();
    assert_eq!(settings.users.len(), 2);
    assert!(settings.user("admin").unwrap().admin);
    assert!(!settings.user("guest").unwrap().admin);
    assert_eq!(settings.jwt_secret, "esp8266-react");
}

#[test]
fn set_entries_replaces_user_list() {
    let mut settings = SecuritySettings::factory_default();
    settings.set_entries(vec![User::new("carol", "pw", true)]);
    assert_eq!(settings.entries(), &[User::new("carol", "pw", true)]);
    assert!(settings.user("admin").is_none());
}

#[test]
fn user_lookup_is_case_sensitive() {
    let settings = SecuritySettings::factory_default();
    assert!(settings.user("Admin").is_none());
}

// ── Identity ─────────────────────────────────────────────────────

#[test]
fn identity_mirrors_user_admin_flag() {
    let identity = Identity::of(&User::new("guest", "guest", false));
    assert_eq!(identity.username, "guest");
    assert!(!identity.is_admin());
}

// ── Settings forms ───────────────────────────────────────────────

#[test]
fn wifi_settings_omit_unset_static_fields() {
    let settings = WiFiSettings {
        ssid: "home".into(),
        ..Default::default()
    };
    let value = serde_json::to_value(&settings).unwrap();
    assert!(value.get("local_ip").is_none());
    assert_eq!(value["static_ip_config"], json!(false));
}

#[test]
fn wifi_settings_parse_without_static_fields() {
    let settings: WiFiSettings = serde_json::from_value(json!({
        "ssid": "home",
        "password": "",
        "hostname": "esp-device",
        "static_ip_config": false
    }))
    .unwrap();
    assert_eq!(settings.local_ip, None);
    assert_eq!(settings.hostname, "esp-device");
}

#[test]
fn ntp_defaults_are_enabled() {
    let settings = NtpSettings::default();
    assert!(settings.enabled);
    assert_eq!(settings.server, "time.google.com");
}
