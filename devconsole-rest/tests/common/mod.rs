//! Shared test helpers for form tests.

#![allow(dead_code)]

use devconsole_collection::admin_required;
use devconsole_model::{SecuritySettings, User};
use devconsole_rest::{CollectionForm, FormConfig, mock::MemoryResource};
use devconsole_validate::forms::user_rules;
use std::sync::Arc;

pub type UserForm = CollectionForm<SecuritySettings, User, MemoryResource<SecuritySettings>>;

pub fn settings(users: &[(&str, bool)]) -> SecuritySettings {
    SecuritySettings {
        jwt_secret: "secret".to_string(),
        users: users
            .iter()
            .map(|(name, admin)| User::new(*name, "pw", *admin))
            .collect(),
    }
}

/// A user form over an in-memory device, plus a handle to that device.
pub fn user_form(users: &[(&str, bool)]) -> (UserForm, MemoryResource<SecuritySettings>) {
    let remote = MemoryResource::new(settings(users));
    let form = CollectionForm::new(
        remote.clone(),
        user_rules(),
        FormConfig {
            resource_name: "security".to_string(),
            ..Default::default()
        },
    )
    .with_invariant(Arc::new(admin_required()));
    (form, remote)
}

pub async fn loaded_user_form(users: &[(&str, bool)]) -> (UserForm, MemoryResource<SecuritySettings>) {
    let (mut form, remote) = user_form(users);
    form.load().await.unwrap();
    (form, remote)
}
