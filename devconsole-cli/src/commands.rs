use crate::{HostKind, UsersAction};
use anyhow::{Context, Result, bail};
use devconsole_collection::{EditError, admin_required};
use devconsole_model::{Identity, SecuritySettings, User};
use devconsole_rest::{
    AuthenticatedContext, CollectionForm, FormConfig, FormError, JsonFileResource,
    RefreshIdentity, RemoteResource,
};
use devconsole_validate::format;
use devconsole_validate::forms::user_rules;
use serde_json::{Map, Value, json};
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

type UserForm = CollectionForm<SecuritySettings, User, JsonFileResource<SecuritySettings>>;

pub async fn init(store: &Path, force: bool) -> Result<()> {
    if store.exists() && !force {
        bail!("{} already exists (use --force to overwrite)", store.display());
    }
    JsonFileResource::<SecuritySettings>::new(store)
        .save(&SecuritySettings::factory_default())
        .await
        .with_context(|| format!("writing {}", store.display()))?;
    info!("Wrote factory default settings to {}", store.display());
    Ok(())
}

pub async fn users(store: &Path, operator: Option<&str>, action: &UsersAction) -> Result<()> {
    let context = AuthenticatedContext::new(None);
    let mut form: UserForm = CollectionForm::new(
        JsonFileResource::new(store),
        user_rules(),
        FormConfig {
            resource_name: "security".to_string(),
            ..Default::default()
        },
    )
    .with_invariant(Arc::new(admin_required()))
    .with_post_save_hook(Arc::new(RefreshIdentity::new(context.clone())));

    form.load()
        .await
        .with_context(|| format!("loading {}", store.display()))?;

    if let Some(name) = operator {
        let me = form
            .data()
            .and_then(|settings| settings.user(name))
            .map(Identity::of)
            .with_context(|| format!("unknown user {name:?}"))?;
        if !me.is_admin() {
            bail!("{name} is not an admin");
        }
        context.set(Some(me));
    }

    match action {
        UsersAction::List => {
            print_users(&form);
            return Ok(());
        }
        UsersAction::Add {
            username,
            password,
            admin,
        } => {
            form.start_create(&User::template())?;
            form.update_draft(fields(&[
                ("username", json!(username)),
                ("password", json!(password)),
                ("admin", json!(admin)),
            ]))?;
            commit(&mut form).await?;
        }
        UsersAction::Edit {
            username,
            password,
            admin,
        } => {
            form.start_edit(username)?;
            if let Some(password) = password {
                form.set_field("password", json!(password))?;
            }
            if let Some(admin) = admin {
                form.set_field("admin", json!(admin))?;
            }
            commit(&mut form).await?;
        }
        UsersAction::Remove { username } => {
            if form.remove_by_key(username)?.is_none() {
                warn!("No user named {username:?}");
                return Ok(());
            }
        }
    }

    if let Some(reason) = form.save_blocked() {
        bail!("cannot save: {reason}");
    }
    form.save()
        .await
        .with_context(|| format!("saving {}", store.display()))?;
    info!("Saved {}", store.display());

    if operator.is_some() && context.me().is_none() {
        warn!("Your own account was removed; you are now signed out");
    }
    print_users(&form);
    Ok(())
}

pub fn check(value: &str, kind: HostKind) -> Result<()> {
    let (valid, message) = match kind {
        HostKind::Ip => (format::is_valid_ip_address(value), format::IP_ADDRESS_MESSAGE),
        HostKind::Hostname => (format::is_valid_hostname(value), format::HOSTNAME_MESSAGE),
        HostKind::Any => (
            format::is_valid_ip_or_hostname(value),
            format::IP_OR_HOSTNAME_MESSAGE,
        ),
    };
    if !valid {
        bail!("{value:?}: {message}");
    }
    println!("{value}: ok");
    Ok(())
}

async fn commit(form: &mut UserForm) -> Result<()> {
    match form.commit().await {
        Ok(()) => Ok(()),
        Err(FormError::Edit(e @ EditError::Validation(_))) => {
            if let Some(errors) = e.field_errors() {
                for (field, message) in errors {
                    eprintln!("  {field}: {message}");
                }
            }
            Err(e).context("user rejected")
        }
        Err(e) => Err(e.into()),
    }
}

fn fields(pairs: &[(&str, Value)]) -> Map<String, Value> {
    pairs
        .iter()
        .map(|(name, value)| (name.to_string(), value.clone()))
        .collect()
}

fn print_users(form: &UserForm) {
    let Some(collection) = form.collection() else {
        return;
    };
    println!("{:<24} ADMIN", "USERNAME");
    for user in collection.iter() {
        println!("{:<24} {}", user.username, if user.admin { "yes" } else { "no" });
    }
    if let Some(warning) = form.gate().warning {
        println!();
        println!("! {warning}");
    }
}
