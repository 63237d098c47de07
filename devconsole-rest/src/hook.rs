//! Side effects run after a successful save.

use async_trait::async_trait;
use devconsole_model::{Identity, SecuritySettings};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::info;

/// Runs once after each successful save, with the value that was saved.
///
/// A failing hook is logged by the caller; it never turns a successful save
/// into a failed one and is not retried.
#[async_trait]
pub trait PostSaveHook<T>: Send + Sync {
    async fn after_save(&self, saved: &T) -> anyhow::Result<()>;
}

/// The signed-in operator, shared with every view that needs it.
#[derive(Clone)]
pub struct AuthenticatedContext {
    me: Arc<watch::Sender<Option<Identity>>>,
}

impl AuthenticatedContext {
    pub fn new(me: Option<Identity>) -> Self {
        let (me, _) = watch::channel(me);
        Self { me: Arc::new(me) }
    }

    pub fn signed_in(identity: Identity) -> Self {
        Self::new(Some(identity))
    }

    pub fn me(&self) -> Option<Identity> {
        self.me.borrow().clone()
    }

    /// Whether admin-only views are available right now.
    pub fn is_admin(&self) -> bool {
        self.me.borrow().as_ref().is_some_and(Identity::is_admin)
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<Identity>> {
        self.me.subscribe()
    }

    pub fn set(&self, me: Option<Identity>) {
        self.me.send_replace(me);
    }

    pub fn sign_out(&self) {
        self.set(None);
    }
}

/// Re-derives the signed-in identity from saved security settings.
///
/// Editing users can change the operator's own admin flag or remove the
/// operator altogether; in the latter case the context is signed out.
pub struct RefreshIdentity {
    context: AuthenticatedContext,
}

impl RefreshIdentity {
    pub fn new(context: AuthenticatedContext) -> Self {
        Self { context }
    }
}

#[async_trait]
impl PostSaveHook<SecuritySettings> for RefreshIdentity {
    async fn after_save(&self, saved: &SecuritySettings) -> anyhow::Result<()> {
        let Some(me) = self.context.me() else {
            return Ok(());
        };
        let refreshed = saved.user(&me.username).map(Identity::of);
        match &refreshed {
            Some(identity) if identity.admin != me.admin => {
                info!(user = %me.username, admin = identity.admin, "own admin flag changed");
            }
            None => info!(user = %me.username, "own account removed, signing out"),
            _ => {}
        }
        self.context.set(refreshed);
        Ok(())
    }
}
