//! Remote resource binding for the device console.
//!
//! # Architecture
//!
//! - **Resource**: [`RemoteResource`] is the load/save contract with the
//!   device; [`RestResource`] wraps one and publishes [`ResourceStatus`]
//!   (loading, saving, last error) to observers.
//! - **Form**: [`CollectionForm`] ties a resource to a
//!   [`CollectionEditor`](devconsole_collection::CollectionEditor). A load
//!   replaces the working collection wholesale; local edits stay in memory
//!   until an explicit, gated save.
//! - **Hooks**: a [`PostSaveHook`] runs once after each successful save.
//!   [`RefreshIdentity`] re-derives the signed-in operator from the saved
//!   user list.
//!
//! # Example
//!
//! ```
//! use devconsole_collection::admin_required;
//! use devconsole_model::{SecuritySettings, User};
//! use devconsole_rest::{CollectionForm, FormConfig, mock::MemoryResource};
//! use devconsole_validate::forms::user_rules;
//! use std::sync::Arc;
//!
//! # async fn run() {
//! let remote = MemoryResource::new(SecuritySettings::factory_default());
//! let mut form: CollectionForm<SecuritySettings, User, _> =
//!     CollectionForm::new(remote, user_rules(), FormConfig::default())
//!         .with_invariant(Arc::new(admin_required()));
//!
//! form.load().await.unwrap();
//! form.remove_by_key("guest").unwrap();
//! form.save().await.unwrap();
//! # }
//! # tokio::runtime::Runtime::new().unwrap().block_on(run());
//! ```

mod error;
mod file;
mod form;
mod hook;
pub mod mock;
mod resource;

pub use error::{FormError, FormResult, SaveBlocked, TransportError, TransportResult};
pub use file::JsonFileResource;
pub use form::{CollectionForm, FormConfig};
pub use hook::{AuthenticatedContext, PostSaveHook, RefreshIdentity};
pub use resource::{RemoteResource, ResourceStatus, RestResource};
