//! Configuration model for the device console.
//!
//! Defines the types every console subsystem depends on:
//! - [`Entry`]: one uniquely-keyed record in a managed collection
//! - [`HasEntries`]: a remotely stored object that carries a collection
//! - [`User`] / [`SecuritySettings`]: the user-management domain
//! - [`Identity`]: the signed-in operator as derived from the user list
//! - [`WiFiSettings`] / [`NtpSettings`]: plain settings forms
//!
//! The field names of these types are the field names rule sets and field
//! error maps are keyed by.

mod entry;
mod network;
mod security;

pub use entry::{Entry, HasEntries, key_of};
pub use network::{NtpSettings, WiFiSettings};
pub use security::{Identity, SecuritySettings, User};
