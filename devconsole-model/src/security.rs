use crate::entry::{Entry, HasEntries};
use serde::{Deserialize, Serialize};

/// A console user account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub username: String,
    pub password: String,
    pub admin: bool,
}

impl User {
    pub fn new(username: impl Into<String>, password: impl Into<String>, admin: bool) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            admin,
        }
    }

    /// Template for a user being created. New users default to admin so the
    /// first account added to an empty list keeps the console manageable.
    pub fn template() -> Self {
        Self::new("", "", true)
    }
}

impl Entry for User {
    const KEY_FIELD: &'static str = "username";

    fn key(&self) -> &str {
        &self.username
    }
}

/// Security settings as stored on the device: the token signing secret and
/// the user list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecuritySettings {
    pub jwt_secret: String,
    pub users: Vec<User>,
}

impl SecuritySettings {
    /// Settings a freshly flashed device starts with.
    pub fn factory_default() -> Self {
        Self {
            jwt_secret: "esp8266-react".to_string(),
            users: vec![
                User::new("admin", "admin", true),
                User::new("guest", "guest", false),
            ],
        }
    }

    /// Looks up a user by username.
    pub fn user(&self, username: &str) -> Option<&User> {
        self.users.iter().find(|u| u.username == username)
    }
}

impl HasEntries<User> for SecuritySettings {
    fn entries(&self) -> &[User] {
        &self.users
    }

    fn set_entries(&mut self, entries: Vec<User>) {
        self.users = entries;
    }
}

/// The signed-in operator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub username: String,
    pub admin: bool,
}

impl Identity {
    /// Derives the identity of `user`.
    pub fn of(user: &User) -> Self {
        Self {
            username: user.username.clone(),
            admin: user.admin,
        }
    }

    /// Whether admin-only views (WiFi scan and settings, user management)
    /// are available.
    pub fn is_admin(&self) -> bool {
        self.admin
    }
}
