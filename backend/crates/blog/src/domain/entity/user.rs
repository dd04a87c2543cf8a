//! User Entity
//!
//! A blog author. The stored password is always in encoded form.

use chrono::{DateTime, Utc};
use kernel::id::UserId;
use platform::password::{EncodedPassword, PasswordCodec};

/// User entity
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub name: String,
    /// URL-friendly name
    pub slug: String,
    /// Login name (unique)
    pub login: String,
    pub email: String,
    pub password: EncodedPassword,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Data for a user that has not been stored yet
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub slug: String,
    pub login: String,
    pub email: String,
    pub password: EncodedPassword,
}

/// Partial update; empty strings leave the field unchanged
#[derive(Debug, Clone, Default)]
pub struct UserChanges {
    pub name: String,
    pub slug: String,
    pub login: String,
    pub email: String,
    /// Plaintext or already-encoded password
    pub password: String,
}

impl User {
    /// Merge non-empty fields of `changes`
    ///
    /// Passwords are encoded unless they already carry the sentinel.
    pub fn apply(&mut self, changes: UserChanges, codec: &PasswordCodec) {
        if !changes.name.is_empty() {
            self.name = changes.name;
        }

        if !changes.slug.is_empty() {
            self.slug = changes.slug;
        }

        if !changes.login.is_empty() {
            self.login = changes.login;
        }

        if !changes.email.is_empty() {
            self.email = changes.email;
        }

        if !changes.password.is_empty() {
            self.password = codec.encode_if_plain(changes.password);
        }
    }
}
