//! The user identity record.
//!
//! `id` is assigned by the store on insert; `0` means "not yet persisted".
//! The password hash is a PHC-format argon2id token and is deliberately
//! skipped when serializing, so a `users --json` dump (or any future
//! transport layer) can never leak it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A registered user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserIdentity {
    /// Store-assigned identifier (0 = not persisted).
    pub id: i64,

    /// When the account was created.
    pub created_at: DateTime<Utc>,

    /// Normalized (trimmed, lower-cased) email — the unique lookup key.
    pub email: String,

    /// Argon2id PHC token.  Never serialized outward.
    #[serde(default, skip_serializing)]
    pub password_hash: String,

    pub first_name: Option<String>,
    pub last_name: String,
    pub phone_number: Option<String>,

    /// Preferred UI language (default "en").
    pub language: String,

    /// Preferred UI theme (default "Light").
    pub theme: String,

    /// Reserved for a future second factor — nothing reads this yet.
    pub two_factor_enabled: bool,

    pub email_notifications: bool,
}

impl UserIdentity {
    /// Build a fresh identity with registration defaults.
    ///
    /// The email must already be normalized and the hash already computed;
    /// the directory service owns both steps.
    pub fn new_registration(
        email: &str,
        password_hash: String,
        first_name: Option<&str>,
        last_name: &str,
    ) -> Self {
        Self {
            id: 0,
            created_at: Utc::now(),
            email: email.to_string(),
            password_hash,
            first_name: first_name.map(str::to_string),
            last_name: last_name.to_string(),
            phone_number: None,
            language: "en".to_string(),
            theme: "Light".to_string(),
            two_factor_enabled: false,
            email_notifications: true,
        }
    }

    /// Take a value snapshot of this identity (for edit/cancel flows).
    pub fn snapshot(&self) -> Self {
        self.clone()
    }

    /// Overwrite every field from another identity (cancel = restore snapshot).
    pub fn copy_from(&mut self, other: &UserIdentity) {
        *self = other.clone();
    }
}
