//! The vault entry record — a titled secret with a protected payload.
//!
//! The payload is stored exactly as given; encrypting it (or not) is the
//! caller's decision, not this crate's.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single secret belonging to one owner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VaultEntry {
    /// Store-assigned identifier (0 = not persisted).
    pub id: i64,

    /// Owning user's id — stamped by the Vault Access Layer at write time.
    pub owner_id: i64,

    /// Denormalized copy of the owner's normalized email, used for lookups.
    pub owner_email: String,

    pub title: String,

    /// The protected payload (the secret value), stored as given.
    pub payload: String,

    pub description: String,

    pub created_at: DateTime<Utc>,
}

impl VaultEntry {
    /// Build an entry that has not been persisted yet.  Owner fields and
    /// the id are stamped by `VaultAccess::add` once the owner resolves.
    pub fn new(title: &str, payload: &str, description: &str) -> Self {
        Self {
            id: 0,
            owner_id: 0,
            owner_email: String::new(),
            title: title.to_string(),
            payload: payload.to_string(),
            description: description.to_string(),
            created_at: Utc::now(),
        }
    }

    /// Whether the store has assigned this entry an identifier.
    pub fn is_persisted(&self) -> bool {
        self.id != 0
    }
}
