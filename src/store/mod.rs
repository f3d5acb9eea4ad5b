//! Store abstraction — the durable record store behind the directory and
//! the vault.
//!
//! The services never talk to a database directly; they consume these two
//! traits so the backend is swappable (SQLite in the shipped binary, the
//! in-memory store in tests or embedded callers).  Predicates are
//! equality-only, mirroring the narrow query surface the services need.
//!
//! `insert` and `update` return the affected rows rather than a count so
//! callers can distinguish "zero rows touched" from a store error, and can
//! read back store-assigned fields (ids) without a second round trip.

pub mod memory;
pub mod sqlite;

use crate::directory::UserIdentity;
use crate::errors::Result;
use crate::vault::VaultEntry;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

/// Equality predicate over user records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserFilter {
    Email(String),
    Id(i64),
}

/// Equality predicate over vault entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryFilter {
    /// All entries belonging to an owner email.
    Owner(String),
    /// A single entry by id, regardless of owner.
    Id(i64),
    /// A single entry by id, scoped to an owner email.
    OwnerAndId { owner_email: String, id: i64 },
}

/// Durable storage for user identities.
pub trait UserStore: Send + Sync {
    /// Every stored user.
    fn all(&self) -> Result<Vec<UserIdentity>>;

    /// Insert a record; returns the stored row(s) with assigned ids.
    fn insert(&self, user: &UserIdentity) -> Result<Vec<UserIdentity>>;

    /// Rows matching the predicate.
    fn query(&self, filter: &UserFilter) -> Result<Vec<UserIdentity>>;

    /// Overwrite rows matching the predicate; returns the updated rows.
    fn update(&self, filter: &UserFilter, user: &UserIdentity) -> Result<Vec<UserIdentity>>;
}

/// Durable storage for vault entries.
pub trait VaultStore: Send + Sync {
    /// Insert a record; returns the stored row(s) with assigned ids.
    fn insert(&self, entry: &VaultEntry) -> Result<Vec<VaultEntry>>;

    /// Rows matching the predicate.
    fn query(&self, filter: &EntryFilter) -> Result<Vec<VaultEntry>>;

    /// Overwrite rows matching the predicate; returns the updated rows.
    fn update(&self, filter: &EntryFilter, entry: &VaultEntry) -> Result<Vec<VaultEntry>>;

    /// Delete rows matching the predicate; returns how many were removed.
    fn delete(&self, filter: &EntryFilter) -> Result<usize>;
}
