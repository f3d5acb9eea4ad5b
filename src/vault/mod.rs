//! Vault Access Layer — ownership-scoped CRUD over vault entries.
//!
//! Every operation takes the owner's email as the authorization boundary,
//! normalizes it once, and re-resolves the owner through the User
//! Directory before any mutation.  Caller-supplied owner fields on an
//! entry are never trusted: updates re-stamp `owner_id`/`owner_email`
//! from the fresh resolution, which defeats ownership reassignment via a
//! forged or stale payload.
//!
//! Owner resolution and the entry write are two separate store round
//! trips with no transaction around them; a concurrent change to the
//! owner record between the two can act on stale ownership data.  That is
//! an accepted eventual-consistency caveat of the stateless request
//! model.

pub mod entry;

use std::sync::Arc;

use chrono::Utc;

use crate::directory::{normalize_email, UserDirectory};
use crate::store::{EntryFilter, VaultStore};

pub use entry::VaultEntry;

/// The vault service.  Cheap to clone; stateless between requests.
#[derive(Clone)]
pub struct VaultAccess {
    store: Arc<dyn VaultStore>,
    directory: UserDirectory,
}

impl VaultAccess {
    pub fn new(store: Arc<dyn VaultStore>, directory: UserDirectory) -> Self {
        Self { store, directory }
    }

    /// All entries belonging to `owner_email`.  Soft-fails to an empty
    /// list on any store error.
    pub fn list(&self, owner_email: &str) -> Vec<VaultEntry> {
        let owner = normalize_email(owner_email);
        self.store
            .query(&EntryFilter::Owner(owner))
            .unwrap_or_default()
    }

    /// Persist a new entry for `owner_email`.
    ///
    /// If the owner does not resolve, the input is returned unchanged —
    /// callers detect the failure by `entry.is_persisted()` still being
    /// false.  On success the store-assigned id, timestamp, and the
    /// resolved owner fields are copied onto the returned entry.
    pub fn add(&self, owner_email: &str, mut entry: VaultEntry) -> VaultEntry {
        let owner = match self.directory.find_by_email(owner_email) {
            Some(u) => u,
            None => return entry,
        };

        let mut record = entry.clone();
        record.owner_id = owner.id;
        record.owner_email = owner.email.clone();
        record.created_at = Utc::now();

        // Store errors are swallowed: the entry comes back without an
        // assigned id, which is the failure signal.
        if let Ok(rows) = self.store.insert(&record) {
            if let Some(saved) = rows.into_iter().next() {
                entry.id = saved.id;
                entry.created_at = saved.created_at;
                entry.owner_id = saved.owner_id;
                entry.owner_email = saved.owner_email;
            }
        }

        entry
    }

    /// Update an existing entry for `owner_email`.
    ///
    /// Returns `None` when the owner does not resolve, when no rows were
    /// affected, or on a store error.  The update predicate includes the
    /// resolved owner's email, so an id belonging to a different owner is
    /// never touched; the persisted record's owner fields come from the
    /// fresh resolution, never from the input.
    pub fn update(&self, owner_email: &str, entry: &VaultEntry) -> Option<VaultEntry> {
        let owner = self.directory.find_by_email(owner_email)?;

        let mut record = entry.clone();
        record.owner_id = owner.id;
        record.owner_email = owner.email.clone();

        let filter = EntryFilter::OwnerAndId {
            owner_email: owner.email,
            id: entry.id,
        };
        match self.store.update(&filter, &record) {
            Ok(rows) if !rows.is_empty() => Some(record),
            _ => None,
        }
    }

    /// Delete an entry by id, scoped to `owner_email`.
    ///
    /// The delete predicate includes the resolved owner's email, so an id
    /// belonging to a different owner is never removed.  Returns `true`
    /// when the call completed without a store error (deleting an id that
    /// matched nothing still counts as completed).
    pub fn delete(&self, owner_email: &str, id: i64) -> bool {
        let owner = match self.directory.find_by_email(owner_email) {
            Some(u) => u,
            None => return false,
        };

        self.store
            .delete(&EntryFilter::OwnerAndId {
                owner_email: owner.email,
                id,
            })
            .is_ok()
    }
}
