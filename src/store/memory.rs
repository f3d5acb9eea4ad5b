//! In-memory store — the mockable backend for tests and embedded callers.
//!
//! Semantics match `SqliteStore`: monotonically assigned ids starting at
//! 1, and a uniqueness check on `users.email` backing the directory's
//! invariant at the store level.

use std::sync::Mutex;

use crate::directory::UserIdentity;
use crate::errors::{CredVaultError, Result};
use crate::vault::VaultEntry;

use super::{EntryFilter, UserFilter, UserStore, VaultStore};

#[derive(Default)]
struct Inner {
    users: Vec<UserIdentity>,
    entries: Vec<VaultEntry>,
    next_user_id: i64,
    next_entry_id: i64,
}

/// Shared in-memory backend implementing both store traits.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Inner>> {
        self.inner
            .lock()
            .map_err(|_| CredVaultError::Store("memory store lock poisoned".into()))
    }
}

fn user_matches(user: &UserIdentity, filter: &UserFilter) -> bool {
    match filter {
        UserFilter::Email(email) => user.email == *email,
        UserFilter::Id(id) => user.id == *id,
    }
}

fn entry_matches(entry: &VaultEntry, filter: &EntryFilter) -> bool {
    match filter {
        EntryFilter::Owner(owner) => entry.owner_email == *owner,
        EntryFilter::Id(id) => entry.id == *id,
        EntryFilter::OwnerAndId { owner_email, id } => {
            entry.owner_email == *owner_email && entry.id == *id
        }
    }
}

impl UserStore for MemoryStore {
    fn all(&self) -> Result<Vec<UserIdentity>> {
        Ok(self.lock()?.users.clone())
    }

    fn insert(&self, user: &UserIdentity) -> Result<Vec<UserIdentity>> {
        let mut inner = self.lock()?;
        if inner.users.iter().any(|u| u.email == user.email) {
            return Err(CredVaultError::Store(format!(
                "unique constraint violated: users.email ({})",
                user.email
            )));
        }
        inner.next_user_id += 1;
        let mut stored = user.clone();
        stored.id = inner.next_user_id;
        inner.users.push(stored.clone());
        Ok(vec![stored])
    }

    fn query(&self, filter: &UserFilter) -> Result<Vec<UserIdentity>> {
        let inner = self.lock()?;
        Ok(inner
            .users
            .iter()
            .filter(|u| user_matches(u, filter))
            .cloned()
            .collect())
    }

    fn update(&self, filter: &UserFilter, user: &UserIdentity) -> Result<Vec<UserIdentity>> {
        let mut inner = self.lock()?;
        let mut updated = Vec::new();
        for slot in inner.users.iter_mut().filter(|u| user_matches(u, filter)) {
            let keep_id = slot.id;
            *slot = user.clone();
            slot.id = keep_id;
            updated.push(slot.clone());
        }
        Ok(updated)
    }
}

impl VaultStore for MemoryStore {
    fn insert(&self, entry: &VaultEntry) -> Result<Vec<VaultEntry>> {
        let mut inner = self.lock()?;
        inner.next_entry_id += 1;
        let mut stored = entry.clone();
        stored.id = inner.next_entry_id;
        inner.entries.push(stored.clone());
        Ok(vec![stored])
    }

    fn query(&self, filter: &EntryFilter) -> Result<Vec<VaultEntry>> {
        let inner = self.lock()?;
        Ok(inner
            .entries
            .iter()
            .filter(|e| entry_matches(e, filter))
            .cloned()
            .collect())
    }

    fn update(&self, filter: &EntryFilter, entry: &VaultEntry) -> Result<Vec<VaultEntry>> {
        let mut inner = self.lock()?;
        let mut updated = Vec::new();
        for slot in inner.entries.iter_mut().filter(|e| entry_matches(e, filter)) {
            let keep_id = slot.id;
            *slot = entry.clone();
            slot.id = keep_id;
            updated.push(slot.clone());
        }
        Ok(updated)
    }

    fn delete(&self, filter: &EntryFilter) -> Result<usize> {
        let mut inner = self.lock()?;
        let before = inner.entries.len();
        inner.entries.retain(|e| !entry_matches(e, filter));
        Ok(before - inner.entries.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(email: &str) -> UserIdentity {
        UserIdentity::new_registration(email, "hash".into(), None, "Doe")
    }

    #[test]
    fn insert_assigns_sequential_ids() {
        let store = MemoryStore::new();
        let a = UserStore::insert(&store, &user("a@x.com")).unwrap();
        let b = UserStore::insert(&store, &user("b@x.com")).unwrap();
        assert_eq!(a[0].id, 1);
        assert_eq!(b[0].id, 2);
    }

    #[test]
    fn duplicate_email_is_rejected_at_store_level() {
        let store = MemoryStore::new();
        UserStore::insert(&store, &user("dup@x.com")).unwrap();
        assert!(UserStore::insert(&store, &user("dup@x.com")).is_err());
    }

    #[test]
    fn update_preserves_row_id() {
        let store = MemoryStore::new();
        let stored = UserStore::insert(&store, &user("a@x.com"))
            .unwrap()
            .remove(0);

        let mut edited = stored.clone();
        edited.id = 999; // a forged id in the payload must not stick
        edited.theme = "Dark".into();

        let rows = UserStore::update(&store, &UserFilter::Id(stored.id), &edited).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, stored.id);
        assert_eq!(rows[0].theme, "Dark");
    }

    #[test]
    fn delete_is_scoped_by_filter() {
        let store = MemoryStore::new();
        let mut e = VaultEntry::new("t", "p", "");
        e.owner_email = "a@x.com".into();
        let a = VaultStore::insert(&store, &e).unwrap().remove(0);

        e.owner_email = "b@x.com".into();
        VaultStore::insert(&store, &e).unwrap();

        // Deleting a's id under b's email must remove nothing.
        let removed = store
            .delete(&EntryFilter::OwnerAndId {
                owner_email: "b@x.com".into(),
                id: a.id,
            })
            .unwrap();
        assert_eq!(removed, 0);

        let removed = store
            .delete(&EntryFilter::OwnerAndId {
                owner_email: "a@x.com".into(),
                id: a.id,
            })
            .unwrap();
        assert_eq!(removed, 1);
    }
}
