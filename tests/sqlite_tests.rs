//! Integration tests for the SQLite store backend.

use std::sync::Arc;

use credvault::crypto::{Argon2Params, PasswordHasher};
use credvault::directory::{UserDirectory, UserIdentity};
use credvault::store::{EntryFilter, SqliteStore, UserFilter, UserStore, VaultStore};
use credvault::vault::{VaultAccess, VaultEntry};
use tempfile::TempDir;

/// Helper: create a temporary database path inside a fresh temp dir.
fn db_path() -> (TempDir, std::path::PathBuf) {
    let dir = TempDir::new().expect("create temp dir");
    let path = dir.path().join("test.db");
    (dir, path)
}

fn user(email: &str) -> UserIdentity {
    UserIdentity::new_registration(email, "$argon2id$fake-token".into(), Some("Ada"), "Lovelace")
}

// ---------------------------------------------------------------------------
// Users: insert, reopen, uniqueness
// ---------------------------------------------------------------------------

#[test]
fn users_survive_a_reopen() {
    let (_dir, path) = db_path();

    {
        let store = SqliteStore::open(&path).unwrap();
        let rows = UserStore::insert(&store, &user("ada@example.com")).unwrap();
        assert_eq!(rows.len(), 1);
        assert!(rows[0].id > 0);
    }

    // Re-open the same file — the record is still there, hash included.
    let store = SqliteStore::open(&path).unwrap();
    let rows = UserStore::query(&store, &UserFilter::Email("ada@example.com".into())).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].password_hash, "$argon2id$fake-token");
    assert_eq!(rows[0].first_name.as_deref(), Some("Ada"));
}

#[test]
fn duplicate_email_violates_the_unique_constraint() {
    let (_dir, path) = db_path();
    let store = SqliteStore::open(&path).unwrap();

    UserStore::insert(&store, &user("dup@example.com")).unwrap();
    assert!(UserStore::insert(&store, &user("dup@example.com")).is_err());
}

#[test]
fn user_update_returns_the_new_row_state() {
    let (_dir, path) = db_path();
    let store = SqliteStore::open(&path).unwrap();

    let stored = UserStore::insert(&store, &user("ada@example.com"))
        .unwrap()
        .remove(0);

    let mut edited = stored.clone();
    edited.theme = "Dark".to_string();
    edited.email_notifications = false;

    let rows = UserStore::update(&store, &UserFilter::Id(stored.id), &edited).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].theme, "Dark");
    assert!(!rows[0].email_notifications);
}

#[test]
fn update_by_email_reports_the_renamed_row() {
    let (_dir, path) = db_path();
    let store = SqliteStore::open(&path).unwrap();

    let stored = UserStore::insert(&store, &user("old@example.com"))
        .unwrap()
        .remove(0);

    // The update itself changes the email the predicate matched on.
    let mut edited = stored.clone();
    edited.email = "new@example.com".to_string();

    let rows = UserStore::update(
        &store,
        &UserFilter::Email("old@example.com".into()),
        &edited,
    )
    .unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].id, stored.id);
    assert_eq!(rows[0].email, "new@example.com");
}

#[test]
fn updating_a_missing_user_touches_no_rows() {
    let (_dir, path) = db_path();
    let store = SqliteStore::open(&path).unwrap();

    let mut ghost = user("ghost@example.com");
    ghost.id = 42;
    let rows = UserStore::update(&store, &UserFilter::Id(42), &ghost).unwrap();
    assert!(rows.is_empty());
}

// ---------------------------------------------------------------------------
// Entries: CRUD against the same file
// ---------------------------------------------------------------------------

#[test]
fn entry_crud_roundtrip() {
    let (_dir, path) = db_path();
    let store = SqliteStore::open(&path).unwrap();

    let mut entry = VaultEntry::new("Bank", "s3cret", "main account");
    entry.owner_id = 1;
    entry.owner_email = "ada@example.com".to_string();

    let stored = VaultStore::insert(&store, &entry).unwrap().remove(0);
    assert!(stored.id > 0);

    let rows = VaultStore::query(&store, &EntryFilter::Owner("ada@example.com".into())).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].payload, "s3cret");

    let mut edited = stored.clone();
    edited.payload = "rotated".to_string();
    let rows = VaultStore::update(&store, &EntryFilter::Id(stored.id), &edited).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].payload, "rotated");

    let removed = store
        .delete(&EntryFilter::OwnerAndId {
            owner_email: "ada@example.com".into(),
            id: stored.id,
        })
        .unwrap();
    assert_eq!(removed, 1);
    assert!(VaultStore::query(&store, &EntryFilter::Id(stored.id))
        .unwrap()
        .is_empty());
}

#[test]
fn delete_scoped_to_the_wrong_owner_removes_nothing() {
    let (_dir, path) = db_path();
    let store = SqliteStore::open(&path).unwrap();

    let mut entry = VaultEntry::new("Bank", "s", "");
    entry.owner_id = 1;
    entry.owner_email = "a@x.com".to_string();
    let stored = VaultStore::insert(&store, &entry).unwrap().remove(0);

    let removed = store
        .delete(&EntryFilter::OwnerAndId {
            owner_email: "b@x.com".into(),
            id: stored.id,
        })
        .unwrap();
    assert_eq!(removed, 0);
    assert_eq!(
        VaultStore::query(&store, &EntryFilter::Id(stored.id))
            .unwrap()
            .len(),
        1
    );
}

// ---------------------------------------------------------------------------
// Full service stack on SQLite
// ---------------------------------------------------------------------------

#[test]
fn services_work_end_to_end_on_sqlite() {
    let (_dir, path) = db_path();
    let store = Arc::new(SqliteStore::open(&path).unwrap());

    let hasher = Arc::new(PasswordHasher::new(Argon2Params {
        memory_kib: 8_192,
        iterations: 1,
        parallelism: 1,
    }));
    let directory = UserDirectory::new(store.clone(), hasher);
    let vault = VaultAccess::new(store, directory.clone());

    let outcome = directory.register("Ada@Example.com", "strong-password", Some("Ada"), "Lovelace");
    assert!(outcome.ok, "{}", outcome.message);

    assert!(directory.login("ada@example.com", "strong-password").ok);
    assert!(!directory.login("ada@example.com", "wrong").ok);

    let added = vault.add("ada@example.com", VaultEntry::new("Bank", "s3cret", ""));
    assert!(added.is_persisted());

    let listed = vault.list("ADA@example.com");
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].title, "Bank");

    assert!(vault.delete("ada@example.com", added.id));
    assert!(vault.list("ada@example.com").is_empty());
}
