//! SQLite-backed store via rusqlite.
//!
//! One database file holds both tables.  The `users.email` UNIQUE
//! constraint backs the directory's uniqueness invariant at the store
//! level; timestamps are RFC 3339 text so rows stay readable with plain
//! `sqlite3`.

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, Row};

use crate::directory::UserIdentity;
use crate::errors::{CredVaultError, Result};
use crate::vault::VaultEntry;

use super::{EntryFilter, UserFilter, UserStore, VaultStore};

/// rusqlite connection behind a mutex — each operation is one short,
/// independent transaction, matching the stateless request model.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open (or create) the database at `db_path` and ensure the schema.
    pub fn open(db_path: &Path) -> Result<Self> {
        let conn = Connection::open(db_path)?;

        // Restrict the database file to the owner.
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let perms = std::fs::Permissions::from_mode(0o600);
            let _ = std::fs::set_permissions(db_path, perms);
        }

        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS users (
                id                  INTEGER PRIMARY KEY AUTOINCREMENT,
                created_at          TEXT NOT NULL,
                email               TEXT NOT NULL UNIQUE,
                password_hash       TEXT NOT NULL,
                first_name          TEXT,
                last_name           TEXT NOT NULL DEFAULT '',
                phone_number        TEXT,
                language            TEXT NOT NULL DEFAULT 'en',
                theme               TEXT NOT NULL DEFAULT 'Light',
                two_factor_enabled  INTEGER NOT NULL DEFAULT 0,
                email_notifications INTEGER NOT NULL DEFAULT 1
            );
            CREATE TABLE IF NOT EXISTS vault_entries (
                id          INTEGER PRIMARY KEY AUTOINCREMENT,
                owner_id    INTEGER NOT NULL,
                owner_email TEXT NOT NULL,
                title       TEXT NOT NULL DEFAULT '',
                payload     TEXT NOT NULL DEFAULT '',
                description TEXT NOT NULL DEFAULT '',
                created_at  TEXT NOT NULL
            );
            CREATE INDEX IF NOT EXISTS idx_vault_entries_owner
                ON vault_entries(owner_email);",
        )?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| CredVaultError::Store("sqlite connection lock poisoned".into()))
    }
}

/// Parse an RFC 3339 timestamp column, falling back to now on bad data.
fn parse_ts(raw: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(raw).map_or_else(|_| Utc::now(), |dt| dt.with_timezone(&Utc))
}

fn row_to_user(row: &Row<'_>) -> rusqlite::Result<UserIdentity> {
    let ts: String = row.get("created_at")?;
    Ok(UserIdentity {
        id: row.get("id")?,
        created_at: parse_ts(&ts),
        email: row.get("email")?,
        password_hash: row.get("password_hash")?,
        first_name: row.get("first_name")?,
        last_name: row.get("last_name")?,
        phone_number: row.get("phone_number")?,
        language: row.get("language")?,
        theme: row.get("theme")?,
        two_factor_enabled: row.get("two_factor_enabled")?,
        email_notifications: row.get("email_notifications")?,
    })
}

fn row_to_entry(row: &Row<'_>) -> rusqlite::Result<VaultEntry> {
    let ts: String = row.get("created_at")?;
    Ok(VaultEntry {
        id: row.get("id")?,
        owner_id: row.get("owner_id")?,
        owner_email: row.get("owner_email")?,
        title: row.get("title")?,
        payload: row.get("payload")?,
        description: row.get("description")?,
        created_at: parse_ts(&ts),
    })
}

const USER_COLUMNS: &str = "id, created_at, email, password_hash, first_name, last_name, \
                            phone_number, language, theme, two_factor_enabled, email_notifications";

const ENTRY_COLUMNS: &str = "id, owner_id, owner_email, title, payload, description, created_at";

impl UserStore for SqliteStore {
    fn all(&self) -> Result<Vec<UserIdentity>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(&format!("SELECT {USER_COLUMNS} FROM users ORDER BY id"))?;
        let rows = stmt.query_map([], row_to_user)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    fn insert(&self, user: &UserIdentity) -> Result<Vec<UserIdentity>> {
        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO users (created_at, email, password_hash, first_name, last_name,
                                phone_number, language, theme, two_factor_enabled, email_notifications)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            params![
                user.created_at.to_rfc3339(),
                user.email,
                user.password_hash,
                user.first_name,
                user.last_name,
                user.phone_number,
                user.language,
                user.theme,
                user.two_factor_enabled,
                user.email_notifications,
            ],
        )?;

        let id = conn.last_insert_rowid();
        let stored = conn.query_row(
            &format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?1"),
            params![id],
            row_to_user,
        )?;
        Ok(vec![stored])
    }

    fn query(&self, filter: &UserFilter) -> Result<Vec<UserIdentity>> {
        let conn = self.lock()?;
        let mut out = Vec::new();
        match filter {
            UserFilter::Email(email) => {
                let mut stmt = conn
                    .prepare(&format!("SELECT {USER_COLUMNS} FROM users WHERE email = ?1"))?;
                let rows = stmt.query_map(params![email], row_to_user)?;
                for row in rows {
                    out.push(row?);
                }
            }
            UserFilter::Id(id) => {
                let mut stmt =
                    conn.prepare(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?1"))?;
                let rows = stmt.query_map(params![id], row_to_user)?;
                for row in rows {
                    out.push(row?);
                }
            }
        }
        Ok(out)
    }

    fn update(&self, filter: &UserFilter, user: &UserIdentity) -> Result<Vec<UserIdentity>> {
        let changed = {
            let conn = self.lock()?;
            let ts = user.created_at.to_rfc3339();
            const SET: &str = "created_at = ?1, email = ?2, password_hash = ?3, first_name = ?4, \
                               last_name = ?5, phone_number = ?6, language = ?7, theme = ?8, \
                               two_factor_enabled = ?9, email_notifications = ?10";
            match filter {
                UserFilter::Email(email) => conn.execute(
                    &format!("UPDATE users SET {SET} WHERE email = ?11"),
                    params![
                        ts,
                        user.email,
                        user.password_hash,
                        user.first_name,
                        user.last_name,
                        user.phone_number,
                        user.language,
                        user.theme,
                        user.two_factor_enabled,
                        user.email_notifications,
                        email,
                    ],
                )?,
                UserFilter::Id(id) => conn.execute(
                    &format!("UPDATE users SET {SET} WHERE id = ?11"),
                    params![
                        ts,
                        user.email,
                        user.password_hash,
                        user.first_name,
                        user.last_name,
                        user.phone_number,
                        user.language,
                        user.theme,
                        user.two_factor_enabled,
                        user.email_notifications,
                        id,
                    ],
                )?,
            }
        };
        if changed == 0 {
            return Ok(Vec::new());
        }
        // Read back by the row's post-update key: an Email predicate may
        // have just renamed the row it matched, so the old email no longer
        // finds it.  `users.email` is UNIQUE, so the new email is exact.
        match filter {
            UserFilter::Email(_) => {
                UserStore::query(self, &UserFilter::Email(user.email.clone()))
            }
            UserFilter::Id(id) => UserStore::query(self, &UserFilter::Id(*id)),
        }
    }
}

impl VaultStore for SqliteStore {
    fn insert(&self, entry: &VaultEntry) -> Result<Vec<VaultEntry>> {
        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO vault_entries (owner_id, owner_email, title, payload, description, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                entry.owner_id,
                entry.owner_email,
                entry.title,
                entry.payload,
                entry.description,
                entry.created_at.to_rfc3339(),
            ],
        )?;

        let id = conn.last_insert_rowid();
        let stored = conn.query_row(
            &format!("SELECT {ENTRY_COLUMNS} FROM vault_entries WHERE id = ?1"),
            params![id],
            row_to_entry,
        )?;
        Ok(vec![stored])
    }

    fn query(&self, filter: &EntryFilter) -> Result<Vec<VaultEntry>> {
        let conn = self.lock()?;
        let mut out = Vec::new();
        match filter {
            EntryFilter::Owner(owner) => {
                let mut stmt = conn.prepare(&format!(
                    "SELECT {ENTRY_COLUMNS} FROM vault_entries WHERE owner_email = ?1 ORDER BY id"
                ))?;
                let rows = stmt.query_map(params![owner], row_to_entry)?;
                for row in rows {
                    out.push(row?);
                }
            }
            EntryFilter::Id(id) => {
                let mut stmt = conn.prepare(&format!(
                    "SELECT {ENTRY_COLUMNS} FROM vault_entries WHERE id = ?1"
                ))?;
                let rows = stmt.query_map(params![id], row_to_entry)?;
                for row in rows {
                    out.push(row?);
                }
            }
            EntryFilter::OwnerAndId { owner_email, id } => {
                let mut stmt = conn.prepare(&format!(
                    "SELECT {ENTRY_COLUMNS} FROM vault_entries WHERE owner_email = ?1 AND id = ?2"
                ))?;
                let rows = stmt.query_map(params![owner_email, id], row_to_entry)?;
                for row in rows {
                    out.push(row?);
                }
            }
        }
        Ok(out)
    }

    fn update(&self, filter: &EntryFilter, entry: &VaultEntry) -> Result<Vec<VaultEntry>> {
        {
            let conn = self.lock()?;
            let ts = entry.created_at.to_rfc3339();
            const SET: &str = "owner_id = ?1, owner_email = ?2, title = ?3, payload = ?4, \
                               description = ?5, created_at = ?6";
            match filter {
                EntryFilter::Owner(owner) => {
                    conn.execute(
                        &format!("UPDATE vault_entries SET {SET} WHERE owner_email = ?7"),
                        params![
                            entry.owner_id,
                            entry.owner_email,
                            entry.title,
                            entry.payload,
                            entry.description,
                            ts,
                            owner,
                        ],
                    )?;
                }
                EntryFilter::Id(id) => {
                    conn.execute(
                        &format!("UPDATE vault_entries SET {SET} WHERE id = ?7"),
                        params![
                            entry.owner_id,
                            entry.owner_email,
                            entry.title,
                            entry.payload,
                            entry.description,
                            ts,
                            id,
                        ],
                    )?;
                }
                EntryFilter::OwnerAndId { owner_email, id } => {
                    conn.execute(
                        &format!(
                            "UPDATE vault_entries SET {SET} WHERE owner_email = ?7 AND id = ?8"
                        ),
                        params![
                            entry.owner_id,
                            entry.owner_email,
                            entry.title,
                            entry.payload,
                            entry.description,
                            ts,
                            owner_email,
                            id,
                        ],
                    )?;
                }
            }
        }
        VaultStore::query(self, filter)
    }

    fn delete(&self, filter: &EntryFilter) -> Result<usize> {
        let conn = self.lock()?;
        let removed = match filter {
            EntryFilter::Owner(owner) => conn.execute(
                "DELETE FROM vault_entries WHERE owner_email = ?1",
                params![owner],
            )?,
            EntryFilter::Id(id) => {
                conn.execute("DELETE FROM vault_entries WHERE id = ?1", params![id])?
            }
            EntryFilter::OwnerAndId { owner_email, id } => conn.execute(
                "DELETE FROM vault_entries WHERE owner_email = ?1 AND id = ?2",
                params![owner_email, id],
            )?,
        };
        Ok(removed)
    }
}
