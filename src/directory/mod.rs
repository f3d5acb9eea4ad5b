//! User Directory — identity records, email normalization, registration,
//! login, and profile updates.
//!
//! Error policy: lookups fail soft (empty/`None`) so read paths stay
//! available when the store is down; mutations fail loud with an
//! `Outcome` carrying `ok` + a human-readable message.  Login and
//! registration deliberately reuse generic messages so a caller cannot
//! probe which accounts exist.

pub mod user;

use std::sync::Arc;

use crate::crypto::{PasswordHasher, VerifyOutcome};
use crate::store::{UserFilter, UserStore};

pub use user::UserIdentity;

/// Shared failure message for bad credentials — identical for "no such
/// user" and "wrong password" to resist user enumeration.
pub const MSG_INVALID_CREDENTIALS: &str = "Invalid email or password.";

/// Failure message when email or password is empty/whitespace.
pub const MSG_MISSING_CREDENTIALS: &str = "Email and password are required.";

/// Failure message for a duplicate registration.
pub const MSG_ALREADY_REGISTERED: &str = "Email is already registered.";

/// Normalize an email for lookups: trim surrounding whitespace and
/// lower-case.  Every email entering the directory goes through this
/// exactly once.
pub fn normalize_email(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Result of a loud (mutating) directory or vault operation.
#[derive(Debug, Clone)]
pub struct Outcome<T> {
    pub ok: bool,
    pub message: String,
    pub value: Option<T>,
}

impl<T> Outcome<T> {
    pub fn success(message: impl Into<String>, value: T) -> Self {
        Self {
            ok: true,
            message: message.into(),
            value: Some(value),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            message: message.into(),
            value: None,
        }
    }
}

/// The directory service.  Cheap to clone (Arc internally); holds no
/// request state of its own.
#[derive(Clone)]
pub struct UserDirectory {
    store: Arc<dyn UserStore>,
    hasher: Arc<PasswordHasher>,
}

impl UserDirectory {
    pub fn new(store: Arc<dyn UserStore>, hasher: Arc<PasswordHasher>) -> Self {
        Self { store, hasher }
    }

    /// Every registered user.  Soft-fails to an empty list if the store
    /// is unreachable.
    pub fn list_all(&self) -> Vec<UserIdentity> {
        self.store.all().unwrap_or_default()
    }

    /// Look up a user by email (normalized first).  `None` on absence or
    /// store error.
    pub fn find_by_email(&self, email: &str) -> Option<UserIdentity> {
        let email = normalize_email(email);
        self.store
            .query(&UserFilter::Email(email))
            .ok()?
            .into_iter()
            .next()
    }

    /// Register a new account.
    pub fn register(
        &self,
        email: &str,
        password: &str,
        first_name: Option<&str>,
        last_name: &str,
    ) -> Outcome<UserIdentity> {
        let email = normalize_email(email);
        if email.is_empty() || password.trim().is_empty() {
            return Outcome::failure(MSG_MISSING_CREDENTIALS);
        }

        if self.find_by_email(&email).is_some() {
            return Outcome::failure(MSG_ALREADY_REGISTERED);
        }

        let password_hash = match self.hasher.hash(password) {
            Ok(h) => h,
            Err(e) => return Outcome::failure(format!("Error: {e}")),
        };

        let user = UserIdentity::new_registration(&email, password_hash, first_name, last_name);

        match self.store.insert(&user) {
            Ok(rows) => match rows.into_iter().next() {
                Some(stored) => Outcome::success("Account created successfully.", stored),
                None => Outcome::failure("Failed to create account."),
            },
            Err(e) => Outcome::failure(format!("Error: {e}")),
        }
    }

    /// Authenticate a user.  Session/token issuance is the caller's job —
    /// this only resolves and verifies the identity.
    pub fn login(&self, email: &str, password: &str) -> Outcome<UserIdentity> {
        let email = normalize_email(email);
        if email.is_empty() || password.trim().is_empty() {
            return Outcome::failure(MSG_MISSING_CREDENTIALS);
        }

        let user = match self.find_by_email(&email) {
            Some(u) => u,
            None => return Outcome::failure(MSG_INVALID_CREDENTIALS),
        };

        match self.hasher.verify(&user.password_hash, password) {
            VerifyOutcome::Failed => Outcome::failure(MSG_INVALID_CREDENTIALS),
            // A match under outdated parameters still logs in; re-hashing
            // on login is a future upgrade path.
            VerifyOutcome::Success | VerifyOutcome::NeedsRehash => {
                Outcome::success("Login successful.", user)
            }
        }
    }

    /// Persist the full record by id.
    pub fn update(&self, user: &UserIdentity) -> Outcome<UserIdentity> {
        if user.id == 0 {
            return Outcome::failure("User ID missing.");
        }

        match self.store.update(&UserFilter::Id(user.id), user) {
            Ok(rows) => match rows.into_iter().next() {
                Some(stored) => Outcome::success("User updated successfully.", stored),
                None => Outcome::failure("No records updated."),
            },
            Err(e) => Outcome::failure(format!("Error updating user: {e}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_trims_and_lowercases() {
        assert_eq!(normalize_email("  A@Example.COM  "), "a@example.com");
        assert_eq!(normalize_email("a@b.com"), "a@b.com");
        assert_eq!(normalize_email("   "), "");
    }

    #[test]
    fn outcome_constructors() {
        let ok: Outcome<i32> = Outcome::success("done", 7);
        assert!(ok.ok);
        assert_eq!(ok.value, Some(7));

        let bad: Outcome<i32> = Outcome::failure("nope");
        assert!(!bad.ok);
        assert!(bad.value.is_none());
        assert_eq!(bad.message, "nope");
    }
}
