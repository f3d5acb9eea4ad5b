//! Password hashing and verification using Argon2id.
//!
//! Hashes are self-contained PHC strings (`$argon2id$v=19$m=...,t=...,p=...$salt$hash`)
//! so verification always uses the parameters and salt embedded in the
//! token, not whatever the hasher is currently configured with.  That is
//! what makes parameter upgrades possible: a token hashed under old
//! parameters still verifies, and the caller is told it `NeedsRehash`.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, SaltString};
use argon2::password_hash::PasswordHasher as _;
use argon2::{Algorithm, Argon2, Params, PasswordVerifier, Version};

use crate::errors::{CredVaultError, Result};

/// Minimum safe memory cost in KiB (8 MB).
const MIN_MEMORY_KIB: u32 = 8_192;

/// Configurable Argon2id parameters.
///
/// These map 1:1 to the fields in `Settings` so the CLI can pass
/// whatever the user configured in `.credvault.toml`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Argon2Params {
    /// Memory cost in KiB (default: 65 536 = 64 MB).
    pub memory_kib: u32,
    /// Number of iterations (default: 3).
    pub iterations: u32,
    /// Parallelism lanes (default: 4).
    pub parallelism: u32,
}

impl Default for Argon2Params {
    fn default() -> Self {
        Self {
            memory_kib: 65_536,
            iterations: 3,
            parallelism: 4,
        }
    }
}

/// Result of verifying a password against a stored hash token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerifyOutcome {
    /// The password matches.
    Success,
    /// The password does not match (or the token is malformed).
    Failed,
    /// The password matches, but the token was produced with parameters
    /// that differ from the current configuration and should be re-hashed.
    NeedsRehash,
}

/// Stateless password hashing service.
///
/// One shared instance is passed by reference wherever hashing or
/// verification is needed — it holds only the configured parameters,
/// never any per-call state.
#[derive(Debug, Clone)]
pub struct PasswordHasher {
    params: Argon2Params,
}

impl PasswordHasher {
    /// Create a hasher with explicit Argon2id parameters.
    pub fn new(params: Argon2Params) -> Self {
        Self { params }
    }

    /// Hash a password into a self-contained PHC token.
    ///
    /// A fresh random salt is generated per call, so hashing the same
    /// password twice yields two different tokens.  The plaintext never
    /// appears in the token or in any error message.
    pub fn hash(&self, password: &str) -> Result<String> {
        let engine = self.engine()?;
        let salt = SaltString::generate(&mut OsRng);
        let hash = engine
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| CredVaultError::HashingFailed(format!("Argon2id hashing failed: {e}")))?;
        Ok(hash.to_string())
    }

    /// Verify a password against a stored PHC token.
    ///
    /// The comparison happens inside the argon2 crate in constant time,
    /// using the algorithm, version, salt, and cost parameters embedded
    /// in the token.  A token that cannot be parsed verifies as `Failed`
    /// rather than erroring — callers treat it exactly like a wrong
    /// password.
    pub fn verify(&self, token: &str, password: &str) -> VerifyOutcome {
        let parsed = match PasswordHash::new(token) {
            Ok(p) => p,
            Err(_) => return VerifyOutcome::Failed,
        };

        let engine = match self.engine() {
            Ok(e) => e,
            Err(_) => return VerifyOutcome::Failed,
        };

        if engine
            .verify_password(password.as_bytes(), &parsed)
            .is_err()
        {
            return VerifyOutcome::Failed;
        }

        if self.needs_rehash(&parsed) {
            VerifyOutcome::NeedsRehash
        } else {
            VerifyOutcome::Success
        }
    }

    /// Returns `true` if the token was produced under a different
    /// algorithm, version, or cost parameters than currently configured.
    fn needs_rehash(&self, parsed: &PasswordHash<'_>) -> bool {
        if parsed.algorithm != Algorithm::Argon2id.ident() {
            return true;
        }
        if parsed.version != Some(Version::V0x13 as u32) {
            return true;
        }
        match Params::try_from(parsed) {
            Ok(p) => {
                p.m_cost() != self.params.memory_kib
                    || p.t_cost() != self.params.iterations
                    || p.p_cost() != self.params.parallelism
            }
            Err(_) => true,
        }
    }

    /// Build the argon2 engine, enforcing minimum safe parameters.
    fn engine(&self) -> Result<Argon2<'static>> {
        if self.params.memory_kib < MIN_MEMORY_KIB {
            return Err(CredVaultError::InvalidHashParams(format!(
                "memory_kib must be at least {MIN_MEMORY_KIB} (got {})",
                self.params.memory_kib
            )));
        }
        if self.params.iterations < 1 {
            return Err(CredVaultError::InvalidHashParams(
                "iterations must be at least 1".into(),
            ));
        }
        if self.params.parallelism < 1 {
            return Err(CredVaultError::InvalidHashParams(
                "parallelism must be at least 1".into(),
            ));
        }

        let params = Params::new(
            self.params.memory_kib,
            self.params.iterations,
            self.params.parallelism,
            None,
        )
        .map_err(|e| CredVaultError::InvalidHashParams(format!("invalid Argon2 params: {e}")))?;

        Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new(Argon2Params::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Fast parameters so the test suite doesn't spend seconds in Argon2.
    fn fast_params() -> Argon2Params {
        Argon2Params {
            memory_kib: MIN_MEMORY_KIB,
            iterations: 1,
            parallelism: 1,
        }
    }

    #[test]
    fn hash_then_verify_succeeds() {
        let hasher = PasswordHasher::new(fast_params());
        let token = hasher.hash("correct horse battery staple").unwrap();
        assert_eq!(
            hasher.verify(&token, "correct horse battery staple"),
            VerifyOutcome::Success
        );
    }

    #[test]
    fn same_password_hashes_to_different_tokens() {
        let hasher = PasswordHasher::new(fast_params());
        let a = hasher.hash("pw").unwrap();
        let b = hasher.hash("pw").unwrap();
        assert_ne!(a, b, "salting must make tokens unique");
    }

    #[test]
    fn wrong_password_fails() {
        let hasher = PasswordHasher::new(fast_params());
        let token = hasher.hash("right").unwrap();
        assert_eq!(hasher.verify(&token, "wrong"), VerifyOutcome::Failed);
    }

    #[test]
    fn malformed_token_fails() {
        let hasher = PasswordHasher::new(fast_params());
        assert_eq!(hasher.verify("not-a-phc-string", "pw"), VerifyOutcome::Failed);
        assert_eq!(hasher.verify("", "pw"), VerifyOutcome::Failed);
    }

    #[test]
    fn token_does_not_contain_plaintext() {
        let hasher = PasswordHasher::new(fast_params());
        let token = hasher.hash("hunter2-plaintext").unwrap();
        assert!(!token.contains("hunter2-plaintext"));
        assert!(token.starts_with("$argon2id$"));
    }

    #[test]
    fn outdated_params_report_needs_rehash() {
        let old = PasswordHasher::new(fast_params());
        let token = old.hash("pw").unwrap();

        let current = PasswordHasher::new(Argon2Params {
            iterations: 2,
            ..fast_params()
        });

        // Correct password, old parameters: still verifies, flags rehash.
        assert_eq!(current.verify(&token, "pw"), VerifyOutcome::NeedsRehash);
        // Wrong password stays Failed regardless of parameter age.
        assert_eq!(current.verify(&token, "nope"), VerifyOutcome::Failed);
    }

    #[test]
    fn rejects_dangerously_weak_params() {
        let hasher = PasswordHasher::new(Argon2Params {
            memory_kib: 16,
            iterations: 1,
            parallelism: 1,
        });
        assert!(hasher.hash("pw").is_err());
    }
}
