//! Cryptographic primitives for CredVault.
//!
//! This module provides:
//! - Argon2id password hashing and verification (`password`)
//!
//! The vault payloads themselves are stored as given — encrypting them is
//! the caller's responsibility, so the only crypto this crate performs is
//! credential hashing.

pub mod password;

pub use password::{Argon2Params, PasswordHasher, VerifyOutcome};
