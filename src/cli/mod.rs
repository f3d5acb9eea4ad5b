//! CLI module — Clap argument parser, output helpers, and command implementations.

pub mod commands;
pub mod output;

use std::sync::Arc;

use clap::Parser;
use zeroize::Zeroizing;

use crate::config::Settings;
use crate::crypto::PasswordHasher;
use crate::directory::UserDirectory;
use crate::errors::{CredVaultError, Result};
use crate::store::SqliteStore;
use crate::vault::VaultAccess;

/// Minimum password length for new accounts.
const MIN_PASSWORD_LEN: usize = 8;

/// CredVault CLI: multi-user credential vault.
#[derive(Parser)]
#[command(
    name = "credvault",
    about = "Multi-user credential vault with ownership-scoped secret storage",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Data directory holding the vault database (default: .credvault)
    #[arg(long, default_value = ".credvault", global = true)]
    pub data_dir: String,
}

/// All available subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Register a new account
    Register {
        /// Email address (normalized to lower-case)
        email: String,
        /// First name
        #[arg(long)]
        first_name: Option<String>,
        /// Last name
        #[arg(long)]
        last_name: Option<String>,
    },

    /// Verify credentials for an account
    Login {
        /// Email address
        email: String,
    },

    /// List all registered users
    Users {
        /// Print as JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Update profile fields for an account (requires login)
    Profile {
        /// Email address of the account to update
        email: String,
        #[arg(long)]
        first_name: Option<String>,
        #[arg(long)]
        last_name: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        /// Preferred language code (e.g. en, de)
        #[arg(long)]
        language: Option<String>,
        /// Preferred theme (e.g. Light, Dark)
        #[arg(long)]
        theme: Option<String>,
        /// Enable or disable email notifications
        #[arg(long)]
        email_notifications: Option<bool>,
    },

    /// Manage vault entries (requires login)
    Vault {
        #[command(subcommand)]
        action: VaultAction,
    },

    /// View the audit log of operations
    Audit {
        /// Number of entries to show (default: 50)
        #[arg(long, default_value = "50")]
        last: usize,
        /// Show entries since a duration ago (e.g. 7d, 24h, 30m)
        #[arg(long)]
        since: Option<String>,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for (bash, zsh, fish, powershell)
        shell: String,
    },
}

/// Vault subcommands, all scoped to the authenticated owner.
#[derive(clap::Subcommand)]
pub enum VaultAction {
    /// Add a new entry
    Add {
        /// Owner email
        owner: String,
        /// Entry title (e.g. "Bank")
        title: String,
        /// Secret value (omit for interactive prompt)
        #[arg(long)]
        payload: Option<String>,
        /// Free-form description
        #[arg(long, default_value = "")]
        description: String,
    },

    /// List all entries for an owner
    List {
        /// Owner email
        owner: String,
        /// Print as JSON instead of a table
        #[arg(long)]
        json: bool,
        /// Show payload values in the table
        #[arg(long)]
        show_payloads: bool,
    },

    /// Update an existing entry
    Update {
        /// Owner email
        owner: String,
        /// Entry id
        id: i64,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        payload: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },

    /// Delete an entry
    Delete {
        /// Owner email
        owner: String,
        /// Entry id
        id: i64,
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
}

// ---------------------------------------------------------------------------
// Shared helpers used by multiple commands
// ---------------------------------------------------------------------------

/// Build the directory and vault services over the SQLite store.
///
/// Settings come from `.credvault.toml` in the working directory; the
/// `--data-dir` flag overrides the configured data directory.
pub fn open_services(cli: &Cli) -> Result<(UserDirectory, VaultAccess)> {
    let cwd = std::env::current_dir()?;
    let settings = Settings::load(&cwd)?;

    let data_dir = cwd.join(&cli.data_dir);
    std::fs::create_dir_all(&data_dir)?;
    let db_path = data_dir.join(&settings.database_file);

    let store = Arc::new(SqliteStore::open(&db_path)?);
    let hasher = Arc::new(PasswordHasher::new(settings.argon2_params()));

    let directory = UserDirectory::new(store.clone(), hasher);
    let vault = VaultAccess::new(store, directory.clone());

    Ok((directory, vault))
}

/// Get the account password, trying in order:
/// 1. `CREDVAULT_PASSWORD` env var (CI/scripted use)
/// 2. Interactive prompt
///
/// Returns `Zeroizing<String>` so the password is wiped from memory on drop.
pub fn prompt_password(prompt: &str) -> Result<Zeroizing<String>> {
    // 1. Check the environment variable first (CI/scripting friendly).
    if let Ok(pw) = std::env::var("CREDVAULT_PASSWORD") {
        if !pw.is_empty() {
            return Ok(Zeroizing::new(pw));
        }
    }

    // 2. Fall back to interactive prompt.
    let pw = dialoguer::Password::new()
        .with_prompt(prompt)
        .interact()
        .map_err(|e| CredVaultError::CommandFailed(format!("password prompt: {e}")))?;
    Ok(Zeroizing::new(pw))
}

/// Prompt for a new password with confirmation (used during `register`).
///
/// Also respects `CREDVAULT_PASSWORD` for scripted usage.
/// Enforces a minimum password length.
///
/// Returns `Zeroizing<String>` so the password is wiped from memory on drop.
pub fn prompt_new_password() -> Result<Zeroizing<String>> {
    // Check the environment variable first (CI/scripting friendly).
    if let Ok(pw) = std::env::var("CREDVAULT_PASSWORD") {
        if !pw.is_empty() {
            if pw.len() < MIN_PASSWORD_LEN {
                return Err(CredVaultError::CommandFailed(format!(
                    "password must be at least {MIN_PASSWORD_LEN} characters"
                )));
            }
            return Ok(Zeroizing::new(pw));
        }
    }

    loop {
        let password = dialoguer::Password::new()
            .with_prompt("Choose account password")
            .with_confirmation("Confirm account password", "Passwords do not match, try again")
            .interact()
            .map_err(|e| CredVaultError::CommandFailed(format!("password prompt: {e}")))?;

        if password.len() < MIN_PASSWORD_LEN {
            output::warning(&format!(
                "Password must be at least {MIN_PASSWORD_LEN} characters. Try again."
            ));
            continue;
        }

        return Ok(Zeroizing::new(password));
    }
}

/// Authenticate the owner before a vault or profile operation.
///
/// Prompts for the password and runs a full login; the resolved identity
/// is returned on success.  The vault commands use this as the caller-side
/// authorization boundary — the library itself only scopes by owner email.
pub fn authenticate(
    directory: &UserDirectory,
    email: &str,
) -> Result<crate::directory::UserIdentity> {
    let password = prompt_password(&format!("Password for {email}"))?;
    let outcome = directory.login(email, &password);
    match outcome.value {
        Some(user) if outcome.ok => Ok(user),
        _ => Err(CredVaultError::CommandFailed(outcome.message)),
    }
}
