//! `credvault login` — verify credentials for an account.
//!
//! There is no session to create in a single-shot CLI; this command
//! exists to check that an email/password pair is valid.

use crate::cli::{open_services, output, prompt_password, Cli};
use crate::directory::normalize_email;
use crate::errors::{CredVaultError, Result};

/// Execute the `login` command.
pub fn execute(cli: &Cli, email: &str) -> Result<()> {
    let (directory, _vault) = open_services(cli)?;

    let password = prompt_password(&format!("Password for {email}"))?;
    let outcome = directory.login(email, &password);

    if !outcome.ok {
        // The failed attempt is logged without revealing whether the
        // account exists.
        crate::audit::log_audit(cli, "login.failed", "-", Some(&normalize_email(email)), None);
        return Err(CredVaultError::CommandFailed(outcome.message));
    }

    if let Some(user) = outcome.value {
        crate::audit::log_audit(cli, "login", &user.email, None, None);
        output::success(&format!("Login successful for {}", user.email));
    }

    Ok(())
}
