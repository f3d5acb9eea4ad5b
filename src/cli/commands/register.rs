//! `credvault register` — create a new account.

use crate::cli::{open_services, output, prompt_new_password, Cli};
use crate::errors::{CredVaultError, Result};

/// Execute the `register` command.
pub fn execute(
    cli: &Cli,
    email: &str,
    first_name: Option<&str>,
    last_name: Option<&str>,
) -> Result<()> {
    let (directory, _vault) = open_services(cli)?;

    let password = prompt_new_password()?;
    let outcome = directory.register(email, &password, first_name, last_name.unwrap_or(""));

    if !outcome.ok {
        return Err(CredVaultError::CommandFailed(outcome.message));
    }

    if let Some(user) = outcome.value {
        crate::audit::log_audit(cli, "register", &user.email, None, Some("account created"));
        output::success(&format!("Account created for {} (id {})", user.email, user.id));
        output::tip("Add a secret: credvault vault add <email> <title>");
    }

    Ok(())
}
