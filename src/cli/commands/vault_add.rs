//! `credvault vault add` — add a new entry to an owner's vault.

use std::io::{self, IsTerminal, Read};

use crate::cli::{authenticate, open_services, output, Cli};
use crate::errors::{CredVaultError, Result};
use crate::vault::VaultEntry;

/// Execute the `vault add` command.
pub fn execute(
    cli: &Cli,
    owner: &str,
    title: &str,
    payload: Option<&str>,
    description: &str,
) -> Result<()> {
    // Determine the payload from one of three sources.
    let payload = if let Some(v) = payload {
        // Source 1: Inline value on the command line.
        output::warning("Payload provided on command line — it may appear in shell history.");
        v.to_string()
    } else if !io::stdin().is_terminal() {
        // Source 2: Piped input (stdin is not a terminal).
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        buf.trim_end().to_string()
    } else {
        // Source 3: Interactive secure prompt (default).
        dialoguer::Password::new()
            .with_prompt(format!("Enter secret for '{title}'"))
            .interact()
            .map_err(|e| CredVaultError::CommandFailed(format!("input prompt: {e}")))?
    };

    let (directory, vault) = open_services(cli)?;
    let user = authenticate(&directory, owner)?;

    let added = vault.add(&user.email, VaultEntry::new(title, &payload, description));
    if !added.is_persisted() {
        return Err(CredVaultError::CommandFailed(format!(
            "could not add entry for {}",
            user.email
        )));
    }

    crate::audit::log_audit(cli, "vault.add", &user.email, Some(title), None);
    output::success(&format!(
        "Entry '{}' added for {} (id {})",
        title, user.email, added.id
    ));

    Ok(())
}
