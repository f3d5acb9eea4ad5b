//! `credvault vault delete` — remove an entry from an owner's vault.

use dialoguer::Confirm;

use crate::cli::{authenticate, open_services, output, Cli};
use crate::errors::{CredVaultError, Result};

/// Execute the `vault delete` command.
pub fn execute(cli: &Cli, owner: &str, id: i64, force: bool) -> Result<()> {
    // Unless --force is set, ask for confirmation before deleting.
    if !force {
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete entry {id}?"))
            .default(false)
            .interact()
            .map_err(|e| CredVaultError::CommandFailed(format!("confirm prompt: {e}")))?;

        if !confirmed {
            output::info("Cancelled.");
            return Ok(());
        }
    }

    let (directory, vault) = open_services(cli)?;
    let user = authenticate(&directory, owner)?;

    if !vault.delete(&user.email, id) {
        return Err(CredVaultError::CommandFailed(format!(
            "delete failed for entry {id}"
        )));
    }

    crate::audit::log_audit(cli, "vault.delete", &user.email, Some(&id.to_string()), None);
    output::success(&format!("Deleted entry {id}"));

    Ok(())
}
