//! `credvault vault update` — modify an existing entry.

use crate::cli::{authenticate, open_services, output, Cli};
use crate::errors::{CredVaultError, Result};

/// Execute the `vault update` command.
pub fn execute(
    cli: &Cli,
    owner: &str,
    id: i64,
    title: Option<&str>,
    payload: Option<&str>,
    description: Option<&str>,
) -> Result<()> {
    let (directory, vault) = open_services(cli)?;
    let user = authenticate(&directory, owner)?;

    // Start from the stored entry so untouched fields survive.
    let current = vault
        .list(&user.email)
        .into_iter()
        .find(|e| e.id == id)
        .ok_or_else(|| {
            CredVaultError::CommandFailed(format!("no entry with id {id} for {}", user.email))
        })?;

    let mut edited = current.clone();
    if let Some(v) = title {
        edited.title = v.to_string();
    }
    if let Some(v) = payload {
        edited.payload = v.to_string();
    }
    if let Some(v) = description {
        edited.description = v.to_string();
    }

    match vault.update(&user.email, &edited) {
        Some(updated) => {
            crate::audit::log_audit(cli, "vault.update", &user.email, Some(&updated.title), None);
            output::success(&format!("Entry {} updated for {}", updated.id, user.email));
            Ok(())
        }
        None => Err(CredVaultError::CommandFailed(format!(
            "update failed for entry {id}"
        ))),
    }
}
