//! `credvault vault list` — display an owner's entries.

use crate::cli::{authenticate, open_services, output, Cli};
use crate::errors::{CredVaultError, Result};

/// Execute the `vault list` command.
pub fn execute(cli: &Cli, owner: &str, json: bool, show_payloads: bool) -> Result<()> {
    let (directory, vault) = open_services(cli)?;
    let user = authenticate(&directory, owner)?;

    let entries = vault.list(&user.email);

    if json {
        let rendered = serde_json::to_string_pretty(&entries)
            .map_err(|e| CredVaultError::SerializationError(e.to_string()))?;
        println!("{rendered}");
        return Ok(());
    }

    output::info(&format!("{} — {} entr(y/ies)", user.email, entries.len()));
    output::print_entries_table(&entries, show_payloads);

    Ok(())
}
