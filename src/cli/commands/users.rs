//! `credvault users` — list every registered user.

use crate::cli::{open_services, output, Cli};
use crate::errors::{CredVaultError, Result};

/// Execute the `users` command.
pub fn execute(cli: &Cli, json: bool) -> Result<()> {
    let (directory, _vault) = open_services(cli)?;

    let users = directory.list_all();

    if json {
        // UserIdentity skips the password hash on serialize, so this can
        // never leak credentials.
        let rendered = serde_json::to_string_pretty(&users)
            .map_err(|e| CredVaultError::SerializationError(e.to_string()))?;
        println!("{rendered}");
        return Ok(());
    }

    output::info(&format!("{} registered user(s)", users.len()));
    output::print_users_table(&users);

    Ok(())
}
