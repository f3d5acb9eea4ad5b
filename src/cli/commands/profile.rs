//! `credvault profile` — update profile fields on an account.
//!
//! The caller authenticates first; edits are applied to a snapshot so a
//! failed update leaves the in-memory identity untouched.

use crate::cli::{authenticate, open_services, output, Cli};
use crate::errors::{CredVaultError, Result};

/// Optional profile edits collected from the command line.
pub struct ProfileEdits<'a> {
    pub first_name: Option<&'a str>,
    pub last_name: Option<&'a str>,
    pub phone: Option<&'a str>,
    pub language: Option<&'a str>,
    pub theme: Option<&'a str>,
    pub email_notifications: Option<bool>,
}

impl ProfileEdits<'_> {
    fn is_empty(&self) -> bool {
        self.first_name.is_none()
            && self.last_name.is_none()
            && self.phone.is_none()
            && self.language.is_none()
            && self.theme.is_none()
            && self.email_notifications.is_none()
    }
}

/// Execute the `profile` command.
pub fn execute(cli: &Cli, email: &str, edits: &ProfileEdits<'_>) -> Result<()> {
    if edits.is_empty() {
        output::info("Nothing to update.");
        return Ok(());
    }

    let (directory, _vault) = open_services(cli)?;
    let user = authenticate(&directory, email)?;

    let mut edited = user.snapshot();
    if let Some(v) = edits.first_name {
        edited.first_name = Some(v.to_string());
    }
    if let Some(v) = edits.last_name {
        edited.last_name = v.to_string();
    }
    if let Some(v) = edits.phone {
        edited.phone_number = Some(v.to_string());
    }
    if let Some(v) = edits.language {
        edited.language = v.to_string();
    }
    if let Some(v) = edits.theme {
        edited.theme = v.to_string();
    }
    if let Some(v) = edits.email_notifications {
        edited.email_notifications = v;
    }

    let outcome = directory.update(&edited);
    if !outcome.ok {
        return Err(CredVaultError::CommandFailed(outcome.message));
    }

    crate::audit::log_audit(cli, "profile.update", &user.email, None, None);
    output::success(&format!("Profile updated for {}", user.email));

    Ok(())
}
