//! Colored terminal output helpers.
//!
//! All user-facing output goes through these functions so we get
//! consistent styling across every command.

use comfy_table::{ContentArrangement, Table};
use console::style;

use crate::directory::UserIdentity;
use crate::vault::VaultEntry;

/// Print a green success message: "check_mark {msg}"
pub fn success(msg: &str) {
    println!("{} {}", style("\u{2713}").green().bold(), msg);
}

/// Print a red error message: "x_mark {msg}"
pub fn error(msg: &str) {
    eprintln!("{} {}", style("\u{2717}").red().bold(), msg);
}

/// Print a yellow warning: "warning_sign {msg}"
pub fn warning(msg: &str) {
    eprintln!("{} {}", style("\u{26a0}").yellow().bold(), msg);
}

/// Print a blue info message: "info_sign {msg}"
pub fn info(msg: &str) {
    println!("{} {}", style("\u{2139}").blue().bold(), msg);
}

/// Print a dim tip/hint: "arrow {msg}"
pub fn tip(msg: &str) {
    println!("{} {}", style("\u{2192}").dim(), style(msg).dim());
}

/// Print a table of registered users (never includes hashes).
pub fn print_users_table(users: &[UserIdentity]) {
    if users.is_empty() {
        info("No users registered yet.");
        tip("Run `credvault register <email>` to create the first account.");
        return;
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Id", "Email", "Name", "Created"]);

    for u in users {
        let name = match (&u.first_name, &u.last_name) {
            (Some(first), last) if !last.is_empty() => format!("{first} {last}"),
            (Some(first), _) => first.clone(),
            (None, last) => last.clone(),
        };
        table.add_row(vec![
            u.id.to_string(),
            u.email.clone(),
            name,
            u.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        ]);
    }

    println!("{table}");
}

/// Print a table of vault entries.
///
/// Payloads stay masked unless `show_payloads` is set.
pub fn print_entries_table(entries: &[VaultEntry], show_payloads: bool) {
    if entries.is_empty() {
        info("No vault entries for this owner yet.");
        tip("Run `credvault vault add <owner> <title>` to add one.");
        return;
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Id", "Title", "Payload", "Description", "Created"]);

    for e in entries {
        let payload = if show_payloads {
            e.payload.clone()
        } else {
            "********".to_string()
        };
        table.add_row(vec![
            e.id.to_string(),
            e.title.clone(),
            payload,
            e.description.clone(),
            e.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        ]);
    }

    println!("{table}");
}
