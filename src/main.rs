use clap::Parser;
use credvault::cli::commands::profile::ProfileEdits;
use credvault::cli::{Cli, Commands, VaultAction};

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Register {
            ref email,
            ref first_name,
            ref last_name,
        } => credvault::cli::commands::register::execute(
            &cli,
            email,
            first_name.as_deref(),
            last_name.as_deref(),
        ),
        Commands::Login { ref email } => credvault::cli::commands::login::execute(&cli, email),
        Commands::Users { json } => credvault::cli::commands::users::execute(&cli, json),
        Commands::Profile {
            ref email,
            ref first_name,
            ref last_name,
            ref phone,
            ref language,
            ref theme,
            email_notifications,
        } => {
            let edits = ProfileEdits {
                first_name: first_name.as_deref(),
                last_name: last_name.as_deref(),
                phone: phone.as_deref(),
                language: language.as_deref(),
                theme: theme.as_deref(),
                email_notifications,
            };
            credvault::cli::commands::profile::execute(&cli, email, &edits)
        }
        Commands::Vault { ref action } => match *action {
            VaultAction::Add {
                ref owner,
                ref title,
                ref payload,
                ref description,
            } => credvault::cli::commands::vault_add::execute(
                &cli,
                owner,
                title,
                payload.as_deref(),
                description,
            ),
            VaultAction::List {
                ref owner,
                json,
                show_payloads,
            } => credvault::cli::commands::vault_list::execute(&cli, owner, json, show_payloads),
            VaultAction::Update {
                ref owner,
                id,
                ref title,
                ref payload,
                ref description,
            } => credvault::cli::commands::vault_update::execute(
                &cli,
                owner,
                id,
                title.as_deref(),
                payload.as_deref(),
                description.as_deref(),
            ),
            VaultAction::Delete { ref owner, id, force } => {
                credvault::cli::commands::vault_delete::execute(&cli, owner, id, force)
            }
        },
        Commands::Audit { last, ref since } => {
            credvault::cli::commands::audit_cmd::execute(&cli, last, since.as_deref())
        }
        Commands::Completions { ref shell } => {
            credvault::cli::commands::completions::execute(shell)
        }
    };

    if let Err(e) = result {
        credvault::cli::output::error(&e.to_string());
        std::process::exit(1);
    }
}
