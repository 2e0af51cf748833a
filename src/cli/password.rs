//! Password CLI commands
//!
//! Implements CLI commands for the password manager.

use std::io::{BufRead, IsTerminal};
use std::path::PathBuf;

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::{format_password_list, format_strength};
use crate::error::{FinVaultError, FinVaultResult};
use crate::models::{PasswordCategory, PasswordEntry};
use crate::services::{masked, PasswordService};
use crate::storage::Storage;

/// Password subcommands
#[derive(Subcommand)]
pub enum PasswordCommands {
    /// List stored passwords (masked)
    List {
        /// Only entries whose site, username or category contains this text
        #[arg(short, long)]
        search: Option<String>,
    },
    /// Show one entry
    Show {
        /// Entry ID or site
        entry: String,
        /// Print the password in clear text
        #[arg(long)]
        reveal: bool,
    },
    /// Store a new password
    Add {
        /// Site or service name
        site: String,
        /// Username or email
        username: String,
        /// Password (generated when omitted)
        #[arg(short, long)]
        password: Option<String>,
        /// Read the password without echoing it
        #[arg(long, conflicts_with = "password")]
        prompt: bool,
        /// Email, Social, Shopping, Banking or Other
        #[arg(short, long, default_value = "Other")]
        category: PasswordCategory,
    },
    /// Change fields of a stored password
    Update {
        /// Entry ID or site
        entry: String,
        #[arg(long)]
        site: Option<String>,
        #[arg(long)]
        username: Option<String>,
        #[arg(long)]
        password: Option<String>,
        /// Read the new password without echoing it
        #[arg(long, conflicts_with = "password")]
        prompt: bool,
        #[arg(long)]
        category: Option<PasswordCategory>,
    },
    /// Delete a stored password
    Delete {
        /// Entry ID or site
        entry: String,
    },
    /// Generate a random password
    Generate {
        /// Number of characters (defaults to the configured length)
        #[arg(short, long)]
        length: Option<usize>,
    },
    /// Score a password from 0 to 5
    Strength {
        /// Password to check (prompted for when omitted)
        #[arg(allow_hyphen_values = true)]
        password: Option<String>,
    },
    /// Export all passwords as an encoded vault blob
    Export {
        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Replace all passwords with the contents of a vault blob
    Import {
        /// File containing the blob
        file: PathBuf,
    },
}

/// Handle a password command
pub fn handle_password_command(
    storage: &Storage,
    settings: &Settings,
    cmd: PasswordCommands,
) -> FinVaultResult<()> {
    let service = PasswordService::new(storage);

    match cmd {
        PasswordCommands::List { search } => {
            let entries = match search {
                Some(query) => service.search(&query)?,
                None => service.list()?,
            };
            println!("{}", format_password_list(&entries).trim_end());
        }

        PasswordCommands::Show { entry, reveal } => {
            let entry = resolve_entry(&service, &entry)?;
            let shown = if reveal { entry.clone() } else { masked(&entry) };
            let (score, _) = service.strength(&entry.password);

            println!("Site:     {}", shown.site);
            println!("Username: {}", shown.username);
            println!("Password: {}", shown.password);
            println!("Category: {}", shown.category);
            println!("Strength: {}", format_strength(score));
            println!("ID:       {}", shown.id);
        }

        PasswordCommands::Add {
            site,
            username,
            password,
            prompt,
            category,
        } => {
            let password = if prompt {
                Some(read_secret("Password: ")?)
            } else {
                password
            };
            let (password, generated) = match password {
                Some(p) => (p, false),
                None => (service.generate(settings.password_length), true),
            };
            let entry = service.add(&site, &username, &password, category)?;
            println!("Stored password for {} ({})", entry.site, entry.username);
            if generated {
                println!("Generated password: {}", entry.password);
            }
            println!("  ID: {}", entry.id);
        }

        PasswordCommands::Update {
            entry,
            site,
            username,
            password,
            prompt,
            category,
        } => {
            let existing = resolve_entry(&service, &entry)?;
            let password = if prompt {
                Some(read_secret("New password: ")?)
            } else {
                password
            };
            let updated = service.update(
                existing.id,
                site.as_deref().unwrap_or(&existing.site),
                username.as_deref().unwrap_or(&existing.username),
                password.as_deref().unwrap_or(&existing.password),
                category.unwrap_or(existing.category),
            )?;
            println!("Updated password for {}", updated.site);
        }

        PasswordCommands::Delete { entry } => {
            let existing = resolve_entry(&service, &entry)?;
            let deleted = service.delete(existing.id)?;
            println!("Deleted password for {} ({})", deleted.site, deleted.username);
        }

        PasswordCommands::Generate { length } => {
            println!("{}", service.generate(length.unwrap_or(settings.password_length)));
        }

        PasswordCommands::Strength { password } => {
            let password = match password {
                Some(p) => p,
                None => read_secret("Password: ")?,
            };
            let (score, _) = service.strength(&password);
            println!("{}", format_strength(score));
        }

        PasswordCommands::Export { output } => {
            let blob = service.export_vault()?;
            match output {
                Some(path) => {
                    std::fs::write(&path, format!("{}\n", blob)).map_err(|e| {
                        FinVaultError::Export(format!(
                            "Failed to write {}: {}",
                            path.display(),
                            e
                        ))
                    })?;
                    println!("Exported vault to {}", path.display());
                    println!("Note: the export is encoded, not encrypted. Keep it private.");
                }
                None => println!("{}", blob),
            }
        }

        PasswordCommands::Import { file } => {
            let blob = std::fs::read_to_string(&file).map_err(|e| {
                FinVaultError::Import(format!("Failed to read {}: {}", file.display(), e))
            })?;
            let count = service.import_vault(&blob)?;
            println!("Imported {} passwords from {}", count, file.display());
        }
    }

    Ok(())
}

fn resolve_entry(service: &PasswordService, identifier: &str) -> FinVaultResult<PasswordEntry> {
    service
        .find(identifier)?
        .ok_or_else(|| FinVaultError::password_not_found(identifier))
}

/// Read a password with echo disabled, or a plain line when stdin is piped
fn read_secret(prompt: &str) -> FinVaultResult<String> {
    if std::io::stdin().is_terminal() {
        return rpassword::prompt_password(prompt)
            .map_err(|e| FinVaultError::Io(format!("Failed to read password: {}", e)));
    }

    let mut line = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut line)
        .map_err(|e| FinVaultError::Io(format!("Failed to read password: {}", e)))?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}
