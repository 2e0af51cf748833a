use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use finvault::cli::{handle_expense_command, handle_group_command, handle_password_command};
use finvault::config::{paths::FinVaultPaths, settings::Settings};
use finvault::storage::Storage;

#[derive(Parser)]
#[command(
    name = "finvault",
    version,
    about = "Shared expenses, personal spending and passwords in one place",
    long_about = "FinVault splits shared group expenses evenly between members, \
                  tracks personal spending, and keeps a small password vault. \
                  Data lives in JSON files under the FinVault data directory."
)]
struct Cli {
    /// Directory holding settings, data and the audit log
    #[arg(long, global = true, env = "FINVAULT_DATA_DIR")]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Expense-sharing groups and balances
    #[command(subcommand)]
    Group(finvault::cli::GroupCommands),

    /// Personal expense tracker
    #[command(subcommand)]
    Expense(finvault::cli::ExpenseCommands),

    /// Password manager
    #[command(subcommand, alias = "pw")]
    Password(finvault::cli::PasswordCommands),

    /// Show recent changes from the audit log
    History {
        /// Number of entries to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize paths and settings
    let paths = match cli.data_dir {
        Some(dir) => FinVaultPaths::with_base_dir(dir),
        None => FinVaultPaths::new()?,
    };
    let settings = Settings::load_or_create(&paths)?;

    // Initialize storage
    let mut storage = Storage::new(paths.clone())?;
    storage.load_all()?;

    match cli.command {
        Some(Commands::Group(cmd)) => {
            handle_group_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Expense(cmd)) => {
            handle_expense_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Password(cmd)) => {
            handle_password_command(&storage, &settings, cmd)?;
        }
        Some(Commands::History { limit }) => {
            let entries = match storage.audit_logger() {
                Some(logger) => logger.read_recent(limit)?,
                None => Vec::new(),
            };
            if entries.is_empty() {
                println!("No changes recorded yet.");
            }
            for entry in entries {
                println!("{}", entry.format_human_readable());
            }
        }
        Some(Commands::Config) => {
            println!("FinVault Configuration");
            println!("======================");
            println!("Base directory:  {}", paths.base_dir().display());
            println!("Data directory:  {}", paths.data_dir().display());
            println!("Settings file:   {}", paths.settings_file().display());
            println!("Audit log:       {}", paths.audit_log().display());
            println!();
            println!("Settings:");
            println!("  Currency symbol:  {}", settings.currency_symbol);
            println!("  Page size:        {}", settings.page_size);
            println!("  Password length:  {}", settings.password_length);
            println!("  Share base URL:   {}", settings.share_base_url);
        }
        None => {
            println!("FinVault - shared expenses, spending and passwords");
            println!();
            println!("Run 'finvault --help' for usage information.");
        }
    }

    Ok(())
}
