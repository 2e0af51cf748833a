//! Expense CLI commands
//!
//! Implements CLI commands for the finance tracker.

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::{format_distribution, format_expense_page};
use crate::error::{FinVaultError, FinVaultResult};
use crate::models::{format_currency, Expense};
use crate::services::{ExpenseService, ExpenseView, SortDirection, SortField};
use crate::storage::Storage;

/// Expense subcommands
#[derive(Subcommand)]
pub enum ExpenseCommands {
    /// List expenses, one page at a time
    List {
        /// Only expenses whose name or amount contains this text
        #[arg(short, long)]
        search: Option<String>,
        /// Sort by `name` or `amount`
        #[arg(long)]
        sort: Option<SortField>,
        /// Sort in descending order
        #[arg(long)]
        desc: bool,
        /// Page number, starting at 1
        #[arg(short, long, default_value = "1")]
        page: usize,
        /// Rows per page (defaults to the configured page size)
        #[arg(long)]
        page_size: Option<usize>,
    },
    /// Add an expense
    Add {
        /// Expense name
        name: String,
        /// Amount, e.g. 50 or 12.99
        #[arg(allow_hyphen_values = true)]
        amount: String,
    },
    /// Change an expense's name and amount
    Update {
        /// Expense ID
        expense: String,
        /// New name
        name: String,
        /// New amount
        #[arg(allow_hyphen_values = true)]
        amount: String,
    },
    /// Delete an expense
    Delete {
        /// Expense ID
        expense: String,
    },
    /// Export expenses as CSV
    Export {
        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Show totals per expense name
    Distribution,
}

/// Handle an expense command
pub fn handle_expense_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ExpenseCommands,
) -> FinVaultResult<()> {
    let service = ExpenseService::new(storage);
    let currency = settings.currency_symbol.as_str();

    match cmd {
        ExpenseCommands::List {
            search,
            sort,
            desc,
            page,
            page_size,
        } => {
            let direction = if desc {
                SortDirection::Descending
            } else {
                SortDirection::Ascending
            };

            let view = ExpenseView {
                query: search.unwrap_or_default(),
                sort: sort.map(|field| (field, direction)),
                page_index: page.saturating_sub(1),
                page_size: page_size.unwrap_or(settings.page_size),
            };

            let page = service.view(&view)?;
            println!("{}", format_expense_page(&page, currency).trim_end());
        }

        ExpenseCommands::Add { name, amount } => {
            let expense = service.add(&name, &amount)?;
            println!(
                "Added expense: {} {}",
                expense.name,
                format_currency(expense.amount, currency)
            );
            println!("  ID: {}", expense.id);
        }

        ExpenseCommands::Update {
            expense,
            name,
            amount,
        } => {
            let existing = resolve_expense(&service, &expense)?;
            let updated = service.update(existing.id, &name, &amount)?;
            println!(
                "Updated expense: {} {}",
                updated.name,
                format_currency(updated.amount, currency)
            );
        }

        ExpenseCommands::Delete { expense } => {
            let existing = resolve_expense(&service, &expense)?;
            let deleted = service.delete(existing.id)?;
            println!("Deleted expense: {}", deleted.name);
        }

        ExpenseCommands::Export { output } => match output {
            Some(path) => {
                let file = File::create(&path).map_err(|e| {
                    FinVaultError::Export(format!("Failed to create {}: {}", path.display(), e))
                })?;
                let count = service.export_csv(BufWriter::new(file))?;
                println!("Exported {} expenses to {}", count, path.display());
            }
            None => {
                service.export_csv(std::io::stdout().lock())?;
            }
        },

        ExpenseCommands::Distribution => {
            let totals = service.distribution()?;
            println!("{}", format_distribution(&totals, currency).trim_end());
        }
    }

    Ok(())
}

fn resolve_expense(service: &ExpenseService, identifier: &str) -> FinVaultResult<Expense> {
    service
        .find(identifier)?
        .ok_or_else(|| FinVaultError::expense_not_found(identifier))
}
