//! Group CLI commands
//!
//! Implements CLI commands for expense-sharing groups.

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::{format_balances, format_group_details, format_group_list};
use crate::error::{FinVaultError, FinVaultResult};
use crate::models::{format_currency, Group};
use crate::services::GroupService;
use crate::storage::Storage;

/// Group subcommands
#[derive(Subcommand)]
pub enum GroupCommands {
    /// List all groups
    List {
        /// Only groups whose name contains this text
        #[arg(short, long)]
        search: Option<String>,
    },
    /// Show a group's members and expenses
    Show {
        /// Group name or ID
        group: String,
    },
    /// Create a new group
    Create {
        /// Group name
        name: String,
        /// Avatar image URL
        #[arg(short, long)]
        avatar: Option<String>,
    },
    /// Rename a group
    Rename {
        /// Group name or ID
        group: String,
        /// New name
        name: String,
        /// New avatar image URL (omit to keep the current one)
        #[arg(short, long)]
        avatar: Option<String>,
        /// Remove the avatar
        #[arg(long, conflicts_with = "avatar")]
        clear_avatar: bool,
    },
    /// Delete a group and all its expenses
    Delete {
        /// Group name or ID
        group: String,
    },
    /// Add a member to a group
    AddMember {
        /// Group name or ID
        group: String,
        /// Member name
        name: String,
    },
    /// Remove a member who has not paid for anything
    RemoveMember {
        /// Group name or ID
        group: String,
        /// Member name or ID
        member: String,
    },
    /// Record a shared expense
    AddExpense {
        /// Group name or ID
        group: String,
        /// What the money was spent on
        description: String,
        /// Amount, e.g. 20 or 12.50
        #[arg(allow_hyphen_values = true)]
        amount: String,
        /// Member who paid (name or ID)
        #[arg(short, long)]
        paid_by: String,
    },
    /// Remove a shared expense
    RemoveExpense {
        /// Group name or ID
        group: String,
        /// Expense ID
        expense: String,
    },
    /// Show who owes and who is owed
    Balances {
        /// Group name or ID
        group: String,
    },
    /// Print the share text and link for a group
    Share {
        /// Group name or ID
        group: String,
        /// Print only the link
        #[arg(long)]
        url_only: bool,
    },
}

/// Handle a group command
pub fn handle_group_command(
    storage: &Storage,
    settings: &Settings,
    cmd: GroupCommands,
) -> FinVaultResult<()> {
    let service = GroupService::new(storage);
    let currency = settings.currency_symbol.as_str();

    match cmd {
        GroupCommands::List { search } => {
            let groups = match search {
                Some(query) => service.search(&query)?,
                None => service.list()?,
            };
            println!("{}", format_group_list(&groups, currency).trim_end());
        }

        GroupCommands::Show { group } => {
            let group = resolve_group(&service, &group)?;
            println!("{}", format_group_details(&group, currency).trim_end());
        }

        GroupCommands::Create { name, avatar } => {
            let group = service.create_group(&name, avatar)?;
            println!("Created group: {}", group.name);
            println!("  ID: {}", group.id);
        }

        GroupCommands::Rename {
            group,
            name,
            avatar,
            clear_avatar,
        } => {
            let group = resolve_group(&service, &group)?;
            let old_name = group.name.clone();
            let avatar = if clear_avatar {
                None
            } else {
                avatar.or(group.avatar.clone())
            };
            let renamed = service.rename_group(group.id, &name, avatar)?;
            println!("Renamed group '{}' to '{}'", old_name, renamed.name);
        }

        GroupCommands::Delete { group } => {
            let group = resolve_group(&service, &group)?;
            let deleted = service.delete_group(group.id)?;
            println!(
                "Deleted group: {} ({} expenses removed)",
                deleted.name,
                deleted.expenses.len()
            );
        }

        GroupCommands::AddMember { group, name } => {
            let group = resolve_group(&service, &group)?;
            let member = service.add_member(group.id, &name)?;
            println!("Added {} to {}", member.name, group.name);
            println!("  ID: {}", member.id);
            if !group.members_named(&member.name).is_empty() {
                println!(
                    "Note: {} already had a member named '{}'; both are kept separately.",
                    group.name, member.name
                );
            }
        }

        GroupCommands::RemoveMember { group, member } => {
            let group = resolve_group(&service, &group)?;
            let member = service.find_member(&group, &member)?;
            service.remove_member(group.id, member.id)?;
            println!("Removed {} from {}", member.name, group.name);
        }

        GroupCommands::AddExpense {
            group,
            description,
            amount,
            paid_by,
        } => {
            let group = resolve_group(&service, &group)?;
            let payer = service.find_member(&group, &paid_by)?;
            let expense = service.add_expense(group.id, &description, &amount, payer.id)?;
            println!(
                "Added expense: {} {} (paid by {})",
                expense.description,
                format_currency(expense.amount, currency),
                payer.name
            );
            println!("  ID: {}", expense.id);
        }

        GroupCommands::RemoveExpense { group, expense } => {
            let group = resolve_group(&service, &group)?;
            let expense_id = group
                .expenses
                .iter()
                .find(|e| e.id.matches(&expense))
                .map(|e| e.id)
                .ok_or_else(|| FinVaultError::expense_not_found(expense.clone()))?;
            let removed = service.remove_expense(group.id, expense_id)?;
            println!("Removed expense: {}", removed.description);
        }

        GroupCommands::Balances { group } => {
            let group = resolve_group(&service, &group)?;
            let balances = service.balances(group.id)?;
            println!("{}", format_balances(&group, &balances, currency).trim_end());
        }

        GroupCommands::Share { group, url_only } => {
            let group = resolve_group(&service, &group)?;
            let url = service.share_url(group.id, &settings.share_base_url)?;
            if !url_only {
                println!("{}", service.share_summary(group.id)?);
                println!();
            }
            println!("{}", url);
        }
    }

    Ok(())
}

fn resolve_group(service: &GroupService, identifier: &str) -> FinVaultResult<Group> {
    service
        .find(identifier)?
        .ok_or_else(|| FinVaultError::group_not_found(identifier))
}
