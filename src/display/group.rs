//! Group display formatting
//!
//! Formats groups, their members and balances for terminal output.

use crate::models::{format_currency, Group};
use crate::services::MemberBalance;

/// Format a list of groups as a table
pub fn format_group_list(groups: &[Group], currency: &str) -> String {
    if groups.is_empty() {
        return "No groups found.".to_string();
    }

    let name_width = groups
        .iter()
        .map(|g| g.name.chars().count())
        .max()
        .unwrap_or(4)
        .max(4);

    let mut output = String::new();
    output.push_str(&format!(
        "{:<12}  {:<name_width$}  {:>7}  {:>8}  {:>12}\n",
        "ID",
        "Name",
        "Members",
        "Expenses",
        "Total",
        name_width = name_width,
    ));
    output.push_str(&format!(
        "{:-<12}  {:-<name_width$}  {:->7}  {:->8}  {:->12}\n",
        "",
        "",
        "",
        "",
        "",
        name_width = name_width,
    ));

    for group in groups {
        output.push_str(&format!(
            "{:<12}  {:<name_width$}  {:>7}  {:>8}  {:>12}\n",
            group.id.to_string(),
            group.name,
            group.members.len(),
            group.expenses.len(),
            format_currency(group.total_spent(), currency),
            name_width = name_width,
        ));
    }

    output
}

/// Format one group with members and expenses
pub fn format_group_details(group: &Group, currency: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!("Group: {}\n", group.name));
    output.push_str(&format!("  ID:       {}\n", group.id));
    if let Some(avatar) = &group.avatar {
        output.push_str(&format!("  Avatar:   {}\n", avatar));
    }
    output.push_str(&format!(
        "  Created:  {}\n",
        group.created_at.format("%Y-%m-%d %H:%M")
    ));

    output.push_str("\nMembers:\n");
    if group.members.is_empty() {
        output.push_str("  (none)\n");
    }
    for member in &group.members {
        output.push_str(&format!("  {:<12}  {}\n", member.id.to_string(), member.name));
    }

    output.push_str("\nExpenses:\n");
    if group.expenses.is_empty() {
        output.push_str("  (none)\n");
    }
    for expense in &group.expenses {
        output.push_str(&format!(
            "  {:<12}  {:<24}  {:>12}  paid by {}\n",
            expense.id.to_string(),
            expense.description,
            format_currency(expense.amount, currency),
            group.member_name(expense.paid_by),
        ));
    }

    output
}

/// Format balances rounded to cents
pub fn format_balances(group: &Group, balances: &[MemberBalance], currency: &str) -> String {
    if balances.is_empty() {
        return format!("{} has no members.", group.name);
    }

    let name_width = balances
        .iter()
        .map(|b| b.name.chars().count())
        .max()
        .unwrap_or(6)
        .max(6);

    let mut output = String::new();
    output.push_str(&format!("Balances for {}\n\n", group.name));
    output.push_str(&format!(
        "{:<name_width$}  {:>12}  {}\n",
        "Member",
        "Balance",
        "Status",
        name_width = name_width,
    ));
    output.push_str(&format!(
        "{:-<name_width$}  {:->12}  {:-<8}\n",
        "",
        "",
        "",
        name_width = name_width,
    ));

    for balance in balances {
        let rounded = (balance.amount * 100.0).round() / 100.0;
        let status = if rounded > 0.0 {
            "is owed"
        } else if rounded < 0.0 {
            "owes"
        } else {
            "settled"
        };

        output.push_str(&format!(
            "{:<name_width$}  {:>12}  {}\n",
            balance.name,
            format_currency(balance.amount, currency),
            status,
            name_width = name_width,
        ));
    }

    output
}
