//! Seed collections
//!
//! Substituted when a record has never been written, so a fresh installation
//! opens with example data in every module.

use crate::models::{Expense, Group, GroupExpense, PasswordCategory, PasswordEntry};

/// Record key of the group collection
pub const GROUPS_KEY: &str = "groups";

/// Record key of the finance tracker collection
pub const EXPENSES_KEY: &str = "expenses";

/// Record key of the password collection
pub const PASSWORDS_KEY: &str = "passwords";

/// One "Roommates" group where Alice paid for pizza and Bob for utilities
pub fn seed_groups() -> Vec<Group> {
    let mut roommates = Group::new("Roommates", None);
    let alice = roommates.push_member("Alice");
    let bob = roommates.push_member("Bob");

    roommates
        .expenses
        .push(GroupExpense::new("Pizza", 20.0, alice));
    roommates
        .expenses
        .push(GroupExpense::new("Utilities", 40.0, bob));

    vec![roommates]
}

pub fn seed_expenses() -> Vec<Expense> {
    vec![
        Expense::new("Groceries", 50.0),
        Expense::new("Internet", 30.0),
    ]
}

pub fn seed_passwords() -> Vec<PasswordEntry> {
    vec![
        PasswordEntry::new(
            "Gmail",
            "alice@gmail.com",
            "password123",
            PasswordCategory::Email,
        ),
        PasswordEntry::new("Amazon", "alice", "amzpass456", PasswordCategory::Shopping),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_groups_are_consistent() {
        let groups = seed_groups();
        assert_eq!(groups.len(), 1);

        let roommates = &groups[0];
        assert_eq!(roommates.name, "Roommates");
        assert_eq!(roommates.members.len(), 2);
        assert_eq!(roommates.expenses.len(), 2);
        assert!(roommates.validate().is_ok());
    }

    #[test]
    fn test_seed_expenses() {
        let names: Vec<_> = seed_expenses().into_iter().map(|e| e.name).collect();
        assert_eq!(names, vec!["Groceries", "Internet"]);
    }

    #[test]
    fn test_seed_passwords_are_valid() {
        let entries = seed_passwords();
        assert_eq!(entries.len(), 2);
        assert!(entries.iter().all(|e| e.validate().is_ok()));
    }
}
