//! Balance calculation for expense-sharing groups
//!
//! Balances are derived from a group's members and expenses on every read and
//! never stored. Each expense is split evenly across all current members:
//! the payer is credited everyone else's share and every other member owes
//! one share. Positive means the member is owed money.

use serde::Serialize;

use crate::models::{Group, MemberId};

/// Net position of one member
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MemberBalance {
    pub member_id: MemberId,
    pub name: String,
    pub amount: f64,
}

/// Compute every member's balance, in member order
///
/// A group without members has no balances. Amounts keep full precision.
pub fn compute_balances(group: &Group) -> Vec<MemberBalance> {
    let mut balances: Vec<MemberBalance> = group
        .members
        .iter()
        .map(|m| MemberBalance {
            member_id: m.id,
            name: m.name.clone(),
            amount: 0.0,
        })
        .collect();

    if balances.is_empty() {
        return balances;
    }

    let member_count = balances.len() as f64;
    for expense in &group.expenses {
        let share = expense.amount / member_count;
        for balance in balances.iter_mut() {
            if balance.member_id == expense.paid_by {
                balance.amount += expense.amount - share;
            } else {
                balance.amount -= share;
            }
        }
    }

    balances
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::GroupExpense;
    use crate::storage::seed::seed_groups;

    fn group_with(names: &[&str]) -> (Group, Vec<MemberId>) {
        let mut group = Group::new("Test", None);
        let ids = names.iter().map(|n| group.push_member(*n)).collect();
        (group, ids)
    }

    fn total(balances: &[MemberBalance]) -> f64 {
        balances.iter().map(|b| b.amount).sum()
    }

    #[test]
    fn test_two_members_one_expense() {
        let (mut group, ids) = group_with(&["A", "B"]);
        group
            .push_expense(GroupExpense::new("Dinner", 20.0, ids[0]))
            .unwrap();

        let balances = compute_balances(&group);
        assert_eq!(balances.len(), 2);
        assert_eq!(balances[0].name, "A");
        assert!((balances[0].amount - 10.0).abs() < 1e-9);
        assert!((balances[1].amount + 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_single_member_is_even() {
        let (mut group, ids) = group_with(&["Solo"]);
        group
            .push_expense(GroupExpense::new("Rent", 900.0, ids[0]))
            .unwrap();

        let balances = compute_balances(&group);
        assert_eq!(balances.len(), 1);
        assert!(balances[0].amount.abs() < 1e-9);
    }

    #[test]
    fn test_no_members_no_balances() {
        let group = Group::new("Empty", None);
        assert!(compute_balances(&group).is_empty());
    }

    #[test]
    fn test_no_expenses_all_zero() {
        let (group, _) = group_with(&["A", "B", "C"]);
        let balances = compute_balances(&group);
        assert_eq!(balances.len(), 3);
        assert!(balances.iter().all(|b| b.amount == 0.0));
    }

    #[test]
    fn test_sum_is_zero() {
        let (mut group, ids) = group_with(&["A", "B", "C"]);
        for (i, amount) in [10.0, 33.33, 7.01, 100.0, 0.1].iter().enumerate() {
            group
                .push_expense(GroupExpense::new("Item", *amount, ids[i % ids.len()]))
                .unwrap();
        }

        assert!(total(&compute_balances(&group)).abs() < 1e-9);
    }

    #[test]
    fn test_thirds_keep_precision() {
        let (mut group, ids) = group_with(&["A", "B", "C"]);
        group
            .push_expense(GroupExpense::new("Taxi", 10.0, ids[0]))
            .unwrap();

        let balances = compute_balances(&group);
        assert!((balances[0].amount - 20.0 / 3.0).abs() < 1e-9);
        assert!((balances[1].amount + 10.0 / 3.0).abs() < 1e-9);
        assert!((balances[2].amount + 10.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_duplicate_names_are_separate_entries() {
        let (mut group, ids) = group_with(&["Alex", "Alex"]);
        group
            .push_expense(GroupExpense::new("Fuel", 40.0, ids[1]))
            .unwrap();

        let balances = compute_balances(&group);
        assert_eq!(balances.len(), 2);
        assert!((balances[0].amount + 20.0).abs() < 1e-9);
        assert!((balances[1].amount - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_seed_group() {
        let group = seed_groups().remove(0);
        let balances = compute_balances(&group);

        // Pizza 20 by Alice, Utilities 40 by Bob
        assert!((balances[0].amount + 10.0).abs() < 1e-9);
        assert!((balances[1].amount - 10.0).abs() < 1e-9);
    }
}
