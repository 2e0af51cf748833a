//! Core data models for FinVault
//!
//! This module contains the data structures of the three modules: shared
//! expense groups, tracked personal expenses and stored passwords.

pub mod amount;
pub mod expense;
pub mod group;
pub mod ids;
pub mod password;

pub use amount::{format_currency, format_plain, parse_amount, AmountError};
pub use expense::{Expense, ExportRow};
pub use group::{Group, GroupExpense, Member};
pub use ids::{ExpenseId, GroupExpenseId, GroupId, MemberId, PasswordId};
pub use password::{PasswordCategory, PasswordEntry};
