//! Display formatting for terminal output
//!
//! Provides utilities for formatting data models for terminal display.
//! Amounts are rounded to cents here and nowhere else.

pub mod expense;
pub mod group;
pub mod password;

pub use expense::{format_distribution, format_expense_page};
pub use group::{format_balances, format_group_details, format_group_list};
pub use password::{format_password_list, format_strength};
