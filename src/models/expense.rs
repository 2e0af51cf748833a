//! Standalone expense model for the finance tracker
//!
//! Unrelated to group expenses: a flat list of named amounts.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::ExpenseId;

/// A tracked personal expense
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: ExpenseId,
    pub name: String,
    pub amount: f64,
}

/// The fields of an expense that leave the application on export
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportRow {
    pub name: String,
    pub amount: f64,
}

impl Expense {
    pub fn new(name: impl Into<String>, amount: f64) -> Self {
        Self {
            id: ExpenseId::new(),
            name: name.into(),
            amount,
        }
    }

    /// Validate the expense
    pub fn validate(&self) -> Result<(), ExpenseValidationError> {
        if self.name.trim().is_empty() {
            return Err(ExpenseValidationError::EmptyName);
        }
        if !self.amount.is_finite() || self.amount <= 0.0 {
            return Err(ExpenseValidationError::InvalidAmount(self.amount));
        }
        Ok(())
    }

    /// Case-insensitive match on the name, or a substring of the amount
    pub fn matches(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        query.is_empty()
            || self.name.to_lowercase().contains(&query)
            || self.amount.to_string().contains(&query)
    }

    pub fn to_export_row(&self) -> ExportRow {
        ExportRow {
            name: self.name.clone(),
            amount: self.amount,
        }
    }
}

impl fmt::Display for Expense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:.2})", self.name, self.amount)
    }
}

/// Validation errors for expenses
#[derive(Debug, Clone, PartialEq)]
pub enum ExpenseValidationError {
    EmptyName,
    InvalidAmount(f64),
}

impl fmt::Display for ExpenseValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Expense name cannot be empty"),
            Self::InvalidAmount(a) => write!(f, "Expense amount must be positive (got {})", a),
        }
    }
}

impl std::error::Error for ExpenseValidationError {}
