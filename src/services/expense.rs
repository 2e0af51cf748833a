//! Expense service
//!
//! Business logic for the finance tracker: CRUD over standalone expenses,
//! search, the sorted and paginated list view, per-name distribution and
//! spreadsheet export. Views are read-only; stored order never changes.

use std::fmt;
use std::io::Write;
use std::str::FromStr;

use crate::audit::EntityType;
use crate::error::{FinVaultError, FinVaultResult};
use crate::export::export_expenses_csv;
use crate::models::{parse_amount, Expense, ExpenseId, ExportRow};
use crate::storage::Storage;

/// Field to order the expense list by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortField {
    /// Case-insensitive lexicographic
    #[default]
    Name,
    Amount,
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl FromStr for SortField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "name" => Ok(Self::Name),
            "amount" => Ok(Self::Amount),
            other => Err(format!("Unknown sort field '{}' (expected name or amount)", other)),
        }
    }
}

impl FromStr for SortDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "asc" | "ascending" => Ok(Self::Ascending),
            "desc" | "descending" => Ok(Self::Descending),
            other => Err(format!("Unknown sort direction '{}' (expected asc or desc)", other)),
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name => write!(f, "name"),
            Self::Amount => write!(f, "amount"),
        }
    }
}

/// One page of a list view
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page_index: usize,
    pub page_size: usize,
    pub total_items: usize,
    pub total_pages: usize,
}

impl<T> Page<T> {
    pub fn has_next(&self) -> bool {
        self.page_index + 1 < self.total_pages
    }

    pub fn has_previous(&self) -> bool {
        self.page_index > 0 && self.total_pages > 0
    }
}

/// Filter, order and page settings for the expense list
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseView {
    pub query: String,
    pub sort: Option<(SortField, SortDirection)>,
    pub page_index: usize,
    pub page_size: usize,
}

impl Default for ExpenseView {
    fn default() -> Self {
        Self {
            query: String::new(),
            sort: None,
            page_index: 0,
            page_size: 10,
        }
    }
}

impl ExpenseView {
    /// Apply search, then sort, then paginate
    pub fn apply(&self, expenses: &[Expense]) -> Page<Expense> {
        let filtered: Vec<Expense> = expenses
            .iter()
            .filter(|e| e.matches(&self.query))
            .cloned()
            .collect();

        let ordered = match self.sort {
            Some((field, direction)) => sort_by(&filtered, field, direction),
            None => filtered,
        };

        paginate(&ordered, self.page_index, self.page_size)
    }
}

/// Sorted copy of the expenses; ties keep their stored order
pub fn sort_by(expenses: &[Expense], field: SortField, direction: SortDirection) -> Vec<Expense> {
    let mut sorted = expenses.to_vec();
    sorted.sort_by(|a, b| {
        let ordering = match field {
            SortField::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
            SortField::Amount => a.amount.total_cmp(&b.amount),
        };
        match direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    });
    sorted
}

/// Slice out one page; a page size of zero is treated as one
pub fn paginate<T: Clone>(items: &[T], page_index: usize, page_size: usize) -> Page<T> {
    let page_size = page_size.max(1);
    let total_items = items.len();
    let total_pages = total_items.div_ceil(page_size);

    let start = page_index.saturating_mul(page_size).min(total_items);
    let end = start.saturating_add(page_size).min(total_items);

    Page {
        items: items[start..end].to_vec(),
        page_index,
        page_size,
        total_items,
        total_pages,
    }
}

/// Total spent under one expense name
#[derive(Debug, Clone, PartialEq)]
pub struct NameTotal {
    pub name: String,
    pub total: f64,
}

/// Service for the finance tracker
pub struct ExpenseService<'a> {
    storage: &'a Storage,
}

impl<'a> ExpenseService<'a> {
    /// Create a new expense service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Add an expense from user-entered text
    pub fn add(&self, name: &str, amount: &str) -> FinVaultResult<Expense> {
        let expense = Expense::new(name.trim(), parse(amount)?);
        expense
            .validate()
            .map_err(|e| FinVaultError::Validation(e.to_string()))?;

        self.storage.expenses.push(expense.clone())?;

        self.storage.log_create(
            EntityType::Expense,
            expense.id.to_string(),
            Some(expense.name.clone()),
            &expense,
        )?;

        Ok(expense)
    }

    /// Replace an expense's name and amount
    pub fn update(&self, id: ExpenseId, name: &str, amount: &str) -> FinVaultResult<Expense> {
        let amount = parse(amount)?;
        let before = self
            .storage
            .expenses
            .get(id)?
            .ok_or_else(|| FinVaultError::expense_not_found(id.to_string()))?;

        let mut expense = before.clone();
        expense.name = name.trim().to_string();
        expense.amount = amount;
        expense
            .validate()
            .map_err(|e| FinVaultError::Validation(e.to_string()))?;

        if !self.storage.expenses.replace(expense.clone())? {
            return Err(FinVaultError::expense_not_found(id.to_string()));
        }

        self.storage.log_update(
            EntityType::Expense,
            expense.id.to_string(),
            Some(expense.name.clone()),
            &before,
            &expense,
        )?;

        Ok(expense)
    }

    /// Delete an expense
    pub fn delete(&self, id: ExpenseId) -> FinVaultResult<Expense> {
        let expense = self
            .storage
            .expenses
            .remove(id)?
            .ok_or_else(|| FinVaultError::expense_not_found(id.to_string()))?;

        self.storage.log_delete(
            EntityType::Expense,
            expense.id.to_string(),
            Some(expense.name.clone()),
            &expense,
        )?;

        Ok(expense)
    }

    /// Get an expense by ID
    pub fn get(&self, id: ExpenseId) -> FinVaultResult<Option<Expense>> {
        self.storage.expenses.get(id)
    }

    /// Find an expense by ID (full or short form)
    pub fn find(&self, identifier: &str) -> FinVaultResult<Option<Expense>> {
        let matches = self.storage.expenses.filter(|e| e.id.matches(identifier))?;
        Ok(matches.into_iter().next())
    }

    /// All expenses in stored order
    pub fn list(&self) -> FinVaultResult<Vec<Expense>> {
        self.storage.expenses.get_all()
    }

    /// Expenses whose name or amount matches the query
    pub fn search(&self, query: &str) -> FinVaultResult<Vec<Expense>> {
        self.storage.expenses.filter(|e| e.matches(query))
    }

    /// One page of the filtered, sorted list
    pub fn view(&self, view: &ExpenseView) -> FinVaultResult<Page<Expense>> {
        Ok(view.apply(&self.storage.expenses.get_all()?))
    }

    /// Totals per expense name, in order of first appearance
    pub fn distribution(&self) -> FinVaultResult<Vec<NameTotal>> {
        let mut totals: Vec<NameTotal> = Vec::new();
        for expense in self.storage.expenses.get_all()? {
            match totals.iter_mut().find(|t| t.name == expense.name) {
                Some(slot) => slot.total += expense.amount,
                None => totals.push(NameTotal {
                    name: expense.name,
                    total: expense.amount,
                }),
            }
        }
        Ok(totals)
    }

    /// Sum of all expenses
    pub fn total(&self) -> FinVaultResult<f64> {
        Ok(self.storage.expenses.get_all()?.iter().map(|e| e.amount).sum())
    }

    /// Expenses without their ids, in stored order
    pub fn export_rows(&self) -> FinVaultResult<Vec<ExportRow>> {
        Ok(self
            .storage
            .expenses
            .get_all()?
            .iter()
            .map(Expense::to_export_row)
            .collect())
    }

    /// Write the export rows as CSV
    pub fn export_csv<W: Write>(&self, writer: W) -> FinVaultResult<usize> {
        let rows = self.export_rows()?;
        export_expenses_csv(&rows, writer)?;
        Ok(rows.len())
    }
}

fn parse(amount: &str) -> FinVaultResult<f64> {
    parse_amount(amount).map_err(|e| FinVaultError::Validation(e.to_string()))
}
