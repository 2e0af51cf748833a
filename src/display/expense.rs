//! Expense display formatting

use crate::models::{format_currency, Expense};
use crate::services::{NameTotal, Page};

/// Format one page of expenses as a table with a page footer
pub fn format_expense_page(page: &Page<Expense>, currency: &str) -> String {
    if page.total_items == 0 {
        return "No expenses found.".to_string();
    }

    let name_width = page
        .items
        .iter()
        .map(|e| e.name.chars().count())
        .max()
        .unwrap_or(4)
        .max(4);

    let mut output = String::new();
    output.push_str(&format!(
        "{:<12}  {:<name_width$}  {:>12}\n",
        "ID",
        "Name",
        "Amount",
        name_width = name_width,
    ));
    output.push_str(&format!(
        "{:-<12}  {:-<name_width$}  {:->12}\n",
        "",
        "",
        "",
        name_width = name_width,
    ));

    for expense in &page.items {
        output.push_str(&format!(
            "{:<12}  {:<name_width$}  {:>12}\n",
            expense.id.to_string(),
            expense.name,
            format_currency(expense.amount, currency),
            name_width = name_width,
        ));
    }

    if page.items.is_empty() {
        output.push_str("(no expenses on this page)\n");
    }

    output.push_str(&format!(
        "\nPage {} of {} ({} expenses)\n",
        page.page_index + 1,
        page.total_pages,
        page.total_items
    ));

    output
}

/// Format per-name totals with their share of the whole
pub fn format_distribution(totals: &[NameTotal], currency: &str) -> String {
    if totals.is_empty() {
        return "No expenses found.".to_string();
    }

    let grand_total: f64 = totals.iter().map(|t| t.total).sum();
    let name_width = totals
        .iter()
        .map(|t| t.name.chars().count())
        .max()
        .unwrap_or(4)
        .max(4);

    let mut output = String::new();
    for total in totals {
        let percent = if grand_total > 0.0 {
            total.total / grand_total * 100.0
        } else {
            0.0
        };
        output.push_str(&format!(
            "{:<name_width$}  {:>12}  {:>5.1}%\n",
            total.name,
            format_currency(total.total, currency),
            percent,
            name_width = name_width,
        ));
    }

    output.push_str(&format!(
        "{:<name_width$}  {:>12}\n",
        "TOTAL",
        format_currency(grand_total, currency),
        name_width = name_width,
    ));

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::paginate;

    #[test]
    fn test_page_footer() {
        let expenses = vec![Expense::new("Groceries", 50.0), Expense::new("Internet", 30.0)];
        let output = format_expense_page(&paginate(&expenses, 0, 10), "$");

        assert!(output.contains("Groceries"));
        assert!(output.contains("$50.00"));
        assert!(output.contains("Page 1 of 1 (2 expenses)"));
    }

    #[test]
    fn test_empty_page() {
        let page: Page<Expense> = paginate(&[], 0, 10);
        assert_eq!(format_expense_page(&page, "$"), "No expenses found.");
    }

    #[test]
    fn test_distribution_percentages() {
        let totals = vec![
            NameTotal {
                name: "Rent".into(),
                total: 75.0,
            },
            NameTotal {
                name: "Food".into(),
                total: 25.0,
            },
        ];
        let output = format_distribution(&totals, "$");
        assert!(output.contains("75.0%"));
        assert!(output.contains("25.0%"));
        assert!(output.contains("$100.00"));
    }
}
