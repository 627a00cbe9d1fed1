//! Expense display formatting
//!
//! Renders expense lists as tables and single expenses as detail views.

use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Style};
use tabled::{Table, Tabled};

use crate::config::settings::Settings;
use crate::models::Expense;

use super::report::{format_amount, truncate};

/// Longest category shown in a list row
const CATEGORY_WIDTH: usize = 24;

#[derive(Tabled)]
struct ExpenseRow {
    #[tabled(rename = "#")]
    position: usize,
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Amount")]
    amount: String,
}

/// Format expenses as a numbered table
///
/// Row numbers are 1-based positions in `expenses`, which is what
/// `expense delete --nth` refers to.
pub fn format_expense_list<'a, I>(expenses: I, settings: &Settings) -> String
where
    I: IntoIterator<Item = &'a Expense>,
{
    let rows: Vec<ExpenseRow> = expenses
        .into_iter()
        .enumerate()
        .map(|(i, e)| ExpenseRow {
            position: i + 1,
            id: e.id.to_string(),
            date: settings
                .calendar_zone
                .date_of(&e.date)
                .format(&settings.date_format)
                .to_string(),
            category: truncate(&e.category, CATEGORY_WIDTH),
            amount: format_amount(e.amount, &settings.currency_symbol),
        })
        .collect();

    if rows.is_empty() {
        return "No expenses found.\n".to_string();
    }

    let mut table = Table::new(rows);
    table
        .with(Style::rounded())
        .modify(Columns::single(4), Alignment::right());
    format!("{}\n", table)
}

/// Format a single expense for display
pub fn format_expense_details(expense: &Expense, settings: &Settings) -> String {
    let mut output = String::new();

    output.push_str(&format!("Expense:  {}\n", expense.id));
    output.push_str(&format!("UUID:     {}\n", expense.id.as_uuid()));
    output.push_str(&format!(
        "Date:     {}\n",
        settings
            .calendar_zone
            .date_of(&expense.date)
            .format(&settings.date_format)
    ));
    output.push_str(&format!("Recorded: {}\n", expense.date.to_rfc3339()));
    output.push_str(&format!("Category: {}\n", expense.category));
    output.push_str(&format!(
        "Amount:   {}\n",
        format_amount(expense.amount, &settings.currency_symbol)
    ));

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CalendarZone;
    use chrono::{TimeZone, Utc};

    fn settings() -> Settings {
        Settings {
            calendar_zone: CalendarZone::Utc,
            ..Settings::default()
        }
    }

    fn food() -> Expense {
        Expense::new(30000, "Food", Utc.with_ymd_and_hms(2025, 6, 10, 23, 0, 0).unwrap())
    }

    #[test]
    fn test_empty_list() {
        assert_eq!(
            format_expense_list(&Vec::<Expense>::new(), &settings()),
            "No expenses found.\n"
        );
    }

    #[test]
    fn test_list_contains_rows() {
        let expenses = vec![
            food(),
            Expense::new(80000, "Rent", Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap()),
        ];
        let output = format_expense_list(&expenses, &settings());

        assert!(output.contains("Category"));
        assert!(output.contains("2025-06-10"));
        assert!(output.contains("30000원"));
        assert!(output.contains("80000원"));
        assert!(output.contains(&expenses[1].id.to_string()));
    }

    #[test]
    fn test_details() {
        let expense = food();
        let output = format_expense_details(&expense, &settings());

        assert!(output.contains(&expense.id.to_string()));
        assert!(output.contains("Category: Food"));
        assert!(output.contains("Amount:   30000원"));
        assert!(output.contains("Date:     2025-06-10"));
    }
}
