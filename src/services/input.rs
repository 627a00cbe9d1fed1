//! Form input handling
//!
//! Turns the raw text a user typed into budget values and expense records.
//! Amount text that is not an integer never produces an error: the form simply
//! has nothing to save.

use chrono::{DateTime, NaiveDate, Utc};

use crate::error::{BudgetError, BudgetResult};
use crate::models::{CalendarZone, Expense, ExpenseId};

/// Parse amount or budget text as a whole number of currency units
///
/// The text must be the number alone; surrounding whitespace is rejected.
pub fn parse_amount_input(text: &str) -> Option<i64> {
    text.parse().ok()
}

/// Parse a date argument: `YYYY-MM-DD` (midnight in `zone`) or RFC 3339
pub fn parse_date_input(text: &str, zone: CalendarZone) -> BudgetResult<DateTime<Utc>> {
    let text = text.trim();

    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return Ok(zone.start_of_day(date));
    }

    DateTime::parse_from_rfc3339(text)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| {
            BudgetError::Validation(format!(
                "Invalid date '{}'. Use YYYY-MM-DD or an RFC 3339 timestamp",
                text
            ))
        })
}

/// The contents of the expense form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpenseDraft {
    pub amount_text: String,
    pub category: String,
    pub date: DateTime<Utc>,
}

impl ExpenseDraft {
    /// Empty form dated `now`
    pub fn blank(now: DateTime<Utc>) -> Self {
        Self {
            amount_text: String::new(),
            category: String::new(),
            date: now,
        }
    }

    /// Form prefilled from an expense being edited
    pub fn from_expense(expense: &Expense) -> Self {
        Self {
            amount_text: expense.amount.to_string(),
            category: expense.category.clone(),
            date: expense.date,
        }
    }

    /// Build the record to save
    ///
    /// Returns `None` when the amount text is not an integer. An edit keeps
    /// `existing`; otherwise a fresh id is assigned.
    pub fn submit(self, existing: Option<ExpenseId>) -> Option<Expense> {
        let amount = parse_amount_input(&self.amount_text)?;
        let id = existing.unwrap_or_default();
        Some(Expense::with_id(id, amount, self.category, self.date))
    }
}
