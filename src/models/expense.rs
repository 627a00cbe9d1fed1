//! Expense model
//!
//! The one record the application tracks: an amount spent on a category at a
//! point in time.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::ExpenseId;

/// A recorded expense
///
/// Two expenses are equal iff every field, including the id, is equal.
/// Amounts are whole currency units and are not validated; zero and negative
/// values are stored as entered. Categories are kept verbatim, so "Food" and
/// "food" are different categories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
    /// Unique identifier, fixed at creation
    pub id: ExpenseId,

    /// Amount in whole currency units
    pub amount: i64,

    /// Free-text category label
    pub category: String,

    /// When the expense happened (time of day is kept but not used for grouping)
    pub date: DateTime<Utc>,
}

impl Expense {
    /// Create a new expense with a fresh id
    pub fn new(amount: i64, category: impl Into<String>, date: DateTime<Utc>) -> Self {
        Self::with_id(ExpenseId::new(), amount, category, date)
    }

    /// Create an expense with a known id (edits and loaded records)
    pub fn with_id(
        id: ExpenseId,
        amount: i64,
        category: impl Into<String>,
        date: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            amount,
            category: category.into(),
            date,
        }
    }
}
