//! Aggregation over a raw expense collection
//!
//! Pure functions deriving the per-period view: which expenses fall in the
//! selected month, how much they add up to, what is left of the budget, and
//! the per-category breakdown. None of them fail or touch storage.

mod summary;

pub use summary::MonthlySummary;

use std::collections::HashMap;

use crate::models::{CalendarZone, Expense, Period};

/// Expenses whose date falls in `period`'s calendar year and month, in input order
pub fn filter_by_period<'a, I>(expenses: I, period: Period, zone: CalendarZone) -> Vec<&'a Expense>
where
    I: IntoIterator<Item = &'a Expense>,
{
    expenses
        .into_iter()
        .filter(|e| period.contains(&e.date, zone))
        .collect()
}

/// Sum of amounts; 0 for an empty collection
pub fn total_amount<'a, I>(expenses: I) -> i64
where
    I: IntoIterator<Item = &'a Expense>,
{
    expenses.into_iter().map(|e| e.amount).sum()
}

/// Budget left after `total`; negative once overspent
pub fn remaining_budget(budget: i64, total: i64) -> i64 {
    budget - total
}

pub fn is_over_budget(remaining: i64) -> bool {
    remaining < 0
}

/// Amount spent per category
///
/// Keys are exactly the categories present in `expenses`.
pub fn category_totals<'a, I>(expenses: I) -> HashMap<String, i64>
where
    I: IntoIterator<Item = &'a Expense>,
{
    let mut totals: HashMap<String, i64> = HashMap::new();
    for expense in expenses {
        *totals.entry(expense.category.clone()).or_insert(0) += expense.amount;
    }
    totals
}

/// Category totals ordered by category name (byte-wise ascending)
pub fn sorted_category_totals(totals: &HashMap<String, i64>) -> Vec<(String, i64)> {
    let mut sorted: Vec<(String, i64)> = totals
        .iter()
        .map(|(category, total)| (category.clone(), *total))
        .collect();
    sorted.sort_by(|a, b| a.0.cmp(&b.0));
    sorted
}
