//! Monthly summary
//!
//! Bundles every derived value for one period so callers compute them once.

use crate::models::{CalendarZone, Expense, Period};

use super::{
    category_totals, filter_by_period, is_over_budget, remaining_budget, sorted_category_totals,
    total_amount,
};

/// Everything the overview screen shows for one period
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthlySummary {
    /// The period summarized
    pub period: Period,
    /// Budget the totals were compared against
    pub budget: i64,
    /// Expenses in the period, in collection order
    pub expenses: Vec<Expense>,
    /// Sum of the period's expenses
    pub total: i64,
    /// `budget - total`
    pub remaining: i64,
    /// Whether `remaining` is negative
    pub over_budget: bool,
    /// Per-category totals ordered by category name
    pub categories: Vec<(String, i64)>,
}

impl MonthlySummary {
    pub fn compute(budget: i64, expenses: &[Expense], period: Period, zone: CalendarZone) -> Self {
        let filtered = filter_by_period(expenses, period, zone);
        let total = total_amount(filtered.iter().copied());
        let remaining = remaining_budget(budget, total);
        let categories = sorted_category_totals(&category_totals(filtered.iter().copied()));

        Self {
            period,
            budget,
            expenses: filtered.into_iter().cloned().collect(),
            total,
            remaining,
            over_budget: is_over_budget(remaining),
            categories,
        }
    }

    /// Largest category total, used to scale charts
    pub fn max_category_total(&self) -> i64 {
        self.categories.iter().map(|(_, t)| *t).max().unwrap_or(0)
    }
}
