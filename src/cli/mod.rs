//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the budget book.

pub mod audit;
pub mod budget;
pub mod expense;
pub mod report;

pub use audit::handle_audit_command;
pub use budget::{handle_budget_command, BudgetCommands};
pub use expense::{handle_expense_command, ExpenseCommands};
pub use report::handle_summary_command;

use crate::error::{BudgetError, BudgetResult};
use crate::models::{CalendarZone, Period};

/// Parse a `--period` argument, defaulting to the current month
pub fn resolve_period(period: Option<&str>, zone: CalendarZone) -> BudgetResult<Period> {
    match period {
        Some(text) => Period::parse(text)
            .map_err(|e| BudgetError::Validation(format!("{}. Use YYYY-MM", e))),
        None => Ok(Period::current(zone)),
    }
}
