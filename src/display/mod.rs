//! Display formatting for terminal output
//!
//! Provides utilities for formatting expenses and amounts for terminal display.

pub mod expense;
pub mod report;

pub use expense::{format_expense_details, format_expense_list};
pub use report::{format_amount, format_amount_colored, format_bar};
