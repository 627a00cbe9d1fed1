//! Service layer for pocket-budget
//!
//! The service layer holds the application state on top of the storage layer
//! and turns raw form input into domain values.

pub mod book;
pub mod input;

pub use book::BudgetBook;
pub use input::{parse_amount_input, parse_date_input, ExpenseDraft};
