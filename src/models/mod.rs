//! Core data models for pocket-budget
//!
//! The expense record, its identifier, and the year/month period used to
//! slice expenses for display.

pub mod expense;
pub mod ids;
pub mod period;

pub use expense::Expense;
pub use ids::ExpenseId;
pub use period::{CalendarZone, Period, PeriodParseError};
