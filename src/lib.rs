//! pocket-budget - a personal monthly budget tracker
//!
//! This library keeps a single monthly budget and a list of expenses, and
//! answers how much of the budget a given month has used. Every change to the
//! budget or the expense list is persisted before it becomes visible.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Expense records, ids, and calendar periods
//! - `aggregate`: Pure per-month totals and category breakdowns
//! - `storage`: Persistence of the budget and expense list
//! - `services`: The budget book and form input handling
//! - `audit`: Audit logging system
//! - `reports`: The monthly report
//! - `display`: Terminal formatting
//! - `cli`: Command handlers for the `budget` binary
//!
//! # Example
//!
//! ```rust,ignore
//! use pocket_budget::models::{CalendarZone, Period};
//! use pocket_budget::services::BudgetBook;
//! use pocket_budget::storage::MemoryStore;
//!
//! let mut book = BudgetBook::open(MemoryStore::new());
//! book.set_budget(100000)?;
//! book.add(30000, "Food", chrono::Utc::now())?;
//! let summary = book.summary(Period::current(CalendarZone::Local), CalendarZone::Local);
//! ```

pub mod aggregate;
pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{BudgetError, BudgetResult};
