//! Reports for pocket-budget
//!
//! Provides the monthly overview report.

pub mod monthly;

pub use monthly::MonthlyReport;
