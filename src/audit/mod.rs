//! Audit logging system for pocket-budget
//!
//! When enabled in settings, records every change to the budget or the
//! expense list in an append-only audit log. Resets keep only a count.
//!
//! # Architecture
//!
//! - `AuditEntry`: a single entry with timestamp, operation, entity
//!   information, and optional before/after values.
//! - `AuditLogger`: appends entries to the audit log file as JSON lines.
//! - `generate_diff`: builds a short description of what changed.
//!
//! # Example
//!
//! ```rust,ignore
//! use pocket_budget::audit::{AuditEntry, AuditLogger, EntityType};
//!
//! let logger = AuditLogger::new(paths.audit_log());
//! let entry = AuditEntry::create(
//!     EntityType::Expense,
//!     expense.id.to_string(),
//!     Some(expense.category.clone()),
//!     &expense,
//! );
//! logger.log_batch(&[entry])?;
//! ```

mod diff;
mod entry;
mod logger;

pub use diff::generate_diff;
pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;
