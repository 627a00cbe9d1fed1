//! Storage layer for pocket-budget
//!
//! Provides JSON file storage with atomic writes and the `StateStore`
//! abstraction the application state persists through.

pub mod file_io;
pub mod state;

pub use file_io::{read_json_opt, write_json_atomic};
pub use state::{JsonFileStore, MemoryStore, PersistedState, StateStore, BUDGET_KEY, EXPENSES_KEY};
