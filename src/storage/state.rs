//! Budget and expense persistence
//!
//! The persisted state is two independent entries: the budget (a bare JSON
//! integer) and the expense list (a JSON array). Loading never fails: a
//! missing or undecodable entry falls back to its default on its own, so a
//! corrupt expense list still leaves the budget readable.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use tracing::{debug, warn};

use crate::config::paths::BudgetPaths;
use crate::error::{BudgetError, BudgetResult};
use crate::models::Expense;

use super::file_io::{read_json_opt, stage_json, StagedWrite};

/// Key of the budget entry
pub const BUDGET_KEY: &str = "budget";

/// Key of the expense list entry
pub const EXPENSES_KEY: &str = "expenses";

/// Snapshot of everything that is persisted
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersistedState {
    pub budget: i64,
    pub expenses: Vec<Expense>,
}

/// Load/save capability for the budget and expense list
pub trait StateStore {
    /// Last saved state, or `(0, [])` for anything absent or undecodable
    fn load(&self) -> PersistedState;

    /// Overwrite both entries
    ///
    /// Either both entries are replaced or, on a write failure, neither is
    /// and the error is returned. If the expense list cannot be encoded its
    /// entry is left as it was and the budget is still written.
    fn save(&self, budget: i64, expenses: &[Expense]) -> BudgetResult<()>;

    /// Whether anything has ever been saved
    fn exists(&self) -> bool;

    /// Same as saving a zero budget and no expenses
    fn reset(&self) -> BudgetResult<()> {
        self.save(0, &[])
    }
}

/// Fall back to the default when an entry is missing or fails to decode
fn recover<T: Default>(key: &str, result: BudgetResult<Option<T>>) -> T {
    match result {
        Ok(Some(value)) => value,
        Ok(None) => {
            debug!(key, "no stored entry, using default");
            T::default()
        }
        Err(e) => {
            warn!(key, error = %e, "discarding undecodable entry");
            T::default()
        }
    }
}

/// An expense list that failed to encode is skipped, anything else propagates
fn skip_encode_failure(result: BudgetResult<()>) -> BudgetResult<()> {
    match result {
        Err(BudgetError::Json(msg)) => {
            warn!(key = EXPENSES_KEY, error = %msg, "expense list not saved");
            Ok(())
        }
        other => other,
    }
}

/// JSON files in the data directory, one per entry
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    budget_path: PathBuf,
    expenses_path: PathBuf,
}

impl JsonFileStore {
    /// Create a store over the data directory of `paths`
    pub fn new(paths: &BudgetPaths) -> BudgetResult<Self> {
        paths.ensure_directories()?;
        Ok(Self {
            budget_path: paths.budget_file(),
            expenses_path: paths.expenses_file(),
        })
    }
}

impl JsonFileStore {
    fn backup_path(&self) -> PathBuf {
        self.expenses_path.with_extension("json.bak")
    }

    /// Commit the staged expense list, keeping a copy of the one it replaces
    ///
    /// Returns the backup path, or `None` when there was no previous list.
    fn replace_expenses(&self, staged: StagedWrite) -> BudgetResult<Option<PathBuf>> {
        let backup = if self.expenses_path.is_file() {
            let backup = self.backup_path();
            fs::copy(&self.expenses_path, &backup).map_err(|e| {
                BudgetError::Storage(format!("Failed to back up expense list: {}", e))
            })?;
            Some(backup)
        } else {
            None
        };

        if let Err(e) = staged.commit() {
            if let Some(backup) = &backup {
                let _ = fs::remove_file(backup);
            }
            return Err(e);
        }
        Ok(backup)
    }

    /// Undo [`Self::replace_expenses`]
    fn restore_expenses(&self, backup: Option<PathBuf>) {
        let restored = match backup {
            Some(backup) => fs::rename(&backup, &self.expenses_path),
            None => fs::remove_file(&self.expenses_path),
        };
        if let Err(e) = restored {
            warn!(key = EXPENSES_KEY, error = %e, "failed to restore expense list");
        }
    }
}

impl StateStore for JsonFileStore {
    fn load(&self) -> PersistedState {
        PersistedState {
            budget: recover(BUDGET_KEY, read_json_opt(&self.budget_path)),
            expenses: recover(EXPENSES_KEY, read_json_opt(&self.expenses_path)),
        }
    }

    /// Both entries are staged before either is replaced; if the budget
    /// cannot be replaced the previous expense list is put back.
    fn save(&self, budget: i64, expenses: &[Expense]) -> BudgetResult<()> {
        let staged_expenses = match stage_json(&self.expenses_path, expenses) {
            Ok(staged) => Some(staged),
            Err(BudgetError::Json(msg)) => {
                warn!(key = EXPENSES_KEY, error = %msg, "expense list not saved");
                None
            }
            Err(e) => return Err(e),
        };
        let staged_budget = stage_json(&self.budget_path, &budget)?;

        let previous = match staged_expenses {
            Some(staged) => Some(self.replace_expenses(staged)?),
            None => None,
        };

        if let Err(e) = staged_budget.commit() {
            if let Some(previous) = previous {
                self.restore_expenses(previous);
            }
            return Err(e);
        }

        if let Some(Some(backup)) = previous {
            let _ = fs::remove_file(backup);
        }
        debug!(budget, expenses = expenses.len(), "state saved");
        Ok(())
    }

    fn exists(&self) -> bool {
        self.budget_path.exists() || self.expenses_path.exists()
    }
}

/// In-memory key-value store holding the same JSON encodings as the file store
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<&'static str, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an entry with raw text, bypassing encoding
    pub fn with_raw(self, key: &'static str, raw: impl Into<String>) -> Self {
        self.entries.borrow_mut().insert(key, raw.into());
        self
    }

    /// Raw text of an entry
    pub fn raw(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn read<T: serde::de::DeserializeOwned>(&self, key: &str) -> BudgetResult<Option<T>> {
        self.entries
            .borrow()
            .get(key)
            .map(|raw| serde_json::from_str(raw).map_err(BudgetError::from))
            .transpose()
    }

    fn write<T: serde::Serialize + ?Sized>(&self, key: &'static str, value: &T) -> BudgetResult<()> {
        let raw = serde_json::to_string(value)?;
        self.entries.borrow_mut().insert(key, raw);
        Ok(())
    }
}

impl StateStore for MemoryStore {
    fn load(&self) -> PersistedState {
        PersistedState {
            budget: recover(BUDGET_KEY, self.read(BUDGET_KEY)),
            expenses: recover(EXPENSES_KEY, self.read(EXPENSES_KEY)),
        }
    }

    fn save(&self, budget: i64, expenses: &[Expense]) -> BudgetResult<()> {
        skip_encode_failure(self.write(EXPENSES_KEY, expenses))?;
        self.write(BUDGET_KEY, &budget)
    }

    fn exists(&self) -> bool {
        !self.entries.borrow().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use tempfile::TempDir;

    fn create_file_store() -> (TempDir, BudgetPaths, JsonFileStore) {
        let temp_dir = TempDir::new().unwrap();
        let paths = BudgetPaths::with_base_dir(temp_dir.path().to_path_buf());
        let store = JsonFileStore::new(&paths).unwrap();
        (temp_dir, paths, store)
    }

    fn sample_expenses() -> Vec<Expense> {
        vec![
            Expense::new(30000, "Food", Utc.with_ymd_and_hms(2025, 6, 10, 0, 0, 0).unwrap()),
            Expense::new(80000, "Rent", Utc.with_ymd_and_hms(2025, 6, 1, 8, 15, 0).unwrap()),
        ]
    }

    #[test]
    fn test_first_run_is_absent() {
        let (_temp_dir, _paths, store) = create_file_store();
        assert!(!store.exists());
        assert_eq!(store.load(), PersistedState::default());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let (_temp_dir, _paths, store) = create_file_store();
        let expenses = sample_expenses();

        store.save(100000, &expenses).unwrap();

        assert!(store.exists());
        let loaded = store.load();
        assert_eq!(loaded.budget, 100000);
        assert_eq!(loaded.expenses, expenses);
    }

    #[test]
    fn test_resaving_loaded_state_is_idempotent() {
        let (_temp_dir, paths, store) = create_file_store();
        store.save(100000, &sample_expenses()).unwrap();

        let before_budget = std::fs::read_to_string(paths.budget_file()).unwrap();
        let before_expenses = std::fs::read_to_string(paths.expenses_file()).unwrap();

        let loaded = store.load();
        store.save(loaded.budget, &loaded.expenses).unwrap();

        assert_eq!(std::fs::read_to_string(paths.budget_file()).unwrap(), before_budget);
        assert_eq!(
            std::fs::read_to_string(paths.expenses_file()).unwrap(),
            before_expenses
        );
    }

    #[test]
    fn test_budget_file_is_bare_integer() {
        let (_temp_dir, paths, store) = create_file_store();
        store.save(-250, &[]).unwrap();

        let raw = std::fs::read_to_string(paths.budget_file()).unwrap();
        assert_eq!(raw.trim(), "-250");
        let raw = std::fs::read_to_string(paths.expenses_file()).unwrap();
        assert_eq!(raw.trim(), "[]");
    }

    #[test]
    fn test_corrupt_expenses_keep_budget() {
        let (_temp_dir, paths, store) = create_file_store();
        store.save(100000, &sample_expenses()).unwrap();
        std::fs::write(paths.expenses_file(), "[{\"id\": 12}]").unwrap();

        let loaded = store.load();
        assert_eq!(loaded.budget, 100000);
        assert!(loaded.expenses.is_empty());
    }

    #[test]
    fn test_corrupt_budget_reads_as_zero() {
        let (_temp_dir, paths, store) = create_file_store();
        let expenses = sample_expenses();
        store.save(100000, &expenses).unwrap();
        std::fs::write(paths.budget_file(), "\"lots\"").unwrap();

        let loaded = store.load();
        assert_eq!(loaded.budget, 0);
        assert_eq!(loaded.expenses, expenses);
    }

    #[test]
    fn test_reset() {
        let (_temp_dir, _paths, store) = create_file_store();
        store.save(100000, &sample_expenses()).unwrap();

        store.reset().unwrap();

        assert!(store.exists());
        assert_eq!(store.load(), PersistedState::default());
    }

    #[test]
    fn test_memory_store_round_trip() {
        let store = MemoryStore::new();
        assert!(!store.exists());

        let expenses = sample_expenses();
        store.save(100000, &expenses).unwrap();

        assert_eq!(store.raw(BUDGET_KEY).as_deref(), Some("100000"));
        let loaded = store.load();
        assert_eq!(loaded.budget, 100000);
        assert_eq!(loaded.expenses, expenses);
    }

    #[test]
    fn test_memory_store_decode_failure() {
        let store = MemoryStore::new()
            .with_raw(BUDGET_KEY, "5000")
            .with_raw(EXPENSES_KEY, "{ not a list");

        let loaded = store.load();
        assert_eq!(loaded.budget, 5000);
        assert!(loaded.expenses.is_empty());
    }

    #[test]
    fn test_memory_store_reset() {
        let store = MemoryStore::new();
        store.save(42, &sample_expenses()).unwrap();
        store.reset().unwrap();
        assert_eq!(store.load(), PersistedState::default());
        assert_eq!(store.raw(EXPENSES_KEY).as_deref(), Some("[]"));
    }

    #[test]
    fn test_failed_budget_write_keeps_previous_expenses() {
        let (_temp_dir, paths, store) = create_file_store();
        let expenses = sample_expenses();
        store.save(100000, &expenses[..1]).unwrap();

        std::fs::remove_file(paths.budget_file()).unwrap();
        std::fs::create_dir(paths.budget_file()).unwrap();

        let err = store.save(5, &expenses).unwrap_err();
        assert!(matches!(err, BudgetError::Storage(_)));
        assert_eq!(store.load().expenses, expenses[..1].to_vec());

        let data_dir = paths.data_dir();
        assert!(!data_dir.join("expenses.json.bak").exists());
        assert!(!data_dir.join("expenses.json.tmp").exists());
        assert!(!data_dir.join("budget.json.tmp").exists());
    }

    #[test]
    fn test_failed_first_save_writes_nothing() {
        let (_temp_dir, paths, store) = create_file_store();
        std::fs::create_dir(paths.budget_file()).unwrap();

        assert!(store.save(5, &sample_expenses()).is_err());
        assert!(!paths.expenses_file().exists());
        assert!(store.load().expenses.is_empty());
    }

    #[test]
    fn test_successful_save_leaves_no_backup() {
        let (_temp_dir, paths, store) = create_file_store();
        store.save(1, &sample_expenses()).unwrap();
        store.save(2, &[]).unwrap();

        assert!(!paths.data_dir().join("expenses.json.bak").exists());
        assert!(store.load().expenses.is_empty());
    }
}
