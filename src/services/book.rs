//! Budget book service
//!
//! `BudgetBook` is the application state: the budget, the expense list, and
//! the store they persist to. Every state transition goes through
//! `mutate_then_persist`, so a change that is visible in memory has also been
//! saved, and a change that could not be saved is rolled back.

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use crate::aggregate::{filter_by_period, MonthlySummary};
use crate::audit::{generate_diff, AuditEntry, AuditLogger, EntityType};
use crate::error::{BudgetError, BudgetResult};
use crate::models::{CalendarZone, Expense, ExpenseId, Period};
use crate::storage::StateStore;

use super::input::{parse_amount_input, ExpenseDraft};

/// Application state over a [`StateStore`]
pub struct BudgetBook<S: StateStore> {
    store: S,
    audit: Option<AuditLogger>,
    budget: i64,
    /// Insertion order is display order
    expenses: Vec<Expense>,
}

/// Result of a mutation: its return value plus what to record in the audit log
type Mutation<T> = BudgetResult<(T, Vec<AuditEntry>)>;

impl<S: StateStore> BudgetBook<S> {
    /// Load the book from `store`
    pub fn open(store: S) -> Self {
        let state = store.load();
        debug!(
            budget = state.budget,
            expenses = state.expenses.len(),
            "budget book opened"
        );
        Self {
            store,
            audit: None,
            budget: state.budget,
            expenses: state.expenses,
        }
    }

    /// Record every mutation in `logger`
    pub fn with_audit(mut self, logger: AuditLogger) -> Self {
        self.audit = Some(logger);
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn budget(&self) -> i64 {
        self.budget
    }

    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    pub fn get(&self, id: ExpenseId) -> Option<&Expense> {
        self.expenses.iter().find(|e| e.id == id)
    }

    /// Look up an expense by a unique id prefix (`exp-1a2b3c4d`, or UUID start)
    pub fn find_by_prefix(&self, query: &str) -> BudgetResult<&Expense> {
        let mut matches = self.expenses.iter().filter(|e| e.id.matches_prefix(query));
        match (matches.next(), matches.next()) {
            (Some(expense), None) => Ok(expense),
            (None, _) => Err(BudgetError::expense_not_found(query)),
            (Some(_), Some(_)) => Err(BudgetError::Validation(format!(
                "'{}' matches more than one expense; use a longer id",
                query
            ))),
        }
    }

    /// Expenses dated within `period`, in display order
    pub fn expenses_in(&self, period: Period, zone: CalendarZone) -> Vec<&Expense> {
        filter_by_period(&self.expenses, period, zone)
    }

    /// Totals, remaining budget, and category breakdown for `period`
    pub fn summary(&self, period: Period, zone: CalendarZone) -> MonthlySummary {
        MonthlySummary::compute(self.budget, &self.expenses, period, zone)
    }

    /// Replace the budget
    pub fn set_budget(&mut self, amount: i64) -> BudgetResult<()> {
        self.mutate_then_persist(|budget, _| {
            let before = std::mem::replace(budget, amount);
            let diff = generate_diff(&before.into(), &amount.into());
            let entry = AuditEntry::update(EntityType::Budget, "budget", None, &before, &amount, diff);
            Ok(((), vec![entry]))
        })
    }

    /// Replace the budget from form text
    ///
    /// Text that is not an integer leaves the budget and the store untouched
    /// and returns `false`.
    pub fn set_budget_input(&mut self, text: &str) -> BudgetResult<bool> {
        match parse_amount_input(text) {
            Some(amount) => self.set_budget(amount).map(|()| true),
            None => {
                debug!(input = text, "budget input ignored");
                Ok(false)
            }
        }
    }

    /// Record a new expense with a fresh id
    pub fn add(
        &mut self,
        amount: i64,
        category: impl Into<String>,
        date: DateTime<Utc>,
    ) -> BudgetResult<Expense> {
        let expense = Expense::new(amount, category, date);
        self.upsert(expense.clone())?;
        Ok(expense)
    }

    /// Replace the expense with the same id in place, or append it
    pub fn upsert(&mut self, expense: Expense) -> BudgetResult<()> {
        self.mutate_then_persist(|_, expenses| {
            let entry = match expenses.iter_mut().find(|e| e.id == expense.id) {
                Some(slot) => {
                    let before = std::mem::replace(slot, expense);
                    AuditEntry::update(
                        EntityType::Expense,
                        slot.id.to_string(),
                        Some(slot.category.clone()),
                        &before,
                        &*slot,
                        expense_diff(&before, slot),
                    )
                }
                None => {
                    let entry = AuditEntry::create(
                        EntityType::Expense,
                        expense.id.to_string(),
                        Some(expense.category.clone()),
                        &expense,
                    );
                    expenses.push(expense);
                    entry
                }
            };
            Ok(((), vec![entry]))
        })
    }

    /// Save the expense form
    ///
    /// Returns `None` (and saves nothing) when the amount text is not an integer.
    pub fn save_draft(
        &mut self,
        draft: ExpenseDraft,
        existing: Option<ExpenseId>,
    ) -> BudgetResult<Option<Expense>> {
        let Some(expense) = draft.submit(existing) else {
            debug!("expense form ignored: amount is not an integer");
            return Ok(None);
        };
        self.upsert(expense.clone())?;
        Ok(Some(expense))
    }

    /// Remove an expense by id
    pub fn delete(&mut self, id: ExpenseId) -> BudgetResult<Expense> {
        self.mutate_then_persist(|_, expenses| {
            let index = expenses
                .iter()
                .position(|e| e.id == id)
                .ok_or_else(|| BudgetError::expense_not_found(id.to_string()))?;
            let removed = expenses.remove(index);
            let entry = AuditEntry::delete(
                EntityType::Expense,
                removed.id.to_string(),
                Some(removed.category.clone()),
                &removed,
            );
            Ok((removed, vec![entry]))
        })
    }

    /// Remove the `index`-th expense of the period's list (0-based)
    pub fn delete_in_period(
        &mut self,
        period: Period,
        zone: CalendarZone,
        index: usize,
    ) -> BudgetResult<Expense> {
        let id = self
            .expenses_in(period, zone)
            .get(index)
            .map(|e| e.id)
            .ok_or_else(|| {
                BudgetError::expense_not_found(format!("#{} in {}", index + 1, period))
            })?;
        self.delete(id)
    }

    /// Zero the budget and drop every expense
    pub fn reset(&mut self) -> BudgetResult<()> {
        self.mutate_then_persist(|budget, expenses| {
            *budget = 0;
            let removed = std::mem::take(expenses).len();
            let entries = vec![
                AuditEntry::reset(EntityType::Budget, "budget cleared".to_string()),
                AuditEntry::reset(EntityType::Expense, format!("{} expense(s) removed", removed)),
            ];
            Ok(((), entries))
        })
    }

    /// Apply `mutate`, save the full state, then audit it
    ///
    /// On a save failure the in-memory state is restored, so memory and store
    /// never disagree.
    fn mutate_then_persist<T, F>(&mut self, mutate: F) -> BudgetResult<T>
    where
        F: FnOnce(&mut i64, &mut Vec<Expense>) -> Mutation<T>,
    {
        let snapshot = (self.budget, self.expenses.clone());

        let (value, entries) = mutate(&mut self.budget, &mut self.expenses)?;

        if let Err(e) = self.store.save(self.budget, &self.expenses) {
            (self.budget, self.expenses) = snapshot;
            return Err(e);
        }

        if let Some(logger) = &self.audit {
            // The change is already saved; a lost audit line must not undo it
            if let Err(e) = logger.log_batch(&entries) {
                warn!(error = %e, "failed to write audit entries");
            }
        }

        Ok(value)
    }
}

fn expense_diff(before: &Expense, after: &Expense) -> Option<String> {
    let before = serde_json::to_value(before).ok()?;
    let after = serde_json::to_value(after).ok()?;
    generate_diff(&before, &after)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::Operation;
    use crate::config::BudgetPaths;
    use crate::storage::{JsonFileStore, MemoryStore, PersistedState, EXPENSES_KEY};
    use chrono::TimeZone;
    use tempfile::TempDir;

    const ZONE: CalendarZone = CalendarZone::Utc;

    fn day(m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, m, d, 12, 0, 0).unwrap()
    }

    fn june() -> Period {
        Period::new(2025, 6).unwrap()
    }

    /// Store whose saves always fail
    struct BrokenStore;

    impl StateStore for BrokenStore {
        fn load(&self) -> PersistedState {
            PersistedState::default()
        }

        fn save(&self, _budget: i64, _expenses: &[Expense]) -> BudgetResult<()> {
            Err(BudgetError::Storage("disk full".into()))
        }

        fn exists(&self) -> bool {
            false
        }
    }

    #[test]
    fn test_open_empty() {
        let book = BudgetBook::open(MemoryStore::new());
        assert_eq!(book.budget(), 0);
        assert!(book.expenses().is_empty());
    }

    #[test]
    fn test_every_mutation_is_persisted() {
        let mut book = BudgetBook::open(MemoryStore::new());

        book.set_budget(100000).unwrap();
        assert_eq!(book.store().load().budget, 100000);

        let food = book.add(30000, "Food", day(6, 10)).unwrap();
        assert_eq!(book.store().load().expenses, vec![food.clone()]);

        book.delete(food.id).unwrap();
        assert!(book.store().load().expenses.is_empty());
    }

    #[test]
    fn test_scenarios_under_and_over_budget() {
        let mut book = BudgetBook::open(MemoryStore::new());
        book.set_budget(100000).unwrap();
        book.add(30000, "Food", day(6, 10)).unwrap();

        let summary = book.summary(june(), ZONE);
        assert_eq!(summary.total, 30000);
        assert_eq!(summary.remaining, 70000);
        assert!(!summary.over_budget);

        book.add(80000, "Rent", day(6, 1)).unwrap();
        let summary = book.summary(june(), ZONE);
        assert_eq!(summary.total, 110000);
        assert_eq!(summary.remaining, -10000);
        assert!(summary.over_budget);

        let may = book.summary(Period::new(2025, 5).unwrap(), ZONE);
        assert!(may.expenses.is_empty());
        assert_eq!(may.total, 0);
    }

    #[test]
    fn test_upsert_replaces_in_place() {
        let mut book = BudgetBook::open(MemoryStore::new());
        let first = book.add(100, "Food", day(6, 1)).unwrap();
        let second = book.add(200, "Rent", day(6, 2)).unwrap();

        let edited = Expense::with_id(first.id, 150, "Food", day(6, 3));
        book.upsert(edited.clone()).unwrap();

        assert_eq!(book.expenses(), &[edited, second][..]);
    }

    #[test]
    fn test_set_budget_input_ignores_non_integers() {
        let mut book = BudgetBook::open(MemoryStore::new());
        book.set_budget(5000).unwrap();

        assert!(!book.set_budget_input("five thousand").unwrap());
        assert_eq!(book.budget(), 5000);
        assert_eq!(book.store().load().budget, 5000);

        assert!(book.set_budget_input("7000").unwrap());
        assert_eq!(book.budget(), 7000);
    }

    #[test]
    fn test_save_draft() {
        let mut book = BudgetBook::open(MemoryStore::new());

        let mut draft = ExpenseDraft::blank(day(6, 10));
        draft.amount_text = "oops".into();
        assert!(book.save_draft(draft.clone(), None).unwrap().is_none());
        assert!(!book.store().exists());

        draft.amount_text = "4500".into();
        draft.category = "Coffee".into();
        let saved = book.save_draft(draft, None).unwrap().unwrap();
        assert_eq!(book.get(saved.id), Some(&saved));
    }

    #[test]
    fn test_delete_unknown_is_not_found() {
        let mut book = BudgetBook::open(MemoryStore::new());
        let err = book.delete(ExpenseId::new()).unwrap_err();
        assert!(err.is_not_found());
        assert!(!book.store().exists());
    }

    #[test]
    fn test_delete_in_period_uses_filtered_position() {
        let mut book = BudgetBook::open(MemoryStore::new());
        book.add(1, "May", day(5, 20)).unwrap();
        let june_a = book.add(2, "A", day(6, 1)).unwrap();
        let june_b = book.add(3, "B", day(6, 2)).unwrap();

        let removed = book.delete_in_period(june(), ZONE, 1).unwrap();
        assert_eq!(removed, june_b);
        assert_eq!(book.expenses_in(june(), ZONE), vec![&june_a]);

        assert!(book.delete_in_period(june(), ZONE, 5).unwrap_err().is_not_found());
    }

    #[test]
    fn test_reset() {
        let mut book = BudgetBook::open(MemoryStore::new());
        book.set_budget(100000).unwrap();
        book.add(30000, "Food", day(6, 10)).unwrap();

        book.reset().unwrap();

        assert_eq!(book.budget(), 0);
        assert!(book.expenses().is_empty());
        assert_eq!(book.store().load(), PersistedState::default());
    }

    #[test]
    fn test_reopen_sees_saved_state() {
        let store = MemoryStore::new();
        let mut book = BudgetBook::open(store);
        book.set_budget(100000).unwrap();
        let food = book.add(30000, "Food", day(6, 10)).unwrap();

        let raw = book.store().raw(EXPENSES_KEY).unwrap();
        let reopened = BudgetBook::open(MemoryStore::new().with_raw(EXPENSES_KEY, raw));
        assert_eq!(reopened.expenses(), &[food][..]);
        assert_eq!(reopened.budget(), 0);
    }

    #[test]
    fn test_failed_save_rolls_back() {
        let mut book = BudgetBook::open(BrokenStore);

        assert!(book.set_budget(100).is_err());
        assert_eq!(book.budget(), 0);

        assert!(book.add(5, "Food", day(6, 1)).is_err());
        assert!(book.expenses().is_empty());
    }

    #[test]
    fn test_find_by_prefix() {
        let mut book = BudgetBook::open(MemoryStore::new());
        let food = book.add(30000, "Food", day(6, 10)).unwrap();

        assert_eq!(book.find_by_prefix(&food.id.to_string()).unwrap(), &food);
        assert_eq!(book.find_by_prefix(&food.id.as_uuid().to_string()).unwrap(), &food);
        assert!(book.find_by_prefix("exp-zzzz").unwrap_err().is_not_found());
    }

    #[test]
    fn test_mutations_are_audited() {
        let temp_dir = TempDir::new().unwrap();
        let logger = AuditLogger::new(temp_dir.path().join("audit.log"));
        let mut book = BudgetBook::open(MemoryStore::new()).with_audit(logger.clone());

        book.set_budget(100000).unwrap();
        let food = book.add(30000, "Food", day(6, 10)).unwrap();
        book.upsert(Expense::with_id(food.id, 35000, "Food", food.date)).unwrap();
        book.delete(food.id).unwrap();
        book.reset().unwrap();

        let ops: Vec<(Operation, EntityType)> = logger
            .read_all()
            .unwrap()
            .iter()
            .map(|e| (e.operation, e.entity_type))
            .collect();
        assert_eq!(
            ops,
            vec![
                (Operation::Update, EntityType::Budget),
                (Operation::Create, EntityType::Expense),
                (Operation::Update, EntityType::Expense),
                (Operation::Delete, EntityType::Expense),
                (Operation::Reset, EntityType::Budget),
                (Operation::Reset, EntityType::Expense),
            ]
        );

        let update = &logger.read_all().unwrap()[2];
        assert_eq!(update.diff_summary.as_deref(), Some("amount: 30000 -> 35000"));
    }

    #[test]
    fn test_reset_entries_keep_no_cleared_values() {
        let temp_dir = TempDir::new().unwrap();
        let logger = AuditLogger::new(temp_dir.path().join("audit.log"));
        let mut book = BudgetBook::open(MemoryStore::new()).with_audit(logger.clone());
        book.set_budget(100000).unwrap();
        book.add(30000, "Groceries", day(6, 10)).unwrap();

        book.reset().unwrap();

        let entries = logger.read_all().unwrap();
        let resets: Vec<&AuditEntry> = entries
            .iter()
            .filter(|e| e.operation == Operation::Reset)
            .collect();
        assert_eq!(resets.len(), 2);
        assert!(resets.iter().all(|e| e.before.is_none() && e.after.is_none()));
        assert_eq!(resets[0].diff_summary.as_deref(), Some("budget cleared"));
        assert_eq!(resets[1].diff_summary.as_deref(), Some("1 expense(s) removed"));
        assert!(!serde_json::to_string(&resets).unwrap().contains("Groceries"));
    }

    #[test]
    fn test_failed_file_save_leaves_disk_and_memory_in_step() {
        let temp_dir = TempDir::new().unwrap();
        let paths = BudgetPaths::with_base_dir(temp_dir.path().to_path_buf());
        let store = JsonFileStore::new(&paths).unwrap();
        std::fs::create_dir(paths.budget_file()).unwrap();

        let mut book = BudgetBook::open(store);
        assert!(book.add(500, "Food", day(6, 1)).is_err());
        assert!(book.expenses().is_empty());

        let reopened = BudgetBook::open(JsonFileStore::new(&paths).unwrap());
        assert!(reopened.expenses().is_empty());
    }
}
