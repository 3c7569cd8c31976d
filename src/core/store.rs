//! Owned transaction and budget collections with snapshot persistence.

use chrono::NaiveDate;
use serde::{de::DeserializeOwned, Serialize};
use tracing::{info, warn};

use crate::core::{clock::Clock, ids::IdGenerator};
use crate::domain::{
    Budget, BudgetPeriod, Category, Identifiable, NewTransaction, Transaction, TransactionKind,
};
use crate::errors::{FinanceError, Result};
use crate::storage::{KeyValueStore, BUDGETS_KEY, TRANSACTIONS_KEY};

/// Outcome of a delete-by-id request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Removal {
    Removed,
    NotFound,
}

/// Whether `add_or_update_budget` inserted a record or changed an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BudgetChange {
    Created,
    Updated,
}

/// Sole owner of the transaction and budget collections.
///
/// Every mutation rewrites the full snapshot of the affected collection
/// through the injected [`KeyValueStore`]. The in-memory change is applied
/// first; a failed write is returned to the caller but not rolled back.
pub struct EntityStore {
    transactions: Vec<Transaction>,
    budgets: Vec<Budget>,
    storage: Box<dyn KeyValueStore>,
    clock: Box<dyn Clock>,
    ids: IdGenerator,
}

impl EntityStore {
    /// Loads both collections from `storage`; absent keys start empty.
    pub fn load(storage: Box<dyn KeyValueStore>, clock: Box<dyn Clock>) -> Result<Self> {
        let transactions: Vec<Transaction> = read_collection(storage.as_ref(), TRANSACTIONS_KEY)?;
        let budgets: Vec<Budget> = read_collection(storage.as_ref(), BUDGETS_KEY)?;
        let highest = highest_id(&transactions).max(highest_id(&budgets));
        info!(
            transactions = transactions.len(),
            budgets = budgets.len(),
            "entity store loaded"
        );
        Ok(Self {
            transactions,
            budgets,
            storage,
            clock,
            ids: IdGenerator::seeded(highest),
        })
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn budgets(&self) -> &[Budget] {
        &self.budgets
    }

    pub fn transaction(&self, id: u64) -> Option<&Transaction> {
        find_by_id(&self.transactions, id)
    }

    pub fn budget(&self, id: u64) -> Option<&Budget> {
        find_by_id(&self.budgets, id)
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// Validates and stores a transaction, returning the stored record.
    pub fn add_transaction(&mut self, new: NewTransaction) -> Result<Transaction> {
        if !new.category.belongs_to(new.kind) {
            return Err(FinanceError::InvalidCategory {
                kind: new.kind,
                value: new.category.to_string(),
            });
        }
        if !(new.amount.is_finite() && new.amount >= 0.0) {
            return Err(FinanceError::InvalidInput(format!(
                "amount must be a finite, non-negative number (got {})",
                new.amount
            )));
        }
        let id = self.ids.next(self.clock.now());
        let transaction = new.into_transaction(id);
        self.transactions.push(transaction.clone());
        info!(
            id,
            kind = %transaction.kind,
            category = %transaction.category,
            amount = transaction.amount,
            "transaction added"
        );
        self.persist_transactions()?;
        Ok(transaction)
    }

    /// Removes the transaction with `id`; a missing id leaves the store untouched.
    pub fn delete_transaction(&mut self, id: u64) -> Result<Removal> {
        if !remove_by_id(&mut self.transactions, id) {
            info!(id, "transaction not found; nothing deleted");
            return Ok(Removal::NotFound);
        }
        info!(id, "transaction deleted");
        self.persist_transactions()?;
        Ok(Removal::Removed)
    }

    /// Creates a budget, or overwrites the amount of the one already
    /// registered for the same category and period.
    pub fn add_or_update_budget(
        &mut self,
        category: Category,
        amount: f64,
        period: BudgetPeriod,
    ) -> Result<(Budget, BudgetChange)> {
        if !category.belongs_to(TransactionKind::Expense) {
            return Err(FinanceError::InvalidCategory {
                kind: TransactionKind::Expense,
                value: category.to_string(),
            });
        }
        if !(amount.is_finite() && amount > 0.0) {
            return Err(FinanceError::InvalidInput(format!(
                "budget amount must be a finite, positive number (got {amount})"
            )));
        }

        let existing = self
            .budgets
            .iter_mut()
            .find(|budget| budget.category == category && budget.period == period);
        let (budget, change) = match existing {
            Some(budget) => {
                budget.amount = amount;
                (budget.clone(), BudgetChange::Updated)
            }
            None => {
                let budget = Budget {
                    id: self.ids.next(self.clock.now()),
                    category,
                    amount,
                    period,
                };
                self.budgets.push(budget.clone());
                (budget, BudgetChange::Created)
            }
        };
        info!(
            id = budget.id,
            category = %category,
            %period,
            amount,
            ?change,
            "budget saved"
        );
        self.persist_budgets()?;
        Ok((budget, change))
    }

    /// Removes the budget with `id`; a missing id leaves the store untouched.
    pub fn delete_budget(&mut self, id: u64) -> Result<Removal> {
        if !remove_by_id(&mut self.budgets, id) {
            info!(id, "budget not found; nothing deleted");
            return Ok(Removal::NotFound);
        }
        info!(id, "budget deleted");
        self.persist_budgets()?;
        Ok(Removal::Removed)
    }

    fn persist_transactions(&self) -> Result<()> {
        write_collection(self.storage.as_ref(), TRANSACTIONS_KEY, &self.transactions)
    }

    fn persist_budgets(&self) -> Result<()> {
        write_collection(self.storage.as_ref(), BUDGETS_KEY, &self.budgets)
    }
}

fn find_by_id<T: Identifiable>(items: &[T], id: u64) -> Option<&T> {
    items.iter().find(|item| item.id() == id)
}

/// Drops the item with `id`; returns whether one was present.
fn remove_by_id<T: Identifiable>(items: &mut Vec<T>, id: u64) -> bool {
    let before = items.len();
    items.retain(|item| item.id() != id);
    items.len() != before
}

fn highest_id<T: Identifiable>(items: &[T]) -> u64 {
    items.iter().map(Identifiable::id).max().unwrap_or(0)
}

fn read_collection<T: DeserializeOwned>(storage: &dyn KeyValueStore, key: &str) -> Result<Vec<T>> {
    match storage.get(key)? {
        Some(raw) if !raw.trim().is_empty() => Ok(serde_json::from_str(&raw)?),
        _ => Ok(Vec::new()),
    }
}

fn write_collection<T: Serialize>(storage: &dyn KeyValueStore, key: &str, items: &[T]) -> Result<()> {
    let json = serde_json::to_string(items)?;
    storage.set(key, &json).map_err(|err| {
        warn!(key, error = %err, "failed to persist snapshot");
        err
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::clock::FixedClock;
    use crate::storage::MemoryStore;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn store_with(memory: &MemoryStore) -> EntityStore {
        let clock = FixedClock::on(date(2024, 1, 15));
        EntityStore::load(Box::new(memory.clone()), Box::new(clock)).unwrap()
    }

    #[test]
    fn add_transaction_assigns_unique_ids_and_persists() {
        let memory = MemoryStore::new();
        let mut store = store_with(&memory);

        let first = store
            .add_transaction(NewTransaction::expense(Category::Food, 20.0, date(2024, 1, 10)))
            .unwrap();
        let second = store
            .add_transaction(NewTransaction::expense(Category::Food, 30.0, date(2024, 1, 11)))
            .unwrap();

        assert_ne!(first.id, second.id);
        assert_eq!(store.transactions().len(), 2);
        let persisted = memory.get(TRANSACTIONS_KEY).unwrap().unwrap();
        let parsed: Vec<Transaction> = serde_json::from_str(&persisted).unwrap();
        assert_eq!(parsed, store.transactions());
    }

    #[test]
    fn add_transaction_rejects_cross_kind_category() {
        let memory = MemoryStore::new();
        let mut store = store_with(&memory);
        let err = store
            .add_transaction(NewTransaction::income(Category::Food, 10.0, date(2024, 1, 1)))
            .unwrap_err();
        assert!(matches!(err, FinanceError::InvalidCategory { .. }));
        assert!(store.transactions().is_empty());
        assert!(!memory.contains_key(TRANSACTIONS_KEY));
    }

    #[test]
    fn deleting_missing_transaction_is_a_no_op() {
        let memory = MemoryStore::new();
        let mut store = store_with(&memory);
        store
            .add_transaction(NewTransaction::income(Category::Salary, 1000.0, date(2024, 1, 5)))
            .unwrap();
        let snapshot = store.transactions().to_vec();

        assert_eq!(store.delete_transaction(42).unwrap(), Removal::NotFound);
        assert_eq!(store.transactions(), snapshot.as_slice());
    }

    #[test]
    fn delete_transaction_removes_and_persists() {
        let memory = MemoryStore::new();
        let mut store = store_with(&memory);
        let txn = store
            .add_transaction(NewTransaction::expense(Category::Debt, 75.0, date(2024, 1, 2)))
            .unwrap();

        assert_eq!(store.delete_transaction(txn.id).unwrap(), Removal::Removed);
        assert!(store.transactions().is_empty());
        assert_eq!(memory.get(TRANSACTIONS_KEY).unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn budget_upsert_is_idempotent() {
        let memory = MemoryStore::new();
        let mut store = store_with(&memory);

        let (created, first) = store
            .add_or_update_budget(Category::Food, 100.0, BudgetPeriod::Monthly)
            .unwrap();
        let (updated, second) = store
            .add_or_update_budget(Category::Food, 100.0, BudgetPeriod::Monthly)
            .unwrap();

        assert_eq!(first, BudgetChange::Created);
        assert_eq!(second, BudgetChange::Updated);
        assert_eq!(created.id, updated.id);
        assert_eq!(store.budgets().len(), 1);
        assert_eq!(store.budgets()[0].amount, 100.0);
    }

    #[test]
    fn budget_update_keeps_other_periods_separate() {
        let memory = MemoryStore::new();
        let mut store = store_with(&memory);
        store
            .add_or_update_budget(Category::Food, 100.0, BudgetPeriod::Monthly)
            .unwrap();
        store
            .add_or_update_budget(Category::Food, 1000.0, BudgetPeriod::Yearly)
            .unwrap();
        store
            .add_or_update_budget(Category::Food, 150.0, BudgetPeriod::Monthly)
            .unwrap();

        assert_eq!(store.budgets().len(), 2);
        assert_eq!(store.budgets()[0].amount, 150.0);
        assert_eq!(store.budgets()[1].amount, 1000.0);
    }

    #[test]
    fn budget_requires_expense_category_and_positive_cap() {
        let memory = MemoryStore::new();
        let mut store = store_with(&memory);
        assert!(store
            .add_or_update_budget(Category::Salary, 10.0, BudgetPeriod::Monthly)
            .is_err());
        for cap in [0.0, -25.0, f64::NAN, f64::INFINITY] {
            let result = store.add_or_update_budget(Category::Food, cap, BudgetPeriod::Monthly);
            assert!(matches!(result, Err(FinanceError::InvalidInput(_))), "cap {cap}");
        }
        assert!(store.budgets().is_empty());
        assert!(!memory.contains_key(BUDGETS_KEY));
    }

    #[test]
    fn add_transaction_rejects_negative_amount() {
        let memory = MemoryStore::new();
        let mut store = store_with(&memory);
        let err = store
            .add_transaction(NewTransaction::expense(Category::Food, -5.0, date(2024, 1, 10)))
            .unwrap_err();
        assert!(matches!(err, FinanceError::InvalidInput(_)));
        assert!(store.transactions().is_empty());
        assert!(!memory.contains_key(TRANSACTIONS_KEY));
    }

    #[test]
    fn non_finite_amounts_never_reach_the_snapshot() {
        let memory = MemoryStore::new();
        {
            let mut store = store_with(&memory);
            store
                .add_transaction(NewTransaction::expense(Category::Food, 12.0, date(2024, 1, 2)))
                .unwrap();
            for amount in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
                let result = store.add_transaction(NewTransaction::expense(
                    Category::Food,
                    amount,
                    date(2024, 1, 3),
                ));
                assert!(matches!(result, Err(FinanceError::InvalidInput(_))), "amount {amount}");
            }
            assert!(store
                .add_or_update_budget(Category::Food, f64::INFINITY, BudgetPeriod::Monthly)
                .is_err());
        }

        let reloaded = store_with(&memory);
        assert_eq!(reloaded.transactions().len(), 1);
        assert!(reloaded.budgets().is_empty());
    }

    #[test]
    fn lookups_find_stored_records_by_id() {
        let memory = MemoryStore::new();
        let mut store = store_with(&memory);
        let txn = store
            .add_transaction(NewTransaction::income(Category::Gifts, 40.0, date(2024, 1, 6)))
            .unwrap();
        let (budget, _) = store
            .add_or_update_budget(Category::Debt, 200.0, BudgetPeriod::Yearly)
            .unwrap();
        assert_eq!(store.transaction(txn.id), Some(&txn));
        assert_eq!(store.budget(budget.id), Some(&budget));
        assert!(store.transaction(budget.id).is_none());
    }

    #[test]
    fn reload_continues_id_sequence() {
        let memory = MemoryStore::new();
        let last_id = {
            let mut store = store_with(&memory);
            store
                .add_transaction(NewTransaction::expense(Category::Food, 5.0, date(2024, 1, 1)))
                .unwrap();
            store
                .add_or_update_budget(Category::Food, 50.0, BudgetPeriod::Monthly)
                .unwrap()
                .0
                .id
        };

        let mut reloaded = store_with(&memory);
        assert_eq!(reloaded.transactions().len(), 1);
        assert_eq!(reloaded.budgets().len(), 1);
        let next = reloaded
            .add_transaction(NewTransaction::expense(Category::Food, 6.0, date(2024, 1, 2)))
            .unwrap();
        assert!(next.id > last_id);
    }

    #[test]
    fn malformed_snapshot_is_reported() {
        let memory = MemoryStore::with_entries([(TRANSACTIONS_KEY, "{not json")]);
        let clock = FixedClock::on(date(2024, 1, 15));
        let result = EntityStore::load(Box::new(memory), Box::new(clock));
        assert!(matches!(result, Err(FinanceError::Serialization(_))));
    }
}
