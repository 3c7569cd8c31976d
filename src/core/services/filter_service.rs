//! Transaction list filtering.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::period::{resolve_for_dashboard, DateRange, PeriodSelector};
use crate::domain::{Category, Transaction, TransactionKind};

/// Either every value or a single one.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Selection<T> {
    #[default]
    All,
    Only(T),
}

impl<T: PartialEq> Selection<T> {
    pub fn matches(&self, value: &T) -> bool {
        match self {
            Selection::All => true,
            Selection::Only(expected) => expected == value,
        }
    }
}

/// Filter inputs of the transaction list.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct TransactionFilter {
    pub kind: Selection<TransactionKind>,
    pub category: Selection<Category>,
    pub period: PeriodSelector,
}

impl TransactionFilter {
    /// A filter that keeps everything.
    pub fn all() -> Self {
        Self {
            kind: Selection::All,
            category: Selection::All,
            period: PeriodSelector::All,
        }
    }

    pub fn kind(mut self, kind: TransactionKind) -> Self {
        self.kind = Selection::Only(kind);
        self
    }

    pub fn category(mut self, category: Category) -> Self {
        self.category = Selection::Only(category);
        self
    }

    pub fn period(mut self, period: PeriodSelector) -> Self {
        self.period = period;
        self
    }
}

impl Default for TransactionFilter {
    fn default() -> Self {
        Self::all()
    }
}

/// Stateless filtering utilities over transaction snapshots.
pub struct FilterService;

impl FilterService {
    /// Applies the list filter and returns matching transactions, newest first.
    ///
    /// The period is resolved in dashboard mode, so "this month" and "this
    /// year" keep future-dated entries.
    pub fn apply(
        transactions: &[Transaction],
        filter: &TransactionFilter,
        today: NaiveDate,
    ) -> Vec<Transaction> {
        let range = resolve_for_dashboard(filter.period, today);
        let mut matched: Vec<Transaction> = transactions
            .iter()
            .filter(|txn| filter.kind.matches(&txn.kind))
            .filter(|txn| filter.category.matches(&txn.category))
            .filter(|txn| range.contains(txn.date))
            .cloned()
            .collect();
        Self::sort_newest_first(&mut matched);
        debug!(
            total = transactions.len(),
            matched = matched.len(),
            period = %filter.period,
            "transaction filter applied"
        );
        matched
    }

    /// Keeps transactions dated inside `range`, in their original order.
    pub fn in_range(transactions: &[Transaction], range: &DateRange) -> Vec<Transaction> {
        transactions
            .iter()
            .filter(|txn| range.contains(txn.date))
            .cloned()
            .collect()
    }

    /// Returns the `limit` most recent transactions.
    pub fn recent(transactions: &[Transaction], limit: usize) -> Vec<Transaction> {
        let mut sorted = transactions.to_vec();
        Self::sort_newest_first(&mut sorted);
        sorted.truncate(limit);
        sorted
    }

    /// Stable sort by date descending; same-day entries keep insertion order.
    pub fn sort_newest_first(transactions: &mut [Transaction]) {
        transactions.sort_by(|a, b| b.date.cmp(&a.date));
    }
}
