//! Grouping, reduction, and ratio helpers shared by reports, budgets, and the dashboard.

use std::{collections::BTreeMap, fmt};

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::domain::{Amounted, Category, Transaction, TransactionKind};

/// Per-category sums in first-seen order.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CategoryTotals {
    entries: Vec<CategoryAmount>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct CategoryAmount {
    pub category: Category,
    pub amount: f64,
}

impl CategoryTotals {
    pub fn add(&mut self, category: Category, amount: f64) {
        match self
            .entries
            .iter_mut()
            .find(|entry| entry.category == category)
        {
            Some(entry) => entry.amount += amount,
            None => self.entries.push(CategoryAmount { category, amount }),
        }
    }

    pub fn get(&self, category: Category) -> Option<f64> {
        self.entries
            .iter()
            .find(|entry| entry.category == category)
            .map(|entry| entry.amount)
    }

    pub fn total(&self) -> f64 {
        self.entries.iter().map(|entry| entry.amount).sum()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CategoryAmount> {
        self.entries.iter()
    }

    /// Entries ordered by amount descending; equal amounts keep first-seen order.
    pub fn sorted_by_amount(&self) -> Vec<CategoryAmount> {
        let mut sorted = self.entries.clone();
        sorted.sort_by(|a, b| b.amount.total_cmp(&a.amount));
        sorted
    }
}

/// Calendar month used to order monthly buckets.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthKey {
    pub year: i32,
    pub month: u32,
}

impl MonthKey {
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Short display label such as `Jan 2024`.
    pub fn label(&self) -> String {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
            .map(|first| first.format("%b %Y").to_string())
            .unwrap_or_else(|| self.to_string())
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{:02}", self.year, self.month)
    }
}

/// Expense totals for one calendar month.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MonthBucket {
    pub key: MonthKey,
    pub label: String,
    pub category_totals: CategoryTotals,
}

/// Sums amounts per category. Categories without transactions are absent.
pub fn group_by_category<'a, I>(transactions: I) -> CategoryTotals
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut totals = CategoryTotals::default();
    for txn in transactions {
        totals.add(txn.category, txn.amount);
    }
    totals
}

/// Buckets transactions by calendar month in chronological order.
///
/// Every month that has any transaction gets a bucket, but only expenses
/// contribute to its category totals; an income-only month yields an empty
/// bucket.
pub fn group_by_month<'a, I>(transactions: I) -> Vec<MonthBucket>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut months: BTreeMap<MonthKey, MonthBucket> = BTreeMap::new();
    for txn in transactions {
        let key = MonthKey::of(txn.date);
        let bucket = months.entry(key).or_insert_with(|| MonthBucket {
            key,
            label: key.label(),
            category_totals: CategoryTotals::default(),
        });
        if txn.is_expense() {
            bucket.category_totals.add(txn.category, txn.amount);
        }
    }
    months.into_values().collect()
}

/// Sum of the amounts of `items`.
pub fn total_amount<'a, T, I>(items: I) -> f64
where
    T: Amounted + 'a,
    I: IntoIterator<Item = &'a T>,
{
    items.into_iter().map(Amounted::amount).sum()
}

/// Total amount of the transactions of `kind`.
pub fn sum_by_kind(transactions: &[Transaction], kind: TransactionKind) -> f64 {
    total_amount(transactions.iter().filter(|txn| txn.kind == kind))
}

/// `part / whole * 100`, or `0.0` when `whole` is zero.
pub fn percentage_of(part: f64, whole: f64) -> f64 {
    if whole == 0.0 {
        0.0
    } else {
        part / whole * 100.0
    }
}

/// Share of income left after expenses, in percent; `0.0` without income.
pub fn savings_rate(income: f64, expense: f64) -> f64 {
    if income > 0.0 {
        (income - expense) / income * 100.0
    } else {
        0.0
    }
}

/// Spent share of a budget cap in percent. Not capped at 100.
pub fn budget_utilization(spent: f64, cap: f64) -> f64 {
    percentage_of(spent, cap)
}

/// Status bucket of a budget's utilization.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BudgetTier {
    Ok,
    Warning,
    Danger,
}

impl BudgetTier {
    pub fn from_utilization(percent: f64) -> Self {
        if percent >= 90.0 {
            BudgetTier::Danger
        } else if percent >= 75.0 {
            BudgetTier::Warning
        } else {
            BudgetTier::Ok
        }
    }
}

impl fmt::Display for BudgetTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            BudgetTier::Ok => "ok",
            BudgetTier::Warning => "warning",
            BudgetTier::Danger => "danger",
        };
        f.write_str(label)
    }
}

/// Qualitative rating of a savings rate.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SavingsTier {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl SavingsTier {
    pub fn from_rate(rate: f64) -> Self {
        if rate >= 20.0 {
            SavingsTier::Excellent
        } else if rate >= 10.0 {
            SavingsTier::Good
        } else if rate > 0.0 {
            SavingsTier::Fair
        } else {
            SavingsTier::Poor
        }
    }
}

impl fmt::Display for SavingsTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SavingsTier::Excellent => "Excellent",
            SavingsTier::Good => "Good",
            SavingsTier::Fair => "Fair",
            SavingsTier::Poor => "Poor",
        };
        f.write_str(label)
    }
}
