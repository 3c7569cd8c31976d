//! Income and expense records.

use std::{fmt, str::FromStr};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::{category::Category, common::*};
use crate::errors::FinanceError;

/// Whether a transaction brings money in or takes it out.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            TransactionKind::Income => "income",
            TransactionKind::Expense => "expense",
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for TransactionKind {
    type Err = FinanceError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "income" => Ok(TransactionKind::Income),
            "expense" => Ok(TransactionKind::Expense),
            other => Err(FinanceError::InvalidInput(format!(
                "unknown transaction type `{other}`"
            ))),
        }
    }
}

/// A stored income or expense event.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    pub id: u64,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub category: Category,
    pub amount: f64,
    #[serde(default)]
    pub description: String,
    pub date: NaiveDate,
}

impl Transaction {
    pub fn is_income(&self) -> bool {
        self.kind == TransactionKind::Income
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionKind::Expense
    }
}

impl Identifiable for Transaction {
    fn id(&self) -> u64 {
        self.id
    }
}

impl Amounted for Transaction {
    fn amount(&self) -> f64 {
        self.amount
    }
}

impl Displayable for Transaction {
    fn display_label(&self) -> String {
        let sign = if self.is_income() { '+' } else { '-' };
        format!(
            "{} {} {}{:.2}",
            self.date,
            self.category.display_label(),
            sign,
            self.amount
        )
    }
}

/// Caller-supplied fields for a transaction that has not been stored yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    pub kind: TransactionKind,
    pub category: Category,
    pub amount: f64,
    pub description: String,
    pub date: NaiveDate,
}

impl NewTransaction {
    pub fn new(kind: TransactionKind, category: Category, amount: f64, date: NaiveDate) -> Self {
        Self {
            kind,
            category,
            amount,
            description: String::new(),
            date,
        }
    }

    pub fn income(category: Category, amount: f64, date: NaiveDate) -> Self {
        Self::new(TransactionKind::Income, category, amount, date)
    }

    pub fn expense(category: Category, amount: f64, date: NaiveDate) -> Self {
        Self::new(TransactionKind::Expense, category, amount, date)
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub(crate) fn into_transaction(self, id: u64) -> Transaction {
        Transaction {
            id,
            kind: self.kind,
            category: self.category,
            amount: self.amount,
            description: self.description,
            date: self.date,
        }
    }
}
