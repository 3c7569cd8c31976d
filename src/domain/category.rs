//! Fixed category catalog for income and expense activity.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::domain::{common::*, transaction::TransactionKind};
use crate::errors::FinanceError;

/// Every category known to the tracker. Stored as its lower-cased label.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Salary,
    Freelance,
    Investments,
    Gifts,
    Food,
    Housing,
    Transportation,
    Entertainment,
    Utilities,
    Healthcare,
    Shopping,
    Education,
    #[serde(rename = "personal care")]
    PersonalCare,
    Debt,
    Savings,
    Other,
}

/// Income categories in catalog order.
pub const INCOME_CATEGORIES: [Category; 5] = [
    Category::Salary,
    Category::Freelance,
    Category::Investments,
    Category::Gifts,
    Category::Other,
];

/// Expense categories in catalog order.
pub const EXPENSE_CATEGORIES: [Category; 12] = [
    Category::Food,
    Category::Housing,
    Category::Transportation,
    Category::Entertainment,
    Category::Utilities,
    Category::Healthcare,
    Category::Shopping,
    Category::Education,
    Category::PersonalCare,
    Category::Debt,
    Category::Savings,
    Category::Other,
];

impl Category {
    /// Returns the ordered catalog for a transaction kind.
    pub fn catalog(kind: TransactionKind) -> &'static [Category] {
        match kind {
            TransactionKind::Income => &INCOME_CATEGORIES,
            TransactionKind::Expense => &EXPENSE_CATEGORIES,
        }
    }

    /// Returns `true` when the category appears in the catalog for `kind`.
    pub fn belongs_to(self, kind: TransactionKind) -> bool {
        Self::catalog(kind).contains(&self)
    }

    /// Parses `value` and checks it against the catalog for `kind`.
    pub fn parse_for(kind: TransactionKind, value: &str) -> Result<Self, FinanceError> {
        let category: Category = value.parse()?;
        if category.belongs_to(kind) {
            Ok(category)
        } else {
            Err(FinanceError::InvalidCategory {
                kind,
                value: value.trim().to_string(),
            })
        }
    }

    /// The lower-cased value used for storage and filtering.
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Salary => "salary",
            Category::Freelance => "freelance",
            Category::Investments => "investments",
            Category::Gifts => "gifts",
            Category::Food => "food",
            Category::Housing => "housing",
            Category::Transportation => "transportation",
            Category::Entertainment => "entertainment",
            Category::Utilities => "utilities",
            Category::Healthcare => "healthcare",
            Category::Shopping => "shopping",
            Category::Education => "education",
            Category::PersonalCare => "personal care",
            Category::Debt => "debt",
            Category::Savings => "savings",
            Category::Other => "other",
        }
    }
}

impl Displayable for Category {
    fn display_label(&self) -> String {
        capitalize(self.as_str())
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Category {
    type Err = FinanceError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase().replace(['_', '-'], " ");
        INCOME_CATEGORIES
            .iter()
            .chain(EXPENSE_CATEGORIES.iter())
            .copied()
            .find(|category| category.as_str() == normalized)
            .ok_or_else(|| FinanceError::InvalidInput(format!("unknown category `{}`", value.trim())))
    }
}
