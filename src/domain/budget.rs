use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::domain::{category::Category, common::*};
use crate::errors::FinanceError;

/// A spending cap for one expense category over a recurring period.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Budget {
    pub id: u64,
    pub category: Category,
    pub amount: f64,
    pub period: BudgetPeriod,
}

impl Identifiable for Budget {
    fn id(&self) -> u64 {
        self.id
    }
}

impl Amounted for Budget {
    fn amount(&self) -> f64 {
        self.amount
    }
}

impl Displayable for Budget {
    fn display_label(&self) -> String {
        format!(
            "{} ({}) {:.2}",
            self.category.display_label(),
            self.period,
            self.amount
        )
    }
}

/// Enumerates budgeting periods.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum BudgetPeriod {
    #[default]
    Monthly,
    Yearly,
}

impl fmt::Display for BudgetPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            BudgetPeriod::Monthly => "monthly",
            BudgetPeriod::Yearly => "yearly",
        };
        f.pad(label)
    }
}

impl FromStr for BudgetPeriod {
    type Err = FinanceError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "monthly" => Ok(BudgetPeriod::Monthly),
            "yearly" => Ok(BudgetPeriod::Yearly),
            other => Err(FinanceError::InvalidInput(format!(
                "unknown budget period `{other}`"
            ))),
        }
    }
}
