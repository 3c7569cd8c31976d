//! Domain models: transactions, budgets, and the category catalog.

pub mod budget;
pub mod category;
pub mod common;
pub mod transaction;

pub use budget::{Budget, BudgetPeriod};
pub use category::{Category, EXPENSE_CATEGORIES, INCOME_CATEGORIES};
pub use common::{capitalize, Amounted, Displayable, Identifiable};
pub use transaction::{NewTransaction, Transaction, TransactionKind};
