//! Evaluates budgets against recorded spending.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::period::{resolve_for_budget, DateRange};
use crate::core::services::aggregation::{budget_utilization, total_amount, BudgetTier};
use crate::domain::{Budget, Transaction};

/// Progress of one budget over its current period.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BudgetStatus {
    pub budget: Budget,
    pub range: DateRange,
    pub spent: f64,
    /// Spent share of the cap in percent; may exceed 100.
    pub utilization: f64,
    /// `utilization` capped at 100 for progress bars.
    pub display_percent: f64,
    /// Cap minus spent; negative when overspent.
    pub remaining: f64,
    pub tier: BudgetTier,
}

impl BudgetStatus {
    pub fn is_over(&self) -> bool {
        self.spent > self.budget.amount
    }
}

/// Stateless budgeting utilities over store snapshots.
pub struct BudgetService;

impl BudgetService {
    /// Evaluates every budget in insertion order.
    pub fn evaluate(
        budgets: &[Budget],
        transactions: &[Transaction],
        today: NaiveDate,
    ) -> Vec<BudgetStatus> {
        budgets
            .iter()
            .map(|budget| Self::evaluate_one(budget, transactions, today))
            .collect()
    }

    /// Sums expenses of the budget's category from the start of its period through `today`.
    pub fn evaluate_one(budget: &Budget, transactions: &[Transaction], today: NaiveDate) -> BudgetStatus {
        let range = resolve_for_budget(budget.period, today);
        let spent = total_amount(
            transactions
                .iter()
                .filter(|txn| txn.is_expense())
                .filter(|txn| txn.category == budget.category)
                .filter(|txn| range.contains(txn.date)),
        );
        let utilization = budget_utilization(spent, budget.amount);
        let tier = BudgetTier::from_utilization(utilization);
        debug!(
            id = budget.id,
            category = %budget.category,
            spent,
            utilization,
            %tier,
            "budget evaluated"
        );
        BudgetStatus {
            budget: budget.clone(),
            range,
            spent,
            utilization,
            display_percent: utilization.min(100.0),
            remaining: budget.amount - spent,
            tier,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BudgetPeriod, Category, NewTransaction};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn budget(amount: f64, period: BudgetPeriod) -> Budget {
        Budget {
            id: 1,
            category: Category::Food,
            amount,
            period,
        }
    }

    fn food(id: u64, amount: f64, on: NaiveDate) -> Transaction {
        NewTransaction::expense(Category::Food, amount, on).into_transaction(id)
    }

    #[test]
    fn ninety_percent_is_danger() {
        let txns = vec![food(1, 90.0, date(2024, 1, 10))];
        let status = BudgetService::evaluate_one(&budget(100.0, BudgetPeriod::Monthly), &txns, date(2024, 1, 15));
        assert_eq!(status.spent, 90.0);
        assert_eq!(status.utilization, 90.0);
        assert_eq!(status.tier, BudgetTier::Danger);
        assert_eq!(status.remaining, 10.0);
        assert!(!status.is_over());
    }

    #[test]
    fn overspend_is_reported_uncapped() {
        let txns = vec![
            food(1, 100.0, date(2024, 1, 3)),
            food(2, 50.0, date(2024, 1, 12)),
        ];
        let status = BudgetService::evaluate_one(&budget(100.0, BudgetPeriod::Monthly), &txns, date(2024, 1, 15));
        assert_eq!(status.utilization, 150.0);
        assert_eq!(status.display_percent, 100.0);
        assert_eq!(status.remaining, -50.0);
        assert!(status.is_over());
    }

    #[test]
    fn only_matching_expenses_up_to_today_count() {
        let txns = vec![
            food(1, 20.0, date(2024, 1, 1)),
            food(2, 40.0, date(2024, 1, 20)),
            food(3, 30.0, date(2023, 12, 31)),
            NewTransaction::expense(Category::Housing, 500.0, date(2024, 1, 2)).into_transaction(4),
            NewTransaction::income(Category::Other, 60.0, date(2024, 1, 2)).into_transaction(5),
        ];
        let status = BudgetService::evaluate_one(&budget(80.0, BudgetPeriod::Monthly), &txns, date(2024, 1, 15));
        assert_eq!(status.spent, 20.0);
        assert_eq!(status.tier, BudgetTier::Ok);
    }

    #[test]
    fn yearly_budget_spans_year_to_date() {
        let txns = vec![
            food(1, 20.0, date(2024, 1, 1)),
            food(2, 40.0, date(2024, 5, 20)),
            food(3, 30.0, date(2023, 12, 31)),
        ];
        let status = BudgetService::evaluate_one(&budget(80.0, BudgetPeriod::Yearly), &txns, date(2024, 6, 1));
        assert_eq!(status.spent, 60.0);
        assert_eq!(status.utilization, 75.0);
        assert_eq!(status.tier, BudgetTier::Warning);
    }

    #[test]
    fn evaluate_keeps_budget_order() {
        let budgets = vec![
            Budget { id: 7, category: Category::Housing, amount: 900.0, period: BudgetPeriod::Monthly },
            Budget { id: 3, category: Category::Food, amount: 100.0, period: BudgetPeriod::Yearly },
        ];
        let statuses = BudgetService::evaluate(&budgets, &[], date(2024, 1, 15));
        let ids: Vec<u64> = statuses.iter().map(|status| status.budget.id).collect();
        assert_eq!(ids, vec![7, 3]);
        assert!(statuses.iter().all(|status| status.spent == 0.0));
    }
}
