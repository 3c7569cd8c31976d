//! Home screen summary: totals, recent activity, and the monthly overview.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::core::period::{month_range, months_back};
use crate::core::services::aggregation::{group_by_category, sum_by_kind};
use crate::core::services::{FilterService, PieChart, ReportService};
use crate::domain::{Transaction, TransactionKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardOptions {
    pub recent_limit: usize,
    pub overview_months: u32,
}

impl Default for DashboardOptions {
    fn default() -> Self {
        Self {
            recent_limit: 5,
            overview_months: 6,
        }
    }
}

impl From<&Config> for DashboardOptions {
    fn from(config: &Config) -> Self {
        Self {
            recent_limit: config.recent_limit,
            overview_months: config.overview_months,
        }
    }
}

/// All-time income, expense, and their difference.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct DashboardTotals {
    pub income: f64,
    pub expense: f64,
    pub balance: f64,
}

/// Income and expense per calendar month, oldest first.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct OverviewChart {
    pub labels: Vec<String>,
    pub income: Vec<f64>,
    pub expense: Vec<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Dashboard {
    pub totals: DashboardTotals,
    pub recent: Vec<Transaction>,
    /// All-time expenses per category.
    pub expense_breakdown: PieChart,
    pub overview: OverviewChart,
}

pub struct DashboardService;

impl DashboardService {
    pub fn summarize(
        transactions: &[Transaction],
        options: DashboardOptions,
        today: NaiveDate,
    ) -> Dashboard {
        let income = sum_by_kind(transactions, TransactionKind::Income);
        let expense = sum_by_kind(transactions, TransactionKind::Expense);
        let expenses = group_by_category(transactions.iter().filter(|txn| txn.is_expense()));
        Dashboard {
            totals: DashboardTotals {
                income,
                expense,
                balance: income - expense,
            },
            recent: FilterService::recent(transactions, options.recent_limit),
            expense_breakdown: ReportService::pie_from_totals(&expenses),
            overview: Self::overview(transactions, options.overview_months, today),
        }
    }

    /// One entry per month for the `months` months ending with the current one.
    pub fn overview(transactions: &[Transaction], months: u32, today: NaiveDate) -> OverviewChart {
        let mut chart = OverviewChart::default();
        for offset in (0..months).rev() {
            let first = months_back(today, offset);
            let range = month_range(first);
            let selected = FilterService::in_range(transactions, &range);
            chart.labels.push(first.format("%b %Y").to_string());
            chart
                .income
                .push(sum_by_kind(&selected, TransactionKind::Income));
            chart
                .expense
                .push(sum_by_kind(&selected, TransactionKind::Expense));
        }
        chart
    }
}
