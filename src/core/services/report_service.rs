//! Builds the four report shapes from a period-filtered transaction set.

use std::{fmt, str::FromStr};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::period::{resolve_for_report, DateRange, PeriodSelector};
use crate::core::services::aggregation::{
    group_by_category, group_by_month, percentage_of, savings_rate, sum_by_kind, CategoryTotals,
    SavingsTier,
};
use crate::core::services::FilterService;
use crate::domain::{Category, Displayable, Transaction, TransactionKind};
use crate::errors::FinanceError;

/// Report variants offered by the report screen.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ReportKind {
    Expense,
    Income,
    Savings,
    Category,
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ReportKind::Expense => "Expense Analysis",
            ReportKind::Income => "Income Analysis",
            ReportKind::Savings => "Savings Analysis",
            ReportKind::Category => "Category Breakdown by Month",
        };
        f.write_str(label)
    }
}

impl FromStr for ReportKind {
    type Err = FinanceError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "expense" | "expenses" => Ok(ReportKind::Expense),
            "income" => Ok(ReportKind::Income),
            "savings" => Ok(ReportKind::Savings),
            "category" | "categories" => Ok(ReportKind::Category),
            other => Err(FinanceError::InvalidInput(format!(
                "unknown report type `{other}`"
            ))),
        }
    }
}

/// Proportional chart data (pie/doughnut).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PieChart {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

impl PieChart {
    fn push(&mut self, label: impl Into<String>, value: f64) {
        self.labels.push(label.into());
        self.values.push(value);
    }
}

/// One row of an expense or income analysis table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategoryRow {
    pub category: Category,
    pub label: String,
    pub amount: f64,
    pub percentage: f64,
}

/// Expense or income analysis: a per-category breakdown of one kind.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategoryAnalysis {
    pub kind: TransactionKind,
    pub total: f64,
    pub chart: PieChart,
    pub rows: Vec<CategoryRow>,
}

/// Numeric savings summary. `savings` may be negative.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct SavingsSummary {
    pub total_income: f64,
    pub total_expense: f64,
    pub savings: f64,
    pub savings_rate: f64,
    pub tier: SavingsTier,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SavingsReport {
    pub summary: SavingsSummary,
    /// Expenses against savings; negative savings are drawn as zero.
    pub chart: PieChart,
}

/// One category's values across the month axis.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Series {
    pub category: Category,
    pub label: String,
    pub values: Vec<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct StackedBarChart {
    pub labels: Vec<String>,
    pub series: Vec<Series>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategoryTotalRow {
    pub category: Category,
    pub label: String,
    pub total: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BreakdownReport {
    pub chart: StackedBarChart,
    /// Category grand totals, largest first.
    pub totals: Vec<CategoryTotalRow>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ReportBody {
    Expense(CategoryAnalysis),
    Income(CategoryAnalysis),
    Savings(SavingsReport),
    Category(BreakdownReport),
}

/// A generated report together with the period it covers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Report {
    pub kind: ReportKind,
    pub period: PeriodSelector,
    pub range: DateRange,
    pub transaction_count: usize,
    pub body: ReportBody,
}

/// Stateless report builders over transaction snapshots.
pub struct ReportService;

impl ReportService {
    /// Resolves `period` in report mode, filters, and builds the report of `kind`.
    pub fn generate(
        transactions: &[Transaction],
        kind: ReportKind,
        period: PeriodSelector,
        today: NaiveDate,
    ) -> Report {
        let range = resolve_for_report(period, today);
        let selected = FilterService::in_range(transactions, &range);
        debug!(%kind, %period, %range, selected = selected.len(), "generating report");
        let body = match kind {
            ReportKind::Expense => {
                ReportBody::Expense(Self::category_analysis(&selected, TransactionKind::Expense))
            }
            ReportKind::Income => {
                ReportBody::Income(Self::category_analysis(&selected, TransactionKind::Income))
            }
            ReportKind::Savings => ReportBody::Savings(Self::savings(&selected)),
            ReportKind::Category => ReportBody::Category(Self::category_breakdown(&selected)),
        };
        Report {
            kind,
            period,
            range,
            transaction_count: selected.len(),
            body,
        }
    }

    /// Per-category breakdown of one transaction kind, largest category first.
    pub fn category_analysis(transactions: &[Transaction], kind: TransactionKind) -> CategoryAnalysis {
        let totals = group_by_category(transactions.iter().filter(|txn| txn.kind == kind));
        let total = totals.total();
        let chart = Self::pie_from_totals(&totals);
        let rows = totals
            .sorted_by_amount()
            .into_iter()
            .map(|entry| CategoryRow {
                category: entry.category,
                label: entry.category.display_label(),
                amount: entry.amount,
                percentage: percentage_of(entry.amount, total),
            })
            .collect();
        CategoryAnalysis {
            kind,
            total,
            chart,
            rows,
        }
    }

    pub fn savings(transactions: &[Transaction]) -> SavingsReport {
        let total_income = sum_by_kind(transactions, TransactionKind::Income);
        let total_expense = sum_by_kind(transactions, TransactionKind::Expense);
        let savings = total_income - total_expense;
        let rate = savings_rate(total_income, total_expense);

        let mut chart = PieChart::default();
        chart.push("Expenses", total_expense);
        chart.push("Savings", savings.max(0.0));

        SavingsReport {
            summary: SavingsSummary {
                total_income,
                total_expense,
                savings,
                savings_rate: rate,
                tier: SavingsTier::from_rate(rate),
            },
            chart,
        }
    }

    /// Monthly expense series per category plus category grand totals.
    pub fn category_breakdown(transactions: &[Transaction]) -> BreakdownReport {
        let months = group_by_month(transactions);

        let mut categories: Vec<Category> = Vec::new();
        for bucket in &months {
            for entry in bucket.category_totals.iter() {
                if !categories.contains(&entry.category) {
                    categories.push(entry.category);
                }
            }
        }

        let series: Vec<Series> = categories
            .iter()
            .map(|&category| Series {
                category,
                label: category.display_label(),
                values: months
                    .iter()
                    .map(|bucket| bucket.category_totals.get(category).unwrap_or(0.0))
                    .collect(),
            })
            .collect();

        let mut totals: Vec<CategoryTotalRow> = series
            .iter()
            .map(|line| CategoryTotalRow {
                category: line.category,
                label: line.label.clone(),
                total: line.values.iter().sum(),
            })
            .collect();
        totals.sort_by(|a, b| b.total.total_cmp(&a.total));

        BreakdownReport {
            chart: StackedBarChart {
                labels: months.iter().map(|bucket| bucket.label.clone()).collect(),
                series,
            },
            totals,
        }
    }

    /// Pie data in the same order as the analysis rows: largest first.
    pub(crate) fn pie_from_totals(totals: &CategoryTotals) -> PieChart {
        let mut chart = PieChart::default();
        for entry in totals.sorted_by_amount() {
            chart.push(entry.category.display_label(), entry.amount);
        }
        chart
    }
}
