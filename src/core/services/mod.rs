pub mod aggregation;
pub mod budget_service;
pub mod dashboard_service;
pub mod filter_service;
pub mod report_service;

pub use aggregation::{
    BudgetTier, CategoryAmount, CategoryTotals, MonthBucket, MonthKey, SavingsTier,
};
pub use budget_service::{BudgetService, BudgetStatus};
pub use dashboard_service::{
    Dashboard, DashboardOptions, DashboardService, DashboardTotals, OverviewChart,
};
pub use filter_service::{FilterService, Selection, TransactionFilter};
pub use report_service::{
    BreakdownReport, CategoryAnalysis, CategoryRow, CategoryTotalRow, PieChart, Report,
    ReportBody, ReportKind, ReportService, SavingsReport, SavingsSummary, Series,
    StackedBarChart,
};
