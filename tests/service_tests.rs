mod common;

use common::{date, memory_store, seed_january, today};
use finance_core::{
    core::{
        services::{
            aggregation::group_by_category, BudgetService, BudgetTier, FilterService, ReportBody,
            ReportKind, ReportService, SavingsTier, TransactionFilter,
        },
        PeriodSelector,
    },
    domain::{BudgetPeriod, Category, NewTransaction, TransactionKind},
};

#[test]
fn list_filter_keeps_future_dated_entries_this_month() {
    let (mut store, _) = memory_store();
    seed_january(&mut store);
    let filter = TransactionFilter::all()
        .kind(TransactionKind::Expense)
        .period(PeriodSelector::ThisMonth);
    let matched = FilterService::apply(store.transactions(), &filter, today());
    let dates: Vec<_> = matched.iter().map(|txn| txn.date).collect();
    assert_eq!(dates, vec![date(2024, 2, 1), date(2024, 1, 10)]);
}

#[test]
fn january_expense_report_excludes_february() {
    let (mut store, _) = memory_store();
    seed_january(&mut store);
    let report = ReportService::generate(
        store.transactions(),
        ReportKind::Expense,
        PeriodSelector::ThisMonth,
        today(),
    );
    let ReportBody::Expense(analysis) = report.body else {
        panic!("expected expense analysis");
    };
    assert_eq!(analysis.rows.len(), 1);
    assert_eq!(analysis.rows[0].category, Category::Food);
    assert_eq!(analysis.rows[0].amount, 200.0);
}

#[test]
fn january_savings_rate_is_eighty_percent() {
    let (mut store, _) = memory_store();
    seed_january(&mut store);
    let report = ReportService::generate(
        store.transactions(),
        ReportKind::Savings,
        PeriodSelector::ThisMonth,
        today(),
    );
    let ReportBody::Savings(savings) = report.body else {
        panic!("expected savings report");
    };
    assert_eq!(savings.summary.savings_rate, 80.0);
    assert_eq!(savings.summary.tier, SavingsTier::Excellent);
}

#[test]
fn budget_at_ninety_percent_is_danger() {
    let (mut store, _) = memory_store();
    store
        .add_transaction(NewTransaction::expense(Category::Food, 90.0, date(2024, 1, 3)))
        .unwrap();
    store
        .add_or_update_budget(Category::Food, 100.0, BudgetPeriod::Monthly)
        .unwrap();
    let statuses = BudgetService::evaluate(store.budgets(), store.transactions(), store.today());
    assert_eq!(statuses.len(), 1);
    assert_eq!(statuses[0].utilization, 90.0);
    assert_eq!(statuses[0].tier, BudgetTier::Danger);
}

#[test]
fn category_totals_partition_each_kind() {
    let (mut store, _) = memory_store();
    seed_january(&mut store);
    store
        .add_transaction(NewTransaction::expense(Category::Other, 5.5, date(2024, 1, 11)))
        .unwrap();
    store
        .add_transaction(NewTransaction::income(Category::Other, 4.5, date(2024, 1, 12)))
        .unwrap();

    for kind in [TransactionKind::Income, TransactionKind::Expense] {
        let selected: Vec<_> = store
            .transactions()
            .iter()
            .filter(|txn| txn.kind == kind)
            .collect();
        let expected: f64 = selected.iter().map(|txn| txn.amount).sum();
        let totals = group_by_category(selected.iter().copied());
        assert_eq!(totals.total(), expected);
    }
}

#[test]
fn ids_stay_unique_under_a_frozen_clock() {
    let (mut store, _) = memory_store();
    let mut ids = Vec::new();
    for day in 1..=20 {
        let txn = store
            .add_transaction(NewTransaction::expense(Category::Food, 1.0, date(2024, 1, day)))
            .unwrap();
        ids.push(txn.id);
    }
    let mut deduped = ids.clone();
    deduped.sort_unstable();
    deduped.dedup();
    assert_eq!(deduped.len(), ids.len());
    assert!(ids.windows(2).all(|pair| pair[0] < pair[1]));
}
