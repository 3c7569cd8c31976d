use chrono::NaiveDate;
use serde::Serialize;

use super::{output, CliContext, CliError};
use crate::core::services::{
    BudgetService, DashboardOptions, DashboardService, FilterService, Report, ReportBody,
    ReportKind, ReportService, Selection, TransactionFilter,
};
use crate::core::{BudgetChange, PeriodSelector, Removal};
use crate::domain::{
    BudgetPeriod, Category, Displayable, NewTransaction, Transaction, TransactionKind,
};
use crate::errors::FinanceError;
use crate::utils::build_info;

const COMMANDS: &[&str] = &[
    "add",
    "delete",
    "list",
    "budget",
    "delete-budget",
    "budgets",
    "report",
    "dashboard",
];

const USAGE: &str = "\
usage: finance_core_cli [--json] <command> [args]

commands:
  add <income|expense> <category> <amount> <YYYY-MM-DD> [description...]
  delete <id>
  list [type|all] [category|all] [period]
  budget <category> <amount> [monthly|yearly]
  delete-budget <id>
  budgets
  report <expense|income|savings|category> [period]
  dashboard
  version

periods: thisMonth, lastMonth, thisQuarter, thisYear, all";

pub(super) fn is_known(name: &str) -> bool {
    COMMANDS.contains(&name)
}

pub(super) fn print_usage() {
    println!("{USAGE}");
}

pub(super) fn dispatch(context: &mut CliContext, name: &str, args: &[String]) -> Result<(), CliError> {
    match name {
        "add" => add(context, args),
        "delete" => delete(context, args),
        "list" => list(context, args),
        "budget" => budget(context, args),
        "delete-budget" => delete_budget(context, args),
        "budgets" => budgets(context),
        "report" => report(context, args),
        "dashboard" => dashboard(context),
        other => Err(CliError::Usage(format!("unknown command `{other}`"))),
    }
}

pub(super) fn version(json: bool) -> Result<(), CliError> {
    let info = build_info::current();
    if json {
        return emit_json(&info);
    }
    println!("{}", info.summary());
    Ok(())
}

fn add(context: &mut CliContext, args: &[String]) -> Result<(), CliError> {
    let [kind, category, amount, date, description @ ..] = args else {
        return Err(usage("add <income|expense> <category> <amount> <YYYY-MM-DD> [description...]"));
    };
    let kind: TransactionKind = kind.parse()?;
    let category = Category::parse_for(kind, category)?;
    let new = NewTransaction::new(kind, category, parse_amount(amount)?, parse_date(date)?)
        .with_description(description.join(" "));
    let stored = context.store.add_transaction(new)?;
    if context.json {
        return emit_json(&stored);
    }
    output::success(format!(
        "Transaction #{} added: {}",
        stored.id,
        stored.display_label()
    ));
    Ok(())
}

fn delete(context: &mut CliContext, args: &[String]) -> Result<(), CliError> {
    let [id] = args else {
        return Err(usage("delete <id>"));
    };
    let id = parse_id(id)?;
    let label = context.store.transaction(id).map(Displayable::display_label);
    match context.store.delete_transaction(id)? {
        Removal::Removed => output::success(format!(
            "Transaction #{id} deleted: {}",
            label.unwrap_or_default()
        )),
        Removal::NotFound => output::warning(format!("No transaction with id {id}")),
    }
    Ok(())
}

fn list(context: &mut CliContext, args: &[String]) -> Result<(), CliError> {
    if args.len() > 3 {
        return Err(usage("list [type|all] [category|all] [period]"));
    }
    let mut filter = TransactionFilter::all();
    if let Some(kind) = args.first() {
        filter.kind = parse_selection(kind)?;
    }
    if let Some(category) = args.get(1) {
        filter.category = parse_selection(category)?;
    }
    if let Some(period) = args.get(2) {
        filter.period = PeriodSelector::parse_lossy(period);
    }

    let matched = FilterService::apply(context.store.transactions(), &filter, context.store.today());
    if context.json {
        return emit_json(&matched);
    }
    output::section(format!("Transactions ({})", filter.period));
    if matched.is_empty() {
        output::info("No transactions match the filter.");
    }
    for txn in &matched {
        output::line(transaction_row(txn, &context.config.currency));
    }
    Ok(())
}

fn budget(context: &mut CliContext, args: &[String]) -> Result<(), CliError> {
    let (category, amount, period) = match args {
        [category, amount] => (category, amount, BudgetPeriod::default()),
        [category, amount, period] => (category, amount, period.parse::<BudgetPeriod>()?),
        _ => return Err(usage("budget <category> <amount> [monthly|yearly]")),
    };
    let category = Category::parse_for(TransactionKind::Expense, category)?;
    let (saved, change) = context
        .store
        .add_or_update_budget(category, parse_amount(amount)?, period)?;
    if context.json {
        return emit_json(&saved);
    }
    let verb = match change {
        BudgetChange::Created => "created",
        BudgetChange::Updated => "updated",
    };
    output::success(format!("Budget #{} {verb}: {}", saved.id, saved.display_label()));
    Ok(())
}

fn delete_budget(context: &mut CliContext, args: &[String]) -> Result<(), CliError> {
    let [id] = args else {
        return Err(usage("delete-budget <id>"));
    };
    let id = parse_id(id)?;
    let label = context.store.budget(id).map(Displayable::display_label);
    match context.store.delete_budget(id)? {
        Removal::Removed => output::success(format!(
            "Budget #{id} deleted: {}",
            label.unwrap_or_default()
        )),
        Removal::NotFound => output::warning(format!("No budget with id {id}")),
    }
    Ok(())
}

fn budgets(context: &mut CliContext) -> Result<(), CliError> {
    let statuses = BudgetService::evaluate(
        context.store.budgets(),
        context.store.transactions(),
        context.store.today(),
    );
    if context.json {
        return emit_json(&statuses);
    }
    output::section("Budgets");
    if statuses.is_empty() {
        output::info("No budgets configured.");
    }
    let currency = &context.config.currency;
    for status in &statuses {
        output::line(format!(
            "#{} {:<14} {:<8} {} / {} {} {:>6.1}% {}",
            status.budget.id,
            status.budget.category.display_label(),
            status.budget.period,
            output::money(status.spent, currency),
            output::money(status.budget.amount, currency),
            output::progress_bar(status.display_percent, 20),
            status.utilization,
            output::budget_badge(status.tier),
        ));
        if status.is_over() {
            output::warning(format!(
                "{} is over budget by {}",
                status.budget.category.display_label(),
                output::money(-status.remaining, currency)
            ));
        }
    }
    Ok(())
}

fn report(context: &mut CliContext, args: &[String]) -> Result<(), CliError> {
    let (kind, period) = match args {
        [kind] => (kind.parse::<ReportKind>()?, context.config.default_report_period),
        [kind, period] => (kind.parse::<ReportKind>()?, PeriodSelector::parse_lossy(period)),
        _ => return Err(usage("report <expense|income|savings|category> [period]")),
    };
    let report = ReportService::generate(
        context.store.transactions(),
        kind,
        period,
        context.store.today(),
    );
    if context.json {
        return emit_json(&report);
    }
    print_report(&report, &context.config.currency);
    Ok(())
}

fn print_report(report: &Report, currency: &str) {
    output::section(format!("{} ({})", report.kind, report.range));
    match &report.body {
        ReportBody::Expense(analysis) | ReportBody::Income(analysis) => {
            if analysis.rows.is_empty() {
                output::info(format!("No {} recorded in this period.", analysis.kind));
            }
            for row in &analysis.rows {
                output::line(format!(
                    "{:<14} {:>14} {:>6.1}%",
                    row.label,
                    output::money(row.amount, currency),
                    row.percentage
                ));
            }
            output::line(format!("{:<14} {:>14}", "Total", output::money(analysis.total, currency)));
        }
        ReportBody::Savings(savings) => {
            let summary = &savings.summary;
            output::line(format!("Income:   {}", output::money(summary.total_income, currency)));
            output::line(format!("Expenses: {}", output::money(summary.total_expense, currency)));
            output::line(format!("Savings:  {}", output::money(summary.savings, currency)));
            output::line(format!(
                "Rate:     {:.1}% {}",
                summary.savings_rate,
                output::savings_badge(summary.tier)
            ));
        }
        ReportBody::Category(breakdown) => {
            for (index, month) in breakdown.chart.labels.iter().enumerate() {
                let parts: Vec<String> = breakdown
                    .chart
                    .series
                    .iter()
                    .filter_map(|series| {
                        let value = series.values.get(index).copied().unwrap_or(0.0);
                        (value != 0.0).then(|| format!("{} {:.2}", series.label, value))
                    })
                    .collect();
                let detail = if parts.is_empty() {
                    "no expenses".to_string()
                } else {
                    parts.join(", ")
                };
                output::line(format!("{month}: {detail}"));
            }
            for row in &breakdown.totals {
                output::line(format!("{:<14} {:>14}", row.label, output::money(row.total, currency)));
            }
        }
    }
}

fn dashboard(context: &mut CliContext) -> Result<(), CliError> {
    let dashboard = DashboardService::summarize(
        context.store.transactions(),
        DashboardOptions::from(&context.config),
        context.store.today(),
    );
    if context.json {
        return emit_json(&dashboard);
    }
    let currency = &context.config.currency;
    output::section("Dashboard");
    output::line(format!("Income:  {}", output::money(dashboard.totals.income, currency)));
    output::line(format!("Expense: {}", output::money(dashboard.totals.expense, currency)));
    output::line(format!("Balance: {}", output::money(dashboard.totals.balance, currency)));

    output::section("Recent transactions");
    if dashboard.recent.is_empty() {
        output::info("No transactions yet.");
    }
    for txn in &dashboard.recent {
        output::line(transaction_row(txn, currency));
    }

    output::section("Monthly overview");
    let overview = &dashboard.overview;
    for (index, label) in overview.labels.iter().enumerate() {
        output::line(format!(
            "{label}: income {:.2}, expense {:.2}",
            overview.income.get(index).copied().unwrap_or(0.0),
            overview.expense.get(index).copied().unwrap_or(0.0)
        ));
    }
    Ok(())
}

fn transaction_row(txn: &Transaction, currency: &str) -> String {
    format!(
        "#{} {} {:<7} {:<14} {:>14} {}",
        txn.id,
        txn.date,
        txn.kind,
        txn.category.display_label(),
        output::money(txn.amount, currency),
        txn.description
    )
    .trim_end()
    .to_string()
}

fn emit_json<T: Serialize + ?Sized>(value: &T) -> Result<(), CliError> {
    let json = serde_json::to_string_pretty(value).map_err(FinanceError::from)?;
    println!("{json}");
    Ok(())
}

fn usage(signature: &str) -> CliError {
    CliError::Usage(format!("usage: {signature}"))
}

fn parse_amount(raw: &str) -> Result<f64, CliError> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|amount| amount.is_finite())
        .ok_or_else(|| CliError::Usage(format!("`{raw}` is not a valid amount")))
}

fn parse_id(raw: &str) -> Result<u64, CliError> {
    raw.trim()
        .parse::<u64>()
        .map_err(|_| CliError::Usage(format!("`{raw}` is not a valid id")))
}

fn parse_date(raw: &str) -> Result<NaiveDate, CliError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| CliError::from(FinanceError::from(err)))
}

fn parse_selection<T>(raw: &str) -> Result<Selection<T>, CliError>
where
    T: std::str::FromStr<Err = FinanceError>,
{
    if raw.trim().eq_ignore_ascii_case("all") {
        return Ok(Selection::All);
    }
    Ok(Selection::Only(raw.parse()?))
}
