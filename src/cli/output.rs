use colored::{ColoredString, Colorize};
use std::fmt;

use crate::core::services::{BudgetTier, SavingsTier};

/// Message categories used by the CLI output helpers.
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Info,
    Success,
    Warning,
    Error,
    Section,
}

fn build_label(kind: MessageKind) -> (&'static str, &'static str) {
    match kind {
        MessageKind::Info => ("INFO", "[i]"),
        MessageKind::Success => ("SUCCESS", "[+]"),
        MessageKind::Warning => ("WARNING", "[!]"),
        MessageKind::Error => ("ERROR", "[x]"),
        MessageKind::Section => ("INFO", ""),
    }
}

fn apply_style(kind: MessageKind, message: impl fmt::Display) -> String {
    let text = message.to_string();
    let formatted = match kind {
        MessageKind::Section => format!("=== {} ===", text.trim()),
        _ => {
            let (label, icon) = build_label(kind);
            format!("{label}: {icon} {text}")
        }
    };

    match kind {
        MessageKind::Success => formatted.bright_green().to_string(),
        MessageKind::Warning => formatted.bright_yellow().to_string(),
        MessageKind::Error => formatted.bright_red().to_string(),
        MessageKind::Section => formatted.bold().to_string(),
        MessageKind::Info => formatted,
    }
}

pub fn print(kind: MessageKind, message: impl fmt::Display) {
    let formatted = apply_style(kind, message);
    match kind {
        MessageKind::Section => println!("\n{}", formatted),
        MessageKind::Error => eprintln!("{}", formatted),
        _ => println!("{}", formatted),
    }
}

pub fn info(message: impl fmt::Display) {
    print(MessageKind::Info, message);
}

pub fn success(message: impl fmt::Display) {
    print(MessageKind::Success, message);
}

pub fn warning(message: impl fmt::Display) {
    print(MessageKind::Warning, message);
}

pub fn error(message: impl fmt::Display) {
    print(MessageKind::Error, message);
}

pub fn section(title: impl fmt::Display) {
    print(MessageKind::Section, title);
}

/// Plain table row; callers pre-format the columns.
pub fn line(text: impl fmt::Display) {
    println!("  {}", text);
}

pub fn money(amount: f64, currency: &str) -> String {
    format!("{amount:.2} {currency}")
}

pub fn budget_badge(tier: BudgetTier) -> ColoredString {
    let label = tier.to_string().to_uppercase();
    match tier {
        BudgetTier::Ok => label.green(),
        BudgetTier::Warning => label.yellow(),
        BudgetTier::Danger => label.red().bold(),
    }
}

pub fn savings_badge(tier: SavingsTier) -> ColoredString {
    let label = tier.to_string();
    match tier {
        SavingsTier::Excellent | SavingsTier::Good => label.green(),
        SavingsTier::Fair => label.yellow(),
        SavingsTier::Poor => label.red(),
    }
}

/// Fixed-width text progress bar for a percentage in `0..=100`.
pub fn progress_bar(percent: f64, width: usize) -> String {
    let clamped = if percent.is_nan() { 0.0 } else { percent.clamp(0.0, 100.0) };
    let filled = ((clamped / 100.0) * width as f64).round() as usize;
    format!("[{}{}]", "#".repeat(filled), "-".repeat(width - filled.min(width)))
}
