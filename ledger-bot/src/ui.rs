//! Reply text formatting, inline keyboards, and user input parsing.
//!
//! Callback data vocabulary: `income`, `expense`, `report`, `edit`,
//! `main_menu`, `edit_tx:<id>`, `debtor_paid:<id>`.

use chrono::{DateTime, Utc};

use storage::{DebtorRecord, LedgerSummary, TransactionRecord};

use crate::core::{Button, Keyboard};

pub const CB_INCOME: &str = "income";
pub const CB_EXPENSE: &str = "expense";
pub const CB_REPORT: &str = "report";
pub const CB_EDIT: &str = "edit";
pub const CB_MAIN_MENU: &str = "main_menu";
pub const CB_EDIT_TX_PREFIX: &str = "edit_tx:";
pub const CB_DEBTOR_PAID_PREFIX: &str = "debtor_paid:";

/// Main menu shown by /start and after a completed flow.
pub fn main_menu() -> Keyboard {
    Keyboard::new()
        .row(vec![Button::new("Record Income", CB_INCOME)])
        .row(vec![Button::new("Record Expense", CB_EXPENSE)])
        .row(vec![Button::new("View Report", CB_REPORT)])
        .row(vec![Button::new("Edit Transaction", CB_EDIT)])
}

/// One button per editable transaction, plus a back row.
pub fn edit_menu(recent: &[TransactionRecord]) -> Keyboard {
    let mut keyboard = Keyboard::new();
    for t in recent {
        keyboard = keyboard.row(vec![Button::new(
            transaction_line(t),
            format!("{}{}", CB_EDIT_TX_PREFIX, t.id),
        )]);
    }
    keyboard.row(vec![Button::new("Back to Main Menu", CB_MAIN_MENU)])
}

/// Per-debtor "mark paid" buttons for the unpaid entries.
pub fn debtor_menu(debtors: &[DebtorRecord]) -> Keyboard {
    let mut keyboard = Keyboard::new();
    for d in debtors.iter().filter(|d| !d.paid) {
        keyboard = keyboard.row(vec![Button::new(
            format!("Mark paid: {} ({})", d.name, format_amount(d.amount)),
            format!("{}{}", CB_DEBTOR_PAID_PREFIX, d.id),
        )]);
    }
    keyboard
}

/// `income: 12.50 - groceries (2026-01-02 13:45)`
pub fn transaction_line(t: &TransactionRecord) -> String {
    let note = t.note.as_deref().unwrap_or("no note");
    format!(
        "{}: {} - {} ({})",
        capitalize(&t.kind),
        format_amount(t.amount),
        note,
        format_time(t.created_at)
    )
}

/// Report body: the latest entries plus totals. Empty ledger gets a hint.
pub fn format_report(recent: &[TransactionRecord], summary: &LedgerSummary) -> String {
    if recent.is_empty() {
        return "No transactions found.".to_string();
    }

    let mut report = format!("Last {} transactions:\n\n", recent.len());
    for t in recent {
        report.push_str(&transaction_line(t));
        report.push('\n');
    }
    report.push_str(&format!(
        "\nIncome: {}\nExpense: {}\nBalance: {}",
        format_amount(summary.income_total),
        format_amount(summary.expense_total),
        format_amount(summary.balance()),
    ));
    report
}

/// Debtor list body: unpaid first (the repository orders them), paid entries
/// flagged with their payment time. Empty list gets a hint.
pub fn format_debtor_list(debtors: &[DebtorRecord]) -> String {
    if debtors.is_empty() {
        return "No debtors registered.".to_string();
    }

    let mut out = String::from("Debtors:\n\n");
    for d in debtors {
        match d.paid_at {
            Some(paid_at) if d.paid => out.push_str(&format!(
                "#{} {} - {} [paid {}]\n",
                d.id,
                d.name,
                format_amount(d.amount),
                format_time(paid_at)
            )),
            _ => out.push_str(&format!(
                "#{} {} - {} [owes]\n",
                d.id,
                d.name,
                format_amount(d.amount)
            )),
        }
    }
    out.push_str("\nEdit with /edit_debtor <id>.");
    out
}

/// Parses a user-entered amount. Accepts `12` and `12.5`; rejects zero,
/// negatives, and non-finite values.
pub fn parse_amount(input: &str) -> Result<f64, String> {
    let amount: f64 = input
        .trim()
        .parse()
        .map_err(|_| format!("'{}' is not a number.", input.trim()))?;
    if !amount.is_finite() || amount <= 0.0 {
        return Err("Please enter a positive amount.".to_string());
    }
    Ok(amount)
}

/// Splits `<amount> [note]`; note `-` (or absence) means none.
pub fn parse_amount_and_note(input: &str) -> Result<(f64, Option<String>), String> {
    let trimmed = input.trim();
    let (amount_part, note_part) = match trimmed.split_once(char::is_whitespace) {
        Some((a, n)) => (a, n.trim()),
        None => (trimmed, ""),
    };
    let amount = parse_amount(amount_part)?;
    let note = match note_part {
        "" | "-" => None,
        n => Some(n.to_string()),
    };
    Ok((amount, note))
}

/// Splits `<name...> <amount>`; the last token is the amount so names can
/// contain spaces.
pub fn parse_name_and_amount(input: &str) -> Result<(String, f64), String> {
    let trimmed = input.trim();
    let (name_part, amount_part) = trimmed
        .rsplit_once(char::is_whitespace)
        .ok_or_else(|| "Expected: <name> <amount>".to_string())?;
    let name = name_part.trim();
    if name.is_empty() {
        return Err("Expected: <name> <amount>".to_string());
    }
    let amount = parse_amount(amount_part)?;
    Ok((name.to_string(), amount))
}

pub fn format_amount(amount: f64) -> String {
    format!("{:.2}", amount)
}

fn format_time(t: DateTime<Utc>) -> String {
    t.format("%Y-%m-%d %H:%M").to_string()
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
