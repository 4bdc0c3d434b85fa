//! Field parsers for dates, amounts and transaction kinds

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::error::{LedgerError, LedgerResult};
use crate::models::{Money, TransactionKind};

/// Date-only patterns, tried in order after the ISO-8601 forms
const DATE_PATTERNS: &[&str] = &[
    "%Y-%m-%d", "%m/%d/%Y", "%d/%m/%Y", "%Y/%m/%d", "%m-%d-%Y", "%d-%m-%Y", "%Y.%m.%d",
    "%m.%d.%Y", "%d.%m.%Y",
];

const CURRENCY_SYMBOLS: &[char] = &['$', '€', '£', '¥'];

/// Parse a date cell
///
/// ISO-8601 timestamps are tried first, then [`DATE_PATTERNS`]. Ambiguous
/// values such as `01/02/2024` resolve to the first pattern that accepts
/// them (month first).
pub fn parse_date(raw: &str) -> LedgerResult<NaiveDate> {
    let s = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.date_naive());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S") {
        return Ok(dt.date());
    }

    DATE_PATTERNS
        .iter()
        .find_map(|pattern| NaiveDate::parse_from_str(s, pattern).ok())
        .ok_or_else(|| LedgerError::InvalidDateFormat(raw.to_string()))
}

/// Parse an amount cell into signed money
///
/// Accepts currency symbols, thousands separators, a leading sign and
/// accounting parentheses: `"$1,234.56"`, `"-200"`, `"(200.00)"`.
pub fn parse_amount(raw: &str) -> LedgerResult<Money> {
    let invalid = || LedgerError::InvalidAmountFormat(raw.to_string());

    let cleaned: String = raw
        .chars()
        .filter(|c| !CURRENCY_SYMBOLS.contains(c) && *c != ',' && !c.is_whitespace())
        .collect();

    let (negative, body) = match cleaned
        .strip_prefix('(')
        .and_then(|rest| rest.strip_suffix(')'))
    {
        Some(inner) => (true, inner),
        None => (false, cleaned.as_str()),
    };

    if body.is_empty() {
        return Err(invalid());
    }
    // A parenthesised value may not carry its own sign
    if negative && body.starts_with(['-', '+']) {
        return Err(invalid());
    }

    let amount = Money::parse(body).map_err(|_| invalid())?;
    Ok(if negative { -amount } else { amount })
}

/// Decide the kind of a transaction from an optional hint and the amount
///
/// Unknown or missing hints fall back to the amount sign.
pub fn classify_kind(hint: Option<&str>, amount: Money) -> TransactionKind {
    let from_hint = hint
        .map(|h| h.trim().to_lowercase())
        .filter(|h| !h.is_empty())
        .and_then(|h| kind_from_word(&h));

    from_hint.unwrap_or(if amount.is_negative() {
        TransactionKind::Expense
    } else {
        TransactionKind::Income
    })
}

fn kind_from_word(word: &str) -> Option<TransactionKind> {
    match word {
        "credit" | "deposit" | "income" | "refund" => Some(TransactionKind::Income),
        "debit" | "withdrawal" | "expense" | "payment" | "purchase" => {
            Some(TransactionKind::Expense)
        }
        "transfer" => Some(TransactionKind::Transfer),
        _ => None,
    }
}
