//! Paginated summary report
//!
//! [`ReportSummary`] holds the figures; a [`ReportRenderer`] turns them into
//! a document. The backend is chosen from [`Settings::report_backend`].

use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, Utc};
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::config::{ReportBackend, Settings};
use crate::error::{LedgerError, LedgerResult};
use crate::models::{AccountId, Money, TransactionKind};
use crate::storage::Storage;

use super::{ExportSettings, ExportSnapshot};

const REPORT_WIDTH: usize = 72;

/// Per-account line of the report
#[derive(Debug, Clone, Tabled)]
pub struct AccountSummary {
    #[tabled(rename = "Account")]
    pub name: String,
    #[tabled(rename = "Currency")]
    pub currency: String,
    #[tabled(rename = "Balance")]
    pub balance: Money,
    /// Sum of the account's income minus expenses inside the range
    #[tabled(rename = "Net in Period")]
    pub period_net: Money,
}

#[derive(Debug, Clone, Tabled)]
pub struct TransactionLine {
    #[tabled(rename = "Date")]
    pub date: NaiveDate,
    #[tabled(rename = "Title")]
    pub title: String,
    #[tabled(rename = "Type")]
    pub kind: TransactionKind,
    #[tabled(rename = "Amount")]
    pub amount: Money,
    #[tabled(rename = "Account")]
    pub account: String,
}

#[derive(Debug, Clone, Tabled)]
pub struct BudgetLine {
    #[tabled(rename = "Budget")]
    pub name: String,
    #[tabled(rename = "Month")]
    pub month: String,
    #[tabled(rename = "Limit")]
    pub limit: Money,
    #[tabled(rename = "Spent")]
    pub spent: Money,
}

#[derive(Debug, Clone, Tabled)]
pub struct SubscriptionLine {
    #[tabled(rename = "Subscription")]
    pub name: String,
    #[tabled(rename = "Amount")]
    pub amount: Money,
    #[tabled(rename = "Cycle")]
    pub cycle: String,
    #[tabled(rename = "Next Due")]
    pub next_due: NaiveDate,
}

#[derive(Debug, Clone, Tabled)]
pub struct GoalLine {
    #[tabled(rename = "Goal")]
    pub name: String,
    #[tabled(rename = "Target")]
    pub target: Money,
    #[tabled(rename = "Saved")]
    pub current: Money,
    #[tabled(rename = "Progress")]
    pub progress: String,
}

/// Figures shown in the report
#[derive(Debug, Clone)]
pub struct ReportSummary {
    pub generated_at: DateTime<Utc>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub total_income: Money,
    pub total_expenses: Money,
    /// Income minus expenses; transfers are excluded
    pub net: Money,
    pub transaction_count: usize,
    pub accounts: Vec<AccountSummary>,
    pub transactions: Option<Vec<TransactionLine>>,
    pub budgets: Option<Vec<BudgetLine>>,
    pub subscriptions: Option<Vec<SubscriptionLine>>,
    pub goals: Option<Vec<GoalLine>>,
}

impl ReportSummary {
    /// Compute the summary for the settings' date range
    ///
    /// Totals always cover every transaction in range; the detail tables
    /// follow the inclusion flags.
    pub fn build(
        storage: &Storage,
        snapshot: &ExportSnapshot,
        settings: &ExportSettings,
        generated_at: DateTime<Utc>,
    ) -> LedgerResult<Self> {
        let in_range = storage
            .transactions
            .get_in_range(settings.start_date, settings.end_date)?;

        let mut total_income = Money::zero();
        let mut total_expenses = Money::zero();
        let mut per_account: HashMap<AccountId, Money> = HashMap::new();

        for txn in &in_range {
            match txn.kind {
                TransactionKind::Income => {
                    total_income = checked(total_income.checked_add(txn.amount))?;
                }
                TransactionKind::Expense => {
                    total_expenses = checked(total_expenses.checked_add(txn.amount))?;
                }
                TransactionKind::Transfer => continue,
            }
            let account_net = per_account.entry(txn.account_id).or_default();
            *account_net = checked(account_net.checked_add(txn.signed_amount()))?;
        }
        let net = checked(total_income.checked_sub(total_expenses))?;

        let accounts = storage
            .accounts
            .get_all()?
            .into_iter()
            .map(|account| AccountSummary {
                period_net: per_account.get(&account.id).copied().unwrap_or_default(),
                name: account.name,
                currency: account.currency,
                balance: account.balance,
            })
            .collect();

        Ok(Self {
            generated_at,
            start_date: settings.start_date,
            end_date: settings.end_date,
            total_income,
            total_expenses,
            net,
            transaction_count: in_range.len(),
            accounts,
            transactions: snapshot.transactions.as_ref().map(|txns| {
                txns.iter()
                    .map(|t| TransactionLine {
                        date: t.date,
                        title: t.title.clone(),
                        kind: t.kind,
                        amount: t.signed_amount(),
                        account: snapshot.account_name(Some(t.account_id)).to_string(),
                    })
                    .collect()
            }),
            budgets: snapshot.budgets.as_ref().map(|budgets| {
                budgets
                    .iter()
                    .map(|b| BudgetLine {
                        name: b.name.clone(),
                        month: b.month.format("%Y-%m").to_string(),
                        limit: b.limit_amount,
                        spent: b.spent_amount,
                    })
                    .collect()
            }),
            subscriptions: snapshot.subscriptions.as_ref().map(|subs| {
                subs.iter()
                    .map(|s| SubscriptionLine {
                        name: s.name.clone(),
                        amount: s.amount,
                        cycle: s.billing_cycle.to_string(),
                        next_due: s.next_due_date,
                    })
                    .collect()
            }),
            goals: snapshot.goals.as_ref().map(|goals| {
                goals
                    .iter()
                    .map(|g| GoalLine {
                        name: g.name.clone(),
                        target: g.target_amount,
                        current: g.current_amount,
                        progress: format_percentage(g.progress() * 100.0),
                    })
                    .collect()
            }),
        })
    }
}

fn checked(sum: Option<Money>) -> LedgerResult<Money> {
    sum.ok_or_else(|| LedgerError::ReportGenerationFailed("totals out of range".into()))
}

/// Turns a summary into a finished document
pub trait ReportRenderer {
    fn render(&self, summary: &ReportSummary) -> LedgerResult<Vec<u8>>;
}

/// Select the renderer configured in settings
pub fn renderer_for(settings: &Settings) -> Box<dyn ReportRenderer> {
    match settings.report_backend {
        ReportBackend::Text => Box::new(TextReportRenderer::new(settings.report_lines_per_page)),
        ReportBackend::Unavailable => Box::new(UnavailableRenderer),
    }
}

/// Plain-text pages separated by form feeds
#[derive(Debug, Clone)]
pub struct TextReportRenderer {
    lines_per_page: usize,
}

impl TextReportRenderer {
    pub fn new(lines_per_page: usize) -> Self {
        Self {
            lines_per_page: lines_per_page.max(1),
        }
    }

    fn body(&self, summary: &ReportSummary) -> Vec<String> {
        let mut lines = vec![
            format_header("Financial Report", REPORT_WIDTH),
            double_separator(REPORT_WIDTH),
            format!("Period:    {} to {}", summary.start_date, summary.end_date),
            format!(
                "Generated: {}",
                summary.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
            ),
            String::new(),
            "Summary".to_string(),
            separator(REPORT_WIDTH),
            format!("Total Income:    {:>14}", summary.total_income.to_string()),
            format!("Total Expenses:  {:>14}", summary.total_expenses.to_string()),
            format!("Net:             {:>14}", summary.net.to_string()),
            format!("Transactions:    {:>14}", summary.transaction_count),
        ];

        push_table(&mut lines, "Accounts", Some(&summary.accounts));
        push_table(&mut lines, "Transactions", summary.transactions.as_ref());
        push_table(&mut lines, "Budgets", summary.budgets.as_ref());
        push_table(&mut lines, "Subscriptions", summary.subscriptions.as_ref());
        push_table(&mut lines, "Goals", summary.goals.as_ref());

        lines
    }
}

impl ReportRenderer for TextReportRenderer {
    fn render(&self, summary: &ReportSummary) -> LedgerResult<Vec<u8>> {
        let body = self.body(summary);
        let pages: Vec<&[String]> = body.chunks(self.lines_per_page).collect();
        let total = pages.len();

        let document = pages
            .iter()
            .enumerate()
            .map(|(index, lines)| {
                let mut page = format!("Page {} of {}\n\n", index + 1, total);
                for line in lines.iter() {
                    page.push_str(line);
                    page.push('\n');
                }
                page
            })
            .collect::<Vec<_>>()
            .join("\u{000C}");

        Ok(document.into_bytes())
    }
}

/// Backend for hosts without a report renderer
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableRenderer;

impl ReportRenderer for UnavailableRenderer {
    fn render(&self, _summary: &ReportSummary) -> LedgerResult<Vec<u8>> {
        Err(LedgerError::ReportGenerationFailed(
            "no report renderer is available".into(),
        ))
    }
}

fn push_table<T: Tabled>(lines: &mut Vec<String>, title: &str, rows: Option<&Vec<T>>) {
    let Some(rows) = rows else {
        return;
    };

    lines.push(String::new());
    lines.push(title.to_string());
    lines.push(separator(REPORT_WIDTH));

    if rows.is_empty() {
        lines.push("(none)".to_string());
        return;
    }

    let table = Table::new(rows).with(Style::psql()).to_string();
    lines.extend(table.lines().map(str::to_string));
}

/// Format a percentage with appropriate precision
fn format_percentage(pct: f64) -> String {
    if pct < 0.1 && pct > 0.0 {
        format!("{:.2}%", pct)
    } else if pct < 10.0 {
        format!("{:.1}%", pct)
    } else {
        format!("{:.0}%", pct)
    }
}

fn format_header(title: &str, width: usize) -> String {
    let padding = width.saturating_sub(title.len()) / 2;
    format!("{}{}", " ".repeat(padding), title)
}

fn separator(width: usize) -> String {
    "─".repeat(width)
}

fn double_separator(width: usize) -> String {
    "═".repeat(width)
}
