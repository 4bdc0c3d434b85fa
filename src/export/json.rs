//! JSON export
//!
//! Records are flattened into typed export structs with camelCase keys,
//! ISO-8601 dates and plain numeric amounts. Entity references are written
//! as names rather than ids.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::LedgerResult;
use crate::models::{Account, Budget, Goal, Subscription, Transaction, TransactionKind};

use super::{ExportSettings, ExportSnapshot};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// Header describing the export itself
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportInfo {
    pub export_date: DateTime<Utc>,
    pub date_range: DateRange,
    pub app_version: String,
    pub format: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRecord {
    pub id: Uuid,
    pub title: String,
    pub amount: f64,
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub category: Option<String>,
    pub account: String,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountRecord {
    pub id: Uuid,
    pub name: String,
    pub balance: f64,
    #[serde(rename = "type")]
    pub account_type: String,
    pub currency: String,
    pub created_date: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetRecord {
    pub id: Uuid,
    pub name: String,
    pub limit_amount: f64,
    pub spent_amount: f64,
    pub category: Option<String>,
    pub month: NaiveDate,
    pub created_date: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionRecord {
    pub id: Uuid,
    pub name: String,
    pub amount: f64,
    pub billing_cycle: String,
    pub next_due_date: NaiveDate,
    pub category: Option<String>,
    pub account: Option<String>,
    pub is_active: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalRecord {
    pub id: Uuid,
    pub name: String,
    pub target_amount: f64,
    pub current_amount: f64,
    pub target_date: Option<NaiveDate>,
    pub progress: f64,
}

/// Top-level JSON document; sections that were not requested are omitted
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonExport {
    pub export_info: ExportInfo,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transactions: Option<Vec<TransactionRecord>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accounts: Option<Vec<AccountRecord>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budgets: Option<Vec<BudgetRecord>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subscriptions: Option<Vec<SubscriptionRecord>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goals: Option<Vec<GoalRecord>>,
}

fn non_empty(name: &str) -> Option<String> {
    (!name.is_empty()).then(|| name.to_string())
}

impl TransactionRecord {
    fn from_model(txn: &Transaction, snapshot: &ExportSnapshot) -> Self {
        Self {
            id: *txn.id.as_uuid(),
            title: txn.title.clone(),
            amount: txn.amount.to_f64(),
            date: txn.date,
            kind: txn.kind,
            category: non_empty(snapshot.category_name(txn.category_id)),
            account: snapshot.account_name(Some(txn.account_id)).to_string(),
            notes: txn.notes.clone(),
        }
    }
}

impl From<&Account> for AccountRecord {
    fn from(account: &Account) -> Self {
        Self {
            id: *account.id.as_uuid(),
            name: account.name.clone(),
            balance: account.balance.to_f64(),
            account_type: account.account_type.to_string(),
            currency: account.currency.clone(),
            created_date: account.created_at,
        }
    }
}

impl BudgetRecord {
    fn from_model(budget: &Budget, snapshot: &ExportSnapshot) -> Self {
        Self {
            id: *budget.id.as_uuid(),
            name: budget.name.clone(),
            limit_amount: budget.limit_amount.to_f64(),
            spent_amount: budget.spent_amount.to_f64(),
            category: non_empty(snapshot.category_name(budget.category_id)),
            month: budget.month,
            created_date: budget.created_at,
        }
    }
}

impl SubscriptionRecord {
    fn from_model(sub: &Subscription, snapshot: &ExportSnapshot) -> Self {
        Self {
            id: *sub.id.as_uuid(),
            name: sub.name.clone(),
            amount: sub.amount.to_f64(),
            billing_cycle: sub.billing_cycle.to_string(),
            next_due_date: sub.next_due_date,
            category: non_empty(snapshot.category_name(sub.category_id)),
            account: non_empty(snapshot.account_name(sub.account_id)),
            is_active: sub.is_active,
        }
    }
}

impl From<&Goal> for GoalRecord {
    fn from(goal: &Goal) -> Self {
        Self {
            id: *goal.id.as_uuid(),
            name: goal.name.clone(),
            target_amount: goal.target_amount.to_f64(),
            current_amount: goal.current_amount.to_f64(),
            target_date: goal.target_date,
            progress: goal.progress(),
        }
    }
}

impl JsonExport {
    pub fn build(
        snapshot: &ExportSnapshot,
        settings: &ExportSettings,
        exported_at: DateTime<Utc>,
    ) -> Self {
        Self {
            export_info: ExportInfo {
                export_date: exported_at,
                date_range: DateRange {
                    start: settings.start_date,
                    end: settings.end_date,
                },
                app_version: env!("CARGO_PKG_VERSION").to_string(),
                format: "json".to_string(),
            },
            transactions: snapshot.transactions.as_ref().map(|txns| {
                txns.iter()
                    .map(|t| TransactionRecord::from_model(t, snapshot))
                    .collect()
            }),
            accounts: snapshot
                .accounts
                .as_ref()
                .map(|accounts| accounts.iter().map(AccountRecord::from).collect()),
            budgets: snapshot.budgets.as_ref().map(|budgets| {
                budgets
                    .iter()
                    .map(|b| BudgetRecord::from_model(b, snapshot))
                    .collect()
            }),
            subscriptions: snapshot.subscriptions.as_ref().map(|subs| {
                subs.iter()
                    .map(|s| SubscriptionRecord::from_model(s, snapshot))
                    .collect()
            }),
            goals: snapshot
                .goals
                .as_ref()
                .map(|goals| goals.iter().map(GoalRecord::from).collect()),
        }
    }
}

/// Render the snapshot as a pretty-printed JSON document
pub fn render(
    snapshot: &ExportSnapshot,
    settings: &ExportSettings,
    exported_at: DateTime<Utc>,
) -> LedgerResult<Vec<u8>> {
    let export = JsonExport::build(snapshot, settings, exported_at);
    Ok(serde_json::to_vec_pretty(&export)?)
}
