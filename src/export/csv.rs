//! CSV export
//!
//! Each included record type becomes a section: a `# Name` line, a column
//! header and one line per record. Sections are separated by a blank line.

use super::ExportSnapshot;

const TRANSACTION_COLUMNS: &str = "Date,Title,Amount,Type,Category,Account,Notes";
const ACCOUNT_COLUMNS: &str = "Name,Balance,Type,Currency,Created Date";
const BUDGET_COLUMNS: &str = "Name,Limit Amount,Spent Amount,Category,Month,Created Date";
const SUBSCRIPTION_COLUMNS: &str =
    "Name,Amount,Billing Cycle,Next Due Date,Category,Account,Is Active";
const GOAL_COLUMNS: &str = "Name,Target Amount,Current Amount,Target Date,Progress";

/// Render the snapshot as sectioned CSV text
pub fn render(snapshot: &ExportSnapshot) -> String {
    let mut sections = Vec::new();

    if let Some(transactions) = &snapshot.transactions {
        let rows = transactions.iter().map(|txn| {
            vec![
                txn.date.to_string(),
                txn.title.clone(),
                txn.amount.to_decimal_string(),
                txn.kind.to_string(),
                snapshot.category_name(txn.category_id).to_string(),
                snapshot.account_name(Some(txn.account_id)).to_string(),
                txn.notes.clone().unwrap_or_default(),
            ]
        });
        sections.push(section("Transactions", TRANSACTION_COLUMNS, rows));
    }

    if let Some(accounts) = &snapshot.accounts {
        let rows = accounts.iter().map(|account| {
            vec![
                account.name.clone(),
                account.balance.to_decimal_string(),
                account.account_type.to_string(),
                account.currency.clone(),
                account.created_at.date_naive().to_string(),
            ]
        });
        sections.push(section("Accounts", ACCOUNT_COLUMNS, rows));
    }

    if let Some(budgets) = &snapshot.budgets {
        let rows = budgets.iter().map(|budget| {
            vec![
                budget.name.clone(),
                budget.limit_amount.to_decimal_string(),
                budget.spent_amount.to_decimal_string(),
                snapshot.category_name(budget.category_id).to_string(),
                budget.month.format("%Y-%m").to_string(),
                budget.created_at.date_naive().to_string(),
            ]
        });
        sections.push(section("Budgets", BUDGET_COLUMNS, rows));
    }

    if let Some(subscriptions) = &snapshot.subscriptions {
        let rows = subscriptions.iter().map(|sub| {
            vec![
                sub.name.clone(),
                sub.amount.to_decimal_string(),
                sub.billing_cycle.to_string(),
                sub.next_due_date.to_string(),
                snapshot.category_name(sub.category_id).to_string(),
                snapshot.account_name(sub.account_id).to_string(),
                sub.is_active.to_string(),
            ]
        });
        sections.push(section("Subscriptions", SUBSCRIPTION_COLUMNS, rows));
    }

    if let Some(goals) = &snapshot.goals {
        let rows = goals.iter().map(|goal| {
            vec![
                goal.name.clone(),
                goal.target_amount.to_decimal_string(),
                goal.current_amount.to_decimal_string(),
                goal.target_date.map(|d| d.to_string()).unwrap_or_default(),
                format!("{:.0}%", goal.progress() * 100.0),
            ]
        });
        sections.push(section("Goals", GOAL_COLUMNS, rows));
    }

    sections.join("\n")
}

fn section<I>(title: &str, columns: &str, rows: I) -> String
where
    I: Iterator<Item = Vec<String>>,
{
    let mut out = format!("# {}\n{}\n", title, columns);
    for row in rows {
        let line: Vec<String> = row.iter().map(|field| escape_csv(field)).collect();
        out.push_str(&line.join(","));
        out.push('\n');
    }
    out
}

/// Escape a string for CSV format
fn escape_csv(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') || s.contains('\r') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}
