//! Dashboard-wide aggregates computed from the transaction set.
//!
//! Everything here is a pure function over `&[Transaction]`; filters on the
//! dashboard recompute from scratch per request.

use std::collections::HashMap;

use crate::transaction::{Transaction, TransactionKind};

/// The grouping label the type breakdown substitutes for a blank category.
pub const UNTYPED_LABEL: &str = "Sin tipo";

/// One bucket of an expense breakdown.
#[derive(Debug, Clone, PartialEq)]
pub struct BreakdownEntry {
    /// The grouping label.
    pub name: String,
    /// The summed absolute amount of the bucket's expenses.
    pub total: f64,
    /// How many expenses fell into the bucket.
    pub count: usize,
}

/// Income, expenses, and net for one `YYYY-MM` month.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlySummary {
    /// The `YYYY-MM` month key.
    pub month: String,
    /// Summed income amounts for the month.
    pub income: f64,
    /// Summed absolute expense amounts for the month.
    pub expenses: f64,
    /// `income - expenses`, kept in step with every contribution.
    pub net: f64,
}

/// The full aggregate bundle the dashboard renders from.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSummary {
    /// Sum of all income amounts.
    pub total_income: f64,
    /// Sum of the absolute amounts of all expenses.
    pub total_expenses: f64,
    /// Sum of all signed amounts. This is derived from the amounts, not read
    /// from the statement's balance column.
    pub current_balance: f64,
    /// How many transactions went into the bundle.
    pub transaction_count: usize,
    /// Expense totals per category, descending by total.
    pub category_breakdown: Vec<BreakdownEntry>,
    /// A second category-keyed expense view with its own fallback label. The
    /// statement's `Tipo` column duplicates the category, so this mirrors the
    /// category breakdown except for blanks.
    pub type_breakdown: Vec<BreakdownEntry>,
    /// Expense totals per responsible party, descending by total.
    pub responsible_breakdown: Vec<BreakdownEntry>,
    /// Per-month income/expense/net, ascending by month key.
    pub monthly_trends: Vec<MonthlySummary>,
}

/// Computes the dashboard aggregate bundle.
///
/// Total over any input: the empty slice yields zeroed totals and empty
/// breakdowns.
pub fn dashboard_summary(transactions: &[Transaction]) -> DashboardSummary {
    let total_income = transactions
        .iter()
        .filter(|transaction| transaction.kind == TransactionKind::Income)
        .map(|transaction| transaction.amount)
        .sum();

    let total_expenses = transactions
        .iter()
        .filter(|transaction| transaction.kind == TransactionKind::Expense)
        .map(|transaction| transaction.amount.abs())
        .sum();

    let current_balance = transactions
        .iter()
        .map(|transaction| transaction.amount)
        .sum();

    DashboardSummary {
        total_income,
        total_expenses,
        current_balance,
        transaction_count: transactions.len(),
        category_breakdown: expense_breakdown(transactions, |transaction| {
            transaction.effective_category()
        }),
        type_breakdown: expense_breakdown(transactions, |transaction| {
            if transaction.category.is_empty() {
                UNTYPED_LABEL
            } else {
                &transaction.category
            }
        }),
        responsible_breakdown: expense_breakdown(transactions, |transaction| {
            transaction.effective_responsible()
        }),
        monthly_trends: monthly_trends(transactions),
    }
}

/// Groups expenses by `label`, summing absolute amounts.
///
/// Buckets come out descending by total; because the sort is stable and
/// buckets are created in encounter order, ties keep first-encounter order.
fn expense_breakdown<'a, F>(transactions: &'a [Transaction], label: F) -> Vec<BreakdownEntry>
where
    F: Fn(&'a Transaction) -> &'a str,
{
    let mut buckets = transactions
        .iter()
        .filter(|transaction| transaction.kind == TransactionKind::Expense)
        .fold(Buckets::default(), |buckets, transaction| {
            buckets.add(label(transaction), transaction.amount.abs())
        });

    buckets
        .entries
        .sort_by(|a, b| b.total.total_cmp(&a.total));
    buckets.entries
}

/// Breakdown accumulator keeping encounter order in `entries` with a name
/// index alongside, so results never depend on hash iteration order.
#[derive(Default)]
struct Buckets {
    entries: Vec<BreakdownEntry>,
    index: HashMap<String, usize>,
}

impl Buckets {
    fn add(mut self, name: &str, amount: f64) -> Self {
        match self.index.get(name) {
            Some(&position) => {
                let entry = &mut self.entries[position];
                entry.total += amount;
                entry.count += 1;
            }
            None => {
                self.index.insert(name.to_owned(), self.entries.len());
                self.entries.push(BreakdownEntry {
                    name: name.to_owned(),
                    total: amount,
                    count: 1,
                });
            }
        }

        self
    }
}

fn monthly_trends(transactions: &[Transaction]) -> Vec<MonthlySummary> {
    let mut months = transactions
        .iter()
        .fold(Months::default(), |months, transaction| {
            months.add(transaction)
        });

    months.entries.sort_by(|a, b| a.month.cmp(&b.month));
    months.entries
}

#[derive(Default)]
struct Months {
    entries: Vec<MonthlySummary>,
    index: HashMap<String, usize>,
}

impl Months {
    fn add(mut self, transaction: &Transaction) -> Self {
        let month = transaction.month_key();
        let position = match self.index.get(&month) {
            Some(&position) => position,
            None => {
                self.index.insert(month.clone(), self.entries.len());
                self.entries.push(MonthlySummary {
                    month,
                    income: 0.0,
                    expenses: 0.0,
                    net: 0.0,
                });
                self.entries.len() - 1
            }
        };

        let entry = &mut self.entries[position];
        match transaction.kind {
            TransactionKind::Income => entry.income += transaction.amount,
            TransactionKind::Expense => entry.expenses += transaction.amount.abs(),
        }
        entry.net = entry.income - entry.expenses;

        self
    }
}

/// Keeps only transactions whose date falls in `year`.
pub fn filter_by_year(transactions: &[Transaction], year: i32) -> Vec<Transaction> {
    transactions
        .iter()
        .filter(|transaction| transaction.date.year() == year)
        .cloned()
        .collect()
}

/// The distinct years present in the set, descending so the most recent year
/// lists first.
pub fn available_years(transactions: &[Transaction]) -> Vec<i32> {
    let mut years: Vec<i32> = transactions
        .iter()
        .map(|transaction| transaction.date.year())
        .collect();
    years.sort_unstable();
    years.dedup();
    years.reverse();
    years
}

/// The distinct `YYYY-MM` keys present in the set, descending.
pub fn available_months(transactions: &[Transaction]) -> Vec<String> {
    let mut months: Vec<String> = transactions
        .iter()
        .map(|transaction| transaction.month_key())
        .collect();
    months.sort_unstable();
    months.dedup();
    months.reverse();
    months
}
