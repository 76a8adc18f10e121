//! Transaction data aggregation and transformation for charts.
//!
//! Provides the per-period groupings behind the stacked bar charts: expenses
//! or income per month or day, split by category.

use std::collections::HashMap;

use crate::transaction::{Transaction, TransactionKind};

/// Groups transactions of `kind` by `period_key` and category.
///
/// Returns the sorted period labels for the x-axis and one series per
/// category, sorted by category name, with one entry per period and `None`
/// for periods the category has no transactions in. This is the shape ECharts
/// stacked bar series expect.
pub(super) fn stacked_category_series<F>(
    transactions: &[Transaction],
    kind: TransactionKind,
    period_key: F,
) -> (Vec<String>, Vec<(String, Vec<Option<f64>>)>)
where
    F: Fn(&Transaction) -> String,
{
    let mut totals: HashMap<(String, String), f64> = HashMap::new();
    let mut periods: Vec<String> = Vec::new();
    let mut categories: Vec<String> = Vec::new();

    for transaction in transactions
        .iter()
        .filter(|transaction| transaction.kind == kind)
    {
        let period = period_key(transaction);
        let category = transaction.effective_category().to_owned();

        if !periods.contains(&period) {
            periods.push(period.clone());
        }

        if !categories.contains(&category) {
            categories.push(category.clone());
        }

        *totals.entry((period, category)).or_insert(0.0) += transaction.amount.abs();
    }

    periods.sort();
    categories.sort();

    let series = categories
        .into_iter()
        .map(|category| {
            let values = periods
                .iter()
                .map(|period| totals.get(&(period.clone(), category.clone())).copied())
                .collect();
            (category, values)
        })
        .collect();

    (periods, series)
}

/// Keeps only transactions whose `YYYY-MM` key matches `month`.
pub(super) fn filter_by_month(transactions: &[Transaction], month: &str) -> Vec<Transaction> {
    transactions
        .iter()
        .filter(|transaction| transaction.month_key() == month)
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use crate::transaction::{
        Transaction, TransactionKind, UNCATEGORIZED_LABEL, test_utils::build_transaction,
    };

    use super::{filter_by_month, stacked_category_series};

    fn monthly(transactions: &[Transaction]) -> (Vec<String>, Vec<(String, Vec<Option<f64>>)>) {
        stacked_category_series(transactions, TransactionKind::Expense, Transaction::month_key)
    }

    #[test]
    fn groups_expenses_by_month_and_category() {
        let transactions = vec![
            build_transaction(
                -100.0,
                date!(2024 - 01 - 15),
                TransactionKind::Expense,
                "Comida",
                "",
            ),
            build_transaction(
                -50.0,
                date!(2024 - 01 - 20),
                TransactionKind::Expense,
                "Transporte",
                "",
            ),
            build_transaction(
                -30.0,
                date!(2024 - 02 - 10),
                TransactionKind::Expense,
                "Comida",
                "",
            ),
        ];

        let (periods, series) = monthly(&transactions);

        assert_eq!(periods, vec!["2024-01", "2024-02"]);
        assert_eq!(series.len(), 2);
        assert_eq!(series[0].0, "Comida");
        assert_eq!(series[0].1, vec![Some(100.0), Some(30.0)]);
        assert_eq!(series[1].0, "Transporte");
        assert_eq!(series[1].1, vec![Some(50.0), None]);
    }

    #[test]
    fn income_rows_are_excluded_from_expense_series() {
        let transactions = vec![
            build_transaction(
                -100.0,
                date!(2024 - 01 - 15),
                TransactionKind::Expense,
                "Comida",
                "",
            ),
            build_transaction(
                2000.0,
                date!(2024 - 01 - 05),
                TransactionKind::Income,
                "Sueldo",
                "",
            ),
        ];

        let (_, series) = monthly(&transactions);

        assert_eq!(series.len(), 1);
        assert_eq!(series[0].0, "Comida");
    }

    #[test]
    fn blank_category_is_grouped_under_the_fallback_label() {
        let transactions = vec![build_transaction(
            -100.0,
            date!(2024 - 01 - 15),
            TransactionKind::Expense,
            "",
            "",
        )];

        let (_, series) = monthly(&transactions);

        assert_eq!(series[0].0, UNCATEGORIZED_LABEL);
    }

    #[test]
    fn daily_grouping_uses_full_day_keys() {
        let transactions = vec![
            build_transaction(
                -100.0,
                date!(2024 - 01 - 15),
                TransactionKind::Expense,
                "Comida",
                "",
            ),
            build_transaction(
                -40.0,
                date!(2024 - 01 - 02),
                TransactionKind::Expense,
                "Comida",
                "",
            ),
        ];

        let (periods, _) = stacked_category_series(
            &transactions,
            TransactionKind::Expense,
            Transaction::day_key,
        );

        assert_eq!(periods, vec!["2024-01-02", "2024-01-15"]);
    }

    #[test]
    fn month_filter_keeps_only_the_selected_month() {
        let transactions = vec![
            build_transaction(
                -100.0,
                date!(2024 - 01 - 15),
                TransactionKind::Expense,
                "Comida",
                "",
            ),
            build_transaction(
                -40.0,
                date!(2024 - 02 - 02),
                TransactionKind::Expense,
                "Comida",
                "",
            ),
        ];

        let filtered = filter_by_month(&transactions, "2024-02");

        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].amount, -40.0);
    }
}
