//! Filtering of the transaction list from query parameters.

use serde::Deserialize;

use crate::transaction::{Transaction, TransactionKind};

/// The income/expense filter for the transactions table.
///
/// The query values mirror the tags shown in the table, so the select box can
/// submit them as-is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub enum KindFilter {
    /// Show every transaction.
    #[default]
    #[serde(rename = "all")]
    All,
    /// Show only expenses.
    Gasto,
    /// Show only income.
    Ingreso,
}

impl KindFilter {
    /// The value this filter submits in the query string.
    pub fn as_query_value(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Gasto => "Gasto",
            Self::Ingreso => "Ingreso",
        }
    }

    fn matches(self, kind: TransactionKind) -> bool {
        match self {
            Self::All => true,
            Self::Gasto => kind == TransactionKind::Expense,
            Self::Ingreso => kind == TransactionKind::Income,
        }
    }
}

/// Applies the search text and kind filter to the full transaction set.
///
/// The search is a case-insensitive substring match over the description,
/// category, and responsible fields. Filtering recomputes over the full set on
/// every request; the set is small enough that caching pages would only add
/// staleness concerns.
pub fn filter_transactions(
    transactions: &[Transaction],
    search: &str,
    kind: KindFilter,
) -> Vec<Transaction> {
    let search = search.to_lowercase();

    transactions
        .iter()
        .filter(|transaction| kind.matches(transaction.kind))
        .filter(|transaction| {
            search.is_empty()
                || transaction.description.to_lowercase().contains(&search)
                || transaction.category.to_lowercase().contains(&search)
                || transaction.responsible.to_lowercase().contains(&search)
        })
        .cloned()
        .collect()
}
