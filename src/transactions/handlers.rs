//! The route handler for the transactions table page.

use std::sync::Arc;

use axum::{
    extract::{FromRef, Query, State},
    response::{IntoResponse, Response},
};
use serde::Deserialize;

use crate::{
    AppState, endpoints,
    navigation::NavBar,
    pagination::{PaginationConfig, create_pagination_indicators},
    transaction::Transaction,
};

use super::{
    query::{KindFilter, filter_transactions},
    view::{TableFilters, transactions_view},
};

/// The state needed for the transactions page.
#[derive(Debug, Clone)]
pub struct TransactionsViewState {
    /// The full transaction set.
    pub transactions: Arc<Vec<Transaction>>,
    /// Configuration for pagination controls.
    pub pagination_config: PaginationConfig,
}

impl FromRef<AppState> for TransactionsViewState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            transactions: state.transactions.clone(),
            pagination_config: state.pagination_config.clone(),
        }
    }
}

/// Controls filtering and pagination of the transactions table.
#[derive(Debug, Default, Deserialize)]
pub struct TransactionsQuery {
    /// The page number to display. Starts from 1.
    pub page: Option<u64>,
    /// Case-insensitive search over description, category, and responsible.
    pub search: Option<String>,
    /// Restricts the table to expenses or income.
    pub kind: Option<KindFilter>,
}

/// Render the filterable, paginated table of transactions.
pub async fn get_transactions_page(
    State(state): State<TransactionsViewState>,
    Query(query): Query<TransactionsQuery>,
) -> Response {
    let nav_bar = NavBar::new(endpoints::TRANSACTIONS_VIEW);

    let search = query.search.unwrap_or_default();
    let kind = query.kind.unwrap_or_default();
    let filtered = filter_transactions(&state.transactions, &search, kind);

    let page_size = state.pagination_config.page_size;
    let page_count = (filtered.len() as u64).div_ceil(page_size).max(1);
    // Out-of-range page numbers clamp instead of 404ing.
    let current_page = query
        .page
        .unwrap_or(state.pagination_config.default_page)
        .clamp(1, page_count);

    let start = ((current_page - 1) * page_size) as usize;
    let end = (start + page_size as usize).min(filtered.len());
    let rows = &filtered[start..end];

    let pagination =
        create_pagination_indicators(current_page, page_count, state.pagination_config.max_pages);

    let filters = TableFilters {
        search: &search,
        kind,
    };

    transactions_view(nav_bar, rows, filtered.len(), &pagination, &filters).into_response()
}
