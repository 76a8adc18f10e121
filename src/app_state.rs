//! Implements a struct that holds the state of the server.

use std::sync::Arc;

use crate::{pagination::PaginationConfig, transaction::Transaction};

/// The state of the server.
///
/// The transaction set is loaded once at startup and shared read-only between
/// handlers, so cloning the state only bumps a reference count.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The transaction set, in file order.
    pub transactions: Arc<Vec<Transaction>>,

    /// The config that controls how to display pages of data.
    pub pagination_config: PaginationConfig,
}

impl AppState {
    /// Create a new [AppState] from a loaded transaction set.
    pub fn new(transactions: Vec<Transaction>, pagination_config: PaginationConfig) -> Self {
        Self {
            transactions: Arc::new(transactions),
            pagination_config,
        }
    }
}
