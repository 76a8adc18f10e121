//! Gastos is a web dashboard for exploring a bank's CSV transaction export.
//!
//! The server loads a single statement file at startup, normalizes it into an
//! immutable in-memory transaction set, and serves server-rendered HTML pages
//! summarizing the data: totals, breakdowns, trend charts, and a paginated
//! transaction table.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use tokio::signal;

mod app_state;
mod dashboard;
mod endpoints;
mod html;
mod ingest;
mod internal_server_error;
mod navigation;
mod not_found;
mod pagination;
mod routing;
mod stats;
mod transaction;
mod transactions;

pub use app_state::AppState;
pub use ingest::load_transactions;
pub use pagination::PaginationConfig;
pub use routing::build_router;
pub use stats::{BreakdownEntry, DashboardSummary, MonthlySummary, dashboard_summary};
pub use transaction::{Transaction, TransactionKind};

use crate::internal_server_error::InternalServerError;

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The statement file could not be fetched at the transport level.
    ///
    /// Callers should pass the original error as a string alongside the
    /// source path or URL.
    #[error("could not load statement from \"{source_name}\": {reason}")]
    LoadFailure {
        /// The file path or URL that was requested.
        source_name: String,
        /// The underlying transport error, stringified.
        reason: String,
    },

    /// The CSV header row is missing a required column.
    #[error("the statement is missing the required column '{0}'")]
    MissingColumn(&'static str),

    /// A row's date token could not be decoded as `YYYYMMDD`.
    #[error("row {row}: could not parse '{value}' as a YYYYMMDD date")]
    InvalidDate {
        /// One-based data row index (excludes the header).
        row: usize,
        /// The offending date token.
        value: String,
    },

    /// A row's amount or balance was not numeric after stripping separators.
    #[error("row {row}: could not parse '{value}' as a number for column '{column}'")]
    InvalidNumber {
        /// One-based data row index (excludes the header).
        row: usize,
        /// The column the value came from.
        column: &'static str,
        /// The offending text.
        value: String,
    },

    /// A row's title field matched neither recognized transaction type tag.
    #[error("row {row}: unrecognized transaction type '{value}' (expected 'Gasto' or 'Ingreso')")]
    UnknownTransactionType {
        /// One-based data row index (excludes the header).
        row: usize,
        /// The offending tag.
        value: String,
    },

    /// The CSV had structural issues that prevented it from being read.
    #[error("could not read the statement CSV: {0}")]
    InvalidCsv(String),

    /// The requested resource was not found.
    #[error("the requested resource could not be found")]
    NotFound,
}

impl From<csv::Error> for Error {
    fn from(value: csv::Error) -> Self {
        Error::InvalidCsv(value.to_string())
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::NotFound => not_found::get_404_not_found_response(),
            // The load errors only occur at startup, before the router
            // exists. Anything else reaching a handler is unexpected.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                InternalServerError::default().into_response()
            }
        }
    }
}

#[cfg(test)]
mod error_tests {
    use super::Error;

    #[test]
    fn errors_name_the_offending_row_and_value() {
        let error = Error::InvalidDate {
            row: 17,
            value: "2024135".to_owned(),
        };
        let message = error.to_string();

        assert!(message.contains("row 17"), "got: {message}");
        assert!(message.contains("2024135"), "got: {message}");
    }

    #[test]
    fn number_errors_name_the_column() {
        let error = Error::InvalidNumber {
            row: 3,
            column: "Saldo",
            value: "12,3a".to_owned(),
        };
        let message = error.to_string();

        assert!(message.contains("Saldo"), "got: {message}");
        assert!(message.contains("12,3a"), "got: {message}");
    }

    #[test]
    fn unknown_type_error_names_the_expected_tags() {
        let error = Error::UnknownTransactionType {
            row: 5,
            value: "Transferencia".to_owned(),
        };
        let message = error.to_string();

        assert!(message.contains("Gasto"), "got: {message}");
        assert!(message.contains("Ingreso"), "got: {message}");
    }
}
