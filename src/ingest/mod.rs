//! Turns a bank-statement export into the in-memory transaction set.
//!
//! The set is built once at startup and never modified afterwards. Any
//! row-level decoding error aborts the whole load; the server would rather
//! refuse to start than show aggregates computed from a partial file.

mod csv;
mod loader;

pub use csv::parse_transactions;
pub use loader::load_transactions;
