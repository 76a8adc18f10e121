//! The paginated, filterable transactions table page.

mod handlers;
mod query;
mod view;

pub use handlers::get_transactions_page;
