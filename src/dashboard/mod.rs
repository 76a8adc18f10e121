//! Dashboard module
//!
//! Provides the landing page showing summary cards, charts, and the year and
//! month filters.

mod aggregation;
mod cards;
mod charts;
mod handlers;

pub use handlers::get_dashboard_page;
