//! The application's route paths.

/// The root route which redirects to the dashboard.
pub const ROOT: &str = "/";
/// The landing page with summary cards, charts, and filters.
pub const DASHBOARD_VIEW: &str = "/dashboard";
/// The page for browsing transactions as a table.
pub const TRANSACTIONS_VIEW: &str = "/transactions";
/// The page to display when an internal server error occurs.
pub const INTERNAL_ERROR_VIEW: &str = "/error";
/// The route for static files.
pub const STATIC: &str = "/static";
