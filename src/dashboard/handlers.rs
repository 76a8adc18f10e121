//! Dashboard HTTP handlers and view rendering.
//!
//! This module contains:
//! - The route handler for displaying the dashboard
//! - HTML view functions for rendering the dashboard UI
//! - State and query types used by the handler

use std::sync::Arc;

use axum::{
    extract::{FromRef, Query, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use serde::Deserialize;

use crate::{
    AppState,
    dashboard::{
        aggregation::filter_by_month,
        cards::summary_cards_view,
        charts::{
            DashboardChart, category_pie_chart, charts_script, daily_expenses_chart,
            monthly_expenses_chart, monthly_income_chart, monthly_trend_chart,
            responsible_pie_chart,
        },
    },
    endpoints,
    html::{FORM_LABEL_STYLE, FORM_SELECT_STYLE, HeadElement, PAGE_CONTAINER_STYLE, base},
    navigation::NavBar,
    stats::{DashboardSummary, available_months, available_years, dashboard_summary, filter_by_year},
    transaction::Transaction,
};

/// The query value that selects every year or month.
const ALL: &str = "all";

/// The state needed for displaying the dashboard page.
#[derive(Debug, Clone)]
pub struct DashboardState {
    /// The full transaction set.
    pub transactions: Arc<Vec<Transaction>>,
}

impl FromRef<AppState> for DashboardState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            transactions: state.transactions.clone(),
        }
    }
}

/// The year and month filters from the query string.
///
/// `year` selects a specific year or "all" and scopes every aggregate on the
/// page; when absent the most recent year is selected. `month` only scopes
/// the daily expenses chart.
#[derive(Debug, Default, Deserialize)]
pub struct DashboardQuery {
    /// A year like "2024", or "all".
    pub year: Option<String>,
    /// A month key like "2024-03", or "all".
    pub month: Option<String>,
}

/// Display a page with an overview of the loaded transactions.
pub async fn get_dashboard_page(
    State(state): State<DashboardState>,
    Query(query): Query<DashboardQuery>,
) -> Response {
    let nav_bar = NavBar::new(endpoints::DASHBOARD_VIEW);

    if state.transactions.is_empty() {
        return dashboard_no_data_view(nav_bar).into_response();
    }

    let years = available_years(&state.transactions);
    let selected_year = query
        .year
        .unwrap_or_else(|| years[0].to_string());

    let transactions: Vec<Transaction> = match selected_year.parse::<i32>() {
        Ok(year) => filter_by_year(&state.transactions, year),
        // Anything that is not a year, including "all", selects everything.
        Err(_) => state.transactions.to_vec(),
    };

    let months = available_months(&transactions);
    let selected_month = query.month.unwrap_or_else(|| ALL.to_owned());
    let daily_transactions = if selected_month == ALL {
        transactions.clone()
    } else {
        filter_by_month(&transactions, &selected_month)
    };

    let summary = dashboard_summary(&transactions);

    let charts = [
        DashboardChart {
            id: "category-chart",
            options: category_pie_chart(&summary.category_breakdown).to_string(),
        },
        DashboardChart {
            id: "responsible-chart",
            options: responsible_pie_chart(&summary.responsible_breakdown).to_string(),
        },
        DashboardChart {
            id: "monthly-expenses-chart",
            options: monthly_expenses_chart(&transactions).to_string(),
        },
        DashboardChart {
            id: "daily-expenses-chart",
            options: daily_expenses_chart(&daily_transactions).to_string(),
        },
        DashboardChart {
            id: "monthly-income-chart",
            options: monthly_income_chart(&transactions).to_string(),
        },
        DashboardChart {
            id: "trend-chart",
            options: monthly_trend_chart(&summary.monthly_trends).to_string(),
        },
    ];

    let filters = FilterOptions {
        years,
        selected_year,
        months,
        selected_month,
    };

    dashboard_view(nav_bar, &summary, &filters, &charts).into_response()
}

/// The select box options and current selections for the filter form.
struct FilterOptions {
    years: Vec<i32>,
    selected_year: String,
    months: Vec<String>,
    selected_month: String,
}

fn dashboard_view(
    nav_bar: NavBar,
    summary: &DashboardSummary,
    filters: &FilterOptions,
    charts: &[DashboardChart],
) -> Markup {
    let nav_bar = nav_bar.into_html();

    let content = html!(
        (nav_bar)

        div
            id="dashboard-content"
            class="flex flex-col items-center px-2 lg:px-6 lg:py-8 mx-auto
                max-w-screen-xl text-gray-900 dark:text-white"
        {
            (filter_form(filters))

            (summary_cards_view(summary))

            section
                id="charts"
                class="w-full mx-auto mb-4"
            {
                div class="grid grid-cols-1 xl:grid-cols-2 gap-4"
                {
                    @for chart in charts {
                        div
                            id=(chart.id)
                            class="min-h-[380px] rounded dark:bg-gray-100"
                        {}
                    }
                }
            }
        }
    );

    let scripts = [
        HeadElement::ScriptLink("/static/echarts.6.0.0.min.js".to_owned()),
        charts_script(charts),
    ];

    base("Dashboard", &scripts, &content)
}

/// The year/month filter form. Each select resubmits the form on change, so
/// the page reloads with the new query parameters.
fn filter_form(filters: &FilterOptions) -> Markup {
    html!(
        form
            id="dashboard-filters"
            method="get"
            action=(endpoints::DASHBOARD_VIEW)
            class="w-full flex flex-wrap items-end gap-4 mb-4"
        {
            div
            {
                label for="year" class=(FORM_LABEL_STYLE) { "Año" }

                select
                    name="year"
                    id="year"
                    class=(FORM_SELECT_STYLE)
                    onchange="this.form.submit()"
                {
                    option value=(ALL) selected[filters.selected_year == ALL] { "Todos" }

                    @for year in &filters.years {
                        option
                            value=(year)
                            selected[filters.selected_year == year.to_string()]
                        {
                            (year)
                        }
                    }
                }
            }

            div
            {
                label for="month" class=(FORM_LABEL_STYLE) { "Mes (tendencia diaria)" }

                select
                    name="month"
                    id="month"
                    class=(FORM_SELECT_STYLE)
                    onchange="this.form.submit()"
                {
                    option value=(ALL) selected[filters.selected_month == ALL] { "Todos" }

                    @for month in &filters.months {
                        option
                            value=(month)
                            selected[&filters.selected_month == month]
                        {
                            (month)
                        }
                    }
                }
            }
        }
    )
}

/// Renders the dashboard page when no transaction data exists.
fn dashboard_no_data_view(nav_bar: NavBar) -> Markup {
    let nav_bar = nav_bar.into_html();

    let content = html!(
        (nav_bar)

        div class=(PAGE_CONTAINER_STYLE)
        {
            h2 class="text-xl font-bold"
            {
                "No hay datos"
            }

            p
            {
                "El archivo de movimientos está vacío, así que no hay nada que graficar."
            }
        }
    );

    base("Dashboard", &[], &content)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::Body,
        extract::{Query, State},
        http::{Response, StatusCode},
    };
    use scraper::{Html, Selector};
    use time::macros::date;

    use crate::transaction::{Transaction, TransactionKind, test_utils::build_transaction};

    use super::{DashboardQuery, DashboardState, get_dashboard_page};

    fn sample_transactions() -> Vec<Transaction> {
        vec![
            build_transaction(
                1000.0,
                date!(2024 - 01 - 05),
                TransactionKind::Income,
                "Sueldo",
                "Ana",
            ),
            build_transaction(
                -200.0,
                date!(2024 - 01 - 10),
                TransactionKind::Expense,
                "Comida",
                "Ana",
            ),
            build_transaction(
                -50.0,
                date!(2023 - 11 - 03),
                TransactionKind::Expense,
                "Comida",
                "Luis",
            ),
        ]
    }

    fn state_with(transactions: Vec<Transaction>) -> DashboardState {
        DashboardState {
            transactions: Arc::new(transactions),
        }
    }

    #[tokio::test]
    async fn dashboard_page_loads_successfully() {
        let response = get_dashboard_page(
            State(state_with(sample_transactions())),
            Query(DashboardQuery::default()),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);

        let html = parse_html(response).await;
        assert_valid_html(&html);

        for chart_id in [
            "category-chart",
            "responsible-chart",
            "monthly-expenses-chart",
            "daily-expenses-chart",
            "monthly-income-chart",
            "trend-chart",
        ] {
            assert_chart_exists(&html, chart_id);
        }
    }

    #[tokio::test]
    async fn defaults_to_the_most_recent_year() {
        let response = get_dashboard_page(
            State(state_with(sample_transactions())),
            Query(DashboardQuery::default()),
        )
        .await;

        let html = parse_html(response).await;

        // Only the 2024 rows: income 1000, expenses 200.
        let text = html.html();
        assert!(text.contains("Bs 1,000.00"), "got {text}");
        assert!(text.contains("Bs 200.00"), "got {text}");
        assert!(!text.contains("Bs 250.00"), "got {text}");
    }

    #[tokio::test]
    async fn year_all_includes_every_transaction() {
        let response = get_dashboard_page(
            State(state_with(sample_transactions())),
            Query(DashboardQuery {
                year: Some("all".to_owned()),
                month: None,
            }),
        )
        .await;

        let html = parse_html(response).await;
        let text = html.html();

        assert!(text.contains("Bs 250.00"), "got {text}");
    }

    #[tokio::test]
    async fn specific_year_scopes_the_totals() {
        let response = get_dashboard_page(
            State(state_with(sample_transactions())),
            Query(DashboardQuery {
                year: Some("2023".to_owned()),
                month: None,
            }),
        )
        .await;

        let html = parse_html(response).await;
        let text = html.html();

        assert!(text.contains("Bs 50.00"), "got {text}");
        assert!(!text.contains("Bs 1,000.00"), "got {text}");
    }

    #[tokio::test]
    async fn displays_prompt_text_on_no_data() {
        let response = get_dashboard_page(
            State(state_with(Vec::new())),
            Query(DashboardQuery::default()),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);

        let html = parse_html(response).await;
        assert_valid_html(&html);
        assert!(html.html().contains("No hay datos"));
    }

    #[tokio::test]
    async fn filter_form_lists_years_and_months() {
        let response = get_dashboard_page(
            State(state_with(sample_transactions())),
            Query(DashboardQuery {
                year: Some("all".to_owned()),
                month: None,
            }),
        )
        .await;

        let html = parse_html(response).await;

        let year_options: Vec<String> = html
            .select(&Selector::parse("select[name='year'] option").unwrap())
            .map(|option| option.text().collect::<String>().trim().to_owned())
            .collect();
        assert_eq!(year_options, vec!["Todos", "2024", "2023"]);

        let month_options: Vec<String> = html
            .select(&Selector::parse("select[name='month'] option").unwrap())
            .map(|option| option.text().collect::<String>().trim().to_owned())
            .collect();
        assert_eq!(month_options, vec!["Todos", "2024-01", "2023-11"]);
    }

    #[test]
    fn query_params_deserialize_from_a_query_string() {
        let query: DashboardQuery = serde_html_form::from_str("year=2024&month=2024-01").unwrap();
        assert_eq!(query.year.as_deref(), Some("2024"));
        assert_eq!(query.month.as_deref(), Some("2024-01"));

        let query: DashboardQuery = serde_html_form::from_str("").unwrap();
        assert!(query.year.is_none());
        assert!(query.month.is_none());
    }

    async fn parse_html(response: Response<Body>) -> Html {
        let body = response.into_body();
        let body = axum::body::to_bytes(body, usize::MAX).await.unwrap();
        let text = String::from_utf8_lossy(&body).to_string();

        Html::parse_document(&text)
    }

    #[track_caller]
    fn assert_valid_html(html: &Html) {
        assert!(
            html.errors.is_empty(),
            "Got HTML parsing errors: {:?}",
            html.errors
        );
    }

    #[track_caller]
    fn assert_chart_exists(html: &Html, chart_id: &str) {
        let selector = Selector::parse(&format!("#{}", chart_id)).unwrap();
        assert!(
            html.select(&selector).next().is_some(),
            "Chart with id '{}' not found",
            chart_id
        );
    }
}
