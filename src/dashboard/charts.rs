//! Chart generation and rendering for the dashboard.
//!
//! Each chart is generated as JSON configuration for the ECharts library and
//! rendered into an HTML container by JavaScript initialization code emitted
//! into the page head.

use charming::{
    Chart,
    component::{Axis, Grid, Legend, Title},
    element::{
        AxisLabel, AxisPointer, AxisPointerType, AxisType, Emphasis, EmphasisFocus, JsFunction,
        Tooltip, Trigger,
    },
    series::{Line, Pie, bar},
};
use maud::PreEscaped;

use crate::{
    dashboard::aggregation::stacked_category_series,
    html::HeadElement,
    stats::{BreakdownEntry, MonthlySummary},
    transaction::{Transaction, TransactionKind},
};

/// A dashboard chart with its HTML container ID and ECharts configuration.
pub(super) struct DashboardChart {
    /// The HTML element ID to use for the chart (kebab-case)
    pub id: &'static str,
    /// The ECharts configuration as a JSON string
    pub options: String,
}

/// Generates JavaScript initialization code for dashboard charts.
///
/// Creates scripts that initialize ECharts instances with dark mode support
/// and responsive resizing.
pub(super) fn charts_script(charts: &[DashboardChart]) -> HeadElement {
    let script_content = charts
        .iter()
        .map(|chart| {
            format!(
                r#"(function() {{
                    const chartDom = document.getElementById("{}");
                    const chart = echarts.init(chartDom);
                    const option = {};
                    chart.setOption(option);

                    window.addEventListener('resize', chart.resize);

                    const darkModeMediaQuery = window.matchMedia('(prefers-color-scheme: dark)');
                    const updateTheme = () => {{
                        const isDarkMode = darkModeMediaQuery.matches;
                        chart.setTheme(isDarkMode ? 'dark' : 'default');
                    }}
                    darkModeMediaQuery.addEventListener('change', updateTheme);
                    updateTheme();
                }})();"#,
                chart.id, chart.options
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    let wrapped_script = format!(
        "document.addEventListener('DOMContentLoaded', function() {{\n{}\n}});",
        script_content
    );

    HeadElement::ScriptSource(PreEscaped(wrapped_script))
}

/// Expense totals per category as a pie chart.
pub(super) fn category_pie_chart(breakdown: &[BreakdownEntry]) -> Chart {
    pie_chart("Gastos por Categoría", breakdown)
}

/// Expense totals per responsible party as a pie chart.
pub(super) fn responsible_pie_chart(breakdown: &[BreakdownEntry]) -> Chart {
    pie_chart("Gastos por Responsable", breakdown)
}

fn pie_chart(title: &str, breakdown: &[BreakdownEntry]) -> Chart {
    let data: Vec<(f64, String)> = breakdown
        .iter()
        .map(|entry| (entry.total, entry.name.clone()))
        .collect();

    Chart::new()
        .title(Title::new().text(title))
        .tooltip(
            Tooltip::new()
                .trigger(Trigger::Item)
                .value_formatter(currency_formatter()),
        )
        .legend(Legend::new().left("center").top("bottom"))
        .series(Pie::new().radius("55%").data(data))
}

/// Monthly expense totals stacked by category.
pub(super) fn monthly_expenses_chart(transactions: &[Transaction]) -> Chart {
    stacked_bar_chart(
        "Gastos por Categoría - Tendencia Mensual",
        "Expenses",
        stacked_category_series(transactions, TransactionKind::Expense, Transaction::month_key),
    )
}

/// Daily expense totals stacked by category.
///
/// The caller filters the transactions down to the selected month first.
pub(super) fn daily_expenses_chart(transactions: &[Transaction]) -> Chart {
    stacked_bar_chart(
        "Gastos por Categoría - Tendencia Diaria",
        "Expenses",
        stacked_category_series(transactions, TransactionKind::Expense, Transaction::day_key),
    )
}

/// Monthly income totals stacked by category.
pub(super) fn monthly_income_chart(transactions: &[Transaction]) -> Chart {
    stacked_bar_chart(
        "Ingresos por Categoría - Tendencia Mensual",
        "Income",
        stacked_category_series(transactions, TransactionKind::Income, Transaction::month_key),
    )
}

fn stacked_bar_chart(
    title: &str,
    stack: &str,
    (labels, series_data): (Vec<String>, Vec<(String, Vec<Option<f64>>)>),
) -> Chart {
    let mut chart = Chart::new()
        .title(Title::new().text(title).left(20).top("1%"))
        .tooltip(currency_tooltip())
        .legend(Legend::new().left(250).top("1%"))
        .grid(
            Grid::new()
                .left("3%")
                .right("4%")
                .bottom("3%")
                .top(90)
                .contain_label(true),
        )
        .x_axis(Axis::new().type_(AxisType::Category).data(labels))
        .y_axis(
            Axis::new()
                .type_(AxisType::Value)
                .axis_label(AxisLabel::new().formatter(currency_formatter())),
        );

    for (category, data) in series_data {
        chart = chart.series(
            bar::Bar::new()
                .name(category)
                .stack(stack)
                .emphasis(Emphasis::new().focus(EmphasisFocus::Series))
                .data(data),
        );
    }

    chart
}

/// Income, expense, and net lines per month.
pub(super) fn monthly_trend_chart(trends: &[MonthlySummary]) -> Chart {
    let labels: Vec<String> = trends.iter().map(|entry| entry.month.clone()).collect();
    let income: Vec<f64> = trends.iter().map(|entry| entry.income).collect();
    let expenses: Vec<f64> = trends.iter().map(|entry| entry.expenses).collect();
    let net: Vec<f64> = trends.iter().map(|entry| entry.net).collect();

    Chart::new()
        .title(Title::new().text("Tendencia Mensual"))
        .tooltip(currency_tooltip())
        .legend(Legend::new().left(250).top("1%"))
        .grid(
            Grid::new()
                .left("3%")
                .right("4%")
                .bottom("3%")
                .contain_label(true),
        )
        .x_axis(Axis::new().type_(AxisType::Category).data(labels))
        .y_axis(
            Axis::new()
                .type_(AxisType::Value)
                .axis_label(AxisLabel::new().formatter(currency_formatter())),
        )
        .series(Line::new().name("Ingresos").data(income))
        .series(Line::new().name("Gastos").data(expenses))
        .series(Line::new().name("Neto").data(net))
}

#[inline]
fn currency_formatter() -> JsFunction {
    JsFunction::new_with_args(
        "number",
        "const currencyFormatter = new Intl.NumberFormat('es-BO', {
              style: 'currency',
              currency: 'BOB',
              minimumFractionDigits: 2
            });
            return (number) ? currencyFormatter.format(number) : \"-\";",
    )
}

/// Creates a tooltip configuration for currency values
fn currency_tooltip() -> Tooltip {
    Tooltip::new()
        .trigger(Trigger::Axis)
        .value_formatter(currency_formatter())
        .axis_pointer(AxisPointer::new().type_(AxisPointerType::Shadow))
}
