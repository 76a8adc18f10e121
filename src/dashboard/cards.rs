//! Summary card components for the dashboard header.

use maud::{Markup, html};

use crate::{html::format_currency, stats::DashboardSummary};

struct SummaryCard {
    title: &'static str,
    value: String,
    /// Border accent, e.g. "border-green-500".
    accent: &'static str,
}

/// Renders the four headline cards: income, expenses, balance, and count.
pub(super) fn summary_cards_view(summary: &DashboardSummary) -> Markup {
    let cards = [
        SummaryCard {
            title: "Total Ingresos",
            value: format_currency(summary.total_income),
            accent: "border-green-500",
        },
        SummaryCard {
            title: "Total Gastos",
            value: format_currency(summary.total_expenses),
            accent: "border-red-500",
        },
        SummaryCard {
            title: "Saldo Actual",
            value: format_currency(summary.current_balance),
            accent: "border-blue-500",
        },
        SummaryCard {
            title: "Transacciones",
            value: summary.transaction_count.to_string(),
            accent: "border-orange-500",
        },
    ];

    html! {
        section
            id="summary-cards"
            class="w-full mx-auto mb-4"
        {
            div class="grid grid-cols-1 sm:grid-cols-2 xl:grid-cols-4 gap-4"
            {
                @for card in &cards {
                    div
                        class={"bg-white dark:bg-gray-800 border-l-4 " (card.accent) "
                            rounded-lg p-4 shadow-md"}
                    {
                        h3 class="text-sm font-medium text-gray-600 dark:text-gray-400 mb-2"
                        {
                            (card.title)
                        }

                        div class="text-3xl font-bold" { (card.value) }
                    }
                }
            }
        }
    }
}
