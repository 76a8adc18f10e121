//! Renders the transactions table, its filter form, and pagination controls.

use maud::{Markup, html};
use unicode_segmentation::UnicodeSegmentation;

use crate::{
    endpoints,
    html::{
        FORM_LABEL_STYLE, FORM_SELECT_STYLE, FORM_TEXT_INPUT_STYLE, TABLE_CELL_STYLE,
        TABLE_HEADER_STYLE, TABLE_ROW_STYLE, base, format_currency,
    },
    navigation::NavBar,
    pagination::PaginationIndicator,
    transaction::{Transaction, TransactionKind},
};

use super::query::KindFilter;

/// Long descriptions are cut off to keep rows one line tall; the full text is
/// still available through the cell's title attribute.
const MAX_DESCRIPTION_GRAPHEMES: usize = 48;

/// The active search and kind filter, rendered back into the form and carried
/// through pagination links.
pub(super) struct TableFilters<'a> {
    pub search: &'a str,
    pub kind: KindFilter,
}

pub(super) fn transactions_view(
    nav_bar: NavBar,
    rows: &[Transaction],
    total_count: usize,
    pagination: &[PaginationIndicator],
    filters: &TableFilters,
) -> Markup {
    let nav_bar = nav_bar.into_html();

    let content = html!(
        (nav_bar)

        div
            id="transactions-content"
            class="flex flex-col px-2 lg:px-6 lg:py-8 mx-auto max-w-screen-xl
                text-gray-900 dark:text-white"
        {
            (filter_form(filters))

            p class="mb-2 text-sm text-gray-500 dark:text-gray-400"
            {
                (total_count) " transacciones"
            }

            div class="relative overflow-x-auto shadow-md rounded-lg"
            {
                table class="w-full text-sm text-left text-gray-500 dark:text-gray-400"
                {
                    thead class=(TABLE_HEADER_STYLE)
                    {
                        tr
                        {
                            th scope="col" class=(TABLE_CELL_STYLE) { "Fecha" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Tipo" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Categoría" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Descripción" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Monto" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Responsable" }
                        }
                    }

                    tbody
                    {
                        @if rows.is_empty() {
                            tr class=(TABLE_ROW_STYLE)
                            {
                                td
                                    data-empty-state="true"
                                    colspan="6"
                                    class="px-6 py-8 text-center"
                                {
                                    "No se encontraron transacciones"
                                }
                            }
                        }

                        @for transaction in rows {
                            (table_row(transaction))
                        }
                    }
                }
            }

            (pagination_nav(pagination, filters))
        }
    );

    base("Transacciones", &[], &content)
}

fn table_row(transaction: &Transaction) -> Markup {
    let date = format!(
        "{:02}/{:02}/{:04}",
        transaction.date.day(),
        transaction.date.month() as u8,
        transaction.date.year()
    );

    let (kind_badge_style, amount_style) = match transaction.kind {
        TransactionKind::Expense => (
            "bg-red-100 text-red-800 dark:bg-red-900 dark:text-red-300",
            "text-red-600 dark:text-red-400",
        ),
        TransactionKind::Income => (
            "bg-green-100 text-green-800 dark:bg-green-900 dark:text-green-300",
            "text-green-600 dark:text-green-400",
        ),
    };

    let responsible = if transaction.responsible.is_empty() {
        "-"
    } else {
        &transaction.responsible
    };

    html!(
        tr data-transaction-row="true" class=(TABLE_ROW_STYLE)
        {
            td class=(TABLE_CELL_STYLE) { (date) }

            td class=(TABLE_CELL_STYLE)
            {
                span class={ "text-xs font-medium px-2.5 py-0.5 rounded " (kind_badge_style) }
                {
                    (transaction.kind.as_tag())
                }
            }

            td class=(TABLE_CELL_STYLE) { (transaction.effective_category()) }

            td class=(TABLE_CELL_STYLE) title=(transaction.description)
            {
                (truncate_description(&transaction.description))
            }

            td class={ (TABLE_CELL_STYLE) " font-medium " (amount_style) }
            {
                (format_currency(transaction.amount.abs()))
            }

            td class=(TABLE_CELL_STYLE) { (responsible) }
        }
    )
}

/// The search box and kind select. Submitting drops the page parameter so a
/// new filter always starts back at page one.
fn filter_form(filters: &TableFilters) -> Markup {
    html!(
        form
            id="transaction-filters"
            method="get"
            action=(endpoints::TRANSACTIONS_VIEW)
            class="w-full flex flex-wrap items-end gap-4 mb-4"
        {
            div class="grow max-w-md"
            {
                label for="search" class=(FORM_LABEL_STYLE) { "Buscar" }

                input
                    type="text"
                    name="search"
                    id="search"
                    value=(filters.search)
                    placeholder="Descripción, categoría o responsable"
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            div
            {
                label for="kind" class=(FORM_LABEL_STYLE) { "Tipo" }

                select
                    name="kind"
                    id="kind"
                    class=(FORM_SELECT_STYLE)
                    onchange="this.form.submit()"
                {
                    option value="all" selected[filters.kind == KindFilter::All] { "Todos" }
                    option value="Gasto" selected[filters.kind == KindFilter::Gasto] { "Gastos" }
                    option value="Ingreso" selected[filters.kind == KindFilter::Ingreso] { "Ingresos" }
                }
            }

            button
                type="submit"
                class="px-4 py-2.5 text-sm font-medium text-white rounded
                    bg-blue-700 hover:bg-blue-800 dark:bg-blue-600 dark:hover:bg-blue-700"
            {
                "Filtrar"
            }
        }
    )
}

fn pagination_nav(pagination: &[PaginationIndicator], filters: &TableFilters) -> Markup {
    const BUTTON_STYLE: &str = "flex items-center justify-center px-3 h-8 leading-tight \
        text-gray-500 bg-white border border-gray-300 hover:bg-gray-100 hover:text-gray-700 \
        dark:bg-gray-800 dark:border-gray-700 dark:text-gray-400 \
        dark:hover:bg-gray-700 dark:hover:text-white";
    const CURRENT_STYLE: &str = "flex items-center justify-center px-3 h-8 leading-tight \
        text-blue-600 bg-blue-50 border border-gray-300 \
        dark:bg-gray-700 dark:border-gray-700 dark:text-white";

    html!(
        nav class="pagination mt-4" aria-label="Paginación de transacciones"
        {
            ul class="pagination inline-flex -space-x-px text-sm"
            {
                @for indicator in pagination {
                    li
                    {
                        @match indicator {
                            PaginationIndicator::BackButton(page) => {
                                a href=(page_url(*page, filters)) class=(BUTTON_STYLE)
                                {
                                    "Anterior"
                                }
                            }
                            PaginationIndicator::NextButton(page) => {
                                a href=(page_url(*page, filters)) class=(BUTTON_STYLE)
                                {
                                    "Siguiente"
                                }
                            }
                            PaginationIndicator::Page(page) => {
                                a href=(page_url(*page, filters)) class=(BUTTON_STYLE)
                                {
                                    (page)
                                }
                            }
                            PaginationIndicator::CurrPage(page) => {
                                span aria-current="page" class=(CURRENT_STYLE)
                                {
                                    (page)
                                }
                            }
                            PaginationIndicator::Ellipsis => {
                                span class=(BUTTON_STYLE) { "…" }
                            }
                        }
                    }
                }
            }
        }
    )
}

/// Builds a page link that keeps the active search and kind filter.
fn page_url(page: u64, filters: &TableFilters) -> String {
    let mut params = vec![("page", page.to_string())];

    if !filters.search.is_empty() {
        params.push(("search", filters.search.to_owned()));
    }

    if filters.kind != KindFilter::All {
        params.push(("kind", filters.kind.as_query_value().to_owned()));
    }

    match serde_urlencoded::to_string(&params) {
        Ok(query) => format!("{}?{query}", endpoints::TRANSACTIONS_VIEW),
        Err(error) => {
            tracing::error!("could not encode pagination link for page {page}: {error}");
            endpoints::TRANSACTIONS_VIEW.to_owned()
        }
    }
}

fn truncate_description(description: &str) -> String {
    let mut graphemes = description.graphemes(true);
    let truncated: String = graphemes.by_ref().take(MAX_DESCRIPTION_GRAPHEMES).collect();

    if graphemes.next().is_some() {
        format!("{truncated}…")
    } else {
        truncated
    }
}

#[cfg(test)]
mod tests {
    use crate::pagination::PaginationIndicator;

    use super::{KindFilter, TableFilters, page_url, pagination_nav, truncate_description};

    #[test]
    fn short_descriptions_pass_through_unchanged() {
        assert_eq!(truncate_description("Cena"), "Cena");
    }

    #[test]
    fn long_descriptions_are_cut_at_grapheme_boundaries() {
        let long = "ñ".repeat(60);

        let truncated = truncate_description(&long);

        assert_eq!(truncated, format!("{}…", "ñ".repeat(48)));
    }

    #[test]
    fn page_links_keep_active_filters() {
        let filters = TableFilters {
            search: "comida rápida",
            kind: KindFilter::Gasto,
        };

        let url = page_url(3, &filters);

        assert!(url.starts_with("/transactions?page=3"), "got {url}");
        assert!(url.contains("search=comida+r%C3%A1pida"), "got {url}");
        assert!(url.contains("kind=Gasto"), "got {url}");
    }

    #[test]
    fn page_links_omit_default_filters() {
        let filters = TableFilters {
            search: "",
            kind: KindFilter::All,
        };

        assert_eq!(page_url(2, &filters), "/transactions?page=2");
    }

    #[test]
    fn current_page_is_not_a_link() {
        let filters = TableFilters {
            search: "",
            kind: KindFilter::All,
        };
        let indicators = [
            PaginationIndicator::CurrPage(1),
            PaginationIndicator::Page(2),
            PaginationIndicator::NextButton(2),
        ];

        let markup = pagination_nav(&indicators, &filters).into_string();

        assert!(markup.contains("aria-current=\"page\""), "got {markup}");
        assert!(markup.contains("href=\"/transactions?page=2\""), "got {markup}");
    }
}
