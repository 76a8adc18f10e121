//! Windowed page indicators for paging through long tables.

/// Controls how the transactions table is split into pages.
#[derive(Debug, Clone)]
pub struct PaginationConfig {
    /// The page shown when the request does not name one.
    pub default_page: u64,
    /// How many rows each page holds.
    pub page_size: u64,
    /// The widest run of numbered indicators to show at once.
    pub max_pages: u64,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_page: 1,
            page_size: 25,
            max_pages: 5,
        }
    }
}

/// One element of the pagination control, in display order.
#[derive(Debug, PartialEq, Eq)]
pub enum PaginationIndicator {
    /// A numbered link to another page.
    Page(u64),
    /// The page being displayed; rendered without a link.
    CurrPage(u64),
    /// A gap between the window and the first or last page.
    Ellipsis,
    /// The "next" control, carrying the page it leads to.
    NextButton(u64),
    /// The "back" control, carrying the page it leads to.
    BackButton(u64),
}

/// Builds the indicator row for `curr_page` out of `page_count` pages.
///
/// At most `max_pages` numbered indicators form a window around the current
/// page. When pages fall outside the window, the first or last page number is
/// kept beyond an ellipsis so both ends stay one click away. Back/next
/// controls appear whenever a previous or following page exists.
pub fn create_pagination_indicators(
    curr_page: u64,
    page_count: u64,
    max_pages: u64,
) -> Vec<PaginationIndicator> {
    let numbered = |page| {
        if page == curr_page {
            PaginationIndicator::CurrPage(page)
        } else {
            PaginationIndicator::Page(page)
        }
    };

    let mut indicators: Vec<PaginationIndicator> = if page_count <= max_pages {
        (1..=page_count).map(numbered).collect()
    } else if curr_page <= (max_pages / 2) {
        (1..=max_pages).map(numbered).collect()
    } else if curr_page > (page_count - max_pages / 2) {
        ((page_count - max_pages + 1)..=page_count)
            .map(numbered)
            .collect()
    } else {
        ((curr_page - max_pages / 2)..=(curr_page + max_pages / 2))
            .map(numbered)
            .collect()
    };

    if page_count > max_pages {
        if curr_page > (max_pages / 2) + 1 {
            indicators.insert(0, PaginationIndicator::Page(1));
            indicators.insert(1, PaginationIndicator::Ellipsis);
        }

        if curr_page < (page_count - max_pages / 2) {
            indicators.push(PaginationIndicator::Ellipsis);
            indicators.push(PaginationIndicator::Page(page_count));
        }
    }

    if curr_page > 1 {
        indicators.insert(0, PaginationIndicator::BackButton(curr_page - 1));
    }

    if curr_page < page_count {
        indicators.push(PaginationIndicator::NextButton(curr_page + 1));
    }

    indicators
}
