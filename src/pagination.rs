//! This modules defines the common functionality for paging data.
//!
//! Page indexes are zero-based everywhere except in the labels shown to the user.

use maud::{Markup, html};

/// The config for pagination
#[derive(Debug, Clone)]
pub struct PaginationConfig {
    /// The number of rows to display per page when not specified in a request.
    pub default_page_size: usize,
    /// The page sizes offered to the user.
    pub page_size_options: Vec<usize>,
    /// The maximum number of pages to show in the pagination indicator.
    pub max_pages: usize,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_page_size: 10,
            page_size_options: vec![10, 20, 50],
            max_pages: 5,
        }
    }
}

impl PaginationConfig {
    /// Use `requested` if it is one of the offered page sizes, otherwise the default.
    pub fn page_size_or_default(&self, requested: Option<usize>) -> usize {
        match requested {
            Some(size) if self.page_size_options.contains(&size) => size,
            _ => self.default_page_size.max(1),
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum PaginationIndicator {
    Page(usize),
    CurrPage(usize),
    Ellipsis,
    NextButton(usize),
    BackButton(usize),
}

pub fn create_pagination_indicators(
    page_index: usize,
    page_count: usize,
    max_pages: usize,
) -> Vec<PaginationIndicator> {
    if page_count == 0 {
        return Vec::new();
    }

    let page_index = page_index.min(page_count - 1);
    let half_window = max_pages / 2;

    let map_page = |index| {
        if index == page_index {
            PaginationIndicator::CurrPage(index)
        } else {
            PaginationIndicator::Page(index)
        }
    };

    let window = if page_count <= max_pages {
        0..page_count
    } else if page_index < half_window {
        0..max_pages
    } else if page_index >= page_count - half_window {
        (page_count - max_pages)..page_count
    } else {
        (page_index - half_window)..(page_index + half_window + 1)
    };

    let mut indicators: Vec<PaginationIndicator> = window.map(map_page).collect();

    if page_count > max_pages {
        if page_index > half_window {
            indicators.insert(0, PaginationIndicator::Page(0));
            indicators.insert(1, PaginationIndicator::Ellipsis);
        }

        if page_index + half_window + 1 < page_count {
            indicators.push(PaginationIndicator::Ellipsis);
            indicators.push(PaginationIndicator::Page(page_count - 1));
        }
    }

    if page_index > 0 {
        indicators.insert(0, PaginationIndicator::BackButton(page_index - 1));
    }

    if page_index + 1 < page_count {
        indicators.push(PaginationIndicator::NextButton(page_index + 1));
    }

    indicators
}

/// Render the pagination controls, where `page_url` gives the link for a page index.
pub fn pagination_view(
    indicators: &[PaginationIndicator],
    page_url: impl Fn(usize) -> String,
) -> Markup {
    const PAGE_STYLE: &str = "block px-3 py-2 rounded text-gray-700 hover:bg-gray-100 \
        dark:text-gray-300 dark:hover:bg-gray-700";
    const CURRENT_PAGE_STYLE: &str = "block px-3 py-2 rounded font-semibold \
        text-white bg-blue-600 dark:bg-blue-500";

    html! {
        nav aria-label="Paginação" class="flex justify-center w-full mt-4"
        {
            ul class="flex flex-wrap items-center gap-1 text-sm"
            {
                @for indicator in indicators {
                    li {
                        @match indicator {
                            PaginationIndicator::BackButton(index) => {
                                a href=(page_url(*index)) class=(PAGE_STYLE) rel="prev" { "Anterior" }
                            }
                            PaginationIndicator::NextButton(index) => {
                                a href=(page_url(*index)) class=(PAGE_STYLE) rel="next" { "Próximo" }
                            }
                            PaginationIndicator::Page(index) => {
                                a href=(page_url(*index)) class=(PAGE_STYLE) { (index + 1) }
                            }
                            PaginationIndicator::CurrPage(index) => {
                                span class=(CURRENT_PAGE_STYLE) aria-current="page" { (index + 1) }
                            }
                            PaginationIndicator::Ellipsis => {
                                span class="px-2 text-gray-500" { "…" }
                            }
                        }
                    }
                }
            }
        }
    }
}
