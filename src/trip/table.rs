//! The engine behind the trips table: filtering, sorting and paging trip rows.
//!
//! [run_table] applies a [TableState] to a list of [TripRow]s. Filtering keeps
//! the input order, sorting is stable, and the requested page index is clamped
//! to the pages that exist.

use std::cmp::Ordering;

use time::Date;

use crate::trip::TripRow;

/// The value of the driver filter that matches every driver.
pub const ALL_DRIVERS: &str = "all";

/// The columns the trips table can be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Oc,
    Driver,
    Product,
    StartDate,
    Status,
    EstimatedKm,
}

impl SortKey {
    pub const ALL: [SortKey; 6] = [
        SortKey::Oc,
        SortKey::Driver,
        SortKey::Product,
        SortKey::StartDate,
        SortKey::Status,
        SortKey::EstimatedKm,
    ];

    pub fn as_query_value(self) -> &'static str {
        match self {
            SortKey::Oc => "oc",
            SortKey::Driver => "driver",
            SortKey::Product => "product",
            SortKey::StartDate => "start_date",
            SortKey::Status => "status",
            SortKey::EstimatedKm => "estimated_km",
        }
    }

    pub fn from_query_value(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|key| key.as_query_value() == value)
    }

    fn compare(self, a: &TripRow<'_>, b: &TripRow<'_>) -> Ordering {
        match self {
            SortKey::Oc => compare_text(&a.trip.oc, &b.trip.oc),
            SortKey::Driver => compare_text(a.driver_name, b.driver_name),
            SortKey::Product => compare_text(a.trip.product.as_str(), b.trip.product.as_str()),
            SortKey::StartDate => a.trip.start_date.cmp(&b.trip.start_date),
            SortKey::Status => compare_text(a.trip.status.label(), b.trip.status.label()),
            SortKey::EstimatedKm => a.trip.estimated_km.total_cmp(&b.trip.estimated_km),
        }
    }
}

/// Order text the way people read it: case and accents are ignored, and runs
/// of digits compare by their numeric value, so "OC-9" comes before "OC-10".
fn compare_text(a: &str, b: &str) -> Ordering {
    let a = fold_text(a);
    let b = fold_text(b);
    let (mut i, mut j) = (0, 0);

    while i < a.len() && j < b.len() {
        if a[i].is_ascii_digit() && b[j].is_ascii_digit() {
            let a_digits = digit_run(&a, &mut i);
            let b_digits = digit_run(&b, &mut j);

            let ordering = a_digits
                .len()
                .cmp(&b_digits.len())
                .then_with(|| a_digits.cmp(b_digits));
            if ordering.is_ne() {
                return ordering;
            }
        } else {
            let ordering = a[i].cmp(&b[j]);
            if ordering.is_ne() {
                return ordering;
            }
            i += 1;
            j += 1;
        }
    }

    (a.len() - i).cmp(&(b.len() - j))
}

/// The digits starting at `start` without leading zeros. Moves `start` past the run.
fn digit_run<'a>(text: &'a [char], start: &mut usize) -> &'a [char] {
    let begin = *start;
    while *start < text.len() && text[*start].is_ascii_digit() {
        *start += 1;
    }

    let run = &text[begin..*start];
    let zeros = run.iter().take_while(|&&digit| digit == '0').count();
    &run[zeros..]
}

fn fold_text(text: &str) -> Vec<char> {
    text.chars()
        .flat_map(char::to_lowercase)
        .map(|c| match c {
            'á' | 'à' | 'â' | 'ã' | 'ä' => 'a',
            'é' | 'è' | 'ê' | 'ë' => 'e',
            'í' | 'ì' | 'î' | 'ï' => 'i',
            'ó' | 'ò' | 'ô' | 'õ' | 'ö' => 'o',
            'ú' | 'ù' | 'û' | 'ü' => 'u',
            'ç' => 'c',
            c => c,
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn as_query_value(self) -> &'static str {
        match self {
            SortDirection::Ascending => "asc",
            SortDirection::Descending => "desc",
        }
    }

    pub fn from_query_value(value: &str) -> Option<Self> {
        match value {
            "asc" => Some(SortDirection::Ascending),
            "desc" => Some(SortDirection::Descending),
            _ => None,
        }
    }

    pub fn reversed(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sort {
    pub key: SortKey,
    pub direction: SortDirection,
}

/// An inclusive range of start dates. A missing bound leaves that side open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DateRange {
    pub from: Option<Date>,
    pub to: Option<Date>,
}

impl DateRange {
    pub fn contains(&self, date: Date) -> bool {
        self.from.is_none_or(|from| date >= from) && self.to.is_none_or(|to| date <= to)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TripFilters {
    /// Case-insensitive substring of the load order code. Empty matches everything.
    pub oc: String,
    /// The exact name of the driver, or empty/[ALL_DRIVERS] to match everything.
    pub driver_name: String,
    pub start_date: DateRange,
}

impl TripFilters {
    pub fn matches(&self, row: &TripRow<'_>) -> bool {
        self.matches_oc(row)
            && self.matches_driver(row)
            && self.start_date.contains(row.trip.start_date)
    }

    fn matches_oc(&self, row: &TripRow<'_>) -> bool {
        self.oc.is_empty() || row.trip.oc.to_lowercase().contains(&self.oc.to_lowercase())
    }

    fn matches_driver(&self, row: &TripRow<'_>) -> bool {
        self.matches_all_drivers() || row.driver_name == self.driver_name
    }

    pub fn matches_all_drivers(&self) -> bool {
        self.driver_name.is_empty() || self.driver_name == ALL_DRIVERS
    }
}

/// The filters, sort order and page the user has chosen for the trips table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableState {
    filters: TripFilters,
    sort: Option<Sort>,
    page_size: usize,
    page_index: usize,
}

impl TableState {
    /// A table on the first page with no filters or sorting.
    ///
    /// A page size of zero is treated as one.
    pub fn new(page_size: usize) -> Self {
        Self {
            filters: TripFilters::default(),
            sort: None,
            page_size: page_size.max(1),
            page_index: 0,
        }
    }

    pub fn filters(&self) -> &TripFilters {
        &self.filters
    }

    pub fn sort(&self) -> Option<Sort> {
        self.sort
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn page_index(&self) -> usize {
        self.page_index
    }

    pub fn set_filters(&mut self, filters: TripFilters) {
        self.filters = filters;
        self.page_index = 0;
    }

    pub fn set_oc_filter(&mut self, oc: impl Into<String>) {
        self.filters.oc = oc.into();
        self.page_index = 0;
    }

    pub fn set_driver_filter(&mut self, driver_name: impl Into<String>) {
        self.filters.driver_name = driver_name.into();
        self.page_index = 0;
    }

    pub fn set_date_range(&mut self, range: DateRange) {
        self.filters.start_date = range;
        self.page_index = 0;
    }

    /// Change the number of rows per page and go back to the first page.
    pub fn set_page_size(&mut self, page_size: usize) {
        self.page_size = page_size.max(1);
        self.page_index = 0;
    }

    /// Sorting keeps the current page index.
    pub fn set_sort(&mut self, sort: Option<Sort>) {
        self.sort = sort;
    }

    pub fn set_page_index(&mut self, page_index: usize) {
        self.page_index = page_index;
    }
}

/// One page of rows plus what is needed to render the pagination controls.
#[derive(Debug, Clone, PartialEq)]
pub struct TablePage<'a> {
    pub rows: Vec<TripRow<'a>>,
    /// The page index after clamping.
    pub page_index: usize,
    pub page_count: usize,
    /// The number of rows that passed the filters, across every page.
    pub total_rows: usize,
}

/// The result of running the table engine.
#[derive(Debug, Clone, PartialEq)]
pub struct TableView<'a> {
    /// Every row that passed the filters, in input order.
    pub filtered: Vec<TripRow<'a>>,
    pub page: TablePage<'a>,
}

/// Keep the rows that match `filters`, in their original order.
pub fn filter_rows<'a>(rows: &[TripRow<'a>], filters: &TripFilters) -> Vec<TripRow<'a>> {
    rows.iter().filter(|row| filters.matches(row)).copied().collect()
}

/// Stable sort: rows that compare equal keep their relative order in both directions.
pub fn sort_rows(rows: &mut [TripRow<'_>], sort: Sort) {
    rows.sort_by(|a, b| {
        let ordering = sort.key.compare(a, b);

        match sort.direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    });
}

/// Slice out one page, clamping `page_index` to the last page.
pub fn paginate<'a>(rows: &[TripRow<'a>], page_size: usize, page_index: usize) -> TablePage<'a> {
    let page_size = page_size.max(1);
    let page_count = rows.len().div_ceil(page_size);
    let page_index = page_index.min(page_count.saturating_sub(1));
    let start = page_index * page_size;
    let end = (start + page_size).min(rows.len());

    TablePage {
        rows: rows[start..end].to_vec(),
        page_index,
        page_count,
        total_rows: rows.len(),
    }
}

pub fn run_table<'a>(rows: &[TripRow<'a>], state: &TableState) -> TableView<'a> {
    let filtered = filter_rows(rows, &state.filters);

    let mut sorted = filtered.clone();
    if let Some(sort) = state.sort {
        sort_rows(&mut sorted, sort);
    }

    let page = paginate(&sorted, state.page_size, state.page_index);

    TableView { filtered, page }
}
