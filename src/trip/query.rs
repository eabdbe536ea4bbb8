//! The query string of the trips page and CSV export.
//!
//! Every parameter is optional and parsed leniently: a blank or malformed
//! value is treated as absent so a hand-edited URL never fails the request.

use serde::{Deserialize, Serialize};

use crate::{
    dates::{format_iso_date, parse_iso_date},
    pagination::PaginationConfig,
    trip::table::{DateRange, Sort, SortDirection, SortKey, TableState, TripFilters},
};

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripsQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub oc: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub driver: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<String>,
    /// The one-based page number shown to the user.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_size: Option<String>,
}

impl TripsQuery {
    pub fn to_table_state(&self, config: &PaginationConfig) -> TableState {
        let page_size = config.page_size_or_default(parse_number(self.page_size.as_deref()));
        let mut state = TableState::new(page_size);

        state.set_filters(TripFilters {
            oc: self.oc.clone().unwrap_or_default(),
            driver_name: non_blank(self.driver.as_deref())
                .unwrap_or_default()
                .to_owned(),
            start_date: DateRange {
                from: self.from.as_deref().and_then(parse_iso_date),
                to: self.to.as_deref().and_then(parse_iso_date),
            },
        });

        let sort_key = self.sort.as_deref().and_then(SortKey::from_query_value);
        let direction = self
            .dir
            .as_deref()
            .and_then(SortDirection::from_query_value)
            .unwrap_or_default();
        state.set_sort(sort_key.map(|key| Sort { key, direction }));

        let page_number = parse_number(self.page.as_deref()).unwrap_or(1);
        state.set_page_index(page_number.saturating_sub(1));

        state
    }

    /// The query that reproduces `state`, leaving out defaults.
    pub fn from_table_state(state: &TableState, config: &PaginationConfig) -> Self {
        let filters = state.filters();
        let sort = state.sort();

        Self {
            oc: (!filters.oc.is_empty()).then(|| filters.oc.clone()),
            driver: (!filters.matches_all_drivers()).then(|| filters.driver_name.clone()),
            from: filters.start_date.from.map(format_iso_date),
            to: filters.start_date.to.map(format_iso_date),
            sort: sort.map(|sort| sort.key.as_query_value().to_owned()),
            dir: sort.map(|sort| sort.direction.as_query_value().to_owned()),
            page: (state.page_index() > 0).then(|| (state.page_index() + 1).to_string()),
            page_size: (state.page_size() != config.default_page_size)
                .then(|| state.page_size().to_string()),
        }
    }

    /// The same query on the page with `page_index`.
    pub fn with_page_index(&self, page_index: usize) -> Self {
        Self {
            page: (page_index > 0).then(|| (page_index + 1).to_string()),
            ..self.clone()
        }
    }

    /// The same query sorted by `key`, flipping the direction if the table is
    /// already sorted by `key`.
    pub fn with_sort_toggled(&self, current: Option<Sort>, key: SortKey) -> Self {
        let direction = match current {
            Some(sort) if sort.key == key => sort.direction.reversed(),
            _ => SortDirection::Ascending,
        };

        Self {
            sort: Some(key.as_query_value().to_owned()),
            dir: Some(direction.as_query_value().to_owned()),
            ..self.clone()
        }
    }

    /// The same filters and sort order without a page.
    pub fn without_page(&self) -> Self {
        Self {
            page: None,
            ..self.clone()
        }
    }

    /// Append this query to `route`.
    pub fn to_url(&self, route: &str) -> String {
        match serde_urlencoded::to_string(self) {
            Ok(query) if query.is_empty() => route.to_owned(),
            Ok(query) => format!("{route}?{query}"),
            Err(error) => {
                tracing::error!("Could not encode trips query {self:?}: {error}");
                route.to_owned()
            }
        }
    }
}

fn non_blank(text: Option<&str>) -> Option<&str> {
    text.map(str::trim).filter(|text| !text.is_empty())
}

fn parse_number(text: Option<&str>) -> Option<usize> {
    non_blank(text)?.parse().ok()
}
