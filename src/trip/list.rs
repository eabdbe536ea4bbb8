//! The trips page: a filterable, sortable and paged table of every trip.

use axum::{
    extract::{FromRef, Query, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

use crate::{
    AppState, Error, endpoints,
    dates::{format_display_date, format_iso_date},
    html::{
        BADGE_BLUE_STYLE, BADGE_GRAY_STYLE, BADGE_GREEN_STYLE, BADGE_RED_STYLE,
        BUTTON_SECONDARY_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, LINK_STYLE,
        PAGE_CONTAINER_STYLE, TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE, badge, base,
        format_km, page_header,
    },
    navigation::NavBar,
    pagination::{PaginationConfig, create_pagination_indicators, pagination_view},
    store::{SharedStore, lock_store},
    trip::{
        TripRow, TripStatus, derive_trip_rows,
        query::TripsQuery,
        table::{ALL_DRIVERS, Sort, SortDirection, SortKey, TablePage, TableState, run_table},
    },
};

/// The state needed for the trips page and CSV export.
#[derive(Debug, Clone)]
pub struct TripsState {
    pub store: SharedStore,
    pub local_timezone: String,
    pub pagination_config: PaginationConfig,
}

impl FromRef<AppState> for TripsState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            store: state.store.clone(),
            local_timezone: state.local_timezone.clone(),
            pagination_config: state.pagination_config.clone(),
        }
    }
}

pub async fn get_trips_page(
    State(state): State<TripsState>,
    Query(query): Query<TripsQuery>,
) -> Result<Response, Error> {
    let config = &state.pagination_config;
    let table_state = query.to_table_state(config);

    let store = lock_store(&state.store)?;
    let rows = derive_trip_rows(store.trips(), store.drivers());
    let view = run_table(&rows, &table_state);
    let driver_names: Vec<&str> = store
        .drivers()
        .iter()
        .map(|driver| driver.name.as_str())
        .collect();

    let mut table_state = table_state;
    table_state.set_page_index(view.page.page_index);
    let canonical_query = TripsQuery::from_table_state(&table_state, config);

    Ok(trips_view(
        &view.page,
        &table_state,
        &canonical_query,
        &driver_names,
        config,
    )
    .into_response())
}

fn trips_view(
    page: &TablePage<'_>,
    table_state: &TableState,
    query: &TripsQuery,
    driver_names: &[&str],
    config: &PaginationConfig,
) -> Markup {
    let nav_bar = NavBar::new(endpoints::TRIPS_VIEW).into_html();
    let indicators =
        create_pagination_indicators(page.page_index, page.page_count, config.max_pages);
    let export_url = query.without_page().to_url(endpoints::TRIPS_EXPORT);
    let new_trip_link = html! {
        a href=(endpoints::NEW_TRIP_VIEW) class=(BUTTON_SECONDARY_STYLE) { "Nova Viagem" }
    };
    let sorting = TableSorting {
        query,
        current: table_state.sort(),
    };

    let content = html! {
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            section class="w-full max-w-6xl"
            {
                (page_header("Gerenciamento de Viagens", Some(new_trip_link)))

                (filters_view(table_state, driver_names, config))

                div class="flex flex-wrap items-center justify-between gap-2 my-4"
                {
                    p class="text-sm text-gray-600 dark:text-gray-400" data-total-rows=(page.total_rows)
                    {
                        (page.total_rows) " viagens encontradas"
                    }

                    a href=(export_url) class=(LINK_STYLE) download { "Exportar CSV" }
                }

                (trips_table(&page.rows, Some(&sorting)))

                (pagination_view(&indicators, |page_index| {
                    query.with_page_index(page_index).to_url(endpoints::TRIPS_VIEW)
                }))
            }
        }
    };

    base("Viagens", &[], &content)
}

fn filters_view(
    table_state: &TableState,
    driver_names: &[&str],
    config: &PaginationConfig,
) -> Markup {
    let filters = table_state.filters();
    let from = filters.start_date.from.map(format_iso_date);
    let to = filters.start_date.to.map(format_iso_date);
    let sort = table_state.sort();

    html! {
        form
            method="get"
            action=(endpoints::TRIPS_VIEW)
            id="trip-filters"
            class="grid gap-4 sm:grid-cols-2 lg:grid-cols-6 items-end"
        {
            div class="lg:col-span-2"
            {
                label for="oc" class=(FORM_LABEL_STYLE) { "OC" }
                input
                    type="search"
                    name="oc"
                    id="oc"
                    placeholder="Filtrar por OC..."
                    value=(filters.oc)
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            div
            {
                label for="driver" class=(FORM_LABEL_STYLE) { "Motorista" }
                select name="driver" id="driver" class=(FORM_TEXT_INPUT_STYLE)
                {
                    option value=(ALL_DRIVERS) selected[filters.matches_all_drivers()]
                    {
                        "Todos os Motoristas"
                    }

                    @for name in driver_names {
                        option value=(name) selected[filters.driver_name == *name] { (name) }
                    }
                }
            }

            div
            {
                label for="from" class=(FORM_LABEL_STYLE) { "Início a partir de" }
                input
                    type="date"
                    name="from"
                    id="from"
                    value=[from]
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            div
            {
                label for="to" class=(FORM_LABEL_STYLE) { "Início até" }
                input
                    type="date"
                    name="to"
                    id="to"
                    value=[to]
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            div
            {
                label for="page_size" class=(FORM_LABEL_STYLE) { "Por página" }
                select name="page_size" id="page_size" class=(FORM_TEXT_INPUT_STYLE)
                {
                    @for size in &config.page_size_options {
                        option value=(size) selected[*size == table_state.page_size()] { (size) }
                    }
                }
            }

            @if let Some(sort) = sort {
                input type="hidden" name="sort" value=(sort.key.as_query_value());
                input type="hidden" name="dir" value=(sort.direction.as_query_value());
            }

            div class="flex gap-2 lg:col-span-6"
            {
                button type="submit" class=(BUTTON_SECONDARY_STYLE) { "Filtrar" }
                a href=(endpoints::TRIPS_VIEW) class=(BUTTON_SECONDARY_STYLE) { "Limpar" }
            }
        }
    }
}

/// The query and sort order used to build the sortable column headers.
pub(crate) struct TableSorting<'a> {
    pub query: &'a TripsQuery,
    pub current: Option<Sort>,
}

const COLUMNS: [(SortKey, &str); 6] = [
    (SortKey::Oc, "OC"),
    (SortKey::Driver, "Motorista"),
    (SortKey::Product, "Produto"),
    (SortKey::StartDate, "Data Início"),
    (SortKey::Status, "Status"),
    (SortKey::EstimatedKm, "KM Estimado"),
];

/// Render trip rows as a table.
///
/// Column headers link to the sorted table when `sorting` is given.
pub(crate) fn trips_table(rows: &[TripRow<'_>], sorting: Option<&TableSorting<'_>>) -> Markup {
    html! {
        div class="w-full overflow-x-auto rounded-lg shadow-sm"
        {
            table class="w-full text-sm text-left rtl:text-right text-gray-500 dark:text-gray-400"
            {
                thead class=(TABLE_HEADER_STYLE)
                {
                    tr
                    {
                        @for (key, title) in COLUMNS {
                            th scope="col" class="px-6 py-3"
                            {
                                @match sorting {
                                    Some(sorting) => (sortable_header(sorting, key, title)),
                                    None => (title),
                                }
                            }
                        }
                    }
                }

                tbody
                {
                    @for row in rows {
                        (trip_row_view(row))
                    }

                    @if rows.is_empty() {
                        tr class=(TABLE_ROW_STYLE)
                        {
                            td colspan=(COLUMNS.len()) data-empty-state="true" class="px-6 py-4 text-center"
                            {
                                "Nenhum resultado."
                            }
                        }
                    }
                }
            }
        }
    }
}

fn sortable_header(sorting: &TableSorting<'_>, key: SortKey, title: &str) -> Markup {
    let url = sorting
        .query
        .with_sort_toggled(sorting.current, key)
        .to_url(endpoints::TRIPS_VIEW);
    let arrow = match sorting.current {
        Some(Sort {
            key: current_key,
            direction,
        }) if current_key == key => match direction {
            SortDirection::Ascending => " ▲",
            SortDirection::Descending => " ▼",
        },
        _ => "",
    };

    html! {
        a href=(url) class="hover:underline" data-sort-key=(key.as_query_value()) { (title) (arrow) }
    }
}

fn trip_row_view(row: &TripRow<'_>) -> Markup {
    let trip = row.trip;

    html! {
        tr class=(TABLE_ROW_STYLE) data-trip-id=(trip.id)
        {
            th scope="row" class="px-6 py-4 font-medium text-gray-900 whitespace-nowrap dark:text-white"
            {
                (trip.oc)
            }
            td class=(TABLE_CELL_STYLE) { (row.driver_name) }
            td class=(TABLE_CELL_STYLE) { (trip.product.label()) }
            td class=(TABLE_CELL_STYLE) { (format_display_date(trip.start_date)) }
            td class=(TABLE_CELL_STYLE) { (status_badge(trip.status)) }
            td class=(TABLE_CELL_STYLE) { (format_km(trip.estimated_km)) }
        }
    }
}

pub(crate) fn status_badge(status: TripStatus) -> Markup {
    let colour = match status {
        TripStatus::Planned => BADGE_GRAY_STYLE,
        TripStatus::InProgress => BADGE_BLUE_STYLE,
        TripStatus::Completed => BADGE_GREEN_STYLE,
        TripStatus::Cancelled => BADGE_RED_STYLE,
    };

    badge(status.label(), colour)
}
