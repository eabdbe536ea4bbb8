//! Downloading the filtered trips as a CSV file.

use axum::{
    extract::{Query, State},
    http::header::{CONTENT_DISPOSITION, CONTENT_TYPE},
    response::{IntoResponse, Response},
};
use time::Date;

use crate::{
    Error,
    dates::{format_display_date, format_iso_date},
    store::lock_store,
    timezone::current_local_date,
    trip::{
        TripRow, derive_trip_rows,
        list::TripsState,
        query::TripsQuery,
        table::filter_rows,
    },
};

pub const CSV_HEADERS: [&str; 8] = [
    "OC",
    "Motorista",
    "Produto",
    "Data Início",
    "Status",
    "KM Estimado",
    "KM Real",
    "Cidades",
];

/// Separates the cities of a route in the "Cidades" column.
pub const CITY_SEPARATOR: &str = " -> ";

/// Write one CSV record per row, in the order given, after a header record.
pub fn write_trips_csv(rows: &[TripRow<'_>]) -> Result<Vec<u8>, Error> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    writer
        .write_record(CSV_HEADERS)
        .map_err(|error| Error::CsvExportError(error.to_string()))?;

    for row in rows {
        let trip = row.trip;

        writer
            .write_record([
                trip.oc.clone(),
                row.driver_name.to_owned(),
                trip.product.as_str().to_owned(),
                format_display_date(trip.start_date),
                trip.status.label().to_owned(),
                trip.estimated_km.to_string(),
                trip.real_km.map(|km| km.to_string()).unwrap_or_default(),
                trip.cities.join(CITY_SEPARATOR),
            ])
            .map_err(|error| Error::CsvExportError(error.to_string()))?;
    }

    writer
        .into_inner()
        .map_err(|error| Error::CsvExportError(error.to_string()))
}

pub fn export_file_name(date: Date) -> String {
    format!("logiflow_viagens_{}.csv", format_iso_date(date))
}

/// Download the trips that pass the current filters.
///
/// Sorting and paging are ignored: the file lists every matching trip in the
/// order the trips were created.
pub async fn export_trips_csv(
    State(state): State<TripsState>,
    Query(query): Query<TripsQuery>,
) -> Result<Response, Error> {
    let today = current_local_date(&state.local_timezone)?;
    let table_state = query.to_table_state(&state.pagination_config);

    let store = lock_store(&state.store)?;
    let rows = derive_trip_rows(store.trips(), store.drivers());
    let filtered = filter_rows(&rows, table_state.filters());
    let body = write_trips_csv(&filtered)?;

    tracing::info!("Exporting {} trips to CSV", filtered.len());

    Ok((
        [
            (CONTENT_TYPE, "text/csv; charset=utf-8".to_owned()),
            (
                CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", export_file_name(today)),
            ),
        ],
        body,
    )
        .into_response())
}
