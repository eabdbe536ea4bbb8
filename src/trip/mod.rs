//! Trips: the core domain types, the trips table with its filters, sorting
//! and paging, CSV export and trip creation with the route editor.

mod create;
mod derive;
mod domain;
mod export;
mod form;
mod list;
mod query;
mod route;
mod table;

pub use create::{create_trip_endpoint, get_new_trip_page};
pub use derive::{TripRow, UNKNOWN_DRIVER_NAME, derive_trip_rows};
pub use domain::{NewTrip, Product, Trip, TripCost, TripId, TripStatus};
pub use export::export_trips_csv;
pub use list::get_trips_page;
pub use route::{edit_route_endpoint, optimize_route_endpoint};

pub(crate) use list::{status_badge, trips_table};
