//! Joins trips with the names of their drivers for display.

use std::collections::HashMap;

use crate::{
    driver::{Driver, DriverId},
    trip::Trip,
};

/// Shown in place of a driver's name when the trip's driver is not registered.
pub const UNKNOWN_DRIVER_NAME: &str = "N/A";

/// A trip together with the name of its driver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TripRow<'a> {
    pub trip: &'a Trip,
    pub driver_name: &'a str,
}

/// Pair each trip with its driver's name, keeping the order of `trips`.
pub fn derive_trip_rows<'a>(
    trips: impl IntoIterator<Item = &'a Trip>,
    drivers: &'a [Driver],
) -> Vec<TripRow<'a>> {
    let driver_names: HashMap<DriverId, &str> = drivers
        .iter()
        .map(|driver| (driver.id, driver.name.as_str()))
        .collect();

    trips
        .into_iter()
        .map(|trip| TripRow {
            trip,
            driver_name: driver_names
                .get(&trip.driver_id)
                .copied()
                .unwrap_or(UNKNOWN_DRIVER_NAME),
        })
        .collect()
}
