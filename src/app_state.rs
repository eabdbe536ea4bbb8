//! Implements a struct that holds the state of the REST server.

use std::sync::{Arc, Mutex};

use crate::{
    Error, pagination::PaginationConfig, route_optimizer::RouteOptimizer, store::TripStore,
    timezone::get_local_offset,
};

/// The state of the REST server.
#[derive(Clone)]
pub struct AppState {
    /// The in-memory collection of drivers and trips.
    pub store: Arc<Mutex<TripStore>>,

    /// The local timezone as a canonical timezone name, e.g. "America/Sao_Paulo".
    pub local_timezone: String,

    /// The config that controls how to display pages of data.
    pub pagination_config: PaginationConfig,

    /// The external service that suggests the order to visit a trip's cities in.
    pub route_optimizer: Arc<dyn RouteOptimizer>,
}

impl AppState {
    /// Create a new [AppState] that serves the data in `store`.
    ///
    /// `local_timezone` should be a valid, canonical timezone name, e.g. "America/Sao_Paulo".
    ///
    /// # Errors
    /// Returns [Error::InvalidTimezoneError] if `local_timezone` is not a known timezone.
    pub fn new(
        store: TripStore,
        local_timezone: &str,
        pagination_config: PaginationConfig,
        route_optimizer: Arc<dyn RouteOptimizer>,
    ) -> Result<Self, Error> {
        if get_local_offset(local_timezone).is_none() {
            return Err(Error::InvalidTimezoneError(local_timezone.to_owned()));
        }

        Ok(Self {
            store: Arc::new(Mutex::new(store)),
            local_timezone: local_timezone.to_owned(),
            pagination_config,
            route_optimizer,
        })
    }
}
