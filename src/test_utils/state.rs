use std::sync::{Arc, Mutex};

use crate::{
    AppState, pagination::PaginationConfig, route_optimizer::UnconfiguredRouteOptimizer,
    store::{SharedStore, TripStore},
};

/// An app state with the sample drivers and trips and no route optimizer.
pub(crate) fn sample_state() -> AppState {
    AppState::new(
        TripStore::with_sample_data(),
        "Etc/UTC",
        PaginationConfig::default(),
        Arc::new(UnconfiguredRouteOptimizer),
    )
    .expect("Could not create app state")
}

pub(crate) fn shared_store(store: TripStore) -> SharedStore {
    Arc::new(Mutex::new(store))
}
