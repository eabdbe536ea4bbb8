//! Dashboard module
//!
//! Provides the landing page with trip statistics, the number of trips per
//! month and the most recent trips.

mod aggregation;
mod cards;
mod charts;
mod handlers;
mod stats;

pub use handlers::get_dashboard_page;
