//! The API endpoints URIs.
//!
//! For endpoints that take a parameter, e.g., '/api/trips/{trip_id}/cost', use [format_endpoint].

/// The root route which redirects to the dashboard.
pub const ROOT: &str = "/";
/// The landing page with the trip statistics and chart.
pub const DASHBOARD_VIEW: &str = "/dashboard";
/// The page for listing, filtering and paging trips.
pub const TRIPS_VIEW: &str = "/trips";
/// The route that downloads the filtered trips as a CSV file.
pub const TRIPS_EXPORT: &str = "/trips/export";
/// The page for creating a new trip.
pub const NEW_TRIP_VIEW: &str = "/trips/new";
/// The page for listing and registering drivers.
pub const DRIVERS_VIEW: &str = "/drivers";
/// The page for entering the costs of a trip.
pub const COSTS_VIEW: &str = "/costs";
/// The page to display when an internal server error occurs.
pub const INTERNAL_ERROR_VIEW: &str = "/error";
/// The route for static files.
pub const STATIC: &str = "/static";

/// The route to create a trip.
pub const TRIPS_API: &str = "/api/trips";
/// The route that adds or removes a city in the new trip form.
pub const TRIP_ROUTE_API: &str = "/api/trips/route";
/// The route that asks the route optimizer for the best order to visit cities in.
pub const OPTIMIZE_ROUTE_API: &str = "/api/trips/optimize-route";
/// The route to save the costs of a trip.
pub const TRIP_COST_API: &str = "/api/trips/{trip_id}/cost";
/// The route that recalculates the cost totals while the user types.
pub const COST_PREVIEW_API: &str = "/api/costs/preview";
/// The route to register a driver.
pub const DRIVERS_API: &str = "/api/drivers";

/// Replace the parameter in `endpoint_path` with `id`.
///
/// The parameter is the first `{...}` segment. If there is no parameter,
/// `endpoint_path` is returned unchanged.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(format_endpoint("/api/trips/{trip_id}/cost", 1), "/api/trips/1/cost");
/// ```
pub fn format_endpoint(endpoint_path: &str, id: u64) -> String {
    let Some(start) = endpoint_path.find('{') else {
        return endpoint_path.to_owned();
    };

    match endpoint_path[start..].find('}') {
        Some(length) => format!(
            "{}{id}{}",
            &endpoint_path[..start],
            &endpoint_path[start + length + 1..]
        ),
        None => endpoint_path.to_owned(),
    }
}
