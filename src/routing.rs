//! Application router configuration.

use axum::{
    Router,
    response::Redirect,
    routing::{get, post},
};
use tower_http::services::ServeDir;

use crate::{
    AppState,
    cost::{get_costs_page, preview_cost_endpoint, update_trip_cost_endpoint},
    dashboard::get_dashboard_page,
    driver::{create_driver_endpoint, get_drivers_page},
    endpoints,
    internal_server_error::get_internal_server_error_page,
    not_found::get_404_not_found,
    trip::{
        create_trip_endpoint, edit_route_endpoint, export_trips_csv, get_new_trip_page,
        get_trips_page, optimize_route_endpoint,
    },
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    let page_routes = Router::new()
        .route(endpoints::ROOT, get(get_index_page))
        .route(endpoints::DASHBOARD_VIEW, get(get_dashboard_page))
        .route(endpoints::TRIPS_VIEW, get(get_trips_page))
        .route(endpoints::TRIPS_EXPORT, get(export_trips_csv))
        .route(endpoints::NEW_TRIP_VIEW, get(get_new_trip_page))
        .route(endpoints::DRIVERS_VIEW, get(get_drivers_page))
        .route(endpoints::COSTS_VIEW, get(get_costs_page))
        .route(
            endpoints::INTERNAL_ERROR_VIEW,
            get(get_internal_server_error_page),
        );

    let api_routes = Router::new()
        .route(endpoints::TRIPS_API, post(create_trip_endpoint))
        .route(endpoints::TRIP_ROUTE_API, post(edit_route_endpoint))
        .route(endpoints::OPTIMIZE_ROUTE_API, post(optimize_route_endpoint))
        .route(endpoints::TRIP_COST_API, post(update_trip_cost_endpoint))
        .route(endpoints::COST_PREVIEW_API, post(preview_cost_endpoint))
        .route(endpoints::DRIVERS_API, post(create_driver_endpoint));

    page_routes
        .merge(api_routes)
        .nest_service(endpoints::STATIC, ServeDir::new("static/"))
        .fallback(get_404_not_found)
        .with_state(state)
}

/// The root path '/' redirects to the dashboard page.
async fn get_index_page() -> Redirect {
    Redirect::to(endpoints::DASHBOARD_VIEW)
}
