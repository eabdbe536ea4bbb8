//! LogiFlow is a web app for planning cargo trips, managing drivers and
//! tracking the cost and profit of each trip.
//!
//! This library provides a REST API that directly serves HTML pages. All data
//! lives in an in-memory [TripStore] owned by the server process.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use tokio::signal;

mod alert;
mod app_state;
mod cost;
mod dashboard;
mod dates;
mod driver;
mod endpoints;
mod html;
mod internal_server_error;
mod logging;
mod navigation;
mod not_found;
mod pagination;
mod route_optimizer;
mod routing;
mod store;
mod timezone;
mod trip;
mod validation;

#[cfg(test)]
mod test_utils;

pub use app_state::AppState;
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use pagination::PaginationConfig;
pub use route_optimizer::{
    HttpRouteOptimizer, OptimizationObjective, OptimizedRoute, RouteOptimizer,
    RouteOptimizerError, RouteRequest, UnconfiguredRouteOptimizer,
};
pub use routing::build_router;
pub use store::TripStore;

use crate::{alert::Alert, driver::DriverId, internal_server_error::InternalServerError};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// A trip referenced a driver ID that is not in the store.
    #[error("the driver ID {0} does not refer to a known driver")]
    UnknownDriver(DriverId),

    /// Tried to update the costs of a trip that does not exist.
    #[error("tried to update a trip that is not in the store")]
    UpdateMissingTrip,

    /// Could not acquire the lock on the in-memory store.
    #[error("could not acquire the store lock")]
    StoreLockError,

    /// An error occurred while getting the local timezone from a canonical timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezoneError(String),

    /// The filtered trips could not be written as CSV.
    #[error("could not write the CSV export: {0}")]
    CsvExportError(String),
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::InvalidTimezoneError(timezone) => InternalServerError {
                description: "Invalid Timezone Settings",
                fix: &format!(
                    "Could not get local timezone \"{timezone}\". Check your server settings and \
                    ensure the timezone has been set to valid, canonical timezone string"
                ),
            }
            .into_response(),
            Error::StoreLockError => InternalServerError::default().into_response(),
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                InternalServerError::default().into_response()
            }
        }
    }
}

impl Error {
    /// Render the error as an alert fragment for htmx requests.
    fn into_alert_response(self) -> Response {
        match self {
            Error::UpdateMissingTrip => Alert::error(
                "Não foi possível salvar os custos",
                "A viagem não foi encontrada. Atualize a página para ver as viagens atuais.",
            )
            .into_response_with_status(StatusCode::NOT_FOUND),
            Error::UnknownDriver(driver_id) => Alert::error(
                "Motorista inválido",
                format!("Nenhum motorista encontrado com o ID {driver_id}."),
            )
            .into_response_with_status(StatusCode::BAD_REQUEST),
            Error::InvalidTimezoneError(timezone) => Alert::error(
                "Invalid Timezone Settings",
                format!(
                    "Could not get local timezone \"{timezone}\". Check your server settings and \
                    ensure the timezone has been set to valid, canonical timezone string"
                ),
            )
            .into_response_with_status(StatusCode::INTERNAL_SERVER_ERROR),
            error => {
                tracing::error!("An unexpected error occurred: {error}");
                Alert::error(
                    "Algo deu errado",
                    "Ocorreu um erro inesperado, verifique os logs do servidor.",
                )
                .into_response_with_status(StatusCode::INTERNAL_SERVER_ERROR)
            }
        }
    }
}
