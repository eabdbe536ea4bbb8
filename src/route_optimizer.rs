//! The client for the external service that suggests the order of a trip's
//! cities.
//!
//! The handlers only see the [RouteOptimizer] trait so the service can be
//! swapped for a fake in tests or left unconfigured.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// What the optimizer should minimise.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptimizationObjective {
    #[default]
    Distance,
    Time,
}

/// The cities to visit, in the order the user entered them.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteRequest {
    pub cities: Vec<String>,
    pub optimize_for: OptimizationObjective,
}

/// The route suggested by the optimizer.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizedRoute {
    pub optimized_route: Vec<String>,
    #[serde(default)]
    pub total_distance_km: Option<f64>,
    #[serde(default)]
    pub total_time_hours: Option<f64>,
    #[serde(default)]
    pub explanation: String,
}

#[derive(Debug, Error)]
pub enum RouteOptimizerError {
    /// No optimizer URL was given at start up.
    #[error("the route optimizer is not configured")]
    NotConfigured,

    #[error("could not reach the route optimizer: {0}")]
    Request(#[from] reqwest::Error),

    #[error("the route optimizer responded with status {0}")]
    Status(reqwest::StatusCode),

    /// The response had no total distance, so the trip's estimated km cannot
    /// be updated.
    #[error("the route optimizer did not return a total distance")]
    MissingDistance,

    #[error("the route optimizer returned an invalid route: {0}")]
    InvalidRoute(String),
}

#[async_trait]
pub trait RouteOptimizer: Send + Sync {
    /// Suggest the order in which to visit `request.cities`.
    async fn optimize(&self, request: &RouteRequest) -> Result<OptimizedRoute, RouteOptimizerError>;
}

/// Calls an optimizer over HTTP, posting the request as JSON.
#[derive(Debug, Clone)]
pub struct HttpRouteOptimizer {
    client: Client,
    endpoint: String,
    api_key: Option<String>,
}

impl HttpRouteOptimizer {
    pub fn new(
        endpoint: impl Into<String>,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self, RouteOptimizerError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
            api_key,
        })
    }
}

#[async_trait]
impl RouteOptimizer for HttpRouteOptimizer {
    async fn optimize(&self, request: &RouteRequest) -> Result<OptimizedRoute, RouteOptimizerError> {
        tracing::debug!(
            "Requesting optimized route for {} cities from {}",
            request.cities.len(),
            self.endpoint
        );

        let mut builder = self.client.post(&self.endpoint).json(request);
        if let Some(api_key) = &self.api_key {
            builder = builder.bearer_auth(api_key);
        }

        let response = builder.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(RouteOptimizerError::Status(status));
        }

        Ok(response.json().await?)
    }
}

/// Stands in for the optimizer when none is configured. Every request fails.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnconfiguredRouteOptimizer;

#[async_trait]
impl RouteOptimizer for UnconfiguredRouteOptimizer {
    async fn optimize(&self, _: &RouteRequest) -> Result<OptimizedRoute, RouteOptimizerError> {
        Err(RouteOptimizerError::NotConfigured)
    }
}

/// Reject suggestions that cannot replace the trip's route.
///
/// A suggestion needs at least two cities and a total distance, since the
/// distance becomes the trip's estimated km.
pub fn validate_route(route: OptimizedRoute) -> Result<OptimizedRoute, RouteOptimizerError> {
    if route.optimized_route.len() < 2 {
        return Err(RouteOptimizerError::InvalidRoute(format!(
            "expected at least 2 cities, got {}",
            route.optimized_route.len()
        )));
    }

    match route.total_distance_km {
        None => Err(RouteOptimizerError::MissingDistance),
        Some(distance) if !distance.is_finite() || distance < 0.0 => Err(
            RouteOptimizerError::InvalidRoute(format!("invalid total distance {distance}")),
        ),
        Some(_) => Ok(route),
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use serde_json::json;

    use super::{
        HttpRouteOptimizer, OptimizationObjective, OptimizedRoute, RouteOptimizer, RouteOptimizerError, RouteRequest,
        UnconfiguredRouteOptimizer, validate_route,
    };

    fn request(cities: &[&str]) -> RouteRequest {
        RouteRequest {
            cities: cities.iter().map(|city| city.to_string()).collect(),
            optimize_for: OptimizationObjective::Distance,
        }
    }

    #[test]
    fn request_uses_camel_case() {
        let request = request(&["Sorriso", "Santos"]);

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({"cities": ["Sorriso", "Santos"], "optimizeFor": "distance"})
        );
    }

    #[test]
    fn response_distance_and_time_are_optional() {
        let route: OptimizedRoute = serde_json::from_value(json!({
            "optimizedRoute": ["Sorriso", "Cuiabá"],
            "explanation": "Rota direta."
        }))
        .unwrap();

        assert_eq!(route.optimized_route, ["Sorriso", "Cuiabá"]);
        assert_eq!(route.total_distance_km, None);
        assert_eq!(route.total_time_hours, None);
        assert_eq!(route.explanation, "Rota direta.");
    }

    #[test]
    fn parses_full_response() {
        let route: OptimizedRoute = serde_json::from_value(json!({
            "optimizedRoute": ["Sorriso", "Cuiabá", "Santos"],
            "totalDistanceKm": 2150.5,
            "totalTimeHours": 28.0,
            "explanation": "Evita a BR-163 no trecho em obras."
        }))
        .unwrap();

        assert_eq!(route.total_distance_km, Some(2150.5));
        assert_eq!(route.total_time_hours, Some(28.0));
    }

    fn route(cities: &[&str], distance: Option<f64>) -> OptimizedRoute {
        OptimizedRoute {
            optimized_route: cities.iter().map(|city| city.to_string()).collect(),
            total_distance_km: distance,
            total_time_hours: None,
            explanation: String::new(),
        }
    }

    #[test]
    fn route_without_distance_is_rejected() {
        let result = validate_route(route(&["A", "B"], None));

        assert!(matches!(result, Err(RouteOptimizerError::MissingDistance)));
    }

    #[test]
    fn route_with_one_city_is_rejected() {
        let result = validate_route(route(&["A"], Some(10.0)));

        assert!(matches!(result, Err(RouteOptimizerError::InvalidRoute(_))));
    }

    #[test]
    fn route_with_negative_distance_is_rejected() {
        let result = validate_route(route(&["A", "B"], Some(-1.0)));

        assert!(matches!(result, Err(RouteOptimizerError::InvalidRoute(_))));
    }

    #[test]
    fn valid_route_is_accepted() {
        let result = validate_route(route(&["A", "B"], Some(0.0)));

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn unconfigured_optimizer_fails() {
        let result = UnconfiguredRouteOptimizer
            .optimize(&request(&["A", "B"]))
            .await;

        assert!(matches!(result, Err(RouteOptimizerError::NotConfigured)));
    }

    #[tokio::test]
    async fn unreachable_optimizer_is_request_error() {
        let optimizer = HttpRouteOptimizer::new(
            "http://127.0.0.1:9/optimize",
            None,
            Duration::from_secs(1),
        )
        .unwrap();

        let result = optimizer
            .optimize(&request(&["A", "B"]))
            .await;

        assert!(matches!(result, Err(RouteOptimizerError::Request(_))));
    }
}
