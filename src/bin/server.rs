use std::{env, error::Error, fs::OpenOptions, net::SocketAddr, sync::Arc, time::Duration};

use axum::{
    Router,
    extract::{MatchedPath, Request},
    middleware,
};
use axum_server::Handle;
use clap::Parser;
use tower_http::trace::TraceLayer;

#[cfg(debug_assertions)]
use tower_livereload::LiveReloadLayer;

use tracing_subscriber::{Layer, filter, layer::SubscriberExt, util::SubscriberInitExt};

use logiflow::{
    AppState, HttpRouteOptimizer, PaginationConfig, RouteOptimizer, TripStore,
    UnconfiguredRouteOptimizer, build_router, graceful_shutdown, logging_middleware,
};

/// The environment variable holding the bearer token for the route optimizer.
const ROUTE_OPTIMIZER_API_KEY: &str = "ROUTE_OPTIMIZER_API_KEY";

/// The web server for LogiFlow.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// The port to serve the app from.
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// The canonical name of the timezone used for "today", e.g. "America/Sao_Paulo".
    #[arg(long, default_value = "America/Sao_Paulo")]
    timezone: String,

    /// The number of trips to show per page when the request does not ask for one.
    #[arg(long, default_value_t = 10)]
    page_size: usize,

    /// The URL of the route optimization service.
    #[arg(long, env = "ROUTE_OPTIMIZER_URL")]
    route_optimizer_url: Option<String>,

    /// How long to wait for the route optimization service before giving up.
    #[arg(long, default_value_t = 60)]
    route_optimizer_timeout_secs: u64,

    /// Start without the sample drivers and trips.
    #[arg(long)]
    empty: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    setup_logging()?;

    let args = Args::parse();

    let addr = SocketAddr::from(([127, 0, 0, 1], args.port));

    let store = if args.empty {
        TripStore::new()
    } else {
        TripStore::with_sample_data()
    };

    let mut pagination_config = PaginationConfig::default();
    if !pagination_config.page_size_options.contains(&args.page_size) {
        pagination_config.page_size_options.push(args.page_size);
        pagination_config.page_size_options.sort_unstable();
    }
    pagination_config.default_page_size = args.page_size;

    let route_optimizer = create_route_optimizer(&args)?;
    let app_state = AppState::new(store, &args.timezone, pagination_config, route_optimizer)?;

    let handle = Handle::new();
    tokio::spawn(graceful_shutdown(handle.clone()));

    let router = add_tracing_layer(build_router(app_state));

    #[cfg(debug_assertions)]
    let router = router.layer(LiveReloadLayer::new());

    tracing::info!("HTTP server listening on {}", addr);
    axum_server::bind(addr)
        .handle(handle)
        .serve(router.into_make_service())
        .await?;

    Ok(())
}

fn create_route_optimizer(args: &Args) -> Result<Arc<dyn RouteOptimizer>, Box<dyn Error>> {
    let Some(url) = &args.route_optimizer_url else {
        tracing::warn!("No route optimizer URL was given, route optimization is disabled.");
        return Ok(Arc::new(UnconfiguredRouteOptimizer));
    };

    let api_key = env::var(ROUTE_OPTIMIZER_API_KEY).ok();
    if api_key.is_none() {
        tracing::info!("{ROUTE_OPTIMIZER_API_KEY} is not set, calling the route optimizer without a token.");
    }

    let optimizer = HttpRouteOptimizer::new(
        url.as_str(),
        api_key,
        Duration::from_secs(args.route_optimizer_timeout_secs),
    )?;

    Ok(Arc::new(optimizer))
}

fn setup_logging() -> Result<(), Box<dyn Error>> {
    let stdout_log = tracing_subscriber::fmt::layer().pretty();

    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open("debug.log")?;

    let debug_log = tracing_subscriber::fmt::layer()
        .pretty()
        .with_writer(Arc::new(log_file));

    tracing_subscriber::registry()
        .with(
            stdout_log
                .with_filter(filter::LevelFilter::INFO)
                .and_then(debug_log)
                .with_filter(filter::LevelFilter::DEBUG),
        )
        .init();

    Ok(())
}

fn add_tracing_layer(router: Router) -> Router {
    let tracing_layer = TraceLayer::new_for_http()
        .make_span_with(|req: &Request| {
            let method = req.method();
            let uri = req.uri();

            let matched_path = req
                .extensions()
                .get::<MatchedPath>()
                .map(|matched_path| matched_path.as_str());

            tracing::debug_span!("request", %method, %uri, matched_path)
        })
        // By default, `TraceLayer` will log 5xx responses but we're doing our specific
        // logging of errors so disable that
        .on_failure(());

    router
        .layer(middleware::from_fn(logging_middleware))
        .layer(tracing_layer)
}
