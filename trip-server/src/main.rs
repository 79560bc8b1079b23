use std::net::SocketAddr;
use std::process::ExitCode;
use std::sync::Arc;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use trip_server::amap::{AmapClient, AmapConfig};
use trip_server::cache::CacheConfig;
use trip_server::domain::ApiKey;
use trip_server::geocode::GeocodeResolver;
use trip_server::locate::LocationService;
use trip_server::planner::{PlannerConfig, TripPlanner};
use trip_server::plans::{PlanStore, PlanStoreConfig};
use trip_server::poi::{PoiFinder, PoiSearchConfig};
use trip_server::web::{AppState, create_router};

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";
const DEFAULT_STATIC_DIR: &str = "static";

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("trip_server=info")),
        )
        .init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            error!("{message}");
            eprintln!("Error: {message}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), String> {
    // Map service key is mandatory; nothing works without it.
    let raw_key = std::env::var("AMAP_API_KEY")
        .map_err(|_| "AMAP_API_KEY is not set. Get a Web service key from the AMap console.")?;
    let api_key = ApiKey::parse(&raw_key).map_err(|e| format!("AMAP_API_KEY rejected: {e}"))?;

    let mut amap_config = AmapConfig::new(api_key);
    if let Ok(url) = std::env::var("AMAP_BASE_URL") {
        amap_config = amap_config.with_base_url(url);
    }
    let amap = AmapClient::new(amap_config).map_err(|e| format!("Failed to create AMap client: {e}"))?;

    // Wire services around one shared provider and resolver
    let provider = Arc::new(amap);
    let resolver = Arc::new(GeocodeResolver::new(
        Arc::clone(&provider),
        &CacheConfig::default(),
    ));
    let planner = TripPlanner::new(Arc::clone(&resolver), PlannerConfig::default());
    let poi = PoiFinder::new(resolver, PoiSearchConfig::default());
    let location = LocationService::new(provider);

    let mut store_config = PlanStoreConfig::default();
    if let Ok(path) = std::env::var("TRIP_PLANS_PATH") {
        store_config = store_config.with_path(path);
    }
    let plans = PlanStore::new(&store_config);
    info!(path = %plans.path().display(), "plan store");

    let state = AppState::new(planner, poi, location, plans);

    let static_dir =
        std::env::var("TRIP_STATIC_DIR").unwrap_or_else(|_| DEFAULT_STATIC_DIR.to_string());
    let app = create_router(state, &static_dir);

    let bind = std::env::var("TRIP_BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());
    let addr: SocketAddr = bind
        .parse()
        .map_err(|e| format!("Invalid TRIP_BIND_ADDR {bind}: {e}"))?;

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| format!("Failed to bind {addr}: {e}"))?;

    info!("Trip planner listening on http://{addr}");
    info!("API endpoints:");
    info!("  GET  /health               - Health check");
    info!("  GET  /api/geocode          - Resolve an address");
    info!("  POST /api/routes/plan      - Compare routes");
    info!("  GET  /api/poi/nearby       - Nearby places");
    info!("  GET  /api/poi/attractions  - Curated attractions");
    info!("  GET  /api/plans            - Saved plans");

    axum::serve(listener, app)
        .await
        .map_err(|e| format!("Server error: {e}"))
}
