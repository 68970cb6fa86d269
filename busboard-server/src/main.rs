use std::net::SocketAddr;

use busboard_server::bustime::{BustimeConfig, TransitClient};
use busboard_server::cache::{CacheConfig, CachedTransitClient};
use busboard_server::catalog::CatalogService;
use busboard_server::config_store::ConfigStore;
use busboard_server::registry::TrackedStopRegistry;
use busboard_server::web::{AppState, create_router};

/// Agency queried when AGENCY_ID is not set.
const DEFAULT_AGENCY_ID: &str = "MTA NYCT";

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // Get credentials and paths from environment
    let api_key = std::env::var("BUSTIME_API_KEY").unwrap_or_else(|_| {
        eprintln!("Warning: BUSTIME_API_KEY not set. API calls will fail.");
        String::new()
    });
    let agency_id = std::env::var("AGENCY_ID").unwrap_or_else(|_| DEFAULT_AGENCY_ID.to_string());
    let config_path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.json".to_string());
    let static_dir = std::env::var("STATIC_DIR").unwrap_or_else(|_| "static".to_string());

    // Create the Bus Time client with caching
    let client =
        TransitClient::new(BustimeConfig::new(&api_key)).expect("Failed to create Bus Time client");
    let cached = CachedTransitClient::new(client, &CacheConfig::default());
    let catalog = CatalogService::new(cached, &agency_id);

    // Load the persisted tracked-stop document
    let store = ConfigStore::new(&config_path);
    let document = store
        .load_or_default()
        .expect("Failed to load config document");
    println!(
        "Loaded {} tracked stops from {}",
        document.stops.len(),
        config_path
    );

    // Route ids are "<agency>_<name>"; strip the agency and delimiter
    let route_prefix_len = agency_id.len() + 1;
    let registry = TrackedStopRegistry::new(store, document, route_prefix_len);

    // Build app state and router
    let state = AppState::new(catalog, registry);
    let app = create_router(state, &static_dir);

    // Bind and serve
    let addr = SocketAddr::from(([127, 0, 0, 1], 3000));
    println!("Bus stop admin listening on http://{addr}");
    println!();
    println!("API Endpoints:");
    println!("  GET    /health                                          - Health check");
    println!("  GET    /api/routes                                      - Route catalog");
    println!("  GET    /api/routes/:route/directions                    - Directions for a route");
    println!("  GET    /api/routes/:route/directions/:direction/stops   - Stops for a direction");
    println!("  GET    /api/routes/:route/stops/:stop                   - Merged stop info");
    println!("  GET    /api/tracked                                     - Tracked stops");
    println!("  POST   /api/tracked                                     - Track (or replace) a stop");
    println!("  DELETE /api/tracked/:index                              - Untrack by position");

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
