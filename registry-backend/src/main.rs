use std::sync::Arc;

use dotenv::dotenv;
use registry_backend::config::Config;
use registry_backend::routes::{self, AppState};
use registry_backend::store::CsvStore;

#[tokio::main]
async fn main() {
    dotenv().ok();
    env_logger::init();

    let config = Config::from_env();
    let store = CsvStore::from_config(&config);

    if let Err(e) = std::fs::create_dir_all(&config.data_dir) {
        log::error!(
            "Failed to create data directory {}: {}",
            config.data_dir.display(),
            e
        );
        std::process::exit(1);
    }

    log::info!(
        "Using data files {} and {}",
        store.path_for(registry_types::EntityKind::Clients).display(),
        store.path_for(registry_types::EntityKind::Employees).display(),
    );

    let state = Arc::new(AppState::new(store));
    let cors = tower_http::cors::CorsLayer::permissive();
    let app = routes::build_router(state).layer(cors);

    let addr = config.bind_addr();
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(l) => l,
        Err(e) => {
            log::error!("Failed to bind {}: {}", addr, e);
            std::process::exit(1);
        }
    };

    log::info!("Registry service listening on http://{}", addr);

    if let Err(e) = axum::serve(listener, app).await {
        log::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
