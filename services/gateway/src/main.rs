use gateway::router::create_router;
use gateway::state::AppState;
use orderstore::OrderStore;
use std::env;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    // Initialize tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    tracing::info!("Starting gateway service");

    let data_dir = env::var("CROSSBOOK_DATA_DIR").unwrap_or_else(|_| "./data".to_string());
    let listen = env::var("CROSSBOOK_LISTEN").unwrap_or_else(|_| "0.0.0.0:8080".to_string());

    let store = OrderStore::open(&data_dir)?;
    tracing::info!(
        orders = store.len(),
        dir = %data_dir,
        "order store opened"
    );

    let state = AppState::new(store);
    let app = create_router(state);

    let listener = TcpListener::bind(&listen).await?;
    tracing::info!("Listening on {}", listen);
    axum::serve(listener, app).await?;

    Ok(())
}
