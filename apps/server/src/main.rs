//! Hospital Appointment Server binary.

use std::net::SocketAddr;

use booking_store::{BookingStore, PgStore, SqliteStore};
use hospital_server::{config::Config, create_app, create_state, init_tracing};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env if present
    dotenvy::dotenv().ok();

    // Load configuration
    let config = Config::from_env()?;

    // Initialize tracing
    init_tracing(&config.log_level);

    tracing::info!("Starting Hospital Appointment Server");

    let addr: SocketAddr = config.server_addr().parse()?;

    // Select the store variant by URL scheme. Connecting also runs the
    // idempotent schema initialization; failure here is fatal.
    if config.database_url.starts_with("postgres") {
        let store = PgStore::connect(&config.database_url).await?;
        serve(config, store, addr).await
    } else {
        let store = SqliteStore::connect(&config.database_url).await?;
        serve(config, store, addr).await
    }
}

async fn serve<S: BookingStore + 'static>(
    config: Config,
    store: S,
    addr: SocketAddr,
) -> anyhow::Result<()> {
    let state = create_state(config, store);
    let app = create_app(state);

    tracing::info!(addr = %addr, "Server listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
