//! Rental calendar HTTP server
//!
//! # Environment Variables
//!
//! See [`rental_calendar::config`]. `RUST_LOG` overrides the default log
//! filter (`rental_calendar=info,tower_http=info`).

use std::net::SocketAddr;
use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;

use rental_calendar::calendar::SystemClock;
use rental_calendar::config::AppConfig;
use rental_calendar::{create_router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env is optional
    dotenvy::dotenv().ok();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("rental_calendar=info,tower_http=info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = AppConfig::from_env()?;
    info!(
        "Horizon {} days, same-day stays: {}",
        config.horizon_days, config.same_day_stay
    );

    let state = AppState::from_config(&config, Arc::new(SystemClock))?;
    let app = create_router(state);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    info!("Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
