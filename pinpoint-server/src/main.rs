use std::sync::Arc;
use std::time::Duration;
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use pinpoint_server::{
    config::Config, create_routes, session::SessionManager, street_view::StreetViewClient,
};

const CLEANUP_INTERVAL: Duration = Duration::from_secs(60);

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,pinpoint=info")),
        )
        .init();

    if let Err(e) = run().await {
        error!("{:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    info!("Starting Pinpoint server...");

    let config = Config::from_env()?;
    let street_view = StreetViewClient::new(
        config.street_view_base_url.clone(),
        config.street_view_api_key.clone(),
        config.lookup_timeout(),
    )?;

    let session_manager = Arc::new(SessionManager::new(
        Arc::new(street_view),
        config.game_settings,
        config.panorama_radius_meters,
    ));
    info!(
        "Games run {} rounds of {}s, panorama search radius {} m",
        config.game_settings.total_rounds,
        config.game_settings.time_per_round,
        config.panorama_radius_meters
    );

    let routes = create_routes(session_manager.clone());

    // Start cleanup task
    let cleanup_manager = session_manager.clone();
    let session_timeout = config.session_timeout();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(CLEANUP_INTERVAL);
        loop {
            interval.tick().await;
            let removed = cleanup_manager
                .cleanup_expired_sessions(session_timeout)
                .await;
            if removed > 0 {
                info!("Swept {} idle sessions", removed);
            }
        }
    });

    let ip: std::net::IpAddr = config.host.parse()?;
    let (addr, server) =
        warp::serve(routes).try_bind_with_graceful_shutdown((ip, config.port), shutdown_signal())?;

    info!("Server started on {}. Press Ctrl+C to stop.", addr);
    server.await;
    info!("Server shutdown complete.");
    Ok(())
}

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        let mut sigterm = match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(sigterm) => sigterm,
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                let _ = signal::ctrl_c().await;
                return;
            }
        };

        tokio::select! {
            _ = signal::ctrl_c() => {
                info!("Received SIGINT, shutting down gracefully...");
            }
            _ = sigterm.recv() => {
                info!("Received SIGTERM, shutting down gracefully...");
            }
        }
    }

    #[cfg(not(unix))]
    {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
        }
        info!("Received Ctrl+C, shutting down gracefully...");
    }
}
