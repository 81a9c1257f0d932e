use anyhow::Context;
use std::net::{IpAddr, SocketAddr};
use tokio::{net::TcpListener, sync::watch, task::JoinSet};
use tracing::{error, info};

use shop_services::{
    create_app, init_observability, shutdown_observability, AppSettings, Config,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration first (basic logging only)
    let config = Config::from_environment().context("Failed to load configuration")?;
    println!("Configuration loaded successfully");

    init_observability(
        &config.observability.service_name,
        &config.observability.service_version,
        config.observability.otlp_endpoint.as_deref(),
        &config.observability.log_level,
        config.observability.enable_json_logging,
    )?;

    info!(
        "Starting {} v{}",
        config.observability.service_name, config.observability.service_version
    );

    let host: IpAddr = config
        .server
        .host
        .parse()
        .with_context(|| format!("Invalid host address: {}", config.server.host))?;
    let settings = AppSettings::from(&config);
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let mut servers = JoinSet::new();
    for kind in config.services.enabled_services()? {
        let addr = SocketAddr::new(host, config.services.port_for(kind));
        let app = create_app(kind, &settings)
            .with_context(|| format!("Failed to build {}", kind.display_name()))?;
        let listener = TcpListener::bind(addr)
            .await
            .with_context(|| format!("Failed to bind {} to {}", kind.display_name(), addr))?;

        info!("{} listening on {}", kind.display_name(), addr);

        let mut shutdown_rx = shutdown_rx.clone();
        servers.spawn(async move {
            let result = axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    // A dropped sender also means shut down
                    let _ = shutdown_rx.wait_for(|stop| *stop).await;
                })
                .await;
            (kind, result)
        });
    }

    tokio::signal::ctrl_c()
        .await
        .context("Failed to install CTRL+C signal handler")?;
    info!("Shutdown signal received");
    let _ = shutdown_tx.send(true);

    while let Some(joined) = servers.join_next().await {
        match joined {
            Ok((kind, Ok(()))) => info!("{} stopped", kind.display_name()),
            Ok((kind, Err(e))) => error!("{} failed: {}", kind.display_name(), e),
            Err(e) => error!("Server task panicked: {}", e),
        }
    }

    shutdown_observability().await;
    info!("All services stopped");
    Ok(())
}

