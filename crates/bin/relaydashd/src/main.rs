//! # relaydashd — relaydash daemon
//!
//! Composition root that wires all adapters together and starts the console.
//!
//! ## Responsibilities
//! - Load configuration (config file, env vars)
//! - Initialise `tracing` from the configured filter
//! - Construct the relay, passenger directory and push hub adapters
//! - Spawn the dashboard session and the relay monitor
//! - Build the axum router, injecting application services
//! - Bind to a TCP port and serve until SIGINT/SIGTERM, then release the
//!   push connection
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no domain logic belongs here.

mod config;

use std::future::IntoFuture;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use relaydash_adapter_http_axum::state::{AppState, DashboardSettings};
use relaydash_adapter_relay_reqwest::{HttpPassengerDirectory, HttpRelay};
use relaydash_adapter_signalr::{HubConfig, SignalRHub};
use relaydash_app::dashboard_session::DashboardSession;
use relaydash_app::event_bus::InProcessEventBus;
use relaydash_app::monitor::{Monitor, MonitorConfig};
use relaydash_app::services::control_service::ControlService;
use relaydash_app::services::passenger_service::PassengerService;
use relaydash_app::services::session_gate::SessionGate;
use relaydash_domain::session::Credentials;

use crate::config::Config;

/// Snapshots buffered per SSE subscriber and updates queued per session.
const CHANNEL_CAPACITY: usize = 256;
/// How long open connections (SSE streams) may linger after a shutdown signal.
const DRAIN_TIMEOUT: Duration = Duration::from_secs(5);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load().context("failed to load configuration")?;
    init_tracing(&config.logging.filter);

    // Adapters
    let relay = Arc::new(
        HttpRelay::new(config.relay.clone()).context("failed to build relay client")?,
    );
    let directory = HttpPassengerDirectory::new(&config.passengers)
        .context("failed to build passenger directory client")?;
    let hub = SignalRHub::new(HubConfig::new(config.relay.hub_url()))
        .context("failed to build push hub client")?;

    // Dashboard session
    let event_bus = Arc::new(InProcessEventBus::new(CHANNEL_CAPACITY));
    let (dashboard, _session) =
        DashboardSession::spawn(Arc::clone(&event_bus), CHANNEL_CAPACITY);

    let monitor = Monitor::new(
        Arc::clone(&relay),
        hub,
        dashboard.clone(),
        MonitorConfig {
            status_refresh: config.relay.status_refresh(),
        },
    )
    .start();

    // HTTP
    let state = AppState::new(
        SessionGate::new(Credentials::new(
            config.auth.username.as_str(),
            config.auth.password.as_str(),
        )),
        ControlService::new(relay, dashboard),
        PassengerService::new(directory),
        event_bus,
        DashboardSettings {
            refresh_seconds: config.dashboard.refresh_seconds,
        },
    );
    let app = relaydash_adapter_http_axum::router::build(state);

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {bind_addr}"))?;
    tracing::info!(
        relay = %config.relay.base_url,
        passengers = %config.passengers.base_url,
        "relaydashd listening on http://{bind_addr}"
    );

    let (stop_tx, stop_rx) = tokio::sync::watch::channel(false);
    tokio::spawn(async move {
        shutdown_signal().await;
        let _ = stop_tx.send(true);
    });

    let mut server_stop = stop_rx.clone();
    let server = axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            let _ = server_stop.wait_for(|stopped| *stopped).await;
        })
        .into_future();

    let mut drain = stop_rx;
    tokio::select! {
        result = server => result.context("http server failed")?,
        () = async {
            let _ = drain.wait_for(|stopped| *stopped).await;
            tokio::time::sleep(DRAIN_TIMEOUT).await;
        } => {
            tracing::warn!("open connections did not drain in time, closing them");
        }
    }

    monitor.shutdown().await;
    tracing::info!("relaydashd stopped");

    Ok(())
}

fn init_tracing(filter: &str) {
    let filter = EnvFilter::try_new(filter).unwrap_or_else(|err| {
        eprintln!("invalid log filter {filter:?} ({err}), falling back to info");
        EnvFilter::new("info")
    });
    // Ignore re-initialisation; a global subscriber may already be set.
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
    tracing::info!("shutdown signal received");
}
