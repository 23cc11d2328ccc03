//! AnnoCam demo binary: runs a full annotation session against synthetic
//! camera and perception providers.

use std::sync::Arc;
use std::time::Duration;

use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use acam_session::{IntervalScheduler, SessionConfig, SessionOrchestrator};

mod console;
mod synthetic;

use console::ConsoleSurface;
use synthetic::{SyntheticCamera, SyntheticFaceLoader, SyntheticObjectLoader};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Colored output for dev, JSON when requested
    let use_json = std::env::var("LOG_FORMAT")
        .map(|v| v.to_lowercase() == "json")
        .unwrap_or(false);

    let env_filter = EnvFilter::from_default_env()
        .add_directive("acam=debug".parse().expect("valid directive"));

    if use_json {
        tracing_subscriber::registry()
            .with(fmt::layer().json())
            .with(env_filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(fmt::layer().with_ansi(true).with_target(true))
            .with(env_filter)
            .init();
    }

    info!("Starting acam demo session");

    let config = SessionConfig::from_env();
    info!(?config, "Session config");

    let session = Arc::new(SessionOrchestrator::new(
        Arc::new(SyntheticCamera),
        Arc::new(SyntheticObjectLoader {
            latency: Duration::from_millis(30),
        }),
        Arc::new(SyntheticFaceLoader {
            latency: Duration::from_millis(20),
        }),
        Box::new(ConsoleSurface::new()),
        Arc::new(IntervalScheduler::new(config.frame_interval)),
        config.clone(),
    ));

    // Mirror status updates into the log, the way a UI status line would.
    let mut status_rx = session.subscribe_status();
    tokio::spawn(async move {
        while status_rx.changed().await.is_ok() {
            let status = status_rx.borrow_and_update().clone();
            info!(state = %status.state, "{}", status.message);
        }
    });

    session.start(config.initial_facing).await?;

    // Swap cameras once mid-run to exercise the switch path.
    let switcher = Arc::clone(&session);
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_secs(5)).await;
        if let Err(e) = switcher.switch_camera().await {
            info!("Camera switch failed: {}", e);
        }
    });

    tokio::signal::ctrl_c().await.ok();
    info!("Received shutdown signal");

    session.shutdown().await;
    info!("Session shutdown complete");
    Ok(())
}
