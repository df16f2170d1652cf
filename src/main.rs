//! Pomodoro Server - A state-managed Pomodoro timer
//! 
//! This is the main entry point for the pomodoro-server application.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use pomodoro_server::{
    config::Config,
    state::AppState,
    api::create_router,
    services::{Alarm, SilentAlarm, TerminalBell},
    tasks::{render_task, TokioClock},
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("pomodoro_server={},tower_http=info", config.log_level()))
        .init();

    let durations = config.durations();
    info!("Starting pomodoro-server v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: host={}, port={}, work={}min, short_break={}min, long_break={}min",
          config.host, config.port, durations.work, durations.short_break, durations.long_break);

    let alarm: Arc<dyn Alarm> = if config.silent {
        Arc::new(SilentAlarm)
    } else {
        Arc::new(TerminalBell)
    };

    // Create application state
    let state = Arc::new(AppState::new(
        config.port,
        config.host.clone(),
        durations,
        config.theme(),
        Arc::new(TokioClock::every_second()),
        alarm,
    ));

    // Start the render task
    tokio::spawn(render_task(state.render_tx.subscribe()));

    // Create HTTP router with all endpoints
    let app = create_router(Arc::clone(&state));

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  POST /toggle          - Start or pause the timer");
    info!("  POST /start           - Start the timer");
    info!("  POST /pause           - Pause the timer");
    info!("  POST /reset           - Reset the current interval");
    info!("  POST /mode/:mode      - Switch to focus, short-break or long-break");
    info!("  POST /durations       - Set work/short_break/long_break minutes");
    info!("  POST /theme           - Toggle light/dark theme");
    info!("  GET  /status          - Current timer and view");
    info!("  GET  /health          - Health check");

    // Setup graceful shutdown
    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        result = shutdown_signal() => {
            match result {
                Ok(()) => info!("Shutdown signal received"),
                Err(e) => tracing::error!("Failed to listen for shutdown signals: {}", e),
            }
        }
    }

    // Stop any pending ticks before exiting
    if let Err(e) = state.pause() {
        tracing::warn!("Failed to stop timer on shutdown: {}", e);
    }

    info!("Server shutdown complete");
    Ok(())
}
