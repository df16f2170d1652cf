//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use tracing::{error, info, warn};

use crate::{
    services::View,
    state::{AppState, Mode, RenderState},
};
use super::responses::{field_text, ApiResponse, DurationsRequest, HealthResponse, StatusResponse};

/// Turn a transition result into a response, logging failures
fn respond(
    action: &str,
    message: &str,
    result: Result<RenderState, String>,
) -> Result<Json<ApiResponse>, StatusCode> {
    match result {
        Ok(state) => {
            info!("{} endpoint called", action);
            Ok(Json(ApiResponse::new(message.to_string(), &state)))
        }
        Err(e) => {
            error!("Failed to {}: {}", action, e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle POST /toggle - Start or pause the countdown
pub async fn toggle_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    respond("toggle", "Timer toggled", state.toggle())
}

/// Handle POST /start - Start the countdown
pub async fn start_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    respond("start", "Timer started", state.start())
}

/// Handle POST /pause - Pause the countdown
pub async fn pause_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    respond("pause", "Timer paused", state.pause())
}

/// Handle POST /reset - Reload the current mode's duration
pub async fn reset_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    respond("reset", "Timer reset", state.reset())
}

/// Handle POST /mode/:mode - Switch interval
pub async fn mode_handler(
    State(state): State<Arc<AppState>>,
    Path(mode): Path<String>,
) -> Result<Json<ApiResponse>, StatusCode> {
    let mode: Mode = mode.parse().map_err(|e| {
        warn!("Rejected mode change: {}", e);
        StatusCode::NOT_FOUND
    })?;

    respond("set mode", &format!("Mode set to {}", mode), state.set_mode(mode))
}

/// Handle POST /durations - Configure interval lengths
pub async fn durations_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<DurationsRequest>,
) -> Result<Json<ApiResponse>, StatusCode> {
    let result = state.set_durations(
        &field_text(&request.work),
        &field_text(&request.short_break),
        &field_text(&request.long_break),
    );

    respond("set durations", "Durations updated", result)
}

/// Handle POST /theme - Toggle light/dark appearance
pub async fn theme_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    respond("toggle theme", "Theme toggled", state.toggle_theme())
}

/// Handle GET /status - Return current timer status
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Result<Json<StatusResponse>, StatusCode> {
    let render_state = match state.get_render_state() {
        Ok(s) => s,
        Err(e) => {
            error!("Failed to get timer state: {}", e);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let (last_action, last_action_time) = state.get_last_action();

    Ok(Json(StatusResponse {
        timer: render_state.timer,
        view: View::project(&render_state),
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
    }))
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
