//! API response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    services::View,
    state::{RenderState, TimerSnapshot},
};

/// API response structure for state change endpoints
#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub timer: TimerSnapshot,
    pub view: View,
}

impl ApiResponse {
    /// Create a new API response
    pub fn new(message: String, state: &RenderState) -> Self {
        let status = if state.timer.is_running { "running" } else { "stopped" };
        Self {
            status: status.to_string(),
            message,
            timestamp: Utc::now(),
            timer: state.timer,
            view: View::project(state),
        }
    }
}

/// Full status with server metadata
#[derive(Debug, Clone, Serialize)]
pub struct StatusResponse {
    pub timer: TimerSnapshot,
    pub view: View,
    pub uptime: String,
    pub port: u16,
    pub host: String,
    pub last_action: Option<String>,
    pub last_action_time: Option<DateTime<Utc>>,
}

/// Request body for POST /durations. Fields are left raw so that bad
/// values can fall back to defaults instead of rejecting the request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DurationsRequest {
    #[serde(default)]
    pub work: serde_json::Value,
    #[serde(default, alias = "shortBreak")]
    pub short_break: serde_json::Value,
    #[serde(default, alias = "longBreak")]
    pub long_break: serde_json::Value,
}

/// Render a raw JSON field as the text a form input would hold
pub fn field_text(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Number(n) => n.to_string(),
        _ => String::new(),
    }
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    /// Create a new health response
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn field_text_keeps_numbers_and_strings() {
        assert_eq!(field_text(&json!(20)), "20");
        assert_eq!(field_text(&json!(-5)), "-5");
        assert_eq!(field_text(&json!(12.9)), "12.9");
        assert_eq!(field_text(&json!("abc")), "abc");
        assert_eq!(field_text(&json!(null)), "");
        assert_eq!(field_text(&json!([1])), "");
    }

    #[test]
    fn durations_request_accepts_camel_case_and_missing_fields() {
        let request: DurationsRequest =
            serde_json::from_value(json!({"work": 30, "shortBreak": "7"})).unwrap();
        assert_eq!(field_text(&request.work), "30");
        assert_eq!(field_text(&request.short_break), "7");
        assert_eq!(field_text(&request.long_break), "");
    }
}
