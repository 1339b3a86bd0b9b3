//! API URL helpers for frontend-backend communication

use contracts::system::app_config::app_config;

/// Base URL for API requests: current host on the configured API port.
///
/// Returns an empty string when no window is available.
pub fn api_base() -> String {
    let window = match web_sys::window() {
        Some(w) => w,
        None => return String::new(),
    };
    let location = window.location();
    let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
    let hostname = location
        .hostname()
        .unwrap_or_else(|_| "127.0.0.1".to_string());
    format!("{}//{}:{}", protocol, hostname, app_config().api.port)
}

/// Full API URL for `path` (should start with "/api/")
///
/// ```rust,ignore
/// let url = api_url("/api/store");
/// ```
pub fn api_url(path: &str) -> String {
    format!("{}{}", api_base(), path)
}
