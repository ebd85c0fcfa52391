//! API base URL of the remote report service

/// Base URL for API requests: the page's host on port 3000.
/// Empty when there is no window (unit tests).
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
    format!("{}//{}:3000", protocol, hostname)
}

/// Full URL of an API path (`/api/...`)
pub fn api_url(path: &str) -> String {
    format!("{}{}", api_base(), path)
}
