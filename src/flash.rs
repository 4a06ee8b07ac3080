//! One-time status messages ("note added", "permission denied", ...)
//! carried in a short-lived cookie. Set on a redirect, rendered exactly
//! once by the next full page, never persisted server-side. The payload
//! is base64 so messages can contain spaces and unicode.

use axum::http::{HeaderMap, HeaderValue};
use base64::{engine::general_purpose, Engine as _};
use regex::Regex;

pub fn set(headers: &mut HeaderMap, message: &str) {
    let encoded = general_purpose::URL_SAFE_NO_PAD.encode(message);
    if let Ok(value) =
        HeaderValue::from_str(&format!("flash={encoded}; Path=/"))
    {
        headers.append("Set-Cookie", value);
    }
}

/// Read the pending message (if any) from the request, and return the
/// `Set-Cookie` value that clears it so it only displays once.
pub fn take(request_headers: &HeaderMap) -> (Option<String>, HeaderValue) {
    let clear = HeaderValue::from_static("flash=; Path=/; Max-Age=0");
    let cookie = request_headers
        .get("Cookie")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");
    let re = Regex::new(r"flash=([^;]*)").expect("regex compiles");
    let message = re
        .captures(cookie)
        .and_then(|c| general_purpose::URL_SAFE_NO_PAD.decode(&c[1]).ok())
        .and_then(|bytes| String::from_utf8(bytes).ok())
        .filter(|m| !m.is_empty());

    (message, clear)
}
