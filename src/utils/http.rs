// src/utils/http.rs

//! HTTP client utilities.

use std::time::Duration;

use reqwest::header::{COOKIE, HeaderMap, HeaderValue, ORIGIN, REFERER};

use crate::error::{AppError, Result};
use crate::models::HttpConfig;

const LIVE_ORIGIN: &str = "https://live.bilibili.com";

/// Create a configured asynchronous HTTP client.
///
/// The session cookie, when configured, is attached to every request.
pub fn create_async_client(config: &HttpConfig) -> Result<reqwest::Client> {
    let mut headers = HeaderMap::new();
    headers.insert(ORIGIN, HeaderValue::from_static(LIVE_ORIGIN));
    headers.insert(REFERER, HeaderValue::from_static("https://live.bilibili.com/"));

    if !config.cookie.trim().is_empty() {
        let value = HeaderValue::from_str(config.cookie.trim())
            .map_err(|e| AppError::config(format!("http.cookie is not a valid header: {e}")))?;
        headers.insert(COOKIE, value);
    }

    let client = reqwest::Client::builder()
        .user_agent(&config.user_agent)
        .timeout(Duration::from_secs(config.timeout_secs))
        .default_headers(headers)
        .build()?;
    Ok(client)
}

/// Extract the csrf token (`bili_jct`) from a cookie string.
pub fn csrf_from_cookie(cookie: &str) -> Option<String> {
    cookie
        .split(';')
        .filter_map(|pair| pair.split_once('='))
        .find(|(name, _)| name.trim() == "bili_jct")
        .map(|(_, value)| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
