//! Utility functions and helpers.

pub mod http;

use std::time::Duration;

/// Sleep for `delay`, skipping the timer entirely when it is zero.
pub async fn pause(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}
