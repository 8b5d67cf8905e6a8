//! AWS Lambda entry point for live-draw
//!
//! Deploy with `cargo lambda build --release --features lambda`.
//!
//! ## Environment Variables
//!
//! - `LIVE_DRAW_CONFIG`: Optional path to a TOML config bundled with the function
//! - `LIVE_DRAW_COOKIE`: Session cookie
//! - `LIVE_DRAW_PAGES`: Pages per sub-category for both sweeps
//! - `LIVE_DRAW_USER_LEVEL`: Account level for level-gated draws
//! - `LIVE_DRAW_TIMEOUT_SECS`: HTTP request timeout
//! - `RUST_LOG`: Log level (e.g., `info`, `debug`)

use lambda_runtime::{Error as LambdaError, service_fn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use live_draw::lambda;

/// Main entry point for the AWS Lambda function.
#[tokio::main]
async fn main() -> Result<(), LambdaError> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer().json())
        .init();

    tracing::info!("live-draw Lambda starting...");
    lambda_runtime::run(service_fn(lambda::handler)).await
}
