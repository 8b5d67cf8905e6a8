// src/lambda/mod.rs

//! AWS Lambda handler for the draw sweeper.
//!
//! This module provides the Lambda function entry point that:
//! 1. Loads configuration from an optional TOML file plus environment overrides
//! 2. Runs the requested sweep(s)
//! 3. Returns the streamers to follow for the scheduler to act on

use lambda_runtime::{Error as LambdaError, LambdaEvent};
use serde::{Deserialize, Serialize};
use tracing::{error, info, instrument};

use crate::api::BiliLiveApi;
use crate::error::Result;
use crate::models::{Config, FollowTarget};
use crate::pipeline::{run_all, run_lottery, run_red_packet};

/// Which sweep to run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Task {
    Lottery,
    RedPacket,
    #[default]
    All,
}

/// Lambda invocation payload.
#[derive(Debug, Deserialize)]
pub struct DrawRequest {
    #[serde(default)]
    pub task: Task,
}

/// Lambda response payload.
#[derive(Debug, Default, Serialize)]
pub struct DrawResponse {
    /// Whether the sweep ran to completion
    pub success: bool,

    /// Streamers to newly follow
    pub follows: Vec<FollowTarget>,

    /// Number of draws joined
    pub joined: usize,

    /// Error message if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Execution time in milliseconds
    pub execution_time_ms: u64,
}

/// Main Lambda handler function.
#[instrument(skip(event))]
pub async fn handler(
    event: LambdaEvent<DrawRequest>,
) -> std::result::Result<DrawResponse, LambdaError> {
    let start = std::time::Instant::now();
    let (request, _context) = event.into_parts();

    info!("Starting sweep: task={:?}", request.task);

    match run_task(request.task).await {
        Ok(mut response) => {
            response.success = true;
            response.execution_time_ms = start.elapsed().as_millis() as u64;
            info!(
                "Sweep completed: {} joined, {} to follow in {}ms",
                response.joined,
                response.follows.len(),
                response.execution_time_ms
            );
            Ok(response)
        }
        Err(e) => {
            error!("Sweep failed: {}", e);
            Ok(DrawResponse {
                success: false,
                error: Some(e.to_string()),
                execution_time_ms: start.elapsed().as_millis() as u64,
                ..Default::default()
            })
        }
    }
}

/// Internal sweep logic.
async fn run_task(task: Task) -> Result<DrawResponse> {
    let config = load_lambda_config()?;
    let api = BiliLiveApi::new(&config.http)?;

    let (follows, joined) = match task {
        Task::Lottery => {
            let outcome = run_lottery(&api, &config).await?;
            (outcome.follows, outcome.stats.joined)
        }
        Task::RedPacket => {
            let outcome = run_red_packet(&api, &config).await?;
            (outcome.follows, outcome.stats.joined)
        }
        Task::All => {
            let outcome = run_all(&api, &config).await?;
            let joined = outcome.lottery.joined + outcome.red_packet.joined;
            (outcome.follows, joined)
        }
    };

    Ok(DrawResponse {
        follows: follows.into_vec(),
        joined,
        ..Default::default()
    })
}

/// Load configuration suitable for Lambda environment.
fn load_lambda_config() -> Result<Config> {
    let mut config = match std::env::var("LIVE_DRAW_CONFIG") {
        Ok(path) => Config::load(path)?,
        Err(_) => Config::default(),
    };
    config.apply_env_overrides();
    config.validate()?;
    Ok(config)
}
