// src/pipeline/lottery.rs

//! Lottery moment pipeline.

use super::sweep::{SweepOutcome, run_sweep};
use crate::api::LiveApi;
use crate::error::Result;
use crate::models::Config;
use crate::services::LotteryHunter;

/// Sweep all categories for lottery moments and join the eligible ones.
///
/// Returns the streamers that must now be followed.
pub async fn run_lottery(api: &dyn LiveApi, config: &Config) -> Result<SweepOutcome> {
    log::info!(
        "Starting lottery sweep ({} pages per sub-category)",
        config.lottery.pages
    );

    let hunter = LotteryHunter::new(api, config.lottery.clone(), config.throttle.lottery_join())?;
    run_sweep(api, config, &hunter).await
}
