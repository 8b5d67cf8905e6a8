// src/pipeline/all.rs

use crate::api::LiveApi;
use crate::error::Result;
use crate::models::{Config, FollowList, SweepStats};

use super::lottery::run_lottery;
use super::red_packet::run_red_packet;

/// Outcome of running both pipelines back to back.
#[derive(Debug, Clone)]
pub struct CombinedOutcome {
    /// Union of both follow lists, lottery first
    pub follows: FollowList,
    pub lottery: SweepStats,
    pub red_packet: SweepStats,
}

/// Run the lottery pipeline, then the red-packet pipeline.
pub async fn run_all(api: &dyn LiveApi, config: &Config) -> Result<CombinedOutcome> {
    log::info!("[STEP 1/2] Lottery moments");
    let lottery = run_lottery(api, config).await?;

    log::info!("[STEP 2/2] Red packets");
    let red_packet = run_red_packet(api, config).await?;

    let mut follows = lottery.follows;
    follows.merge(red_packet.follows);

    Ok(CombinedOutcome {
        follows,
        lottery: lottery.stats,
        red_packet: red_packet.stats,
    })
}
