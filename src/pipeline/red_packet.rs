// src/pipeline/red_packet.rs

//! Red-packet pipeline.

use super::sweep::{SweepOutcome, run_sweep};
use crate::api::LiveApi;
use crate::error::Result;
use crate::models::Config;
use crate::services::RedPacketHunter;

/// Sweep all categories for open red packets and join them.
///
/// Returns the room owners that must now be followed.
pub async fn run_red_packet(api: &dyn LiveApi, config: &Config) -> Result<SweepOutcome> {
    log::info!(
        "Starting red packet sweep ({} pages per sub-category)",
        config.red_packet.pages
    );

    let hunter = RedPacketHunter::new(
        api,
        config.red_packet.clone(),
        config.throttle.red_packet_check(),
        config.throttle.red_packet_join(),
    );
    run_sweep(api, config, &hunter).await
}
