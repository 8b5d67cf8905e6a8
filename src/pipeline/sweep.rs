// src/pipeline/sweep.rs

//! Area/page walk shared by both draw pipelines.

use crate::api::LiveApi;
use crate::error::Result;
use crate::models::{AreaGroup, Config, FollowList, SweepStats};
use crate::services::{AreaDirectory, RoomLister, RoomOutcome, RoomSweep};

/// Result of one pipeline run.
#[derive(Debug, Clone)]
pub struct SweepOutcome {
    /// Streamers to newly follow, deduplicated, in join order
    pub follows: FollowList,
    pub stats: SweepStats,
}

/// Walk every sub-category and page, handing badge rooms to `sweep`.
///
/// Order is categories, then sub-categories, then pages ascending, then
/// rooms in listing order. Only the category fetch can fail the run; a page
/// that fails to load is skipped.
pub async fn run_sweep(
    api: &dyn LiveApi,
    config: &Config,
    sweep: &dyn RoomSweep,
) -> Result<SweepOutcome> {
    let mut follows = FollowList::new();
    let mut stats = SweepStats::start();

    let groups = AreaDirectory::new(api).fetch().await?;
    log::info!(
        "Loaded {} categories with {} sub-categories",
        groups.len(),
        AreaGroup::area_count(&groups)
    );

    let lister = RoomLister::new(api, config.throttle.room_page(), config.badges.clone());

    for group in &groups {
        log::debug!("Sweeping category {} ({})", group.name, group.id);

        for area in &group.areas {
            stats.areas += 1;

            for page in 1..=sweep.pages() {
                let Ok(rooms) = lister.fetch_page(area, page, sweep.badge()).await else {
                    continue;
                };
                stats.pages += 1;

                if !rooms.is_empty() {
                    log::debug!(
                        "Area {} page {}: {} {} rooms",
                        area.area_id,
                        page,
                        rooms.len(),
                        sweep.name()
                    );
                }

                for room in &rooms {
                    stats.rooms += 1;
                    match sweep.sweep_room(room, &mut follows).await {
                        RoomOutcome::Joined => {
                            stats.candidates += 1;
                            stats.joined += 1;
                        }
                        RoomOutcome::JoinFailed => {
                            stats.candidates += 1;
                            stats.failed += 1;
                        }
                        RoomOutcome::Skipped(_) => stats.skipped += 1,
                        RoomOutcome::Failed => stats.failed += 1,
                    }
                }
            }
        }
    }

    stats.finish();
    let outcome = SweepOutcome { follows, stats };
    outcome.log_summary(sweep.name());
    Ok(outcome)
}

impl SweepOutcome {
    /// Log run counters at info level.
    pub fn log_summary(&self, name: &str) {
        let s = &self.stats;
        log::info!("[SUMMARY] {} sweep", name);
        log::info!("    Sub-categories: {}", s.areas);
        log::info!("    Pages: {}", s.pages);
        log::info!("    Rooms: {}", s.rooms);
        log::info!(
            "    Candidates: {} (joined {}, skipped {}, failed {})",
            s.candidates,
            s.joined,
            s.skipped,
            s.failed
        );
        log::info!("    New follows: {}", self.follows.len());
        if let Some(ms) = s.elapsed_ms() {
            log::info!("    Elapsed: {}ms", ms);
        }
    }
}
