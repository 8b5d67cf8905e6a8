// src/services/lottery.rs

//! Lottery moment eligibility checks and joins.

use std::time::Duration;

use async_trait::async_trait;

use super::{AwardFilter, RoomOutcome, RoomSweep, SkipReason, Verdict};
use crate::api::{JoinLottery, LiveApi, Reply};
use crate::error::Result;
use crate::models::{
    Badge, FollowList, FollowTarget, LOTTERY_STATUS_ENABLED, LotteryConfig, LotteryDraw,
    RequireType, RoomListing,
};
use crate::utils::pause;

/// Leading marker of a follow requirement text.
const FOLLOW_MARKER: &str = "关注主播";

/// Checks lottery rooms against the configured rules and joins eligible draws.
pub struct LotteryHunter<'a> {
    api: &'a dyn LiveApi,
    config: LotteryConfig,
    filter: AwardFilter,
    join_delay: Duration,
}

impl<'a> LotteryHunter<'a> {
    pub fn new(
        api: &'a dyn LiveApi,
        config: LotteryConfig,
        join_delay: Duration,
    ) -> Result<Self> {
        let filter = AwardFilter::from_config(&config)?;
        Ok(Self {
            api,
            config,
            filter,
            join_delay,
        })
    }

    /// Decide whether the room's draw should be joined.
    ///
    /// `Err` only for transport or decoding failures of the details request.
    pub async fn check_room(&self, room: &RoomListing) -> Result<Verdict<LotteryDraw>> {
        if self.config.blacklist.contains(&room.uid) {
            log::debug!("Room {} skipped: streamer {} blacklisted", room.room_id, room.uid);
            return Ok(Verdict::Skip(SkipReason::Blacklisted));
        }

        let reply = self.api.fetch_lottery(room.room_id).await?;
        let Some(draw) = reply.soft("fetch_lottery") else {
            return Ok(Verdict::Skip(SkipReason::NoActiveDraw));
        };

        let verdict = self.evaluate(draw);
        match &verdict {
            Verdict::Skip(SkipReason::Excluded) => {
                log::info!("Room {} skipped: award excluded by pattern", room.room_id);
            }
            Verdict::Skip(reason) => {
                log::debug!("Room {} skipped: {:?}", room.room_id, reason);
            }
            Verdict::Join(_) => {}
        }
        Ok(verdict)
    }

    /// Apply award, status, price and requirement rules to a draw.
    pub fn evaluate(&self, draw: LotteryDraw) -> Verdict<LotteryDraw> {
        if self.filter.is_excluded(&draw.award_name) {
            log::debug!("Award '{}' excluded", draw.award_name);
            return Verdict::Skip(SkipReason::Excluded);
        }
        if draw.status != LOTTERY_STATUS_ENABLED {
            return Verdict::Skip(SkipReason::Inactive);
        }
        if draw.gift_price > 0 {
            return Verdict::Skip(SkipReason::Paid);
        }

        match draw.require_type {
            RequireType::None | RequireType::Follow => Verdict::Join(draw),
            RequireType::Level if self.config.user_level >= draw.require_value => {
                Verdict::Join(draw)
            }
            _ => Verdict::Skip(SkipReason::Requirement),
        }
    }

    /// Join a draw. Returns `true` on success; failures are logged only.
    ///
    /// A successful follow-gated join records the streamer and any extra
    /// streamers named in the requirement text.
    pub async fn join(
        &self,
        room: &RoomListing,
        draw: &LotteryDraw,
        follows: &mut FollowList,
    ) -> bool {
        pause(self.join_delay).await;

        let request = JoinLottery {
            id: draw.id,
            gift_id: draw.gift_id,
            gift_num: draw.gift_num,
        };

        match self.api.join_lottery(&request).await {
            Ok(Reply::Ok(_)) => {
                log::info!(
                    "Joined lottery {} [{}] in room {} ({})",
                    draw.id,
                    draw.award_name,
                    room.room_id,
                    room.uname
                );
                if draw.require_type == RequireType::Follow {
                    follows.record(FollowTarget::Uid(room.uid));
                    for name in extra_follow_names(&draw.require_text) {
                        follows.record(FollowTarget::Name(name));
                    }
                }
                true
            }
            Ok(Reply::Failed { code, message, .. }) => {
                log::warn!(
                    "Lottery {} in room {} rejected with code {}: {}",
                    draw.id,
                    room.room_id,
                    code,
                    message
                );
                false
            }
            Err(e) => {
                log::warn!("Lottery {} in room {} join failed: {}", draw.id, room.room_id, e);
                false
            }
        }
    }
}

#[async_trait]
impl RoomSweep for LotteryHunter<'_> {
    fn name(&self) -> &'static str {
        "lottery"
    }

    fn badge(&self) -> Badge {
        Badge::Lottery
    }

    fn pages(&self) -> u32 {
        self.config.pages
    }

    async fn sweep_room(&self, room: &RoomListing, follows: &mut FollowList) -> RoomOutcome {
        match self.check_room(room).await {
            Ok(Verdict::Join(draw)) => {
                if self.join(room, &draw, follows).await {
                    RoomOutcome::Joined
                } else {
                    RoomOutcome::JoinFailed
                }
            }
            Ok(Verdict::Skip(reason)) => RoomOutcome::Skipped(reason),
            Err(e) => {
                log::warn!("Lottery check failed for room {}: {}", room.room_id, e);
                RoomOutcome::Failed
            }
        }
    }
}

/// Names of additional streamers in a follow requirement text.
///
/// The text reads `关注主播 A + B + C`; `A` is the room owner, already known by
/// uid, so only `B` and `C` are returned.
pub fn extra_follow_names(require_text: &str) -> Vec<String> {
    let text = require_text.trim();
    let names = text.strip_prefix(FOLLOW_MARKER).unwrap_or(text);

    names
        .split('+')
        .skip(1)
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(String::from)
        .collect()
}
