// src/services/red_packet.rs

//! Red-packet checks and joins.

use std::time::Duration;

use async_trait::async_trait;

use super::{RoomOutcome, RoomSweep, SkipReason, Verdict};
use crate::api::{JoinRedPacket, LiveApi, Reply};
use crate::models::{
    Badge, FollowList, FollowTarget, RED_PACKET_STATUS_CLOSED, RedPacketConfig, RedPacketHandle,
    RoomListing,
};
use crate::utils::pause;

/// Checks red-packet rooms for an open packet and joins it.
pub struct RedPacketHunter<'a> {
    api: &'a dyn LiveApi,
    config: RedPacketConfig,
    check_delay: Duration,
    join_delay: Duration,
}

impl<'a> RedPacketHunter<'a> {
    pub fn new(
        api: &'a dyn LiveApi,
        config: RedPacketConfig,
        check_delay: Duration,
        join_delay: Duration,
    ) -> Self {
        Self {
            api,
            config,
            check_delay,
            join_delay,
        }
    }

    /// Resolve the room's first red packet, if one is open.
    ///
    /// Any failure of the lookup counts as "no red packet".
    pub async fn check_room(&self, room: &RoomListing) -> Verdict<RedPacketHandle> {
        pause(self.check_delay).await;

        let info = match self.api.fetch_red_packet(room.room_id).await {
            Ok(reply) => reply.soft("fetch_red_packet"),
            Err(e) => {
                log::warn!(
                    "Red packet lookup failed for room {}, treating as absent: {}",
                    room.room_id,
                    e
                );
                None
            }
        };

        let Some(pocket) = info
            .and_then(|i| i.popularity_red_pocket)
            .and_then(|list| list.into_iter().next())
        else {
            return Verdict::Skip(SkipReason::NoActiveDraw);
        };

        if pocket.lot_status == RED_PACKET_STATUS_CLOSED {
            log::debug!("Red packet {} in room {} closed", pocket.lot_id, room.room_id);
            return Verdict::Skip(SkipReason::Closed);
        }

        Verdict::Join(RedPacketHandle {
            lot_id: pocket.lot_id,
            room_id: room.room_id,
            uid: room.uid,
            uname: room.uname.clone(),
        })
    }

    /// Join a red packet, recording the room owner on success.
    pub async fn join(&self, handle: &RedPacketHandle, follows: &mut FollowList) -> bool {
        pause(self.join_delay).await;

        let request = JoinRedPacket {
            room_id: handle.room_id,
            lot_id: handle.lot_id,
            ruid: handle.uid,
        };

        match self.api.join_red_packet(&request).await {
            Ok(Reply::Ok(_)) => {
                log::info!(
                    "Joined red packet {} in room {} ({})",
                    handle.lot_id,
                    handle.room_id,
                    handle.uname
                );
                follows.record(FollowTarget::Uid(handle.uid));
                true
            }
            Ok(Reply::Failed { code, message, .. }) => {
                log::warn!(
                    "Red packet {} in room {} rejected with code {}: {}",
                    handle.lot_id,
                    handle.room_id,
                    code,
                    message
                );
                false
            }
            Err(e) => {
                log::warn!(
                    "Red packet {} in room {} join failed: {}",
                    handle.lot_id,
                    handle.room_id,
                    e
                );
                false
            }
        }
    }
}

#[async_trait]
impl RoomSweep for RedPacketHunter<'_> {
    fn name(&self) -> &'static str {
        "red packet"
    }

    fn badge(&self) -> Badge {
        Badge::RedPacket
    }

    fn pages(&self) -> u32 {
        self.config.pages
    }

    async fn sweep_room(&self, room: &RoomListing, follows: &mut FollowList) -> RoomOutcome {
        match self.check_room(room).await {
            Verdict::Join(handle) => {
                if self.join(&handle, follows).await {
                    RoomOutcome::Joined
                } else {
                    RoomOutcome::JoinFailed
                }
            }
            Verdict::Skip(reason) => RoomOutcome::Skipped(reason),
        }
    }
}
