// src/services/rooms.rs

//! Room page fetching and badge partitioning.

use std::time::Duration;

use crate::api::LiveApi;
use crate::error::Result;
use crate::models::{Area, Badge, BadgeConfig, RoomListing};
use crate::utils::pause;

/// Rooms of one page split by promotional badge.
#[derive(Debug, Default)]
pub struct BadgePartition {
    pub lottery: Vec<RoomListing>,
    pub red_packet: Vec<RoomListing>,
}

impl BadgePartition {
    /// Keep only the rooms for `badge`.
    pub fn take(self, badge: Badge) -> Vec<RoomListing> {
        match badge {
            Badge::Lottery => self.lottery,
            Badge::RedPacket => self.red_packet,
        }
    }
}

/// Split rooms by their slot-"2" badge. Rooms without a known badge are dropped.
pub fn partition_by_badge(rooms: Vec<RoomListing>, markers: &BadgeConfig) -> BadgePartition {
    let mut partition = BadgePartition::default();
    for room in rooms {
        match room.badge(markers) {
            Some(Badge::Lottery) => partition.lottery.push(room),
            Some(Badge::RedPacket) => partition.red_packet.push(room),
            None => {}
        }
    }
    partition
}

/// Fetches room pages of a sub-category.
pub struct RoomLister<'a> {
    api: &'a dyn LiveApi,
    delay: Duration,
    markers: BadgeConfig,
}

impl<'a> RoomLister<'a> {
    /// `delay` is slept before every page request.
    pub fn new(api: &'a dyn LiveApi, delay: Duration, markers: BadgeConfig) -> Self {
        Self {
            api,
            delay,
            markers,
        }
    }

    /// Fetch one page and return the rooms carrying `badge`, in listing order.
    pub async fn fetch_page(
        &self,
        area: &Area,
        page: u32,
        badge: Badge,
    ) -> Result<Vec<RoomListing>> {
        pause(self.delay).await;

        let reply = self
            .api
            .fetch_room_page(&area.parent_id, &area.area_id, page)
            .await
            .inspect_err(|e| {
                log::error!(
                    "Failed to fetch rooms of area {}/{} page {}: {}",
                    area.parent_id,
                    area.area_id,
                    page,
                    e
                );
            })?;

        let rooms = reply
            .soft("fetch_room_page")
            .map(|p| p.list)
            .unwrap_or_default();

        Ok(partition_by_badge(rooms, &self.markers).take(badge))
    }
}
