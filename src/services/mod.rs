//! Service layer for the draw sweeper.
//!
//! This module contains the business logic for:
//! - Category discovery (`AreaDirectory`)
//! - Room page fetching and badge partitioning (`RoomLister`)
//! - Award name rules (`AwardFilter`)
//! - Lottery moment checks and joins (`LotteryHunter`)
//! - Red-packet checks and joins (`RedPacketHunter`)

mod areas;
mod filter;
mod lottery;
mod red_packet;
mod rooms;

use async_trait::async_trait;

use crate::models::{Badge, FollowList, RoomListing};

pub use areas::{AreaDirectory, into_area_groups};
pub use filter::AwardFilter;
pub use lottery::{LotteryHunter, extra_follow_names};
pub use red_packet::RedPacketHunter;
pub use rooms::{BadgePartition, RoomLister, partition_by_badge};

/// Decision for a single room.
#[derive(Debug, Clone, PartialEq)]
pub enum Verdict<T> {
    /// Eligible; join with the resolved draw.
    Join(T),
    Skip(SkipReason),
}

/// Why a room was passed over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    Blacklisted,
    NoActiveDraw,
    Excluded,
    Inactive,
    Paid,
    Requirement,
    Closed,
}

/// What happened to one room during a sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoomOutcome {
    Joined,
    JoinFailed,
    Skipped(SkipReason),
    /// The check itself errored
    Failed,
}

/// Per-room check-and-join step of one pipeline.
#[async_trait]
pub trait RoomSweep: Send + Sync {
    /// Human-readable pipeline name for logs.
    fn name(&self) -> &'static str;

    /// Badge a room must carry to be swept.
    fn badge(&self) -> Badge;

    /// Pages to scan per sub-category.
    fn pages(&self) -> u32;

    /// Check one room and join its draw if eligible.
    ///
    /// Errors never escape; they are logged and reported as an outcome.
    async fn sweep_room(&self, room: &RoomListing, follows: &mut FollowList) -> RoomOutcome;
}
