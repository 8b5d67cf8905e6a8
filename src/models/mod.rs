// src/models/mod.rs

//! Domain models for the draw sweeper.
//!
//! This module contains all data structures used throughout the application,
//! organized by their primary purpose.

mod area;
mod config;
mod draw;
mod follow;
mod room;
mod stats;

// Re-export all public types
pub use area::{Area, AreaGroup};
pub use config::{
    BadgeConfig, Config, HttpConfig, LotteryConfig, RedPacketConfig, ThrottleConfig,
};
pub use draw::{
    LOTTERY_STATUS_ENABLED, LotteryDraw, RED_PACKET_STATUS_CLOSED, RedPacketHandle, RequireType,
};
pub use follow::{FollowList, FollowTarget};
pub use room::{Badge, Pendant, RoomListing};
pub use stats::SweepStats;
