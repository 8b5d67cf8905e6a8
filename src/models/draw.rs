// src/models/draw.rs

//! Draw details for lottery moments and red packets.

use serde::{Deserialize, Serialize};

/// Lottery status code for a draw that is currently open.
pub const LOTTERY_STATUS_ENABLED: i64 = 1;

/// Red-packet status code for a draw that no longer accepts entries.
pub const RED_PACKET_STATUS_CLOSED: i64 = 2;

/// Details of an active lottery moment in a room.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LotteryDraw {
    pub id: u64,
    #[serde(default)]
    pub gift_id: u64,
    #[serde(default)]
    pub gift_num: u64,
    #[serde(default)]
    pub award_name: String,
    #[serde(default)]
    pub status: i64,
    /// Price of the gift a viewer must send to enter; zero for free draws
    #[serde(default)]
    pub gift_price: u64,
    #[serde(default)]
    pub require_type: RequireType,
    #[serde(default)]
    pub require_value: u64,
    #[serde(default)]
    pub require_text: String,
}

/// Eligibility condition attached to a lottery draw.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "i64", into = "i64")]
pub enum RequireType {
    #[default]
    None,
    Follow,
    Medal,
    Guard,
    LiveLevel,
    /// Main-site account level
    Level,
    Other(i64),
}

impl From<i64> for RequireType {
    fn from(code: i64) -> Self {
        match code {
            0 => RequireType::None,
            1 => RequireType::Follow,
            2 => RequireType::Medal,
            3 => RequireType::Guard,
            4 => RequireType::LiveLevel,
            5 => RequireType::Level,
            other => RequireType::Other(other),
        }
    }
}

impl From<RequireType> for i64 {
    fn from(kind: RequireType) -> Self {
        match kind {
            RequireType::None => 0,
            RequireType::Follow => 1,
            RequireType::Medal => 2,
            RequireType::Guard => 3,
            RequireType::LiveLevel => 4,
            RequireType::Level => 5,
            RequireType::Other(code) => code,
        }
    }
}

/// An open red packet resolved for a specific room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedPacketHandle {
    pub lot_id: u64,
    pub room_id: u64,
    /// Room owner uid
    pub uid: u64,
    pub uname: String,
}
