// src/models/room.rs

//! Room listing entries and their promotional badges.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::models::BadgeConfig;

/// Pendant slot that carries the promotional badge.
const PROMO_SLOT: &str = "2";

/// A room's public listing entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoomListing {
    /// Live room id
    #[serde(rename = "roomid")]
    pub room_id: u64,

    /// Streamer uid
    pub uid: u64,

    /// Streamer display name
    #[serde(default)]
    pub uname: String,

    /// Badge info keyed by slot ("1", "2", ...)
    #[serde(default, rename = "pendant_info")]
    pub pendants: HashMap<String, Pendant>,
}

/// A single badge attached to a room listing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Pendant {
    #[serde(default)]
    pub pendent_id: i64,
    #[serde(default)]
    pub content: String,
}

/// Kind of promotional event advertised by a room.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Badge {
    /// Time-gated lottery (天选时刻)
    Lottery,
    /// Crowd-funded red packet
    RedPacket,
}

impl RoomListing {
    /// Resolve the promotional badge in slot "2" against the configured markers.
    pub fn badge(&self, markers: &BadgeConfig) -> Option<Badge> {
        let pendant = self.pendants.get(PROMO_SLOT)?;
        if pendant.pendent_id == markers.lottery_pendant_id {
            Some(Badge::Lottery)
        } else if pendant.pendent_id == markers.red_packet_pendant_id {
            Some(Badge::RedPacket)
        } else {
            None
        }
    }
}
