// src/api/types.rs

//! Payloads exchanged with the live platform.

use serde::{Deserialize, Deserializer, Serialize};

use crate::models::RoomListing;

/// Major category entry from the area directory.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawAreaGroup {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub list: Vec<RawArea>,
}

/// Sub-category entry nested in a [`RawAreaGroup`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawArea {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    #[serde(deserialize_with = "id_string")]
    pub parent_id: String,
    #[serde(default)]
    pub name: String,
}

/// One page of rooms in a sub-category.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RoomPage {
    #[serde(default)]
    pub list: Vec<RoomListing>,
}

/// Lottery info for a room, of which only the red packets are used.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RedPacketInfo {
    #[serde(default)]
    pub popularity_red_pocket: Option<Vec<RedPocket>>,
}

/// A red packet attached to a room.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RedPocket {
    pub lot_id: u64,
    #[serde(default)]
    pub lot_status: i64,
    #[serde(default)]
    pub total_price: u64,
}

/// Lottery join request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JoinLottery {
    pub id: u64,
    pub gift_id: u64,
    pub gift_num: u64,
}

/// Red-packet join request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JoinRedPacket {
    pub room_id: u64,
    pub lot_id: u64,
    /// Room owner uid
    pub ruid: u64,
}

/// Accept ids sent either as numbers or strings.
fn id_string<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Num(i64),
        Str(String),
    }

    Ok(match Id::deserialize(deserializer)? {
        Id::Num(n) => n.to_string(),
        Id::Str(s) => s,
    })
}
