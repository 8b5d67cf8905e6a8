//! Remote operations consumed from the live platform.
//!
//! - `LiveApi`: the seam the sweeps are written against
//! - `BiliLiveApi`: HTTP implementation over `reqwest`
//! - `Reply`: typed `{code, message, data}` outcome

mod bili;
mod envelope;
mod types;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;
use crate::models::LotteryDraw;

pub use bili::BiliLiveApi;
pub use envelope::{Envelope, Reply};
pub use types::{
    JoinLottery, JoinRedPacket, RawArea, RawAreaGroup, RedPacketInfo, RedPocket, RoomPage,
};

/// Operations the draw sweeps need from the platform.
///
/// `Err` means the call itself failed (network, HTTP status, decoding);
/// application-level failures arrive as [`Reply::Failed`].
#[async_trait]
pub trait LiveApi: Send + Sync {
    /// Fetch the nested category directory.
    async fn fetch_areas(&self) -> Result<Reply<Vec<RawAreaGroup>>>;

    /// Fetch one page of rooms in a sub-category. Pages start at 1.
    async fn fetch_room_page(
        &self,
        parent_id: &str,
        area_id: &str,
        page: u32,
    ) -> Result<Reply<RoomPage>>;

    /// Fetch the active lottery of a room; `None` data when there is none.
    async fn fetch_lottery(&self, room_id: u64) -> Result<Reply<LotteryDraw>>;

    async fn join_lottery(&self, request: &JoinLottery) -> Result<Reply<Value>>;

    /// Fetch red-packet info of a room.
    async fn fetch_red_packet(&self, room_id: u64) -> Result<Reply<RedPacketInfo>>;

    async fn join_red_packet(&self, request: &JoinRedPacket) -> Result<Reply<Value>>;
}
