//! Shared fixtures for pipeline integration tests.

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tokio::time::Instant;

use live_draw::api::{
    JoinLottery, JoinRedPacket, LiveApi, RawArea, RawAreaGroup, RedPacketInfo, RedPocket, Reply,
    RoomPage,
};
use live_draw::error::{AppError, Result};
use live_draw::models::{
    BadgeConfig, Config, LOTTERY_STATUS_ENABLED, LotteryDraw, Pendant, RequireType, RoomListing,
    ThrottleConfig,
};

/// A remote call seen by [`FakeLiveApi`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Areas,
    RoomPage { area_id: String, page: u32 },
    Lottery(u64),
    JoinLottery(JoinLottery),
    RedPacket(u64),
    JoinRedPacket(JoinRedPacket),
}

/// In-memory `LiveApi` that serves canned data and records every call.
#[derive(Default)]
pub struct FakeLiveApi {
    areas: Vec<RawAreaGroup>,
    areas_code: i64,
    areas_error: bool,
    pages: HashMap<(String, u32), Vec<RoomListing>>,
    page_codes: HashMap<(String, u32), i64>,
    page_errors: HashSet<(String, u32)>,
    lotteries: HashMap<u64, LotteryDraw>,
    lottery_codes: HashMap<u64, i64>,
    lottery_errors: HashSet<u64>,
    red_packets: HashMap<u64, Vec<RedPocket>>,
    red_packet_codes: HashMap<u64, i64>,
    red_packet_errors: HashSet<u64>,
    join_code: i64,
    join_errors: Mutex<usize>,
    calls: Mutex<Vec<(Instant, Call)>>,
}

impl FakeLiveApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a sub-category, creating its parent group on first use.
    pub fn with_area(mut self, parent_id: &str, area_id: &str) -> Self {
        let area = RawArea {
            id: area_id.to_string(),
            parent_id: parent_id.to_string(),
            name: format!("area-{area_id}"),
        };
        match self.areas.iter_mut().find(|g| g.id == parent_id) {
            Some(group) => group.list.push(area),
            None => self.areas.push(RawAreaGroup {
                id: parent_id.to_string(),
                name: format!("group-{parent_id}"),
                list: vec![area],
            }),
        }
        self
    }

    pub fn with_areas_code(mut self, code: i64) -> Self {
        self.areas_code = code;
        self
    }

    pub fn with_areas_error(mut self) -> Self {
        self.areas_error = true;
        self
    }

    pub fn with_page(mut self, area_id: &str, page: u32, rooms: Vec<RoomListing>) -> Self {
        self.pages.insert((area_id.to_string(), page), rooms);
        self
    }

    /// Serve the page's rooms under a non-zero code.
    pub fn with_page_code(mut self, area_id: &str, page: u32, code: i64) -> Self {
        self.page_codes.insert((area_id.to_string(), page), code);
        self
    }

    pub fn with_page_error(mut self, area_id: &str, page: u32) -> Self {
        self.page_errors.insert((area_id.to_string(), page));
        self
    }

    pub fn with_lottery(mut self, room_id: u64, draw: LotteryDraw) -> Self {
        self.lotteries.insert(room_id, draw);
        self
    }

    /// Answer the room's draw lookup with a non-zero code and no data.
    pub fn with_lottery_code(mut self, room_id: u64, code: i64) -> Self {
        self.lottery_codes.insert(room_id, code);
        self
    }

    pub fn with_lottery_error(mut self, room_id: u64) -> Self {
        self.lottery_errors.insert(room_id);
        self
    }

    pub fn with_red_packet(mut self, room_id: u64, lot_id: u64, lot_status: i64) -> Self {
        self.red_packets.entry(room_id).or_default().push(RedPocket {
            lot_id,
            lot_status,
            total_price: 1600,
        });
        self
    }

    pub fn with_empty_red_packets(mut self, room_id: u64) -> Self {
        self.red_packets.insert(room_id, Vec::new());
        self
    }

    /// Answer the room's red-packet lookup with a non-zero code and no data.
    pub fn with_red_packet_code(mut self, room_id: u64, code: i64) -> Self {
        self.red_packet_codes.insert(room_id, code);
        self
    }

    pub fn with_red_packet_error(mut self, room_id: u64) -> Self {
        self.red_packet_errors.insert(room_id);
        self
    }

    /// Code returned by both join endpoints.
    pub fn with_join_code(mut self, code: i64) -> Self {
        self.join_code = code;
        self
    }

    /// The first `count` join calls, of either kind, fail in transport.
    pub fn with_join_errors(self, count: usize) -> Self {
        *self.join_errors.lock().unwrap() = count;
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().iter().map(|(_, c)| c.clone()).collect()
    }

    /// Each call with the time elapsed since the previous one.
    pub fn gaps(&self) -> Vec<(Duration, Call)> {
        let calls = self.calls.lock().unwrap();
        let mut previous = calls.first().map(|(at, _)| *at);
        calls
            .iter()
            .map(|(at, call)| {
                let gap = previous.map(|p| *at - p).unwrap_or_default();
                previous = Some(*at);
                (gap, call.clone())
            })
            .collect()
    }

    pub fn count(&self, matches: impl Fn(&Call) -> bool) -> usize {
        self.calls().iter().filter(|c| matches(c)).count()
    }

    pub fn page_fetches(&self) -> usize {
        self.count(|c| matches!(c, Call::RoomPage { .. }))
    }

    pub fn lottery_joins(&self) -> usize {
        self.count(|c| matches!(c, Call::JoinLottery(_)))
    }

    pub fn red_packet_joins(&self) -> usize {
        self.count(|c| matches!(c, Call::JoinRedPacket(_)))
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push((Instant::now(), call));
    }

    fn join_reply(&self, op: &str) -> Result<Reply<Value>> {
        let mut remaining = self.join_errors.lock().unwrap();
        if *remaining > 0 {
            *remaining -= 1;
            return Err(AppError::api(op, "connection reset"));
        }
        if self.join_code == 0 {
            Ok(Reply::ok(Value::Null))
        } else {
            Ok(Reply::failed(self.join_code, "rejected"))
        }
    }
}

#[async_trait]
impl LiveApi for FakeLiveApi {
    async fn fetch_areas(&self) -> Result<Reply<Vec<RawAreaGroup>>> {
        self.record(Call::Areas);
        if self.areas_error {
            return Err(AppError::api("fetch_areas", "connection reset"));
        }
        if self.areas_code != 0 {
            return Ok(Reply::Failed {
                code: self.areas_code,
                message: "degraded".to_string(),
                data: Some(self.areas.clone()),
            });
        }
        Ok(Reply::ok(self.areas.clone()))
    }

    async fn fetch_room_page(
        &self,
        _parent_id: &str,
        area_id: &str,
        page: u32,
    ) -> Result<Reply<RoomPage>> {
        self.record(Call::RoomPage {
            area_id: area_id.to_string(),
            page,
        });
        let key = (area_id.to_string(), page);
        if self.page_errors.contains(&key) {
            return Err(AppError::api("fetch_room_page", "timeout"));
        }
        let list = self.pages.get(&key).cloned().unwrap_or_default();
        Ok(match self.page_codes.get(&key) {
            Some(&code) => Reply::Failed {
                code,
                message: "partial".to_string(),
                data: Some(RoomPage { list }),
            },
            None => Reply::ok(RoomPage { list }),
        })
    }

    async fn fetch_lottery(&self, room_id: u64) -> Result<Reply<LotteryDraw>> {
        self.record(Call::Lottery(room_id));
        if self.lottery_errors.contains(&room_id) {
            return Err(AppError::api("fetch_lottery", "invalid JSON"));
        }
        if let Some(&code) = self.lottery_codes.get(&room_id) {
            return Ok(Reply::failed(code, "no lottery"));
        }
        Ok(match self.lotteries.get(&room_id) {
            Some(draw) => Reply::ok(draw.clone()),
            None => Reply::empty(),
        })
    }

    async fn join_lottery(&self, request: &JoinLottery) -> Result<Reply<Value>> {
        self.record(Call::JoinLottery(request.clone()));
        self.join_reply("join_lottery")
    }

    async fn fetch_red_packet(&self, room_id: u64) -> Result<Reply<RedPacketInfo>> {
        self.record(Call::RedPacket(room_id));
        if self.red_packet_errors.contains(&room_id) {
            return Err(AppError::api("fetch_red_packet", "timeout"));
        }
        if let Some(&code) = self.red_packet_codes.get(&room_id) {
            return Ok(Reply::failed(code, "no red packet"));
        }
        Ok(Reply::ok(RedPacketInfo {
            popularity_red_pocket: self.red_packets.get(&room_id).cloned(),
        }))
    }

    async fn join_red_packet(&self, request: &JoinRedPacket) -> Result<Reply<Value>> {
        self.record(Call::JoinRedPacket(request.clone()));
        self.join_reply("join_red_packet")
    }
}

/// Config with no delays and the given award patterns.
pub fn test_config() -> Config {
    let mut config = Config::default();
    config.throttle = ThrottleConfig::none();
    config.lottery.exclude_patterns = vec!["测试".to_string()];
    config.lottery.include_patterns = vec!["测试奖".to_string()];
    config
}

fn room_with_pendant(room_id: u64, uid: u64, pendent_id: Option<i64>) -> RoomListing {
    let mut pendants = HashMap::new();
    if let Some(pendent_id) = pendent_id {
        pendants.insert(
            "2".to_string(),
            Pendant {
                pendent_id,
                content: String::new(),
            },
        );
    }
    RoomListing {
        room_id,
        uid,
        uname: format!("host{uid}"),
        pendants,
    }
}

pub fn lottery_room(room_id: u64, uid: u64) -> RoomListing {
    room_with_pendant(room_id, uid, Some(BadgeConfig::default().lottery_pendant_id))
}

pub fn red_packet_room(room_id: u64, uid: u64) -> RoomListing {
    room_with_pendant(room_id, uid, Some(BadgeConfig::default().red_packet_pendant_id))
}

pub fn plain_room(room_id: u64, uid: u64) -> RoomListing {
    room_with_pendant(room_id, uid, None)
}

/// An open, free draw with no requirement.
pub fn free_draw(id: u64) -> LotteryDraw {
    LotteryDraw {
        id,
        gift_id: 0,
        gift_num: 1,
        award_name: "小电视".to_string(),
        status: LOTTERY_STATUS_ENABLED,
        gift_price: 0,
        require_type: RequireType::None,
        require_value: 0,
        require_text: String::new(),
    }
}

/// An open, free draw gated on following the streamer(s) in `require_text`.
pub fn follow_draw(id: u64, require_text: &str) -> LotteryDraw {
    LotteryDraw {
        require_type: RequireType::Follow,
        require_text: require_text.to_string(),
        ..free_draw(id)
    }
}
