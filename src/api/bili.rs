// src/api/bili.rs

//! `LiveApi` over the platform's public HTTP endpoints.

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use url::Url;

use super::{
    Envelope, JoinLottery, JoinRedPacket, LiveApi, RawAreaGroup, RedPacketInfo, Reply, RoomPage,
};
use crate::error::{AppError, Result};
use crate::models::{HttpConfig, LotteryDraw};
use crate::utils::http::{create_async_client, csrf_from_cookie};

// Relative to `http.base_url`, so a base with a path prefix is kept.
const AREA_LIST: &str = "room/v1/Area/getList";
const ROOM_LIST: &str = "xlive/web-interface/v1/second/getList";
const LOTTERY_CHECK: &str = "xlive/lottery-interface/v1/Anchor/Check";
const LOTTERY_JOIN: &str = "xlive/lottery-interface/v1/Anchor/Join";
const RED_PACKET_INFO: &str = "xlive/lottery-interface/v1/lottery/getLotteryInfoWeb";
const RED_PACKET_DRAW: &str = "xlive/lottery-interface/v1/popularityRedPocket/RedPocketDraw";

/// Spm id the web player reports when a red packet is opened.
const RED_PACKET_SPM: &str = "444.8.red_envelope.extract";

/// HTTP client for the live platform.
pub struct BiliLiveApi {
    client: Client,
    base: Url,
    csrf: String,
}

impl BiliLiveApi {
    /// Build a client from HTTP settings.
    ///
    /// A missing `bili_jct` in the cookie only logs a warning; read endpoints
    /// still work but joins will be refused by the platform.
    pub fn new(config: &HttpConfig) -> Result<Self> {
        let client = create_async_client(config)?;
        let base = base_url(&config.base_url)?;
        let csrf = csrf_from_cookie(&config.cookie).unwrap_or_else(|| {
            log::warn!("No bili_jct in http.cookie; join requests will be rejected");
            String::new()
        });

        Ok(Self { client, base, csrf })
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        Ok(self.base.join(path)?)
    }

    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<Reply<T>> {
        let response = self
            .client
            .get(self.endpoint(path)?)
            .query(query)
            .send()
            .await?;
        decode(path, response).await
    }

    async fn post_form<T: DeserializeOwned>(
        &self,
        path: &str,
        mut form: Vec<(&str, String)>,
    ) -> Result<Reply<T>> {
        form.push(("csrf", self.csrf.clone()));
        form.push(("csrf_token", self.csrf.clone()));

        let response = self
            .client
            .post(self.endpoint(path)?)
            .form(&form)
            .send()
            .await?;
        decode(path, response).await
    }
}

/// Parse the configured base, forcing a trailing slash so endpoints join under it.
fn base_url(raw: &str) -> Result<Url> {
    if raw.ends_with('/') {
        Ok(Url::parse(raw)?)
    } else {
        Ok(Url::parse(&format!("{raw}/"))?)
    }
}

/// Reject non-2xx statuses, tagging the error with the endpoint.
fn ensure_success(path: &str, status: StatusCode) -> Result<()> {
    if status.is_success() {
        Ok(())
    } else {
        Err(AppError::api(path, format!("HTTP status {status}")))
    }
}

async fn decode<T: DeserializeOwned>(path: &str, response: Response) -> Result<Reply<T>> {
    ensure_success(path, response.status())?;
    let envelope: Envelope<T> = response.json().await?;
    Ok(envelope.into())
}

#[async_trait]
impl LiveApi for BiliLiveApi {
    async fn fetch_areas(&self) -> Result<Reply<Vec<RawAreaGroup>>> {
        self.get(AREA_LIST, &[]).await
    }

    async fn fetch_room_page(
        &self,
        parent_id: &str,
        area_id: &str,
        page: u32,
    ) -> Result<Reply<RoomPage>> {
        self.get(
            ROOM_LIST,
            &[
                ("platform", "web".to_string()),
                ("parent_area_id", parent_id.to_string()),
                ("area_id", area_id.to_string()),
                ("sort_type", String::new()),
                ("page", page.to_string()),
            ],
        )
        .await
    }

    async fn fetch_lottery(&self, room_id: u64) -> Result<Reply<LotteryDraw>> {
        self.get(LOTTERY_CHECK, &[("roomid", room_id.to_string())])
            .await
    }

    async fn join_lottery(&self, request: &JoinLottery) -> Result<Reply<Value>> {
        self.post_form(
            LOTTERY_JOIN,
            vec![
                ("id", request.id.to_string()),
                ("gift_id", request.gift_id.to_string()),
                ("gift_num", request.gift_num.to_string()),
                ("platform", "pc".to_string()),
            ],
        )
        .await
    }

    async fn fetch_red_packet(&self, room_id: u64) -> Result<Reply<RedPacketInfo>> {
        self.get(RED_PACKET_INFO, &[("roomid", room_id.to_string())])
            .await
    }

    async fn join_red_packet(&self, request: &JoinRedPacket) -> Result<Reply<Value>> {
        self.post_form(
            RED_PACKET_DRAW,
            vec![
                ("ruid", request.ruid.to_string()),
                ("room_id", request.room_id.to_string()),
                ("lot_id", request.lot_id.to_string()),
                ("spm_id", RED_PACKET_SPM.to_string()),
                ("jump_from", String::new()),
                ("session_id", String::new()),
            ],
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_joins_base() {
        let api = BiliLiveApi::new(&HttpConfig::default()).unwrap();
        assert_eq!(
            api.endpoint(AREA_LIST).unwrap().as_str(),
            "https://api.live.bilibili.com/room/v1/Area/getList"
        );
    }

    #[test]
    fn test_endpoint_keeps_base_path() {
        for base in ["http://127.0.0.1:9000/mock", "http://127.0.0.1:9000/mock/"] {
            let config = HttpConfig {
                base_url: base.to_string(),
                ..HttpConfig::default()
            };
            let api = BiliLiveApi::new(&config).unwrap();
            assert_eq!(
                api.endpoint(LOTTERY_JOIN).unwrap().as_str(),
                "http://127.0.0.1:9000/mock/xlive/lottery-interface/v1/Anchor/Join"
            );
        }
    }

    #[test]
    fn test_error_status_names_endpoint() {
        assert!(ensure_success(AREA_LIST, StatusCode::OK).is_ok());

        let err = ensure_success(AREA_LIST, StatusCode::PRECONDITION_FAILED).unwrap_err();
        assert!(matches!(err, AppError::Api { ref op, .. } if op == AREA_LIST));
        assert!(err.to_string().contains("412"));
    }

    #[test]
    fn test_csrf_taken_from_cookie() {
        let config = HttpConfig {
            cookie: "SESSDATA=s; bili_jct=token".to_string(),
            ..HttpConfig::default()
        };
        let api = BiliLiveApi::new(&config).unwrap();
        assert_eq!(api.csrf, "token");
    }

    #[test]
    fn test_invalid_base_url() {
        let config = HttpConfig {
            base_url: "not a url".to_string(),
            ..HttpConfig::default()
        };
        assert!(BiliLiveApi::new(&config).is_err());
    }

    #[tokio::test]
    #[ignore = "requires network access"]
    async fn test_fetch_areas_real_api() {
        let api = BiliLiveApi::new(&HttpConfig::default()).unwrap();
        let reply = api.fetch_areas().await.unwrap();
        assert!(reply.is_ok());
        assert!(!reply.into_data().unwrap_or_default().is_empty());
    }
}
