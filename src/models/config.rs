//! Application configuration structures.

use std::fs;
use std::path::Path;
use std::time::Duration;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// HTTP client and session settings
    #[serde(default)]
    pub http: HttpConfig,

    /// Fixed delays between outbound requests
    #[serde(default)]
    pub throttle: ThrottleConfig,

    /// Badge markers identifying promotional rooms
    #[serde(default)]
    pub badges: BadgeConfig,

    /// Lottery moment filtering rules
    #[serde(default)]
    pub lottery: LotteryConfig,

    /// Red-packet sweep settings
    #[serde(default)]
    pub red_packet: RedPacketConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Override settings from the process environment.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Override settings from a key lookup. Unparseable values are ignored.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(cookie) = lookup("LIVE_DRAW_COOKIE") {
            self.http.cookie = cookie;
        }

        if let Some(secs) = lookup("LIVE_DRAW_TIMEOUT_SECS").and_then(|v| v.parse().ok()) {
            self.http.timeout_secs = secs;
        }

        if let Some(pages) = lookup("LIVE_DRAW_PAGES").and_then(|v| v.parse().ok()) {
            self.lottery.pages = pages;
            self.red_packet.pages = pages;
        }

        if let Some(level) = lookup("LIVE_DRAW_USER_LEVEL").and_then(|v| v.parse().ok()) {
            self.lottery.user_level = level;
        }
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.http.user_agent.trim().is_empty() {
            return Err(AppError::validation("http.user_agent is empty"));
        }
        if self.http.timeout_secs == 0 {
            return Err(AppError::validation("http.timeout_secs must be > 0"));
        }
        if self.lottery.pages == 0 {
            return Err(AppError::validation("lottery.pages must be > 0"));
        }
        if self.red_packet.pages == 0 {
            return Err(AppError::validation("red_packet.pages must be > 0"));
        }
        if self.badges.lottery_pendant_id == self.badges.red_packet_pendant_id {
            return Err(AppError::validation(
                "badges.lottery_pendant_id and badges.red_packet_pendant_id must differ",
            ));
        }
        for pattern in self
            .lottery
            .include_patterns
            .iter()
            .chain(&self.lottery.exclude_patterns)
        {
            Regex::new(pattern).map_err(|e| AppError::pattern(pattern, e))?;
        }
        Ok(())
    }
}

/// HTTP client and session settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Root of the live platform API
    #[serde(default = "defaults::base_url")]
    pub base_url: String,

    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,

    /// Session cookie sent verbatim; its `bili_jct` value is the csrf token
    #[serde(default)]
    pub cookie: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::base_url(),
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
            cookie: String::new(),
        }
    }
}

/// Fixed delays between outbound requests, in milliseconds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThrottleConfig {
    /// Before each room page fetch
    #[serde(default = "defaults::room_page_delay")]
    pub room_page_ms: u64,

    /// Before each lottery join
    #[serde(default = "defaults::lottery_join_delay")]
    pub lottery_join_ms: u64,

    /// Before each red-packet existence check
    #[serde(default = "defaults::red_packet_check_delay")]
    pub red_packet_check_ms: u64,

    /// Before each red-packet join
    #[serde(default = "defaults::red_packet_join_delay")]
    pub red_packet_join_ms: u64,
}

impl ThrottleConfig {
    /// All delays set to zero.
    pub fn none() -> Self {
        Self {
            room_page_ms: 0,
            lottery_join_ms: 0,
            red_packet_check_ms: 0,
            red_packet_join_ms: 0,
        }
    }

    pub fn room_page(&self) -> Duration {
        Duration::from_millis(self.room_page_ms)
    }

    pub fn lottery_join(&self) -> Duration {
        Duration::from_millis(self.lottery_join_ms)
    }

    pub fn red_packet_check(&self) -> Duration {
        Duration::from_millis(self.red_packet_check_ms)
    }

    pub fn red_packet_join(&self) -> Duration {
        Duration::from_millis(self.red_packet_join_ms)
    }
}

impl Default for ThrottleConfig {
    fn default() -> Self {
        Self {
            room_page_ms: defaults::room_page_delay(),
            lottery_join_ms: defaults::lottery_join_delay(),
            red_packet_check_ms: defaults::red_packet_check_delay(),
            red_packet_join_ms: defaults::red_packet_join_delay(),
        }
    }
}

/// Pendant ids that mark a room as hosting a draw.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BadgeConfig {
    #[serde(default = "defaults::lottery_pendant")]
    pub lottery_pendant_id: i64,

    #[serde(default = "defaults::red_packet_pendant")]
    pub red_packet_pendant_id: i64,
}

impl Default for BadgeConfig {
    fn default() -> Self {
        Self {
            lottery_pendant_id: defaults::lottery_pendant(),
            red_packet_pendant_id: defaults::red_packet_pendant(),
        }
    }
}

/// Lottery moment filtering rules.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LotteryConfig {
    /// Room pages to scan per sub-category
    #[serde(default = "defaults::pages")]
    pub pages: u32,

    /// Streamer uids whose draws are never joined
    #[serde(default)]
    pub blacklist: Vec<u64>,

    /// Award name patterns that override an exclude match
    #[serde(default)]
    pub include_patterns: Vec<String>,

    /// Award name patterns to skip
    #[serde(default = "defaults::exclude_patterns")]
    pub exclude_patterns: Vec<String>,

    /// Account level checked against level-gated draws
    #[serde(default)]
    pub user_level: u64,
}

impl Default for LotteryConfig {
    fn default() -> Self {
        Self {
            pages: defaults::pages(),
            blacklist: Vec::new(),
            include_patterns: Vec::new(),
            exclude_patterns: defaults::exclude_patterns(),
            user_level: 0,
        }
    }
}

/// Red-packet sweep settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedPacketConfig {
    /// Room pages to scan per sub-category
    #[serde(default = "defaults::pages")]
    pub pages: u32,
}

impl Default for RedPacketConfig {
    fn default() -> Self {
        Self {
            pages: defaults::pages(),
        }
    }
}

mod defaults {
    // HTTP defaults
    pub fn base_url() -> String {
        "https://api.live.bilibili.com".into()
    }
    pub fn user_agent() -> String {
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36".into()
    }
    pub fn timeout() -> u64 {
        30
    }

    // Throttle defaults
    pub fn room_page_delay() -> u64 {
        100
    }
    pub fn lottery_join_delay() -> u64 {
        300
    }
    pub fn red_packet_check_delay() -> u64 {
        100
    }
    pub fn red_packet_join_delay() -> u64 {
        200
    }

    // Badge defaults
    pub fn lottery_pendant() -> i64 {
        504
    }
    pub fn red_packet_pendant() -> i64 {
        1096
    }

    // Sweep defaults
    pub fn pages() -> u32 {
        2
    }
    pub fn exclude_patterns() -> Vec<String> {
        vec!["测试".into(), "舰长".into(), "提督".into(), "总督".into()]
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::io::Write;

    use super::*;

    #[test]
    fn validate_default_config_ok() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn default_delays_match_pacing() {
        let throttle = ThrottleConfig::default();
        assert_eq!(throttle.room_page(), Duration::from_millis(100));
        assert_eq!(throttle.lottery_join(), Duration::from_millis(300));
        assert_eq!(throttle.red_packet_check(), Duration::from_millis(100));
        assert_eq!(throttle.red_packet_join(), Duration::from_millis(200));
    }

    #[test]
    fn validate_rejects_empty_user_agent() {
        let mut config = Config::default();
        config.http.user_agent = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_zero_pages() {
        let mut config = Config::default();
        config.lottery.pages = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_shared_badge_marker() {
        let mut config = Config::default();
        config.badges.red_packet_pendant_id = config.badges.lottery_pendant_id;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_bad_pattern() {
        let mut config = Config::default();
        config.lottery.include_patterns = vec!["([".to_string()];
        assert!(matches!(
            config.validate(),
            Err(AppError::Pattern { .. })
        ));
    }

    #[test]
    fn load_partial_toml_fills_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[lottery]
blacklist = [1, 2]
user_level = 15

[throttle]
lottery_join_ms = 500
"#
        )
        .unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.lottery.blacklist, vec![1, 2]);
        assert_eq!(config.lottery.user_level, 15);
        assert_eq!(config.lottery.pages, 2);
        assert_eq!(config.throttle.lottery_join_ms, 500);
        assert_eq!(config.throttle.red_packet_join_ms, 200);
        assert_eq!(config.badges.lottery_pendant_id, 504);
    }

    #[test]
    fn load_or_default_on_missing_file() {
        let config = Config::load_or_default("/nonexistent/live-draw.toml");
        assert_eq!(config.lottery.pages, 2);
    }

    #[test]
    fn overrides_apply_parsed_values() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("LIVE_DRAW_COOKIE", "bili_jct=abc"),
            ("LIVE_DRAW_PAGES", "5"),
            ("LIVE_DRAW_USER_LEVEL", "not-a-number"),
        ]);

        let mut config = Config::default();
        config.apply_overrides(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.http.cookie, "bili_jct=abc");
        assert_eq!(config.lottery.pages, 5);
        assert_eq!(config.red_packet.pages, 5);
        assert_eq!(config.lottery.user_level, 0);
    }
}
