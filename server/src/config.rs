use std::fmt;
use std::net::SocketAddr;
use std::time::Duration;

use anyhow::Context;
use serde::Deserialize;

/// 환경 변수로 API 키를 주입할 때 사용하는 이름
pub const API_KEY_ENV: &str = "PUBG_API_KEY";

#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub web: Web,
    #[serde(default)]
    pub pubg: Pubg,
}

#[derive(Debug, Deserialize)]
pub struct Web {
    #[serde(default = "default_host")]
    pub host: SocketAddr,
}

impl Default for Web {
    fn default() -> Self {
        Self {
            host: default_host(),
        }
    }
}

/// PUBG API 설정
#[derive(Clone, Deserialize)]
pub struct Pubg {
    /// 배포 시 주입되는 비밀 값. 소스에 적지 말 것.
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_platform")]
    pub default_platform: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// filter[playerNames] 한 번에 넣을 수 있는 최대 이름 수
    #[serde(default = "default_max_names_per_call")]
    pub max_names_per_call: usize,
    /// 최근 검색 목록 크기
    #[serde(default = "default_recent_capacity")]
    pub recent_capacity: usize,
}

impl Pubg {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for Pubg {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
            default_platform: default_platform(),
            timeout_secs: default_timeout_secs(),
            max_names_per_call: default_max_names_per_call(),
            recent_capacity: default_recent_capacity(),
        }
    }
}

// API 키가 로그에 찍히지 않도록 직접 구현
impl fmt::Debug for Pubg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pubg")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("default_platform", &self.default_platform)
            .field("timeout_secs", &self.timeout_secs)
            .field("max_names_per_call", &self.max_names_per_call)
            .field("recent_capacity", &self.recent_capacity)
            .finish()
    }
}

fn default_host() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 10000))
}

fn default_base_url() -> String {
    "https://api.pubg.com".to_string()
}

fn default_platform() -> String {
    "steam".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_max_names_per_call() -> usize {
    10
}

fn default_recent_capacity() -> usize {
    50
}

impl Config {
    pub fn from_toml(toml: &str) -> anyhow::Result<Self> {
        toml::from_str(toml).context("could not parse config file")
    }

    /// 환경 변수 값이 있으면 설정 파일의 API 키를 덮어씀
    pub fn apply_api_key_override(&mut self, env_value: Option<String>) {
        if let Some(key) = env_value.filter(|k| !k.trim().is_empty()) {
            self.pubg.api_key = Some(key);
        }
    }

    pub fn api_key(&self) -> anyhow::Result<&str> {
        self.pubg
            .api_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .with_context(|| format!("no PUBG API key configured (set {} or pubg.api_key)", API_KEY_ENV))
    }
}
