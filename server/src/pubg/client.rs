//! PUBG API 클라이언트
//!
//! 읽기 전용 엔드포인트 세 개만 사용합니다.
//! 요청마다 Bearer 토큰과 `application/vnd.api+json` Accept 헤더를 붙이고,
//! 실패는 재시도 없이 그대로 호출자에게 돌려줍니다.

use anyhow::Context;
use async_trait::async_trait;
use reqwest::{header, StatusCode, Url};
use serde::de::DeserializeOwned;

use crate::config::Pubg as PubgConfig;

use super::model::{ClanResponse, ErrorResponse, PlayerRecord, PlayerResponse, PlayersResponse};

const JSON_API: &str = "application/vnd.api+json";
const MAX_PLATFORM_LEN: usize = 32;

#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    #[error("PUBG API rate limit exceeded")]
    RateLimited,
    #[error("PUBG API returned {status}: {message}")]
    Status { status: u16, message: String },
    #[error("PUBG API unreachable: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("invalid platform '{0}'")]
    InvalidPlatform(String),
}

impl UpstreamError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, UpstreamError::Status { status: 404, .. })
    }
}

/// 오케스트레이터와 웹 핸들러가 의존하는 업스트림 인터페이스
#[async_trait]
pub trait PlayerApi: Send + Sync {
    /// 이름 목록으로 플레이어 조회. 없는 이름은 결과에서 빠질 뿐 에러가 아님.
    async fn players_by_names(
        &self,
        platform: &str,
        names: &[String],
    ) -> Result<Vec<PlayerRecord>, UpstreamError>;

    async fn player_by_id(&self, platform: &str, id: &str) -> Result<PlayerRecord, UpstreamError>;

    /// 클랜 표시 이름 (태그 우선)
    async fn clan_name(&self, platform: &str, clan_id: &str) -> Result<String, UpstreamError>;
}

pub struct PubgClient {
    http: reqwest::Client,
    base_url: Url,
    api_key: String,
    max_names_per_call: usize,
}

impl PubgClient {
    pub fn new(config: &PubgConfig, api_key: String) -> anyhow::Result<Self> {
        let base_url = Url::parse(&config.base_url).context("invalid pubg.base_url")?;
        if base_url.cannot_be_a_base() {
            anyhow::bail!("invalid pubg.base_url: {}", config.base_url);
        }

        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .context("could not create http client")?;

        Ok(Self {
            http,
            base_url,
            api_key,
            max_names_per_call: config.max_names_per_call.max(1),
        })
    }

    /// `{base}/shards/{platform}/...` URL 생성. 각 세그먼트는 퍼센트 인코딩됨.
    fn url(&self, platform: &str, segments: &[&str]) -> Result<Url, UpstreamError> {
        validate_platform(platform)?;

        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty()
                .extend(["shards", platform])
                .extend(segments);
        }
        Ok(url)
    }

    async fn send<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, UpstreamError> {
        let response = request
            .bearer_auth(&self.api_key)
            .header(header::ACCEPT, JSON_API)
            .send()
            .await?;

        let status = response.status();
        tracing::debug!(url = %response.url(), %status, "PUBG API response");

        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(UpstreamError::RateLimited);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(UpstreamError::Status {
                status: status.as_u16(),
                message: error_message(status, &body),
            });
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl PlayerApi for PubgClient {
    async fn players_by_names(
        &self,
        platform: &str,
        names: &[String],
    ) -> Result<Vec<PlayerRecord>, UpstreamError> {
        let url = self.url(platform, &["players"])?;
        let mut records = Vec::with_capacity(names.len());

        // 한 번에 넣을 수 있는 이름 수에 제한이 있어서 나눠서 조회
        for chunk in names.chunks(self.max_names_per_call) {
            let request = self
                .http
                .get(url.clone())
                .query(&[("filter[playerNames]", chunk.join(","))]);

            match self.send::<PlayersResponse>(request).await {
                Ok(response) => records.extend(response.data.into_iter().map(PlayerRecord::from)),
                // 이름이 하나도 없으면 404가 온다
                Err(e) if e.is_not_found() => {
                    tracing::debug!(platform, names = chunk.len(), "no players matched");
                }
                Err(e) => return Err(e),
            }
        }

        Ok(records)
    }

    async fn player_by_id(&self, platform: &str, id: &str) -> Result<PlayerRecord, UpstreamError> {
        let url = self.url(platform, &["players", id])?;
        let response: PlayerResponse = self.send(self.http.get(url)).await?;
        Ok(response.data.into())
    }

    async fn clan_name(&self, platform: &str, clan_id: &str) -> Result<String, UpstreamError> {
        let url = self.url(platform, &["clans", clan_id])?;
        let response: ClanResponse = self.send(self.http.get(url)).await?;
        Ok(response.data.display_name())
    }
}

/// 플랫폼(shard)은 짧은 영숫자 토큰만 허용 (예: steam, kakao, psn)
pub fn validate_platform(platform: &str) -> Result<(), UpstreamError> {
    let valid = !platform.is_empty()
        && platform.len() <= MAX_PLATFORM_LEN
        && platform
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');

    if valid {
        Ok(())
    } else {
        Err(UpstreamError::InvalidPlatform(platform.to_string()))
    }
}

fn error_message(status: StatusCode, body: &str) -> String {
    serde_json::from_str::<ErrorResponse>(body)
        .ok()
        .and_then(ErrorResponse::message)
        .or_else(|| {
            let body = body.trim();
            (!body.is_empty()).then(|| body.to_string())
        })
        .unwrap_or_else(|| status.canonical_reason().unwrap_or("unknown error").to_string())
}
