//! 플레이어 밴 상태 조회 파이프라인
//!
//! 쉼표로 구분된 이름 목록 → 이름 일괄 조회 1회 → (클랜 모드일 때) 플레이어별 상세 조회 +
//! 클랜 캐시 확인 → 요청 순서대로 결과 조립.
//! 업스트림 호출은 한 요청 안에서 순차적으로만 이뤄집니다.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use serde::Serialize;

use crate::pubg::{ban, ClanCache, PlayerApi, PlayerRecord, UpstreamError};
use crate::recent::RecentSearches;

pub const PLAYER_NOT_FOUND: &str = "Player not found";
pub const DETAILS_ERROR: &str = "Error fetching details";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClanMode {
    Skip,
    Resolve,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LookupResult {
    /// 요청에 들어온 이름 그대로 (업스트림 표기와 다를 수 있음)
    pub player: String,
    pub ban_status: String,
    /// `None`이면 필드 자체를 생략, `Some(None)`이면 null
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clan: Option<Option<String>>,
}

impl LookupResult {
    fn not_found(player: String, mode: ClanMode) -> Self {
        Self {
            player,
            ban_status: PLAYER_NOT_FOUND.to_string(),
            clan: clan_field(mode, None),
        }
    }
}

fn clan_field(mode: ClanMode, clan: Option<String>) -> Option<Option<String>> {
    match mode {
        ClanMode::Skip => None,
        ClanMode::Resolve => Some(clan),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedAccount {
    pub account_id: String,
    pub current_name: String,
}

impl From<PlayerRecord> for ResolvedAccount {
    fn from(value: PlayerRecord) -> Self {
        Self {
            account_id: value.id,
            current_name: value.name,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    #[error("Missing {0} parameter")]
    MissingParameter(&'static str),
    #[error(transparent)]
    Upstream(#[from] UpstreamError),
}

pub struct Lookup {
    api: Arc<dyn PlayerApi>,
    clans: Arc<ClanCache>,
    recent: Arc<RecentSearches>,
}

/// 쉼표로 나누고 공백 제거, 빈 토큰은 버림. 중복은 유지.
pub fn parse_names(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

/// 업스트림 레코드를 요청 토큰에 대응시킴. 정확히 같은 이름을 우선하고, 없으면 대소문자 무시.
struct NameMatcher {
    records: Vec<PlayerRecord>,
    exact: HashMap<String, usize>,
    folded: HashMap<String, usize>,
}

impl NameMatcher {
    fn new(records: Vec<PlayerRecord>) -> Self {
        let mut exact = HashMap::new();
        let mut folded = HashMap::new();
        for (i, record) in records.iter().enumerate() {
            exact.entry(record.name.clone()).or_insert(i);
            folded.entry(record.name.to_lowercase()).or_insert(i);
        }

        Self {
            records,
            exact,
            folded,
        }
    }

    fn get(&self, name: &str) -> Option<&PlayerRecord> {
        self.exact
            .get(name)
            .or_else(|| self.folded.get(&name.to_lowercase()))
            .map(|&i| &self.records[i])
    }

    fn len(&self) -> usize {
        self.records.len()
    }
}

impl Lookup {
    pub fn new(api: Arc<dyn PlayerApi>, clans: Arc<ClanCache>, recent: Arc<RecentSearches>) -> Self {
        Self { api, clans, recent }
    }

    pub async fn check_bans(
        &self,
        raw: &str,
        platform: &str,
        mode: ClanMode,
    ) -> Result<Vec<LookupResult>, LookupError> {
        let names = parse_names(raw);
        if names.is_empty() {
            return Err(LookupError::MissingParameter("player"));
        }

        // 업스트림은 이름을 정확히 비교하므로 철자가 다른 토큰은 모두 보냄
        let distinct: Vec<String> = {
            let mut seen = HashSet::new();
            names
                .iter()
                .filter(|name| seen.insert(name.as_str()))
                .cloned()
                .collect()
        };

        let records = self.api.players_by_names(platform, &distinct).await?;
        let matcher = NameMatcher::new(records);

        tracing::debug!(
            platform,
            requested = names.len(),
            matched = matcher.len(),
            "batch player lookup finished"
        );

        let mut results = Vec::with_capacity(names.len());
        for name in names {
            let Some(record) = matcher.get(&name) else {
                results.push(LookupResult::not_found(name, mode));
                continue;
            };

            self.recent.record(&record.name).await;

            let result = match mode {
                ClanMode::Skip => LookupResult {
                    player: name,
                    ban_status: ban::label(record.ban_type.as_deref()).to_string(),
                    clan: None,
                },
                ClanMode::Resolve => self.with_clan(name, record, platform).await,
            };
            results.push(result);
        }

        Ok(results)
    }

    /// 상세 조회 실패는 해당 플레이어만 에러로 표시하고 계속 진행
    async fn with_clan(&self, player: String, record: &PlayerRecord, platform: &str) -> LookupResult {
        let detail = match self.api.player_by_id(platform, &record.id).await {
            Ok(detail) => detail,
            Err(e) => {
                tracing::warn!(%player, account_id = %record.id, "failed to fetch player details: {}", e);
                return LookupResult {
                    player,
                    ban_status: DETAILS_ERROR.to_string(),
                    clan: Some(None),
                };
            }
        };

        let clan = match detail.clan_id.as_deref() {
            Some(clan_id) => self.clan_name(platform, clan_id).await,
            None => None,
        };

        let ban_type = detail.ban_type.as_deref().or(record.ban_type.as_deref());
        LookupResult {
            player,
            ban_status: ban::label(ban_type).to_string(),
            clan: Some(clan),
        }
    }

    async fn clan_name(&self, platform: &str, clan_id: &str) -> Option<String> {
        if let Some(name) = self.clans.lookup(clan_id).await {
            return Some(name);
        }

        match self.api.clan_name(platform, clan_id).await {
            Ok(name) => {
                let name = self.clans.store(clan_id, name).await;
                let cached = self.clans.len().await;
                tracing::debug!(clan_id, cached, "clan cached");
                Some(name)
            }
            Err(e) => {
                // 실패한 결과는 캐시하지 않음
                tracing::warn!(clan_id, "failed to fetch clan: {}", e);
                None
            }
        }
    }

    pub async fn resolve_by_name(
        &self,
        name: &str,
        platform: &str,
    ) -> Result<Option<ResolvedAccount>, LookupError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(LookupError::MissingParameter("name"));
        }

        let records = self
            .api
            .players_by_names(platform, &[name.to_string()])
            .await?;

        let found = NameMatcher::new(records).get(name).cloned();
        if let Some(record) = &found {
            self.recent.record(&record.name).await;
        }

        Ok(found.map(ResolvedAccount::from))
    }

    pub async fn resolve_by_id(
        &self,
        id: &str,
        platform: &str,
    ) -> Result<Option<ResolvedAccount>, LookupError> {
        let id = id.trim();
        if id.is_empty() {
            return Err(LookupError::MissingParameter("id"));
        }

        match self.api.player_by_id(platform, id).await {
            Ok(record) => {
                self.recent.record(&record.name).await;
                Ok(Some(record.into()))
            }
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// 최근 검색 목록에서만 찾음. 네트워크 요청 없음.
    pub async fn suggest_names(&self, query: &str, limit: usize) -> Vec<String> {
        self.recent.matching(query, limit).await
    }

    /// 최근 검색 목록 + 정확히 일치하는 업스트림 플레이어.
    /// 업스트림 실패는 무시하고 최근 검색 결과만 돌려준다.
    pub async fn suggest_players(&self, query: &str, platform: &str, limit: usize) -> Vec<String> {
        let query = query.trim();
        let mut suggestions = self.recent.matching(query, limit).await;
        if query.is_empty() || limit == 0 {
            return suggestions;
        }

        let key = query.to_lowercase();
        if suggestions.iter().any(|s| s.to_lowercase() == key) {
            return suggestions;
        }

        match self.api.players_by_names(platform, &[query.to_string()]).await {
            Ok(records) => {
                if let Some(record) = records.into_iter().find(|r| r.name.to_lowercase() == key) {
                    suggestions.insert(0, record.name);
                    suggestions.truncate(limit);
                }
            }
            Err(e) => tracing::debug!(query, "suggestion lookup failed: {}", e),
        }

        suggestions
    }
}
