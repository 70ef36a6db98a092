//! PUBG API (JSON:API) 응답 타입

use serde::Deserialize;

/// `/players` 목록 응답
#[derive(Debug, Deserialize)]
pub(crate) struct PlayersResponse {
    #[serde(default)]
    pub data: Vec<PlayerData>,
}

/// `/players/{id}` 단건 응답
#[derive(Debug, Deserialize)]
pub(crate) struct PlayerResponse {
    pub data: PlayerData,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PlayerData {
    pub id: String,
    #[serde(default)]
    pub attributes: PlayerAttributes,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PlayerAttributes {
    #[serde(default)]
    pub name: String,
    pub ban_type: Option<String>,
    pub clan_id: Option<String>,
}

/// `/clans/{id}` 응답
#[derive(Debug, Deserialize)]
pub(crate) struct ClanResponse {
    pub data: ClanData,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ClanData {
    pub id: String,
    #[serde(default)]
    pub attributes: ClanAttributes,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ClanAttributes {
    pub clan_name: Option<String>,
    pub clan_tag: Option<String>,
}

/// 에러 응답 본문 (`{"errors":[{"title":..,"detail":..}]}`)
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorResponse {
    #[serde(default)]
    pub errors: Vec<ErrorObject>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorObject {
    pub title: Option<String>,
    pub detail: Option<String>,
}

/// 업스트림에서 받은 플레이어 정보
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerRecord {
    /// account.xxxx 형식의 계정 ID
    pub id: String,
    /// 대소문자가 보존된 현재 이름
    pub name: String,
    pub ban_type: Option<String>,
    pub clan_id: Option<String>,
}

impl From<PlayerData> for PlayerRecord {
    fn from(value: PlayerData) -> Self {
        Self {
            id: value.id,
            name: value.attributes.name,
            ban_type: value.attributes.ban_type,
            // 클랜이 없으면 빈 문자열로 오는 경우가 있음
            clan_id: value.attributes.clan_id.filter(|id| !id.is_empty()),
        }
    }
}

impl ClanData {
    /// 태그를 우선하고, 없으면 클랜 이름, 둘 다 없으면 ID
    pub fn display_name(self) -> String {
        let ClanAttributes { clan_name, clan_tag } = self.attributes;
        clan_tag
            .filter(|t| !t.is_empty())
            .or(clan_name.filter(|n| !n.is_empty()))
            .unwrap_or(self.id)
    }
}

impl ErrorResponse {
    pub fn message(self) -> Option<String> {
        self.errors
            .into_iter()
            .find_map(|e| e.detail.filter(|d| !d.is_empty()).or(e.title))
    }
}
