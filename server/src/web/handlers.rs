use std::{convert::Infallible, sync::Arc};
use serde::{Deserialize, Serialize};
use warp::http::StatusCode;
use warp::reject::{InvalidQuery, MethodNotAllowed};
use warp::reply::Response;
use warp::{Rejection, Reply};

use crate::lookup::{ClanMode, LookupError, LookupResult, PLAYER_NOT_FOUND};
use crate::pubg::UpstreamError;
use super::State;

/// 자동완성 결과 최대 개수
const SUGGESTION_LIMIT: usize = 10;

#[derive(Debug, Deserialize)]
pub struct PlayerQuery {
    pub player: Option<String>,
    pub platform: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct NameQuery {
    pub name: Option<String>,
    pub platform: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct IdQuery {
    pub id: Option<String>,
    pub platform: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SuggestNamesQuery {
    pub query: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SuggestPlayersQuery {
    pub q: Option<String>,
    pub platform: Option<String>,
}

#[derive(Serialize)]
struct Status {
    status: &'static str,
}

#[derive(Serialize)]
struct CheckBanResponse {
    results: Vec<LookupResult>,
}

#[derive(Serialize)]
struct Suggestions {
    suggestions: Vec<String>,
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

pub fn ping_handler() -> impl Reply {
    warp::reply::json(&Status { status: "ok" })
}

pub async fn check_ban_handler(
    state: Arc<State>,
    query: PlayerQuery,
    mode: ClanMode,
) -> std::result::Result<Response, Infallible> {
    let platform = state.platform(query.platform.as_deref());
    let players = query.player.unwrap_or_default();

    Ok(match state.lookup.check_bans(&players, platform, mode).await {
        Ok(results) => warp::reply::json(&CheckBanResponse { results }).into_response(),
        Err(e) => error_reply(&e),
    })
}

pub async fn resolve_by_name_handler(
    state: Arc<State>,
    query: NameQuery,
) -> std::result::Result<Response, Infallible> {
    let platform = state.platform(query.platform.as_deref());
    let name = query.name.unwrap_or_default();

    Ok(match state.lookup.resolve_by_name(&name, platform).await {
        Ok(Some(account)) => warp::reply::json(&account).into_response(),
        Ok(None) => json_error(StatusCode::NOT_FOUND, PLAYER_NOT_FOUND.to_string()),
        Err(e) => error_reply(&e),
    })
}

pub async fn resolve_by_id_handler(
    state: Arc<State>,
    query: IdQuery,
) -> std::result::Result<Response, Infallible> {
    let platform = state.platform(query.platform.as_deref());
    let id = query.id.unwrap_or_default();

    Ok(match state.lookup.resolve_by_id(&id, platform).await {
        Ok(Some(account)) => warp::reply::json(&account).into_response(),
        Ok(None) => json_error(StatusCode::NOT_FOUND, PLAYER_NOT_FOUND.to_string()),
        Err(e) => error_reply(&e),
    })
}

pub async fn suggest_names_handler(
    state: Arc<State>,
    query: SuggestNamesQuery,
) -> std::result::Result<Response, Infallible> {
    let prefix = query.query.unwrap_or_default();
    let suggestions = state.lookup.suggest_names(&prefix, SUGGESTION_LIMIT).await;

    Ok(warp::reply::json(&Suggestions { suggestions }).into_response())
}

pub async fn suggest_players_handler(
    state: Arc<State>,
    query: SuggestPlayersQuery,
) -> std::result::Result<Response, Infallible> {
    let platform = state.platform(query.platform.as_deref());
    let q = query.q.unwrap_or_default();
    let suggestions = state.lookup.suggest_players(&q, platform, SUGGESTION_LIMIT).await;

    Ok(warp::reply::json(&suggestions).into_response())
}

/// warp 거부도 `{"error": ...}` 형태로 응답
pub async fn rejection_handler(rejection: Rejection) -> std::result::Result<Response, Infallible> {
    let (status, message) = if rejection.is_not_found() {
        (StatusCode::NOT_FOUND, "Not found".to_string())
    } else if let Some(e) = rejection.find::<InvalidQuery>() {
        (StatusCode::BAD_REQUEST, e.to_string())
    } else if rejection.find::<MethodNotAllowed>().is_some() {
        (StatusCode::METHOD_NOT_ALLOWED, "Method not allowed".to_string())
    } else {
        tracing::error!("unhandled rejection: {:?}", rejection);
        (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string())
    };

    Ok(json_error(status, message))
}

fn json_error(status: StatusCode, error: String) -> Response {
    warp::reply::with_status(warp::reply::json(&ErrorBody { error }), status).into_response()
}

/// 조회 실패를 상태 코드 + `{"error": ...}` 응답으로 변환
pub fn error_reply(error: &LookupError) -> Response {
    let (status, message) = match error {
        LookupError::MissingParameter(_) => (StatusCode::BAD_REQUEST, error.to_string()),
        LookupError::Upstream(upstream) => match upstream {
            UpstreamError::InvalidPlatform(_) => (StatusCode::BAD_REQUEST, upstream.to_string()),
            UpstreamError::RateLimited => (
                StatusCode::TOO_MANY_REQUESTS,
                "Too many requests to the PUBG API. Try checking fewer players at once.".to_string(),
            ),
            UpstreamError::Status { status, message } => (
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY),
                format!("PUBG API returned {}: {}", status, message),
            ),
            UpstreamError::Transport(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Could not reach the PUBG API".to_string(),
            ),
        },
    };

    if status.is_server_error() {
        tracing::error!("lookup failed: {:?}", error);
    } else {
        tracing::debug!(%status, "lookup rejected: {}", error);
    }

    json_error(status, message)
}
