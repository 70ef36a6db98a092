//! PUBG 관련 모듈
//!
//! - `client`: PUBG API 클라이언트
//! - `model`: JSON:API 응답 타입
//! - `ban`: banType 코드 → 표시 문자열
//! - `cache`: 클랜 이름 캐시

pub mod ban;
pub mod cache;
pub mod client;
pub mod model;

// 편의를 위한 re-export
pub use cache::ClanCache;
pub use client::{PlayerApi, PubgClient, UpstreamError};
pub use model::PlayerRecord;
