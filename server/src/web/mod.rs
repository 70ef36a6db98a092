use std::sync::Arc;
use anyhow::Result;

use crate::config::Config;
use crate::lookup::Lookup;
use crate::pubg::{ClanCache, PlayerApi, PubgClient};
use crate::recent::RecentSearches;

pub mod routes;
pub mod handlers;

pub async fn start(config: Arc<Config>) -> Result<()> {
    let api_key = config.api_key()?.to_string();
    let client = PubgClient::new(&config.pubg, api_key)?;
    let state = State::new(&config, Arc::new(client));

    tracing::info!(
        platform = %config.pubg.default_platform,
        "listening at {}",
        config.web.host
    );
    warp::serve(routes::router(state)).run(config.web.host).await;
    Ok(())
}

pub struct State {
    pub lookup: Lookup,
    pub default_platform: String,
}

impl State {
    pub fn new(config: &Config, api: Arc<dyn PlayerApi>) -> Arc<Self> {
        let lookup = Lookup::new(
            api,
            Arc::new(ClanCache::new()),
            Arc::new(RecentSearches::new(config.pubg.recent_capacity)),
        );

        Arc::new(Self {
            lookup,
            default_platform: config.pubg.default_platform.clone(),
        })
    }

    /// 요청에 플랫폼이 없거나 비어있으면 기본값 사용
    pub fn platform<'a>(&'a self, requested: Option<&'a str>) -> &'a str {
        requested
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .unwrap_or(&self.default_platform)
    }
}
