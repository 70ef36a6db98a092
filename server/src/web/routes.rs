use std::sync::Arc;
use warp::{filters::BoxedFilter, Filter, Reply};

use crate::lookup::ClanMode;
use super::handlers::{self, IdQuery, NameQuery, PlayerQuery, SuggestNamesQuery, SuggestPlayersQuery};
use super::State;

pub fn router(state: Arc<State>) -> BoxedFilter<(impl Reply,)> {
    ping()
        .or(check_ban(Arc::clone(&state)))
        .or(check_ban_clan(Arc::clone(&state)))
        .or(resolve_by_name(Arc::clone(&state)))
        .or(resolve_by_id(Arc::clone(&state)))
        .or(suggest_names(Arc::clone(&state)))
        .or(suggest_players(Arc::clone(&state)))
        .recover(handlers::rejection_handler)
        .with(warp::trace::request())
        .boxed()
}

fn ping() -> BoxedFilter<(impl Reply,)> {
    let route = warp::path("ping")
        .and(warp::path::end())
        .map(handlers::ping_handler);

    warp::get().and(route).boxed()
}

fn check_ban(state: Arc<State>) -> BoxedFilter<(impl Reply,)> {
    let route = warp::path("check-ban")
        .and(warp::path::end())
        .and(warp::query::<PlayerQuery>())
        .and_then(move |query: PlayerQuery| handlers::check_ban_handler(Arc::clone(&state), query, ClanMode::Skip));

    warp::get().and(route).boxed()
}

fn check_ban_clan(state: Arc<State>) -> BoxedFilter<(impl Reply,)> {
    let route = warp::path("check-ban-clan")
        .and(warp::path::end())
        .and(warp::query::<PlayerQuery>())
        .and_then(move |query: PlayerQuery| handlers::check_ban_handler(Arc::clone(&state), query, ClanMode::Resolve));

    warp::get().and(route).boxed()
}

fn resolve_by_name(state: Arc<State>) -> BoxedFilter<(impl Reply,)> {
    let route = warp::path("api")
        .and(warp::path("resolve-by-name"))
        .and(warp::path::end())
        .and(warp::query::<NameQuery>())
        .and_then(move |query: NameQuery| handlers::resolve_by_name_handler(Arc::clone(&state), query));

    warp::get().and(route).boxed()
}

fn resolve_by_id(state: Arc<State>) -> BoxedFilter<(impl Reply,)> {
    let route = warp::path("api")
        .and(warp::path("resolve-by-id"))
        .and(warp::path::end())
        .and(warp::query::<IdQuery>())
        .and_then(move |query: IdQuery| handlers::resolve_by_id_handler(Arc::clone(&state), query));

    warp::get().and(route).boxed()
}

fn suggest_names(state: Arc<State>) -> BoxedFilter<(impl Reply,)> {
    let route = warp::path("suggest-names")
        .and(warp::path::end())
        .and(warp::query::<SuggestNamesQuery>())
        .and_then(move |query: SuggestNamesQuery| handlers::suggest_names_handler(Arc::clone(&state), query));

    warp::get().and(route).boxed()
}

fn suggest_players(state: Arc<State>) -> BoxedFilter<(impl Reply,)> {
    let route = warp::path("suggest-players")
        .and(warp::path::end())
        .and(warp::query::<SuggestPlayersQuery>())
        .and_then(move |query: SuggestPlayersQuery| handlers::suggest_players_handler(Arc::clone(&state), query));

    warp::get().and(route).boxed()
}
