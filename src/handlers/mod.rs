pub mod health;
pub mod songs;

use axum::{middleware, routing::get, Router};

use crate::{negotiation, state::AppState};

/// Path of the song collection, also sent as `Location` for created songs.
pub const SONGS_PATH: &str = "/api/songs";

/// Routes mounted under `/api`. Every one of them answers in JSON only.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/songs", get(songs::list_songs).post(songs::create_song))
        .route_layer(middleware::from_fn(negotiation::accept_json))
}
