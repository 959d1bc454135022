pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;

use std::sync::Arc;

use axum::{
    routing::{get, post, put},
    Router,
};

use config::Config;

#[derive(Clone)]
pub struct AppState {
    pub db: db::DB,
    pub config: Arc<Config>,
}

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/hello", get(routes::hello))
        .route("/games", get(routes::list_games))
        .route("/games/:id", get(routes::get_game))
        .route("/clicks", post(routes::record_click))
        .route("/stats", get(routes::get_stats))
        .route("/admin/games", post(routes::create_game))
        .route(
            "/admin/games/:id",
            put(routes::update_game).delete(routes::delete_game),
        )
        .with_state(state)
}
