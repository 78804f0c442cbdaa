//! # Session Server
//! 
//! Demo HTTP application: login, profile, and logout over cookie sessions.

pub mod error;
pub mod handlers;
pub mod response;
pub mod state;
pub mod users;

use axum::{
    routing::{get, post, put},
    Router,
};
use tower_cookies::CookieManagerLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/api/v1/auth/login", post(handlers::auth::login))
        .route("/api/v1/auth/me", get(handlers::auth::me))
        .route("/api/v1/auth/profile", put(handlers::auth::update_profile))
        .route("/api/v1/auth/logout", post(handlers::auth::logout))
        .with_state(state)
        .layer(CookieManagerLayer::new())
        .layer(TraceLayer::new_for_http())
}
