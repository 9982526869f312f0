use crate::handlers;
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post, put},
};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/tabs/:view", post(handlers::select_tab))
        .route("/login", post(handlers::login))
        .route("/logout", post(handlers::logout))
        .route("/api/views", get(handlers::get_views))
        .route("/api/views/:view/enabled", put(handlers::set_enabled))
        .route("/api/views/:view/badge", put(handlers::set_badge))
        .route(
            "/api/selection",
            get(handlers::get_selection).post(handlers::select),
        )
        .route(
            "/api/session",
            get(handlers::get_session)
                .post(handlers::sign_in)
                .delete(handlers::sign_out),
        )
        .route("/api/session/history", get(handlers::get_history))
        .route("/api/surface", get(handlers::get_surface))
        .with_state(state)
}
