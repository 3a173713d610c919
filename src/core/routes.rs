// HTTP routes configuration

use crate::core::state::AppState;
use crate::handlers::{analytics, fallback, health, leads, session, users};
use axum::{
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Public endpoints
        .route("/health", get(health::health_handler))
        .route("/session/login", post(session::login_handler))
        .route("/session/logout", post(session::logout_handler))

        // Dashboard endpoints (require a logged-in user)
        .route("/session", get(session::session_handler))
        .route("/leads", get(leads::list_leads_handler))
        .route("/leads/filters", get(leads::filter_options_handler))
        .route("/leads/filters/{id}", get(leads::filter_option_handler))
        .route(
            "/leads/{id}",
            get(leads::get_lead_handler).put(leads::update_lead_handler),
        )
        .route("/leads/{id}/unlock", post(leads::unlock_lead_handler))
        .route("/leads/{id}/assign", post(leads::assign_lead_handler))
        .route("/leads/{id}/like", post(leads::like_lead_handler))
        .route("/leads/{id}/dislike", post(leads::dislike_lead_handler))
        .route("/users", get(users::list_users_handler))
        .route("/users/{id}/role", put(users::update_role_handler))
        .route("/analytics", get(analytics::analytics_handler))

        // 404 fallback for all unmatched routes
        .fallback(fallback::fallback_handler)

        .with_state(state)
}
