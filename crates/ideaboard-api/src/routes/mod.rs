//! Route definitions
//!
//! All API routes organized by resource and mounted under /api/v1.

use axum::{
    routing::{get, patch, post},
    Router,
};

use crate::handlers::{comments, health, ideas};
use crate::state::AppState;

/// Create the main API router (health routes are mounted separately)
pub fn create_router() -> Router<AppState> {
    Router::new().nest("/api/v1", api_v1_routes())
}

/// Health check routes (exported separately to bypass rate limiting)
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

/// API v1 routes
fn api_v1_routes() -> Router<AppState> {
    Router::new().merge(idea_routes()).merge(comment_routes())
}

/// Idea routes
fn idea_routes() -> Router<AppState> {
    Router::new()
        .route("/ideas", get(ideas::list_ideas).post(ideas::create_idea))
        .route("/ideas/:idea_id", get(ideas::get_idea))
        .route("/ideas/:idea_id/vote", post(ideas::vote_idea))
        .route("/ideas/:idea_id/comments", get(comments::list_comments))
}

/// Comment routes
fn comment_routes() -> Router<AppState> {
    Router::new()
        .route("/comments", post(comments::create_comment))
        .route(
            "/comments/:comment_id",
            patch(comments::edit_comment).delete(comments::delete_comment),
        )
        .route("/comments/:comment_id/replies", get(comments::list_replies))
        .route("/comments/:comment_id/vote", post(comments::vote_comment))
}
