//! API service routes

use std::sync::Arc;

use axum::{
    Json, Router,
    middleware::from_fn_with_state,
    response::IntoResponse,
    routing::{get, post, put},
};
use serde_json::json;
use tower_http::trace::TraceLayer;

use crate::{
    middleware::{OwnershipGuard, auth_middleware, require_owner},
    repositories::{CommentRepository, PhotoRepository, SocialMediaRepository},
    state::AppState,
};

mod comments;
mod photos;
mod social_media;
mod users;

/// Create the router for the API service
pub fn create_router(state: AppState) -> Router {
    let photo_guard = from_fn_with_state(
        OwnershipGuard::new(state.photo_repository.clone()),
        require_owner::<Arc<dyn PhotoRepository>>,
    );
    let comment_guard = from_fn_with_state(
        OwnershipGuard::new(state.comment_repository.clone()),
        require_owner::<Arc<dyn CommentRepository>>,
    );
    let social_media_guard = from_fn_with_state(
        OwnershipGuard::new(state.social_media_repository.clone()),
        require_owner::<Arc<dyn SocialMediaRepository>>,
    );

    let protected_routes = Router::new()
        .route(
            "/photos",
            post(photos::create_photo).get(photos::get_photos),
        )
        .route(
            "/photos/:id",
            get(photos::get_photo).merge(
                put(photos::update_photo)
                    .delete(photos::delete_photo)
                    .route_layer(photo_guard),
            ),
        )
        .route(
            "/comments",
            post(comments::create_comment).get(comments::get_comments),
        )
        .route(
            "/comments/:id",
            get(comments::get_comment).merge(
                put(comments::update_comment)
                    .delete(comments::delete_comment)
                    .route_layer(comment_guard),
            ),
        )
        .route(
            "/social-media",
            post(social_media::create_social_media).get(social_media::get_social_medias),
        )
        .route(
            "/social-media/:id",
            get(social_media::get_social_media).merge(
                put(social_media::update_social_media)
                    .delete(social_media::delete_social_media)
                    .route_layer(social_media_guard),
            ),
        )
        .route_layer(from_fn_with_state(state.clone(), auth_middleware));

    Router::new()
        .route("/health", get(health_check))
        .route("/users/register", post(users::register))
        .route("/users/login", post(users::login))
        .merge(protected_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "mygram-api"
    }))
}
