//! Comment handlers

use axum::{
    Extension, Json,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
};
use common::error::DatabaseError;
use tracing::info;

use crate::{
    error::{ApiError, ApiResult},
    extract::{ResourceId, ValidatedBody},
    middleware::AuthUser,
    models::{
        CommentUpdate, CreateCommentRequest, DataResponse, MessageResponse, NewComment,
        UpdateCommentRequest,
    },
    state::AppState,
};

/// The photo can vanish between the existence check and the insert
fn comment_create_error(err: DatabaseError) -> ApiError {
    match err {
        DatabaseError::ForeignKeyViolation(_) => ApiError::NotFound("Photo"),
        other => ApiError::Database(other),
    }
}

/// Comment on an existing photo
pub async fn create_comment(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    ValidatedBody(payload): ValidatedBody<CreateCommentRequest>,
) -> ApiResult<impl IntoResponse> {
    let photo_id = payload.photo_id.unwrap_or_default();

    if state.photo_repository.get_by_id(photo_id).await?.is_none() {
        return Err(ApiError::NotFound("Photo"));
    }

    let new_comment = NewComment {
        message: payload.message,
        photo_id,
        user_id: user.id,
    };

    let comment = state
        .comment_repository
        .create(&new_comment)
        .await
        .map_err(comment_create_error)?;
    info!(
        "User {} commented on photo {} ({})",
        user.id, photo_id, comment.id
    );

    Ok((StatusCode::CREATED, Json(DataResponse::new(comment))))
}

/// List every comment with its author and photo
pub async fn get_comments(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let comments = state.comment_repository.get_all().await?;
    Ok(Json(DataResponse::new(comments)))
}

/// Get one comment
pub async fn get_comment(
    State(state): State<AppState>,
    ResourceId(id): ResourceId,
) -> ApiResult<impl IntoResponse> {
    let comment = state
        .comment_repository
        .get_by_id(id)
        .await?
        .ok_or(ApiError::NotFound("Comment"))?;

    Ok(Json(DataResponse::new(comment)))
}

/// Edit a comment's message. Runs behind the ownership guard.
pub async fn update_comment(
    State(state): State<AppState>,
    ResourceId(id): ResourceId,
    ValidatedBody(payload): ValidatedBody<UpdateCommentRequest>,
) -> ApiResult<impl IntoResponse> {
    let changes = CommentUpdate {
        message: payload.message,
    };

    let comment = state
        .comment_repository
        .update(id, &changes)
        .await?
        .ok_or(ApiError::NotFound("Comment"))?;

    Ok(Json(DataResponse::new(comment)))
}

/// Delete a comment. Runs behind the ownership guard.
pub async fn delete_comment(
    State(state): State<AppState>,
    ResourceId(id): ResourceId,
) -> ApiResult<impl IntoResponse> {
    if !state.comment_repository.delete(id).await? {
        return Err(ApiError::NotFound("Comment"));
    }

    Ok(Json(DataResponse::new(MessageResponse {
        message: "Comment deleted successfully".to_string(),
    })))
}
