//! Photo handlers

use axum::{
    Extension, Json,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
};
use tracing::info;

use crate::{
    error::{ApiError, ApiResult},
    extract::{ResourceId, ValidatedBody},
    middleware::AuthUser,
    models::{
        CreatePhotoRequest, DataResponse, MessageResponse, NewPhoto, PhotoUpdate,
        UpdatePhotoRequest,
    },
    state::AppState,
};

/// Create a photo owned by the caller
pub async fn create_photo(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    ValidatedBody(payload): ValidatedBody<CreatePhotoRequest>,
) -> ApiResult<impl IntoResponse> {
    let new_photo = NewPhoto {
        title: payload.title,
        caption: payload.caption,
        photo_url: payload.photo_url,
        user_id: user.id,
    };

    let photo = state.photo_repository.create(&new_photo).await?;
    info!("User {} created photo {}", user.id, photo.id);

    Ok((StatusCode::CREATED, Json(DataResponse::new(photo))))
}

/// List every photo with its owner
pub async fn get_photos(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let photos = state.photo_repository.get_all().await?;
    Ok(Json(DataResponse::new(photos)))
}

/// Get one photo
pub async fn get_photo(
    State(state): State<AppState>,
    ResourceId(id): ResourceId,
) -> ApiResult<impl IntoResponse> {
    let photo = state
        .photo_repository
        .get_by_id(id)
        .await?
        .ok_or(ApiError::NotFound("Photo"))?;

    Ok(Json(DataResponse::new(photo)))
}

/// Update a photo. Runs behind the ownership guard.
pub async fn update_photo(
    State(state): State<AppState>,
    ResourceId(id): ResourceId,
    ValidatedBody(payload): ValidatedBody<UpdatePhotoRequest>,
) -> ApiResult<impl IntoResponse> {
    let changes = PhotoUpdate {
        title: payload.title,
        caption: payload.caption,
        photo_url: payload.photo_url,
    };

    let photo = state
        .photo_repository
        .update(id, &changes)
        .await?
        .ok_or(ApiError::NotFound("Photo"))?;

    Ok(Json(DataResponse::new(photo)))
}

/// Delete a photo. Runs behind the ownership guard.
pub async fn delete_photo(
    State(state): State<AppState>,
    ResourceId(id): ResourceId,
) -> ApiResult<impl IntoResponse> {
    if !state.photo_repository.delete(id).await? {
        return Err(ApiError::NotFound("Photo"));
    }

    info!("Photo {} deleted", id);
    Ok(Json(DataResponse::new(MessageResponse {
        message: "Photo deleted successfully".to_string(),
    })))
}
