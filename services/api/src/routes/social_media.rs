//! Social media link handlers

use axum::{
    Extension, Json,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
};

use crate::{
    error::{ApiError, ApiResult},
    extract::{ResourceId, ValidatedBody},
    middleware::AuthUser,
    models::{
        CreateSocialMediaRequest, DataResponse, MessageResponse, NewSocialMedia,
        SocialMediaUpdate, UpdateSocialMediaRequest,
    },
    state::AppState,
};

pub async fn create_social_media(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    ValidatedBody(payload): ValidatedBody<CreateSocialMediaRequest>,
) -> ApiResult<impl IntoResponse> {
    let new_social_media = NewSocialMedia {
        name: payload.name,
        social_media_url: payload.social_media_url,
        user_id: user.id,
    };

    let social_media = state
        .social_media_repository
        .create(&new_social_media)
        .await?;

    Ok((StatusCode::CREATED, Json(DataResponse::new(social_media))))
}

pub async fn get_social_medias(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let social_medias = state.social_media_repository.get_all().await?;
    Ok(Json(DataResponse::new(social_medias)))
}

pub async fn get_social_media(
    State(state): State<AppState>,
    ResourceId(id): ResourceId,
) -> ApiResult<impl IntoResponse> {
    let social_media = state
        .social_media_repository
        .get_by_id(id)
        .await?
        .ok_or(ApiError::NotFound("Social media"))?;

    Ok(Json(DataResponse::new(social_media)))
}

pub async fn update_social_media(
    State(state): State<AppState>,
    ResourceId(id): ResourceId,
    ValidatedBody(payload): ValidatedBody<UpdateSocialMediaRequest>,
) -> ApiResult<impl IntoResponse> {
    let changes = SocialMediaUpdate {
        name: payload.name,
        social_media_url: payload.social_media_url,
    };

    let social_media = state
        .social_media_repository
        .update(id, &changes)
        .await?
        .ok_or(ApiError::NotFound("Social media"))?;

    Ok(Json(DataResponse::new(social_media)))
}

pub async fn delete_social_media(
    State(state): State<AppState>,
    ResourceId(id): ResourceId,
) -> ApiResult<impl IntoResponse> {
    if !state.social_media_repository.delete(id).await? {
        return Err(ApiError::NotFound("Social media"));
    }

    Ok(Json(DataResponse::new(MessageResponse {
        message: "Social media deleted successfully".to_string(),
    })))
}
