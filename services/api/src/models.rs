//! API models for domain records, request and response payloads

use serde::Serialize;

pub mod comment;
pub mod photo;
pub mod social_media;
pub mod user;

pub use comment::{Comment, CommentDetails, CommentPhoto, CommentUpdate, CreateCommentRequest, NewComment, UpdateCommentRequest};
pub use photo::{CreatePhotoRequest, NewPhoto, Photo, PhotoDetails, PhotoUpdate, UpdatePhotoRequest};
pub use social_media::{
    CreateSocialMediaRequest, NewSocialMedia, SocialMedia, SocialMediaDetails, SocialMediaUpdate,
    UpdateSocialMediaRequest,
};
pub use user::{LoginRequest, LoginResponse, NewUser, RegisterRequest, User, UserResponse};

/// A record with a single owning user
pub trait Owned {
    /// ID of the user that created the record
    fn owner_id(&self) -> i64;
}

/// Envelope for successful responses
#[derive(Debug, Serialize)]
pub struct DataResponse<T> {
    pub data: T,
}

impl<T> DataResponse<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

/// Response for delete operations
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Owner summary embedded in list and detail responses
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OwnerSummary {
    pub username: String,
}
