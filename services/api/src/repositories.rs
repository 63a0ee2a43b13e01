//! Repositories for database operations
//!
//! Each resource is reached through a trait so handlers and the ownership
//! guard stay independent of the storage engine. The PostgreSQL
//! implementations live in the submodules.

use async_trait::async_trait;
use common::error::DatabaseResult;

use crate::models::{
    Comment, CommentDetails, CommentUpdate, NewComment, NewPhoto, NewSocialMedia, NewUser, Photo,
    PhotoDetails, PhotoUpdate, SocialMedia, SocialMediaDetails, SocialMediaUpdate, User,
};

pub mod comment;
#[cfg(test)]
pub mod memory;
pub mod photo;
pub mod social_media;
pub mod user;

pub use comment::PgCommentRepository;
pub use photo::PgPhotoRepository;
pub use social_media::PgSocialMediaRepository;
pub use user::PgUserRepository;

/// Storage for user credentials
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user. Fails with `DatabaseError::UniqueViolation` naming
    /// the constraint when the email or username is taken.
    async fn create(&self, new_user: &NewUser) -> DatabaseResult<User>;

    /// Find a user by email
    async fn find_by_email(&self, email: &str) -> DatabaseResult<Option<User>>;
}

/// Storage for photos
#[async_trait]
pub trait PhotoRepository: Send + Sync {
    async fn create(&self, new_photo: &NewPhoto) -> DatabaseResult<Photo>;

    async fn get_all(&self) -> DatabaseResult<Vec<PhotoDetails>>;

    async fn get_by_id(&self, id: i64) -> DatabaseResult<Option<PhotoDetails>>;

    /// Returns `None` if the photo no longer exists
    async fn update(&self, id: i64, changes: &PhotoUpdate) -> DatabaseResult<Option<Photo>>;

    /// Returns whether a row was deleted
    async fn delete(&self, id: i64) -> DatabaseResult<bool>;
}

/// Storage for comments
#[async_trait]
pub trait CommentRepository: Send + Sync {
    async fn create(&self, new_comment: &NewComment) -> DatabaseResult<Comment>;

    async fn get_all(&self) -> DatabaseResult<Vec<CommentDetails>>;

    async fn get_by_id(&self, id: i64) -> DatabaseResult<Option<CommentDetails>>;

    async fn update(&self, id: i64, changes: &CommentUpdate) -> DatabaseResult<Option<Comment>>;

    async fn delete(&self, id: i64) -> DatabaseResult<bool>;
}

/// Storage for social media links
#[async_trait]
pub trait SocialMediaRepository: Send + Sync {
    async fn create(&self, new_social_media: &NewSocialMedia) -> DatabaseResult<SocialMedia>;

    async fn get_all(&self) -> DatabaseResult<Vec<SocialMediaDetails>>;

    async fn get_by_id(&self, id: i64) -> DatabaseResult<Option<SocialMediaDetails>>;

    async fn update(
        &self,
        id: i64,
        changes: &SocialMediaUpdate,
    ) -> DatabaseResult<Option<SocialMedia>>;

    async fn delete(&self, id: i64) -> DatabaseResult<bool>;
}
