//! In-memory repositories used by the HTTP tests

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use common::error::{DatabaseError, DatabaseResult};
use tokio::sync::Mutex;

use super::{CommentRepository, PhotoRepository, SocialMediaRepository, UserRepository};
use crate::models::{
    Comment, CommentDetails, CommentPhoto, CommentUpdate, NewComment, NewPhoto, NewSocialMedia,
    NewUser, OwnerSummary, Photo, PhotoDetails, PhotoUpdate, SocialMedia, SocialMediaDetails,
    SocialMediaUpdate, User,
};

#[derive(Default)]
struct Tables {
    next_id: i64,
    users: BTreeMap<i64, User>,
    photos: BTreeMap<i64, Photo>,
    comments: BTreeMap<i64, Comment>,
    social_medias: BTreeMap<i64, SocialMedia>,
}

impl Tables {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn owner(&self, user_id: i64) -> OwnerSummary {
        OwnerSummary {
            username: self
                .users
                .get(&user_id)
                .map(|u| u.username.clone())
                .unwrap_or_default(),
        }
    }

    fn comment_details(&self, comment: &Comment) -> CommentDetails {
        let photo = self.photos.get(&comment.photo_id);
        CommentDetails {
            comment: comment.clone(),
            user: self.owner(comment.user_id),
            photo: CommentPhoto {
                title: photo.map(|p| p.title.clone()).unwrap_or_default(),
                caption: photo.map(|p| p.caption.clone()).unwrap_or_default(),
                photo_url: photo.map(|p| p.photo_url.clone()).unwrap_or_default(),
            },
        }
    }
}

/// Shared in-memory store implementing every repository trait
#[derive(Clone, Default)]
pub struct MemoryStore {
    tables: Arc<Mutex<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn create(&self, new_user: &NewUser) -> DatabaseResult<User> {
        let mut tables = self.tables.lock().await;

        if tables.users.values().any(|u| u.email == new_user.email) {
            return Err(DatabaseError::UniqueViolation("idx_users_email".to_string()));
        }
        if tables.users.values().any(|u| u.username == new_user.username) {
            return Err(DatabaseError::UniqueViolation(
                "idx_users_username".to_string(),
            ));
        }

        let user = User {
            id: tables.next_id(),
            username: new_user.username.clone(),
            email: new_user.email.clone(),
            age: new_user.age,
            password_hash: new_user.password_hash.clone(),
        };
        tables.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> DatabaseResult<Option<User>> {
        let tables = self.tables.lock().await;
        Ok(tables.users.values().find(|u| u.email == email).cloned())
    }
}

#[async_trait]
impl PhotoRepository for MemoryStore {
    async fn create(&self, new_photo: &NewPhoto) -> DatabaseResult<Photo> {
        let mut tables = self.tables.lock().await;
        let now = Utc::now();
        let photo = Photo {
            id: tables.next_id(),
            title: new_photo.title.clone(),
            caption: new_photo.caption.clone(),
            photo_url: new_photo.photo_url.clone(),
            user_id: new_photo.user_id,
            created_at: now,
            updated_at: now,
        };
        tables.photos.insert(photo.id, photo.clone());
        Ok(photo)
    }

    async fn get_all(&self) -> DatabaseResult<Vec<PhotoDetails>> {
        let tables = self.tables.lock().await;
        Ok(tables
            .photos
            .values()
            .map(|photo| PhotoDetails {
                photo: photo.clone(),
                user: tables.owner(photo.user_id),
            })
            .collect())
    }

    async fn get_by_id(&self, id: i64) -> DatabaseResult<Option<PhotoDetails>> {
        let tables = self.tables.lock().await;
        Ok(tables.photos.get(&id).map(|photo| PhotoDetails {
            photo: photo.clone(),
            user: tables.owner(photo.user_id),
        }))
    }

    async fn update(&self, id: i64, changes: &PhotoUpdate) -> DatabaseResult<Option<Photo>> {
        let mut tables = self.tables.lock().await;
        Ok(tables.photos.get_mut(&id).map(|photo| {
            photo.title = changes.title.clone();
            photo.caption = changes.caption.clone();
            photo.photo_url = changes.photo_url.clone();
            photo.updated_at = Utc::now();
            photo.clone()
        }))
    }

    async fn delete(&self, id: i64) -> DatabaseResult<bool> {
        let mut tables = self.tables.lock().await;
        let deleted = tables.photos.remove(&id).is_some();
        if deleted {
            tables.comments.retain(|_, c| c.photo_id != id);
        }
        Ok(deleted)
    }
}

#[async_trait]
impl CommentRepository for MemoryStore {
    async fn create(&self, new_comment: &NewComment) -> DatabaseResult<Comment> {
        let mut tables = self.tables.lock().await;
        if !tables.photos.contains_key(&new_comment.photo_id) {
            return Err(DatabaseError::ForeignKeyViolation(
                "comments_photo_id_fkey".to_string(),
            ));
        }

        let now = Utc::now();
        let comment = Comment {
            id: tables.next_id(),
            message: new_comment.message.clone(),
            photo_id: new_comment.photo_id,
            user_id: new_comment.user_id,
            created_at: now,
            updated_at: now,
        };
        tables.comments.insert(comment.id, comment.clone());
        Ok(comment)
    }

    async fn get_all(&self) -> DatabaseResult<Vec<CommentDetails>> {
        let tables = self.tables.lock().await;
        Ok(tables
            .comments
            .values()
            .map(|c| tables.comment_details(c))
            .collect())
    }

    async fn get_by_id(&self, id: i64) -> DatabaseResult<Option<CommentDetails>> {
        let tables = self.tables.lock().await;
        Ok(tables.comments.get(&id).map(|c| tables.comment_details(c)))
    }

    async fn update(&self, id: i64, changes: &CommentUpdate) -> DatabaseResult<Option<Comment>> {
        let mut tables = self.tables.lock().await;
        Ok(tables.comments.get_mut(&id).map(|comment| {
            comment.message = changes.message.clone();
            comment.updated_at = Utc::now();
            comment.clone()
        }))
    }

    async fn delete(&self, id: i64) -> DatabaseResult<bool> {
        let mut tables = self.tables.lock().await;
        Ok(tables.comments.remove(&id).is_some())
    }
}

#[async_trait]
impl SocialMediaRepository for MemoryStore {
    async fn create(&self, new_social_media: &NewSocialMedia) -> DatabaseResult<SocialMedia> {
        let mut tables = self.tables.lock().await;
        let now = Utc::now();
        let social_media = SocialMedia {
            id: tables.next_id(),
            name: new_social_media.name.clone(),
            social_media_url: new_social_media.social_media_url.clone(),
            user_id: new_social_media.user_id,
            created_at: now,
            updated_at: now,
        };
        tables
            .social_medias
            .insert(social_media.id, social_media.clone());
        Ok(social_media)
    }

    async fn get_all(&self) -> DatabaseResult<Vec<SocialMediaDetails>> {
        let tables = self.tables.lock().await;
        Ok(tables
            .social_medias
            .values()
            .map(|s| SocialMediaDetails {
                social_media: s.clone(),
                user: tables.owner(s.user_id),
            })
            .collect())
    }

    async fn get_by_id(&self, id: i64) -> DatabaseResult<Option<SocialMediaDetails>> {
        let tables = self.tables.lock().await;
        Ok(tables.social_medias.get(&id).map(|s| SocialMediaDetails {
            social_media: s.clone(),
            user: tables.owner(s.user_id),
        }))
    }

    async fn update(
        &self,
        id: i64,
        changes: &SocialMediaUpdate,
    ) -> DatabaseResult<Option<SocialMedia>> {
        let mut tables = self.tables.lock().await;
        Ok(tables.social_medias.get_mut(&id).map(|s| {
            s.name = changes.name.clone();
            s.social_media_url = changes.social_media_url.clone();
            s.updated_at = Utc::now();
            s.clone()
        }))
    }

    async fn delete(&self, id: i64) -> DatabaseResult<bool> {
        let mut tables = self.tables.lock().await;
        Ok(tables.social_medias.remove(&id).is_some())
    }
}
