//! Application state shared across handlers

use std::sync::Arc;

use crate::{
    jwt::JwtService,
    password::CredentialHasher,
    repositories::{CommentRepository, PhotoRepository, SocialMediaRepository, UserRepository},
};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub jwt_service: JwtService,
    pub hasher: CredentialHasher,
    pub user_repository: Arc<dyn UserRepository>,
    pub photo_repository: Arc<dyn PhotoRepository>,
    pub comment_repository: Arc<dyn CommentRepository>,
    pub social_media_repository: Arc<dyn SocialMediaRepository>,
}

#[cfg(test)]
impl AppState {
    /// State backed by a fresh in-memory store
    pub fn in_memory() -> Self {
        let store = crate::repositories::memory::MemoryStore::new();

        Self {
            jwt_service: crate::jwt::test_service(),
            hasher: crate::password::fast_hasher(),
            user_repository: Arc::new(store.clone()),
            photo_repository: Arc::new(store.clone()),
            comment_repository: Arc::new(store.clone()),
            social_media_repository: Arc::new(store),
        }
    }
}
