//! Social media link model and related payloads

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{OwnerSummary, Owned};

/// Social media link entity
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SocialMedia {
    pub id: i64,
    pub name: String,
    pub social_media_url: String,
    pub user_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Owned for SocialMedia {
    fn owner_id(&self) -> i64 {
        self.user_id
    }
}

/// Social media link joined with its owner, returned by reads
#[derive(Debug, Clone, Serialize)]
pub struct SocialMediaDetails {
    #[serde(flatten)]
    pub social_media: SocialMedia,
    pub user: OwnerSummary,
}

/// New social media link payload
#[derive(Debug, Clone)]
pub struct NewSocialMedia {
    pub name: String,
    pub social_media_url: String,
    pub user_id: i64,
}

/// Mutable social media link fields
#[derive(Debug, Clone)]
pub struct SocialMediaUpdate {
    pub name: String,
    pub social_media_url: String,
}

/// Request for social media link creation
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CreateSocialMediaRequest {
    pub name: String,
    pub social_media_url: String,
}

/// Request for social media link update
pub type UpdateSocialMediaRequest = CreateSocialMediaRequest;
