//! Photo model and related payloads

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{OwnerSummary, Owned};

/// Photo entity
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Photo {
    pub id: i64,
    pub title: String,
    pub caption: String,
    pub photo_url: String,
    pub user_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Owned for Photo {
    fn owner_id(&self) -> i64 {
        self.user_id
    }
}

/// Photo joined with its owner, returned by reads
#[derive(Debug, Clone, Serialize)]
pub struct PhotoDetails {
    #[serde(flatten)]
    pub photo: Photo,
    pub user: OwnerSummary,
}

/// New photo creation payload
#[derive(Debug, Clone)]
pub struct NewPhoto {
    pub title: String,
    pub caption: String,
    pub photo_url: String,
    pub user_id: i64,
}

/// Mutable photo fields
#[derive(Debug, Clone)]
pub struct PhotoUpdate {
    pub title: String,
    pub caption: String,
    pub photo_url: String,
}

/// Request for photo creation
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CreatePhotoRequest {
    pub title: String,
    pub caption: String,
    pub photo_url: String,
}

/// Request for photo update
pub type UpdatePhotoRequest = CreatePhotoRequest;
