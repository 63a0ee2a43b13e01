//! Comment model and related payloads

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{OwnerSummary, Owned};

/// Comment entity
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Comment {
    pub id: i64,
    pub message: String,
    pub photo_id: i64,
    pub user_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Owned for Comment {
    fn owner_id(&self) -> i64 {
        self.user_id
    }
}

/// Summary of the photo a comment belongs to
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommentPhoto {
    pub title: String,
    pub caption: String,
    pub photo_url: String,
}

/// Comment joined with its author and photo, returned by reads
#[derive(Debug, Clone, Serialize)]
pub struct CommentDetails {
    #[serde(flatten)]
    pub comment: Comment,
    pub user: OwnerSummary,
    pub photo: CommentPhoto,
}

/// New comment creation payload
#[derive(Debug, Clone)]
pub struct NewComment {
    pub message: String,
    pub photo_id: i64,
    pub user_id: i64,
}

/// Mutable comment fields
#[derive(Debug, Clone)]
pub struct CommentUpdate {
    pub message: String,
}

/// Request for comment creation
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CreateCommentRequest {
    pub message: String,
    pub photo_id: Option<i64>,
}

/// Request for comment update
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UpdateCommentRequest {
    pub message: String,
}
