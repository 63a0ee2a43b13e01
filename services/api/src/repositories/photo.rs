//! Photo repository for database operations

use async_trait::async_trait;
use common::error::DatabaseResult;
use sqlx::{PgPool, Row, postgres::PgRow};

use super::PhotoRepository;
use crate::models::{NewPhoto, OwnerSummary, Photo, PhotoDetails, PhotoUpdate};

/// PostgreSQL photo repository
#[derive(Clone)]
pub struct PgPhotoRepository {
    pool: PgPool,
}

impl PgPhotoRepository {
    /// Create a new photo repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn photo_from_row(row: &PgRow) -> Photo {
    Photo {
        id: row.get("id"),
        title: row.get("title"),
        caption: row.get("caption"),
        photo_url: row.get("photo_url"),
        user_id: row.get("user_id"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

fn details_from_row(row: &PgRow) -> PhotoDetails {
    PhotoDetails {
        photo: photo_from_row(row),
        user: OwnerSummary {
            username: row.get("username"),
        },
    }
}

#[async_trait]
impl PhotoRepository for PgPhotoRepository {
    async fn create(&self, new_photo: &NewPhoto) -> DatabaseResult<Photo> {
        let row = sqlx::query(
            r#"
            INSERT INTO photos (title, caption, photo_url, user_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id, title, caption, photo_url, user_id, created_at, updated_at
            "#,
        )
        .bind(&new_photo.title)
        .bind(&new_photo.caption)
        .bind(&new_photo.photo_url)
        .bind(new_photo.user_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(photo_from_row(&row))
    }

    async fn get_all(&self) -> DatabaseResult<Vec<PhotoDetails>> {
        let rows = sqlx::query(
            r#"
            SELECT p.id, p.title, p.caption, p.photo_url, p.user_id, p.created_at, p.updated_at,
                   u.username
            FROM photos p
            JOIN users u ON u.id = p.user_id
            ORDER BY p.id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(details_from_row).collect())
    }

    async fn get_by_id(&self, id: i64) -> DatabaseResult<Option<PhotoDetails>> {
        let row = sqlx::query(
            r#"
            SELECT p.id, p.title, p.caption, p.photo_url, p.user_id, p.created_at, p.updated_at,
                   u.username
            FROM photos p
            JOIN users u ON u.id = p.user_id
            WHERE p.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(details_from_row))
    }

    async fn update(&self, id: i64, changes: &PhotoUpdate) -> DatabaseResult<Option<Photo>> {
        let row = sqlx::query(
            r#"
            UPDATE photos
            SET title = $2, caption = $3, photo_url = $4, updated_at = NOW()
            WHERE id = $1
            RETURNING id, title, caption, photo_url, user_id, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(&changes.title)
        .bind(&changes.caption)
        .bind(&changes.photo_url)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(photo_from_row))
    }

    async fn delete(&self, id: i64) -> DatabaseResult<bool> {
        let result = sqlx::query("DELETE FROM photos WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
