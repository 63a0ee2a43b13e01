//! Social media repository for database operations

use async_trait::async_trait;
use common::error::DatabaseResult;
use sqlx::{PgPool, Row, postgres::PgRow};

use super::SocialMediaRepository;
use crate::models::{
    NewSocialMedia, OwnerSummary, SocialMedia, SocialMediaDetails, SocialMediaUpdate,
};

/// PostgreSQL social media repository
#[derive(Clone)]
pub struct PgSocialMediaRepository {
    pool: PgPool,
}

impl PgSocialMediaRepository {
    /// Create a new social media repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn social_media_from_row(row: &PgRow) -> SocialMedia {
    SocialMedia {
        id: row.get("id"),
        name: row.get("name"),
        social_media_url: row.get("social_media_url"),
        user_id: row.get("user_id"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

fn details_from_row(row: &PgRow) -> SocialMediaDetails {
    SocialMediaDetails {
        social_media: social_media_from_row(row),
        user: OwnerSummary {
            username: row.get("username"),
        },
    }
}

#[async_trait]
impl SocialMediaRepository for PgSocialMediaRepository {
    async fn create(&self, new_social_media: &NewSocialMedia) -> DatabaseResult<SocialMedia> {
        let row = sqlx::query(
            r#"
            INSERT INTO social_medias (name, social_media_url, user_id)
            VALUES ($1, $2, $3)
            RETURNING id, name, social_media_url, user_id, created_at, updated_at
            "#,
        )
        .bind(&new_social_media.name)
        .bind(&new_social_media.social_media_url)
        .bind(new_social_media.user_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(social_media_from_row(&row))
    }

    async fn get_all(&self) -> DatabaseResult<Vec<SocialMediaDetails>> {
        let rows = sqlx::query(
            r#"
            SELECT s.id, s.name, s.social_media_url, s.user_id, s.created_at, s.updated_at,
                   u.username
            FROM social_medias s
            JOIN users u ON u.id = s.user_id
            ORDER BY s.id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(details_from_row).collect())
    }

    async fn get_by_id(&self, id: i64) -> DatabaseResult<Option<SocialMediaDetails>> {
        let row = sqlx::query(
            r#"
            SELECT s.id, s.name, s.social_media_url, s.user_id, s.created_at, s.updated_at,
                   u.username
            FROM social_medias s
            JOIN users u ON u.id = s.user_id
            WHERE s.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(details_from_row))
    }

    async fn update(
        &self,
        id: i64,
        changes: &SocialMediaUpdate,
    ) -> DatabaseResult<Option<SocialMedia>> {
        let row = sqlx::query(
            r#"
            UPDATE social_medias
            SET name = $2, social_media_url = $3, updated_at = NOW()
            WHERE id = $1
            RETURNING id, name, social_media_url, user_id, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(&changes.name)
        .bind(&changes.social_media_url)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(social_media_from_row))
    }

    async fn delete(&self, id: i64) -> DatabaseResult<bool> {
        let result = sqlx::query("DELETE FROM social_medias WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
