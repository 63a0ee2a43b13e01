//! Comment repository for database operations

use async_trait::async_trait;
use common::error::DatabaseResult;
use sqlx::{PgPool, Row, postgres::PgRow};

use super::CommentRepository;
use crate::models::{Comment, CommentDetails, CommentPhoto, CommentUpdate, NewComment, OwnerSummary};

/// PostgreSQL comment repository
#[derive(Clone)]
pub struct PgCommentRepository {
    pool: PgPool,
}

impl PgCommentRepository {
    /// Create a new comment repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn comment_from_row(row: &PgRow) -> Comment {
    Comment {
        id: row.get("id"),
        message: row.get("message"),
        photo_id: row.get("photo_id"),
        user_id: row.get("user_id"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

fn details_from_row(row: &PgRow) -> CommentDetails {
    CommentDetails {
        comment: comment_from_row(row),
        user: OwnerSummary {
            username: row.get("username"),
        },
        photo: CommentPhoto {
            title: row.get("photo_title"),
            caption: row.get("photo_caption"),
            photo_url: row.get("photo_url"),
        },
    }
}

#[async_trait]
impl CommentRepository for PgCommentRepository {
    async fn create(&self, new_comment: &NewComment) -> DatabaseResult<Comment> {
        let row = sqlx::query(
            r#"
            INSERT INTO comments (message, photo_id, user_id)
            VALUES ($1, $2, $3)
            RETURNING id, message, photo_id, user_id, created_at, updated_at
            "#,
        )
        .bind(&new_comment.message)
        .bind(new_comment.photo_id)
        .bind(new_comment.user_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(comment_from_row(&row))
    }

    async fn get_all(&self) -> DatabaseResult<Vec<CommentDetails>> {
        let rows = sqlx::query(
            r#"
            SELECT c.id, c.message, c.photo_id, c.user_id, c.created_at, c.updated_at,
                   u.username,
                   p.title AS photo_title, p.caption AS photo_caption, p.photo_url
            FROM comments c
            JOIN users u ON u.id = c.user_id
            JOIN photos p ON p.id = c.photo_id
            ORDER BY c.id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(details_from_row).collect())
    }

    async fn get_by_id(&self, id: i64) -> DatabaseResult<Option<CommentDetails>> {
        let row = sqlx::query(
            r#"
            SELECT c.id, c.message, c.photo_id, c.user_id, c.created_at, c.updated_at,
                   u.username,
                   p.title AS photo_title, p.caption AS photo_caption, p.photo_url
            FROM comments c
            JOIN users u ON u.id = c.user_id
            JOIN photos p ON p.id = c.photo_id
            WHERE c.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(details_from_row))
    }

    async fn update(&self, id: i64, changes: &CommentUpdate) -> DatabaseResult<Option<Comment>> {
        let row = sqlx::query(
            r#"
            UPDATE comments
            SET message = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING id, message, photo_id, user_id, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(&changes.message)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(comment_from_row))
    }

    async fn delete(&self, id: i64) -> DatabaseResult<bool> {
        let result = sqlx::query("DELETE FROM comments WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
