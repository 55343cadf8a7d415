// ABOUTME: Comment log storage using SQLite
// ABOUTME: Append-only comments per feature, read back newest first

use chrono::Utc;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use tracing::debug;

use featureboard_core::{generate_comment_id, Comment};

use crate::error::{StorageError, StorageResult};

pub struct CommentStorage {
    pool: SqlitePool,
}

impl CommentStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Append an already validated comment to a feature's log
    pub async fn add_comment(
        &self,
        user_id: &str,
        feature_id: &str,
        comment_text: &str,
    ) -> StorageResult<Comment> {
        let comment_id = generate_comment_id();
        let now = Utc::now();

        debug!(
            "Adding comment {} to feature {} by {}",
            comment_id, feature_id, user_id
        );

        // Conditional insert: zero rows affected means the feature is unknown
        let result = sqlx::query(
            r#"
            INSERT INTO feature_comments (id, feature_id, user_id, comment_text, created_at, updated_at)
            SELECT ?, f.id, ?, ?, ?, ? FROM features f WHERE f.id = ?
            "#,
        )
        .bind(&comment_id)
        .bind(user_id)
        .bind(comment_text)
        .bind(now)
        .bind(now)
        .bind(feature_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::FeatureNotFound(feature_id.to_string()));
        }

        self.get_comment(&comment_id).await
    }

    pub async fn get_comment(&self, comment_id: &str) -> StorageResult<Comment> {
        let row = sqlx::query(
            "SELECT id, feature_id, user_id, comment_text, created_at, updated_at
             FROM feature_comments WHERE id = ?",
        )
        .bind(comment_id)
        .fetch_one(&self.pool)
        .await?;

        row_to_comment(&row)
    }

    /// Comments on a feature, newest first. Unknown features simply have none.
    pub async fn list_comments(&self, feature_id: &str) -> StorageResult<Vec<Comment>> {
        debug!("Listing comments for feature: {}", feature_id);

        let rows = sqlx::query(
            "SELECT id, feature_id, user_id, comment_text, created_at, updated_at
             FROM feature_comments WHERE feature_id = ?
             ORDER BY created_at DESC, rowid DESC",
        )
        .bind(feature_id)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(row_to_comment).collect()
    }
}

fn row_to_comment(row: &SqliteRow) -> StorageResult<Comment> {
    Ok(Comment {
        id: row.try_get("id")?,
        feature_id: row.try_get("feature_id")?,
        user_id: row.try_get("user_id")?,
        comment_text: row.try_get("comment_text")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}
