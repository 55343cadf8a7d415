// ABOUTME: Feature storage layer using SQLite
// ABOUTME: Creates features and reads them back joined with vote and comment aggregates

use chrono::Utc;
use sqlx::sqlite::SqliteRow;
use sqlx::{Executor, Row, Sqlite, SqlitePool};
use tracing::debug;

use featureboard_core::{
    generate_feature_id, Feature, FeatureStatus, FeatureWithStats, NewFeature, VoteType,
};

use crate::error::{StorageError, StorageResult};

/// Aggregation view: counts are recomputed from the ledger and comment log on every read
const FEATURE_WITH_STATS_SELECT: &str = r#"
    SELECT
        f.id, f.title, f.description, f.status, f.created_by, f.created_at, f.updated_at,
        (SELECT COUNT(*) FROM feature_votes v
            WHERE v.feature_id = f.id AND v.vote_type = 'upvote') AS upvote_count,
        (SELECT COUNT(*) FROM feature_votes v
            WHERE v.feature_id = f.id AND v.vote_type = 'downvote') AS downvote_count,
        (SELECT COUNT(*) FROM feature_comments c
            WHERE c.feature_id = f.id) AS comment_count,
        (SELECT v.vote_type FROM feature_votes v
            WHERE v.feature_id = f.id AND v.user_id = ?) AS user_vote
    FROM features f
"#;

pub struct FeatureStorage {
    pool: SqlitePool,
}

impl FeatureStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a validated feature attributed to `created_by`
    pub async fn create_feature(
        &self,
        created_by: &str,
        input: NewFeature,
    ) -> StorageResult<Feature> {
        let feature_id = generate_feature_id();
        let now = Utc::now();

        debug!(
            "Creating feature: {} (title: {}, status: {})",
            feature_id, input.title, input.status
        );

        sqlx::query(
            r#"
            INSERT INTO features (id, title, description, status, created_by, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&feature_id)
        .bind(&input.title)
        .bind(&input.description)
        .bind(input.status.as_str())
        .bind(created_by)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await?;

        self.get_feature(&feature_id).await
    }

    /// Get a single feature by ID, without aggregates
    pub async fn get_feature(&self, feature_id: &str) -> StorageResult<Feature> {
        debug!("Fetching feature: {}", feature_id);

        let row = sqlx::query(
            "SELECT id, title, description, status, created_by, created_at, updated_at
             FROM features WHERE id = ?",
        )
        .bind(feature_id)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(r) => row_to_feature(&r),
            None => Err(StorageError::FeatureNotFound(feature_id.to_string())),
        }
    }

    pub async fn feature_exists(&self, feature_id: &str) -> StorageResult<bool> {
        feature_exists_with(&self.pool, feature_id).await
    }

    /// List features with aggregates for `viewer`, newest first
    pub async fn list_features_with_stats(
        &self,
        viewer: &str,
        status: Option<FeatureStatus>,
    ) -> StorageResult<Vec<FeatureWithStats>> {
        debug!(
            "Listing features (viewer: {}, status: {:?})",
            viewer, status
        );

        let query = format!(
            "{} WHERE (? IS NULL OR f.status = ?) ORDER BY f.created_at DESC, f.rowid DESC",
            FEATURE_WITH_STATS_SELECT
        );
        let status = status.map(|s| s.as_str());

        let rows = sqlx::query(&query)
            .bind(viewer)
            .bind(status)
            .bind(status)
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(row_to_feature_with_stats).collect()
    }

    /// Get one feature with aggregates for `viewer`
    pub async fn get_feature_with_stats(
        &self,
        viewer: &str,
        feature_id: &str,
    ) -> StorageResult<FeatureWithStats> {
        debug!("Fetching feature with stats: {} (viewer: {})", feature_id, viewer);

        let query = format!("{} WHERE f.id = ?", FEATURE_WITH_STATS_SELECT);
        let row = sqlx::query(&query)
            .bind(viewer)
            .bind(feature_id)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(r) => row_to_feature_with_stats(&r),
            None => Err(StorageError::FeatureNotFound(feature_id.to_string())),
        }
    }
}

/// Existence check that can run inside a caller's transaction
pub(crate) async fn feature_exists_with<'e, E>(executor: E, feature_id: &'e str) -> StorageResult<bool>
where
    E: Executor<'e, Database = Sqlite>,
{
    let found: Option<i64> = sqlx::query_scalar("SELECT 1 FROM features WHERE id = ?")
        .bind(feature_id)
        .fetch_optional(executor)
        .await?;

    Ok(found.is_some())
}

fn row_to_feature(row: &SqliteRow) -> StorageResult<Feature> {
    let status: String = row.try_get("status")?;

    Ok(Feature {
        id: row.try_get("id")?,
        title: row.try_get("title")?,
        description: row.try_get("description")?,
        status: status
            .parse()
            .map_err(|_| StorageError::Database(format!("Unknown feature status '{}'", status)))?,
        created_by: row.try_get("created_by")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

fn row_to_feature_with_stats(row: &SqliteRow) -> StorageResult<FeatureWithStats> {
    let feature = row_to_feature(row)?;
    let user_vote: Option<String> = row.try_get("user_vote")?;
    let user_vote = user_vote
        .map(|raw| {
            raw.parse::<VoteType>()
                .map_err(|_| StorageError::Database(format!("Unknown vote type '{}'", raw)))
        })
        .transpose()?;

    Ok(FeatureWithStats::new(
        feature,
        row.try_get("upvote_count")?,
        row.try_get("downvote_count")?,
        row.try_get("comment_count")?,
        user_vote,
    ))
}
