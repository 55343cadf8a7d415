// ABOUTME: Vote ledger storage using SQLite
// ABOUTME: Applies the toggle state machine atomically per (feature, user) pair

use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use tracing::debug;

use featureboard_core::{apply_toggle, ToggleVoteResult, Vote, VoteAction, VoteType};

use crate::error::{StorageError, StorageResult};
use crate::features::feature_exists_with;

pub struct VoteStorage {
    pool: SqlitePool,
}

impl VoteStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Toggle `user_id`'s vote on `feature_id` and report what happened.
    ///
    /// The whole read-modify-write runs in one transaction. Its first
    /// statement is the `DELETE ... RETURNING` of the prior vote, so the
    /// SQLite write lock is held before the prior state is known and
    /// concurrent toggles for the same pair queue behind each other.
    pub async fn toggle_vote(
        &self,
        user_id: &str,
        feature_id: &str,
        requested: VoteType,
    ) -> StorageResult<ToggleVoteResult> {
        debug!(
            "Toggling vote: feature {} user {} requested {}",
            feature_id, user_id, requested
        );

        let mut tx = self.pool.begin().await?;

        let prior_row = sqlx::query(
            "DELETE FROM feature_votes WHERE feature_id = ? AND user_id = ?
             RETURNING vote_type, created_at",
        )
        .bind(feature_id)
        .bind(user_id)
        .fetch_optional(&mut *tx)
        .await?;

        let prior = match prior_row {
            Some(row) => {
                let vote_type = parse_vote_type(&row)?;
                let created_at: DateTime<Utc> = row.try_get("created_at")?;
                Some((vote_type, created_at))
            }
            None => {
                if !feature_exists_with(&mut *tx, feature_id).await? {
                    // Dropping the transaction rolls it back
                    return Err(StorageError::FeatureNotFound(feature_id.to_string()));
                }
                None
            }
        };

        let transition = apply_toggle(prior.map(|(vote_type, _)| vote_type), requested);

        if let Some(next) = transition.next {
            let created_at = match (transition.action, prior) {
                (VoteAction::Changed, Some((_, original))) => original,
                _ => Utc::now(),
            };

            sqlx::query(
                "INSERT INTO feature_votes (feature_id, user_id, vote_type, created_at)
                 VALUES (?, ?, ?, ?)",
            )
            .bind(feature_id)
            .bind(user_id)
            .bind(next.as_str())
            .bind(created_at)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        debug!(
            "Vote {} on feature {} by {} (now {:?})",
            transition.action, feature_id, user_id, transition.next
        );

        Ok(ToggleVoteResult {
            action: transition.action,
            current_vote: transition.next,
        })
    }

    /// Get a user's current vote on a feature, if any
    pub async fn get_vote(&self, user_id: &str, feature_id: &str) -> StorageResult<Option<Vote>> {
        let row = sqlx::query(
            "SELECT feature_id, user_id, vote_type, created_at
             FROM feature_votes WHERE feature_id = ? AND user_id = ?",
        )
        .bind(feature_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(row_to_vote).transpose()
    }

    /// All votes recorded for a feature, oldest first
    pub async fn list_votes(&self, feature_id: &str) -> StorageResult<Vec<Vote>> {
        let rows = sqlx::query(
            "SELECT feature_id, user_id, vote_type, created_at
             FROM feature_votes WHERE feature_id = ?
             ORDER BY created_at, user_id",
        )
        .bind(feature_id)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(row_to_vote).collect()
    }
}

fn parse_vote_type(row: &SqliteRow) -> StorageResult<VoteType> {
    let raw: String = row.try_get("vote_type")?;
    raw.parse()
        .map_err(|_| StorageError::Database(format!("Unknown vote type '{}'", raw)))
}

fn row_to_vote(row: &SqliteRow) -> StorageResult<Vote> {
    Ok(Vote {
        feature_id: row.try_get("feature_id")?,
        user_id: row.try_get("user_id")?,
        vote_type: parse_vote_type(row)?,
        created_at: row.try_get("created_at")?,
    })
}
