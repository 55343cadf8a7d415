// ABOUTME: Feature board service implementing the four board operations
// ABOUTME: Validates raw caller input and dispatches to the feature, vote and comment storages

use sqlx::SqlitePool;
use tracing::{debug, info};

use featureboard_core::{
    validate_comment_text, validate_user_id, Comment, FeatureCreateInput, FeatureStatus,
    FeatureWithStats, ToggleVoteResult, VoteType,
};

use crate::comments::CommentStorage;
use crate::db::{connect, DatabaseConfig};
use crate::error::StorageResult;
use crate::features::FeatureStorage;
use crate::votes::VoteStorage;

/// The vote & aggregation service.
///
/// Every operation takes the caller's user id first; string arguments are
/// the raw values received from a client and are validated here before any
/// state is touched.
pub struct FeatureBoard {
    pool: SqlitePool,
    features: FeatureStorage,
    votes: VoteStorage,
    comments: CommentStorage,
}

impl FeatureBoard {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            features: FeatureStorage::new(pool.clone()),
            votes: VoteStorage::new(pool.clone()),
            comments: CommentStorage::new(pool.clone()),
            pool,
        }
    }

    /// Connect to (and migrate) the configured database
    pub async fn open(config: &DatabaseConfig) -> StorageResult<Self> {
        let pool = connect(config).await?;
        Ok(Self::new(pool))
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub fn features(&self) -> &FeatureStorage {
        &self.features
    }

    pub fn votes(&self) -> &VoteStorage {
        &self.votes
    }

    pub fn comments(&self) -> &CommentStorage {
        &self.comments
    }

    /// All features with aggregates, optionally filtered by status
    pub async fn list_features(
        &self,
        caller: &str,
        filter_status: Option<&str>,
    ) -> StorageResult<Vec<FeatureWithStats>> {
        let caller = validate_user_id(caller)?;
        let status = filter_status
            .map(|raw| raw.parse::<FeatureStatus>())
            .transpose()?;

        self.features.list_features_with_stats(&caller, status).await
    }

    /// Propose a feature and return its new id
    pub async fn create_feature(
        &self,
        caller: &str,
        input: FeatureCreateInput,
    ) -> StorageResult<String> {
        let caller = validate_user_id(caller)?;
        let new_feature = input.validate()?;

        let feature = self.features.create_feature(&caller, new_feature).await?;
        info!("Feature {} created by {}", feature.id, caller);

        Ok(feature.id)
    }

    /// Add, remove or flip the caller's vote on a feature
    pub async fn toggle_vote(
        &self,
        caller: &str,
        feature_id: &str,
        vote_type: &str,
    ) -> StorageResult<ToggleVoteResult> {
        let caller = validate_user_id(caller)?;
        let requested: VoteType = vote_type.parse()?;

        self.votes.toggle_vote(&caller, feature_id, requested).await
    }

    /// Append a comment and return its new id
    pub async fn add_comment(
        &self,
        caller: &str,
        feature_id: &str,
        comment_text: &str,
    ) -> StorageResult<String> {
        let caller = validate_user_id(caller)?;
        let text = validate_comment_text(comment_text)?;

        let comment = self.comments.add_comment(&caller, feature_id, &text).await?;
        debug!("Comment {} added to {}", comment.id, feature_id);

        Ok(comment.id)
    }

    /// The comment log of one feature, newest first
    pub async fn list_comments(&self, feature_id: &str) -> StorageResult<Vec<Comment>> {
        self.comments.list_comments(feature_id).await
    }

    /// One feature with aggregates for the caller
    pub async fn get_feature(
        &self,
        caller: &str,
        feature_id: &str,
    ) -> StorageResult<FeatureWithStats> {
        let caller = validate_user_id(caller)?;
        self.features.get_feature_with_stats(&caller, feature_id).await
    }
}
