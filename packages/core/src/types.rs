// ABOUTME: Domain type definitions for features, votes and comments
// ABOUTME: Includes the status/vote enums and the aggregated feature view

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::validation::{validate_description, validate_title, ValidationError};

/// Lifecycle status of a proposed feature
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureStatus {
    #[default]
    Proposed,
    Planned,
    InProgress,
    Completed,
    Rejected,
}

impl FeatureStatus {
    pub const ALL: [FeatureStatus; 5] = [
        FeatureStatus::Proposed,
        FeatureStatus::Planned,
        FeatureStatus::InProgress,
        FeatureStatus::Completed,
        FeatureStatus::Rejected,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FeatureStatus::Proposed => "proposed",
            FeatureStatus::Planned => "planned",
            FeatureStatus::InProgress => "in_progress",
            FeatureStatus::Completed => "completed",
            FeatureStatus::Rejected => "rejected",
        }
    }
}

impl fmt::Display for FeatureStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FeatureStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FeatureStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| ValidationError::InvalidStatus(s.to_string()))
    }
}

/// Direction of a single user's vote
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VoteType {
    Upvote,
    Downvote,
}

impl VoteType {
    pub fn as_str(&self) -> &'static str {
        match self {
            VoteType::Upvote => "upvote",
            VoteType::Downvote => "downvote",
        }
    }
}

impl fmt::Display for VoteType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VoteType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "upvote" => Ok(VoteType::Upvote),
            "downvote" => Ok(VoteType::Downvote),
            _ => Err(ValidationError::InvalidVoteType(s.to_string())),
        }
    }
}

/// What a toggle did to the caller's vote
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VoteAction {
    Added,
    Removed,
    Changed,
}

impl fmt::Display for VoteAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            VoteAction::Added => "added",
            VoteAction::Removed => "removed",
            VoteAction::Changed => "changed",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    pub id: String,
    pub title: String,
    pub description: String,
    pub status: FeatureStatus,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A feature decorated with read-time vote and comment aggregates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureWithStats {
    #[serde(flatten)]
    pub feature: Feature,
    pub upvote_count: i64,
    pub downvote_count: i64,
    pub net_votes: i64,
    pub comment_count: i64,
    /// The calling user's own vote, if any
    pub user_vote: Option<VoteType>,
}

impl FeatureWithStats {
    pub fn new(
        feature: Feature,
        upvote_count: i64,
        downvote_count: i64,
        comment_count: i64,
        user_vote: Option<VoteType>,
    ) -> Self {
        Self {
            feature,
            upvote_count,
            downvote_count,
            net_votes: upvote_count - downvote_count,
            comment_count,
            user_vote,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vote {
    pub feature_id: String,
    pub user_id: String,
    pub vote_type: VoteType,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: String,
    pub feature_id: String,
    pub user_id: String,
    pub comment_text: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToggleVoteResult {
    pub action: VoteAction,
    pub current_vote: Option<VoteType>,
}

/// Raw, unvalidated input for proposing a feature
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FeatureCreateInput {
    pub title: String,
    pub description: String,
    pub status: Option<String>,
}

/// Validated feature ready to be stored
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewFeature {
    pub title: String,
    pub description: String,
    pub status: FeatureStatus,
}

impl FeatureCreateInput {
    /// Trim and check every field, defaulting the status to `proposed`
    pub fn validate(&self) -> Result<NewFeature, ValidationError> {
        let title = validate_title(&self.title)?;
        let description = validate_description(&self.description)?;
        let status = match self.status.as_deref() {
            Some(raw) => raw.parse()?,
            None => FeatureStatus::default(),
        };

        Ok(NewFeature {
            title,
            description,
            status,
        })
    }
}
