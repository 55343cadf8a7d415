// ABOUTME: Core types, vote transitions, and validation for the feature board
// ABOUTME: Foundational package shared by the storage, API and CLI packages

pub mod constants;
pub mod types;
pub mod utils;
pub mod validation;
pub mod vote;

// Re-export main types
pub use types::{
    Comment, Feature, FeatureCreateInput, FeatureStatus, FeatureWithStats, NewFeature,
    ToggleVoteResult, Vote, VoteAction, VoteType,
};

// Re-export constants
pub use constants::{default_database_path, featureboard_dir};

// Re-export utilities
pub use utils::{generate_comment_id, generate_feature_id};

// Re-export validation
pub use validation::{
    validate_comment_text, validate_description, validate_title, validate_user_id,
    ValidationError,
};

pub use vote::{apply_toggle, VoteTransition};
