// ABOUTME: Shared utility functions for the feature board
// ABOUTME: Prefixed identifier generation for stored records

use crate::constants::{COMMENT_ID_PREFIX, FEATURE_ID_PREFIX};

/// Generate a unique feature ID (`feat-<nanoid>`)
pub fn generate_feature_id() -> String {
    format!("{}-{}", FEATURE_ID_PREFIX, nanoid::nanoid!())
}

/// Generate a unique comment ID (`cmt-<nanoid>`)
pub fn generate_comment_id() -> String {
    format!("{}-{}", COMMENT_ID_PREFIX, nanoid::nanoid!())
}
