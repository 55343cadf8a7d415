// ABOUTME: Input validation for feature, comment and caller fields
// ABOUTME: Trims user text and enforces length bounds before anything is stored

use thiserror::Error;

pub const MIN_TITLE_LENGTH: usize = 3;
pub const MAX_TITLE_LENGTH: usize = 200;
pub const MIN_DESCRIPTION_LENGTH: usize = 10;
pub const MAX_DESCRIPTION_LENGTH: usize = 5000;
pub const MAX_COMMENT_LENGTH: usize = 2000;

/// Maximum size for user identifiers
pub const MAX_USER_ID_LENGTH: usize = 255;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{field} cannot be empty")]
    EmptyField { field: &'static str },
    #[error("{field} must be at least {min} characters (got {actual})")]
    TooShort {
        field: &'static str,
        min: usize,
        actual: usize,
    },
    #[error("{field} must be at most {max} characters (got {actual})")]
    TooLong {
        field: &'static str,
        max: usize,
        actual: usize,
    },
    #[error("Invalid status '{0}': expected one of proposed, planned, in_progress, completed, rejected")]
    InvalidStatus(String),
    #[error("Invalid vote type '{0}': expected upvote or downvote")]
    InvalidVoteType(String),
    #[error("{field} contains control characters")]
    ControlCharacters { field: &'static str },
    #[error("Invalid user id: {0}")]
    InvalidUserId(String),
}

pub fn validate_title(title: &str) -> Result<String, ValidationError> {
    validate_text_field(title, "Title", MIN_TITLE_LENGTH, MAX_TITLE_LENGTH)
}

pub fn validate_description(description: &str) -> Result<String, ValidationError> {
    validate_text_field(
        description,
        "Description",
        MIN_DESCRIPTION_LENGTH,
        MAX_DESCRIPTION_LENGTH,
    )
}

/// Comments only need to be non-blank; there is no minimum length
pub fn validate_comment_text(text: &str) -> Result<String, ValidationError> {
    validate_text_field(text, "Comment", 1, MAX_COMMENT_LENGTH)
}

pub fn validate_user_id(user_id: &str) -> Result<String, ValidationError> {
    let trimmed = user_id.trim();

    if trimmed.is_empty() {
        return Err(ValidationError::InvalidUserId(
            "user id cannot be empty".to_string(),
        ));
    }

    if trimmed.chars().count() > MAX_USER_ID_LENGTH {
        return Err(ValidationError::InvalidUserId(format!(
            "user id exceeds {} characters",
            MAX_USER_ID_LENGTH
        )));
    }

    if trimmed.chars().any(char::is_control) {
        return Err(ValidationError::InvalidUserId(
            "user id contains control characters".to_string(),
        ));
    }

    Ok(trimmed.to_string())
}

/// Line breaks and tabs are allowed in free text; other control characters are not
fn is_disallowed_control(c: char) -> bool {
    c.is_control() && !matches!(c, '\n' | '\r' | '\t')
}

/// Trim a free-text field and check its length in characters
fn validate_text_field(
    value: &str,
    field: &'static str,
    min: usize,
    max: usize,
) -> Result<String, ValidationError> {
    let trimmed = value.trim();

    if trimmed.is_empty() {
        return Err(ValidationError::EmptyField { field });
    }

    if trimmed.chars().any(is_disallowed_control) {
        return Err(ValidationError::ControlCharacters { field });
    }

    let actual = trimmed.chars().count();
    if actual < min {
        return Err(ValidationError::TooShort { field, min, actual });
    }
    if actual > max {
        return Err(ValidationError::TooLong { field, max, actual });
    }

    Ok(trimmed.to_string())
}
