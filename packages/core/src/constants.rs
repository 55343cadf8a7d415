use std::env;
use std::path::PathBuf;

/// File name of the board database inside the data directory
pub const DATABASE_FILE: &str = "featureboard.db";

pub const FEATURE_ID_PREFIX: &str = "feat";
pub const COMMENT_ID_PREFIX: &str = "cmt";

/// Get the path to the data directory (~/.featureboard)
pub fn featureboard_dir() -> PathBuf {
    // HOME first so tests can redirect it
    if let Ok(home) = env::var("HOME") {
        PathBuf::from(home).join(".featureboard")
    } else {
        dirs::home_dir()
            .unwrap_or_else(env::temp_dir)
            .join(".featureboard")
    }
}

/// Get the default database path (~/.featureboard/featureboard.db)
pub fn default_database_path() -> PathBuf {
    featureboard_dir().join(DATABASE_FILE)
}
