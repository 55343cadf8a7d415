// ABOUTME: SQLite persistence for the feature board
// ABOUTME: Feature store, vote ledger, comment log and the service that ties them together

pub mod board;
pub mod comments;
pub mod db;
pub mod error;
pub mod features;
pub mod votes;

pub use board::FeatureBoard;
pub use comments::CommentStorage;
pub use db::{connect, run_migrations, DatabaseConfig};
pub use error::{StorageError, StorageResult};
pub use features::FeatureStorage;
pub use votes::VoteStorage;
