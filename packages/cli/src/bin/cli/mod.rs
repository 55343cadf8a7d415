pub mod comments;
pub mod features;
pub mod utils;
pub mod votes;
