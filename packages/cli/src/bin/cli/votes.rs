use clap::ValueEnum;
use colored::*;

use featureboard_core::{VoteAction, VoteType};
use featureboard_storage::FeatureBoard;

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum VoteArg {
    Upvote,
    Downvote,
}

impl From<VoteArg> for VoteType {
    fn from(arg: VoteArg) -> Self {
        match arg {
            VoteArg::Upvote => VoteType::Upvote,
            VoteArg::Downvote => VoteType::Downvote,
        }
    }
}

pub async fn toggle_vote(
    board: &FeatureBoard,
    user: &str,
    feature_id: &str,
    vote: VoteArg,
) -> anyhow::Result<()> {
    let vote_type = VoteType::from(vote);
    let result = board
        .toggle_vote(user, feature_id, vote_type.as_str())
        .await?;

    let message = match (result.action, result.current_vote) {
        (VoteAction::Added, Some(current)) => format!("Added your {} to {}", current, feature_id),
        (VoteAction::Changed, Some(current)) => {
            format!("Changed your vote on {} to {}", feature_id, current)
        }
        _ => format!("Removed your vote from {}", feature_id),
    };
    println!("{} {}", "✓".green().bold(), message);

    let feature = board.get_feature(user, feature_id).await?;
    println!(
        "  {} up, {} down (net {})",
        feature.upvote_count.to_string().green(),
        feature.downvote_count.to_string().red(),
        feature.net_votes.to_string().cyan()
    );

    Ok(())
}
