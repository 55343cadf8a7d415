use clap::Subcommand;
use colored::*;

use featureboard_storage::FeatureBoard;

use super::utils::{format_datetime, new_table};

#[derive(Subcommand)]
pub enum CommentsCommands {
    /// List comments on a feature, newest first
    List {
        /// Feature ID
        feature_id: String,
    },
    /// Comment on a feature
    Add {
        /// Feature ID
        feature_id: String,
        /// Comment text
        text: String,
    },
}

pub async fn handle_comments_command(
    board: &FeatureBoard,
    user: &str,
    command: CommentsCommands,
) -> anyhow::Result<()> {
    match command {
        CommentsCommands::List { feature_id } => list_comments(board, user, &feature_id).await,
        CommentsCommands::Add { feature_id, text } => {
            add_comment(board, user, &feature_id, &text).await
        }
    }
}

async fn list_comments(board: &FeatureBoard, user: &str, feature_id: &str) -> anyhow::Result<()> {
    let feature = board.get_feature(user, feature_id).await?;
    let comments = board.list_comments(feature_id).await?;

    println!(
        "{}",
        format!("💬 Comments on {}", feature.feature.title).blue().bold()
    );
    println!();

    if comments.is_empty() {
        println!("{}", "No comments yet".yellow());
        println!(
            "{}",
            format!("Use 'featureboard comments add {} <text>' to start the discussion", feature_id)
                .dimmed()
        );
        return Ok(());
    }

    let mut table = new_table(vec!["Posted", "User", "Comment"]);
    for comment in &comments {
        table.add_row(vec![
            format_datetime(&comment.created_at),
            comment.user_id.clone(),
            comment.comment_text.clone(),
        ]);
    }

    println!("{}", table);
    println!("Total: {} comments", comments.len().to_string().cyan());

    Ok(())
}

async fn add_comment(
    board: &FeatureBoard,
    user: &str,
    feature_id: &str,
    text: &str,
) -> anyhow::Result<()> {
    let id = board.add_comment(user, feature_id, text).await?;

    println!("{} Comment {} added", "✓".green().bold(), id.cyan());
    Ok(())
}
