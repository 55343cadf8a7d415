use clap::Subcommand;
use colored::*;

use featureboard_core::{FeatureCreateInput, FeatureStatus, FeatureWithStats, VoteType};
use featureboard_storage::FeatureBoard;

use super::utils::{format_date, format_datetime, new_table, truncate};

#[derive(Subcommand)]
pub enum FeaturesCommands {
    /// List features with their votes and comment counts
    List {
        /// Only show features with this status
        #[arg(short, long)]
        status: Option<String>,
    },
    /// Show feature details
    Show {
        /// Feature ID to show
        id: String,
    },
    /// Propose a new feature
    Create {
        /// Feature title
        #[arg(short, long)]
        title: String,
        /// Feature description
        #[arg(short, long)]
        description: String,
        /// Initial status (defaults to proposed)
        #[arg(short, long)]
        status: Option<String>,
    },
}

pub async fn handle_features_command(
    board: &FeatureBoard,
    user: &str,
    command: FeaturesCommands,
) -> anyhow::Result<()> {
    match command {
        FeaturesCommands::List { status } => list_features(board, user, status.as_deref()).await,
        FeaturesCommands::Show { id } => show_feature(board, user, &id).await,
        FeaturesCommands::Create {
            title,
            description,
            status,
        } => {
            let input = FeatureCreateInput {
                title,
                description,
                status,
            };
            create_feature(board, user, input).await
        }
    }
}

async fn list_features(
    board: &FeatureBoard,
    user: &str,
    status: Option<&str>,
) -> anyhow::Result<()> {
    let features = board.list_features(user, status).await?;

    if features.is_empty() {
        println!("{}", "No features found".yellow());
        println!(
            "{}",
            "Use 'featureboard features create' to propose the first one".dimmed()
        );
        return Ok(());
    }

    println!("{}", "🗳  Feature Board".blue().bold());
    println!();

    let mut table = new_table(vec![
        "ID", "Title", "Status", "Up", "Down", "Net", "Comments", "Your vote", "Created",
    ]);

    for item in &features {
        table.add_row(vec![
            item.feature.id.clone(),
            truncate(&item.feature.title, 30),
            status_label(item.feature.status).to_string(),
            item.upvote_count.to_string(),
            item.downvote_count.to_string(),
            item.net_votes.to_string(),
            item.comment_count.to_string(),
            vote_label(item.user_vote).to_string(),
            format_date(&item.feature.created_at),
        ]);
    }

    println!("{}", table);
    println!("Total: {} features", features.len().to_string().cyan());

    Ok(())
}

async fn show_feature(board: &FeatureBoard, user: &str, id: &str) -> anyhow::Result<()> {
    let item = board.get_feature(user, id).await?;

    println!(
        "{}",
        format!("🗳  Feature Details - {}", item.feature.title)
            .blue()
            .bold()
    );
    println!();

    print_feature_details(&item);
    Ok(())
}

async fn create_feature(
    board: &FeatureBoard,
    user: &str,
    input: FeatureCreateInput,
) -> anyhow::Result<()> {
    let id = board.create_feature(user, input).await?;

    println!("{} Feature created", "✓".green().bold());
    println!("  {} {}", "ID:".bold(), id.cyan());
    Ok(())
}

fn print_feature_details(item: &FeatureWithStats) {
    let feature = &item.feature;

    println!("{} {}", "ID:".bold(), feature.id);
    println!("{} {}", "Title:".bold(), feature.title);
    println!("{} {}", "Status:".bold(), status_label(feature.status));
    println!("{} {}", "Proposed by:".bold(), feature.created_by);
    println!(
        "{} {} up, {} down (net {})",
        "Votes:".bold(),
        item.upvote_count.to_string().green(),
        item.downvote_count.to_string().red(),
        item.net_votes
    );
    println!("{} {}", "Your vote:".bold(), vote_label(item.user_vote));
    println!("{} {}", "Comments:".bold(), item.comment_count);
    println!("{} {}", "Created:".bold(), format_datetime(&feature.created_at));
    println!("{} {}", "Updated:".bold(), format_datetime(&feature.updated_at));
    println!();
    println!("{}", "Description:".bold());
    println!("{}", feature.description);
}

fn status_label(status: FeatureStatus) -> &'static str {
    match status {
        FeatureStatus::Proposed => "Proposed",
        FeatureStatus::Planned => "Planned",
        FeatureStatus::InProgress => "In progress",
        FeatureStatus::Completed => "Completed",
        FeatureStatus::Rejected => "Rejected",
    }
}

fn vote_label(vote: Option<VoteType>) -> &'static str {
    match vote {
        Some(VoteType::Upvote) => "▲ up",
        Some(VoteType::Downvote) => "▼ down",
        None => "—",
    }
}
