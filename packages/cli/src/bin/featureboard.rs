use clap::{Parser, Subcommand};
use colored::*;
use std::path::PathBuf;
use std::process;

mod cli;

use cli::comments::CommentsCommands;
use cli::features::FeaturesCommands;
use cli::votes::VoteArg;
use featureboard_cli::config::parse_port;
use featureboard_cli::{init_tracing, run_server, Config};
use featureboard_storage::FeatureBoard;

#[derive(Parser)]
#[command(name = "featureboard")]
#[command(about = "Feature board - propose, vote on and discuss product features")]
#[command(version)]
struct Cli {
    /// Database file (overrides DATABASE_PATH)
    #[arg(long, global = true)]
    database: Option<PathBuf>,

    /// User id the command acts as
    #[arg(long, global = true, env = "FEATUREBOARD_USER", default_value = "local-user")]
    user: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API server
    Serve {
        /// Port to listen on (overrides PORT)
        #[arg(long, value_parser = parse_port_arg)]
        port: Option<u16>,
        /// Address to bind (overrides HOST)
        #[arg(long)]
        host: Option<String>,
    },
    /// Manage features
    #[command(subcommand)]
    Features(FeaturesCommands),
    /// Toggle your vote on a feature
    Vote {
        /// Feature ID to vote on
        feature_id: String,
        /// Vote direction
        #[arg(value_enum)]
        vote_type: VoteArg,
    },
    /// Read and write feature comments
    #[command(subcommand)]
    Comments(CommentsCommands),
}

fn parse_port_arg(raw: &str) -> Result<u16, String> {
    parse_port(raw).map_err(|e| e.to_string())
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match handle_command(cli).await {
        Ok(_) => {}
        Err(e) => {
            eprintln!("{} {:#}", "Error:".red().bold(), e);
            process::exit(1);
        }
    }
}

async fn handle_command(cli: Cli) -> anyhow::Result<()> {
    let mut config = Config::from_env()?;
    if let Some(database) = cli.database {
        config.database_path = database;
    }

    match cli.command {
        Commands::Serve { port, host } => {
            if let Some(port) = port {
                config.port = port;
            }
            if let Some(host) = host {
                config.host = host;
            }

            init_tracing();
            run_server(config).await
        }
        Commands::Features(command) => {
            let board = open_board(&config).await?;
            cli::features::handle_features_command(&board, &cli.user, command).await
        }
        Commands::Vote {
            feature_id,
            vote_type,
        } => {
            let board = open_board(&config).await?;
            cli::votes::toggle_vote(&board, &cli.user, &feature_id, vote_type).await
        }
        Commands::Comments(command) => {
            let board = open_board(&config).await?;
            cli::comments::handle_comments_command(&board, &cli.user, command).await
        }
    }
}

async fn open_board(config: &Config) -> anyhow::Result<FeatureBoard> {
    Ok(FeatureBoard::open(&config.database_config()).await?)
}
