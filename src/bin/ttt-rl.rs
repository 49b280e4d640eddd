//! ttt-rl CLI - Teach, play against and inspect tabular tic-tac-toe agents
//!
//! - `teach`: train a Q-learning or SARSA agent against the rule-based teacher
//! - `play`: play against the agent from the terminal
//! - `rewards`: summarize or export a saved agent's reward history

use anyhow::Result;
use clap::{Parser, Subcommand};
use ttt_rl::{
    cli::commands::{play, rewards, teach},
    logging::init_logging,
};

#[derive(Parser)]
#[command(name = "ttt-rl")]
#[command(version, about = "Tabular reinforcement learning for tic-tac-toe", long_about = None)]
struct Cli {
    /// Debug-level logging (RUST_LOG takes precedence)
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Train an agent against the rule-based teacher
    Teach(Box<teach::TeachArgs>),

    /// Play against the agent
    Play(play::PlayArgs),

    /// Summarize a saved agent's reward history
    Rewards(rewards::RewardsArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Teach(args) => teach::execute(*args),
        Commands::Play(args) => play::execute(args),
        Commands::Rewards(args) => rewards::execute(args),
    }
}
