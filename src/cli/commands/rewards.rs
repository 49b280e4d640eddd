//! Rewards command - Report and export an agent's reward history

use std::{
    io::{self, Write},
    path::PathBuf,
};

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;

use super::{SnapshotArgs, load_agent};
use crate::{
    app::App,
    cli::output::{format_number, print_kv, print_section},
};

#[derive(Parser, Debug)]
#[command(about = "Summarize the cumulative reward history of a saved agent")]
pub struct RewardsArgs {
    #[command(flatten)]
    pub snapshot: SnapshotArgs,

    /// Number of most recent episodes averaged for the recent mean
    #[arg(long, short = 'w', default_value_t = 100)]
    pub window: usize,

    /// Write `episode,cumulative_reward` rows to this CSV file
    #[arg(long)]
    pub csv: Option<PathBuf>,
}

/// Statistics derived from a cumulative reward history.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RewardSummary {
    pub episodes: usize,
    pub total_reward: f64,
    pub wins: usize,
    pub draws: usize,
    pub losses: usize,
    /// Mean per-episode reward over the last `window` episodes
    pub recent_mean: f64,
    pub window: usize,
}

impl RewardSummary {
    /// Per-episode rewards are the differences between consecutive totals.
    pub fn from_history(history: &[f64], window: usize) -> Self {
        let per_episode: Vec<f64> = history
            .iter()
            .scan(0.0, |previous, &total| {
                let reward = total - *previous;
                *previous = total;
                Some(reward)
            })
            .collect();

        let (mut wins, mut draws, mut losses) = (0, 0, 0);
        for &reward in &per_episode {
            if reward > 0.0 {
                wins += 1;
            } else if reward < 0.0 {
                losses += 1;
            } else {
                draws += 1;
            }
        }

        let window = window.min(per_episode.len());
        let recent_mean = if window == 0 {
            0.0
        } else {
            per_episode[per_episode.len() - window..].iter().sum::<f64>() / window as f64
        };

        Self {
            episodes: history.len(),
            total_reward: history.last().copied().unwrap_or(0.0),
            wins,
            draws,
            losses,
            recent_mean,
            window,
        }
    }
}

#[derive(Serialize)]
struct RewardRow {
    episode: usize,
    cumulative_reward: f64,
}

/// Write one row per episode, numbered from 1.
pub fn write_history_csv<W: Write>(writer: W, history: &[f64]) -> crate::Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for (i, &cumulative_reward) in history.iter().enumerate() {
        csv_writer.serialize(RewardRow {
            episode: i + 1,
            cumulative_reward,
        })?;
    }
    csv_writer.flush()?;
    Ok(())
}

pub fn execute(args: RewardsArgs) -> Result<()> {
    let stdout = io::stdout();
    run(&args, &App::new(), &mut stdout.lock())
}

/// Run the command with an injected app and output.
pub fn run<W: Write>(args: &RewardsArgs, app: &App, output: &mut W) -> Result<()> {
    let path = args.snapshot.resolved_path();
    let agent = load_agent(app, &path, args.snapshot.agent)?;
    let summary = RewardSummary::from_history(agent.rewards(), args.window);

    print_section(output, &format!("{} agent reward history", agent.algorithm()))?;
    print_kv(output, "Snapshot", &path.display().to_string())?;
    print_kv(output, "Episodes", &format_number(summary.episodes))?;
    print_kv(output, "Total reward", &format!("{}", summary.total_reward))?;
    print_kv(
        output,
        "W / D / L",
        &format!("{} / {} / {}", summary.wins, summary.draws, summary.losses),
    )?;
    print_kv(
        output,
        &format!("Mean (last {})", summary.window),
        &format!("{:.3}", summary.recent_mean),
    )?;
    print_kv(output, "Table entries", &format_number(agent.table().len()))?;

    if let Some(csv_path) = &args.csv {
        let file = std::fs::File::create(csv_path)
            .with_context(|| format!("Failed to create CSV file {}", csv_path.display()))?;
        write_history_csv(file, agent.rewards())
            .with_context(|| format!("Failed to write CSV to {}", csv_path.display()))?;
        writeln!(output, "\nReward history written to {}", csv_path.display())?;
    }

    Ok(())
}
