//! Teach command - Train an agent against the rule-based teacher

use std::{
    cell::RefCell,
    fs::File,
    io::{self, BufRead, Write},
    path::{Path, PathBuf},
    rc::Rc,
};

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use serde_json::to_writer_pretty;

use super::{AgentArgs, prepare_agent};
use crate::{
    app::App,
    cli::output::{format_count_rate, format_number, print_kv, print_section},
    pipeline::{
        LoggingObserver, MilestoneObserver, ProgressObserver, TeachingConfig, TeachingSession,
        TrainingResult,
    },
    q_learning::Algorithm,
};

#[derive(Debug, Serialize)]
struct SummaryMetadata {
    algorithm: Algorithm,
    alpha: f64,
    gamma: f64,
    epsilon: f64,
    teacher_ability: f64,
    episodes_total: usize,
    snapshot: PathBuf,
    seed: Option<u64>,
}

#[derive(Debug, Serialize)]
struct TeachingSummaryFile {
    training: TrainingResult,
    first_draw: Option<usize>,
    last_loss: Option<usize>,
    metadata: SummaryMetadata,
}

fn sanitize_summary_path(raw: &Path) -> PathBuf {
    let mut normalized = raw.to_path_buf();
    let raw_str = raw.as_os_str().to_string_lossy();

    // Trailing separator or no file name: treat as a directory.
    if raw_str.ends_with(std::path::MAIN_SEPARATOR) || normalized.file_name().is_none() {
        normalized.push("teaching_summary.json");
        return normalized;
    }

    match normalized.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("json") => normalized,
        _ => {
            normalized.set_extension("json");
            normalized
        }
    }
}

#[derive(Parser, Debug)]
#[command(about = "Train an agent against the rule-based teacher")]
pub struct TeachArgs {
    #[command(flatten)]
    pub agent: AgentArgs,

    /// Number of teaching episodes
    #[arg(long, short = 'e', default_value_t = 1000)]
    pub episodes: usize,

    /// Probability that the teacher plays its best rule instead of a random move
    #[arg(long, short = 'a')]
    pub ability: Option<f64>,

    /// Also save the agent every N episodes
    #[arg(long)]
    pub checkpoint_every: Option<usize>,

    /// Log a progress line every N episodes (0 disables)
    #[arg(long, default_value_t = LoggingObserver::DEFAULT_EVERY)]
    pub log_every: usize,

    /// Show a progress bar instead of periodic log lines
    #[arg(long)]
    pub progress: bool,

    /// Optional path for writing a summary JSON file
    #[arg(long)]
    pub summary: Option<PathBuf>,
}

pub fn execute(args: TeachArgs) -> Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    run(&args, &App::new(), &mut stdin.lock(), &mut stdout.lock())
}

/// Run the command with injected dependencies and I/O.
pub fn run<R: BufRead, W: Write>(
    args: &TeachArgs,
    app: &App,
    input: &mut R,
    output: &mut W,
) -> Result<()> {
    let mut config = args.agent.agent_config()?;
    if let Some(ability) = args.ability {
        config = config.with_teacher_ability(ability);
    }
    let mut teacher = config.teacher().context("Invalid teacher ability")?;

    let Some(mut agent) = prepare_agent(&args.agent, &config, app, input, output)? else {
        return Ok(());
    };
    let path = args.agent.snapshot.resolved_path();

    print_section(output, &format!("Teaching {} agent", agent.algorithm()))?;
    print_kv(output, "Episodes", &format_number(args.episodes))?;
    print_kv(
        output,
        "Teacher ability",
        &format!("{:.2}", teacher.ability_level()),
    )?;
    let params = *agent.params();
    print_kv(
        output,
        "Hyperparameters",
        &format!(
            "alpha={} gamma={} epsilon={}",
            params.alpha(),
            params.gamma(),
            params.epsilon()
        ),
    )?;
    if agent.episodes() > 0 {
        print_kv(
            output,
            "Prior episodes",
            &format_number(agent.episodes()),
        )?;
    }

    let session_config = TeachingConfig {
        episodes: args.episodes,
        seed: args.agent.seed,
        checkpoint_every: args.checkpoint_every,
    };
    let milestones = Rc::new(RefCell::new(MilestoneObserver::new()));
    let mut session =
        TeachingSession::new(session_config).with_observer(Box::new(Rc::clone(&milestones)));
    session = if args.progress {
        session.with_observer(Box::new(ProgressObserver::new()))
    } else {
        session.with_observer(Box::new(LoggingObserver::new(args.log_every)))
    };

    let mut rng = app.rng(args.agent.seed);
    let result = session
        .run_with_rng(&mut agent, &mut teacher, app.repository(), &path, &mut rng)
        .with_context(|| format!("Teaching session failed (snapshot {})", path.display()))?;

    print_section(output, "Results")?;
    print_kv(output, "Wins", &format_count_rate(result.wins, result.win_rate))?;
    print_kv(output, "Draws", &format_count_rate(result.draws, result.draw_rate))?;
    print_kv(
        output,
        "Losses",
        &format_count_rate(result.losses, result.loss_rate),
    )?;
    print_kv(output, "Total reward", &format!("{}", result.total_reward))?;

    let milestones = milestones.borrow();
    match milestones.first_draw() {
        Some(game) => print_kv(output, "First draw", &format!("episode {}", game + 1))?,
        None => print_kv(output, "First draw", "not reached")?,
    }
    print_kv(
        output,
        "Since last loss",
        &format!("{} episodes", format_number(milestones.games_since_last_loss())),
    )?;
    writeln!(output, "\nSaved agent to {}", path.display())?;

    if let Some(raw) = &args.summary {
        let summary_path = sanitize_summary_path(raw);
        let summary = TeachingSummaryFile {
            training: result,
            first_draw: milestones.first_draw(),
            last_loss: milestones.last_loss(),
            metadata: SummaryMetadata {
                algorithm: agent.algorithm(),
                alpha: params.alpha(),
                gamma: params.gamma(),
                epsilon: params.epsilon(),
                teacher_ability: teacher.ability_level(),
                episodes_total: agent.episodes(),
                snapshot: path.clone(),
                seed: args.agent.seed,
            },
        };
        let file = File::create(&summary_path).with_context(|| {
            format!("Failed to create summary file {}", summary_path.display())
        })?;
        to_writer_pretty(file, &summary)
            .with_context(|| format!("Failed to write summary to {}", summary_path.display()))?;
        writeln!(output, "Summary written to {}", summary_path.display())?;
    }

    Ok(())
}
