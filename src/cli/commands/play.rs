//! Play command - Human against the learning agent

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use clap::Parser;

use super::{AgentArgs, prepare_agent};
use crate::{
    app::App,
    cli::{HumanPlayer, prompt::ask_yes_no},
    pipeline::{AGENT_MARK, FirstMover, play_episode},
    tictactoe::GameOutcome,
};

#[derive(Parser, Debug)]
#[command(about = "Play against the agent; it keeps learning from every game")]
pub struct PlayArgs {
    #[command(flatten)]
    pub agent: AgentArgs,
}

pub fn execute(args: PlayArgs) -> Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    run(&args, &App::new(), &mut stdin.lock(), &mut stdout.lock())
}

/// Run the game loop with injected dependencies and I/O.
///
/// The snapshot is saved after every game.
pub fn run<R: BufRead, W: Write>(
    args: &PlayArgs,
    app: &App,
    input: &mut R,
    output: &mut W,
) -> Result<()> {
    let config = args.agent.agent_config()?;
    let Some(mut agent) = prepare_agent(&args.agent, &config, app, input, output)? else {
        return Ok(());
    };
    let path = args.agent.snapshot.resolved_path();
    let mut rng = app.rng(args.agent.seed);

    writeln!(
        output,
        "Welcome to Tic-Tac-Toe. You are 'X' and the computer is 'O'."
    )?;

    let mut games_played = 0usize;
    loop {
        let first_mover = match ask_yes_no(input, output, "Would you like to go first?")? {
            Some(true) => FirstMover::Opponent,
            Some(false) => FirstMover::Agent,
            None => break,
        };

        let report = {
            let mut human = HumanPlayer::new(&mut *input, &mut *output);
            play_episode(&mut agent, &mut human, first_mover, &mut rng)?
        };

        writeln!(output, "{}", report.board)?;
        let verdict = match report.outcome {
            GameOutcome::Win(winner) if winner == AGENT_MARK => "RL agent wins!",
            GameOutcome::Win(_) => "Player wins!",
            GameOutcome::Draw => "It's a draw!",
        };
        writeln!(output, "{verdict}")?;

        games_played += 1;
        app.save_agent(&agent, &path)
            .with_context(|| format!("Failed to save agent to {}", path.display()))?;

        writeln!(output, "Games played: {games_played}")?;
        if ask_yes_no(input, output, "Do you want to play again?")? != Some(true) {
            break;
        }
    }

    writeln!(output, "OK. Quitting.")?;
    Ok(())
}
