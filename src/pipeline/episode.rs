//! One game between the learning agent (`O`) and an opponent (`X`).
//!
//! The agent learns online: every non-terminal exchange (agent move, then
//! opponent reply) produces a zero-reward update, and the terminal move
//! produces one final update carrying the outcome reward. Q-learning picks
//! its action at the top of each turn; SARSA picks its first action before
//! the loop and every later one right after the opponent's reply, so the
//! action it bootstraps from is the action it then plays.

use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    Result,
    ports::Opponent,
    q_learning::{Agent, Algorithm},
    tictactoe::{Board, GameOutcome, GameStatus, Player},
    types::{Action, StateKey},
};

/// Mark played by the learning agent.
pub const AGENT_MARK: Player = Player::O;

/// Mark played by the opponent.
pub const OPPONENT_MARK: Player = Player::X;

/// Which side makes the opening move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FirstMover {
    Agent,
    Opponent,
}

impl FirstMover {
    /// Fair coin flip.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        if rng.random::<f64>() < 0.5 {
            FirstMover::Agent
        } else {
            FirstMover::Opponent
        }
    }
}

/// What happened in a finished episode.
#[derive(Debug, Clone, PartialEq)]
pub struct EpisodeReport {
    pub outcome: GameOutcome,
    /// Reward from the agent's point of view: +1, -1 or 0.
    pub reward: f64,
    /// Board at the terminal move.
    pub board: Board,
    pub first_mover: FirstMover,
}

/// Play one game to completion, updating `agent` as it goes.
///
/// After the terminal move the reward is recorded in the agent's history
/// and then used for the final update with no successor state.
///
/// # Errors
///
/// Propagates errors from the opponent (for example a closed input stream)
/// and rejects opponent moves onto occupied cells.
pub fn play_episode(
    agent: &mut Agent,
    opponent: &mut dyn Opponent,
    first_mover: FirstMover,
    rng: &mut dyn RngCore,
) -> Result<EpisodeReport> {
    let mut board = Board::new();
    if first_mover == FirstMover::Opponent {
        opponent_turn(&mut board, opponent, rng)?;
    }
    let mut old_state = board.state_key();

    let (outcome, last_action) = match agent.algorithm() {
        Algorithm::QLearning => loop {
            let action = agent.get_action(&old_state, rng)?;
            board.place(action, AGENT_MARK)?;
            if let Some(outcome) = terminal(&board, AGENT_MARK) {
                break (outcome, action);
            }

            opponent_turn(&mut board, opponent, rng)?;
            let state = board.state_key();
            if let Some(outcome) = terminal(&board, OPPONENT_MARK) {
                break (outcome, action);
            }

            agent.q_update(&old_state, Some(&state), action, 0.0);
            old_state = state;
        },
        Algorithm::Sarsa => {
            let mut old_action = agent.get_action(&old_state, rng)?;
            loop {
                board.place(old_action, AGENT_MARK)?;
                if let Some(outcome) = terminal(&board, AGENT_MARK) {
                    break (outcome, old_action);
                }

                opponent_turn(&mut board, opponent, rng)?;
                if let Some(outcome) = terminal(&board, OPPONENT_MARK) {
                    break (outcome, old_action);
                }

                let state = board.state_key();
                let action = agent.get_action(&state, rng)?;
                agent.sarsa_update(&old_state, Some((&state, action)), old_action, 0.0);
                old_state = state;
                old_action = action;
            }
        }
    };

    let reward = outcome.reward_for(AGENT_MARK);
    agent.record_episode(reward);
    final_update(agent, &old_state, last_action, reward);

    debug!(
        opponent = opponent.name(),
        ?first_mover,
        ?outcome,
        reward,
        board = %board.state_key(),
        "episode finished"
    );

    Ok(EpisodeReport {
        outcome,
        reward,
        board,
        first_mover,
    })
}

fn opponent_turn(
    board: &mut Board,
    opponent: &mut dyn Opponent,
    rng: &mut dyn RngCore,
) -> Result<()> {
    let action = opponent.choose_move(board, rng)?;
    board.place(action, OPPONENT_MARK)
}

fn terminal(board: &Board, mover: Player) -> Option<GameOutcome> {
    match board.check_for_end(mover) {
        GameStatus::Win => Some(GameOutcome::Win(mover)),
        GameStatus::Draw => Some(GameOutcome::Draw),
        GameStatus::Ongoing => None,
    }
}

fn final_update(agent: &mut Agent, state: &StateKey, action: Action, reward: f64) {
    match agent.algorithm() {
        Algorithm::QLearning => agent.q_update(state, None, action, reward),
        Algorithm::Sarsa => agent.sarsa_update(state, None, action, reward),
    }
}
