//! Board, update-rule, policy and teacher properties.

mod common;

use common::{action, all_keys, board, greedy_agent, greedy_params, key, rng};
use ttt_rl::{
    Board, Player, Teacher,
    q_learning::{Agent, Algorithm, EpsilonGreedy, ValueTable},
    teacher::Rule,
    tictactoe::{Cell, GameStatus},
};

const LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

fn holds_line(board: &Board, player: Player) -> bool {
    let cells = board.cells();
    LINES
        .iter()
        .any(|line| line.iter().all(|&i| cells[i] == player.to_cell()))
}

#[test]
fn check_win_matches_line_definition_on_every_grid() {
    for key in all_keys() {
        let board = Board::from_key(&key);
        for player in [Player::X, Player::O] {
            assert_eq!(
                board.check_win(player),
                holds_line(&board, player),
                "{key} for {player:?}"
            );
        }
    }
}

#[test]
fn check_draw_is_full_board_and_idempotent() {
    for key in all_keys() {
        let board = Board::from_key(&key);
        let full = !board.cells().contains(&Cell::Empty);
        assert_eq!(board.check_draw(), full, "{key}");
        assert_eq!(board.check_draw(), board.check_draw());
    }
}

#[test]
fn check_for_end_prefers_win() {
    for key in all_keys() {
        let board = Board::from_key(&key);
        let expected = if board.check_win(Player::O) {
            GameStatus::Win
        } else if board.check_draw() {
            GameStatus::Draw
        } else {
            GameStatus::Ongoing
        };
        assert_eq!(board.check_for_end(Player::O), expected, "{key}");
    }
}

#[test]
fn q_learning_terminal_update_from_zero() {
    let mut agent = greedy_agent(Algorithm::QLearning);
    agent.q_update(&key("---------"), None, action(1, 1), 1.0);
    assert_eq!(agent.value(action(1, 1), &key("---------")), 0.5);
    assert_eq!(agent.table().len(), 1);
}

#[test]
fn sarsa_terminal_update_from_zero() {
    let mut agent = greedy_agent(Algorithm::Sarsa);
    agent.sarsa_update(&key("---------"), None, action(1, 1), -1.0);
    assert_eq!(agent.value(action(1, 1), &key("---------")), -0.5);
}

#[test]
fn greedy_selection_on_zero_table_is_first_cell() {
    let agent = greedy_agent(Algorithm::QLearning);
    let mut rng = rng(5);
    for _ in 0..10 {
        assert_eq!(
            agent.get_action(&key("---------"), &mut rng).unwrap(),
            action(0, 0)
        );
    }
}

#[test]
fn greedy_selection_follows_positive_value() {
    let mut agent = greedy_agent(Algorithm::QLearning);
    let state = key("X---O----");
    agent.q_update(&state, None, action(2, 2), 1.0);

    let mut rng = rng(5);
    assert_eq!(agent.get_action(&state, &mut rng).unwrap(), action(2, 2));
    // Other states are untouched.
    assert_eq!(
        agent.get_action(&key("---------"), &mut rng).unwrap(),
        action(0, 0)
    );
}

#[test]
fn greedy_selection_avoids_negative_value() {
    let mut agent = greedy_agent(Algorithm::Sarsa);
    let state = key("---------");
    agent.sarsa_update(&state, None, action(0, 0), -1.0);

    let mut rng = rng(5);
    assert_eq!(agent.get_action(&state, &mut rng).unwrap(), action(0, 1));
}

#[test]
fn exploration_only_picks_legal_cells() {
    let table = ValueTable::new();
    let policy = EpsilonGreedy::new(1.0);
    let state = key("XO-OX-XO-");
    let legal = state.legal_actions();
    let mut rng = rng(17);

    let mut seen = std::collections::HashSet::new();
    for _ in 0..200 {
        let choice = policy.select_action(&table, &state, &legal, &mut rng).unwrap();
        assert!(legal.contains(&choice));
        seen.insert(choice);
    }
    assert_eq!(seen.len(), legal.len());
}

#[test]
fn perfect_teacher_opens_in_center() {
    let mut rng = rng(0);
    let teacher = Teacher::new(1.0).unwrap();
    assert_eq!(
        teacher.make_move(&Board::new(), &mut rng).unwrap(),
        action(1, 1)
    );
    assert_eq!(
        teacher.rule_for(&Board::new(), &mut rng),
        Some((Rule::Center, action(1, 1)))
    );
}

#[test]
fn perfect_teacher_completes_diagonal_threat() {
    let mut rng = rng(0);
    let teacher = Teacher::new(1.0).unwrap();
    let b = board("X-O/OX-/---");
    assert_eq!(teacher.make_move(&b, &mut rng).unwrap(), action(2, 2));
}

#[test]
fn perfect_teacher_blocks_agent_win() {
    let mut rng = rng(0);
    // O O -
    // X - -
    // - X -   X has no win of its own here.
    let b = board("OO-/X--/-X-");
    assert_eq!(
        Teacher::perfect().rule_for(&b, &mut rng),
        Some((Rule::BlockWin, action(0, 2)))
    );
}

#[test]
fn teacher_moves_are_always_legal() {
    let mut rng = rng(23);
    let teachers = [Teacher::perfect(), Teacher::default(), Teacher::new(0.0).unwrap()];
    for key in all_keys().step_by(37) {
        let b = Board::from_key(&key);
        if b.legal_actions().is_empty() {
            continue;
        }
        for teacher in &teachers {
            let choice = teacher.make_move(&b, &mut rng).unwrap();
            assert!(b.is_empty(choice), "{key}");
        }
    }
}

#[test]
fn hyperparameter_ranges_are_enforced() {
    use ttt_rl::Hyperparameters;

    assert!(Hyperparameters::new(0.0, 0.9, 0.1).is_err());
    assert!(Hyperparameters::new(1.0, 0.0, 0.0).is_ok());
    assert!(Hyperparameters::new(0.5, 1.1, 0.1).is_err());
    assert!(Hyperparameters::new(0.5, 0.9, -0.1).is_err());
    assert_eq!(Agent::q_learning(greedy_params()).params().epsilon(), 0.0);
}
