//! The teacher's ordered rule cascade.
//!
//! Each rule either proposes a cell or passes. Fork detection is table driven:
//! a pattern is a pair of anchor cells plus two completion options, and the
//! first pattern whose anchors are both held decides the outcome of the whole
//! rule, even when none of its options is open.

use rand::{Rng, seq::IndexedRandom};

use crate::{
    tictactoe::{Board, Cell, LineAnalyzer, Player},
    types::Action,
};

/// One stage of the cascade, tried in [`CASCADE`] order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rule {
    Win,
    BlockWin,
    Fork,
    BlockFork,
    Center,
    Corner,
    SideEmpty,
    RandomMove,
}

/// Precedence of the rules; the first one that proposes a cell wins.
pub const CASCADE: [Rule; 8] = [
    Rule::Win,
    Rule::BlockWin,
    Rule::Fork,
    Rule::BlockFork,
    Rule::Center,
    Rule::Corner,
    Rule::SideEmpty,
    Rule::RandomMove,
];

/// Corners in the order the corner rule falls back to them.
pub const CORNERS: [Action; 4] = [
    Action::at(0, 0),
    Action::at(2, 0),
    Action::at(0, 2),
    Action::at(2, 2),
];

/// (opponent corner, corner opposite it)
const OPPOSITE_CORNERS: [(Action, Action); 4] = [
    (Action::at(0, 0), Action::at(2, 2)),
    (Action::at(2, 0), Action::at(0, 2)),
    (Action::at(0, 2), Action::at(2, 0)),
    (Action::at(2, 2), Action::at(0, 0)),
];

/// Edge midpoints in side-rule priority order.
pub const SIDES: [Action; 4] = [
    Action::at(1, 0),
    Action::at(2, 1),
    Action::at(1, 2),
    Action::at(0, 1),
];

/// Cell blocked when the opponent holds two corners and the only other
/// occupied corner is ours.
pub const DOUBLE_CORNER_BLOCK: Action = Action::at(1, 2);

/// Take `target` if all of `clear` (which includes `target`) is empty.
#[derive(Debug, Clone, Copy)]
pub struct ForkOption {
    pub target: Action,
    pub clear: [Action; 3],
}

/// Two anchor marks that set up a double threat, with two ways to finish it.
#[derive(Debug, Clone, Copy)]
pub struct ForkPattern {
    pub anchors: [Action; 2],
    pub options: [ForkOption; 2],
}

const fn option(target: Action, a: Action, b: Action) -> ForkOption {
    ForkOption {
        target,
        clear: [target, a, b],
    }
}

/// Adjacent edge-midpoint pairs.
pub const EDGE_FORKS: [ForkPattern; 4] = [
    ForkPattern {
        anchors: [Action::at(1, 0), Action::at(0, 1)],
        options: [
            option(Action::at(0, 0), Action::at(2, 0), Action::at(0, 2)),
            option(Action::CENTER, Action::at(2, 1), Action::at(1, 2)),
        ],
    },
    ForkPattern {
        anchors: [Action::at(1, 0), Action::at(2, 1)],
        options: [
            option(Action::at(2, 0), Action::at(0, 0), Action::at(2, 2)),
            option(Action::CENTER, Action::at(0, 1), Action::at(1, 2)),
        ],
    },
    ForkPattern {
        anchors: [Action::at(2, 1), Action::at(1, 2)],
        options: [
            option(Action::at(2, 2), Action::at(2, 0), Action::at(0, 2)),
            option(Action::CENTER, Action::at(1, 0), Action::at(0, 1)),
        ],
    },
    ForkPattern {
        anchors: [Action::at(1, 2), Action::at(0, 1)],
        options: [
            option(Action::at(0, 2), Action::at(0, 0), Action::at(2, 2)),
            option(Action::CENTER, Action::at(1, 0), Action::at(2, 1)),
        ],
    },
];

/// Opposite-corner pairs.
pub const CORNER_FORKS: [ForkPattern; 2] = [
    ForkPattern {
        anchors: [Action::at(0, 0), Action::at(2, 2)],
        options: [
            option(Action::at(2, 0), Action::at(1, 0), Action::at(2, 1)),
            option(Action::at(0, 2), Action::at(0, 1), Action::at(1, 2)),
        ],
    },
    ForkPattern {
        anchors: [Action::at(2, 0), Action::at(0, 2)],
        options: [
            option(Action::at(2, 2), Action::at(2, 1), Action::at(1, 2)),
            option(Action::at(0, 0), Action::at(1, 0), Action::at(0, 1)),
        ],
    },
];

impl ForkPattern {
    fn anchored_by(&self, board: &Board, owner: Cell) -> bool {
        self.anchors.iter().all(|&a| board.get(a) == owner)
    }

    fn resolve(&self, board: &Board) -> Option<Action> {
        self.options
            .iter()
            .find(|opt| opt.clear.iter().all(|&a| board.is_empty(a)))
            .map(|opt| opt.target)
    }
}

/// A fork stage: either a geometric pattern or the double-corner special case.
#[derive(Debug, Clone, Copy)]
enum ForkStage {
    Pattern(ForkPattern),
    DoubleCorner,
}

impl ForkStage {
    fn triggered(&self, board: &Board, owner: Cell) -> bool {
        match self {
            ForkStage::Pattern(pattern) => pattern.anchored_by(board, owner),
            ForkStage::DoubleCorner => {
                let held = CORNERS.iter().filter(|&&c| board.get(c) == owner).count();
                let empty = CORNERS.iter().filter(|&&c| board.is_empty(c)).count();
                held == 2 && empty == 1
            }
        }
    }

    fn resolve(&self, board: &Board) -> Option<Action> {
        match self {
            ForkStage::Pattern(pattern) => pattern.resolve(board),
            ForkStage::DoubleCorner => {
                board.is_empty(DOUBLE_CORNER_BLOCK).then_some(DOUBLE_CORNER_BLOCK)
            }
        }
    }
}

fn fork_stages(block: bool) -> Vec<ForkStage> {
    let mut stages: Vec<ForkStage> = EDGE_FORKS.into_iter().map(ForkStage::Pattern).collect();
    if block {
        stages.push(ForkStage::DoubleCorner);
    }
    stages.extend(CORNER_FORKS.into_iter().map(ForkStage::Pattern));
    stages
}

/// First triggered stage decides; later stages are not consulted.
fn first_triggered(board: &Board, owner: Cell, block: bool) -> Option<Action> {
    fork_stages(block)
        .into_iter()
        .find(|stage| stage.triggered(board, owner))
        .and_then(|stage| stage.resolve(board))
}

/// Create a fork for `player`.
pub fn fork(board: &Board, player: Player) -> Option<Action> {
    first_triggered(board, player.to_cell(), false)
}

/// Block a fork available to `opponent`.
pub fn block_fork(board: &Board, opponent: Player) -> Option<Action> {
    first_triggered(board, opponent.to_cell(), true)
}

/// Opposite of an opponent corner if open, else the first open corner.
pub fn corner(board: &Board, opponent: Player) -> Option<Action> {
    let theirs = opponent.to_cell();
    OPPOSITE_CORNERS
        .iter()
        .find(|&&(held, target)| board.get(held) == theirs && board.is_empty(target))
        .map(|&(_, target)| target)
        .or_else(|| CORNERS.iter().copied().find(|&c| board.is_empty(c)))
}

/// First open edge midpoint.
pub fn side_empty(board: &Board) -> Option<Action> {
    SIDES.iter().copied().find(|&s| board.is_empty(s))
}

/// Uniformly random empty cell.
pub fn random_move<R: Rng + ?Sized>(board: &Board, rng: &mut R) -> Option<Action> {
    board.legal_actions().choose(rng).copied()
}

impl Rule {
    /// Cell proposed by this rule when the teacher plays `me`.
    pub fn apply<R: Rng + ?Sized>(self, board: &Board, me: Player, rng: &mut R) -> Option<Action> {
        let them = me.opponent();
        match self {
            Rule::Win => LineAnalyzer::completing_move(board.cells(), me),
            Rule::BlockWin => LineAnalyzer::completing_move(board.cells(), them),
            Rule::Fork => fork(board, me),
            Rule::BlockFork => block_fork(board, them),
            Rule::Center => board.is_empty(Action::CENTER).then_some(Action::CENTER),
            Rule::Corner => corner(board, them),
            Rule::SideEmpty => side_empty(board),
            Rule::RandomMove => random_move(board, rng),
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;

    fn board(rows: &str) -> Board {
        Board::from_rows(rows).unwrap()
    }

    #[test]
    fn test_fork_options_include_target() {
        for pattern in EDGE_FORKS.iter().chain(CORNER_FORKS.iter()) {
            for opt in pattern.options {
                assert!(opt.clear.contains(&opt.target));
            }
        }
    }

    fn anchored(pattern: &ForkPattern, blocked: &[Action]) -> Board {
        let mut b = Board::new();
        for a in pattern.anchors {
            b.place(a, Player::X).unwrap();
        }
        for &a in blocked {
            b.place(a, Player::O).unwrap();
        }
        b
    }

    #[test]
    fn test_every_fork_pattern_and_option() {
        for (i, pattern) in EDGE_FORKS.iter().chain(CORNER_FORKS.iter()).enumerate() {
            let [first, second] = pattern.options;
            // clear[1] is never the target and never shared with the other option
            let cases = [
                (vec![], Some(first.target)),
                (vec![first.clear[1]], Some(second.target)),
                (vec![first.clear[1], second.clear[1]], None),
            ];
            for (blocked, expected) in cases {
                let b = anchored(pattern, &blocked);
                assert_eq!(
                    fork(&b, Player::X),
                    expected,
                    "fork, pattern {i}, blocked {blocked:?}"
                );
                assert_eq!(
                    block_fork(&b, Player::X),
                    expected,
                    "block fork, pattern {i}, blocked {blocked:?}"
                );
            }
        }
    }

    #[test]
    fn test_edge_fork_takes_corner_first() {
        // - X -
        // X - -
        // - - -
        assert_eq!(fork(&board("-X-/X--/---"), Player::X), Some(Action::at(0, 0)));
    }

    #[test]
    fn test_edge_fork_falls_back_to_center() {
        // O X -
        // X - -
        // - - -
        assert_eq!(fork(&board("OX-/X--/---"), Player::X), Some(Action::CENTER));
    }

    #[test]
    fn test_first_anchored_pattern_decides() {
        // Edge pattern (1,0)+(0,1) is anchored but both options are closed,
        // so the open corner pattern (2,0)+(0,2) is never consulted.
        // - X X
        // X O -
        // X - -
        let b = board("-XX/XO-/X--");
        assert_eq!(fork(&b, Player::X), None);
        assert_eq!(CORNER_FORKS[1].resolve(&b), Some(Action::at(2, 2)));
    }

    #[test]
    fn test_corner_fork() {
        // X - -
        // - O -
        // - - X
        assert_eq!(
            fork(&board("X--/-O-/--X"), Player::X),
            Some(Action::at(2, 0))
        );
    }

    #[test]
    fn test_block_fork_double_corner() {
        // O - -
        // - X -
        // X - O   -> two O corners, one X corner, one empty corner
        assert_eq!(
            block_fork(&board("O--/-X-/X-O"), Player::O),
            Some(DOUBLE_CORNER_BLOCK)
        );
    }

    #[test]
    fn test_block_fork_double_corner_needs_open_cell() {
        // O - -
        // - X O
        // X - O
        assert_eq!(block_fork(&board("O--/-XO/X-O"), Player::O), None);
    }

    #[test]
    fn test_fork_ignores_double_corner_case() {
        // The special case only exists for blocking.
        assert_eq!(fork(&board("X--/-O-/O-X"), Player::X), Some(Action::at(0, 2)));
    }

    #[test]
    fn test_block_fork_edge_pattern() {
        // - O -
        // O X -
        // - - -
        assert_eq!(
            block_fork(&board("-O-/OX-/---"), Player::O),
            Some(Action::at(0, 0))
        );
    }

    #[test]
    fn test_corner_prefers_opposite_of_opponent() {
        // - - -
        // - X -
        // - - O
        assert_eq!(corner(&board("---/-X-/--O"), Player::O), Some(Action::at(0, 0)));
        assert_eq!(corner(&board("---/-X-/---"), Player::O), Some(Action::at(0, 0)));
        assert_eq!(corner(&board("X--/-O-/---"), Player::O), Some(Action::at(2, 0)));
        assert_eq!(corner(&board("XOX/---/OXO"), Player::O), None);
    }

    #[test]
    fn test_side_priority() {
        assert_eq!(side_empty(&board("---/---/---")), Some(Action::at(1, 0)));
        assert_eq!(side_empty(&board("---/X--/---")), Some(Action::at(2, 1)));
        assert_eq!(side_empty(&board("---/X--/-O-")), Some(Action::at(1, 2)));
        assert_eq!(side_empty(&board("---/X-O/-O-")), Some(Action::at(0, 1)));
        assert_eq!(side_empty(&board("-X-/X-O/-O-")), None);
    }

    #[test]
    fn test_random_move_is_empty_cell() {
        let b = board("XOX/OXO/-X-");
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..20 {
            let action = random_move(&b, &mut rng).unwrap();
            assert!(b.is_empty(action));
        }
        assert_eq!(random_move(&board("XOX/XOO/OXX"), &mut rng), None);
    }

    #[test]
    fn test_rule_apply_dispatch() {
        let mut rng = StdRng::seed_from_u64(1);
        // X X -
        // O O -
        // - - -
        let b = board("XX-/OO-/---");
        assert_eq!(Rule::Win.apply(&b, Player::X, &mut rng), Some(Action::at(0, 2)));
        assert_eq!(
            Rule::BlockWin.apply(&b, Player::X, &mut rng),
            Some(Action::at(1, 2))
        );
        assert_eq!(Rule::Center.apply(&b, Player::X, &mut rng), None);
    }
}
