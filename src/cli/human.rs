//! Human opponent reading moves from a text stream.

use std::io::{self, BufRead, Write};

use rand::RngCore;

use crate::{
    Result,
    cli::prompt::read_line,
    error::Error,
    ports::Opponent,
    tictactoe::Board,
    types::Action,
};

/// Plays `X` by asking for `row,col` on `output` and reading `input`.
///
/// Malformed lines and out-of-range or occupied cells are reported and
/// asked again; only the end of input is an error.
pub struct HumanPlayer<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> HumanPlayer<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    fn prompt(&mut self, board: &Board) -> io::Result<Action> {
        writeln!(self.output, "{board}")?;
        loop {
            write!(
                self.output,
                "Your move! Please select a row and column from 0-2 in the format row,col: "
            )?;
            self.output.flush()?;

            let Some(line) = read_line(&mut self.input)? else {
                return Err(io::Error::new(
                    io::ErrorKind::UnexpectedEof,
                    "input closed before a move was entered",
                ));
            };

            let Some((row, col)) = parse_coordinates(&line) else {
                writeln!(self.output, "INVALID INPUT! Please use the correct format.")?;
                continue;
            };

            match Action::new(row, col) {
                Ok(action) if board.is_empty(action) => return Ok(action),
                _ => writeln!(self.output, "INVALID MOVE! Choose again.")?,
            }
        }
    }
}

fn parse_coordinates(line: &str) -> Option<(usize, usize)> {
    let (row, col) = line.split_once(',')?;
    Some((row.trim().parse().ok()?, col.trim().parse().ok()?))
}

impl<R: BufRead, W: Write> Opponent for HumanPlayer<R, W> {
    fn choose_move(&mut self, board: &Board, _rng: &mut dyn RngCore) -> Result<Action> {
        self.prompt(board).map_err(|source| Error::Io {
            operation: "read move from player".to_string(),
            source,
        })
    }

    fn name(&self) -> &str {
        "human"
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use rand::{SeedableRng, rngs::StdRng};

    use super::*;

    #[test]
    fn test_parse_coordinates() {
        assert_eq!(parse_coordinates("1,2"), Some((1, 2)));
        assert_eq!(parse_coordinates(" 0 , 0 "), Some((0, 0)));
        assert_eq!(parse_coordinates("12"), None);
        assert_eq!(parse_coordinates("a,b"), None);
    }

    #[test]
    fn test_reprompts_on_bad_input() {
        let board = Board::from_rows("X--/-O-/---").unwrap();
        let mut output = Vec::new();
        let mut rng = StdRng::seed_from_u64(0);
        let action = {
            let mut human =
                HumanPlayer::new(Cursor::new("oops\n3,0\n1,1\n2,0\n"), &mut output);
            human.choose_move(&board, &mut rng).unwrap()
        };

        assert_eq!(action, Action::at(2, 0));
        let text = String::from_utf8(output).unwrap();
        assert_eq!(text.matches("INVALID INPUT!").count(), 1);
        assert_eq!(text.matches("INVALID MOVE!").count(), 2);
        assert!(text.contains("    0   1   2"));
    }

    #[test]
    fn test_closed_input_is_error() {
        let mut human = HumanPlayer::new(Cursor::new(""), Vec::<u8>::new());
        let mut rng = StdRng::seed_from_u64(0);
        assert!(matches!(
            human.choose_move(&Board::new(), &mut rng),
            Err(Error::Io { .. })
        ));
    }
}
