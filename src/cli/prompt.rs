//! Line-based prompts over any reader/writer pair.

use std::io::{self, BufRead, Write};

/// Read one line, trimmed. `None` at end of input.
pub fn read_line<R: BufRead>(input: &mut R) -> io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// Ask `question` until the answer is y/yes or n/no (any case).
///
/// Returns `None` if the input ends before a valid answer.
pub fn ask_yes_no<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    question: &str,
) -> io::Result<Option<bool>> {
    loop {
        write!(output, "{question} [y/n]: ")?;
        output.flush()?;
        let Some(answer) = read_line(input)? else {
            writeln!(output)?;
            return Ok(None);
        };
        match answer.to_ascii_lowercase().as_str() {
            "y" | "yes" => return Ok(Some(true)),
            "n" | "no" => return Ok(Some(false)),
            _ => writeln!(output, "Invalid input. Please choose 'y' or 'n'.")?,
        }
    }
}
