use std::{
    io::{self, BufRead, Write},
    str::FromStr,
};

use nim::Action;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum InputError {
    #[error("input was closed")]
    Closed,
    #[error("could not read input: {0}")]
    Io(#[from] io::Error),
}

/// Print a prompt and read one line.
/// Returns `None` if the line does not parse as `T`.
fn prompt<T: FromStr>(
    input: &mut impl BufRead,
    line: &mut String,
    message: &str,
) -> Result<Option<T>, InputError> {
    print!("{message}");
    io::stdout().flush()?;
    line.clear();
    if input.read_line(line)? == 0 {
        return Err(InputError::Closed);
    }
    Ok(line.trim().parse().ok())
}

/// Keep asking until the human enters one of the available actions.
pub fn read_action(
    input: &mut impl BufRead,
    line: &mut String,
    available: &[Action],
) -> Result<Action, InputError> {
    loop {
        let pile = prompt(input, line, "Choose Pile: ")?;
        let count = prompt(input, line, "Choose Count: ")?;
        if let (Some(pile), Some(count)) = (pile, count) {
            let action = Action { pile, count };
            if available.contains(&action) {
                return Ok(action);
            }
        }
        println!("Invalid move, try again.");
    }
}

#[cfg(test)]
mod tests {
    use nim::available_actions;

    use super::{read_action, InputError};

    #[test]
    fn retries_until_valid() {
        let mut input = "9\n1\nx\n1\n1\n4\n1\n2\n".as_bytes();
        let mut line = String::new();
        let action = read_action(&mut input, &mut line, &available_actions(&[1, 3])).unwrap();
        assert_eq!(action, (1, 2).into());
    }

    #[test]
    fn closed_input() {
        let mut input = "0\n".as_bytes();
        let mut line = String::new();
        assert!(matches!(
            read_action(&mut input, &mut line, &available_actions(&[1, 3])),
            Err(InputError::Closed)
        ));
    }
}
