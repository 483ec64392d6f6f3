use std::fmt::Display;
use std::io::{self, BufRead, Write};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PromptError {
    /// The input stream reached end of file.
    #[error("input closed")]
    Closed,

    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Line-oriented prompting over any reader/writer pair.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn say(&mut self, line: impl Display) -> Result<(), PromptError> {
        writeln!(self.output, "{line}")?;
        Ok(())
    }

    /// Print `label` and read one line, without its line ending.
    pub fn ask(&mut self, label: &str) -> Result<String, PromptError> {
        write!(self.output, "{label}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(PromptError::Closed);
        }
        let trimmed = line.trim_end_matches(['\r', '\n']).len();
        line.truncate(trimmed);
        Ok(line)
    }

    /// Like `ask`, showing the current value; a blank answer keeps it.
    pub fn ask_or(&mut self, label: &str, current: &str) -> Result<String, PromptError> {
        let answer = self.ask(&format!("{label} [{current}]: "))?;
        if answer.trim().is_empty() {
            Ok(current.to_string())
        } else {
            Ok(answer)
        }
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_ask_strips_line_ending() {
        let mut prompt = Prompter::new(Cursor::new("John Doe\r\n30\n"), Vec::new());

        assert_eq!(prompt.ask("Enter Name: ").unwrap(), "John Doe");
        assert_eq!(prompt.ask("Enter Age: ").unwrap(), "30");
        assert!(matches!(prompt.ask("More: "), Err(PromptError::Closed)));

        let output = String::from_utf8(prompt.into_output()).unwrap();
        assert_eq!(output, "Enter Name: Enter Age: More: ");
    }

    #[test]
    fn test_ask_or_keeps_current_on_blank() {
        let mut prompt = Prompter::new(Cursor::new("\nJane\n"), Vec::new());

        assert_eq!(prompt.ask_or("Name", "John").unwrap(), "John");
        assert_eq!(prompt.ask_or("Name", "John").unwrap(), "Jane");
    }
}
