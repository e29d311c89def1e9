//! Line-oriented user input

use console::Term;
#[cfg(test)]
use std::collections::VecDeque;
use std::io::{self, BufRead};

/// Source of user answers for the interactive shell
pub trait Prompter {
    /// Print `prompt` and read one line, without the trailing newline
    fn ask(&mut self, prompt: &str) -> io::Result<String>;

    /// Like [`ask`](Self::ask) but without echoing the input
    fn ask_secret(&mut self, prompt: &str) -> io::Result<String>;

    fn clear(&mut self) -> io::Result<()> {
        Ok(())
    }

    fn pause(&mut self) -> io::Result<()> {
        self.ask("\nPress Enter to continue...").map(|_| ())
    }
}

/// Prompter backed by the process terminal
pub struct TermPrompter {
    term: Term,
}

impl TermPrompter {
    pub fn new() -> Self {
        Self {
            term: Term::stdout(),
        }
    }

    // Piped stdin: read directly so end of input is noticed instead of
    // returning empty answers forever.
    fn read_piped(&self) -> io::Result<String> {
        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line)? == 0 {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "input closed"));
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }
}

impl Default for TermPrompter {
    fn default() -> Self {
        Self::new()
    }
}

impl Prompter for TermPrompter {
    fn ask(&mut self, prompt: &str) -> io::Result<String> {
        self.term.write_str(prompt)?;
        self.term.flush()?;
        if self.term.is_term() {
            self.term.read_line()
        } else {
            self.read_piped()
        }
    }

    fn ask_secret(&mut self, prompt: &str) -> io::Result<String> {
        self.term.write_str(prompt)?;
        self.term.flush()?;
        if self.term.is_term() {
            self.term.read_secure_line()
        } else {
            self.read_piped()
        }
    }

    fn clear(&mut self) -> io::Result<()> {
        if self.term.is_term() {
            self.term.clear_screen()?;
        }
        Ok(())
    }
}

/// Replays canned answers; used by the shell tests
#[cfg(test)]
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    answers: VecDeque<String>,
    pub asked: Vec<String>,
}

#[cfg(test)]
impl ScriptedPrompter {
    pub fn new<I, T>(answers: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
            asked: Vec::new(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.answers.len()
    }
}

#[cfg(test)]
impl Prompter for ScriptedPrompter {
    fn ask(&mut self, prompt: &str) -> io::Result<String> {
        self.asked.push(prompt.to_string());
        self.answers
            .pop_front()
            .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "script exhausted"))
    }

    fn ask_secret(&mut self, prompt: &str) -> io::Result<String> {
        self.ask(prompt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scripted_answers_in_order() {
        let mut prompter = ScriptedPrompter::new(["a", "b"]);
        assert_eq!(prompter.ask("first? ").unwrap(), "a");
        assert_eq!(prompter.ask_secret("second? ").unwrap(), "b");
        assert_eq!(prompter.asked, ["first? ", "second? "]);

        let err = prompter.ask("third? ").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }
}
