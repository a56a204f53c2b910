//! User prompts (enables mocking).
//!
//! [`StdinPrompter`] reads answers line by line from standard input, the
//! same way confirmation prompts work elsewhere in the CLI.

use std::io::{self, BufRead, Write};

use crate::error::Result;

/// Asks the user questions.
#[cfg_attr(test, mockall::automock)]
pub trait Prompter {
    /// Asks a free-text question. `None` means input ended.
    fn ask(&self, question: &str) -> Result<Option<String>>;

    /// Asks a yes/no question; anything but `y`/`yes` is no.
    fn confirm(&self, question: &str) -> Result<bool>;

    /// Offers numbered `options` and returns the answer: the option for a
    /// valid number, otherwise the typed text. `None` when nothing was typed.
    fn choose(&self, title: &str, options: &[String]) -> Result<Option<String>>;
}

/// Returns the answer when it has visible content.
#[must_use]
pub fn non_empty(answer: Option<String>) -> Option<String> {
    answer
        .map(|a| a.trim().to_string())
        .filter(|a| !a.is_empty())
}

/// Maps a numbered-list answer to an option, keeping free text as typed.
#[must_use]
pub fn resolve_choice(answer: &str, options: &[String]) -> String {
    answer
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|i| options.get(i))
        .cloned()
        .unwrap_or_else(|| answer.to_string())
}

/// [`Prompter`] on stdin/stdout.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdinPrompter {
    assume_yes: bool,
}

impl StdinPrompter {
    /// `assume_yes` answers every confirmation with yes without asking.
    #[must_use]
    pub const fn new(assume_yes: bool) -> Self {
        Self { assume_yes }
    }

    fn read_line(prompt: &str) -> Result<Option<String>> {
        print!("{prompt}");
        io::stdout().flush()?;

        let mut input = String::new();
        if io::stdin().lock().read_line(&mut input)? == 0 {
            return Ok(None);
        }
        Ok(Some(input.trim_end_matches(['\r', '\n']).to_string()))
    }
}

impl Prompter for StdinPrompter {
    fn ask(&self, question: &str) -> Result<Option<String>> {
        Self::read_line(&format!("{question} "))
    }

    fn confirm(&self, question: &str) -> Result<bool> {
        if self.assume_yes {
            return Ok(true);
        }
        let answer = Self::read_line(&format!("{question} [y/N] "))?.unwrap_or_default();
        let answer = answer.trim();
        Ok(answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes"))
    }

    fn choose(&self, title: &str, options: &[String]) -> Result<Option<String>> {
        println!("{title}\n");
        for (i, option) in options.iter().enumerate() {
            println!("  {:>2}) {option}", i + 1);
        }
        println!();

        let answer = non_empty(Self::read_line("Select by number or name: ")?);
        Ok(answer.map(|a| resolve_choice(&a, options)))
    }
}
