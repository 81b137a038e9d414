//! Line-oriented user interaction
//!
//! Interactive tools talk to the user through the [`Prompt`] trait so that a
//! whole session can be scripted in tests with an in-memory [`LinePrompt`].

pub mod choice;

pub use choice::{ChoicePrompt, NumberedChoice, SelectorAction, SelectorState, TerminalChoice};

use crate::error::{Result, WorksError};
use crate::schema::{weekday_from_name, WeekdayPicker};
use chrono::Weekday;
use std::io::{self, BufRead, Write};

/// A question/answer channel with the user
pub trait Prompt {
    /// Show `question` and read one answer, trimmed
    ///
    /// End of input is reported as [`WorksError::Aborted`].
    fn ask(&mut self, question: &str) -> Result<String>;

    /// Show one line of text
    fn say(&mut self, message: &str) -> Result<()>;
}

impl<T: Prompt + ?Sized> Prompt for &mut T {
    fn ask(&mut self, question: &str) -> Result<String> {
        (**self).ask(question)
    }

    fn say(&mut self, message: &str) -> Result<()> {
        (**self).say(message)
    }
}

/// A [`Prompt`] over any reader and writer pair
pub struct LinePrompt<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> LinePrompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Consume the prompt, returning everything written to the user
    pub fn into_output(self) -> W {
        self.output
    }
}

impl LinePrompt<io::StdinLock<'static>, io::Stdout> {
    /// Prompt on the process's standard streams
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Prompt for LinePrompt<R, W> {
    fn ask(&mut self, question: &str) -> Result<String> {
        write!(self.output, "{}", question)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.output)?;
            return Err(WorksError::Aborted);
        }
        Ok(line.trim().to_string())
    }

    fn say(&mut self, message: &str) -> Result<()> {
        writeln!(self.output, "{}", message)?;
        Ok(())
    }
}

/// Ask a yes/no question; only `y` and `yes` (any case) count as yes
pub fn confirm<P: Prompt + ?Sized>(prompt: &mut P, question: &str) -> Result<bool> {
    let answer = prompt.ask(question)?.to_lowercase();
    Ok(answer == "y" || answer == "yes")
}

/// Resolves `next week` by asking the user which day
pub struct AskWeekday<'a, P: Prompt + ?Sized>(pub &'a mut P);

impl<P: Prompt + ?Sized> WeekdayPicker for AskWeekday<'_, P> {
    fn pick_weekday(&mut self) -> Result<Weekday> {
        loop {
            let answer = self.0.ask("Which day next week? (e.g., Monday): ")?;
            if answer.is_empty() {
                self.0.say("Please enter a weekday name.")?;
                continue;
            }
            match weekday_from_name(&answer) {
                Some(day) => return Ok(day),
                None => self
                    .0
                    .say("Unrecognized weekday. Try again (e.g., Monday, Tue, Fri).")?,
            }
        }
    }
}
