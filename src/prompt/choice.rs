//! Single-choice selection
//!
//! [`TerminalChoice`] draws an arrow-key menu when attached to a terminal and
//! falls back to [`NumberedChoice`] otherwise.

use super::Prompt;
use crate::error::{Result, WorksError};
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute, queue,
    style::{Attribute, Print, SetAttribute},
    terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::debug;
use std::io::{self, IsTerminal, Write};

const LEAVE_BLANK: &str = "[Leave blank]";

/// Picks one of a fixed list of options
pub trait ChoicePrompt {
    /// Returns `None` only when `allow_blank` is set and the user skipped
    fn choose(
        &mut self,
        prompt: &mut dyn Prompt,
        label: &str,
        options: &[&str],
        allow_blank: bool,
    ) -> Result<Option<String>>;
}

/// Plain numbered list read through the line prompt
#[derive(Debug, Default, Clone, Copy)]
pub struct NumberedChoice;

impl ChoicePrompt for NumberedChoice {
    fn choose(
        &mut self,
        prompt: &mut dyn Prompt,
        label: &str,
        options: &[&str],
        allow_blank: bool,
    ) -> Result<Option<String>> {
        prompt.say(&format!("{}:", label))?;
        for (idx, option) in options.iter().enumerate() {
            prompt.say(&format!("  {}. {}", idx + 1, option))?;
        }
        if allow_blank {
            prompt.say("  0. Leave blank")?;
        }

        loop {
            let raw = prompt.ask("Select option number: ")?;
            if allow_blank && raw == "0" {
                return Ok(None);
            }
            if let Ok(idx) = raw.parse::<usize>() {
                if (1..=options.len()).contains(&idx) {
                    return Ok(Some(options[idx - 1].to_string()));
                }
            }
            prompt.say("Invalid selection, please try again.")?;
        }
    }
}

/// What a key press does to the menu
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectorAction {
    Continue,
    Confirm(Option<String>),
    Abort,
}

/// Cursor position over the menu entries
#[derive(Debug, Clone)]
pub struct SelectorState {
    entries: Vec<String>,
    index: usize,
    allow_blank: bool,
}

impl SelectorState {
    pub fn new(options: &[&str], allow_blank: bool) -> Self {
        let mut entries = Vec::with_capacity(options.len() + 1);
        if allow_blank {
            entries.push(LEAVE_BLANK.to_string());
        }
        entries.extend(options.iter().map(|o| o.to_string()));
        Self {
            entries,
            index: 0,
            allow_blank,
        }
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// Apply a key press; movement wraps around both ends
    pub fn handle(&mut self, key: KeyEvent) -> SelectorAction {
        if self.entries.is_empty() {
            return SelectorAction::Abort;
        }
        let len = self.entries.len();
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                SelectorAction::Abort
            }
            KeyCode::Esc => SelectorAction::Abort,
            KeyCode::Up | KeyCode::Char('k') => {
                self.index = (self.index + len - 1) % len;
                SelectorAction::Continue
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.index = (self.index + 1) % len;
                SelectorAction::Continue
            }
            KeyCode::Enter => {
                if self.allow_blank && self.index == 0 {
                    SelectorAction::Confirm(None)
                } else {
                    SelectorAction::Confirm(Some(self.entries[self.index].clone()))
                }
            }
            _ => SelectorAction::Continue,
        }
    }
}

/// Restores the terminal however the menu loop ends
struct RawModeGuard;

impl RawModeGuard {
    fn enter(out: &mut impl Write) -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let guard = RawModeGuard;
        execute!(out, EnterAlternateScreen, cursor::Hide)?;
        Ok(guard)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = execute!(io::stdout(), cursor::Show, LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

/// Arrow-key menu on the controlling terminal
#[derive(Debug, Clone, Copy)]
pub struct TerminalChoice {
    interactive: bool,
    fallback: NumberedChoice,
}

impl TerminalChoice {
    /// Use the menu only when both stdin and stdout are terminals
    pub fn detect() -> Self {
        let interactive = io::stdin().is_terminal() && io::stdout().is_terminal();
        debug!("Terminal selector available: {}", interactive);
        Self {
            interactive,
            fallback: NumberedChoice,
        }
    }

    pub fn is_interactive(&self) -> bool {
        self.interactive
    }

    fn run_menu(label: &str, state: &mut SelectorState) -> Result<Option<String>> {
        let mut out = io::stdout();
        let _guard = RawModeGuard::enter(&mut out)?;

        loop {
            draw(&mut out, label, state)?;
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                match state.handle(key) {
                    SelectorAction::Continue => {}
                    SelectorAction::Confirm(choice) => return Ok(choice),
                    SelectorAction::Abort => return Err(WorksError::Aborted),
                }
            }
        }
    }
}

fn draw(out: &mut impl Write, label: &str, state: &SelectorState) -> io::Result<()> {
    queue!(
        out,
        Clear(ClearType::All),
        cursor::MoveTo(0, 0),
        Print(format!("Select {}:", label))
    )?;
    for (offset, entry) in state.entries().iter().enumerate() {
        let row = u16::try_from(offset + 2).unwrap_or(u16::MAX);
        queue!(out, cursor::MoveTo(0, row))?;
        if offset == state.index() {
            queue!(
                out,
                SetAttribute(Attribute::Reverse),
                Print(entry),
                SetAttribute(Attribute::Reset)
            )?;
        } else {
            queue!(out, Print(entry))?;
        }
    }
    out.flush()
}

impl ChoicePrompt for TerminalChoice {
    fn choose(
        &mut self,
        prompt: &mut dyn Prompt,
        label: &str,
        options: &[&str],
        allow_blank: bool,
    ) -> Result<Option<String>> {
        if !self.interactive {
            return self.fallback.choose(prompt, label, options, allow_blank);
        }

        prompt.say(&format!(
            "Use arrow keys to choose a {}, Enter to confirm.",
            label
        ))?;
        if allow_blank {
            prompt.say(&format!("Select '{}' to skip.", LEAVE_BLANK))?;
        }

        let mut state = SelectorState::new(options, allow_blank);
        match Self::run_menu(label, &mut state) {
            Ok(choice) => Ok(choice),
            Err(WorksError::Aborted) => Err(WorksError::Aborted),
            Err(err) => {
                prompt.say(&format!(
                    "Interactive selector failed ({}). Please type a value manually.",
                    err
                ))?;
                self.fallback.choose(prompt, label, options, allow_blank)
            }
        }
    }
}
