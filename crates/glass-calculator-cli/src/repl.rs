//! Interactive terminal front end
//!
//! Keys are read in raw mode and forwarded to the widget under their
//! browser key names. The screen is redrawn whenever the view changes,
//! including when a highlight or the display pop runs out.

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::{cursor, execute, terminal};
use glass_calculator::input::Keypad;
use glass_calculator::widget::{CalculatorWidget, WidgetView};
use std::io::{self, Write};
use std::time::{Duration, Instant};
use tracing::warn;

use crate::error::{CliError, CliResult};
use crate::output::render_screen;

/// Redraw tick while waiting for input
const POLL_INTERVAL: Duration = Duration::from_millis(30);

/// What a terminal key does in the REPL
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    /// Forward a key name to the calculator
    Key(String),
    /// Recall the next older history entry
    RecallOlder,
    /// Recall the next newer history entry
    RecallNewer,
    /// Toggle light/dark
    ToggleTheme,
    /// Empty the history
    ClearHistory,
    /// Leave the REPL
    Quit,
}

/// Translates a terminal key event
#[must_use]
pub fn command_for(key: &KeyEvent) -> Option<ReplCommand> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c' | 'd') => Some(ReplCommand::Quit),
            _ => None,
        };
    }
    let command = match key.code {
        KeyCode::Char('q') => ReplCommand::Quit,
        KeyCode::Char('t') => ReplCommand::ToggleTheme,
        KeyCode::Char(ch) => ReplCommand::Key(ch.to_string()),
        KeyCode::Enter => ReplCommand::Key("Enter".to_string()),
        KeyCode::Esc => ReplCommand::Key("Escape".to_string()),
        KeyCode::Backspace => ReplCommand::Key("Backspace".to_string()),
        KeyCode::Up => ReplCommand::RecallOlder,
        KeyCode::Down => ReplCommand::RecallNewer,
        KeyCode::Delete => ReplCommand::ClearHistory,
        _ => return None,
    };
    Some(command)
}

/// REPL session state outside the widget
#[derive(Debug)]
pub struct Repl {
    widget: CalculatorWidget,
    keypad: Keypad,
    history_cursor: Option<usize>,
    status: Option<String>,
}

impl Repl {
    /// Creates a session around `widget`
    #[must_use]
    pub fn new(widget: CalculatorWidget) -> Self {
        Self {
            widget,
            keypad: Keypad::new(),
            history_cursor: None,
            status: None,
        }
    }

    /// The widget being driven
    #[must_use]
    pub fn widget(&self) -> &CalculatorWidget {
        &self.widget
    }

    /// Applies one command; returns `false` when the session should end
    pub fn handle(&mut self, command: ReplCommand, now_ms: u64) -> bool {
        self.status = None;
        match command {
            ReplCommand::Quit => return false,
            ReplCommand::Key(key) => {
                if self.widget.press_key(&key, now_ms) {
                    self.history_cursor = None;
                }
            }
            ReplCommand::RecallOlder => {
                let next = self.history_cursor.map_or(0, |i| i + 1);
                if self.widget.select_history(next, now_ms) {
                    self.history_cursor = Some(next);
                }
            }
            ReplCommand::RecallNewer => {
                if let Some(next) = self.history_cursor.and_then(|i| i.checked_sub(1)) {
                    if self.widget.select_history(next, now_ms) {
                        self.history_cursor = Some(next);
                    }
                }
            }
            ReplCommand::ToggleTheme => {
                if let Err(err) = self.widget.toggle_theme() {
                    warn!(error = %err, "theme not saved");
                    self.status = Some(err.to_string());
                }
            }
            ReplCommand::ClearHistory => {
                self.widget.clear_history();
                self.history_cursor = None;
            }
        }
        true
    }

    /// Screen lines at clock time `now_ms`
    #[must_use]
    pub fn screen(&self, now_ms: u64) -> Vec<String> {
        let mut lines = render_screen(&self.widget.view(now_ms), &self.keypad);
        lines.push(String::new());
        lines.push(
            console::style("q quit · t theme · ↑/↓ recall history · Del clear history")
                .dim()
                .to_string(),
        );
        if let Some(status) = &self.status {
            lines.push(console::style(status).red().to_string());
        }
        lines
    }
}

/// Runs `restore` on drop once `enable` has succeeded, even if the
/// setup that follows fails
struct TerminalGuard<R: FnMut()> {
    restore: R,
}

impl<R: FnMut()> TerminalGuard<R> {
    fn enter(
        enable: impl FnOnce() -> CliResult<()>,
        setup: impl FnOnce() -> CliResult<()>,
        restore: R,
    ) -> CliResult<Self> {
        enable()?;
        let guard = Self { restore };
        setup()?;
        Ok(guard)
    }
}

impl<R: FnMut()> Drop for TerminalGuard<R> {
    fn drop(&mut self) {
        (self.restore)();
    }
}

fn raw_mode_guard() -> CliResult<TerminalGuard<impl FnMut()>> {
    TerminalGuard::enter(
        || {
            terminal::enable_raw_mode()
                .map_err(|e| CliError::terminal(format!("cannot enter raw mode: {e}")))
        },
        || {
            execute!(io::stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;
            Ok(())
        },
        || {
            let _ = execute!(io::stdout(), cursor::Show, terminal::LeaveAlternateScreen);
            let _ = terminal::disable_raw_mode();
        },
    )
}

fn draw(out: &mut impl Write, lines: &[String]) -> io::Result<()> {
    execute!(
        out,
        terminal::Clear(terminal::ClearType::All),
        cursor::MoveTo(0, 0)
    )?;
    // Raw mode needs explicit carriage returns
    write!(out, "{}", lines.join("\r\n"))?;
    out.flush()
}

/// Runs the interactive loop until the user quits
///
/// # Errors
///
/// Returns an error if the terminal cannot be put in raw mode or written.
pub fn run(widget: CalculatorWidget) -> CliResult<()> {
    let mut repl = Repl::new(widget);
    let started = Instant::now();
    let now_ms = || started.elapsed().as_millis() as u64;

    let _guard = raw_mode_guard()?;
    let mut out = io::stdout();
    let mut last_view: Option<WidgetView> = None;

    loop {
        let now = now_ms();
        let view = repl.widget().view(now);
        if last_view.as_ref() != Some(&view) {
            draw(&mut out, &repl.screen(now))?;
            last_view = Some(view);
        }

        if !event::poll(POLL_INTERVAL)? {
            continue;
        }
        if let Event::Key(key) = event::read()? {
            if let Some(command) = command_for(&key) {
                if !repl.handle(command, now_ms()) {
                    break;
                }
                last_view = None;
            }
        }
    }
    Ok(())
}
