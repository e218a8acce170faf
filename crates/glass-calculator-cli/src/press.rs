//! Scripted input for the `press` command

use glass_calculator::input::KeyboardMapper;
use glass_calculator::widget::CalculatorWidget;
use tracing::debug;

use crate::error::{CliError, CliResult};

/// Prefix of a history recall token, e.g. `history:0`
pub const HISTORY_PREFIX: &str = "history:";

/// One resolved input step
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// A key name understood by the keyboard mapper
    Key(String),
    /// A keypad button id
    Button(String),
    /// Recall of the n-th newest history entry
    History(usize),
}

/// Resolves a command-line token into input steps
///
/// # Errors
///
/// Returns [`CliError::InvalidArgument`] for tokens that are not keys,
/// button ids, runs of keys or history recalls.
pub fn parse_token(token: &str) -> CliResult<Vec<Step>> {
    let mapper = KeyboardMapper::new();

    if let Some(index) = token.strip_prefix(HISTORY_PREFIX) {
        let index = index.parse().map_err(|_| {
            CliError::invalid_argument(format!("bad history index in {token:?}"))
        })?;
        return Ok(vec![Step::History(index)]);
    }
    if token.starts_with("btn-") {
        return Ok(vec![Step::Button(token.to_string())]);
    }
    if mapper.handles(token) {
        return Ok(vec![Step::Key(token.to_string())]);
    }

    let keys: Vec<String> = token.chars().map(String::from).collect();
    if !keys.is_empty() && keys.iter().all(|k| mapper.handles(k)) {
        return Ok(keys.into_iter().map(Step::Key).collect());
    }
    Err(CliError::invalid_argument(format!("unknown key: {token:?}")))
}

/// Applies all tokens to the widget at clock time `now_ms`
///
/// # Errors
///
/// Returns an error for unparseable tokens, unknown button ids and history
/// indices past the end of the log.
pub fn apply_tokens(widget: &mut CalculatorWidget, tokens: &[String], now_ms: u64) -> CliResult<()> {
    for token in tokens {
        for step in parse_token(token)? {
            debug!(?step, "press");
            let handled = match &step {
                Step::Key(key) => widget.press_key(key, now_ms),
                Step::Button(id) => widget.click_button(id, now_ms),
                Step::History(index) => widget.select_history(*index, now_ms),
            };
            if !handled {
                return Err(CliError::invalid_argument(format!(
                    "{token:?} did nothing: no such button or history entry"
                )));
            }
        }
    }
    Ok(())
}
