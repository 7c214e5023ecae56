//! Masked terminal input

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use std::io::{self, BufRead, IsTerminal, Write};

use crate::error::CliError;

/// Outcome of one key press while reading a secret
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    Typed,
    Erased,
    Ignored,
    Submit,
    Cancel,
}

/// Apply `key` to `buffer`
pub fn apply_key(buffer: &mut String, key: KeyEvent) -> KeyOutcome {
    if key.kind != KeyEventKind::Press {
        return KeyOutcome::Ignored;
    }

    match key.code {
        KeyCode::Enter => KeyOutcome::Submit,
        KeyCode::Esc => KeyOutcome::Cancel,
        KeyCode::Char('c' | 'd') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            KeyOutcome::Cancel
        }
        KeyCode::Backspace => {
            if buffer.pop().is_some() {
                KeyOutcome::Erased
            } else {
                KeyOutcome::Ignored
            }
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            buffer.push(c);
            KeyOutcome::Typed
        }
        _ => KeyOutcome::Ignored,
    }
}

struct RawModeGuard;

impl RawModeGuard {
    fn enable() -> io::Result<Self> {
        enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
    }
}

/// Read a secret without echoing it; each typed character shows as `*`.
///
/// When stdin is not a terminal the first line is read as is.
pub fn read_secret(label: &str) -> Result<String, CliError> {
    let mut err = io::stderr();
    write!(err, "{label}")?;
    err.flush()?;

    if !io::stdin().is_terminal() {
        let mut line = String::new();
        io::stdin().lock().read_line(&mut line)?;
        writeln!(err)?;
        return Ok(line.trim_end_matches(['\r', '\n']).to_string());
    }

    let mut secret = String::new();
    let outcome = {
        let _raw = RawModeGuard::enable()?;
        loop {
            let Event::Key(key) = event::read()? else {
                continue;
            };
            match apply_key(&mut secret, key) {
                KeyOutcome::Typed => write!(err, "*")?,
                KeyOutcome::Erased => write!(err, "\u{8} \u{8}")?,
                KeyOutcome::Ignored => continue,
                done @ (KeyOutcome::Submit | KeyOutcome::Cancel) => break done,
            }
            err.flush()?;
        }
    };
    writeln!(err)?;

    match outcome {
        KeyOutcome::Cancel => Err(CliError::InvalidInput("Input cancelled".to_string())),
        _ => Ok(secret),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_typing_and_erasing() {
        let mut buffer = String::new();
        for c in "12345x".chars() {
            assert_eq!(apply_key(&mut buffer, press(KeyCode::Char(c))), KeyOutcome::Typed);
        }
        assert_eq!(apply_key(&mut buffer, press(KeyCode::Backspace)), KeyOutcome::Erased);
        assert_eq!(
            apply_key(&mut buffer, KeyEvent::new(KeyCode::Char('6'), KeyModifiers::SHIFT)),
            KeyOutcome::Typed
        );
        assert_eq!(apply_key(&mut buffer, press(KeyCode::Enter)), KeyOutcome::Submit);
        assert_eq!(buffer, "123456");
    }

    #[test]
    fn test_control_keys() {
        let mut buffer = String::new();
        assert_eq!(apply_key(&mut buffer, press(KeyCode::Backspace)), KeyOutcome::Ignored);
        assert_eq!(apply_key(&mut buffer, press(KeyCode::Left)), KeyOutcome::Ignored);
        assert_eq!(
            apply_key(&mut buffer, KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            KeyOutcome::Cancel
        );
        assert_eq!(apply_key(&mut buffer, press(KeyCode::Esc)), KeyOutcome::Cancel);
        assert!(buffer.is_empty());
    }
}
