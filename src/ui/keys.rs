//! ui::keys
//!
//! Single-keypress reading.
//!
//! # Key Names
//!
//! A keypress is reported as its modifiers followed by the key, joined with
//! `+`, modifiers always in the order `super`, `ctrl`, `alt`, `shift`:
//! `b`, `shift+b`, `ctrl+c`, `return`, `escape`, `space`, `up`, `f5`.
//! Uppercase letters are reported as `shift+<lowercase>`.
//!
//! # Signals
//!
//! The terminal is in raw mode while a key is read, so the usual control
//! keys do not raise signals by themselves:
//! - `ctrl+c` is reported as [`PromptError::Cancelled`]
//! - `ctrl+\` and `ctrl+z` leave raw mode, deliver `SIGQUIT`/`SIGTSTP` to
//!   this process and then return the key name

use std::collections::VecDeque;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal;

use super::prompts::PromptError;

/// Source of single keypresses.
pub trait KeySource {
    /// Block until one nameable key is pressed and return its name.
    fn read_key(&mut self) -> Result<String, PromptError>;
}

/// Name a key event, or `None` for events with no nameable key.
///
/// # Example
///
/// ```
/// use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
/// use pr_cli::ui::keys::normalize;
///
/// let event = KeyEvent::new(KeyCode::Char('B'), KeyModifiers::SHIFT);
/// assert_eq!(normalize(&event).as_deref(), Some("shift+b"));
/// ```
pub fn normalize(event: &KeyEvent) -> Option<String> {
    if event.kind == KeyEventKind::Release {
        return None;
    }

    let mut shift = event.modifiers.contains(KeyModifiers::SHIFT);
    let key = match event.code {
        KeyCode::Char(' ') => "space".to_string(),
        // Terminals send ctrl+\ as 0x1C, which crossterm decodes as ctrl+4.
        KeyCode::Char('4') if event.modifiers.contains(KeyModifiers::CONTROL) => "\\".to_string(),
        KeyCode::Char(c) if c.is_uppercase() => {
            shift = true;
            c.to_lowercase().collect()
        }
        KeyCode::Char(c) => {
            // Shift is already applied to symbols like `!`.
            if !c.is_alphabetic() {
                shift = false;
            }
            c.to_string()
        }
        KeyCode::Enter => "return".to_string(),
        KeyCode::Esc => "escape".to_string(),
        KeyCode::Tab => "tab".to_string(),
        KeyCode::BackTab => {
            shift = true;
            "tab".to_string()
        }
        KeyCode::Backspace => "backspace".to_string(),
        KeyCode::Delete => "delete".to_string(),
        KeyCode::Insert => "insert".to_string(),
        KeyCode::Home => "home".to_string(),
        KeyCode::End => "end".to_string(),
        KeyCode::PageUp => "pageup".to_string(),
        KeyCode::PageDown => "pagedown".to_string(),
        KeyCode::Up => "up".to_string(),
        KeyCode::Down => "down".to_string(),
        KeyCode::Left => "left".to_string(),
        KeyCode::Right => "right".to_string(),
        KeyCode::F(n) => format!("f{n}"),
        _ => return None,
    };

    let mut name = String::new();
    if event.modifiers.contains(KeyModifiers::SUPER) {
        name.push_str("super+");
    }
    if event.modifiers.contains(KeyModifiers::CONTROL) {
        name.push_str("ctrl+");
    }
    if event.modifiers.contains(KeyModifiers::ALT) {
        name.push_str("alt+");
    }
    if shift {
        name.push_str("shift+");
    }
    name.push_str(&key);
    Some(name)
}

/// Raw mode for the lifetime of the guard.
struct RawModeGuard;

impl RawModeGuard {
    fn enable() -> Result<Self, PromptError> {
        terminal::enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        if let Err(e) = terminal::disable_raw_mode() {
            tracing::debug!(error = %e, "failed to leave raw mode");
        }
    }
}

/// [`KeySource`] reading from the terminal.
#[derive(Debug, Default)]
pub struct CrosstermKeys;

impl CrosstermKeys {
    pub fn new() -> Self {
        Self
    }

    fn read_raw(&self) -> Result<String, PromptError> {
        let _raw = RawModeGuard::enable()?;
        loop {
            if let Event::Key(key) = event::read()? {
                if let Some(name) = normalize(&key) {
                    return Ok(name);
                }
            }
        }
    }
}

impl KeySource for CrosstermKeys {
    fn read_key(&mut self) -> Result<String, PromptError> {
        let key = self.read_raw()?;
        tracing::trace!(key = %key, "keypress");

        if key == "ctrl+c" {
            return Err(PromptError::Cancelled);
        }
        if let Some(signal) = signal_for(&key) {
            raise(signal);
        }
        Ok(key)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Signal {
    Quit,
    Stop,
}

/// Signal the terminal would have raised for `key` outside raw mode.
fn signal_for(key: &str) -> Option<Signal> {
    match key {
        "ctrl+\\" => Some(Signal::Quit),
        "ctrl+z" => Some(Signal::Stop),
        _ => None,
    }
}

#[cfg(unix)]
fn raise(signal: Signal) {
    let signal = match signal {
        Signal::Quit => libc::SIGQUIT,
        Signal::Stop => libc::SIGTSTP,
    };
    // SAFETY: kill(2) on our own pid has no memory-safety preconditions.
    unsafe {
        libc::kill(libc::getpid(), signal);
    }
}

#[cfg(not(unix))]
fn raise(_signal: Signal) {}

/// [`KeySource`] replaying a fixed script, for tests.
///
/// Once the script is exhausted every read fails, so a loop that never
/// confirms cannot spin forever.
#[derive(Debug, Default)]
pub struct ScriptedKeys {
    keys: VecDeque<Result<String, PromptError>>,
}

impl ScriptedKeys {
    pub fn new<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            keys: keys.into_iter().map(|k| Ok(k.into())).collect(),
        }
    }

    /// Append a `ctrl+c`.
    pub fn then_cancel(mut self) -> Self {
        self.keys.push_back(Err(PromptError::Cancelled));
        self
    }

    /// Keys not read yet.
    pub fn remaining(&self) -> usize {
        self.keys.len()
    }
}

impl KeySource for ScriptedKeys {
    fn read_key(&mut self) -> Result<String, PromptError> {
        self.keys
            .pop_front()
            .unwrap_or_else(|| Err(PromptError::Failed("key script exhausted".into())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> Option<String> {
        normalize(&KeyEvent::new(code, modifiers))
    }

    mod normalize {
        use super::*;

        #[test]
        fn plain_characters() {
            assert_eq!(key(KeyCode::Char('b'), KeyModifiers::NONE).unwrap(), "b");
            assert_eq!(key(KeyCode::Char('1'), KeyModifiers::NONE).unwrap(), "1");
        }

        #[test]
        fn uppercase_is_shift() {
            assert_eq!(
                key(KeyCode::Char('B'), KeyModifiers::NONE).unwrap(),
                "shift+b"
            );
            assert_eq!(
                key(KeyCode::Char('B'), KeyModifiers::SHIFT).unwrap(),
                "shift+b"
            );
        }

        #[test]
        fn shifted_symbols_drop_shift() {
            assert_eq!(key(KeyCode::Char('!'), KeyModifiers::SHIFT).unwrap(), "!");
        }

        #[test]
        fn named_keys() {
            assert_eq!(key(KeyCode::Enter, KeyModifiers::NONE).unwrap(), "return");
            assert_eq!(key(KeyCode::Esc, KeyModifiers::NONE).unwrap(), "escape");
            assert_eq!(key(KeyCode::Char(' '), KeyModifiers::NONE).unwrap(), "space");
            assert_eq!(key(KeyCode::Up, KeyModifiers::NONE).unwrap(), "up");
            assert_eq!(key(KeyCode::F(5), KeyModifiers::NONE).unwrap(), "f5");
            assert_eq!(key(KeyCode::BackTab, KeyModifiers::SHIFT).unwrap(), "shift+tab");
        }

        #[test]
        fn modifier_order() {
            let all = KeyModifiers::SUPER
                | KeyModifiers::CONTROL
                | KeyModifiers::ALT
                | KeyModifiers::SHIFT;
            assert_eq!(
                key(KeyCode::Char('x'), all).unwrap(),
                "super+ctrl+alt+shift+x"
            );
            assert_eq!(
                key(KeyCode::Char('c'), KeyModifiers::CONTROL).unwrap(),
                "ctrl+c"
            );
            assert_eq!(
                key(KeyCode::Char('\\'), KeyModifiers::CONTROL).unwrap(),
                "ctrl+\\"
            );
        }

        #[test]
        fn unnameable_events() {
            assert_eq!(key(KeyCode::Null, KeyModifiers::NONE), None);
            assert_eq!(key(KeyCode::CapsLock, KeyModifiers::NONE), None);
        }

        #[test]
        fn releases_are_ignored() {
            let mut event = KeyEvent::new(KeyCode::Char('b'), KeyModifiers::NONE);
            event.kind = KeyEventKind::Release;
            assert_eq!(normalize(&event), None);
        }
    }

    mod signals {
        use super::*;

        #[test]
        fn quit_arrives_as_ctrl_4() {
            let name = key(KeyCode::Char('4'), KeyModifiers::CONTROL).unwrap();
            assert_eq!(name, "ctrl+\\");
            assert_eq!(signal_for(&name), Some(Signal::Quit));
        }

        #[test]
        fn suspend() {
            let name = key(KeyCode::Char('z'), KeyModifiers::CONTROL).unwrap();
            assert_eq!(signal_for(&name), Some(Signal::Stop));
        }

        #[test]
        fn plain_keys_raise_nothing() {
            assert_eq!(signal_for("4"), None);
            assert_eq!(signal_for("ctrl+c"), None);
            assert_eq!(signal_for("b"), None);
        }
    }

    mod scripted {
        use super::*;

        #[test]
        fn replays_then_fails() {
            let mut keys = ScriptedKeys::new(["b", "return"]).then_cancel();
            assert_eq!(keys.read_key().unwrap(), "b");
            assert_eq!(keys.read_key().unwrap(), "return");
            assert!(matches!(keys.read_key(), Err(PromptError::Cancelled)));
            assert!(matches!(keys.read_key(), Err(PromptError::Failed(_))));
        }
    }
}
