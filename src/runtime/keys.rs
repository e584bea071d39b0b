use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::{Action, InputMode};

/// Key state carried between presses (the `gg` prefix).
#[derive(Debug, Default)]
pub struct KeyState {
    pending_g: bool,
}

/// Translate a key press into an action for the current input mode.
pub fn map_key(key: KeyEvent, input: &InputMode, scrub_seconds: u64, state: &mut KeyState) -> Option<Action> {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Some(Action::Quit);
    }

    if let InputMode::Import(_) = input {
        state.pending_g = false;
        return match key.code {
            KeyCode::Esc => Some(Action::ImportCancel),
            KeyCode::Enter => Some(Action::ImportSubmit),
            KeyCode::Backspace => Some(Action::ImportBackspace),
            KeyCode::Char(c) if !c.is_control() => Some(Action::ImportInput(c)),
            _ => None,
        };
    }

    if key.code == KeyCode::Char('g') {
        if state.pending_g {
            state.pending_g = false;
            return Some(Action::CursorTop);
        }
        state.pending_g = true;
        return None;
    }
    state.pending_g = false;

    let scrub = i64::try_from(scrub_seconds).unwrap_or(i64::MAX);
    let action = match key.code {
        KeyCode::Char('q') => Action::Quit,
        KeyCode::Tab => Action::SwitchView,
        KeyCode::Char('j') | KeyCode::Down => Action::CursorDown,
        KeyCode::Char('k') | KeyCode::Up => Action::CursorUp,
        KeyCode::Char('G') => Action::CursorBottom,
        KeyCode::Enter => Action::PlaySelected,
        KeyCode::Char('d') => Action::RemoveSelected,
        KeyCode::Char('a') => Action::OpenImport,
        KeyCode::Char('w') => Action::Save,
        KeyCode::Char('o') => Action::Load,
        KeyCode::Char(' ') | KeyCode::Char('p') => Action::TogglePlayPause,
        KeyCode::Char('s') => Action::Stop,
        KeyCode::Char('l') => Action::Next,
        KeyCode::Char('h') => Action::Previous,
        KeyCode::Char('L') => Action::SeekBy(scrub),
        KeyCode::Char('H') => Action::SeekBy(-scrub),
        KeyCode::Char(c @ '0'..='9') => Action::SeekFraction(f64::from(c as u8 - b'0') / 10.0),
        _ => return None,
    };
    Some(action)
}
