use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// What a key press means to the feed screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiAction {
    Up,
    Down,
    PageUp,
    PageDown,
    Home,
    End,
    /// Press the selected row (only the trailing control reacts).
    Activate,
    /// Load more or retry, wherever the selection is.
    Advance,
    Quit,
}

pub fn map_key(key: KeyEvent) -> Option<UiAction> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Some(UiAction::Quit),
            _ => None,
        };
    }
    let action = match key.code {
        KeyCode::Up | KeyCode::Char('k') => UiAction::Up,
        KeyCode::Down | KeyCode::Char('j') => UiAction::Down,
        KeyCode::PageUp => UiAction::PageUp,
        KeyCode::PageDown => UiAction::PageDown,
        KeyCode::Home | KeyCode::Char('g') => UiAction::Home,
        KeyCode::End | KeyCode::Char('G') => UiAction::End,
        KeyCode::Enter | KeyCode::Char(' ') => UiAction::Activate,
        KeyCode::Char('l') | KeyCode::Char('r') => UiAction::Advance,
        KeyCode::Char('q') | KeyCode::Esc => UiAction::Quit,
        _ => return None,
    };
    Some(action)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn navigation_keys_map_to_moves() {
        assert_eq!(map_key(press(KeyCode::Down)), Some(UiAction::Down));
        assert_eq!(map_key(press(KeyCode::Char('k'))), Some(UiAction::Up));
        assert_eq!(map_key(press(KeyCode::End)), Some(UiAction::End));
    }

    #[test]
    fn load_and_retry_keys_request_advance() {
        assert_eq!(map_key(press(KeyCode::Char('l'))), Some(UiAction::Advance));
        assert_eq!(map_key(press(KeyCode::Char('r'))), Some(UiAction::Advance));
        assert_eq!(map_key(press(KeyCode::Enter)), Some(UiAction::Activate));
    }

    #[test]
    fn ctrl_c_quits_but_plain_c_is_ignored() {
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(map_key(ctrl_c), Some(UiAction::Quit));
        assert_eq!(map_key(press(KeyCode::Char('c'))), None);
    }

    #[test]
    fn key_release_is_ignored() {
        let mut key = press(KeyCode::Char('q'));
        key.kind = KeyEventKind::Release;
        assert_eq!(map_key(key), None);
    }
}
