use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use crumbs_core::MenuEvent;

use crate::app::{Action, AppMode};

/// Map key events to actions based on current mode
pub fn handle_key(key: KeyEvent, mode: AppMode) -> Action {
    match mode {
        AppMode::Help => handle_key_help(key),
        AppMode::Browsing => handle_key_browsing(key),
    }
}

fn handle_key_help(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            Action::Menu(MenuEvent::Interrupt)
        }
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?') => Action::HideHelp,
        _ => Action::Tick,
    }
}

fn handle_key_browsing(key: KeyEvent) -> Action {
    let event = match key.code {
        // Quit
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            MenuEvent::Interrupt
        }
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => MenuEvent::Interrupt,

        // Navigation
        KeyCode::Up | KeyCode::Char('w' | 'W' | 'k' | 'K') => MenuEvent::MoveUp,
        KeyCode::Down | KeyCode::Char('s' | 'S' | 'j' | 'J') => MenuEvent::MoveDown,

        // Selection
        KeyCode::Char(' ') | KeyCode::Enter => MenuEvent::Toggle,
        KeyCode::Char('a' | 'A') => MenuEvent::ToggleAll,
        KeyCode::Char('c' | 'C') => MenuEvent::Commit,

        // Help
        KeyCode::Char('?') => return Action::ShowHelp,

        _ => return Action::Tick,
    };
    Action::Menu(event)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn browse(code: KeyCode) -> Action {
        handle_key(press(code), AppMode::Browsing)
    }

    #[test]
    fn test_navigation_keys() {
        for code in [KeyCode::Up, KeyCode::Char('w'), KeyCode::Char('k')] {
            assert_eq!(browse(code), Action::Menu(MenuEvent::MoveUp));
        }
        for code in [KeyCode::Down, KeyCode::Char('S'), KeyCode::Char('j')] {
            assert_eq!(browse(code), Action::Menu(MenuEvent::MoveDown));
        }
    }

    #[test]
    fn test_selection_keys() {
        assert_eq!(browse(KeyCode::Char(' ')), Action::Menu(MenuEvent::Toggle));
        assert_eq!(browse(KeyCode::Enter), Action::Menu(MenuEvent::Toggle));
        assert_eq!(browse(KeyCode::Char('a')), Action::Menu(MenuEvent::ToggleAll));
        assert_eq!(browse(KeyCode::Char('c')), Action::Menu(MenuEvent::Commit));
        assert_eq!(browse(KeyCode::Char('C')), Action::Menu(MenuEvent::Commit));
    }

    #[test]
    fn test_ctrl_c_interrupts_not_commits() {
        assert_eq!(
            handle_key(ctrl('c'), AppMode::Browsing),
            Action::Menu(MenuEvent::Interrupt)
        );
        assert_eq!(
            handle_key(ctrl('c'), AppMode::Help),
            Action::Menu(MenuEvent::Interrupt)
        );
    }

    #[test]
    fn test_quit_keys() {
        assert_eq!(browse(KeyCode::Char('q')), Action::Menu(MenuEvent::Interrupt));
        assert_eq!(browse(KeyCode::Esc), Action::Menu(MenuEvent::Interrupt));
    }

    #[test]
    fn test_help_mode_swallows_menu_keys() {
        assert_eq!(browse(KeyCode::Char('?')), Action::ShowHelp);
        assert_eq!(
            handle_key(press(KeyCode::Char('c')), AppMode::Help),
            Action::Tick
        );
        assert_eq!(handle_key(press(KeyCode::Esc), AppMode::Help), Action::HideHelp);
        assert_eq!(
            handle_key(press(KeyCode::Char('?')), AppMode::Help),
            Action::HideHelp
        );
    }

    #[test]
    fn test_unbound_key_is_tick() {
        assert_eq!(browse(KeyCode::Char('x')), Action::Tick);
        assert_eq!(browse(KeyCode::Tab), Action::Tick);
    }
}
