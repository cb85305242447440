use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::{Position, Rect};

use crate::game::Screen;

/// What the player asked for, independent of how they asked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Start,
    Restart,
    Whack(usize),
    Quit,
    None,
}

pub fn action_for_key(key: KeyEvent, screen: Screen, slots: usize) -> Action {
    // some terminals also report releases
    if key.kind == KeyEventKind::Release {
        return Action::None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Action::Quit;
    }

    match (screen, key.code) {
        (_, KeyCode::Esc) | (_, KeyCode::Char('q')) => Action::Quit,
        (Screen::Welcome, KeyCode::Enter)
        | (Screen::Welcome, KeyCode::Char(' '))
        | (Screen::Welcome, KeyCode::Char('p')) => Action::Start,
        (Screen::Playing, KeyCode::Char('r')) | (Screen::Playing, KeyCode::Backspace) => {
            Action::Restart
        }
        (Screen::Playing, KeyCode::Char(c)) => match c.to_digit(10) {
            Some(d) if d >= 1 && (d as usize) <= slots => Action::Whack(d as usize - 1),
            _ => Action::None,
        },
        _ => Action::None,
    }
}

/// Map a left click to the slot under it. `slot_areas` must be the rects the
/// last frame drew the slots into.
pub fn action_for_mouse(mouse: MouseEvent, screen: Screen, slot_areas: &[Rect]) -> Action {
    if screen != Screen::Playing || mouse.kind != MouseEventKind::Down(MouseButton::Left) {
        return Action::None;
    }
    let pos = Position::new(mouse.column, mouse.row);
    slot_areas
        .iter()
        .position(|r| r.contains(pos))
        .map_or(Action::None, Action::Whack)
}
