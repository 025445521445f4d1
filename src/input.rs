//! Terminal input mapping.
//!
//! Translates crossterm events into control input for the bird or lifecycle
//! commands for the session. Key releases only arrive on terminals where the
//! keyboard enhancement protocol is enabled; everywhere else the discrete
//! control's hold window stands in for them.

use crate::core::session::Command;
use crate::simulation::{ControlInput, ControlMode, Direction};
use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind,
};
use ratatui::layout::Rect;

/// Result of mapping one terminal event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputAction {
    Control(ControlInput),
    Command(Command),
    Quit,
    None,
}

/// Map an event. `play_area` is where the field was last drawn, needed to
/// turn mouse rows into field coordinates.
pub fn map_event(
    event: &Event,
    mode: ControlMode,
    play_area: Option<Rect>,
    field_height: f64,
) -> InputAction {
    match event {
        Event::Key(key) => map_key(key, mode),
        Event::Mouse(mouse) if mode == ControlMode::Pursuit => match play_area {
            Some(area) => map_mouse(mouse, area, field_height),
            None => InputAction::None,
        },
        _ => InputAction::None,
    }
}

fn map_key(key: &KeyEvent, mode: ControlMode) -> InputAction {
    if let Some(dir) = steering_direction(key.code) {
        if mode != ControlMode::Discrete {
            return InputAction::None;
        }
        return match key.kind {
            KeyEventKind::Press | KeyEventKind::Repeat => {
                InputAction::Control(ControlInput::Press(dir))
            }
            KeyEventKind::Release => InputAction::Control(ControlInput::Release(dir)),
        };
    }

    // Lifecycle keys act on press only.
    if key.kind != KeyEventKind::Press {
        return InputAction::None;
    }
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => InputAction::Quit,
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => InputAction::Quit,
        KeyCode::Char(' ') | KeyCode::Enter => InputAction::Command(Command::Start),
        KeyCode::Char('r') | KeyCode::Char('R') => InputAction::Command(Command::Reset),
        KeyCode::Char('p') | KeyCode::Char('P') => InputAction::Command(Command::TogglePause),
        _ => InputAction::None,
    }
}

fn steering_direction(code: KeyCode) -> Option<Direction> {
    match code {
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('k') => Some(Direction::Up),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('j') => Some(Direction::Down),
        _ => None,
    }
}

fn map_mouse(mouse: &MouseEvent, area: Rect, field_height: f64) -> InputAction {
    match mouse.kind {
        MouseEventKind::Moved | MouseEventKind::Drag(_) => {
            match pointer_to_field_y(area, mouse.row, field_height) {
                Some(y) => InputAction::Control(ControlInput::PointerY(y)),
                None => InputAction::None,
            }
        }
        _ => InputAction::None,
    }
}

/// Field y at the middle of terminal row `row` inside `area`. Rows outside
/// the area map beyond the field edges; the control clamps them.
pub fn pointer_to_field_y(area: Rect, row: u16, field_height: f64) -> Option<f64> {
    if area.height == 0 {
        return None;
    }
    let rel = f64::from(row) - f64::from(area.y) + 0.5;
    Some(rel * field_height / f64::from(area.height))
}
