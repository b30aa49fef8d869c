use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::layout::Rect;

use crate::canvas::viewport::Point;

/// Screen pixels covered by one terminal cell.
pub const CELL_WIDTH: f64 = 8.0;
pub const CELL_HEIGHT: f64 = 16.0;

/// Keyboard pan step, in screen pixels.
pub const PAN_STEP: f64 = 40.0;

const DOUBLE_CLICK: Duration = Duration::from_millis(400);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Pan(Direction),
    ZoomIn,
    ZoomOut,
    Quit,
    ToggleHelp,
    OpenSettings,
    NewCategory,
    NewFlow,
    NewTask,
    ToggleLinkMode,
    DeleteTask,
    AdvanceState,
    NextTask,
    NextCategory,
    NextFlow,
    ToggleCategoryVisibility,
    ClearFilter,
    SubmitText,
    Cancel,
    Backspace,
    CursorLeft,
    CursorRight,
    InputChar(char),
    Noop,
}

pub fn action_for_key(key: KeyEvent, text_mode: bool) -> Action {
    if text_mode {
        return match key.code {
            KeyCode::Enter => Action::SubmitText,
            KeyCode::Esc => Action::Cancel,
            KeyCode::Backspace => Action::Backspace,
            KeyCode::Left => Action::CursorLeft,
            KeyCode::Right => Action::CursorRight,
            KeyCode::Char(c) => Action::InputChar(c),
            _ => Action::Noop,
        };
    }

    match key.code {
        KeyCode::Up => Action::Pan(Direction::Up),
        KeyCode::Down => Action::Pan(Direction::Down),
        KeyCode::Left => Action::Pan(Direction::Left),
        KeyCode::Right => Action::Pan(Direction::Right),
        KeyCode::Enter | KeyCode::Char(' ') => Action::AdvanceState,
        KeyCode::Tab => Action::NextTask,
        KeyCode::BackTab => Action::NextCategory,
        KeyCode::Esc => Action::Cancel,
        KeyCode::Delete => Action::DeleteTask,
        KeyCode::Char('+') => Action::ZoomIn,
        KeyCode::Char('=') if key.modifiers.contains(KeyModifiers::SHIFT) => Action::ZoomIn,
        KeyCode::Char('-') => Action::ZoomOut,
        KeyCode::Char('?') => Action::ToggleHelp,
        KeyCode::Char('q') => Action::Quit,
        KeyCode::Char('h') => Action::Pan(Direction::Left),
        KeyCode::Char('j') => Action::Pan(Direction::Down),
        KeyCode::Char('k') => Action::Pan(Direction::Up),
        KeyCode::Char('l') => Action::ToggleLinkMode,
        KeyCode::Char('c') => Action::NewCategory,
        KeyCode::Char('f') => Action::NewFlow,
        KeyCode::Char('n') => Action::NewTask,
        KeyCode::Char('x') => Action::DeleteTask,
        KeyCode::Char('g') => Action::NextCategory,
        KeyCode::Char('w') => Action::NextFlow,
        KeyCode::Char('v') => Action::ToggleCategoryVisibility,
        KeyCode::Char('a') => Action::ClearFilter,
        KeyCode::Char('s') => Action::OpenSettings,
        _ => Action::Noop,
    }
}

/// Screen-pixel position of a terminal cell, relative to `area`.
///
/// Cells outside `area` still map (to negative or oversized coordinates) so
/// that a drag can continue past the canvas edge.
pub fn cell_to_screen(column: u16, row: u16, area: Rect) -> Point {
    Point::new(
        (f64::from(column) - f64::from(area.x)) * CELL_WIDTH + CELL_WIDTH / 2.0,
        (f64::from(row) - f64::from(area.y)) * CELL_HEIGHT + CELL_HEIGHT / 2.0,
    )
}

pub fn contains(area: Rect, column: u16, row: u16) -> bool {
    column >= area.x && column < area.right() && row >= area.y && row < area.bottom()
}

/// Turns two presses on the same task in quick succession into a double click.
///
/// The terminal only reports presses and releases.
#[derive(Debug, Default)]
pub struct ClickTracker {
    last: Option<(String, Instant)>,
}

impl ClickTracker {
    /// Record a press on `hit` at `now`; true when it completes a double click.
    pub fn press(&mut self, hit: Option<&str>, now: Instant) -> bool {
        let Some(id) = hit else {
            self.last = None;
            return false;
        };
        let double = self
            .last
            .as_ref()
            .is_some_and(|(prev, at)| prev == id && now.duration_since(*at) <= DOUBLE_CLICK);
        self.last = if double {
            None
        } else {
            Some((id.to_string(), now))
        };
        double
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn text_mode_captures_letters() {
        assert_eq!(
            action_for_key(key(KeyCode::Char('q')), true),
            Action::InputChar('q')
        );
        assert_eq!(action_for_key(key(KeyCode::Char('q')), false), Action::Quit);
    }

    #[test]
    fn link_and_pan_keys() {
        assert_eq!(
            action_for_key(key(KeyCode::Char('l')), false),
            Action::ToggleLinkMode
        );
        assert_eq!(
            action_for_key(key(KeyCode::Char('h')), false),
            Action::Pan(Direction::Left)
        );
    }

    #[test]
    fn cells_map_to_cell_centres() {
        let area = Rect::new(10, 5, 40, 20);
        assert_eq!(cell_to_screen(10, 5, area), Point::new(4.0, 8.0));
        assert_eq!(cell_to_screen(12, 6, area), Point::new(20.0, 24.0));
        assert_eq!(cell_to_screen(0, 0, area), Point::new(-76.0, -72.0));
        assert!(contains(area, 10, 5));
        assert!(!contains(area, 50, 5));
    }

    #[test]
    fn double_click_needs_same_task_within_window() {
        let mut tracker = ClickTracker::default();
        let t0 = Instant::now();
        assert!(!tracker.press(Some("a"), t0));
        assert!(tracker.press(Some("a"), t0 + Duration::from_millis(200)));
        // a third press starts over
        assert!(!tracker.press(Some("a"), t0 + Duration::from_millis(300)));

        assert!(!tracker.press(Some("b"), t0 + Duration::from_millis(350)));
        assert!(!tracker.press(Some("a"), t0 + Duration::from_millis(400)));
        assert!(!tracker.press(Some("a"), t0 + Duration::from_millis(1000)));
        assert!(!tracker.press(None, t0 + Duration::from_millis(1100)));
    }
}
