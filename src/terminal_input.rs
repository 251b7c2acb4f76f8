use std::io;
use std::time::Duration;

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};

use crate::input::{KeyPress, RawEvent, SurfacePoint, Swipe};

/// Approximate size of one terminal cell in device-independent pixels.
pub const CELL_WIDTH_DIP: f32 = 8.0;
pub const CELL_HEIGHT_DIP: f32 = 16.0;

/// Turns crossterm events into surface-neutral [`RawEvent`]s.
///
/// A left-button mouse drag plays the role of a touch swipe: the press
/// records the start point and the release completes the gesture.
#[derive(Debug, Default)]
pub struct TerminalInput {
    drag_start: Option<SurfacePoint>,
}

impl TerminalInput {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Waits up to `timeout` for one event and translates it.
    pub fn poll(&mut self, timeout: Duration) -> io::Result<Option<RawEvent>> {
        if !event::poll(timeout)? {
            return Ok(None);
        }
        Ok(self.translate(event::read()?))
    }

    #[must_use]
    pub fn translate(&mut self, event: Event) -> Option<RawEvent> {
        match event {
            Event::Key(key) => key_press(key).map(RawEvent::Key),
            Event::Mouse(mouse) => self.mouse_gesture(mouse),
            _ => None,
        }
    }

    fn mouse_gesture(&mut self, mouse: MouseEvent) -> Option<RawEvent> {
        let point = cell_to_surface(mouse.column, mouse.row);
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                self.drag_start = Some(point);
                None
            }
            MouseEventKind::Up(MouseButton::Left) => {
                let start = self.drag_start.take()?;
                Some(RawEvent::Swipe(Swipe { start, end: point }))
            }
            _ => None,
        }
    }
}

fn key_press(key: KeyEvent) -> Option<KeyPress> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(KeyPress::Escape)
        }
        KeyCode::Up => Some(KeyPress::ArrowUp),
        KeyCode::Down => Some(KeyPress::ArrowDown),
        KeyCode::Left => Some(KeyPress::ArrowLeft),
        KeyCode::Right => Some(KeyPress::ArrowRight),
        KeyCode::Char(' ') => Some(KeyPress::Space),
        KeyCode::Esc => Some(KeyPress::Escape),
        KeyCode::Char(c) => Some(KeyPress::Char(c)),
        _ => None,
    }
}

fn cell_to_surface(column: u16, row: u16) -> SurfacePoint {
    SurfacePoint {
        x: f32::from(column) * CELL_WIDTH_DIP,
        y: f32::from(row) * CELL_HEIGHT_DIP,
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{
        Event, KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers, MouseButton,
        MouseEvent, MouseEventKind,
    };

    use crate::input::{route, Direction, KeyPress, RawEvent};

    use super::TerminalInput;

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    #[test]
    fn arrow_keys_become_key_presses() {
        let mut input = TerminalInput::new();

        assert_eq!(
            input.translate(key(KeyCode::Left)),
            Some(RawEvent::Key(KeyPress::ArrowLeft))
        );
        assert_eq!(
            input.translate(key(KeyCode::Char(' '))),
            Some(RawEvent::Key(KeyPress::Space))
        );
    }

    #[test]
    fn key_release_is_ignored() {
        let mut input = TerminalInput::new();
        let release = Event::Key(KeyEvent {
            code: KeyCode::Up,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        });

        assert_eq!(input.translate(release), None);
    }

    #[test]
    fn ctrl_c_quits() {
        let mut input = TerminalInput::new();
        let ctrl_c = Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));

        assert_eq!(
            input.translate(ctrl_c),
            Some(RawEvent::Key(KeyPress::Escape))
        );
    }

    #[test]
    fn mouse_drag_becomes_swipe() {
        let mut input = TerminalInput::new();

        assert_eq!(
            input.translate(mouse(MouseEventKind::Down(MouseButton::Left), 10, 5)),
            None
        );
        let swipe = input
            .translate(mouse(MouseEventKind::Up(MouseButton::Left), 16, 5))
            .expect("release completes the drag");

        // Six columns is 48 dip, past the swipe threshold.
        assert_eq!(route(swipe), Some(Direction::Right));
    }

    #[test]
    fn short_drag_routes_to_nothing() {
        let mut input = TerminalInput::new();
        input.translate(mouse(MouseEventKind::Down(MouseButton::Left), 10, 5));

        let swipe = input
            .translate(mouse(MouseEventKind::Up(MouseButton::Left), 10, 6))
            .expect("release completes the drag");

        assert_eq!(route(swipe), None);
    }

    #[test]
    fn release_without_press_is_ignored() {
        let mut input = TerminalInput::new();

        assert_eq!(
            input.translate(mouse(MouseEventKind::Up(MouseButton::Left), 3, 3)),
            None
        );
    }
}
