//! Input routing.
//!
//! Keyboard, swipe, and on-screen button events are normalized here into a
//! single [`Direction`] request or a [`LifecycleAction`]. Routing is
//! stateless and never consults game state; the reversal guard is applied
//! by the engine so every source behaves the same.

use serde::Serialize;

/// Minimum swipe displacement, in device-independent pixels, on the
/// dominant axis before a gesture counts as a direction.
pub const SWIPE_THRESHOLD_DIP: f32 = 30.0;

/// Canonical movement directions.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Returns the opposite direction.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Unit step as `(dx, dy)`; y grows downward.
    #[must_use]
    pub fn delta(self) -> (i32, i32) {
        match self {
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }
}

/// Returns whether a direction change is legal (no immediate 180° turns).
#[must_use]
pub fn direction_change_is_valid(current: Direction, next: Direction) -> bool {
    next != current.opposite()
}

/// Front-end independent key identity.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum KeyPress {
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Space,
    Escape,
    Char(char),
}

/// A point on the input surface in device-independent pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfacePoint {
    pub x: f32,
    pub y: f32,
}

/// A completed swipe gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Swipe {
    pub start: SurfacePoint,
    pub end: SurfacePoint,
}

/// On-screen directional control.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum DirectionButton {
    Up,
    Down,
    Left,
    Right,
}

/// Raw device event as delivered by a render/input surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RawEvent {
    Key(KeyPress),
    Swipe(Swipe),
    Button(DirectionButton),
}

/// Non-directional actions a key can trigger.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum LifecycleAction {
    ToggleRunning,
    Restart,
    Quit,
    /// Step to the next difficulty; starts a new game.
    CycleDifficulty,
    /// Step to the next grid preset; starts a new game.
    CycleGridSize,
    /// Step to the next snake colour; the game carries on.
    CycleSnakeColor,
}

/// High-level input consumed by a session.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameInput {
    Direction(Direction),
    Lifecycle(LifecycleAction),
}

/// Maps a raw event to a direction request, if it carries one.
#[must_use]
pub fn route(event: RawEvent) -> Option<Direction> {
    match event {
        RawEvent::Key(key) => key_direction(key),
        RawEvent::Swipe(swipe) => swipe_direction(swipe),
        RawEvent::Button(button) => Some(button_direction(button)),
    }
}

/// Maps a raw event to a lifecycle action. Only keys carry these.
#[must_use]
pub fn lifecycle_action(event: RawEvent) -> Option<LifecycleAction> {
    let RawEvent::Key(key) = event else {
        return None;
    };

    match key {
        KeyPress::Space => Some(LifecycleAction::ToggleRunning),
        KeyPress::Char('r' | 'R') => Some(LifecycleAction::Restart),
        KeyPress::Char('q' | 'Q') | KeyPress::Escape => Some(LifecycleAction::Quit),
        KeyPress::Char('d' | 'D') => Some(LifecycleAction::CycleDifficulty),
        KeyPress::Char('g' | 'G') => Some(LifecycleAction::CycleGridSize),
        KeyPress::Char('c' | 'C') => Some(LifecycleAction::CycleSnakeColor),
        _ => None,
    }
}

/// Routes a raw event to whichever game input it represents.
#[must_use]
pub fn translate(event: RawEvent) -> Option<GameInput> {
    route(event)
        .map(GameInput::Direction)
        .or_else(|| lifecycle_action(event).map(GameInput::Lifecycle))
}

fn key_direction(key: KeyPress) -> Option<Direction> {
    match key {
        KeyPress::ArrowUp => Some(Direction::Up),
        KeyPress::ArrowDown => Some(Direction::Down),
        KeyPress::ArrowLeft => Some(Direction::Left),
        KeyPress::ArrowRight => Some(Direction::Right),
        _ => None,
    }
}

fn button_direction(button: DirectionButton) -> Direction {
    match button {
        DirectionButton::Up => Direction::Up,
        DirectionButton::Down => Direction::Down,
        DirectionButton::Left => Direction::Left,
        DirectionButton::Right => Direction::Right,
    }
}

fn swipe_direction(swipe: Swipe) -> Option<Direction> {
    let dx = swipe.end.x - swipe.start.x;
    let dy = swipe.end.y - swipe.start.y;

    if dx.abs() > dy.abs() {
        if dx > SWIPE_THRESHOLD_DIP {
            Some(Direction::Right)
        } else if dx < -SWIPE_THRESHOLD_DIP {
            Some(Direction::Left)
        } else {
            None
        }
    } else if dy > SWIPE_THRESHOLD_DIP {
        Some(Direction::Down)
    } else if dy < -SWIPE_THRESHOLD_DIP {
        Some(Direction::Up)
    } else {
        None
    }
}
