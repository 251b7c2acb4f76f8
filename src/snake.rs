use std::collections::{HashSet, VecDeque};

use serde::Serialize;

use crate::config::GridSize;
use crate::input::Direction;

/// Grid cell in logical coordinates.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns true when the position lies inside the grid.
    #[must_use]
    pub fn is_within_bounds(self, grid: GridSize) -> bool {
        self.x >= 0
            && self.y >= 0
            && self.x < i32::from(grid.cols())
            && self.y < i32::from(grid.rows())
    }

    /// Returns this position wrapped onto the grid on both axes.
    #[must_use]
    pub fn wrapped(self, grid: GridSize) -> Self {
        Self {
            x: self.x.rem_euclid(i32::from(grid.cols())),
            y: self.y.rem_euclid(i32::from(grid.rows())),
        }
    }

    /// Returns the neighbouring cell one step in `direction`, wrapping at edges.
    #[must_use]
    pub fn step(self, direction: Direction, grid: GridSize) -> Self {
        let (dx, dy) = direction.delta();
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
        .wrapped(grid)
    }
}

/// Snake body, head first. Never empty.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Snake {
    body: VecDeque<Position>,
}

impl Snake {
    /// Creates a one-cell snake at `start`.
    #[must_use]
    pub fn new(start: Position) -> Self {
        Self {
            body: VecDeque::from([start]),
        }
    }

    /// Creates a snake from explicit body segments (front is head).
    ///
    /// Returns `None` for an empty list or one that visits a cell twice.
    #[must_use]
    pub fn from_segments(segments: Vec<Position>) -> Option<Self> {
        let mut seen = HashSet::with_capacity(segments.len());
        if segments.is_empty() || !segments.iter().all(|cell| seen.insert(*cell)) {
            return None;
        }
        Some(Self {
            body: VecDeque::from(segments),
        })
    }

    /// Returns the current head position.
    #[must_use]
    pub fn head(&self) -> Position {
        *self
            .body
            .front()
            .expect("snake body must always contain at least one segment")
    }

    /// Returns true if any segment, tail included, occupies `position`.
    #[must_use]
    pub fn occupies(&self, position: Position) -> bool {
        self.body.contains(&position)
    }

    pub(crate) fn push_head(&mut self, position: Position) {
        self.body.push_front(position);
    }

    pub(crate) fn pop_tail(&mut self) {
        if self.body.len() > 1 {
            let _ = self.body.pop_back();
        }
    }

    /// Returns current segment count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Always false; present for API symmetry with `len`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Iterates over body segments from head to tail.
    pub fn segments(&self) -> impl Iterator<Item = &Position> {
        self.body.iter()
    }
}
