//! Integer cell positions on a bounded toroidal plane.
//!
//! Cells are 1-indexed: valid coordinates are `1..=width` and `1..=height`.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::error::WorldError;

/// A cell on the plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    /// Column, `1..=width`.
    pub x: i32,
    /// Row, `1..=height`.
    pub y: i32,
}

impl Position {
    /// Creates a position without any range check.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A cell offset applied by grid movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Delta {
    /// Horizontal offset.
    pub dx: i32,
    /// Vertical offset.
    pub dy: i32,
}

impl Delta {
    /// Creates a new offset.
    pub const fn new(dx: i32, dy: i32) -> Self {
        Self { dx, dy }
    }
}

/// Grid movement directions, indexed the way policies emit them.
///
/// The y axis grows towards north.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    /// `-x`, action 0.
    West,
    /// `-y`, action 1.
    South,
    /// `+x`, action 2.
    East,
    /// `+y`, action 3.
    North,
}

impl Direction {
    /// All directions in action order.
    pub const ALL: [Direction; 4] = [
        Direction::West,
        Direction::South,
        Direction::East,
        Direction::North,
    ];

    /// Maps a policy action index onto a direction. Indices wrap modulo 4.
    pub fn from_action(action: usize) -> Self {
        Self::ALL[action % Self::ALL.len()]
    }

    /// The one-cell offset for this direction.
    pub fn delta(self) -> Delta {
        match self {
            Direction::West => Delta::new(-1, 0),
            Direction::South => Delta::new(0, -1),
            Direction::East => Delta::new(1, 0),
            Direction::North => Delta::new(0, 1),
        }
    }
}

/// Dimensions of the plane and the wrap rule that goes with them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bounds {
    /// Number of columns.
    pub width: i32,
    /// Number of rows.
    pub height: i32,
}

impl Bounds {
    /// Creates bounds for a `width` × `height` plane.
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Number of cells on the plane.
    pub fn capacity(&self) -> usize {
        self.width.max(0) as usize * self.height.max(0) as usize
    }

    /// Whether `pos` lies on the plane.
    pub fn contains(&self, pos: Position) -> bool {
        (1..=self.width).contains(&pos.x) && (1..=self.height).contains(&pos.y)
    }

    /// Rejects externally supplied coordinates that are off the plane.
    ///
    /// Raw coordinates are never wrapped; only computed destinations are.
    pub fn check(&self, pos: Position) -> Result<Position, WorldError> {
        if self.contains(pos) {
            Ok(pos)
        } else {
            Err(WorldError::InvalidPosition {
                x: pos.x,
                y: pos.y,
                width: self.width,
                height: self.height,
            })
        }
    }

    /// Applies the toroidal rule independently on each axis.
    ///
    /// Anything past the upper bound lands on 1, anything below 1 lands on the
    /// upper bound. The remap is a single jump, not a modulo, so every input
    /// maps into range regardless of how far it overshoots.
    pub fn wrap(&self, pos: Position) -> Position {
        Position {
            x: wrap_axis(pos.x, self.width),
            y: wrap_axis(pos.y, self.height),
        }
    }

    /// Destination of a grid step from `base`.
    pub fn wrap_delta(&self, base: Position, delta: Delta) -> Position {
        self.wrap(Position {
            x: base.x.saturating_add(delta.dx),
            y: base.y.saturating_add(delta.dy),
        })
    }

    /// Destination of a steering step: `speed` cells along `orientation`,
    /// each component rounded to the nearest cell before wrapping.
    pub fn wrap_heading(&self, base: Position, orientation: f32, speed: f32) -> Position {
        let dx = (speed * orientation.cos()).round() as i32;
        let dy = (speed * orientation.sin()).round() as i32;
        self.wrap_delta(base, Delta::new(dx, dy))
    }
}

fn wrap_axis(value: i32, upper: i32) -> i32 {
    if value > upper {
        1
    } else if value < 1 {
        upper
    } else {
        value
    }
}
