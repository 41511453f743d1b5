//! Error kinds raised by world construction and placement.

use thiserror::Error;

use super::entity::EntityKind;

/// Configuration and placement failures.
///
/// Geometry misses, acting on a dead agent and health underflow are not
/// errors; they are ordinary simulation outcomes.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum WorldError {
    /// A parameter is outside its accepted range.
    #[error("invalid world params: {0}")]
    InvalidParams(String),
    /// More entities were requested than the plane can hold with a free cell
    /// to spare.
    #[error("cannot place {requested} entities on a plane of {capacity} cells")]
    Overcrowded {
        /// Agents plus resources requested.
        requested: usize,
        /// `width * height`.
        capacity: usize,
    },
    /// Externally supplied coordinates are off the plane.
    #[error("position ({x}, {y}) is outside the {width}x{height} plane")]
    InvalidPosition {
        /// Requested column.
        x: i32,
        /// Requested row.
        y: i32,
        /// Plane width.
        width: i32,
        /// Plane height.
        height: i32,
    },
    /// Explicit placement onto a cell that already holds an entity.
    #[error("cell ({x}, {y}) is already occupied")]
    Occupied {
        /// Column.
        x: i32,
        /// Row.
        y: i32,
    },
    /// An agent was requested with a resource kind.
    #[error("{0:?} cannot be placed as an agent")]
    NotAnAgent(EntityKind),
    /// A resource was requested with an agent kind.
    #[error("{0:?} cannot be placed as a resource")]
    NotAResource(EntityKind),
}
