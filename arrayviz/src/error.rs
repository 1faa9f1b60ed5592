//! Error types for scene and container operations.

use thiserror::Error;

use crate::scene::NodeId;

/// Everything that can go wrong while building or animating a scene.
///
/// Contract violations are raised before any state is touched, so the
/// container that rejected the call is left exactly as it was.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// A linear index outside the container.
    #[error("index {index} out of bounds for length {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    /// A 2-D coordinate outside the matrix shape.
    #[error("coordinate ({row}, {col}) out of bounds for {rows}x{cols} matrix")]
    CoordOutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    /// More entries requested for removal than the container holds.
    #[error("cannot pop {requested} entries from a container of length {len}")]
    PopUnderflow { requested: usize, len: usize },

    /// Both operands of a swap address the same slot.
    #[error("cannot swap a slot with itself")]
    SelfSwap,

    /// A structural operation started while another one is still running.
    #[error("{container} is busy with another structural operation")]
    Busy { container: &'static str },

    /// A structural operation whose container was reset before it committed.
    #[error("{container} was reset while this operation was in flight")]
    Abandoned { container: &'static str },

    /// Matrix rows of differing length.
    #[error("matrix row {row} has {len} columns, expected {expected}")]
    RaggedMatrix {
        row: usize,
        len: usize,
        expected: usize,
    },

    /// A matrix with no rows or no columns.
    #[error("matrix must have at least one row and one column")]
    EmptyMatrix,

    /// A color string the CSS parser rejected.
    #[error("invalid color {input:?}: {reason}")]
    InvalidColor { input: String, reason: String },

    /// A stale or never-issued node handle.
    #[error("node {0} does not exist")]
    UnknownNode(NodeId),

    /// Reparenting that would make a node its own ancestor.
    #[error("cannot move {node} under its own descendant {parent}")]
    Cycle { node: NodeId, parent: NodeId },

    /// A handle that points at a live node of the wrong kind.
    #[error("node {node} is not a {expected}")]
    NotAContainer {
        node: NodeId,
        expected: &'static str,
    },

    /// `values` and `pool` disagree outside of a commit step.
    #[error("{container} invariant violated: {detail}")]
    Invariant {
        container: &'static str,
        detail: String,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
