//! Animated array and matrix visualizations.
//!
//! A [`Scene`] holds a tree of boxes and texts. [`Array`] and [`Matrix`]
//! build their entries into it and expose operations (highlight, swap, push,
//! pop) as [`Thread`]s, which a [`Player`] ticks frame by frame.

pub mod animation;
pub mod array;
pub mod buffer;
mod caption;
pub mod config;
pub mod entry;
pub mod error;
mod inflight;
pub mod layout;
pub mod matrix;
pub mod render;
pub mod scene;
mod scratch;
pub mod terminal;
pub mod text;
pub mod transitions;
pub mod types;

pub use animation::{Player, Task, TaskState, Thread, Tick};
pub use array::{Array, ArrayProps, SwapHighlightProps};
pub use buffer::Buffer;
pub use caption::Caption;
pub use config::{Metrics, PlayerConfig, StageConfig, Timing};
pub use entry::{Entry, EntryProps, HighlightProps};
pub use error::{Error, Result};
pub use layout::Rect;
pub use matrix::{Coord, Matrix, MatrixProps};
pub use render::Viewport;
pub use scene::{Node, NodeId, Scene};
pub use terminal::Terminal;
pub use transitions::{Easing, Lerp};
pub use types::*;
