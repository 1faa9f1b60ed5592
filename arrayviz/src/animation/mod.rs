//! Cooperative, frame-driven tasks.
//!
//! Every operation in this crate returns a [`Thread`]: a state machine that
//! does nothing until it is ticked. Each tick hands it a time budget; a task
//! either consumes the whole budget and yields, or completes and reports what
//! is left so the next task in a chain starts at the exact end time.

mod flow;
mod player;
mod property;
mod tween;

use std::time::Duration;

pub use flow::{all, call, chain, defer, noop, wait_for};
pub use player::Player;
pub use property::{animate, Property};
pub use tween::{tween, Tween};

use crate::error::Result;
use crate::scene::Scene;

/// Outcome of a single tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// The budget was consumed; tick again next frame.
    Yield,
    /// Finished, with the unused part of the budget.
    Done(Duration),
}

impl Tick {
    pub fn is_done(self) -> bool {
        matches!(self, Tick::Done(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TaskState {
    #[default]
    Pending,
    Running,
    Completed,
}

/// A resumable unit of animation work.
pub trait Task {
    /// Advance by `budget`. Ticking a completed task returns the whole
    /// budget as leftover.
    fn tick(&mut self, scene: &mut Scene, budget: Duration) -> Result<Tick>;

    fn state(&self) -> TaskState;
}

/// An owned, type-erased task.
pub type Thread = Box<dyn Task>;
