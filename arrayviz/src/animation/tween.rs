use std::time::Duration;

use super::{Task, TaskState, Thread, Tick};
use crate::error::Result;
use crate::scene::Scene;

/// Calls `on_frame` with linear progress in `0.0..=1.0` until `duration`
/// has elapsed.
///
/// Progress 0 is applied when the tween starts and progress 1 exactly once,
/// on the tick that reaches the end.
pub struct Tween<F> {
    duration: Duration,
    elapsed: Duration,
    on_frame: F,
    state: TaskState,
}

impl<F> Tween<F>
where
    F: FnMut(&mut Scene, f32) -> Result<()>,
{
    pub fn new(duration: Duration, on_frame: F) -> Self {
        Self {
            duration,
            elapsed: Duration::ZERO,
            on_frame,
            state: TaskState::Pending,
        }
    }
}

impl<F> Task for Tween<F>
where
    F: FnMut(&mut Scene, f32) -> Result<()>,
{
    fn tick(&mut self, scene: &mut Scene, budget: Duration) -> Result<Tick> {
        match self.state {
            TaskState::Completed => return Ok(Tick::Done(budget)),
            TaskState::Pending => {
                self.state = TaskState::Running;
                (self.on_frame)(scene, 0.0)?;
            }
            TaskState::Running => {}
        }

        self.elapsed = self.elapsed.saturating_add(budget);
        if self.elapsed >= self.duration {
            (self.on_frame)(scene, 1.0)?;
            self.state = TaskState::Completed;
            return Ok(Tick::Done(self.elapsed - self.duration));
        }

        let progress = self.elapsed.as_secs_f64() / self.duration.as_secs_f64();
        (self.on_frame)(scene, progress as f32)?;
        Ok(Tick::Yield)
    }

    fn state(&self) -> TaskState {
        self.state
    }
}

pub fn tween<F>(duration: Duration, on_frame: F) -> Thread
where
    F: FnMut(&mut Scene, f32) -> Result<()> + 'static,
{
    Box::new(Tween::new(duration, on_frame))
}
