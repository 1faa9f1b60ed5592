use std::time::Duration;

use log::{debug, trace};

use super::{Task, Tick};
use crate::config::PlayerConfig;
use crate::error::Result;
use crate::layout::layout;
use crate::scene::Scene;

/// Drives a task at a fixed frame rate.
///
/// The first frame ticks with a zero budget so every task applies its start
/// state; each later frame advances the clock by one frame interval. After
/// every frame the scene is laid out.
#[derive(Debug, Default)]
pub struct Player {
    config: PlayerConfig,
    frame: u64,
    elapsed: Duration,
}

impl Player {
    pub fn new(config: PlayerConfig) -> Self {
        Self {
            config,
            frame: 0,
            elapsed: Duration::ZERO,
        }
    }

    pub fn config(&self) -> &PlayerConfig {
        &self.config
    }

    /// Frames played so far.
    pub fn frames(&self) -> u64 {
        self.frame
    }

    /// Scene time played so far.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    fn budget(&self) -> Duration {
        if self.config.reduced_motion {
            Duration::MAX
        } else if self.frame == 0 {
            Duration::ZERO
        } else {
            self.config.frame_interval()
        }
    }

    /// Play one frame. Returns true once the task has completed.
    pub fn step(&mut self, scene: &mut Scene, task: &mut dyn Task) -> Result<bool> {
        let budget = self.budget();
        let tick = task.tick(scene, budget)?;
        layout(scene)?;

        let used = match tick {
            Tick::Yield => budget,
            Tick::Done(rest) => budget.saturating_sub(rest),
        };
        self.elapsed = self.elapsed.saturating_add(used);
        self.frame += 1;
        trace!("frame {} at {:?}: {:?}", self.frame, self.elapsed, tick);
        Ok(tick.is_done())
    }

    /// Play `task` to completion.
    pub fn run(&mut self, scene: &mut Scene, task: &mut dyn Task) -> Result<()> {
        self.run_with(scene, task, |_, _| Ok(()))
    }

    /// Play `task` to completion, calling `on_frame` after every frame.
    pub fn run_with<F>(
        &mut self,
        scene: &mut Scene,
        task: &mut dyn Task,
        mut on_frame: F,
    ) -> Result<()>
    where
        F: FnMut(&Scene, u64) -> Result<()>,
    {
        let start = self.frame;
        loop {
            let done = self.step(scene, task)?;
            on_frame(scene, self.frame)?;
            if done {
                break;
            }
        }
        debug!(
            "played {} frames, scene time {:?}",
            self.frame - start,
            self.elapsed
        );
        Ok(())
    }
}
