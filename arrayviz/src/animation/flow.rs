use std::collections::VecDeque;
use std::time::Duration;

use super::{tween, Task, TaskState, Thread, Tick};
use crate::error::Result;
use crate::scene::Scene;

/// Runs every task concurrently; completes when the slowest does.
struct All {
    tasks: Vec<Thread>,
    leftovers: Vec<Option<Duration>>,
    state: TaskState,
}

impl Task for All {
    fn tick(&mut self, scene: &mut Scene, budget: Duration) -> Result<Tick> {
        if self.state == TaskState::Completed {
            return Ok(Tick::Done(budget));
        }
        self.state = TaskState::Running;

        for (task, leftover) in self.tasks.iter_mut().zip(self.leftovers.iter_mut()) {
            if leftover.is_some() {
                continue;
            }
            if let Tick::Done(rest) = task.tick(scene, budget)? {
                *leftover = Some(rest);
            }
        }

        if self.leftovers.iter().any(Option::is_none) {
            return Ok(Tick::Yield);
        }
        self.state = TaskState::Completed;
        let rest = self.leftovers.iter().flatten().min().copied();
        Ok(Tick::Done(rest.unwrap_or(budget)))
    }

    fn state(&self) -> TaskState {
        self.state
    }
}

/// Join: run `tasks` in parallel.
pub fn all(tasks: Vec<Thread>) -> Thread {
    let leftovers = vec![None; tasks.len()];
    Box::new(All {
        tasks,
        leftovers,
        state: TaskState::Pending,
    })
}

/// Runs tasks one after the other, handing each the previous one's leftover.
struct Chain {
    tasks: VecDeque<Thread>,
    state: TaskState,
}

impl Task for Chain {
    fn tick(&mut self, scene: &mut Scene, mut budget: Duration) -> Result<Tick> {
        if self.state == TaskState::Completed {
            return Ok(Tick::Done(budget));
        }
        self.state = TaskState::Running;

        while let Some(task) = self.tasks.front_mut() {
            match task.tick(scene, budget)? {
                Tick::Yield => return Ok(Tick::Yield),
                Tick::Done(rest) => {
                    budget = rest;
                    self.tasks.pop_front();
                }
            }
        }

        self.state = TaskState::Completed;
        Ok(Tick::Done(budget))
    }

    fn state(&self) -> TaskState {
        self.state
    }
}

/// Sequence: run `tasks` in order.
pub fn chain(tasks: Vec<Thread>) -> Thread {
    Box::new(Chain {
        tasks: tasks.into(),
        state: TaskState::Pending,
    })
}

/// Builds its task from the scene on the first tick.
struct Defer<F> {
    init: Option<F>,
    task: Option<Thread>,
}

impl<F> Task for Defer<F>
where
    F: FnOnce(&mut Scene) -> Result<Thread>,
{
    fn tick(&mut self, scene: &mut Scene, budget: Duration) -> Result<Tick> {
        if let Some(init) = self.init.take() {
            self.task = Some(init(scene)?);
        }
        match &mut self.task {
            Some(task) => task.tick(scene, budget),
            None => Ok(Tick::Done(budget)),
        }
    }

    fn state(&self) -> TaskState {
        match &self.task {
            Some(task) => task.state(),
            None if self.init.is_some() => TaskState::Pending,
            None => TaskState::Completed,
        }
    }
}

/// Defer building a task until it starts, so it reads the scene as it is
/// at that moment rather than when the task was created.
pub fn defer<F>(init: F) -> Thread
where
    F: FnOnce(&mut Scene) -> Result<Thread> + 'static,
{
    Box::new(Defer {
        init: Some(init),
        task: None,
    })
}

/// Run `f` once, taking no time.
pub fn call<F>(f: F) -> Thread
where
    F: FnOnce(&mut Scene) -> Result<()> + 'static,
{
    defer(move |scene| {
        f(scene)?;
        Ok(noop())
    })
}

/// Do nothing for `duration`.
pub fn wait_for(duration: Duration) -> Thread {
    tween(duration, |_, _| Ok(()))
}

/// A task that completes immediately.
pub fn noop() -> Thread {
    wait_for(Duration::ZERO)
}
