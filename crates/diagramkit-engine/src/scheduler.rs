//! Frame scheduling
//!
//! A runtime-independent frame queue. The host drives it by calling
//! [`FrameScheduler::run_frame`] once per rendering frame; deferred tasks
//! run first, in scheduling order, followed by every-frame tasks.
//!
//! Tasks scheduled while a frame is running are queued for the following
//! frame, so a task can reschedule itself without re-entering the queue.

use std::cell::Cell;
use std::collections::VecDeque;
use std::fmt;
use std::rc::Rc;
use std::time::Duration;

use diagramkit_core::{shared, Shared};

/// A task that runs once at the next frame boundary.
pub type FrameTask = Box<dyn FnOnce(Duration)>;

/// A task that runs every frame until it reports [`TaskStatus::Done`] or is cancelled.
pub type RepeatingTask = Box<dyn FnMut(Duration) -> TaskStatus>;

/// Whether a repeating task wants to run again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskStatus {
    Continue,
    Done,
}

/// Cancels a repeating task. Cloned tokens share the same flag.
#[derive(Clone, Default)]
pub struct CancelToken(Rc<Cell<bool>>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.set(true);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.get()
    }
}

impl fmt::Debug for CancelToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CancelToken")
            .field("cancelled", &self.is_cancelled())
            .finish()
    }
}

/// Scheduling primitives used by the dispatcher and the animation engine.
pub trait Scheduler {
    /// Runs `task` once at the next frame boundary.
    fn schedule_next_frame(&self, task: FrameTask);

    /// Runs `task` on every frame until it finishes or the token is cancelled.
    fn schedule_every_frame(&self, task: RepeatingTask) -> CancelToken;
}

/// Counts of what ran during one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameReport {
    pub frame: u64,
    pub deferred_tasks: usize,
    pub repeating_tasks: usize,
}

#[derive(Default)]
struct SchedulerState {
    next_frame: VecDeque<FrameTask>,
    every_frame: Vec<(CancelToken, RepeatingTask)>,
    frame: u64,
}

/// Host-driven frame queue.
#[derive(Clone, Default)]
pub struct FrameScheduler {
    state: Shared<SchedulerState>,
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self {
            state: shared(SchedulerState::default()),
        }
    }

    /// Runs one frame at host timestamp `now`.
    pub fn run_frame(&self, now: Duration) -> FrameReport {
        let (deferred, repeating, frame) = {
            let mut state = self.state.borrow_mut();
            state.frame += 1;
            (
                std::mem::take(&mut state.next_frame),
                std::mem::take(&mut state.every_frame),
                state.frame,
            )
        };

        let deferred_tasks = deferred.len();
        for task in deferred {
            task(now);
        }

        let mut repeating_tasks = 0;
        let mut survivors = Vec::with_capacity(repeating.len());
        for (token, mut task) in repeating {
            if token.is_cancelled() {
                continue;
            }
            repeating_tasks += 1;
            let status = task(now);
            if status == TaskStatus::Continue && !token.is_cancelled() {
                survivors.push((token, task));
            }
        }

        {
            let mut state = self.state.borrow_mut();
            let added = std::mem::take(&mut state.every_frame);
            survivors.extend(added);
            state.every_frame = survivors;
        }

        tracing::trace!(
            "frame {}: {} deferred, {} repeating",
            frame,
            deferred_tasks,
            repeating_tasks
        );

        FrameReport {
            frame,
            deferred_tasks,
            repeating_tasks,
        }
    }

    /// Whether any task is waiting for a future frame.
    pub fn has_pending(&self) -> bool {
        let state = self.state.borrow();
        !state.next_frame.is_empty()
            || state.every_frame.iter().any(|(t, _)| !t.is_cancelled())
    }

    /// Number of frames run so far.
    pub fn frame_count(&self) -> u64 {
        self.state.borrow().frame
    }
}

impl Scheduler for FrameScheduler {
    fn schedule_next_frame(&self, task: FrameTask) {
        self.state.borrow_mut().next_frame.push_back(task);
    }

    fn schedule_every_frame(&self, task: RepeatingTask) -> CancelToken {
        let token = CancelToken::new();
        self.state
            .borrow_mut()
            .every_frame
            .push((token.clone(), task));
        token
    }
}
