//! Frame-synchronized animation engine.
//!
//! An [`Animation`] is a tween over model fields. The engine registers one
//! every-frame task per animation; the first frame fixes the start time and
//! each frame calls `tween(t)` with `t = clamp(elapsed / duration, 0, 1)`.
//! The task finishes after the frame where `t` reaches 1.
//!
//! At most one animation runs per target element. Starting another one on
//! the same target cancels the previous task before its next frame.

use std::collections::HashMap;
use std::rc::Rc;
use std::time::Duration;

use diagramkit_core::{shared, Shared};

use crate::model::{DiagramModel, ElementId};
use crate::scheduler::{CancelToken, Scheduler, TaskStatus};

/// A time-parameterized mutation of model fields.
pub trait Animation {
    /// Applies the state at progress `t` in `[0, 1]`.
    fn tween(&mut self, t: f64, model: &mut DiagramModel);
}

/// Elapsed fraction of `duration`, clamped to `[0, 1]`.
pub fn progress(elapsed: Duration, duration: Duration) -> f64 {
    if duration.is_zero() {
        return 1.0;
    }
    (elapsed.as_secs_f64() / duration.as_secs_f64()).clamp(0.0, 1.0)
}

/// Handle to an in-flight animation.
#[derive(Debug, Clone)]
pub struct AnimationHandle {
    pub target: ElementId,
    token: CancelToken,
}

impl AnimationHandle {
    /// False once the animation finished or was superseded.
    pub fn is_running(&self) -> bool {
        !self.token.is_cancelled()
    }
}

struct RunningAnimation {
    generation: u64,
    token: CancelToken,
}

#[derive(Default)]
struct Registry {
    running: HashMap<ElementId, RunningAnimation>,
    next_generation: u64,
}

/// Starts animations on the shared frame scheduler.
#[derive(Clone)]
pub struct AnimationEngine {
    scheduler: Rc<dyn Scheduler>,
    model: Shared<DiagramModel>,
    registry: Shared<Registry>,
    duration: Duration,
}

impl AnimationEngine {
    pub fn new(
        scheduler: Rc<dyn Scheduler>,
        model: Shared<DiagramModel>,
        duration: Duration,
    ) -> Self {
        Self {
            scheduler,
            model,
            registry: shared(Registry::default()),
            duration,
        }
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Starts `animation` on `target`, superseding any animation already running there.
    pub fn start(&self, target: ElementId, mut animation: Box<dyn Animation>) -> AnimationHandle {
        let generation = {
            let mut registry = self.registry.borrow_mut();
            if let Some(previous) = registry.running.remove(&target) {
                previous.token.cancel();
                tracing::debug!("Animation on '{}' superseded", target);
            }
            registry.next_generation += 1;
            registry.next_generation
        };

        let model = self.model.clone();
        let registry = self.registry.clone();
        let duration = self.duration;
        let task_target = target.clone();
        let mut started: Option<Duration> = None;

        let token = self.scheduler.schedule_every_frame(Box::new(move |now| {
            let start = *started.get_or_insert(now);
            let t = progress(now.saturating_sub(start), duration);
            animation.tween(t, &mut model.borrow_mut());
            if t < 1.0 {
                return TaskStatus::Continue;
            }
            let mut registry = registry.borrow_mut();
            let finished = registry
                .running
                .get(&task_target)
                .is_some_and(|r| r.generation == generation);
            if finished {
                if let Some(done) = registry.running.remove(&task_target) {
                    done.token.cancel();
                }
                tracing::trace!("Animation on '{}' finished", task_target);
            }
            TaskStatus::Done
        }));

        self.registry.borrow_mut().running.insert(
            target.clone(),
            RunningAnimation {
                generation,
                token: token.clone(),
            },
        );

        AnimationHandle { target, token }
    }

    /// Cancels the animation running on `target`, if any.
    pub fn cancel(&self, target: &str) -> bool {
        match self.registry.borrow_mut().running.remove(target) {
            Some(running) => {
                running.token.cancel();
                true
            }
            None => false,
        }
    }

    pub fn is_animating(&self, target: &str) -> bool {
        self.registry.borrow().running.contains_key(target)
    }

    pub fn running_count(&self) -> usize {
        self.registry.borrow().running.len()
    }
}
