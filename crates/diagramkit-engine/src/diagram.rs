//! Diagram: wires model, scheduler, animations, dispatcher and reconciliation.
//!
//! A host owns one `Diagram` per rendered diagram. Per frame it typically
//! calls, in order:
//!
//! 1. [`Diagram::run_frame`] to run deferred actions and animation steps,
//! 2. its own view rendering, calling [`Diagram::decorate`] per element,
//! 3. [`Diagram::post_update`] with a measurer for the painted view.

use std::cell::Ref;
use std::rc::Rc;
use std::time::Duration;

use diagramkit_core::{shared, Shared};

use crate::action::{Action, ResizeAction};
use crate::animation::AnimationEngine;
use crate::bounds::{BoundsGrabber, BoundsMeasurer};
use crate::command::CommandExecutionContext;
use crate::command_stack::CommandStack;
use crate::config::EngineConfig;
use crate::dispatcher::{ActionDispatcher, ActionHandler, ActionHandlerRegistry};
use crate::model::{DiagramModel, Element};
use crate::mouse::{MouseEvent, ScrollMouseListener, WheelEvent, ZoomMouseListener};
use crate::scheduler::{FrameReport, FrameScheduler, Scheduler};

pub struct Diagram {
    config: EngineConfig,
    model: Shared<DiagramModel>,
    scheduler: FrameScheduler,
    animations: AnimationEngine,
    dispatcher: ActionDispatcher,
    grabber: BoundsGrabber,
    zoom: ZoomMouseListener,
    scroll: ScrollMouseListener,
}

impl Diagram {
    pub fn new(model: DiagramModel, config: EngineConfig) -> Self {
        let model = shared(model);
        let scheduler = FrameScheduler::new();
        let scheduler_handle: Rc<dyn Scheduler> = Rc::new(scheduler.clone());
        let animations = AnimationEngine::new(
            scheduler_handle.clone(),
            model.clone(),
            config.animation_duration,
        );
        let context = CommandExecutionContext {
            model: model.clone(),
            animations: animations.clone(),
            scheduler: scheduler_handle,
            config,
        };
        let dispatcher = ActionDispatcher::new(
            ActionHandlerRegistry::with_defaults(),
            CommandStack::new(config.history_depth),
            context,
        );
        let grabber = BoundsGrabber::new(dispatcher.clone(), model.clone(), config.bounds_tolerance);

        tracing::info!(
            "Diagram '{}' ready with {} element(s)",
            model.borrow().root_id(),
            model.borrow().len()
        );

        Self {
            config,
            model,
            scheduler,
            animations,
            dispatcher,
            grabber,
            zoom: ZoomMouseListener::new(config.wheel_zoom_sensitivity),
            scroll: ScrollMouseListener::new(),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn model(&self) -> Ref<'_, DiagramModel> {
        self.model.borrow()
    }

    pub fn model_handle(&self) -> Shared<DiagramModel> {
        self.model.clone()
    }

    pub fn dispatcher(&self) -> &ActionDispatcher {
        &self.dispatcher
    }

    pub fn scheduler(&self) -> &FrameScheduler {
        &self.scheduler
    }

    pub fn register_handler(&self, kind: impl Into<String>, handler: Box<dyn ActionHandler>) -> bool {
        self.dispatcher.register_handler(kind, handler)
    }

    pub fn dispatch(&self, action: &Action) {
        self.dispatcher.dispatch(action);
    }

    pub fn dispatch_all(&self, actions: &[Action]) {
        self.dispatcher.dispatch_all(actions);
    }

    pub fn dispatch_next_frame(&self, action: Action) {
        self.dispatcher.dispatch_next_frame(action);
    }

    pub fn undo(&self) {
        self.dispatcher.dispatch(&Action::Undo);
    }

    pub fn redo(&self) {
        self.dispatcher.dispatch(&Action::Redo);
    }

    pub fn can_undo(&self) -> bool {
        self.dispatcher.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.dispatcher.can_redo()
    }

    /// Runs deferred actions and animation steps for the frame at `now`.
    pub fn run_frame(&self, now: Duration) -> FrameReport {
        self.scheduler.run_frame(now)
    }

    pub fn is_animating(&self) -> bool {
        self.animations.running_count() > 0
    }

    /// Marks `element` as rendered this cycle.
    pub fn decorate(&mut self, element: &Element) -> bool {
        self.grabber.decorate(element)
    }

    /// Marks every sizeable element as rendered.
    pub fn decorate_all(&mut self) -> usize {
        let model = self.model.borrow();
        model
            .iter_depth_first()
            .into_iter()
            .filter(|element| self.grabber.decorate(element))
            .count()
    }

    /// Reconciles measured bounds after a paint.
    pub fn post_update(&mut self, measurer: &dyn BoundsMeasurer) -> Option<ResizeAction> {
        self.grabber.post_update(measurer)
    }

    pub fn wheel(&self, target: &str, event: &WheelEvent) {
        let actions = self.zoom.wheel(&self.model.borrow(), target, event);
        self.dispatch_all(&actions);
    }

    pub fn mouse_down(&mut self, target: &str, event: &MouseEvent) {
        let actions = self.scroll.mouse_down(&self.model.borrow(), target, event);
        self.dispatch_all(&actions);
    }

    pub fn mouse_move(&mut self, target: &str, event: &MouseEvent) {
        let actions = self.scroll.mouse_move(&self.model.borrow(), target, event);
        self.dispatch_all(&actions);
    }

    pub fn mouse_up(&mut self) {
        let actions = self.scroll.mouse_up();
        self.dispatch_all(&actions);
    }
}
