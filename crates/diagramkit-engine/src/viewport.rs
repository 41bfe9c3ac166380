//! Viewport commands and animation.
//!
//! Screen position of a model point `p` in a viewport is
//! `(p - scroll) * zoom`. Zoom animates geometrically, scroll linearly.

use std::any::Any;

use diagramkit_core::constants::{MAX_ZOOM, MIN_ZOOM};
use diagramkit_core::{Bounds, Dimension, Point};

use crate::action::{Action, FitToScreenAction, ViewportAction};
use crate::animation::Animation;
use crate::command::{Command, CommandExecutionContext, CommandOutcome};
use crate::dispatcher::ActionHandler;
use crate::model::{DiagramModel, Element, ElementId, Viewport};

/// Writes `viewport` to `element` and flags its bounds for re-measurement.
fn apply_viewport(element: &mut Element, viewport: Viewport) -> bool {
    if !element.set_viewport(viewport) {
        return false;
    }
    element.set_autosize(true);
    true
}

/// Tweens scroll and zoom of one viewport element.
pub struct ViewportAnimation {
    element_id: ElementId,
    from: Viewport,
    to: Viewport,
    zoom_log_ratio: f64,
}

impl ViewportAnimation {
    pub fn new(element_id: ElementId, from: Viewport, to: Viewport) -> Self {
        Self {
            element_id,
            from,
            to,
            zoom_log_ratio: (to.zoom / from.zoom).ln(),
        }
    }

    /// Interpolated viewport at progress `t`.
    pub fn at(&self, t: f64) -> Viewport {
        if t >= 1.0 {
            return self.to;
        }
        let zoom = if self.zoom_log_ratio.is_finite() {
            self.from.zoom * (t * self.zoom_log_ratio).exp()
        } else {
            (1.0 - t) * self.from.zoom + t * self.to.zoom
        };
        Viewport {
            scroll: self.from.scroll.lerp(&self.to.scroll, t),
            zoom,
        }
    }
}

impl Animation for ViewportAnimation {
    fn tween(&mut self, t: f64, model: &mut DiagramModel) {
        let viewport = self.at(t);
        match model.get_by_id_mut(self.element_id.as_str()) {
            Some(element) => {
                apply_viewport(element, viewport);
            }
            None => tracing::debug!("Viewport '{}' vanished mid-animation", self.element_id),
        }
    }
}

/// Changes scroll and zoom of a viewport element.
pub struct ViewportCommand {
    action: ViewportAction,
    old_viewport: Option<Viewport>,
}

impl ViewportCommand {
    pub const KIND: &'static str = ViewportAction::KIND;

    pub fn new(action: ViewportAction) -> Self {
        Self {
            action,
            old_viewport: None,
        }
    }

    pub fn element_id(&self) -> &ElementId {
        &self.action.element_id
    }

    pub fn target_viewport(&self) -> Viewport {
        self.action.new_viewport
    }

    pub fn is_animated(&self) -> bool {
        self.action.animate
    }

    fn transition(&self, context: &CommandExecutionContext, from: Viewport, to: Viewport) -> CommandOutcome {
        let id = &self.action.element_id;
        if self.action.animate {
            let animation = ViewportAnimation::new(id.clone(), from, to);
            return CommandOutcome::Animating(context.animations.start(id.clone(), Box::new(animation)));
        }
        if context.animations.cancel(id.as_str()) {
            tracing::debug!("Animation on '{}' cancelled by immediate change", id);
        }
        let applied = context
            .model
            .borrow_mut()
            .get_by_id_mut(id.as_str())
            .is_some_and(|element| apply_viewport(element, to));
        if applied {
            CommandOutcome::Applied
        } else {
            CommandOutcome::Skipped
        }
    }
}

impl Command for ViewportCommand {
    fn kind(&self) -> &'static str {
        Self::KIND
    }

    fn execute(&mut self, context: &CommandExecutionContext) -> CommandOutcome {
        let current = context
            .model
            .borrow()
            .get_by_id(self.action.element_id.as_str())
            .and_then(|e| e.viewport().copied());
        let Some(old) = current else {
            tracing::debug!("'{}' is not a viewport element", self.action.element_id);
            return CommandOutcome::Skipped;
        };
        self.old_viewport = Some(old);
        self.transition(context, old, self.action.new_viewport)
    }

    fn undo(&mut self, context: &CommandExecutionContext) -> CommandOutcome {
        match self.old_viewport {
            Some(old) => self.transition(context, self.action.new_viewport, old),
            None => CommandOutcome::Skipped,
        }
    }

    fn redo(&mut self, context: &CommandExecutionContext) -> CommandOutcome {
        match self.old_viewport {
            Some(old) => self.transition(context, old, self.action.new_viewport),
            None => CommandOutcome::Skipped,
        }
    }

    fn merge(&mut self, other: &dyn Command, _context: &CommandExecutionContext) -> bool {
        if self.action.animate {
            return false;
        }
        match viewport_command_of(other) {
            Some(other)
                if !other.action.animate && other.action.element_id == self.action.element_id =>
            {
                self.action.new_viewport = other.action.new_viewport;
                true
            }
            _ => false,
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// The viewport change carried by `command`, whether it is a plain
/// viewport command or an executed fit.
fn viewport_command_of(command: &dyn Command) -> Option<&ViewportCommand> {
    let any = command.as_any();
    any.downcast_ref::<ViewportCommand>().or_else(|| {
        any.downcast_ref::<FitToScreenCommand>()
            .and_then(|fit| fit.inner.as_ref())
    })
}

/// Zoom and scroll that center `content` inside a canvas of `canvas` size,
/// keeping `padding` (a fraction per side) free.
pub fn fit_viewport(content: &Bounds, canvas: Dimension, padding: f64) -> Option<Viewport> {
    if !content.is_valid() || content.width <= 0.0 || content.height <= 0.0 {
        return None;
    }
    if canvas.width <= 0.0 || canvas.height <= 0.0 {
        return None;
    }
    let padding_factor = 1.0 - padding.clamp(0.0, 0.45) * 2.0;
    let zoom_x = canvas.width * padding_factor / content.width;
    let zoom_y = canvas.height * padding_factor / content.height;
    let zoom = zoom_x.min(zoom_y).clamp(MIN_ZOOM, MAX_ZOOM);

    let center = content.center();
    let scroll = Point::new(
        center.x - canvas.width / (2.0 * zoom),
        center.y - canvas.height / (2.0 * zoom),
    );
    Some(Viewport::new(scroll, zoom))
}

/// Bounds of `id` in the coordinate space of its ancestor `viewport_id`.
fn bounds_in_viewport(model: &DiagramModel, id: &str, viewport_id: &str) -> Option<Bounds> {
    let mut bounds = model.get_by_id(id)?.bounds()?;
    let mut parent = model.parent_of(id);
    while let Some(element) = parent {
        if element.id().as_str() == viewport_id {
            return Some(bounds);
        }
        if let Some(origin) = element.bounds().map(|b| b.origin()) {
            bounds = bounds.translate(origin);
        }
        parent = model.parent_of(element.id().as_str());
    }
    None
}

/// Fits content into a viewport by delegating to a [`ViewportCommand`].
pub struct FitToScreenCommand {
    action: FitToScreenAction,
    inner: Option<ViewportCommand>,
}

impl FitToScreenCommand {
    pub const KIND: &'static str = FitToScreenAction::KIND;

    pub fn new(action: FitToScreenAction) -> Self {
        Self {
            action,
            inner: None,
        }
    }

    fn target_viewport(&self, context: &CommandExecutionContext) -> Option<Viewport> {
        let model = context.model.borrow();
        let viewport_id = self.action.element_id.as_str();
        let canvas = model.get_by_id(viewport_id).filter(|e| e.is_viewport())?.bounds()?.size();

        let content = if self.action.element_ids.is_empty() {
            model
                .descendants(viewport_id)
                .into_iter()
                .filter_map(|e| bounds_in_viewport(&model, e.id().as_str(), viewport_id))
                .reduce(|a, b| a.union(&b))
        } else {
            self.action
                .element_ids
                .iter()
                .filter_map(|id| bounds_in_viewport(&model, id.as_str(), viewport_id))
                .reduce(|a, b| a.union(&b))
        }?;

        let padding = self.action.padding.unwrap_or(context.config.fit_padding);
        fit_viewport(&content, canvas, padding)
    }
}

impl Command for FitToScreenCommand {
    fn kind(&self) -> &'static str {
        Self::KIND
    }

    fn execute(&mut self, context: &CommandExecutionContext) -> CommandOutcome {
        let Some(new_viewport) = self.target_viewport(context) else {
            tracing::debug!("Nothing to fit into '{}'", self.action.element_id);
            return CommandOutcome::Skipped;
        };
        let mut inner = ViewportCommand::new(ViewportAction {
            element_id: self.action.element_id.clone(),
            new_viewport,
            animate: self.action.animate,
        });
        let outcome = inner.execute(context);
        if !outcome.is_skipped() {
            self.inner = Some(inner);
        }
        outcome
    }

    fn undo(&mut self, context: &CommandExecutionContext) -> CommandOutcome {
        match self.inner.as_mut() {
            Some(inner) => inner.undo(context),
            None => CommandOutcome::Skipped,
        }
    }

    fn redo(&mut self, context: &CommandExecutionContext) -> CommandOutcome {
        match self.inner.as_mut() {
            Some(inner) => inner.redo(context),
            None => CommandOutcome::Skipped,
        }
    }

    fn merge(&mut self, other: &dyn Command, context: &CommandExecutionContext) -> bool {
        self.inner
            .as_mut()
            .is_some_and(|inner| inner.merge(other, context))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Turns `viewport` actions into [`ViewportCommand`]s.
pub struct ViewportActionHandler;

impl ActionHandler for ViewportActionHandler {
    fn handle(&self, action: &Action) -> Vec<Box<dyn Command>> {
        match action {
            Action::Viewport(viewport) => vec![Box::new(ViewportCommand::new(viewport.clone()))],
            _ => Vec::new(),
        }
    }
}

/// Turns `fit` actions into [`FitToScreenCommand`]s.
pub struct FitToScreenActionHandler;

impl ActionHandler for FitToScreenActionHandler {
    fn handle(&self, action: &Action) -> Vec<Box<dyn Command>> {
        match action {
            Action::Fit(fit) => vec![Box::new(FitToScreenCommand::new(fit.clone()))],
            _ => Vec::new(),
        }
    }
}
