//! Mouse listeners that translate pointer input into viewport actions.
//!
//! Both listeners resolve the nearest viewport ancestor of the event target
//! (the target itself included) and emit non-animated viewport actions, so a
//! burst of wheel steps or drag moves coalesces into one undo entry.

use diagramkit_core::constants::{DEFAULT_WHEEL_ZOOM_SENSITIVITY, MAX_ZOOM, MIN_ZOOM};
use diagramkit_core::Point;

use crate::action::Action;
use crate::model::{DiagramModel, Viewport};

/// A wheel event. `offset` is the cursor position in viewport pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelEvent {
    pub delta_y: f64,
    pub offset: Point,
}

/// A pointer event in viewport pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MouseEvent {
    pub position: Point,
}

/// Zooms around the cursor on wheel events.
#[derive(Debug, Clone, Copy)]
pub struct ZoomMouseListener {
    sensitivity: f64,
}

impl ZoomMouseListener {
    pub fn new(sensitivity: f64) -> Self {
        Self { sensitivity }
    }

    pub fn sensitivity(&self) -> f64 {
        self.sensitivity
    }

    /// Viewport after zooming by `exp(-delta_y * sensitivity)` at `offset`.
    ///
    /// The model point under the cursor stays under the cursor.
    pub fn zoomed(&self, viewport: &Viewport, event: &WheelEvent) -> Viewport {
        let step = (-event.delta_y * self.sensitivity).exp();
        let zoom = (viewport.zoom * step).clamp(MIN_ZOOM, MAX_ZOOM);
        let factor = 1.0 / zoom - 1.0 / viewport.zoom;
        Viewport {
            scroll: Point::new(
                viewport.scroll.x - factor * event.offset.x,
                viewport.scroll.y - factor * event.offset.y,
            ),
            zoom,
        }
    }

    pub fn wheel(&self, model: &DiagramModel, target: &str, event: &WheelEvent) -> Vec<Action> {
        let Some(element) = model.find_ancestor(target, |e| e.is_viewport()) else {
            return Vec::new();
        };
        let Some(viewport) = element.viewport() else {
            return Vec::new();
        };
        vec![Action::viewport(
            element.id().clone(),
            self.zoomed(viewport, event),
            false,
        )]
    }
}

impl Default for ZoomMouseListener {
    fn default() -> Self {
        Self::new(DEFAULT_WHEEL_ZOOM_SENSITIVITY)
    }
}

/// Pans the viewport while the pointer is dragged.
#[derive(Debug, Clone, Default)]
pub struct ScrollMouseListener {
    last_position: Option<Point>,
}

impl ScrollMouseListener {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dragging(&self) -> bool {
        self.last_position.is_some()
    }

    /// Starts a drag if `target` lies inside a viewport.
    pub fn mouse_down(&mut self, model: &DiagramModel, target: &str, event: &MouseEvent) -> Vec<Action> {
        if model.find_ancestor(target, |e| e.is_viewport()).is_some() {
            self.last_position = Some(event.position);
        }
        Vec::new()
    }

    pub fn mouse_move(&mut self, model: &DiagramModel, target: &str, event: &MouseEvent) -> Vec<Action> {
        let Some(last) = self.last_position else {
            return Vec::new();
        };
        let Some(element) = model.find_ancestor(target, |e| e.is_viewport()) else {
            return Vec::new();
        };
        let Some(viewport) = element.viewport() else {
            return Vec::new();
        };
        self.last_position = Some(event.position);

        let dx = (event.position.x - last.x) / viewport.zoom;
        let dy = (event.position.y - last.y) / viewport.zoom;
        let scrolled = Viewport {
            scroll: Point::new(viewport.scroll.x - dx, viewport.scroll.y - dy),
            zoom: viewport.zoom,
        };
        vec![Action::viewport(element.id().clone(), scrolled, false)]
    }

    pub fn mouse_up(&mut self) -> Vec<Action> {
        self.last_position = None;
        Vec::new()
    }
}
