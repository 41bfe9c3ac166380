//! Bounds reconciliation.
//!
//! During rendering the view layer calls [`BoundsGrabber::decorate`] for the
//! elements it painted. After the paint, [`BoundsGrabber::post_update`]
//! measures every decorated sizeable element, compares the result with the
//! model, and sends one batched resize action for the next frame. The pass
//! itself only reads the model.

use diagramkit_core::{Bounds, Shared};

use crate::action::{Action, ElementResize, ResizeAction};
use crate::dispatcher::ActionDispatcher;
use crate::model::{DiagramModel, Element, ElementId};

/// A realized geometry reported by the view layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MeasuredBounds {
    /// Already in the element's model coordinate space.
    Client(Bounds),
    /// Relative to the element's own origin (e.g. an SVG bounding box).
    Local(Bounds),
}

impl MeasuredBounds {
    /// Converts to model coordinates given the element's current bounds.
    pub fn to_model(self, current: &Bounds) -> Bounds {
        match self {
            MeasuredBounds::Client(bounds) => bounds,
            MeasuredBounds::Local(bounds) => bounds.translate(current.origin()),
        }
    }
}

/// Measures realized geometry of rendered elements.
pub trait BoundsMeasurer {
    /// Returns `None` when the element has no realized geometry.
    fn measure(&self, element: &Element) -> Option<MeasuredBounds>;
}

impl<F> BoundsMeasurer for F
where
    F: Fn(&Element) -> Option<MeasuredBounds>,
{
    fn measure(&self, element: &Element) -> Option<MeasuredBounds> {
        self(element)
    }
}

pub struct BoundsGrabber {
    dispatcher: ActionDispatcher,
    model: Shared<DiagramModel>,
    tolerance: f64,
    pending: Vec<ElementId>,
}

impl BoundsGrabber {
    pub fn new(dispatcher: ActionDispatcher, model: Shared<DiagramModel>, tolerance: f64) -> Self {
        Self {
            dispatcher,
            model,
            tolerance,
            pending: Vec::new(),
        }
    }

    /// Marks `element` as rendered this cycle. Returns whether it will be measured.
    pub fn decorate(&mut self, element: &Element) -> bool {
        if !element.is_sizeable() {
            return false;
        }
        if !self.pending.contains(element.id()) {
            self.pending.push(element.id().clone());
        }
        true
    }

    /// Number of elements waiting for the next pass.
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Measures decorated elements and dispatches one resize for the next frame.
    ///
    /// Returns the queued action, if any.
    pub fn post_update(&mut self, measurer: &dyn BoundsMeasurer) -> Option<ResizeAction> {
        let pending = std::mem::take(&mut self.pending);
        let resizes: Vec<ElementResize> = {
            let model = self.model.borrow();
            pending
                .iter()
                .filter_map(|id| {
                    let element = model.get_by_id(id.as_str())?;
                    let current = element.bounds()?;
                    let measured = measurer.measure(element)?.to_model(&current);
                    if element.autosize() || !measured.almost_equals(&current, self.tolerance) {
                        Some(ElementResize {
                            element_id: id.clone(),
                            new_bounds: measured,
                        })
                    } else {
                        None
                    }
                })
                .collect()
        };

        if resizes.is_empty() {
            return None;
        }
        tracing::debug!("Reconciling bounds of {} element(s)", resizes.len());
        let action = ResizeAction { resizes };
        self.dispatcher
            .dispatch_next_frame(Action::Resize(action.clone()));
        Some(action)
    }
}
