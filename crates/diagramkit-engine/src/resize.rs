//! Resize command: commits measured bounds to sizeable elements.
//!
//! Applying measured bounds clears `autosize`; undo restores the previous
//! bounds and sets `autosize` again so the element is re-measured.

use std::any::Any;

use diagramkit_core::Bounds;

use crate::action::{Action, ResizeAction};
use crate::command::{Command, CommandExecutionContext, CommandOutcome};
use crate::dispatcher::ActionHandler;
use crate::model::ElementId;

#[derive(Debug, Clone, PartialEq)]
struct ResolvedResize {
    element_id: ElementId,
    old_bounds: Bounds,
    new_bounds: Bounds,
}

pub struct ResizeCommand {
    action: ResizeAction,
    resolved: Vec<ResolvedResize>,
}

impl ResizeCommand {
    pub const KIND: &'static str = ResizeAction::KIND;

    pub fn new(action: ResizeAction) -> Self {
        Self {
            action,
            resolved: Vec::new(),
        }
    }

    /// Number of targets found at execute time.
    pub fn resolved_count(&self) -> usize {
        self.resolved.len()
    }

    fn apply(&self, context: &CommandExecutionContext, forward: bool) -> CommandOutcome {
        if self.resolved.is_empty() {
            return CommandOutcome::Skipped;
        }
        let mut model = context.model.borrow_mut();
        for resize in &self.resolved {
            let Some(element) = model.get_by_id_mut(resize.element_id.as_str()) else {
                tracing::debug!("Resize target '{}' no longer exists", resize.element_id);
                continue;
            };
            if forward {
                element.set_bounds(resize.new_bounds);
                element.set_autosize(false);
            } else {
                element.set_bounds(resize.old_bounds);
                element.set_autosize(true);
            }
        }
        CommandOutcome::Applied
    }
}

impl Command for ResizeCommand {
    fn kind(&self) -> &'static str {
        Self::KIND
    }

    fn execute(&mut self, context: &CommandExecutionContext) -> CommandOutcome {
        self.resolved = {
            let model = context.model.borrow();
            self.action
                .resizes
                .iter()
                .filter_map(|resize| {
                    let current = model
                        .get_by_id(resize.element_id.as_str())
                        .and_then(|e| e.bounds());
                    let Some(old_bounds) = current else {
                        tracing::debug!(
                            "Resize target '{}' missing or not sizeable",
                            resize.element_id
                        );
                        return None;
                    };
                    Some(ResolvedResize {
                        element_id: resize.element_id.clone(),
                        old_bounds,
                        new_bounds: resize.new_bounds,
                    })
                })
                .collect()
        };
        self.redo(context)
    }

    fn undo(&mut self, context: &CommandExecutionContext) -> CommandOutcome {
        self.apply(context, false)
    }

    fn redo(&mut self, context: &CommandExecutionContext) -> CommandOutcome {
        self.apply(context, true)
    }

    /// Measured bounds are derived state and never enter history.
    fn is_pushable(&self) -> bool {
        false
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Turns `resize` actions into [`ResizeCommand`]s.
pub struct ResizeActionHandler;

impl ActionHandler for ResizeActionHandler {
    fn handle(&self, action: &Action) -> Vec<Box<dyn Command>> {
        match action {
            Action::Resize(resize) => vec![Box::new(ResizeCommand::new(resize.clone()))],
            _ => Vec::new(),
        }
    }
}
