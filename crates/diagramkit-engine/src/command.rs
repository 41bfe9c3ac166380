//! Command contract
//!
//! A command is a reversible model mutation bound to one action. Commands
//! resolve their targets by id from the current model when they execute
//! and capture the "before" state they need for undo at that point.
//!
//! Missing targets are never an error: the command skips its effect and
//! reports [`CommandOutcome::Skipped`].

use std::any::Any;
use std::rc::Rc;

use diagramkit_core::Shared;

use crate::animation::{AnimationEngine, AnimationHandle};
use crate::config::EngineConfig;
use crate::model::DiagramModel;
use crate::scheduler::Scheduler;

/// Result of applying a command.
#[derive(Debug, Clone)]
pub enum CommandOutcome {
    /// The model was mutated synchronously.
    Applied,
    /// The target was missing or lacked a capability; nothing changed.
    Skipped,
    /// The mutation runs over the following frames.
    Animating(AnimationHandle),
}

impl CommandOutcome {
    pub fn is_skipped(&self) -> bool {
        matches!(self, CommandOutcome::Skipped)
    }

    pub fn is_animating(&self) -> bool {
        matches!(self, CommandOutcome::Animating(_))
    }
}

/// Collaborators handed to every command call.
#[derive(Clone)]
pub struct CommandExecutionContext {
    pub model: Shared<DiagramModel>,
    pub animations: AnimationEngine,
    pub scheduler: Rc<dyn Scheduler>,
    pub config: EngineConfig,
}

/// A reversible unit of model mutation.
pub trait Command: Any {
    /// Kind tag, matching the action the command was created from.
    fn kind(&self) -> &'static str;

    /// First application. Captures the state `undo` restores.
    fn execute(&mut self, context: &CommandExecutionContext) -> CommandOutcome;

    fn undo(&mut self, context: &CommandExecutionContext) -> CommandOutcome;

    /// Re-applies the state captured by `execute`.
    fn redo(&mut self, context: &CommandExecutionContext) -> CommandOutcome;

    /// Absorbs a newer command into `self`. Returns whether absorption happened.
    fn merge(&mut self, _other: &dyn Command, _context: &CommandExecutionContext) -> bool {
        false
    }

    /// Whether the command may enter history.
    fn is_pushable(&self) -> bool {
        true
    }

    fn as_any(&self) -> &dyn Any;
}

impl std::fmt::Debug for dyn Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Command").field("kind", &self.kind()).finish()
    }
}
