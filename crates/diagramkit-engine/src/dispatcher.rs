//! Action dispatcher
//!
//! Entry point for all intents. `undo` and `redo` go straight to the
//! command stack; every other kind is looked up in the handler registry.
//! Kinds without a handler are dropped without touching model or history.
//!
//! A handler that yields at least one command causes exactly one
//! `CommandStack::execute` call for the whole batch.

use std::collections::HashMap;
use std::rc::Rc;

use diagramkit_core::{shared, Shared};

use crate::action::{Action, REDO_KIND, UNDO_KIND};
use crate::command::{Command, CommandExecutionContext};
use crate::command_stack::CommandStack;
use crate::resize::ResizeActionHandler;
use crate::scheduler::Scheduler;
use crate::viewport::{FitToScreenActionHandler, ViewportActionHandler};

/// Produces commands for one action kind.
pub trait ActionHandler {
    fn handle(&self, action: &Action) -> Vec<Box<dyn Command>>;
}

impl<F> ActionHandler for F
where
    F: Fn(&Action) -> Vec<Box<dyn Command>>,
{
    fn handle(&self, action: &Action) -> Vec<Box<dyn Command>> {
        self(action)
    }
}

/// Maps action kinds to handlers.
#[derive(Default)]
pub struct ActionHandlerRegistry {
    handlers: HashMap<String, Box<dyn ActionHandler>>,
}

impl ActionHandlerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry with the resize, viewport and fit handlers.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(crate::action::ResizeAction::KIND, Box::new(ResizeActionHandler));
        registry.register(crate::action::ViewportAction::KIND, Box::new(ViewportActionHandler));
        registry.register(
            crate::action::FitToScreenAction::KIND,
            Box::new(FitToScreenActionHandler),
        );
        registry
    }

    /// Registers `handler` for `kind`, replacing any previous one.
    ///
    /// The reserved kinds `undo` and `redo` cannot be registered.
    pub fn register(&mut self, kind: impl Into<String>, handler: Box<dyn ActionHandler>) -> bool {
        let kind = kind.into();
        if kind == UNDO_KIND || kind == REDO_KIND {
            tracing::warn!("Refusing to register a handler for reserved kind '{}'", kind);
            return false;
        }
        if self.handlers.insert(kind.clone(), handler).is_some() {
            tracing::debug!("Replaced handler for action kind '{}'", kind);
        }
        true
    }

    pub fn unregister(&mut self, kind: &str) -> bool {
        self.handlers.remove(kind).is_some()
    }

    pub fn has_handler(&self, kind: &str) -> bool {
        self.handlers.contains_key(kind)
    }

    pub fn get(&self, kind: &str) -> Option<&dyn ActionHandler> {
        self.handlers.get(kind).map(|h| h.as_ref())
    }

    pub fn kinds(&self) -> Vec<&str> {
        let mut kinds: Vec<&str> = self.handlers.keys().map(String::as_str).collect();
        kinds.sort_unstable();
        kinds
    }
}

/// Cheap-to-clone handle that routes actions to commands.
#[derive(Clone)]
pub struct ActionDispatcher {
    registry: Shared<ActionHandlerRegistry>,
    command_stack: Shared<CommandStack>,
    context: CommandExecutionContext,
}

impl ActionDispatcher {
    pub fn new(
        registry: ActionHandlerRegistry,
        command_stack: CommandStack,
        context: CommandExecutionContext,
    ) -> Self {
        Self {
            registry: shared(registry),
            command_stack: shared(command_stack),
            context,
        }
    }

    pub fn context(&self) -> &CommandExecutionContext {
        &self.context
    }

    pub fn register_handler(&self, kind: impl Into<String>, handler: Box<dyn ActionHandler>) -> bool {
        self.registry.borrow_mut().register(kind, handler)
    }

    pub fn has_handler(&self, kind: &str) -> bool {
        self.registry.borrow().has_handler(kind)
    }

    pub fn dispatch(&self, action: &Action) {
        match action {
            Action::Undo => {
                if !self.command_stack.borrow_mut().undo(&self.context) {
                    tracing::debug!("Nothing to undo");
                }
            }
            Action::Redo => {
                if !self.command_stack.borrow_mut().redo(&self.context) {
                    tracing::debug!("Nothing to redo");
                }
            }
            _ => {
                let commands = {
                    let registry = self.registry.borrow();
                    match registry.get(action.kind()) {
                        Some(handler) => handler.handle(action),
                        None => {
                            tracing::debug!(
                                "No handler for action kind '{}', dropping",
                                action.kind()
                            );
                            return;
                        }
                    }
                };
                if commands.is_empty() {
                    return;
                }
                self.command_stack
                    .borrow_mut()
                    .execute(commands, &self.context);
            }
        }
    }

    /// Dispatches each action in order; each is committed on its own.
    pub fn dispatch_all(&self, actions: &[Action]) {
        for action in actions {
            self.dispatch(action);
        }
    }

    /// Dispatches `action` at the next frame boundary.
    pub fn dispatch_next_frame(&self, action: Action) {
        let dispatcher = self.clone();
        self.scheduler().schedule_next_frame(Box::new(move |_| {
            dispatcher.dispatch(&action);
        }));
    }

    pub fn can_undo(&self) -> bool {
        self.command_stack.borrow().can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.command_stack.borrow().can_redo()
    }

    pub fn undo_depth(&self) -> usize {
        self.command_stack.borrow().undo_depth()
    }

    pub fn redo_depth(&self) -> usize {
        self.command_stack.borrow().redo_depth()
    }

    pub fn clear_history(&self) {
        self.command_stack.borrow_mut().clear();
    }

    fn scheduler(&self) -> &Rc<dyn Scheduler> {
        &self.context.scheduler
    }
}
