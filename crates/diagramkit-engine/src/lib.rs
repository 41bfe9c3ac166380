//! # DiagramKit Engine
//!
//! Action/command execution engine for interactive, zoomable diagrams.
//!
//! ## Core Components
//!
//! - **Actions**: immutable intents identified by a `kind` (`undo`, `redo`,
//!   `resize`, `viewport`, `fit`, or any custom kind)
//! - **Dispatcher**: resolves actions to commands through a handler registry
//! - **Command Stack**: linear undo/redo history with merge coalescing
//! - **Animation Engine**: frame-driven tweening of model fields
//! - **Bounds Grabber**: post-render measurement that feeds resize actions back
//!
//! ## Architecture
//!
//! ```text
//! input ─► Action ─► ActionDispatcher ─► Command(s) ─► CommandStack
//!                         ▲                              │
//!                         │                              ▼
//!            BoundsGrabber (next frame)      DiagramModel (maybe animated)
//!                         ▲                              │
//!                         └──────── view render ◄────────┘
//! ```
//!
//! Everything runs on one thread. The host drives time by calling
//! [`FrameScheduler::run_frame`] (or [`Diagram::run_frame`]).
//!
//! ## Usage
//!
//! ```rust,ignore
//! use diagramkit_engine::{Action, Diagram, EngineConfig, ModelFactory, Viewport};
//!
//! let model = ModelFactory::new().create_model_from_json(json)?;
//! let diagram = Diagram::new(model, EngineConfig::default());
//! diagram.dispatch(&Action::viewport("root", Viewport::default(), true));
//! diagram.run_frame(now);
//! ```

pub mod action;
pub mod animation;
pub mod bounds;
pub mod command;
pub mod command_stack;
pub mod config;
pub mod diagram;
pub mod dispatcher;
pub mod model;
pub mod model_factory;
pub mod mouse;
pub mod protocol;
pub mod resize;
pub mod scheduler;
pub mod viewport;

#[cfg(test)]
mod test_support;

pub use action::{
    Action, CustomAction, ElementResize, FitToScreenAction, ResizeAction, ViewportAction,
    REDO_KIND, UNDO_KIND,
};
pub use animation::{progress, Animation, AnimationEngine, AnimationHandle};
pub use bounds::{BoundsGrabber, BoundsMeasurer, MeasuredBounds};
pub use command::{Command, CommandExecutionContext, CommandOutcome};
pub use command_stack::CommandStack;
pub use config::EngineConfig;
pub use diagram::Diagram;
pub use dispatcher::{ActionDispatcher, ActionHandler, ActionHandlerRegistry};
pub use model::{Capability, DiagramModel, Element, ElementId, Sizing, Viewport};
pub use model_factory::{ElementSchema, ModelFactory};
pub use mouse::{MouseEvent, ScrollMouseListener, WheelEvent, ZoomMouseListener};
pub use protocol::{ActionInbox, ActionMessageHandler, SubscriptionId};
pub use resize::{ResizeActionHandler, ResizeCommand};
pub use scheduler::{
    CancelToken, FrameReport, FrameScheduler, FrameTask, RepeatingTask, Scheduler, TaskStatus,
};
pub use viewport::{
    fit_viewport, FitToScreenActionHandler, FitToScreenCommand, ViewportActionHandler,
    ViewportAnimation, ViewportCommand,
};

pub use diagramkit_core::{Bounds, Dimension, Point};
