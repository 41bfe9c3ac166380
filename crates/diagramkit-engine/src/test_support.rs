use std::rc::Rc;

use diagramkit_core::shared;

use crate::animation::AnimationEngine;
use crate::command::CommandExecutionContext;
use crate::config::EngineConfig;
use crate::model::DiagramModel;
use crate::scheduler::FrameScheduler;

pub(crate) fn context_for(model: DiagramModel) -> (FrameScheduler, CommandExecutionContext) {
    let config = EngineConfig::default();
    let scheduler = FrameScheduler::new();
    let handle: Rc<dyn crate::scheduler::Scheduler> = Rc::new(scheduler.clone());
    let model = shared(model);
    let animations = AnimationEngine::new(handle.clone(), model.clone(), config.animation_duration);
    let context = CommandExecutionContext {
        model,
        animations,
        scheduler: handle,
        config,
    };
    (scheduler, context)
}
