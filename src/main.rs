//! Headless demo: loads a diagram, runs a few simulated frames of input,
//! measurement and animation, and logs the resulting viewport.
//!
//! Usage: `diagramkit [model.json]`

use std::time::Duration;

use anyhow::Context;
use diagramkit::{
    engine_config, init_logging, Action, Bounds, Diagram, Element, MeasuredBounds, ModelFactory,
    Point, SettingsPersistence, WheelEvent, BUILD_DATE, VERSION,
};
use diagramkit::engine::FitToScreenAction;

const CORE_WIDTH: f64 = 45.0;
const FRAME: Duration = Duration::from_millis(16);

const DEMO_MODEL: &str = r#"{
    "type": "processor", "id": "processor",
    "features": ["viewport"],
    "bounds": {"x": 0, "y": 0, "width": 800, "height": 600},
    "children": [
        {"type": "core", "id": "core_0_0", "bounds": {"x": 0, "y": 0, "width": 0, "height": 0}, "autosize": true},
        {"type": "core", "id": "core_0_1", "bounds": {"x": 60, "y": 0, "width": 0, "height": 0}, "autosize": true},
        {"type": "core", "id": "core_1_0", "bounds": {"x": 0, "y": 60, "width": 0, "height": 0}, "autosize": true},
        {"type": "core", "id": "core_1_1", "bounds": {"x": 60, "y": 60, "width": 0, "height": 0}, "autosize": true}
    ]
}"#;

/// Stands in for the view layer: cores render as fixed-size squares.
fn measure(element: &Element) -> Option<MeasuredBounds> {
    match element.element_type() {
        "core" => Some(MeasuredBounds::Local(Bounds::new(0.0, 0.0, CORE_WIDTH, CORE_WIDTH))),
        _ => element.bounds().map(MeasuredBounds::Client),
    }
}

fn run_frames(diagram: &mut Diagram, now: &mut Duration, count: usize) {
    for _ in 0..count {
        diagram.run_frame(*now);
        diagram.decorate_all();
        diagram.post_update(&measure);
        *now += FRAME;
    }
}

fn main() -> anyhow::Result<()> {
    init_logging()?;
    tracing::info!("DiagramKit {} (built {})", VERSION, BUILD_DATE);

    let settings = match SettingsPersistence::open_default() {
        Ok(settings) => settings,
        Err(e) => {
            tracing::warn!("No config location available: {}", e);
            SettingsPersistence::load_or_default(std::path::Path::new("diagramkit.toml"))
        }
    };
    let config = engine_config(settings.config());

    let source = match std::env::args().nth(1) {
        Some(path) => std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read model file {}", path))?,
        None => DEMO_MODEL.to_string(),
    };
    let model = ModelFactory::new()
        .allow_parents("core", ["processor"])
        .create_model_from_json(&source)?;
    let root = model.root_id().to_string();

    let mut diagram = Diagram::new(model, config);
    let mut now = Duration::ZERO;

    run_frames(&mut diagram, &mut now, 2);

    for _ in 0..3 {
        diagram.wheel(
            &root,
            &WheelEvent {
                delta_y: -100.0,
                offset: Point::new(400.0, 300.0),
            },
        );
    }
    run_frames(&mut diagram, &mut now, 1);
    log_viewport(&diagram, "after wheel zoom");

    diagram.dispatch(&Action::Fit(FitToScreenAction {
        element_id: root.as_str().into(),
        element_ids: Vec::new(),
        padding: None,
        animate: true,
    }));
    let frames = (config.animation_duration.as_millis() / FRAME.as_millis()) as usize + 2;
    run_frames(&mut diagram, &mut now, frames);
    log_viewport(&diagram, "after fit to screen");

    diagram.undo();
    run_frames(&mut diagram, &mut now, frames);
    log_viewport(&diagram, "after undo");

    Ok(())
}

fn log_viewport(diagram: &Diagram, label: &str) {
    let model = diagram.model();
    if let Some(viewport) = model.root().viewport() {
        tracing::info!("{}: {}", label, viewport);
    }
}
