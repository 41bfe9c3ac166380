use std::time::Duration;

use diagramkit_engine::{Action, Bounds, Element, MeasuredBounds, Point, Viewport};

use crate::support::chip_diagram;

const CORE_WIDTH: f64 = 45.0;

fn svg_measurer(element: &Element) -> Option<MeasuredBounds> {
    match element.element_type() {
        "core" => Some(MeasuredBounds::Local(Bounds::new(0.0, 0.0, CORE_WIDTH, CORE_WIDTH))),
        _ => element.bounds().map(MeasuredBounds::Client),
    }
}

#[test]
fn test_stable_bounds_produce_no_resizes() {
    let mut diagram = chip_diagram();
    diagram.decorate_all();
    let first = diagram.post_update(&svg_measurer).unwrap();
    assert_eq!(first.resizes.len(), 2);
    diagram.run_frame(Duration::ZERO);

    for _ in 0..2 {
        diagram.decorate_all();
        assert!(diagram.post_update(&svg_measurer).is_none());
    }
}

#[test]
fn test_sub_tolerance_noise_ignored() {
    let mut diagram = chip_diagram();
    diagram.decorate_all();
    diagram.post_update(&svg_measurer);
    diagram.run_frame(Duration::ZERO);

    let noisy = |element: &Element| {
        svg_measurer(element).map(|m| match m {
            MeasuredBounds::Local(b) => MeasuredBounds::Local(Bounds::new(
                b.x + 2e-4,
                b.y - 3e-4,
                b.width + 5e-4,
                b.height,
            )),
            client => client,
        })
    };
    diagram.decorate_all();
    assert!(diagram.post_update(&noisy).is_none());

    let grown = |element: &Element| {
        svg_measurer(element).map(|m| match m {
            MeasuredBounds::Local(b) => {
                MeasuredBounds::Local(Bounds::new(b.x, b.y, b.width + 1.0, b.height))
            }
            client => client,
        })
    };
    diagram.decorate_all();
    let action = diagram.post_update(&grown).unwrap();
    assert_eq!(action.resizes.len(), 2);
}

#[test]
fn test_resize_is_deferred_and_outside_history() {
    let mut diagram = chip_diagram();
    diagram.decorate_all();
    let action = diagram.post_update(&svg_measurer).unwrap();
    assert_eq!(
        action.resizes[1].new_bounds,
        Bounds::new(60.0, 0.0, CORE_WIDTH, CORE_WIDTH)
    );
    assert!(diagram.model().get_by_id("core_0_1").unwrap().autosize());

    diagram.run_frame(Duration::ZERO);
    let model = diagram.model();
    let core = model.get_by_id("core_0_1").unwrap();
    assert!(!core.autosize());
    assert_eq!(core.bounds(), Some(Bounds::new(60.0, 0.0, CORE_WIDTH, CORE_WIDTH)));
    drop(model);
    assert!(!diagram.can_undo());
}

#[test]
fn test_only_decorated_elements_are_measured() {
    let mut diagram = chip_diagram();
    let core = diagram.model().get_by_id("core_0_0").unwrap().clone();
    assert!(diagram.decorate(&core));
    let label = diagram.model().get_by_id("label").unwrap().clone();
    assert!(!diagram.decorate(&label));

    let action = diagram.post_update(&svg_measurer).unwrap();
    assert_eq!(action.resizes.len(), 1);
    assert_eq!(action.resizes[0].element_id.as_str(), "core_0_0");
}

#[test]
fn test_immediate_viewport_change_triggers_remeasure() {
    let mut diagram = chip_diagram();
    diagram.decorate_all();
    diagram.post_update(&svg_measurer);
    diagram.run_frame(Duration::ZERO);
    diagram.decorate_all();
    assert!(diagram.post_update(&svg_measurer).is_none());
    assert!(!diagram.model().root().autosize());

    diagram.dispatch(&Action::viewport(
        "root",
        Viewport::new(Point::new(30.0, 0.0), 1.5),
        false,
    ));
    assert!(diagram.model().root().autosize());

    diagram.decorate_all();
    let action = diagram.post_update(&svg_measurer).unwrap();
    assert_eq!(action.resizes.len(), 1);
    assert_eq!(action.resizes[0].element_id.as_str(), "root");
    assert_eq!(action.resizes[0].new_bounds, Bounds::new(0.0, 0.0, 800.0, 600.0));

    diagram.run_frame(Duration::from_millis(16));
    assert!(!diagram.model().root().autosize());
    assert_eq!(diagram.dispatcher().undo_depth(), 1);
}
