use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use diagramkit_engine::{
    Action, Bounds, Command, Element, ElementResize, MeasuredBounds, Point, Viewport,
};
use serde_json::json;

use crate::support::{chip_diagram, root_viewport};

#[test]
fn test_unknown_kind_changes_nothing() {
    let diagram = chip_diagram();
    let before = root_viewport(&diagram);
    diagram.dispatch(&Action::from_json(r#"{"kind":"nonexistent"}"#).unwrap());
    assert_eq!(root_viewport(&diagram), before);
    assert!(!diagram.can_undo());
    assert!(!diagram.can_redo());
}

#[test]
fn test_dispatch_all_in_order() {
    let diagram = chip_diagram();
    diagram.dispatch_all(&[
        Action::viewport("root", Viewport::new(Point::ORIGIN, 2.0), true),
        Action::viewport("root", Viewport::new(Point::ORIGIN, 3.0), true),
        Action::Undo,
    ]);
    assert_eq!(diagram.dispatcher().undo_depth(), 1);
    assert_eq!(diagram.dispatcher().redo_depth(), 1);
}

#[test]
fn test_missing_target_does_not_block_batch() {
    let diagram = chip_diagram();
    diagram.dispatch(&Action::resize(vec![
        ElementResize {
            element_id: "ghost".into(),
            new_bounds: Bounds::new(0.0, 0.0, 1.0, 1.0),
        },
        ElementResize {
            element_id: "core_0_1".into(),
            new_bounds: Bounds::new(60.0, 0.0, 45.0, 45.0),
        },
    ]));
    let model = diagram.model();
    assert_eq!(
        model.get_by_id("core_0_1").unwrap().bounds(),
        Some(Bounds::new(60.0, 0.0, 45.0, 45.0))
    );
    assert!(model.get_by_id("ghost").is_none());
}

#[test]
fn test_custom_handler_receives_payload() {
    let diagram = chip_diagram();
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = seen.clone();
    diagram.register_handler(
        "select",
        Box::new(move |action: &Action| -> Vec<Box<dyn Command>> {
            if let Action::Custom(custom) = action {
                sink.borrow_mut().push(custom.payload.clone());
            }
            Vec::new()
        }),
    );

    diagram.dispatch(&Action::from_json(r#"{"kind":"select","elementIds":["core_0_0"]}"#).unwrap());
    assert_eq!(*seen.borrow(), vec![json!({"elementIds": ["core_0_0"]})]);
    assert!(!diagram.can_undo());
}

#[test]
fn test_next_frame_actions_run_in_order_before_reconciliation() {
    let mut diagram = chip_diagram();
    diagram.dispatch_next_frame(Action::viewport("root", Viewport::new(Point::ORIGIN, 2.0), false));
    diagram.dispatch_next_frame(Action::viewport("root", Viewport::new(Point::ORIGIN, 4.0), false));
    assert_eq!(root_viewport(&diagram).zoom, 1.0);

    let report = diagram.run_frame(Duration::from_millis(16));
    assert_eq!(report.deferred_tasks, 2);
    assert_eq!(root_viewport(&diagram).zoom, 4.0);

    // the viewport change invalidated the root bounds, so this pass sees it
    let measurer = |element: &Element| element.bounds().map(MeasuredBounds::Client);
    diagram.decorate_all();
    let action = diagram.post_update(&measurer).unwrap();
    assert!(action
        .resizes
        .iter()
        .any(|r| r.element_id.as_str() == "root"));
}
