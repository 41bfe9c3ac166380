use diagramkit_engine::{
    Action, Diagram, EngineConfig, MouseEvent, Point, Viewport, WheelEvent, ZoomMouseListener,
};

use crate::support::{chip_diagram, chip_model, root_viewport};

#[test]
fn test_wheel_up_at_unit_zoom() {
    let model = chip_model();
    let listener = ZoomMouseListener::default();
    let event = WheelEvent {
        delta_y: -100.0,
        offset: Point::new(300.0, 200.0),
    };
    let actions = listener.wheel(&model, "label", &event);
    let [Action::Viewport(action)] = actions.as_slice() else {
        panic!("expected one viewport action, got {:?}", actions);
    };
    assert_eq!(action.element_id.as_str(), "root");
    assert!(!action.animate);
    assert!((action.new_viewport.zoom - 1.6487212707).abs() < 1e-9);

    // the model point under the cursor does not move
    let v = action.new_viewport;
    assert!((v.scroll.x + 300.0 / v.zoom - 300.0).abs() < 1e-9);
    assert!((v.scroll.y + 200.0 / v.zoom - 200.0).abs() < 1e-9);
}

#[test]
fn test_wheel_burst_is_one_undo_step() {
    let diagram = chip_diagram();
    let event = WheelEvent {
        delta_y: 40.0,
        offset: Point::new(100.0, 100.0),
    };
    for _ in 0..10 {
        diagram.wheel("core_0_0", &event);
    }
    assert!(root_viewport(&diagram).zoom < 1.0);
    assert_eq!(diagram.dispatcher().undo_depth(), 1);

    diagram.undo();
    assert_eq!(root_viewport(&diagram), Viewport::default());
}

#[test]
fn test_configured_sensitivity() {
    let config = EngineConfig {
        wheel_zoom_sensitivity: 0.01,
        ..EngineConfig::default()
    };
    let diagram = Diagram::new(chip_model(), config);
    diagram.wheel(
        "root",
        &WheelEvent {
            delta_y: -100.0,
            offset: Point::ORIGIN,
        },
    );
    assert!((root_viewport(&diagram).zoom - 1.0f64.exp()).abs() < 1e-12);
}

#[test]
fn test_drag_pans_viewport() {
    let mut diagram = chip_diagram();
    diagram.mouse_down("core_0_1", &MouseEvent { position: Point::new(10.0, 10.0) });
    diagram.mouse_move("core_0_1", &MouseEvent { position: Point::new(60.0, 85.0) });
    diagram.mouse_move("core_0_1", &MouseEvent { position: Point::new(70.0, 85.0) });
    diagram.mouse_up();
    diagram.mouse_move("core_0_1", &MouseEvent { position: Point::new(500.0, 500.0) });

    assert_eq!(root_viewport(&diagram).scroll, Point::new(-60.0, -75.0));
    assert_eq!(diagram.dispatcher().undo_depth(), 1);
}
