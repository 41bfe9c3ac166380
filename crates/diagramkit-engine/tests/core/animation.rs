use std::time::Duration;

use diagramkit_engine::{Action, FitToScreenAction, Point, Viewport};

use crate::support::{chip_diagram, root_viewport};

fn ms(value: u64) -> Duration {
    Duration::from_millis(value)
}

#[test]
fn test_new_animation_supersedes_running_one() {
    let diagram = chip_diagram();
    diagram.dispatch(&Action::viewport("root", Viewport::new(Point::ORIGIN, 4.0), true));
    diagram.run_frame(ms(0));
    diagram.run_frame(ms(100));
    let interrupted = root_viewport(&diagram);
    assert!(interrupted.zoom > 1.0 && interrupted.zoom < 4.0);

    let target = Viewport::new(Point::new(-20.0, 10.0), 0.5);
    diagram.dispatch(&Action::viewport("root", target, true));
    let report = diagram.run_frame(ms(116));
    assert_eq!(report.repeating_tasks, 1);
    assert_eq!(root_viewport(&diagram), interrupted);

    diagram.run_frame(ms(500));
    assert_eq!(root_viewport(&diagram), target);
    diagram.run_frame(ms(1000));
    assert_eq!(root_viewport(&diagram), target);
    assert!(!diagram.is_animating());
}

#[test]
fn test_zoom_interpolates_geometrically() {
    let diagram = chip_diagram();
    diagram.dispatch(&Action::viewport("root", Viewport::new(Point::ORIGIN, 16.0), true));

    let mut zooms = Vec::new();
    for t in [0, 62, 125, 187, 250] {
        diagram.run_frame(ms(t));
        zooms.push(root_viewport(&diagram).zoom);
    }
    // equal time steps multiply zoom by a near constant ratio
    let ratios: Vec<f64> = zooms.windows(2).map(|w| w[1] / w[0]).collect();
    for ratio in &ratios {
        assert!((ratio - 2.0).abs() < 0.05, "ratio {}", ratio);
    }
    assert_eq!(zooms[4], 16.0);
}

#[test]
fn test_fit_to_screen_animates_and_undoes() {
    let diagram = chip_diagram();
    diagram.dispatch(&Action::resize(vec![
        diagramkit_engine::ElementResize {
            element_id: "core_0_0".into(),
            new_bounds: diagramkit_engine::Bounds::new(0.0, 0.0, 100.0, 100.0),
        },
        diagramkit_engine::ElementResize {
            element_id: "core_0_1".into(),
            new_bounds: diagramkit_engine::Bounds::new(100.0, 0.0, 100.0, 100.0),
        },
    ]));

    diagram.dispatch(&Action::Fit(FitToScreenAction {
        element_id: "root".into(),
        element_ids: Vec::new(),
        padding: Some(0.0),
        animate: true,
    }));
    diagram.run_frame(ms(0));
    diagram.run_frame(ms(250));
    let fitted = root_viewport(&diagram);
    assert_eq!(fitted.zoom, 4.0);
    assert_eq!(fitted.scroll, Point::new(0.0, -25.0));

    diagram.undo();
    diagram.run_frame(ms(300));
    diagram.run_frame(ms(550));
    assert_eq!(root_viewport(&diagram), Viewport::default());
}

#[test]
fn test_immediate_change_stops_running_animation() {
    let diagram = chip_diagram();
    diagram.dispatch(&Action::viewport("root", Viewport::new(Point::ORIGIN, 4.0), true));
    diagram.run_frame(ms(0));
    diagram.run_frame(ms(100));
    assert!(diagram.is_animating());

    let committed = Viewport::new(Point::new(7.0, 7.0), 2.0);
    diagram.dispatch(&Action::viewport("root", committed, false));
    assert_eq!(root_viewport(&diagram), committed);
    assert!(!diagram.is_animating());

    diagram.run_frame(ms(116));
    diagram.run_frame(ms(1000));
    assert_eq!(root_viewport(&diagram), committed);
    assert_eq!(diagram.dispatcher().undo_depth(), 2);
}
