use std::time::Duration;

use diagramkit_engine::{
    Action, Bounds, Command, CommandStack, ElementResize, FitToScreenAction, Point, Viewport,
    ViewportAction, ViewportCommand,
};
use proptest::prelude::*;

use crate::support::{chip_diagram, root_viewport};

#[test]
fn test_viewport_undo_restores_exactly() {
    let diagram = chip_diagram();
    let before = root_viewport(&diagram);

    diagram.dispatch(&Action::viewport(
        "root",
        Viewport::new(Point::new(10.0, 5.0), 2.0),
        false,
    ));
    assert_eq!(
        root_viewport(&diagram),
        Viewport::new(Point::new(10.0, 5.0), 2.0)
    );

    diagram.undo();
    assert_eq!(root_viewport(&diagram), before);
}

#[test]
fn test_merged_zoom_undoes_to_original() {
    let diagram = chip_diagram();
    diagram.dispatch(&Action::viewport("root", Viewport::new(Point::ORIGIN, 2.0), false));
    diagram.dispatch(&Action::viewport("root", Viewport::new(Point::ORIGIN, 4.0), false));
    assert_eq!(diagram.dispatcher().undo_depth(), 1);
    assert_eq!(root_viewport(&diagram).zoom, 4.0);

    diagram.undo();
    assert_eq!(root_viewport(&diagram).zoom, 1.0);
    assert!(!diagram.can_undo());

    diagram.redo();
    assert_eq!(root_viewport(&diagram).zoom, 4.0);
}

#[test]
fn test_animated_viewport_never_merges() {
    let diagram = chip_diagram();
    for (i, zoom) in [2.0, 3.0, 4.0].into_iter().enumerate() {
        diagram.dispatch(&Action::viewport("root", Viewport::new(Point::ORIGIN, zoom), true));
        assert_eq!(diagram.dispatcher().undo_depth(), i + 1);
    }

    // a non-animated command after an animated top is pushed as well
    diagram.dispatch(&Action::viewport("root", Viewport::new(Point::ORIGIN, 5.0), false));
    assert_eq!(diagram.dispatcher().undo_depth(), 4);
}

#[test]
fn test_animated_undo_is_pending_until_frames_run() {
    let diagram = chip_diagram();
    let target = Viewport::new(Point::new(100.0, 40.0), 3.0);
    diagram.dispatch(&Action::viewport("root", target, true));
    assert_eq!(root_viewport(&diagram), Viewport::default());
    assert!(diagram.is_animating());

    diagram.run_frame(Duration::from_millis(0));
    diagram.run_frame(Duration::from_millis(125));
    let mid = root_viewport(&diagram);
    assert!((mid.zoom - 3.0f64.sqrt()).abs() < 1e-9);
    assert!(mid.scroll.almost_equals(&Point::new(50.0, 20.0), 1e-9));

    diagram.run_frame(Duration::from_millis(250));
    assert_eq!(root_viewport(&diagram), target);
    assert!(!diagram.is_animating());

    diagram.undo();
    assert_eq!(root_viewport(&diagram), target);
    diagram.run_frame(Duration::from_millis(300));
    diagram.run_frame(Duration::from_millis(600));
    assert_eq!(root_viewport(&diagram), Viewport::default());
}

#[test]
fn test_push_after_undo_truncates() {
    let diagram = chip_diagram();
    diagram.dispatch(&Action::viewport("root", Viewport::new(Point::ORIGIN, 2.0), true));
    diagram.dispatch(&Action::viewport("root", Viewport::new(Point::ORIGIN, 3.0), true));
    diagram.undo();
    assert!(diagram.can_redo());

    diagram.dispatch(&Action::viewport("root", Viewport::new(Point::ORIGIN, 9.0), true));
    assert!(!diagram.can_redo());
    assert_eq!(diagram.dispatcher().undo_depth(), 2);
}

#[test]
fn test_immediate_fit_merges_with_following_zoom() {
    let diagram = chip_diagram();
    diagram.dispatch(&Action::resize(vec![ElementResize {
        element_id: "core_0_0".into(),
        new_bounds: Bounds::new(0.0, 0.0, 100.0, 100.0),
    }]));

    diagram.dispatch(&Action::Fit(FitToScreenAction {
        element_id: "root".into(),
        element_ids: Vec::new(),
        padding: Some(0.0),
        animate: false,
    }));
    assert_eq!(root_viewport(&diagram).zoom, 6.0);

    let zoomed = Viewport::new(Point::new(10.0, 10.0), 3.0);
    diagram.dispatch(&Action::viewport("root", zoomed, false));
    assert_eq!(diagram.dispatcher().undo_depth(), 1);
    assert_eq!(root_viewport(&diagram), zoomed);

    diagram.undo();
    assert_eq!(root_viewport(&diagram), Viewport::default());
    diagram.redo();
    assert_eq!(root_viewport(&diagram), zoomed);
}

fn viewport_command(element_id: &str, zoom: f64, animate: bool) -> Box<dyn Command> {
    Box::new(ViewportCommand::new(ViewportAction {
        element_id: element_id.into(),
        new_viewport: Viewport::new(Point::ORIGIN, zoom),
        animate,
    }))
}

#[test]
fn test_batch_skips_missing_target_and_records_the_rest() {
    let diagram = chip_diagram();
    let context = diagram.dispatcher().context();
    let mut stack = CommandStack::new(0);

    stack.execute(
        vec![
            viewport_command("root", 2.0, false),
            viewport_command("ghost", 5.0, false),
            viewport_command("core_0_0", 5.0, false),
            viewport_command("root", 3.0, true),
        ],
        context,
    );
    assert_eq!(stack.undo_depth(), 2);
    assert_eq!(root_viewport(&diagram).zoom, 2.0);

    diagram.run_frame(Duration::from_millis(0));
    diagram.run_frame(Duration::from_millis(250));
    assert_eq!(root_viewport(&diagram).zoom, 3.0);

    stack.undo(context);
    diagram.run_frame(Duration::from_millis(300));
    diagram.run_frame(Duration::from_millis(550));
    assert_eq!(root_viewport(&diagram).zoom, 2.0);

    stack.undo(context);
    assert_eq!(root_viewport(&diagram), Viewport::default());
    assert!(!stack.can_undo());
}

#[derive(Debug, Clone)]
enum Op {
    Push(f64),
    Undo,
    Redo,
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0.1f64..10.0).prop_map(Op::Push),
        Just(Op::Undo),
        Just(Op::Redo),
    ]
}

proptest! {
    #[test]
    fn cursor_stays_within_history(ops in prop::collection::vec(op(), 0..40)) {
        let diagram = chip_diagram();
        let mut len = 0usize;
        let mut cursor = 0usize;

        for op in ops {
            match op {
                Op::Push(zoom) => {
                    diagram.dispatch(&Action::viewport("root", Viewport::new(Point::ORIGIN, zoom), true));
                    len = cursor + 1;
                    cursor += 1;
                }
                Op::Undo => {
                    diagram.undo();
                    cursor = cursor.saturating_sub(1);
                }
                Op::Redo => {
                    diagram.redo();
                    if cursor < len {
                        cursor += 1;
                    }
                }
            }
            let dispatcher = diagram.dispatcher();
            prop_assert_eq!(dispatcher.undo_depth(), cursor);
            prop_assert_eq!(dispatcher.undo_depth() + dispatcher.redo_depth(), len);
        }
    }

    #[test]
    fn viewport_round_trip(
        x in -1000.0f64..1000.0,
        y in -1000.0f64..1000.0,
        zoom in 0.01f64..100.0,
        start_zoom in 0.01f64..100.0,
    ) {
        let diagram = chip_diagram();
        let start = Viewport::new(Point::new(y, x), start_zoom);
        diagram.dispatch(&Action::viewport("root", start, false));
        diagram.dispatcher().clear_history();

        diagram.dispatch(&Action::viewport("root", Viewport::new(Point::new(x, y), zoom), false));
        diagram.undo();
        prop_assert_eq!(root_viewport(&diagram), start);
    }

    #[test]
    fn compatible_pair_grows_history_by_at_most_one(a in 0.1f64..10.0, b in 0.1f64..10.0) {
        let diagram = chip_diagram();
        diagram.dispatch(&Action::viewport("root", Viewport::new(Point::ORIGIN, a), false));
        diagram.dispatch(&Action::viewport("root", Viewport::new(Point::ORIGIN, b), false));
        prop_assert_eq!(diagram.dispatcher().undo_depth(), 1);
    }
}
