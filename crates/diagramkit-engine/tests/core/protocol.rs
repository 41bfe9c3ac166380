use std::thread;

use diagramkit_engine::{ActionMessageHandler, Point};
use std::sync::Arc;

use crate::support::{chip_diagram, root_viewport};

#[test]
fn test_messages_from_transport_thread_reach_dispatcher() {
    let handler = Arc::new(ActionMessageHandler::new());
    let (_, inbox) = handler.inbox();

    let transport = handler.clone();
    thread::spawn(move || {
        transport.on_message(
            r#"{"kind":"viewport","elementId":"root",
                "newViewport":{"scroll":{"x":10,"y":5},"zoom":2},"animate":false}"#,
        );
        transport.on_message(r#"{"kind":"bogus-json"#);
        transport.on_message(r#"{"kind":"undo"}"#);
    })
    .join()
    .unwrap();

    let actions = inbox.drain();
    assert_eq!(actions.len(), 2);

    let diagram = chip_diagram();
    diagram.dispatch_all(&actions[..1]);
    assert_eq!(root_viewport(&diagram).scroll, Point::new(10.0, 5.0));
    diagram.dispatch_all(&actions[1..]);
    assert_eq!(root_viewport(&diagram).zoom, 1.0);
}

#[test]
fn test_encode_decode_preserves_action() {
    let handler = ActionMessageHandler::new();
    let (_, inbox) = handler.inbox();
    let original = diagramkit_engine::Action::viewport(
        "root",
        diagramkit_engine::Viewport::new(Point::new(1.5, -2.0), 0.75),
        true,
    );
    let text = handler.encode(&original).unwrap();
    assert!(handler.on_message(&text));
    assert_eq!(inbox.drain(), vec![original]);
}
