use diagramkit_engine::{Bounds, Diagram, DiagramModel, Element, EngineConfig, Viewport};

/// A processor viewport with two auto-sized cores and a plain label.
pub fn chip_model() -> DiagramModel {
    let root = Element::new("root", "processor")
        .with_viewport(Viewport::default())
        .with_bounds(Bounds::new(0.0, 0.0, 800.0, 600.0), false);
    let mut model = DiagramModel::new(root);
    model
        .add_child(
            "root",
            Element::new("core_0_0", "core").with_bounds(Bounds::new(0.0, 0.0, 0.0, 0.0), true),
        )
        .unwrap();
    model
        .add_child(
            "root",
            Element::new("core_0_1", "core").with_bounds(Bounds::new(60.0, 0.0, 0.0, 0.0), true),
        )
        .unwrap();
    model
        .add_child("core_0_0", Element::new("label", "label"))
        .unwrap();
    model
}

pub fn chip_diagram() -> Diagram {
    Diagram::new(chip_model(), EngineConfig::default())
}

pub fn root_viewport(diagram: &Diagram) -> Viewport {
    *diagram.model().root().viewport().unwrap()
}
