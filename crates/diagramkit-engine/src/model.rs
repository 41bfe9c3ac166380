//! Diagram model: an arena of elements addressed by id.
//!
//! Parent/child relations are stored as ids, so commands and animations
//! resolve their targets by looking them up in the current model rather than
//! holding references across frames.
//!
//! Capabilities are declared per element. An element only carries viewport
//! state (`scroll`, `zoom`) when it declares [`Capability::Viewport`], and
//! only carries `bounds`/`autosize` when it declares [`Capability::Sizeable`].

use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt;

use diagramkit_core::{Bounds, ModelError, Point};
use serde::{Deserialize, Serialize};

/// Identifier of a model element.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(String);

impl ElementId {
    /// Creates an id from any string-like value.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for ElementId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ElementId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for ElementId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Capabilities an element may declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Capability {
    /// The element is scrollable and zoomable.
    Viewport,
    /// The element has bounds that may be derived from rendered geometry.
    Sizeable,
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Viewport => write!(f, "viewport"),
            Self::Sizeable => write!(f, "sizeable"),
        }
    }
}

/// Pan/zoom state of a viewport element.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub scroll: Point,
    pub zoom: f64,
}

impl Viewport {
    /// Creates a new viewport state.
    pub fn new(scroll: Point, zoom: f64) -> Self {
        Self { scroll, zoom }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            scroll: Point::ORIGIN,
            zoom: 1.0,
        }
    }
}

impl fmt::Display for Viewport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Zoom: {:.3}x | Scroll: ({:.1}, {:.1})",
            self.zoom, self.scroll.x, self.scroll.y
        )
    }
}

/// Bounds of a sizeable element plus its autosize flag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sizing {
    pub bounds: Bounds,
    /// Bounds must be re-derived from rendered geometry.
    pub autosize: bool,
}

/// A node of the diagram model.
#[derive(Debug, Clone)]
pub struct Element {
    id: ElementId,
    element_type: String,
    parent: Option<ElementId>,
    children: Vec<ElementId>,
    viewport: Option<Viewport>,
    sizing: Option<Sizing>,
}

impl Element {
    /// Creates a plain element without capabilities.
    pub fn new(id: impl Into<ElementId>, element_type: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            element_type: element_type.into(),
            parent: None,
            children: Vec::new(),
            viewport: None,
            sizing: None,
        }
    }

    /// Declares the viewport capability with the given initial state.
    pub fn with_viewport(mut self, viewport: Viewport) -> Self {
        self.viewport = Some(viewport);
        self
    }

    /// Declares the sizeable capability with the given initial bounds.
    pub fn with_bounds(mut self, bounds: Bounds, autosize: bool) -> Self {
        self.sizing = Some(Sizing { bounds, autosize });
        self
    }

    pub fn id(&self) -> &ElementId {
        &self.id
    }

    pub fn element_type(&self) -> &str {
        &self.element_type
    }

    pub fn parent(&self) -> Option<&ElementId> {
        self.parent.as_ref()
    }

    pub fn children(&self) -> &[ElementId] {
        &self.children
    }

    /// Whether the element declares `capability`.
    pub fn has_capability(&self, capability: Capability) -> bool {
        match capability {
            Capability::Viewport => self.viewport.is_some(),
            Capability::Sizeable => self.sizing.is_some(),
        }
    }

    /// All declared capabilities.
    pub fn capabilities(&self) -> Vec<Capability> {
        [Capability::Viewport, Capability::Sizeable]
            .into_iter()
            .filter(|c| self.has_capability(*c))
            .collect()
    }

    pub fn is_viewport(&self) -> bool {
        self.has_capability(Capability::Viewport)
    }

    pub fn is_sizeable(&self) -> bool {
        self.has_capability(Capability::Sizeable)
    }

    pub fn viewport(&self) -> Option<&Viewport> {
        self.viewport.as_ref()
    }

    /// Replaces the viewport state. Returns false if the element is not a viewport.
    pub fn set_viewport(&mut self, viewport: Viewport) -> bool {
        match self.viewport.as_mut() {
            Some(current) => {
                *current = viewport;
                true
            }
            None => false,
        }
    }

    pub fn sizing(&self) -> Option<&Sizing> {
        self.sizing.as_ref()
    }

    pub fn bounds(&self) -> Option<Bounds> {
        self.sizing.map(|s| s.bounds)
    }

    /// The autosize flag; always false for elements that are not sizeable.
    pub fn autosize(&self) -> bool {
        self.sizing.is_some_and(|s| s.autosize)
    }

    /// Replaces the bounds. Returns false if the element is not sizeable.
    pub fn set_bounds(&mut self, bounds: Bounds) -> bool {
        match self.sizing.as_mut() {
            Some(sizing) => {
                sizing.bounds = bounds;
                true
            }
            None => false,
        }
    }

    /// Sets the autosize flag. Returns false if the element is not sizeable.
    pub fn set_autosize(&mut self, autosize: bool) -> bool {
        match self.sizing.as_mut() {
            Some(sizing) => {
                sizing.autosize = autosize;
                true
            }
            None => false,
        }
    }
}

/// The element arena with a designated root.
#[derive(Debug, Clone)]
pub struct DiagramModel {
    root: ElementId,
    elements: HashMap<ElementId, Element>,
}

impl DiagramModel {
    /// Creates a model containing only `root`.
    pub fn new(mut root: Element) -> Self {
        root.parent = None;
        root.children.clear();
        let id = root.id.clone();
        let mut elements = HashMap::new();
        elements.insert(id.clone(), root);
        Self { root: id, elements }
    }

    pub fn root_id(&self) -> &ElementId {
        &self.root
    }

    pub fn root(&self) -> &Element {
        &self.elements[&self.root]
    }

    /// Index lookup used by commands to resolve their targets.
    pub fn get_by_id(&self, id: &str) -> Option<&Element> {
        self.elements.get(id)
    }

    pub fn get_by_id_mut(&mut self, id: &str) -> Option<&mut Element> {
        self.elements.get_mut(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.elements.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Attaches `child` (and only `child`) under `parent`.
    pub fn add_child(&mut self, parent: &str, mut child: Element) -> Result<(), ModelError> {
        if self.elements.contains_key(child.id.as_str()) {
            return Err(ModelError::DuplicateId {
                id: child.id.to_string(),
            });
        }
        let Some(parent_element) = self.elements.get_mut(parent) else {
            return Err(ModelError::ElementNotFound {
                id: parent.to_string(),
            });
        };
        parent_element.children.push(child.id.clone());
        child.parent = Some(parent_element.id.clone());
        child.children.clear();
        self.elements.insert(child.id.clone(), child);
        Ok(())
    }

    /// The parent of `id`, if both exist.
    pub fn parent_of(&self, id: &str) -> Option<&Element> {
        self.elements
            .get(id)
            .and_then(|e| e.parent.as_ref())
            .and_then(|p| self.elements.get(p.as_str()))
    }

    /// Walks from `id` (inclusive) towards the root and returns the first
    /// element matching `predicate`.
    pub fn find_ancestor<P>(&self, id: &str, predicate: P) -> Option<&Element>
    where
        P: Fn(&Element) -> bool,
    {
        let mut current = self.elements.get(id);
        while let Some(element) = current {
            if predicate(element) {
                return Some(element);
            }
            current = element
                .parent
                .as_ref()
                .and_then(|p| self.elements.get(p.as_str()));
        }
        None
    }

    /// Depth-first traversal from the root, parents before children.
    pub fn iter_depth_first(&self) -> Vec<&Element> {
        let mut out = Vec::with_capacity(self.elements.len());
        let mut stack = vec![&self.root];
        while let Some(id) = stack.pop() {
            if let Some(element) = self.elements.get(id.as_str()) {
                out.push(element);
                stack.extend(element.children.iter().rev());
            }
        }
        out
    }

    /// Descendants of `id`, excluding `id` itself.
    pub fn descendants(&self, id: &str) -> Vec<&Element> {
        let mut out = Vec::new();
        let Some(start) = self.elements.get(id) else {
            return out;
        };
        let mut stack: Vec<&ElementId> = start.children.iter().rev().collect();
        while let Some(child) = stack.pop() {
            if let Some(element) = self.elements.get(child.as_str()) {
                out.push(element);
                stack.extend(element.children.iter().rev());
            }
        }
        out
    }
}
