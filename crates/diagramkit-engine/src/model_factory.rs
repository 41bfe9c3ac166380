//! Builds a [`DiagramModel`] from a serialized element tree.
//!
//! Invalid elements never abort construction. An element that fails
//! validation is logged and created without capabilities. An element whose
//! id is already taken is logged and dropped together with its subtree.

use std::collections::HashMap;

use diagramkit_core::{Bounds, CodecError, ModelError, Point, Result};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::{Capability, DiagramModel, Element, Viewport};

/// Serialized form of an element and its children.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementSchema {
    #[serde(rename = "type")]
    pub element_type: String,
    #[serde(default)]
    pub id: String,
    /// Declared capabilities. Bounds imply `sizeable`, scroll or zoom imply `viewport`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub features: Vec<Capability>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bounds: Option<Bounds>,
    /// Defaults to true when no bounds are authored.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub autosize: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scroll: Option<Point>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zoom: Option<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ElementSchema>,
}

impl ElementSchema {
    fn declares(&self, capability: Capability) -> bool {
        if self.features.contains(&capability) {
            return true;
        }
        match capability {
            Capability::Sizeable => self.bounds.is_some(),
            Capability::Viewport => self.scroll.is_some() || self.zoom.is_some(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ModelFactory {
    /// child type -> element types allowed as its parent
    parent_rules: HashMap<String, Vec<String>>,
}

impl ModelFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts elements of `child_type` to parents of the given types.
    pub fn allow_parents<I, S>(mut self, child_type: &str, parent_types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.parent_rules.insert(
            child_type.to_string(),
            parent_types.into_iter().map(Into::into).collect(),
        );
        self
    }

    pub fn create_model_from_json(&self, text: &str) -> Result<DiagramModel> {
        let schema: ElementSchema = serde_json::from_str(text).map_err(CodecError::from)?;
        Ok(self.create_model(&schema))
    }

    pub fn create_model(&self, schema: &ElementSchema) -> DiagramModel {
        let root = self.create_or_default(schema, None);
        let root_id = root.id().to_string();
        let mut model = DiagramModel::new(root);
        for child in &schema.children {
            self.add_subtree(&mut model, &root_id, child);
        }
        model
    }

    /// Validates `schema` against `parent` and builds the element.
    pub fn create_element(
        &self,
        schema: &ElementSchema,
        parent: Option<&Element>,
    ) -> std::result::Result<Element, ModelError> {
        let id = Self::resolve_id(schema);
        if let (Some(parent), Some(allowed)) = (parent, self.parent_rules.get(&schema.element_type)) {
            if !allowed.iter().any(|t| t == parent.element_type()) {
                return Err(ModelError::InvalidParent {
                    parent: parent.id().to_string(),
                    child: id,
                    reason: format!(
                        "'{}' cannot contain '{}'",
                        parent.element_type(),
                        schema.element_type
                    ),
                });
            }
        }

        if schema.autosize.is_some() && !schema.declares(Capability::Sizeable) {
            return Err(ModelError::MissingCapability {
                id,
                capability: "sizeable".to_string(),
            });
        }

        let mut element = Element::new(id.clone(), schema.element_type.clone());

        if schema.declares(Capability::Sizeable) {
            let bounds = schema.bounds.unwrap_or(Bounds::EMPTY);
            if !bounds.is_valid() {
                return Err(ModelError::CoordinatesOutOfBounds {
                    id,
                    reason: format!("invalid bounds {}", bounds),
                });
            }
            let autosize = schema.autosize.unwrap_or(schema.bounds.is_none());
            element = element.with_bounds(bounds, autosize);
        }

        if schema.declares(Capability::Viewport) {
            let defaults = Viewport::default();
            let viewport = Viewport::new(
                schema.scroll.unwrap_or(defaults.scroll),
                schema.zoom.unwrap_or(defaults.zoom),
            );
            if !(viewport.zoom.is_finite() && viewport.zoom > 0.0) {
                return Err(ModelError::CoordinatesOutOfBounds {
                    id,
                    reason: format!("zoom must be positive, got {}", viewport.zoom),
                });
            }
            if !(viewport.scroll.x.is_finite() && viewport.scroll.y.is_finite()) {
                return Err(ModelError::CoordinatesOutOfBounds {
                    id,
                    reason: "scroll is not finite".to_string(),
                });
            }
            element = element.with_viewport(viewport);
        }

        Ok(element)
    }

    fn create_or_default(&self, schema: &ElementSchema, parent: Option<&Element>) -> Element {
        match self.create_element(schema, parent) {
            Ok(element) => element,
            Err(err) => {
                tracing::error!("{}", err);
                let id = match &err {
                    ModelError::InvalidParent { child, .. } => child.clone(),
                    ModelError::CoordinatesOutOfBounds { id, .. }
                    | ModelError::MissingCapability { id, .. } => id.clone(),
                    _ => Self::resolve_id(schema),
                };
                Element::new(id, schema.element_type.clone())
            }
        }
    }

    fn add_subtree(&self, model: &mut DiagramModel, parent_id: &str, schema: &ElementSchema) {
        let element = self.create_or_default(schema, model.get_by_id(parent_id));
        let id = element.id().to_string();
        if let Err(err) = model.add_child(parent_id, element) {
            tracing::error!("{}", err);
            return;
        }
        for child in &schema.children {
            self.add_subtree(model, &id, child);
        }
    }

    fn resolve_id(schema: &ElementSchema) -> String {
        if schema.id.is_empty() {
            format!("{}_{}", schema.element_type, Uuid::new_v4().simple())
        } else {
            schema.id.clone()
        }
    }
}
