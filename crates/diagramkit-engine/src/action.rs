//! Actions: immutable descriptions of intended changes.
//!
//! Known kinds form a closed enum. Any other kind decodes into
//! [`Action::Custom`] and is routed through the handler registry like the
//! built-in kinds, so an unregistered kind simply has no effect.
//!
//! Wire format is a JSON object with a string `kind` and camelCase payload
//! fields, e.g. `{"kind":"viewport","elementId":"root","newViewport":{...},"animate":false}`.

use diagramkit_core::{Bounds, CodecError};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::model::{ElementId, Viewport};

/// Reserved kind: undo the last history entry.
pub const UNDO_KIND: &str = "undo";
/// Reserved kind: redo the next history entry.
pub const REDO_KIND: &str = "redo";

/// New bounds for one element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementResize {
    pub element_id: ElementId,
    pub new_bounds: Bounds,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResizeAction {
    pub resizes: Vec<ElementResize>,
}

impl ResizeAction {
    pub const KIND: &'static str = "resize";
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewportAction {
    pub element_id: ElementId,
    pub new_viewport: Viewport,
    #[serde(default)]
    pub animate: bool,
}

impl ViewportAction {
    pub const KIND: &'static str = "viewport";
}

/// Fit the given elements into the visible area of a viewport element.
///
/// An empty `element_ids` list fits every sizeable descendant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FitToScreenAction {
    pub element_id: ElementId,
    #[serde(default)]
    pub element_ids: Vec<ElementId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub padding: Option<f64>,
    #[serde(default = "default_true")]
    pub animate: bool,
}

impl FitToScreenAction {
    pub const KIND: &'static str = "fit";
}

fn default_true() -> bool {
    true
}

/// An action whose kind is not built in. `payload` holds every field except `kind`.
#[derive(Debug, Clone, PartialEq)]
pub struct CustomAction {
    pub kind: String,
    pub payload: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Action {
    Undo,
    Redo,
    Resize(ResizeAction),
    Viewport(ViewportAction),
    Fit(FitToScreenAction),
    #[serde(skip)]
    Custom(CustomAction),
}

impl Action {
    /// Kinds decoded into dedicated variants.
    pub const BUILT_IN_KINDS: [&'static str; 5] = [
        UNDO_KIND,
        REDO_KIND,
        ResizeAction::KIND,
        ViewportAction::KIND,
        FitToScreenAction::KIND,
    ];

    /// The action's `kind` tag.
    pub fn kind(&self) -> &str {
        match self {
            Action::Undo => UNDO_KIND,
            Action::Redo => REDO_KIND,
            Action::Resize(_) => ResizeAction::KIND,
            Action::Viewport(_) => ViewportAction::KIND,
            Action::Fit(_) => FitToScreenAction::KIND,
            Action::Custom(custom) => &custom.kind,
        }
    }

    pub fn viewport(element_id: impl Into<ElementId>, new_viewport: Viewport, animate: bool) -> Self {
        Action::Viewport(ViewportAction {
            element_id: element_id.into(),
            new_viewport,
            animate,
        })
    }

    pub fn resize(resizes: Vec<ElementResize>) -> Self {
        Action::Resize(ResizeAction { resizes })
    }

    pub fn custom(kind: impl Into<String>, payload: Value) -> Self {
        Action::Custom(CustomAction {
            kind: kind.into(),
            payload,
        })
    }

    /// Decodes an action from its JSON wire form.
    pub fn from_json(text: &str) -> Result<Self, CodecError> {
        let value: Value = serde_json::from_str(text)?;
        Self::from_value(value)
    }

    /// Decodes an action from an already parsed JSON value.
    pub fn from_value(value: Value) -> Result<Self, CodecError> {
        let kind = value
            .get("kind")
            .and_then(Value::as_str)
            .ok_or(CodecError::MissingKind)?
            .to_string();

        if Self::BUILT_IN_KINDS.contains(&kind.as_str()) {
            return Ok(serde_json::from_value(value)?);
        }

        let payload = match value {
            Value::Object(mut fields) => {
                fields.remove("kind");
                Value::Object(fields)
            }
            _ => Value::Object(Map::new()),
        };
        Ok(Action::Custom(CustomAction { kind, payload }))
    }

    /// Encodes the action into its JSON wire form.
    pub fn to_value(&self) -> Result<Value, CodecError> {
        match self {
            Action::Custom(custom) => {
                let mut fields = match &custom.payload {
                    Value::Object(fields) => fields.clone(),
                    Value::Null => Map::new(),
                    other => {
                        let mut fields = Map::new();
                        fields.insert("payload".to_string(), other.clone());
                        fields
                    }
                };
                fields.insert("kind".to_string(), Value::String(custom.kind.clone()));
                Ok(Value::Object(fields))
            }
            _ => Ok(serde_json::to_value(self)?),
        }
    }

    pub fn to_json(&self) -> Result<String, CodecError> {
        Ok(serde_json::to_string(&self.to_value()?)?)
    }
}
