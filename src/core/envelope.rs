//! Decoding of a single CMS item across the two Strapi response conventions.
//!
//! Strapi v4 nests every field under `attributes` next to the `id`; v5 puts
//! the fields directly on the item. Callers read fields through [`Envelope`]
//! and never need to know which convention produced the item.

use crate::domain::model::ItemId;
use serde_json::{Map, Value};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Envelope<'a> {
    /// `{ "id": 1, "attributes": { ... } }`
    Legacy {
        root: &'a Map<String, Value>,
        attributes: &'a Map<String, Value>,
    },
    /// `{ "id": 1, "documentId": "...", ... }`
    Current(&'a Map<String, Value>),
}

impl<'a> Envelope<'a> {
    /// Returns `None` for anything that is not a JSON object.
    pub fn decode(item: &'a Value) -> Option<Self> {
        let root = item.as_object()?;
        match root.get("attributes") {
            Some(Value::Object(attributes)) => Some(Envelope::Legacy { root, attributes }),
            _ => Some(Envelope::Current(root)),
        }
    }

    pub fn convention(&self) -> &'static str {
        match self {
            Envelope::Legacy { .. } => "legacy",
            Envelope::Current(_) => "current",
        }
    }

    pub fn root(&self) -> &'a Map<String, Value> {
        match self {
            Envelope::Legacy { root, .. } => root,
            Envelope::Current(root) => root,
        }
    }

    pub fn fields(&self) -> &'a Map<String, Value> {
        match self {
            Envelope::Legacy { attributes, .. } => attributes,
            Envelope::Current(fields) => fields,
        }
    }

    /// Non-null field value.
    pub fn field(&self, key: &str) -> Option<&'a Value> {
        self.fields().get(key).filter(|v| !v.is_null())
    }

    /// Non-empty text field. Numbers are accepted since phone numbers and the
    /// like are sometimes stored as numeric fields.
    pub fn text(&self, key: &str) -> Option<String> {
        scalar_text(self.field(key)?)
    }

    /// `id`, then `documentId`, then a generated id so records stay addressable.
    pub fn item_id(&self) -> ItemId {
        let root = self.root();
        if let Some(id) = root.get("id") {
            if let Some(n) = id.as_i64() {
                return ItemId::Number(n);
            }
            if let Some(s) = id.as_str().filter(|s| !s.is_empty()) {
                return ItemId::Text(s.to_string());
            }
        }

        let document_id = root
            .get("documentId")
            .or_else(|| self.fields().get("documentId"))
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty());

        match document_id {
            Some(id) => ItemId::Text(id.to_string()),
            None => {
                let generated = uuid::Uuid::new_v4().to_string();
                tracing::debug!("CMS item has no id or documentId, generated {}", generated);
                ItemId::Text(generated)
            }
        }
    }

    /// Per-record locale tag, when the CMS populated one.
    pub fn locale_tag(&self) -> Option<&'a str> {
        self.fields()
            .get("locale")
            .or_else(|| self.root().get("locale"))
            .and_then(Value::as_str)
            .filter(|s| !s.trim().is_empty())
    }
}

pub(crate) fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
