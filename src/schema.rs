//! Item shapes and request body validation.
//!
//! Create and update bodies share one shape: `title` is required, `description`
//! is optional and stays `null` when omitted. Update is a full replacement, so
//! omitting `description` on PUT clears it.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use utoipa::ToSchema;

/// Fields a client supplies for an item.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ItemPayload {
    #[schema(example = "Buy milk")]
    pub title: String,
    #[schema(example = "2%")]
    pub description: Option<String>,
}

pub type ItemCreate = ItemPayload;
pub type ItemUpdate = ItemPayload;

/// A stored item as returned to callers.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Item {
    #[schema(example = 1)]
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
}

impl Item {
    pub fn from_payload(id: i64, payload: ItemPayload) -> Self {
        Item {
            id,
            title: payload.title,
            description: payload.description,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, ToSchema)]
pub struct FieldError {
    /// Where the problem is: a body field name, `body`, or `path.<param>`.
    pub loc: String,
    pub msg: String,
}

impl FieldError {
    pub fn new(loc: impl Into<String>, msg: impl Into<String>) -> Self {
        FieldError {
            loc: loc.into(),
            msg: msg.into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(pub Vec<FieldError>);

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(|e| format!("{}: {}", e.loc, e.msg)).collect();
        write!(f, "{}", parts.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

/// Check a create/update body and extract its fields. Reports every bad field, not just the first.
pub fn validate_item_payload(body: &Value) -> Result<ItemPayload, ValidationErrors> {
    let obj = match body {
        Value::Object(m) => m,
        _ => {
            return Err(ValidationErrors(vec![FieldError::new(
                "body",
                "must be a JSON object",
            )]))
        }
    };

    let mut errors = Vec::new();

    let title = match obj.get("title") {
        None | Some(Value::Null) => {
            errors.push(FieldError::new("title", "field required"));
            None
        }
        Some(Value::String(s)) => Some(s.clone()),
        Some(other) => {
            errors.push(FieldError::new(
                "title",
                format!("must be a string, got {}", json_kind(other)),
            ));
            None
        }
    };

    let description = match obj.get("description") {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s.clone()),
        Some(other) => {
            errors.push(FieldError::new(
                "description",
                format!("must be a string or null, got {}", json_kind(other)),
            ));
            None
        }
    };

    match title {
        Some(title) if errors.is_empty() => Ok(ItemPayload { title, description }),
        _ => Err(ValidationErrors(errors)),
    }
}

fn json_kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn title_only_leaves_description_null() {
        let p = validate_item_payload(&json!({"title": "Buy milk"})).unwrap();
        assert_eq!(p.title, "Buy milk");
        assert_eq!(p.description, None);
    }

    #[test]
    fn explicit_null_description_is_accepted() {
        let p = validate_item_payload(&json!({"title": "a", "description": null})).unwrap();
        assert_eq!(p.description, None);
    }

    #[test]
    fn empty_description_is_not_coerced_to_null() {
        let p = validate_item_payload(&json!({"title": "a", "description": ""})).unwrap();
        assert_eq!(p.description, Some(String::new()));
    }

    #[test]
    fn missing_title_is_rejected() {
        let err = validate_item_payload(&json!({"description": "x"})).unwrap_err();
        assert_eq!(err.0, vec![FieldError::new("title", "field required")]);
    }

    #[test]
    fn null_title_is_rejected() {
        let err = validate_item_payload(&json!({"title": null})).unwrap_err();
        assert_eq!(err.0[0].loc, "title");
    }

    #[test]
    fn wrong_types_are_all_reported() {
        let err = validate_item_payload(&json!({"title": 5, "description": [1]})).unwrap_err();
        let locs: Vec<&str> = err.0.iter().map(|e| e.loc.as_str()).collect();
        assert_eq!(locs, vec!["title", "description"]);
        assert!(err.0[0].msg.contains("number"));
        assert!(err.0[1].msg.contains("array"));
    }

    #[test]
    fn non_object_body_is_rejected() {
        let err = validate_item_payload(&json!(["title"])).unwrap_err();
        assert_eq!(err.0[0].loc, "body");
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let p = validate_item_payload(&json!({"title": "a", "priority": 3})).unwrap();
        assert_eq!(p, ItemPayload { title: "a".into(), description: None });
    }

    #[test]
    fn item_serializes_absent_description_as_null() {
        let item = Item::from_payload(1, ItemPayload { title: "Buy milk".into(), description: None });
        assert_eq!(
            serde_json::to_value(&item).unwrap(),
            json!({"id": 1, "title": "Buy milk", "description": null})
        );
    }
}
