use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// Free-form document fields as submitted by the client.
pub type Fields = Map<String, Value>;

/// Storage-native identifier key. Never accepted from clients.
pub const ID_FIELD: &str = "_id";

/// A stored document: the client's fields plus the storage identifier,
/// rendered as a single flat JSON object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(rename = "_id")]
    pub id: Uuid,
    #[serde(flatten)]
    pub fields: Fields,
}

impl Document {
    pub fn new(id: Uuid, doc: Value) -> Self {
        let fields = match doc {
            Value::Object(map) => map,
            _ => Fields::new(),
        };
        Self { id, fields }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.fields.get(key).and_then(Value::as_str)
    }
}

/// Removes keys the server owns from a client payload.
pub fn strip_reserved(fields: &mut Fields, reserved: &[&str]) {
    fields.remove(ID_FIELD);
    for key in reserved {
        fields.remove(*key);
    }
}

/// Accepts a JSON number or a numeric string and returns it as a JSON number.
pub fn coerce_number(value: &Value) -> Option<Value> {
    match value {
        Value::Number(_) => Some(value.clone()),
        Value::String(s) => {
            let s = s.trim();
            if let Ok(i) = s.parse::<i64>() {
                Some(Value::from(i))
            } else {
                s.parse::<f64>()
                    .ok()
                    .filter(|f| f.is_finite())
                    .map(Value::from)
            }
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn document_serializes_flat_with_id() {
        let id = Uuid::new_v4();
        let doc = Document::new(id, json!({"email": "a@b.com", "name": "A"}));
        let value = serde_json::to_value(&doc).unwrap();

        assert_eq!(value["_id"], json!(id.to_string()));
        assert_eq!(value["email"], json!("a@b.com"));
        assert_eq!(value["name"], json!("A"));
        assert!(value.get("fields").is_none());
    }

    #[test]
    fn non_object_document_becomes_empty() {
        let doc = Document::new(Uuid::new_v4(), json!([1, 2, 3]));
        assert!(doc.fields.is_empty());
    }

    #[test]
    fn strip_reserved_always_drops_id() {
        let mut fields = json!({"_id": "x", "biodataId": 4, "age": 30})
            .as_object()
            .cloned()
            .unwrap();
        strip_reserved(&mut fields, &["biodataId"]);

        assert_eq!(fields.len(), 1);
        assert_eq!(fields["age"], json!(30));
    }

    #[test]
    fn coerce_number_handles_strings_and_numbers() {
        assert_eq!(coerce_number(&json!(27)), Some(json!(27)));
        assert_eq!(coerce_number(&json!(" 31 ")), Some(json!(31)));
        assert_eq!(coerce_number(&json!("12.5")), Some(json!(12.5)));
        assert_eq!(coerce_number(&json!("thirty")), None);
        assert_eq!(coerce_number(&json!(true)), None);
        assert_eq!(coerce_number(&json!("NaN")), None);
    }
}
