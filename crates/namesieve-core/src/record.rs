//! Records indexed by name

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// An externally supplied entity searchable by its name.
///
/// Only `name` is interpreted; `id` and any additional fields are carried
/// through the index and the cache untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub name: String,
    pub id: Value,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Record {
    pub fn new(name: impl Into<String>, id: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            id: id.into(),
            extra: Map::new(),
        }
    }

    /// Attach an extra pass-through field.
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn extra_fields_survive_serde() {
        let raw = json!({"name": "Стол", "id": 7, "price": 1200, "tags": ["wood"]});
        let record: Record = serde_json::from_value(raw.clone()).unwrap();

        assert_eq!(record.name, "Стол");
        assert_eq!(record.id, json!(7));
        assert_eq!(record.extra.get("price"), Some(&json!(1200)));
        assert_eq!(serde_json::to_value(&record).unwrap(), raw);
    }

    #[test]
    fn id_is_opaque() {
        let record: Record = serde_json::from_value(json!({"name": "a", "id": "SKU-1"})).unwrap();
        assert_eq!(record.id, json!("SKU-1"));
        assert!(record.extra.is_empty());
    }
}
