use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::normalize::{normalize_price, normalize_rating};

/// A price or rating field exactly as the upstream service sent it.
///
/// Resolution into a number happens in one place, the normalizer; callers
/// never probe the shape themselves.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum RawField {
    /// `null` or missing key
    #[default]
    Absent,
    /// A string: JSON-encoded object, free text, or a placeholder marker
    Text(String),
    /// An already structured object
    Structured(Map<String, Value>),
    /// Numbers, booleans, arrays
    Unsupported(Value),
}

impl RawField {
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Null => RawField::Absent,
            Value::String(text) => RawField::Text(text),
            Value::Object(map) => RawField::Structured(map),
            other => RawField::Unsupported(other),
        }
    }

    pub fn to_value(&self) -> Value {
        match self {
            RawField::Absent => Value::Null,
            RawField::Text(text) => Value::String(text.clone()),
            RawField::Structured(map) => Value::Object(map.clone()),
            RawField::Unsupported(value) => value.clone(),
        }
    }

    /// True for values that carry nothing at all (missing, empty text, `false`, `0`)
    pub fn is_blank(&self) -> bool {
        match self {
            RawField::Absent => true,
            RawField::Text(text) => text.is_empty(),
            RawField::Structured(_) => false,
            RawField::Unsupported(Value::Bool(b)) => !b,
            RawField::Unsupported(Value::Number(n)) => n.as_f64() == Some(0.0),
            RawField::Unsupported(_) => false,
        }
    }
}

impl Serialize for RawField {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.to_value().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for RawField {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        Value::deserialize(deserializer).map(RawField::from_value)
    }
}

/// One laptop listing.
///
/// Decoding never fails: fields that are missing or of the wrong type come
/// out as `None` / [`RawField::Absent`]. Both the service's lowercase keys
/// and the scraped dataset's title-case columns are accepted.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Record {
    /// Stable identity (`laptop_id` upstream). Integer ids are kept in decimal form.
    #[serde(rename = "laptop_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub processor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memory: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display: Option<String>,
    pub price_details: RawField,
    pub review_details: RawField,
}

impl Record {
    /// Decode a record from whatever JSON the service returned
    pub fn from_value(value: &Value) -> Self {
        let Some(obj) = value.as_object() else {
            return Record::default();
        };

        Record {
            id: identity(obj),
            brand: text_field(obj, &["brand", "Brand"]),
            model: text_field(obj, &["model", "Model"]),
            processor: text_field(obj, &["processor", "Processor"]),
            memory: text_field(obj, &["memory", "Memory (RAM)", "Memory"]),
            storage: text_field(obj, &["storage", "Storage"]),
            display: text_field(obj, &["display", "Display"]),
            price_details: raw_field(obj, &["price_details", "Price Details"]),
            review_details: raw_field(obj, &["review_details", "Review Details"]),
        }
    }

    /// Canonical price, 0 when unusable. Computed on every call.
    pub fn price(&self) -> f64 {
        normalize_price(&self.price_details)
    }

    /// Canonical rating in [0, 5], 0 when unusable. Computed on every call.
    pub fn rating(&self) -> f64 {
        normalize_rating(&self.review_details)
    }

    /// "Brand Model" for headings
    pub fn label(&self) -> String {
        let parts: Vec<&str> = [self.brand.as_deref(), self.model.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect();

        if parts.is_empty() {
            "Unknown laptop".to_string()
        } else {
            parts.join(" ")
        }
    }
}

impl<'de> Deserialize<'de> for Record {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        Value::deserialize(deserializer).map(|value| Record::from_value(&value))
    }
}

fn identity(obj: &Map<String, Value>) -> Option<String> {
    ["laptop_id", "id"].iter().find_map(|key| match obj.get(*key)? {
        Value::Number(n) => Some(match (n.as_u64(), n.as_i64()) {
            (Some(u), _) => u.to_string(),
            (None, Some(i)) => i.to_string(),
            _ => n.to_string(),
        }),
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        _ => None,
    })
}

fn text_field(obj: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter()
        .find_map(|key| obj.get(*key).and_then(Value::as_str))
        .map(str::to_string)
}

fn raw_field(obj: &Map<String, Value>, keys: &[&str]) -> RawField {
    keys.iter()
        .filter_map(|key| obj.get(*key))
        .map(|value| RawField::from_value(value.clone()))
        .find(|field| !field.is_blank())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_service_shape() {
        let record = Record::from_value(&json!({
            "laptop_id": 7,
            "brand": "HP",
            "model": "ProBook 450",
            "processor": "Intel Core i5",
            "price_details": {"Current Price": "$899.99"},
            "review_details": "4.1 out of 5 stars, 12 reviews."
        }));

        assert_eq!(record.id.as_deref(), Some("7"));
        assert_eq!(record.brand.as_deref(), Some("HP"));
        assert_eq!(record.label(), "HP ProBook 450");
        assert_eq!(record.price(), 899.99);
        assert_eq!(record.rating(), 4.1);
    }

    #[test]
    fn test_decode_title_case_columns() {
        let record = Record::from_value(&json!({
            "Brand": "Lenovo",
            "Model": "ThinkPad E14",
            "Memory (RAM)": "8GB DDR4",
            "Review Details": {"Overall Rating": "4.5/5 (116 reviews)"}
        }));

        assert_eq!(record.id, None);
        assert_eq!(record.memory.as_deref(), Some("8GB DDR4"));
        assert_eq!(record.rating(), 4.5);
    }

    #[test]
    fn test_review_details_falls_back_when_blank() {
        let record = Record::from_value(&json!({
            "laptop_id": "a1",
            "review_details": "",
            "Review Details": "3.9 out of 5 stars"
        }));

        assert_eq!(record.rating(), 3.9);
    }

    #[test]
    fn test_type_mismatches_become_absent() {
        let record = Record::from_value(&json!({
            "laptop_id": [1, 2],
            "brand": 42,
            "price_details": null
        }));

        assert_eq!(record.id, None);
        assert_eq!(record.brand, None);
        assert_eq!(record.price_details, RawField::Absent);
        assert_eq!(record.label(), "Unknown laptop");
    }

    #[test]
    fn test_non_object_decodes_to_empty_record() {
        assert_eq!(Record::from_value(&json!("garbage")), Record::default());
    }

    #[test]
    fn test_raw_fields_survive_serialization() {
        let value = json!({
            "laptop_id": 3,
            "price_details": "{\"Current Price\": \"$1,099.00\"}",
            "review_details": {"Overall Rating": "4.0/5"}
        });
        let record: Record = serde_json::from_value(value).unwrap();
        let out = serde_json::to_value(&record).unwrap();

        assert_eq!(out["laptop_id"], json!("3"));
        assert_eq!(out["price_details"], json!("{\"Current Price\": \"$1,099.00\"}"));
        assert_eq!(out["review_details"]["Overall Rating"], json!("4.0/5"));
    }
}
