//! Lenient field decoders for loosely typed backend payloads.
//!
//! Used with `#[serde(default, deserialize_with = "...")]`. Each decoder
//! accepts any JSON value and keeps what it can: a field of the wrong type
//! becomes absent instead of failing the whole payload.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::collections::BTreeMap;

/// Reads a scalar as text. Numbers and booleans are stringified.
pub fn value_to_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Reads a number, also from numeric strings.
pub fn value_to_number(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    number.is_finite().then_some(number)
}

/// Reads a non-negative integer count. Fractional values are rounded.
pub fn value_to_count(value: &Value) -> Option<u64> {
    if let Some(n) = value.as_u64() {
        return Some(n);
    }
    let number = value_to_number(value)?;
    (number >= 0.0).then(|| number.round() as u64)
}

pub fn text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(value_to_text))
}

pub fn number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(value_to_number))
}

pub fn count<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(value_to_count))
}

/// Reads a boolean. Any other JSON type is absent.
pub fn flag<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| v.as_bool()))
}

/// Decodes a nested object; anything else is absent.
pub fn record<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(value @ Value::Object(_)) => serde_json::from_value(value).ok(),
        _ => None,
    })
}

/// Decodes an array element by element, dropping elements that do not fit.
pub fn list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    let Some(Value::Array(items)) = value else {
        return Ok(Vec::new());
    };

    Ok(items
        .into_iter()
        .filter_map(|item| match serde_json::from_value(item) {
            Ok(decoded) => Some(decoded),
            Err(err) => {
                tracing::warn!("Dropping malformed list item: {}", err);
                None
            }
        })
        .collect())
}

/// Decodes an array of scalars as text.
pub fn text_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    let Some(Value::Array(items)) = value else {
        return Ok(Vec::new());
    };
    Ok(items.iter().filter_map(value_to_text).collect())
}

/// Decodes an object whose values are records, keyed by name.
pub fn record_map<'de, D, T>(deserializer: D) -> Result<BTreeMap<String, T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    let Some(Value::Object(entries)) = value else {
        return Ok(BTreeMap::new());
    };

    Ok(entries
        .into_iter()
        .filter_map(|(key, value)| match value {
            Value::Object(_) => serde_json::from_value(value).ok().map(|v| (key, v)),
            _ => None,
        })
        .collect())
}

/// Decodes an object whose values are numbers, keyed by name.
pub fn number_map<'de, D>(deserializer: D) -> Result<BTreeMap<String, f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    let Some(Value::Object(entries)) = value else {
        return Ok(BTreeMap::new());
    };

    Ok(entries
        .iter()
        .filter_map(|(key, value)| value_to_number(value).map(|n| (key.clone(), n)))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct Probe {
        #[serde(default, deserialize_with = "text")]
        label: Option<String>,
        #[serde(default, deserialize_with = "number")]
        ratio: Option<f64>,
        #[serde(default, deserialize_with = "count")]
        total: Option<u64>,
        #[serde(default, deserialize_with = "text_list")]
        tags: Vec<String>,
        #[serde(default, deserialize_with = "number_map")]
        timings: BTreeMap<String, f64>,
    }

    fn probe(value: Value) -> Probe {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn missing_fields_are_absent() {
        let p = probe(json!({}));
        assert!(p.label.is_none());
        assert!(p.ratio.is_none());
        assert!(p.total.is_none());
        assert!(p.tags.is_empty());
        assert!(p.timings.is_empty());
    }

    #[test]
    fn null_fields_are_absent() {
        let p = probe(json!({"label": null, "ratio": null, "total": null}));
        assert!(p.label.is_none());
        assert!(p.ratio.is_none());
        assert!(p.total.is_none());
    }

    #[test]
    fn numbers_become_text() {
        let p = probe(json!({"label": 12}));
        assert_eq!(p.label.as_deref(), Some("12"));
    }

    #[test]
    fn numeric_strings_become_numbers() {
        let p = probe(json!({"ratio": "0.75", "total": "42"}));
        assert_eq!(p.ratio, Some(0.75));
        assert_eq!(p.total, Some(42));
    }

    #[test]
    fn wrong_types_are_absent_not_errors() {
        let p = probe(json!({"label": {"x": 1}, "ratio": [1], "total": -3, "tags": "a"}));
        assert!(p.label.is_none());
        assert!(p.ratio.is_none());
        assert!(p.total.is_none());
        assert!(p.tags.is_empty());
    }

    #[test]
    fn text_list_skips_non_scalars() {
        let p = probe(json!({"tags": ["a", 2, null, {"b": 1}]}));
        assert_eq!(p.tags, vec!["a".to_string(), "2".to_string()]);
    }

    #[test]
    fn number_map_keeps_numeric_entries() {
        let p = probe(json!({"timings": {"retrieval": 0.5, "broken": "x"}}));
        assert_eq!(p.timings.len(), 1);
        assert_eq!(p.timings.get("retrieval"), Some(&0.5));
    }
}
