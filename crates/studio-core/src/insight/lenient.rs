//! Tolerant decoding of service-defined payloads.
//!
//! Insight payloads are owned by remote services and are not validated here.
//! Wrong types degrade to "absent" instead of failing the whole result.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Deserializes any scalar as text; `null`, empty strings, arrays and objects
/// become `None`.
pub(crate) fn text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value_as_text(&value))
}

/// Deserializes a number, accepting numeric strings; anything else is `None`.
pub(crate) fn number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    })
}

/// Deserializes a list of texts, dropping non-text entries; non-arrays are `None`.
pub(crate) fn text_list<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Array(items) => Some(items.iter().filter_map(value_as_text).collect()),
        _ => None,
    })
}

pub(crate) fn value_as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if s.trim().is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Decodes each element of an array independently, skipping the ones that do
/// not fit `T`. Missing or non-array values yield an empty list.
pub(crate) fn items<T: DeserializeOwned>(value: Option<&Value>) -> Vec<T> {
    match value {
        Some(Value::Array(entries)) => entries
            .iter()
            .filter_map(|entry| serde_json::from_value(entry.clone()).ok())
            .collect(),
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Probe {
        #[serde(default, deserialize_with = "text")]
        label: Option<String>,
        #[serde(default, deserialize_with = "number")]
        score: Option<f64>,
    }

    #[test]
    fn test_scalars_become_text() {
        let probe: Probe = serde_json::from_value(json!({"label": 42, "score": "0.5"})).unwrap();
        assert_eq!(probe.label.as_deref(), Some("42"));
        assert_eq!(probe.score, Some(0.5));
    }

    #[test]
    fn test_unusable_values_become_none() {
        let probe: Probe =
            serde_json::from_value(json!({"label": {"nested": true}, "score": [1]})).unwrap();
        assert_eq!(probe, Probe { label: None, score: None });

        let missing: Probe = serde_json::from_value(json!({})).unwrap();
        assert_eq!(missing, Probe { label: None, score: None });
    }

    #[test]
    fn test_items_skips_non_objects() {
        let parsed: Vec<Probe> = items(Some(&json!([{"label": "a"}, 7, {"label": null}])));
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0].label.as_deref(), Some("a"));
        assert!(items::<Probe>(Some(&json!("not a list"))).is_empty());
        assert!(items::<Probe>(None).is_empty());
    }
}
