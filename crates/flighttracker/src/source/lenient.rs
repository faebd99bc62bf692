//! Forgiving readers for provider JSON.
//!
//! Providers are loose about types: codes arrive as numbers, numbers arrive
//! as strings, sub-objects arrive as strings or `false`, and any field may be
//! `null`. These helpers accept what can be read sensibly and treat
//! everything else as absent.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Text from a string, number or bool value.
pub(crate) fn text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// A float from a number or numeric string.
pub(crate) fn number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Read text; see [`text`].
pub(crate) fn string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Value>::deserialize(deserializer)?
        .as_ref()
        .and_then(text))
}

/// Read a float; see [`number`].
pub(crate) fn float<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Value>::deserialize(deserializer)?
        .as_ref()
        .and_then(number))
}

/// Read a whole number of minutes, rounding fractional values.
#[allow(clippy::cast_possible_truncation)]
pub(crate) fn minutes<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value.as_ref() {
        Some(Value::Number(n)) => n.as_i64().or_else(|| n.as_f64().map(|f| f.round() as i64)),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}

/// Read a nested object. A value of the wrong shape is absent rather than an
/// error, so one bad section never sinks the whole response.
pub(crate) fn object<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Ok(Option::<Value>::deserialize(deserializer)?
        .and_then(|value| serde_json::from_value(value).ok()))
}

/// Read a bool; anything but a JSON bool is absent.
pub(crate) fn flag<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Bool(b)) => Some(b),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[derive(Debug, Deserialize)]
    struct Probe {
        #[serde(default, deserialize_with = "string")]
        name: Option<String>,
        #[serde(default, deserialize_with = "float")]
        altitude: Option<f64>,
        #[serde(default, deserialize_with = "minutes")]
        delay: Option<i64>,
        #[serde(default, deserialize_with = "flag")]
        is_ground: Option<bool>,
    }

    #[derive(Debug, Deserialize)]
    struct Named {
        name: String,
    }

    #[derive(Debug, Deserialize)]
    struct Holder {
        #[serde(default, deserialize_with = "object")]
        airline: Option<Named>,
    }

    fn probe(value: serde_json::Value) -> Probe {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_missing_fields_are_absent() {
        let p = probe(json!({}));
        assert!(p.name.is_none());
        assert!(p.altitude.is_none());
        assert!(p.delay.is_none());
        assert!(p.is_ground.is_none());
    }

    #[test]
    fn test_nulls_are_absent() {
        let p = probe(json!({"name": null, "altitude": null, "delay": null, "is_ground": null}));
        assert!(p.name.is_none());
        assert!(p.altitude.is_none());
        assert!(p.delay.is_none());
        assert!(p.is_ground.is_none());
    }

    #[test]
    fn test_cross_type_values() {
        let p = probe(json!({
            "name": 42,
            "altitude": "10668.5",
            "delay": "15",
            "is_ground": "yes"
        }));
        assert_eq!(p.name.as_deref(), Some("42"));
        assert_eq!(p.altitude, Some(10_668.5));
        assert_eq!(p.delay, Some(15));
        assert!(p.is_ground.is_none());
    }

    #[test]
    fn test_fractional_minutes_round() {
        let p = probe(json!({"delay": 12.6}));
        assert_eq!(p.delay, Some(13));
    }

    #[test]
    fn test_unreadable_values_are_absent() {
        let p = probe(json!({"name": {"nested": true}, "altitude": "high", "delay": [1]}));
        assert!(p.name.is_none());
        assert!(p.altitude.is_none());
        assert!(p.delay.is_none());
    }

    #[test]
    fn test_objects_of_the_wrong_shape_are_absent() {
        let mistyped = [
            json!("British Airways"),
            json!(false),
            json!([1]),
            json!({}),
            json!(null),
        ];
        for value in mistyped {
            let holder: Holder = serde_json::from_value(json!({ "airline": value })).unwrap();
            assert!(holder.airline.is_none());
        }

        let holder: Holder =
            serde_json::from_value(json!({"airline": {"name": "Aer Lingus"}})).unwrap();
        assert_eq!(holder.airline.unwrap().name, "Aer Lingus");

        let holder: Holder = serde_json::from_value(json!({})).unwrap();
        assert!(holder.airline.is_none());
    }
}
