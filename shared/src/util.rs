use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// 获取当前 UTC 时间戳（毫秒）
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Coerce a loosely-typed JSON value into a finite number.
///
/// Numbers pass through, numeric strings are parsed, everything else
/// (null, booleans, garbage text, NaN, infinities) yields `None`.
pub fn coerce_number(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    n.filter(|v| v.is_finite())
}

/// Serde adapter for numeric fields that the console writes loosely.
///
/// Use with `#[serde(default, deserialize_with = "shared::util::lenient_f64")]`.
pub fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(raw.as_ref().and_then(coerce_number))
}

/// Serde adapter for counters that may arrive as floats or strings.
pub fn lenient_i64<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(raw
        .as_ref()
        .and_then(coerce_number)
        .map(|v| v as i64)
        .unwrap_or(0))
}

/// Serde adapter for collections the store may hold as either an array or a
/// keyed map. Entries that fail to decode are dropped.
pub fn lenient_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: serde::de::DeserializeOwned,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    let entries: Vec<Value> = match raw {
        Some(Value::Array(items)) => items,
        Some(Value::Object(map)) => map.into_iter().map(|(_, v)| v).collect(),
        _ => Vec::new(),
    };
    Ok(entries
        .into_iter()
        .filter_map(|v| serde_json::from_value(v).ok())
        .collect())
}

/// Serde adapter for optional sub-records. A value that fails to decode is
/// treated as absent instead of failing the enclosing record.
pub fn lenient_opt<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: serde::de::DeserializeOwned,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(raw.and_then(|v| serde_json::from_value(v).ok()))
}
