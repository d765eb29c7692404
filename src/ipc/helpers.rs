use serde::de::DeserializeOwned;

use super::error::HandlerErr;
use crate::config::parse_day;

pub fn get_required_str(params: &serde_json::Value, key: &str) -> Result<String, HandlerErr> {
    params
        .get(key)
        .and_then(|v| v.as_str())
        .map(|s| s.to_string())
        .ok_or_else(|| HandlerErr::bad_params(format!("missing {}", key)))
}

pub fn get_optional_str(params: &serde_json::Value, key: &str) -> Option<String> {
    params
        .get(key)
        .and_then(|v| v.as_str())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

pub fn get_optional_bool(params: &serde_json::Value, key: &str) -> Result<Option<bool>, HandlerErr> {
    match params.get(key) {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(v) => v
            .as_bool()
            .map(Some)
            .ok_or_else(|| HandlerErr::bad_params(format!("{} must be a boolean", key))),
    }
}

/// Dates travel as `YYYY-MM-DD`; anything else is rejected before it reaches the store.
pub fn get_required_date(params: &serde_json::Value, key: &str) -> Result<String, HandlerErr> {
    let raw = get_required_str(params, key)?;
    parse_day(&raw)
        .map(|d| d.format("%Y-%m-%d").to_string())
        .map_err(|e| HandlerErr::bad_params(format!("{}: {}", key, e)))
}

pub fn get_optional_date(
    params: &serde_json::Value,
    key: &str,
) -> Result<Option<String>, HandlerErr> {
    match get_optional_str(params, key) {
        None => Ok(None),
        Some(_) => get_required_date(params, key).map(Some),
    }
}

/// Decode a structured payload, either `params[key]` or the whole params object.
pub fn decode<T: DeserializeOwned>(
    params: &serde_json::Value,
    key: Option<&str>,
) -> Result<T, HandlerErr> {
    let value = match key {
        Some(k) => params
            .get(k)
            .cloned()
            .ok_or_else(|| HandlerErr::bad_params(format!("missing {}", k)))?,
        None => params.clone(),
    };
    serde_json::from_value(value).map_err(|e| HandlerErr::bad_params(e.to_string()))
}
