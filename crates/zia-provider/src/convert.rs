// ── Expand / flatten helpers ──
//
// Shared converters between resource data and API models. "Expand" reads
// configuration into request structs; "flatten" turns responses back into
// attribute values. Reference lists use the `[{ id = [..] }]` shape in
// resources and `[{ id, name, extensions }]` in data sources.

use serde_json::{Map, Value, json};
use zia_api::models::IdNameExtensions;

use crate::resource_data::ResourceData;

// ── Expand ───────────────────────────────────────────────────────────

/// Expand `[{ id = [1, 2] }]` under `key` into references.
pub fn expand_id_name_extensions_set(d: &ResourceData, key: &str) -> Vec<IdNameExtensions> {
    d.get(key).map(expand_id_set_value).unwrap_or_default()
}

/// Expand `[{ id = 1 }]` under `key` into a single reference.
pub fn expand_id_name_extensions_single(d: &ResourceData, key: &str) -> Option<IdNameExtensions> {
    d.get(key).and_then(expand_id_single_value)
}

/// Block-level variant of [`expand_id_name_extensions_set`] for nested blocks.
pub fn expand_id_set_value(value: &Value) -> Vec<IdNameExtensions> {
    let mut refs: Vec<IdNameExtensions> = value
        .as_array()
        .into_iter()
        .flatten()
        .filter_map(|block| block.get("id"))
        .filter_map(Value::as_array)
        .flatten()
        .filter_map(Value::as_i64)
        .map(IdNameExtensions::from_id)
        .collect();
    refs.dedup_by_key(|r| r.id);
    refs
}

/// Block-level variant of [`expand_id_name_extensions_single`].
pub fn expand_id_single_value(value: &Value) -> Option<IdNameExtensions> {
    value
        .as_array()?
        .iter()
        .find_map(|block| block.get("id").and_then(Value::as_i64))
        .filter(|id| *id != 0)
        .map(IdNameExtensions::from_id)
}

/// Strings of a set-typed attribute (alias kept next to its flatten twin).
pub fn expand_string_set(d: &ResourceData, key: &str) -> Vec<String> {
    d.get_string_set(key)
}

/// Integers of a set-typed attribute narrowed to `i32`, skipping out-of-range values.
pub fn expand_i32_set(d: &ResourceData, key: &str) -> Vec<i32> {
    d.get_int_set(key)
        .into_iter()
        .filter_map(|n| i32::try_from(n).ok())
        .collect()
}

// ── Flatten ──────────────────────────────────────────────────────────

/// Flatten references into `[{ id = [..] }]`; an empty list yields null.
pub fn flatten_id_extensions_list_ids(list: &[IdNameExtensions]) -> Value {
    if list.is_empty() {
        return Value::Null;
    }
    let ids: Vec<i64> = list.iter().map(|r| r.id).collect();
    json!([{ "id": ids }])
}

/// Flatten one reference into `[{ id }]`; absent or zero IDs yield null.
pub fn flatten_id_extensions_single(reference: Option<&IdNameExtensions>) -> Value {
    match reference {
        Some(r) if r.id != 0 => json!([{ "id": r.id }]),
        _ => Value::Null,
    }
}

/// Flatten references into `[{ id, name, extensions }]` for data sources.
pub fn flatten_id_name_extensions(list: &[IdNameExtensions]) -> Value {
    Value::Array(list.iter().map(id_name_extensions_block).collect())
}

/// Single-reference variant of [`flatten_id_name_extensions`].
pub fn flatten_id_name_extensions_single(reference: Option<&IdNameExtensions>) -> Value {
    match reference {
        Some(r) => Value::Array(vec![id_name_extensions_block(r)]),
        None => Value::Array(Vec::new()),
    }
}

fn id_name_extensions_block(r: &IdNameExtensions) -> Value {
    let extensions: Map<String, Value> = r
        .extensions
        .iter()
        .map(|(k, v)| {
            let text = match v {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            (k.clone(), Value::String(text))
        })
        .collect();
    json!({
        "id": r.id,
        "name": r.name,
        "extensions": extensions,
    })
}

/// Flatten a string list into a set value; empty yields null.
pub fn flatten_string_set(values: &[String]) -> Value {
    if values.is_empty() {
        Value::Null
    } else {
        json!(values)
    }
}

/// Flatten an integer list into a set value; empty yields null.
pub fn flatten_i32_set(values: &[i32]) -> Value {
    if values.is_empty() {
        Value::Null
    } else {
        json!(values)
    }
}

/// Flatten an optional string, mapping empty to null.
pub fn flatten_optional_string(value: Option<&str>) -> Value {
    match value {
        Some(s) if !s.is_empty() => Value::String(s.to_owned()),
        _ => Value::Null,
    }
}
