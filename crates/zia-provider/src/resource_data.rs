// ── Resource data ──
//
// The typed key-value store every CRUD function reads from and writes to.
// It pairs the current attribute values with the prior state so updates
// can ask which attributes changed.

use serde_json::{Map, Value};

use crate::error::{Diagnostic, ProviderError};
use crate::schema::Schema;

#[derive(Debug, Clone)]
pub struct ResourceData {
    schema: Schema,
    id: Option<String>,
    values: Map<String, Value>,
    prior: Map<String, Value>,
}

impl ResourceData {
    // ── Constructors ─────────────────────────────────────────────────

    /// Data built from user configuration, as create and data source reads see it.
    ///
    /// Defaults are applied and the configuration is validated first.
    pub fn from_config(schema: Schema, config: Map<String, Value>) -> Result<Self, ProviderError> {
        let values = prepare_config(&schema, config)?;
        Ok(Self {
            schema,
            id: None,
            values,
            prior: Map::new(),
        })
    }

    /// Data restored from stored state (read, delete, import).
    pub fn from_state(schema: Schema, id: impl Into<String>, mut attributes: Map<String, Value>) -> Self {
        if !schema.contains("id") {
            attributes.remove("id");
        }
        let values = schema.normalize(strip_nulls(attributes));
        let mut data = Self {
            schema,
            id: None,
            prior: values.clone(),
            values,
        };
        data.set_id(id);
        data
    }

    /// Stored state overlaid with new configuration, as an update sees it.
    pub fn for_update(
        schema: Schema,
        id: impl Into<String>,
        prior: Map<String, Value>,
        config: Map<String, Value>,
    ) -> Result<Self, ProviderError> {
        let prior = schema.normalize(strip_nulls(prior));
        let mut values = prepare_config(&schema, config)?;

        // Computed attributes keep their last known value.
        for (name, attribute) in schema.iter() {
            if attribute.computed && !values.contains_key(name) {
                if let Some(old) = prior.get(name) {
                    values.insert(name.to_owned(), old.clone());
                }
            }
        }

        let mut data = Self {
            schema,
            id: None,
            values,
            prior,
        };
        data.set_id(id);
        Ok(data)
    }

    // ── Identity ─────────────────────────────────────────────────────

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Set the ID; an empty string clears it.
    pub fn set_id(&mut self, id: impl Into<String>) {
        let id = id.into();
        self.id = if id.is_empty() { None } else { Some(id) };
    }

    /// Drop the ID, which removes the resource from state.
    pub fn clear_id(&mut self) {
        self.id = None;
    }

    /// The ID parsed as the numeric identifier most ZIA entities use.
    pub fn numeric_id(&self) -> Result<i64, ProviderError> {
        let raw = self.id().ok_or_else(|| ProviderError::MissingAttribute {
            attribute: "id".into(),
        })?;
        raw.parse().map_err(|_| ProviderError::InvalidId {
            id: raw.to_owned(),
            reason: "expected a numeric ID".into(),
        })
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    // ── Getters ──────────────────────────────────────────────────────

    /// Look up a value by dotted path (`locations.0.id`). Null reads as absent.
    pub fn get(&self, path: &str) -> Option<&Value> {
        let mut segments = path.split('.');
        let mut current = self.values.get(segments.next()?)?;
        for segment in segments {
            current = match current {
                Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
                Value::Object(map) => map.get(segment)?,
                _ => return None,
            };
        }
        (!current.is_null()).then_some(current)
    }

    /// Like [`get`](Self::get), but zero values (`""`, `0`, `false`, `[]`) also read as absent.
    pub fn get_ok(&self, path: &str) -> Option<&Value> {
        self.get(path).filter(|v| !is_zero_value(v))
    }

    pub fn get_str(&self, path: &str) -> Option<&str> {
        self.get(path).and_then(Value::as_str)
    }

    pub fn get_string(&self, path: &str) -> String {
        self.get_str(path).unwrap_or_default().to_owned()
    }

    pub fn get_int(&self, path: &str) -> i64 {
        self.get(path).and_then(Value::as_i64).unwrap_or_default()
    }

    /// Integer attribute narrowed to the `i32` the API models use.
    pub fn get_i32(&self, path: &str) -> Result<i32, ProviderError> {
        let n = self.get_int(path);
        i32::try_from(n).map_err(|_| ProviderError::invalid(path, format!("{n} is out of range")))
    }

    pub fn get_bool(&self, path: &str) -> bool {
        self.get(path).and_then(Value::as_bool).unwrap_or_default()
    }

    pub fn get_float(&self, path: &str) -> f64 {
        self.get(path).and_then(Value::as_f64).unwrap_or_default()
    }

    pub fn get_string_set(&self, path: &str) -> Vec<String> {
        self.get(path)
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_owned)
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn get_int_set(&self, path: &str) -> Vec<i64> {
        self.get(path)
            .and_then(Value::as_array)
            .map(|items| items.iter().filter_map(Value::as_i64).collect())
            .unwrap_or_default()
    }

    /// Nested block instances under `path`.
    pub fn get_blocks(&self, path: &str) -> Vec<&Map<String, Value>> {
        self.get(path)
            .and_then(Value::as_array)
            .map(|items| items.iter().filter_map(Value::as_object).collect())
            .unwrap_or_default()
    }

    // ── Setters ──────────────────────────────────────────────────────

    /// Set a top-level attribute.
    ///
    /// Keys outside the schema and type mismatches are rejected; set-typed
    /// values are stored sorted and deduplicated. Null removes the value.
    pub fn set(&mut self, key: &str, value: impl Into<Value>) -> Result<(), ProviderError> {
        let Some(attribute) = self.schema.get(key) else {
            return Err(ProviderError::invalid(key, "attribute is not declared in the schema"));
        };

        let value = value.into();
        if value.is_null() {
            self.values.remove(key);
            return Ok(());
        }

        let mut diags: Vec<Diagnostic> = Vec::new();
        attribute.check_shape(key, &value, &mut diags);
        if let Some(first) = diags.into_iter().next() {
            return Err(ProviderError::invalid(first.path, first.message));
        }

        let value = attribute.normalize(value);
        self.values.insert(key.to_owned(), value);
        Ok(())
    }

    // ── Diffing ──────────────────────────────────────────────────────

    /// Whether `key` differs from the prior state.
    pub fn has_change(&self, key: &str) -> bool {
        self.values.get(key) != self.prior.get(key)
    }

    // ── Export ───────────────────────────────────────────────────────

    pub fn attributes(&self) -> &Map<String, Value> {
        &self.values
    }

    /// Attribute map for persistence, `id` included unless the schema
    /// declares an `id` attribute of its own.
    pub fn to_state(&self) -> Map<String, Value> {
        let mut state = self.values.clone();
        if let Some(id) = &self.id {
            if !self.schema.contains("id") {
                state.insert("id".into(), Value::String(id.clone()));
            }
        }
        state
    }
}

fn prepare_config(schema: &Schema, mut config: Map<String, Value>) -> Result<Map<String, Value>, ProviderError> {
    schema.apply_defaults(&mut config);
    let diags = schema.validate(&config);
    if !diags.is_empty() {
        return Err(ProviderError::Validation(diags));
    }
    Ok(schema.normalize(strip_nulls(config)))
}

fn strip_nulls(map: Map<String, Value>) -> Map<String, Value> {
    map.into_iter().filter(|(_, v)| !v.is_null()).collect()
}

fn is_zero_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::schema::{Attribute, AttributeType, id_set_block};

    fn schema() -> Schema {
        Schema::new()
            .attr("name", Attribute::string().required())
            .attr("order", Attribute::int().optional())
            .attr("enabled", Attribute::boolean().optional().default(true))
            .attr("urls", Attribute::set_of(AttributeType::String).optional())
            .attr("locations", id_set_block("locations"))
            .attr("rule_id", Attribute::int().computed())
    }

    fn obj(v: Value) -> Map<String, Value> {
        v.as_object().cloned().unwrap()
    }

    #[test]
    fn from_config_applies_defaults_and_validates() {
        let d = ResourceData::from_config(schema(), obj(json!({"name": "r1"}))).unwrap();
        assert!(d.get_bool("enabled"));
        assert!(d.id().is_none());

        let err = ResourceData::from_config(schema(), obj(json!({"order": 1}))).unwrap_err();
        assert!(matches!(err, ProviderError::Validation(_)));
    }

    #[test]
    fn dotted_paths_and_typed_getters() {
        let d = ResourceData::from_config(
            schema(),
            obj(json!({
                "name": "r1",
                "order": 4,
                "urls": ["b.example.com", "a.example.com"],
                "locations": [{"id": [30, 10, 20]}]
            })),
        )
        .unwrap();

        assert_eq!(d.get_string("name"), "r1");
        assert_eq!(d.get_i32("order").unwrap(), 4);
        assert_eq!(d.get_string_set("urls"), vec!["a.example.com", "b.example.com"]);
        assert_eq!(d.get_int_set("locations.0.id"), vec![10, 20, 30]);
        assert_eq!(d.get_int("locations.0.id.0"), 10);
        assert!(d.get("locations.1").is_none());
        assert!(d.get("nope").is_none());
        assert_eq!(d.get_string("nope"), "");
    }

    #[test]
    fn get_ok_skips_zero_values() {
        let d = ResourceData::from_config(schema(), obj(json!({"name": "", "order": 0}))).unwrap();
        assert!(d.get("order").is_some());
        assert!(d.get_ok("order").is_none());
        assert!(d.get_ok("name").is_none());
    }

    #[test]
    fn set_rejects_unknown_keys_and_bad_types() {
        let mut d = ResourceData::from_config(schema(), obj(json!({"name": "r1"}))).unwrap();
        assert!(d.set("colour", "red").is_err());
        assert!(d.set("order", "first").is_err());
        d.set("rule_id", 77).unwrap();
        assert_eq!(d.get_int("rule_id"), 77);
        d.set("order", Value::Null).unwrap();
        assert!(d.get("order").is_none());
    }

    #[test]
    fn has_change_compares_against_prior_state() {
        let d = ResourceData::for_update(
            schema(),
            "5",
            obj(json!({"name": "old", "order": 1, "rule_id": 5})),
            obj(json!({"name": "new", "order": 1})),
        )
        .unwrap();
        assert!(d.has_change("name"));
        assert!(!d.has_change("order"));
        assert!(!d.has_change("rule_id"));
        assert_eq!(d.get_int("rule_id"), 5);
        assert_eq!(d.numeric_id().unwrap(), 5);
    }

    #[test]
    fn state_includes_id() {
        let mut d = ResourceData::from_config(schema(), obj(json!({"name": "r1"}))).unwrap();
        d.set_id("12");
        let state = d.to_state();
        assert_eq!(state["id"], json!("12"));
        assert_eq!(state["name"], json!("r1"));

        d.clear_id();
        assert!(!d.to_state().contains_key("id"));
        assert!(d.numeric_id().is_err());
    }
}
