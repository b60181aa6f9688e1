// ── Attribute schema ──
//
// Declares the configuration surface of every resource and data source:
// attribute names, types, flags, defaults and validation rules. Values are
// carried as `serde_json::Value`; nested blocks are arrays of objects.

use std::cmp::Ordering;
use std::net::IpAddr;

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::Diagnostic;

// ── Types ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AttributeType {
    String,
    Int,
    Float,
    Bool,
    List,
    Set,
    Map,
}

impl AttributeType {
    fn is_collection(self) -> bool {
        matches!(self, Self::List | Self::Set | Self::Map)
    }

    fn matches_scalar(self, value: &Value) -> bool {
        match self {
            Self::String => value.is_string(),
            Self::Int => value.is_i64() || value.is_u64(),
            Self::Float => value.is_number(),
            Self::Bool => value.is_boolean(),
            Self::List | Self::Set => value.is_array(),
            Self::Map => value.is_object(),
        }
    }
}

/// Element type of a collection attribute.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Elem {
    Type(AttributeType),
    Block(Schema),
}

/// Value constraint applied to a scalar, or to each element of a scalar collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Validation {
    OneOf(Vec<String>),
    IntBetween(i64, i64),
    StringLenBetween(usize, usize),
    IsIpAddress,
    IsCidrOrIp,
}

impl Validation {
    pub fn one_of(values: &[&str]) -> Self {
        Self::OneOf(values.iter().map(|v| (*v).to_owned()).collect())
    }

    /// Check one value; `Err` carries a human-readable reason.
    pub fn check(&self, value: &Value) -> Result<(), String> {
        match self {
            Self::OneOf(allowed) => {
                let Some(s) = value.as_str() else {
                    return Err("expected a string".into());
                };
                if allowed.iter().any(|a| a == s) {
                    Ok(())
                } else {
                    Err(format!("expected one of [{}], got {s:?}", allowed.join(", ")))
                }
            }
            Self::IntBetween(min, max) => match value.as_i64() {
                Some(n) if (*min..=*max).contains(&n) => Ok(()),
                Some(n) => Err(format!("expected a value between {min} and {max}, got {n}")),
                None => Err("expected an integer".into()),
            },
            Self::StringLenBetween(min, max) => {
                let Some(s) = value.as_str() else {
                    return Err("expected a string".into());
                };
                let len = s.chars().count();
                if (*min..=*max).contains(&len) {
                    Ok(())
                } else {
                    Err(format!("expected length between {min} and {max}, got {len}"))
                }
            }
            Self::IsIpAddress => match value.as_str().map(str::parse::<IpAddr>) {
                Some(Ok(_)) => Ok(()),
                _ => Err(format!("expected an IP address, got {value}")),
            },
            Self::IsCidrOrIp => match value.as_str() {
                Some(s) if is_ip_or_cidr(s) => Ok(()),
                _ => Err(format!("expected an IP address or CIDR block, got {value}")),
            },
        }
    }
}

fn is_ip_or_cidr(raw: &str) -> bool {
    let Some((addr, prefix)) = raw.split_once('/') else {
        return raw.parse::<IpAddr>().is_ok();
    };
    let Ok(addr) = addr.parse::<IpAddr>() else {
        return false;
    };
    let max = if addr.is_ipv4() { 32 } else { 128 };
    prefix.parse::<u8>().is_ok_and(|p| p <= max)
}

// ── Attribute ────────────────────────────────────────────────────────

/// One attribute declaration, built fluently:
///
/// ```
/// use zia_provider::schema::{Attribute, Validation};
///
/// let state = Attribute::string()
///     .optional()
///     .default("ENABLED")
///     .validate(Validation::one_of(&["ENABLED", "DISABLED"]));
/// assert!(state.is_optional());
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct Attribute {
    #[serde(rename = "type")]
    pub ty: AttributeType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub elem: Option<Elem>,
    pub required: bool,
    pub optional: bool,
    pub computed: bool,
    pub sensitive: bool,
    pub force_new: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_items: Option<usize>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub validations: Vec<Validation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Attribute {
    fn of(ty: AttributeType, elem: Option<Elem>) -> Self {
        Self {
            ty,
            elem,
            required: false,
            optional: false,
            computed: false,
            sensitive: false,
            force_new: false,
            default: None,
            max_items: None,
            validations: Vec::new(),
            description: None,
        }
    }

    pub fn string() -> Self {
        Self::of(AttributeType::String, None)
    }

    pub fn int() -> Self {
        Self::of(AttributeType::Int, None)
    }

    pub fn float() -> Self {
        Self::of(AttributeType::Float, None)
    }

    pub fn boolean() -> Self {
        Self::of(AttributeType::Bool, None)
    }

    pub fn list_of(elem: AttributeType) -> Self {
        Self::of(AttributeType::List, Some(Elem::Type(elem)))
    }

    pub fn set_of(elem: AttributeType) -> Self {
        Self::of(AttributeType::Set, Some(Elem::Type(elem)))
    }

    pub fn map_of(elem: AttributeType) -> Self {
        Self::of(AttributeType::Map, Some(Elem::Type(elem)))
    }

    pub fn list_of_block(block: Schema) -> Self {
        Self::of(AttributeType::List, Some(Elem::Block(block)))
    }

    pub fn set_of_block(block: Schema) -> Self {
        Self::of(AttributeType::Set, Some(Elem::Block(block)))
    }

    // ── Builder flags ────────────────────────────────────────────────

    pub fn required(mut self) -> Self {
        self.required = true;
        self.optional = false;
        self
    }

    pub fn optional(mut self) -> Self {
        self.optional = true;
        self.required = false;
        self
    }

    pub fn computed(mut self) -> Self {
        self.computed = true;
        self
    }

    pub fn sensitive(mut self) -> Self {
        self.sensitive = true;
        self
    }

    pub fn force_new(mut self) -> Self {
        self.force_new = true;
        self
    }

    pub fn default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    pub fn max_items(mut self, n: usize) -> Self {
        self.max_items = Some(n);
        self
    }

    pub fn validate(mut self, rule: Validation) -> Self {
        self.validations.push(rule);
        self
    }

    pub fn description(mut self, text: &str) -> Self {
        self.description = Some(text.to_owned());
        self
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn is_optional(&self) -> bool {
        self.optional
    }

    /// Computed and not settable from configuration.
    pub fn is_read_only(&self) -> bool {
        self.computed && !self.optional && !self.required
    }

    pub fn block(&self) -> Option<&Schema> {
        match &self.elem {
            Some(Elem::Block(schema)) => Some(schema),
            _ => None,
        }
    }

    /// Type-check `value` and run validation rules, appending findings.
    pub fn check(&self, path: &str, value: &Value, diags: &mut Vec<Diagnostic>) {
        self.check_with(path, value, diags, true);
    }

    /// Type-check only; values read back from the API skip validation rules.
    pub fn check_shape(&self, path: &str, value: &Value, diags: &mut Vec<Diagnostic>) {
        self.check_with(path, value, diags, false);
    }

    fn check_with(&self, path: &str, value: &Value, diags: &mut Vec<Diagnostic>, rules: bool) {
        if value.is_null() {
            return;
        }
        if !self.ty.matches_scalar(value) {
            diags.push(Diagnostic::new(
                path,
                format!("expected {}, got {}", type_label(self.ty), kind_of(value)),
            ));
            return;
        }

        if !self.ty.is_collection() {
            if rules {
                self.run_validations(path, value, diags);
            }
            return;
        }

        if let Some(max) = self.max_items {
            let len = value.as_array().map_or(0, Vec::len);
            if len > max {
                diags.push(Diagnostic::new(
                    path,
                    format!("at most {max} item(s) allowed, got {len}"),
                ));
            }
        }

        match (value, &self.elem) {
            (Value::Array(items), Some(Elem::Block(block))) => {
                for (i, item) in items.iter().enumerate() {
                    let item_path = format!("{path}.{i}");
                    match item.as_object() {
                        Some(obj) if rules => block.validate_at(&item_path, obj, diags),
                        Some(obj) => block.check_shape_at(&item_path, obj, diags),
                        None => diags.push(Diagnostic::new(item_path, "expected a block")),
                    }
                }
            }
            (Value::Array(items), Some(Elem::Type(elem))) => {
                for (i, item) in items.iter().enumerate() {
                    self.check_element(&format!("{path}.{i}"), *elem, item, diags, rules);
                }
            }
            (Value::Object(entries), Some(Elem::Type(elem))) => {
                for (key, item) in entries {
                    self.check_element(&format!("{path}.{key}"), *elem, item, diags, rules);
                }
            }
            _ => {}
        }
    }

    fn check_element(
        &self,
        path: &str,
        elem: AttributeType,
        item: &Value,
        diags: &mut Vec<Diagnostic>,
        rules: bool,
    ) {
        if !elem.matches_scalar(item) {
            diags.push(Diagnostic::new(
                path,
                format!("expected {}, got {}", type_label(elem), kind_of(item)),
            ));
        } else if rules {
            self.run_validations(path, item, diags);
        }
    }

    fn run_validations(&self, path: &str, value: &Value, diags: &mut Vec<Diagnostic>) {
        for rule in &self.validations {
            if let Err(reason) = rule.check(value) {
                diags.push(Diagnostic::new(path, reason));
            }
        }
    }

    /// Canonical form: sets sorted and deduplicated, nested blocks normalized.
    pub fn normalize(&self, value: Value) -> Value {
        let Value::Array(items) = value else {
            return value;
        };
        let mut items: Vec<Value> = match self.block() {
            Some(block) => items
                .into_iter()
                .map(|item| match item {
                    Value::Object(obj) => Value::Object(block.normalize(obj)),
                    other => other,
                })
                .collect(),
            None => items,
        };
        if self.ty == AttributeType::Set {
            items.sort_by(compare_values);
            items.dedup();
        }
        Value::Array(items)
    }
}

fn type_label(ty: AttributeType) -> &'static str {
    match ty {
        AttributeType::String => "a string",
        AttributeType::Int => "an integer",
        AttributeType::Float => "a number",
        AttributeType::Bool => "a boolean",
        AttributeType::List | AttributeType::Set => "a list",
        AttributeType::Map => "a map",
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(n) if n.is_f64() => "a float",
        Value::Number(_) => "an integer",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "a map",
    }
}

fn compare_values(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => match (x.as_i64(), y.as_i64()) {
            (Some(x), Some(y)) => x.cmp(&y),
            _ => x
                .as_f64()
                .partial_cmp(&y.as_f64())
                .unwrap_or(Ordering::Equal),
        },
        (Value::String(x), Value::String(y)) => x.cmp(y),
        _ => a.to_string().cmp(&b.to_string()),
    }
}

// ── Schema ───────────────────────────────────────────────────────────

/// Ordered attribute map of a resource, data source or nested block.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct Schema {
    attributes: IndexMap<String, Attribute>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an attribute (builder style).
    pub fn attr(mut self, name: &str, attribute: Attribute) -> Self {
        self.attributes.insert(name.to_owned(), attribute);
        self
    }

    pub fn get(&self, name: &str) -> Option<&Attribute> {
        self.attributes.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Attribute)> {
        self.attributes.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    /// Validate user configuration.
    ///
    /// Reports unsupported attributes, values set on read-only attributes,
    /// missing required attributes, type mismatches, `max_items` overflows
    /// and validation-rule failures, recursing into nested blocks.
    pub fn validate(&self, config: &Map<String, Value>) -> Vec<Diagnostic> {
        let mut diags = Vec::new();
        self.validate_at("", config, &mut diags);
        diags
    }

    fn validate_at(&self, prefix: &str, config: &Map<String, Value>, diags: &mut Vec<Diagnostic>) {
        let join = |name: &str| {
            if prefix.is_empty() {
                name.to_owned()
            } else {
                format!("{prefix}.{name}")
            }
        };

        for (name, value) in config {
            let Some(attribute) = self.attributes.get(name) else {
                diags.push(Diagnostic::new(join(name), "unsupported attribute"));
                continue;
            };
            if attribute.is_read_only() && !value.is_null() {
                diags.push(Diagnostic::new(
                    join(name),
                    "attribute is computed and cannot be set",
                ));
                continue;
            }
            attribute.check(&join(name), value, diags);
        }

        for (name, attribute) in &self.attributes {
            if attribute.required && config.get(name).is_none_or(Value::is_null) {
                diags.push(Diagnostic::new(join(name), "required attribute is missing"));
            }
        }
    }

    fn check_shape_at(&self, prefix: &str, values: &Map<String, Value>, diags: &mut Vec<Diagnostic>) {
        for (name, value) in values {
            if let Some(attribute) = self.attributes.get(name) {
                attribute.check_shape(&format!("{prefix}.{name}"), value, diags);
            }
        }
    }

    /// Fill declared defaults for attributes absent from `config`.
    pub fn apply_defaults(&self, config: &mut Map<String, Value>) {
        for (name, attribute) in &self.attributes {
            let missing = config.get(name).is_none_or(Value::is_null);
            if missing {
                if let Some(default) = &attribute.default {
                    config.insert(name.clone(), default.clone());
                }
                continue;
            }
            if let (Some(block), Some(Value::Array(items))) = (attribute.block(), config.get_mut(name)) {
                for item in items.iter_mut() {
                    if let Value::Object(obj) = item {
                        block.apply_defaults(obj);
                    }
                }
            }
        }
    }

    /// Normalize every known attribute of `values`.
    pub fn normalize(&self, values: Map<String, Value>) -> Map<String, Value> {
        values
            .into_iter()
            .map(|(name, value)| match self.attributes.get(&name) {
                Some(attribute) => {
                    let value = attribute.normalize(value);
                    (name, value)
                }
                None => (name, value),
            })
            .collect()
    }
}

// ── Shared attribute shapes ──────────────────────────────────────────

/// `[{ id = [1, 2, 3] }]`: a set of references to other entities.
pub fn id_set_block(description: &str) -> Attribute {
    Attribute::list_of_block(
        Schema::new().attr("id", Attribute::set_of(AttributeType::Int).required()),
    )
    .optional()
    .max_items(1)
    .description(description)
}

/// `[{ id = 1 }]`: a single reference to another entity.
pub fn id_block(description: &str) -> Attribute {
    Attribute::list_of_block(Schema::new().attr("id", Attribute::int().required()))
        .optional()
        .max_items(1)
        .description(description)
}

/// Computed `[{ id, name, extensions }]` block as data sources expose it.
pub fn computed_id_name_extensions(description: &str) -> Attribute {
    Attribute::list_of_block(
        Schema::new()
            .attr("id", Attribute::int().computed())
            .attr("name", Attribute::string().computed())
            .attr("extensions", Attribute::map_of(AttributeType::String).computed()),
    )
    .computed()
    .description(description)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    fn label_schema() -> Schema {
        Schema::new()
            .attr("name", Attribute::string().required().validate(Validation::StringLenBetween(1, 31)))
            .attr(
                "state",
                Attribute::string()
                    .optional()
                    .default("ENABLED")
                    .validate(Validation::one_of(&["ENABLED", "DISABLED"])),
            )
            .attr("rank", Attribute::int().optional().validate(Validation::IntBetween(0, 7)))
            .attr("src_ips", Attribute::set_of(AttributeType::String).optional().validate(Validation::IsCidrOrIp))
            .attr("labels", id_set_block("labels"))
            .attr("last_modified_time", Attribute::int().computed())
    }

    fn config(v: Value) -> Map<String, Value> {
        v.as_object().cloned().unwrap()
    }

    #[test]
    fn accepts_valid_config() {
        let diags = label_schema().validate(&config(json!({
            "name": "web",
            "state": "DISABLED",
            "rank": 7,
            "src_ips": ["10.0.0.0/8", "192.168.1.1"],
            "labels": [{"id": [1, 2]}]
        })));
        assert!(diags.is_empty(), "{diags:?}");
    }

    #[test]
    fn reports_unknown_and_missing() {
        let diags = label_schema().validate(&config(json!({"colour": "red"})));
        let paths: Vec<_> = diags.iter().map(|d| d.path.as_str()).collect();
        assert!(paths.contains(&"colour"));
        assert!(paths.contains(&"name"));
    }

    #[test]
    fn rejects_out_of_enum_and_range() {
        let diags = label_schema().validate(&config(json!({
            "name": "web",
            "state": "PAUSED",
            "rank": 9
        })));
        assert_eq!(diags.len(), 2);
        assert!(diags.iter().any(|d| d.path == "state" && d.message.contains("expected one of")));
        assert!(diags.iter().any(|d| d.path == "rank" && d.message.contains("between 0 and 7")));
    }

    #[test]
    fn rejects_computed_and_nested_errors() {
        let diags = label_schema().validate(&config(json!({
            "name": "web",
            "last_modified_time": 5,
            "labels": [{"id": ["x"]}, {"id": [1]}],
            "src_ips": ["10.0.0.0/40"]
        })));
        let paths: Vec<_> = diags.iter().map(|d| d.path.as_str()).collect();
        assert!(paths.contains(&"last_modified_time"));
        assert!(paths.contains(&"labels"), "max_items: {paths:?}");
        assert!(paths.contains(&"labels.0.id.0"));
        assert!(paths.contains(&"src_ips.0"));
    }

    #[test]
    fn defaults_fill_missing_only() {
        let mut cfg = config(json!({"name": "web"}));
        label_schema().apply_defaults(&mut cfg);
        assert_eq!(cfg["state"], json!("ENABLED"));

        let mut cfg = config(json!({"name": "web", "state": "DISABLED"}));
        label_schema().apply_defaults(&mut cfg);
        assert_eq!(cfg["state"], json!("DISABLED"));
    }

    #[test]
    fn sets_normalize_sorted_and_unique() {
        let normalized = label_schema().normalize(config(json!({
            "src_ips": ["b", "a", "b"],
            "labels": [{"id": [3, 1, 3, 2]}]
        })));
        assert_eq!(normalized["src_ips"], json!(["a", "b"]));
        assert_eq!(normalized["labels"], json!([{"id": [1, 2, 3]}]));
    }

    #[test]
    fn cidr_parsing() {
        assert!(is_ip_or_cidr("10.1.2.3"));
        assert!(is_ip_or_cidr("2001:db8::/32"));
        assert!(!is_ip_or_cidr("10.0.0.0/33"));
        assert!(!is_ip_or_cidr("example.com"));
    }
}
