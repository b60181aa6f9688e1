// ── Resource and data source contracts ──
//
// Every resource type implements `Resource`; every data source implements
// `DataSource`. Operations receive the shared `Meta` and mutate the
// `ResourceData` they are handed.

use async_trait::async_trait;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::error::ProviderError;
use crate::provider::Meta;
use crate::resource_data::ResourceData;
use crate::schema::Schema;

#[async_trait]
pub trait Resource: Send + Sync {
    /// Type name, e.g. `zia_rule_labels`.
    fn type_name(&self) -> &'static str;

    fn schema(&self) -> Schema;

    /// Create the remote entity and store its ID.
    async fn create(&self, d: &mut ResourceData, meta: &Meta) -> Result<(), ProviderError>;

    /// Refresh `d` from the remote entity. Not-found clears the ID.
    async fn read(&self, d: &mut ResourceData, meta: &Meta) -> Result<(), ProviderError>;

    /// Replace the remote entity with the configuration in `d`.
    async fn update(&self, d: &mut ResourceData, meta: &Meta) -> Result<(), ProviderError>;

    async fn delete(&self, d: &mut ResourceData, meta: &Meta) -> Result<(), ProviderError>;

    /// Resolve a non-numeric import identifier (usually a name) to an ID.
    async fn lookup_id(&self, _name: &str, _meta: &Meta) -> Result<String, ProviderError> {
        Err(ProviderError::NotImportable {
            type_name: self.type_name().to_owned(),
        })
    }

    /// Import an existing entity.
    ///
    /// A numeric identifier is used directly; anything else is resolved
    /// through [`lookup_id`](Self::lookup_id). The entity is then read.
    async fn import(&self, raw: &str, meta: &Meta) -> Result<ResourceData, ProviderError> {
        let raw = raw.trim();
        let id = if raw.parse::<i64>().is_ok() {
            debug!(resource = self.type_name(), id = raw, "importing by ID");
            raw.to_owned()
        } else {
            debug!(resource = self.type_name(), name = raw, "importing by name");
            self.lookup_id(raw, meta).await?
        };

        let mut d = ResourceData::from_state(self.schema(), id.clone(), Map::new());
        self.read(&mut d, meta).await?;
        if d.id().is_none() {
            return Err(ProviderError::NotFound {
                kind: self.type_name(),
                identifier: id,
            });
        }
        Ok(d)
    }
}

#[async_trait]
pub trait DataSource: Send + Sync {
    fn type_name(&self) -> &'static str;

    fn schema(&self) -> Schema;

    /// Look up the entity named by `d` and fill its computed attributes.
    async fn read(&self, d: &mut ResourceData, meta: &Meta) -> Result<(), ProviderError>;
}

// ── Shared operation helpers ─────────────────────────────────────────

/// Unwrap a read result, clearing the ID when the entity is gone.
///
/// Returns `Ok(None)` after state removal so callers can return early.
pub(crate) fn read_or_remove<T>(
    d: &mut ResourceData,
    type_name: &str,
    result: Result<T, zia_api::Error>,
) -> Result<Option<T>, ProviderError> {
    match result {
        Ok(entity) => Ok(Some(entity)),
        Err(e) if e.is_not_found() => {
            warn!(
                resource = type_name,
                id = d.id().unwrap_or_default(),
                "entity no longer exists, removing from state"
            );
            d.clear_id();
            Ok(None)
        }
        Err(e) => Err(e.into()),
    }
}

/// Read back a freshly created entity.
///
/// A not-found read here is an error rather than a silent removal; the ID
/// stays on `d` so the caller can keep tracking what was created.
pub(crate) async fn read_created<R: Resource + ?Sized>(
    resource: &R,
    d: &mut ResourceData,
    meta: &Meta,
) -> Result<(), ProviderError> {
    let id = d.id().unwrap_or_default().to_owned();
    resource.read(d, meta).await?;
    if d.id().is_none() {
        d.set_id(id.clone());
        return Err(ProviderError::MissingAfterCreate {
            kind: resource.type_name(),
            id,
        });
    }
    Ok(())
}

/// How a data source identifies the entity it reads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Lookup {
    Id(i64),
    Name(String),
}

impl Lookup {
    /// Prefer a non-zero `id`, then a non-empty `name_attr`.
    pub(crate) fn from_data(d: &ResourceData, name_attr: &str) -> Result<Self, ProviderError> {
        if let Some(id) = d.get_ok("id").and_then(Value::as_i64) {
            return Ok(Self::Id(id));
        }
        if let Some(name) = d.get_ok(name_attr).and_then(Value::as_str) {
            return Ok(Self::Name(name.to_owned()));
        }
        Err(ProviderError::MissingAttribute {
            attribute: format!("id or {name_attr}"),
        })
    }
}

/// Fail a data source read whose list filter matched nothing.
pub(crate) fn not_found<T>(kind: &'static str, lookup: &Lookup) -> Result<T, ProviderError> {
    let identifier = match lookup {
        Lookup::Id(id) => id.to_string(),
        Lookup::Name(name) => name.clone(),
    };
    Err(ProviderError::NotFound { kind, identifier })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::schema::Attribute;

    fn data(config: Value) -> ResourceData {
        let schema = Schema::new()
            .attr("id", Attribute::int().optional().computed())
            .attr("name", Attribute::string().optional().computed());
        ResourceData::from_config(schema, config.as_object().cloned().unwrap()).unwrap()
    }

    #[test]
    fn lookup_prefers_id() {
        let d = data(json!({"id": 4, "name": "x"}));
        assert_eq!(Lookup::from_data(&d, "name").unwrap(), Lookup::Id(4));
        let d = data(json!({"name": "x"}));
        assert_eq!(Lookup::from_data(&d, "name").unwrap(), Lookup::Name("x".into()));
        let d = data(json!({"id": 0}));
        assert!(Lookup::from_data(&d, "name").is_err());
    }

    #[test]
    fn read_or_remove_clears_on_not_found() {
        let mut d = ResourceData::from_state(Schema::new(), "9", Map::new());
        let gone: Result<(), _> = Err(zia_api::Error::Api {
            status: 404,
            code: None,
            message: "missing".into(),
        });
        assert!(read_or_remove(&mut d, "zia_rule_labels", gone).unwrap().is_none());
        assert!(d.id().is_none());

        let mut d = ResourceData::from_state(Schema::new(), "9", Map::new());
        let failed: Result<(), _> = Err(zia_api::Error::Api {
            status: 500,
            code: None,
            message: "boom".into(),
        });
        assert!(read_or_remove(&mut d, "zia_rule_labels", failed).is_err());
        assert_eq!(d.id(), Some("9"));
    }
}
