// ── Provider registry and runtime metadata ──

use indexmap::IndexMap;
use strum::IntoEnumIterator;
use tracing::info;
use url::Url;
use zia_api::{Credentials, TransportConfig, ZiaClient, ZiaCloud};

use crate::activation::ActivationSettings;
use crate::data_sources;
use crate::error::ProviderError;
use crate::resource::{DataSource, Resource};
use crate::resources;
use crate::schema::{Attribute, Schema, Validation};

/// Everything needed to open a ZIA session.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub base_url: Url,
    pub credentials: Credentials,
    pub transport: TransportConfig,
    pub activation: ActivationSettings,
}

impl ProviderConfig {
    /// Config for a public cloud with default transport and env-driven activation.
    pub fn for_cloud(cloud: ZiaCloud, credentials: Credentials) -> Self {
        Self {
            base_url: cloud.base_url(),
            credentials,
            transport: TransportConfig::default(),
            activation: ActivationSettings::from_env(),
        }
    }
}

/// Shared runtime state handed to every operation: the API client and
/// the activation settings. Nothing else is shared between resources.
#[derive(Clone)]
pub struct Meta {
    pub client: ZiaClient,
    pub activation: ActivationSettings,
}

impl Meta {
    /// Wrap an already authenticated (or mock) client.
    pub fn new(client: ZiaClient, activation: ActivationSettings) -> Self {
        Self { client, activation }
    }

    /// End the API session.
    pub async fn close(&self) -> Result<(), ProviderError> {
        self.client.logout().await?;
        Ok(())
    }
}

/// Registry of every resource and data source type.
pub struct Provider {
    resources: IndexMap<&'static str, Box<dyn Resource>>,
    data_sources: IndexMap<&'static str, Box<dyn DataSource>>,
}

impl Default for Provider {
    fn default() -> Self {
        Self::new()
    }
}

impl Provider {
    pub fn new() -> Self {
        let resources = resources::all()
            .into_iter()
            .map(|r| (r.type_name(), r))
            .collect();
        let data_sources = data_sources::all()
            .into_iter()
            .map(|ds| (ds.type_name(), ds))
            .collect();
        Self {
            resources,
            data_sources,
        }
    }

    /// Provider-level configuration block.
    pub fn schema() -> Schema {
        let clouds: Vec<String> = ZiaCloud::iter().map(|c| c.to_string()).collect();
        Schema::new()
            .attr(
                "username",
                Attribute::string().optional().description("ZIA admin username (ZIA_USERNAME)"),
            )
            .attr(
                "password",
                Attribute::string()
                    .optional()
                    .sensitive()
                    .description("ZIA admin password (ZIA_PASSWORD)"),
            )
            .attr(
                "api_key",
                Attribute::string()
                    .optional()
                    .sensitive()
                    .description("ZIA API key (ZIA_API_KEY)"),
            )
            .attr(
                "zia_cloud",
                Attribute::string()
                    .optional()
                    .validate(Validation::OneOf(clouds))
                    .description("ZIA cloud name (ZIA_CLOUD)"),
            )
    }

    pub fn resource(&self, type_name: &str) -> Result<&dyn Resource, ProviderError> {
        self.resources
            .get(type_name)
            .map(AsRef::as_ref)
            .ok_or_else(|| ProviderError::UnknownResource {
                type_name: type_name.to_owned(),
            })
    }

    pub fn data_source(&self, type_name: &str) -> Result<&dyn DataSource, ProviderError> {
        self.data_sources
            .get(type_name)
            .map(AsRef::as_ref)
            .ok_or_else(|| ProviderError::UnknownResource {
                type_name: type_name.to_owned(),
            })
    }

    pub fn resource_types(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.resources.keys().copied()
    }

    pub fn data_source_types(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.data_sources.keys().copied()
    }

    /// Open an authenticated session and build the runtime metadata.
    pub async fn configure(&self, config: ProviderConfig) -> Result<Meta, ProviderError> {
        let client = ZiaClient::new(config.base_url, &config.transport)?;
        client.login(&config.credentials).await?;
        info!(
            base_url = %client.base_url(),
            activation = config.activation.enabled,
            "provider configured"
        );
        Ok(Meta::new(client, config.activation))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn registry_knows_every_type() {
        let provider = Provider::new();
        assert_eq!(provider.resource_types().count(), 16);
        assert_eq!(provider.data_source_types().count(), 20);
        assert!(provider.resource("zia_rule_labels").is_ok());
        assert!(provider.data_source("zia_location_groups").is_ok());
        assert!(matches!(
            provider.resource("zia_nope"),
            Err(ProviderError::UnknownResource { .. })
        ));
    }

    #[test]
    fn type_names_match_registry_keys() {
        let provider = Provider::new();
        for name in provider.resource_types() {
            assert_eq!(provider.resource(name).unwrap().type_name(), name);
            assert!(!provider.resource(name).unwrap().schema().is_empty());
        }
        for name in provider.data_source_types() {
            assert_eq!(provider.data_source(name).unwrap().type_name(), name);
        }
    }

    #[test]
    fn provider_schema_lists_clouds() {
        let schema = Provider::schema();
        let cloud = schema.get("zia_cloud").unwrap();
        assert!(matches!(&cloud.validations[0], Validation::OneOf(v) if v.contains(&"zscalertwo".to_owned())));
    }
}
