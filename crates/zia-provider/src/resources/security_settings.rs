// zia_security_settings

use async_trait::async_trait;
use serde_json::Map;
use tracing::info;
use zia_api::models::{SecurityBlacklist, SecurityWhitelist};

use crate::activation::trigger_activation;
use crate::convert::{expand_string_set, flatten_string_set};
use crate::error::ProviderError;
use crate::provider::Meta;
use crate::resource::{Resource, read_created};
use crate::resource_data::ResourceData;
use crate::schema::{Attribute, AttributeType, Schema};

const TYPE_NAME: &str = "zia_security_settings";

/// The tenant has exactly one pair of lists; state always uses this ID.
const SETTINGS_ID: &str = "all_urls";

/// Tenant-wide allow and deny URL lists.
///
/// Create and update both replace the two lists; delete only forgets the
/// resource, leaving the remote lists as they are.
pub struct SecuritySettingsResource;

async fn put_lists(d: &ResourceData, meta: &Meta) -> Result<(), ProviderError> {
    let whitelist = SecurityWhitelist {
        whitelist_urls: expand_string_set(d, "whitelist_urls"),
    };
    meta.client.update_security_whitelist(&whitelist).await?;

    let blacklist = SecurityBlacklist {
        blacklist_urls: expand_string_set(d, "blacklist_urls"),
    };
    meta.client.update_security_blacklist(&blacklist).await?;
    Ok(())
}

#[async_trait]
impl Resource for SecuritySettingsResource {
    fn type_name(&self) -> &'static str {
        TYPE_NAME
    }

    fn schema(&self) -> Schema {
        Schema::new()
            .attr(
                "whitelist_urls",
                Attribute::set_of(AttributeType::String)
                    .optional()
                    .computed()
                    .description("URLs allowed regardless of security policy"),
            )
            .attr(
                "blacklist_urls",
                Attribute::set_of(AttributeType::String)
                    .optional()
                    .computed()
                    .description("URLs blocked regardless of security policy"),
            )
    }

    async fn create(&self, d: &mut ResourceData, meta: &Meta) -> Result<(), ProviderError> {
        put_lists(d, meta).await?;
        info!(resource = TYPE_NAME, "security lists replaced");
        d.set_id(SETTINGS_ID);
        trigger_activation(meta).await?;
        read_created(self, d, meta).await
    }

    async fn read(&self, d: &mut ResourceData, meta: &Meta) -> Result<(), ProviderError> {
        let whitelist = meta.client.get_security_whitelist().await?;
        let blacklist = meta.client.get_security_blacklist().await?;
        d.set_id(SETTINGS_ID);
        d.set("whitelist_urls", flatten_string_set(&whitelist.whitelist_urls))?;
        d.set("blacklist_urls", flatten_string_set(&blacklist.blacklist_urls))?;
        Ok(())
    }

    async fn update(&self, d: &mut ResourceData, meta: &Meta) -> Result<(), ProviderError> {
        put_lists(d, meta).await?;
        info!(resource = TYPE_NAME, "security lists replaced");
        trigger_activation(meta).await?;
        self.read(d, meta).await
    }

    async fn delete(&self, d: &mut ResourceData, _meta: &Meta) -> Result<(), ProviderError> {
        d.clear_id();
        Ok(())
    }

    /// Any identifier imports the tenant's lists.
    async fn import(&self, _raw: &str, meta: &Meta) -> Result<ResourceData, ProviderError> {
        let mut d = ResourceData::from_state(self.schema(), SETTINGS_ID, Map::new());
        self.read(&mut d, meta).await?;
        Ok(d)
    }
}
