// zia_auth_settings_urls

use std::collections::BTreeSet;

use async_trait::async_trait;
use serde_json::Map;
use tracing::info;

use crate::activation::trigger_activation;
use crate::convert::{expand_string_set, flatten_string_set};
use crate::error::ProviderError;
use crate::provider::Meta;
use crate::resource::{Resource, read_created};
use crate::resource_data::ResourceData;
use crate::schema::{Attribute, AttributeType, Schema};

const TYPE_NAME: &str = "zia_auth_settings_urls";

const EXEMPTED_URLS_ID: &str = "all_urls";

/// URLs exempted from authentication.
///
/// The API edits the list by delta, so writes diff the configured set
/// against the remote one and send only additions and removals.
pub struct AuthSettingsUrlsResource;

/// `(to_add, to_remove)` turning `current` into `desired`.
fn diff(current: &[String], desired: &[String]) -> (Vec<String>, Vec<String>) {
    let current: BTreeSet<&String> = current.iter().collect();
    let desired: BTreeSet<&String> = desired.iter().collect();
    let add = desired.difference(&current).map(|s| (*s).clone()).collect();
    let remove = current.difference(&desired).map(|s| (*s).clone()).collect();
    (add, remove)
}

async fn sync_urls(d: &ResourceData, meta: &Meta) -> Result<(), ProviderError> {
    let current = meta.client.get_exempted_urls().await?;
    let (add, remove) = diff(&current.urls, &expand_string_set(d, "urls"));
    meta.client.add_exempted_urls(&add).await?;
    meta.client.remove_exempted_urls(&remove).await?;
    info!(
        resource = TYPE_NAME,
        added = add.len(),
        removed = remove.len(),
        "exempted urls synced"
    );
    Ok(())
}

#[async_trait]
impl Resource for AuthSettingsUrlsResource {
    fn type_name(&self) -> &'static str {
        TYPE_NAME
    }

    fn schema(&self) -> Schema {
        Schema::new().attr(
            "urls",
            Attribute::set_of(AttributeType::String)
                .optional()
                .computed()
                .description("Domains or URLs exempted from authentication"),
        )
    }

    async fn create(&self, d: &mut ResourceData, meta: &Meta) -> Result<(), ProviderError> {
        sync_urls(d, meta).await?;
        d.set_id(EXEMPTED_URLS_ID);
        trigger_activation(meta).await?;
        read_created(self, d, meta).await
    }

    async fn read(&self, d: &mut ResourceData, meta: &Meta) -> Result<(), ProviderError> {
        let exempted = meta.client.get_exempted_urls().await?;
        d.set_id(EXEMPTED_URLS_ID);
        d.set("urls", flatten_string_set(&exempted.urls))
    }

    async fn update(&self, d: &mut ResourceData, meta: &Meta) -> Result<(), ProviderError> {
        sync_urls(d, meta).await?;
        trigger_activation(meta).await?;
        self.read(d, meta).await
    }

    async fn delete(&self, d: &mut ResourceData, _meta: &Meta) -> Result<(), ProviderError> {
        d.clear_id();
        Ok(())
    }

    async fn import(&self, _raw: &str, meta: &Meta) -> Result<ResourceData, ProviderError> {
        let mut d = ResourceData::from_state(self.schema(), EXEMPTED_URLS_ID, Map::new());
        self.read(&mut d, meta).await?;
        Ok(d)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| (*s).to_owned()).collect()
    }

    #[test]
    fn diff_splits_additions_and_removals() {
        let (add, remove) = diff(
            &strings(&["a.example.com", "b.example.com"]),
            &strings(&["b.example.com", "c.example.com"]),
        );
        assert_eq!(add, strings(&["c.example.com"]));
        assert_eq!(remove, strings(&["a.example.com"]));
    }

    #[test]
    fn diff_of_equal_sets_is_empty() {
        let urls = strings(&["a.example.com"]);
        let (add, remove) = diff(&urls, &urls);
        assert!(add.is_empty());
        assert!(remove.is_empty());
    }
}
