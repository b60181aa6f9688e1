// zia_firewall_filtering_ip_source_groups

use async_trait::async_trait;
use tracing::info;
use zia_api::models::IpSourceGroup;

use crate::activation::trigger_activation;
use crate::convert::{expand_string_set, flatten_string_set};
use crate::error::ProviderError;
use crate::provider::Meta;
use crate::resource::{Resource, read_created, read_or_remove};
use crate::resource_data::ResourceData;
use crate::schema::{Attribute, AttributeType, Schema, Validation};

const TYPE_NAME: &str = "zia_firewall_filtering_ip_source_groups";

pub struct IpSourceGroupsResource;

fn expand(d: &ResourceData) -> IpSourceGroup {
    IpSourceGroup {
        name: d.get_string("name"),
        description: d.get_string("description"),
        ip_addresses: expand_string_set(d, "ip_addresses"),
        ..IpSourceGroup::default()
    }
}

fn flatten(d: &mut ResourceData, group: &IpSourceGroup) -> Result<(), ProviderError> {
    d.set("ip_source_group_id", group.id)?;
    d.set("name", group.name.as_str())?;
    d.set("description", group.description.as_str())?;
    d.set("ip_addresses", flatten_string_set(&group.ip_addresses))?;
    Ok(())
}

#[async_trait]
impl Resource for IpSourceGroupsResource {
    fn type_name(&self) -> &'static str {
        TYPE_NAME
    }

    fn schema(&self) -> Schema {
        Schema::new()
            .attr("ip_source_group_id", Attribute::int().computed())
            .attr(
                "name",
                Attribute::string()
                    .required()
                    .validate(Validation::StringLenBetween(1, 255)),
            )
            .attr("description", Attribute::string().optional())
            .attr(
                "ip_addresses",
                Attribute::set_of(AttributeType::String)
                    .optional()
                    .computed()
                    .validate(Validation::IsCidrOrIp)
                    .description("Source IP addresses added to the group"),
            )
    }

    async fn create(&self, d: &mut ResourceData, meta: &Meta) -> Result<(), ProviderError> {
        let group = meta.client.create_ip_source_group(&expand(d)).await?;
        info!(resource = TYPE_NAME, id = group.id, "created");
        d.set_id(group.id.to_string());
        trigger_activation(meta).await?;
        read_created(self, d, meta).await
    }

    async fn read(&self, d: &mut ResourceData, meta: &Meta) -> Result<(), ProviderError> {
        let id = d.numeric_id()?;
        let result = meta.client.get_ip_source_group(id).await;
        let Some(group) = read_or_remove(d, TYPE_NAME, result)? else {
            return Ok(());
        };
        d.set_id(group.id.to_string());
        flatten(d, &group)
    }

    async fn update(&self, d: &mut ResourceData, meta: &Meta) -> Result<(), ProviderError> {
        let id = d.numeric_id()?;
        let result = meta.client.update_ip_source_group(id, &expand(d)).await;
        if read_or_remove(d, TYPE_NAME, result)?.is_none() {
            return Ok(());
        }
        info!(resource = TYPE_NAME, id, "updated");
        trigger_activation(meta).await?;
        self.read(d, meta).await
    }

    async fn delete(&self, d: &mut ResourceData, meta: &Meta) -> Result<(), ProviderError> {
        let id = d.numeric_id()?;
        meta.client.delete_ip_source_group(id).await?;
        info!(resource = TYPE_NAME, id, "deleted");
        d.clear_id();
        trigger_activation(meta).await
    }

    async fn lookup_id(&self, name: &str, meta: &Meta) -> Result<String, ProviderError> {
        let group = meta.client.get_ip_source_group_by_name(name).await?;
        Ok(group.id.to_string())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::{Map, json};

    use super::*;

    #[test]
    fn expand_then_flatten_round_trips() {
        let schema = IpSourceGroupsResource.schema();
        let config = json!({
            "name": "branch-offices",
            "description": "RFC1918 ranges",
            "ip_addresses": ["10.0.0.0/8", "192.168.1.1"]
        });
        let d = ResourceData::from_config(schema.clone(), config.as_object().cloned().unwrap())
            .unwrap();
        let mut group = expand(&d);
        assert_eq!(group.id, 0);
        assert_eq!(group.ip_addresses, vec!["10.0.0.0/8", "192.168.1.1"]);

        group.id = 31;
        let mut out = ResourceData::from_state(schema, "31", Map::new());
        flatten(&mut out, &group).unwrap();
        assert_eq!(out.get_int("ip_source_group_id"), 31);
        assert_eq!(out.get_string("name"), "branch-offices");
        assert_eq!(out.get_string("description"), "RFC1918 ranges");
        assert_eq!(out.get_string_set("ip_addresses"), vec!["10.0.0.0/8", "192.168.1.1"]);
    }

    #[test]
    fn rejects_malformed_address() {
        let config = json!({"name": "g", "ip_addresses": ["not-an-ip"]});
        let err = ResourceData::from_config(
            IpSourceGroupsResource.schema(),
            config.as_object().cloned().unwrap(),
        )
        .unwrap_err();
        assert!(matches!(err, ProviderError::Validation(_)));
    }
}
