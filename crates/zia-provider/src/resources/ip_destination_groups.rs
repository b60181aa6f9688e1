// zia_firewall_filtering_destination_groups

use async_trait::async_trait;
use tracing::info;
use zia_api::models::IpDestinationGroup;

use crate::activation::trigger_activation;
use crate::convert::{expand_string_set, flatten_string_set};
use crate::error::ProviderError;
use crate::provider::Meta;
use crate::resource::{Resource, read_created, read_or_remove};
use crate::resource_data::ResourceData;
use crate::schema::{Attribute, AttributeType, Schema, Validation};

const TYPE_NAME: &str = "zia_firewall_filtering_destination_groups";

const GROUP_TYPES: &[&str] = &["DSTN_IP", "DSTN_FQDN", "DSTN_DOMAIN", "DSTN_OTHER"];

/// Destination IP group: addresses, FQDNs, IP categories or countries.
pub struct IpDestinationGroupsResource;

fn expand(d: &ResourceData) -> IpDestinationGroup {
    IpDestinationGroup {
        name: d.get_string("name"),
        group_type: d.get_string("type"),
        addresses: expand_string_set(d, "addresses"),
        description: d.get_string("description"),
        ip_categories: expand_string_set(d, "ip_categories"),
        countries: expand_string_set(d, "countries"),
        ..IpDestinationGroup::default()
    }
}

fn flatten(d: &mut ResourceData, group: &IpDestinationGroup) -> Result<(), ProviderError> {
    d.set("ip_destination_group_id", group.id)?;
    d.set("name", group.name.as_str())?;
    d.set("type", group.group_type.as_str())?;
    d.set("addresses", flatten_string_set(&group.addresses))?;
    d.set("description", group.description.as_str())?;
    d.set("ip_categories", flatten_string_set(&group.ip_categories))?;
    d.set("countries", flatten_string_set(&group.countries))?;
    Ok(())
}

#[async_trait]
impl Resource for IpDestinationGroupsResource {
    fn type_name(&self) -> &'static str {
        TYPE_NAME
    }

    fn schema(&self) -> Schema {
        Schema::new()
            .attr("ip_destination_group_id", Attribute::int().computed())
            .attr(
                "name",
                Attribute::string()
                    .required()
                    .validate(Validation::StringLenBetween(1, 255)),
            )
            .attr(
                "type",
                Attribute::string()
                    .optional()
                    .computed()
                    .validate(Validation::one_of(GROUP_TYPES)),
            )
            .attr(
                "addresses",
                Attribute::set_of(AttributeType::String)
                    .optional()
                    .computed()
                    .description("Destination IP addresses, FQDNs or wildcard FQDNs"),
            )
            .attr("description", Attribute::string().optional())
            .attr(
                "ip_categories",
                Attribute::set_of(AttributeType::String).optional().computed(),
            )
            .attr(
                "countries",
                Attribute::set_of(AttributeType::String)
                    .optional()
                    .computed()
                    .description("Destination countries, as COUNTRY_ ISO codes"),
            )
    }

    async fn create(&self, d: &mut ResourceData, meta: &Meta) -> Result<(), ProviderError> {
        let group = meta.client.create_ip_destination_group(&expand(d)).await?;
        info!(resource = TYPE_NAME, id = group.id, "created");
        d.set_id(group.id.to_string());
        trigger_activation(meta).await?;
        read_created(self, d, meta).await
    }

    async fn read(&self, d: &mut ResourceData, meta: &Meta) -> Result<(), ProviderError> {
        let id = d.numeric_id()?;
        let result = meta.client.get_ip_destination_group(id).await;
        let Some(group) = read_or_remove(d, TYPE_NAME, result)? else {
            return Ok(());
        };
        d.set_id(group.id.to_string());
        flatten(d, &group)
    }

    async fn update(&self, d: &mut ResourceData, meta: &Meta) -> Result<(), ProviderError> {
        let id = d.numeric_id()?;
        let result = meta.client.update_ip_destination_group(id, &expand(d)).await;
        if read_or_remove(d, TYPE_NAME, result)?.is_none() {
            return Ok(());
        }
        info!(resource = TYPE_NAME, id, "updated");
        trigger_activation(meta).await?;
        self.read(d, meta).await
    }

    async fn delete(&self, d: &mut ResourceData, meta: &Meta) -> Result<(), ProviderError> {
        let id = d.numeric_id()?;
        meta.client.delete_ip_destination_group(id).await?;
        info!(resource = TYPE_NAME, id, "deleted");
        d.clear_id();
        trigger_activation(meta).await
    }

    async fn lookup_id(&self, name: &str, meta: &Meta) -> Result<String, ProviderError> {
        let group = meta.client.get_ip_destination_group_by_name(name).await?;
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
        let schema = IpDestinationGroupsResource.schema();
        let config = json!({
            "name": "embargoed",
            "type": "DSTN_OTHER",
            "countries": ["COUNTRY_CU", "COUNTRY_KP"],
            "ip_categories": ["CUSTOM_01"]
        });
        let d = ResourceData::from_config(schema.clone(), config.as_object().cloned().unwrap())
            .unwrap();
        let mut group = expand(&d);
        assert_eq!(group.group_type, "DSTN_OTHER");
        assert!(group.addresses.is_empty());

        group.id = 8;
        let mut out = ResourceData::from_state(schema, "8", Map::new());
        flatten(&mut out, &group).unwrap();
        assert_eq!(out.get_int("ip_destination_group_id"), 8);
        assert_eq!(out.get_string("type"), "DSTN_OTHER");
        assert_eq!(out.get_string_set("countries"), vec!["COUNTRY_CU", "COUNTRY_KP"]);
        assert_eq!(out.get_string_set("ip_categories"), vec!["CUSTOM_01"]);
        // Empty sets stay unset instead of becoming empty lists.
        assert!(out.get("addresses").is_none());
    }

    #[test]
    fn rejects_unknown_group_type() {
        let config = json!({"name": "g", "type": "DSTN_ANY"});
        let err = ResourceData::from_config(
            IpDestinationGroupsResource.schema(),
            config.as_object().cloned().unwrap(),
        )
        .unwrap_err();
        assert!(matches!(err, ProviderError::Validation(_)));
    }
}
