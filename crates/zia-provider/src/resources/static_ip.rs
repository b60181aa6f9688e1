// zia_traffic_forwarding_static_ip

use async_trait::async_trait;
use tracing::info;
use zia_api::models::StaticIp;

use crate::activation::trigger_activation;
use crate::convert::flatten_id_name_extensions_single;
use crate::error::ProviderError;
use crate::provider::Meta;
use crate::resource::{Resource, read_created, read_or_remove};
use crate::resource_data::ResourceData;
use crate::schema::{Attribute, Schema, Validation, computed_id_name_extensions};

const TYPE_NAME: &str = "zia_traffic_forwarding_static_ip";

/// Static IP used by GRE tunnels and IP-based VPN credentials.
pub struct StaticIpResource;

// Coordinates are only sent when geo_override is set; otherwise ZIA
// derives them from the address.
fn expand(d: &ResourceData) -> StaticIp {
    let geo_override = d.get_bool("geo_override");
    StaticIp {
        ip_address: d.get_string("ip_address"),
        geo_override,
        latitude: if geo_override { d.get_float("latitude") } else { 0.0 },
        longitude: if geo_override { d.get_float("longitude") } else { 0.0 },
        routable_ip: d.get_bool("routable_ip"),
        comment: d.get_string("comment"),
        ..StaticIp::default()
    }
}

fn flatten(d: &mut ResourceData, ip: &StaticIp) -> Result<(), ProviderError> {
    d.set("static_ip_id", ip.id)?;
    d.set("ip_address", ip.ip_address.as_str())?;
    d.set("geo_override", ip.geo_override)?;
    d.set("latitude", ip.latitude)?;
    d.set("longitude", ip.longitude)?;
    d.set("routable_ip", ip.routable_ip)?;
    d.set("comment", ip.comment.as_str())?;
    d.set("last_modification_time", ip.last_modification_time)?;
    d.set(
        "managed_by",
        flatten_id_name_extensions_single(ip.managed_by.as_ref()),
    )?;
    d.set(
        "last_modified_by",
        flatten_id_name_extensions_single(ip.last_modified_by.as_ref()),
    )?;
    Ok(())
}

fn check_coordinates(d: &ResourceData) -> Result<(), ProviderError> {
    if !d.get_bool("geo_override") {
        return Ok(());
    }
    let latitude = d.get_float("latitude");
    if !(-90.0..=90.0).contains(&latitude) {
        return Err(ProviderError::invalid("latitude", "must be between -90 and 90"));
    }
    let longitude = d.get_float("longitude");
    if !(-180.0..=180.0).contains(&longitude) {
        return Err(ProviderError::invalid("longitude", "must be between -180 and 180"));
    }
    Ok(())
}

#[async_trait]
impl Resource for StaticIpResource {
    fn type_name(&self) -> &'static str {
        TYPE_NAME
    }

    fn schema(&self) -> Schema {
        Schema::new()
            .attr("static_ip_id", Attribute::int().computed())
            .attr(
                "ip_address",
                Attribute::string()
                    .required()
                    .force_new()
                    .validate(Validation::IsIpAddress),
            )
            .attr(
                "geo_override",
                Attribute::boolean()
                    .optional()
                    .default(false)
                    .description("Set latitude and longitude manually"),
            )
            .attr("latitude", Attribute::float().optional().computed())
            .attr("longitude", Attribute::float().optional().computed())
            .attr(
                "routable_ip",
                Attribute::boolean()
                    .optional()
                    .default(true)
                    .description("Whether the address is a routable (non-RFC1918) IP"),
            )
            .attr(
                "comment",
                Attribute::string()
                    .optional()
                    .validate(Validation::StringLenBetween(0, 10240)),
            )
            .attr("last_modification_time", Attribute::int().computed())
            .attr("managed_by", computed_id_name_extensions("Partner managing the address"))
            .attr(
                "last_modified_by",
                computed_id_name_extensions("Admin that last modified the address"),
            )
    }

    async fn create(&self, d: &mut ResourceData, meta: &Meta) -> Result<(), ProviderError> {
        check_coordinates(d)?;
        let ip = meta.client.create_static_ip(&expand(d)).await?;
        info!(resource = TYPE_NAME, id = ip.id, "created");
        d.set_id(ip.id.to_string());
        trigger_activation(meta).await?;
        read_created(self, d, meta).await
    }

    async fn read(&self, d: &mut ResourceData, meta: &Meta) -> Result<(), ProviderError> {
        let id = d.numeric_id()?;
        let result = meta.client.get_static_ip(id).await;
        let Some(ip) = read_or_remove(d, TYPE_NAME, result)? else {
            return Ok(());
        };
        d.set_id(ip.id.to_string());
        flatten(d, &ip)
    }

    async fn update(&self, d: &mut ResourceData, meta: &Meta) -> Result<(), ProviderError> {
        check_coordinates(d)?;
        let id = d.numeric_id()?;
        let result = meta.client.update_static_ip(id, &expand(d)).await;
        if read_or_remove(d, TYPE_NAME, result)?.is_none() {
            return Ok(());
        }
        info!(resource = TYPE_NAME, id, "updated");
        trigger_activation(meta).await?;
        self.read(d, meta).await
    }

    async fn delete(&self, d: &mut ResourceData, meta: &Meta) -> Result<(), ProviderError> {
        let id = d.numeric_id()?;
        meta.client.delete_static_ip(id).await?;
        info!(resource = TYPE_NAME, id, "deleted");
        d.clear_id();
        trigger_activation(meta).await
    }

    /// Import accepts the IP address itself.
    async fn lookup_id(&self, name: &str, meta: &Meta) -> Result<String, ProviderError> {
        let ip = meta.client.get_static_ip_by_address(name).await?;
        Ok(ip.id.to_string())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::{Value, json};

    use super::*;

    fn data(config: Value) -> ResourceData {
        ResourceData::from_config(StaticIpResource.schema(), config.as_object().cloned().unwrap())
            .unwrap()
    }

    #[test]
    fn coordinates_only_sent_with_geo_override() {
        let d = data(json!({"ip_address": "203.0.113.9", "latitude": 10.5, "longitude": 20.0}));
        let ip = expand(&d);
        assert!(ip.latitude.abs() < f64::EPSILON);
        assert!(ip.routable_ip);

        let d = data(json!({
            "ip_address": "203.0.113.9",
            "geo_override": true,
            "latitude": 10.5,
            "longitude": 20.0
        }));
        assert!((expand(&d).latitude - 10.5).abs() < f64::EPSILON);
    }

    #[test]
    fn rejects_out_of_range_latitude() {
        let d = data(json!({"ip_address": "203.0.113.9", "geo_override": true, "latitude": 95.0}));
        assert!(check_coordinates(&d).is_err());
    }
}
