// zia_traffic_forwarding_vpn_credentials, zia_traffic_forwarding_static_ip

use async_trait::async_trait;
use serde_json::Value;
use zia_api::models::{StaticIp, VpnCredential};

use super::{computed_bool, computed_int, computed_string, set_identity};
use crate::convert::flatten_id_name_extensions_single;
use crate::error::ProviderError;
use crate::provider::Meta;
use crate::resource::{DataSource, Lookup};
use crate::resource_data::ResourceData;
use crate::schema::{Attribute, Schema, computed_id_name_extensions};

// ── VPN credentials ──────────────────────────────────────────────────

pub struct VpnCredentialsDataSource;

fn flatten_credential(d: &mut ResourceData, credential: &VpnCredential) -> Result<(), ProviderError> {
    set_identity(d, credential.id)?;
    d.set("type", credential.credential_type.as_str())?;
    d.set("fqdn", credential.fqdn.as_str())?;
    d.set("ip_address", credential.ip_address.as_str())?;
    d.set("comments", credential.comments.as_str())?;
    d.set(
        "location",
        flatten_id_name_extensions_single(credential.location.as_ref()),
    )?;
    d.set(
        "managed_by",
        flatten_id_name_extensions_single(credential.managed_by.as_ref()),
    )?;
    Ok(())
}

#[async_trait]
impl DataSource for VpnCredentialsDataSource {
    fn type_name(&self) -> &'static str {
        "zia_traffic_forwarding_vpn_credentials"
    }

    fn schema(&self) -> Schema {
        Schema::new()
            .attr("id", Attribute::int().optional().computed())
            .attr("fqdn", Attribute::string().optional().computed())
            .attr("ip_address", Attribute::string().optional().computed())
            .attr("type", computed_string())
            .attr("comments", computed_string())
            .attr("location", computed_id_name_extensions("Linked location"))
            .attr("managed_by", computed_id_name_extensions("Managing partner"))
    }

    /// Selected by `id`, `fqdn` or `ip_address`, in that order.
    async fn read(&self, d: &mut ResourceData, meta: &Meta) -> Result<(), ProviderError> {
        let ip = d.get_ok("ip_address").and_then(Value::as_str).map(str::to_owned);
        let credential = match (Lookup::from_data(d, "fqdn"), ip) {
            (Ok(Lookup::Id(id)), _) => meta.client.get_vpn_credential(id).await?,
            (Ok(Lookup::Name(fqdn)), _) => meta.client.get_vpn_credential_by_fqdn(&fqdn).await?,
            (Err(_), Some(ip)) => meta.client.get_vpn_credential_by_ip(&ip).await?,
            (Err(_), None) => {
                return Err(ProviderError::MissingAttribute {
                    attribute: "id, fqdn or ip_address".into(),
                });
            }
        };
        flatten_credential(d, &credential)
    }
}

// ── Static IPs ───────────────────────────────────────────────────────

pub struct StaticIpDataSource;

fn flatten_static_ip(d: &mut ResourceData, ip: &StaticIp) -> Result<(), ProviderError> {
    set_identity(d, ip.id)?;
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

#[async_trait]
impl DataSource for StaticIpDataSource {
    fn type_name(&self) -> &'static str {
        "zia_traffic_forwarding_static_ip"
    }

    fn schema(&self) -> Schema {
        Schema::new()
            .attr("id", Attribute::int().optional().computed())
            .attr("ip_address", Attribute::string().optional().computed())
            .attr("geo_override", computed_bool())
            .attr("latitude", Attribute::float().computed())
            .attr("longitude", Attribute::float().computed())
            .attr("routable_ip", computed_bool())
            .attr("comment", computed_string())
            .attr("last_modification_time", computed_int())
            .attr("managed_by", computed_id_name_extensions("Managing partner"))
            .attr("last_modified_by", computed_id_name_extensions("Last editor"))
    }

    async fn read(&self, d: &mut ResourceData, meta: &Meta) -> Result<(), ProviderError> {
        let ip = match Lookup::from_data(d, "ip_address")? {
            Lookup::Id(id) => meta.client.get_static_ip(id).await?,
            Lookup::Name(address) => meta.client.get_static_ip_by_address(&address).await?,
        };
        flatten_static_ip(d, &ip)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::{Map, json};
    use zia_api::models::IdNameExtensions;

    use super::*;

    #[test]
    fn unlinked_credential_has_empty_location() {
        let credential = VpnCredential {
            id: 9,
            credential_type: "UFQDN".into(),
            fqdn: "branch@example.com".into(),
            managed_by: Some(IdNameExtensions {
                id: 2,
                name: "partner".into(),
                ..IdNameExtensions::default()
            }),
            ..VpnCredential::default()
        };
        let mut d = ResourceData::from_state(VpnCredentialsDataSource.schema(), "", Map::new());
        flatten_credential(&mut d, &credential).unwrap();
        assert_eq!(d.id(), Some("9"));
        assert_eq!(d.get_string("fqdn"), "branch@example.com");
        assert_eq!(d.get("location"), Some(&json!([])));
        assert_eq!(d.get_string("managed_by.0.name"), "partner");
    }

    #[test]
    fn static_ip_flattens_coordinates() {
        let ip = StaticIp {
            id: 3,
            ip_address: "203.0.113.7".into(),
            geo_override: true,
            latitude: 48.85,
            longitude: 2.35,
            ..StaticIp::default()
        };
        let mut d = ResourceData::from_state(StaticIpDataSource.schema(), "", Map::new());
        flatten_static_ip(&mut d, &ip).unwrap();
        assert_eq!(d.get_int("id"), 3);
        assert!(d.get_bool("geo_override"));
        assert_eq!(d.get("latitude"), Some(&json!(48.85)));
        assert_eq!(d.get("managed_by"), Some(&json!([])));
        assert_eq!(d.get("last_modified_by"), Some(&json!([])));
    }
}
