// zia_location_management, zia_location_groups

use async_trait::async_trait;
use serde_json::{Value, json};
use zia_api::models::{Location, LocationGroup, VpnCredential};

use super::{
    computed_bool, computed_int, computed_string, computed_strings, lookup_schema, set_identity,
};
use crate::convert::flatten_id_name_extensions;
use crate::error::ProviderError;
use crate::provider::Meta;
use crate::resource::{DataSource, Lookup};
use crate::resource_data::ResourceData;
use crate::schema::{Attribute, AttributeType, Schema, computed_id_name_extensions};

// ── Locations ────────────────────────────────────────────────────────

pub struct LocationManagementDataSource;

fn credential_blocks(credentials: &[VpnCredential]) -> Value {
    Value::Array(
        credentials
            .iter()
            .map(|c| {
                json!({
                    "id": c.id,
                    "type": c.credential_type,
                    "fqdn": c.fqdn,
                    "ip_address": c.ip_address,
                    "comments": c.comments,
                })
            })
            .collect(),
    )
}

fn flatten_location(d: &mut ResourceData, location: &Location) -> Result<(), ProviderError> {
    set_identity(d, location.id)?;
    d.set("name", location.name.as_str())?;
    d.set("parent_id", location.parent_id)?;
    d.set("up_bandwidth", location.up_bandwidth)?;
    d.set("dn_bandwidth", location.dn_bandwidth)?;
    d.set("country", location.country.as_str())?;
    d.set("tz", location.tz.as_str())?;
    d.set("ip_addresses", json!(location.ip_addresses))?;
    d.set("ports", json!(location.ports))?;
    d.set("vpn_credentials", credential_blocks(&location.vpn_credentials))?;
    d.set("auth_required", location.auth_required)?;
    d.set("ssl_scan_enabled", location.ssl_scan_enabled)?;
    d.set("zapp_ssl_scan_enabled", location.zapp_ssl_scan_enabled)?;
    d.set("xff_forward_enabled", location.xff_forward_enabled)?;
    d.set("surrogate_ip", location.surrogate_ip)?;
    d.set("idle_time_in_minutes", location.idle_time_in_minutes)?;
    d.set("display_time_unit", location.display_time_unit.as_str())?;
    d.set(
        "surrogate_ip_enforced_for_known_browsers",
        location.surrogate_ip_enforced_for_known_browsers,
    )?;
    d.set(
        "surrogate_refresh_time_in_minutes",
        location.surrogate_refresh_time_in_minutes,
    )?;
    d.set(
        "surrogate_refresh_time_unit",
        location.surrogate_refresh_time_unit.as_str(),
    )?;
    d.set("ofw_enabled", location.ofw_enabled)?;
    d.set("ips_control", location.ips_control)?;
    d.set("aup_enabled", location.aup_enabled)?;
    d.set("caution_enabled", location.caution_enabled)?;
    d.set(
        "aup_block_internet_until_accepted",
        location.aup_block_internet_until_accepted,
    )?;
    d.set("aup_force_ssl_inspection", location.aup_force_ssl_inspection)?;
    d.set("aup_timeout_in_days", location.aup_timeout_in_days)?;
    d.set("profile", location.profile.as_str())?;
    d.set("description", location.description.as_str())?;
    Ok(())
}

#[async_trait]
impl DataSource for LocationManagementDataSource {
    fn type_name(&self) -> &'static str {
        "zia_location_management"
    }

    fn schema(&self) -> Schema {
        let credential = Schema::new()
            .attr("id", computed_int())
            .attr("type", computed_string())
            .attr("fqdn", computed_string())
            .attr("ip_address", computed_string())
            .attr("comments", computed_string());

        lookup_schema("name")
            .attr("parent_id", computed_int())
            .attr("up_bandwidth", computed_int())
            .attr("dn_bandwidth", computed_int())
            .attr("country", computed_string())
            .attr("tz", computed_string())
            .attr("ip_addresses", computed_strings())
            .attr("ports", Attribute::list_of(AttributeType::Int).computed())
            .attr("vpn_credentials", Attribute::list_of_block(credential).computed())
            .attr("auth_required", computed_bool())
            .attr("ssl_scan_enabled", computed_bool())
            .attr("zapp_ssl_scan_enabled", computed_bool())
            .attr("xff_forward_enabled", computed_bool())
            .attr("surrogate_ip", computed_bool())
            .attr("idle_time_in_minutes", computed_int())
            .attr("display_time_unit", computed_string())
            .attr("surrogate_ip_enforced_for_known_browsers", computed_bool())
            .attr("surrogate_refresh_time_in_minutes", computed_int())
            .attr("surrogate_refresh_time_unit", computed_string())
            .attr("ofw_enabled", computed_bool())
            .attr("ips_control", computed_bool())
            .attr("aup_enabled", computed_bool())
            .attr("caution_enabled", computed_bool())
            .attr("aup_block_internet_until_accepted", computed_bool())
            .attr("aup_force_ssl_inspection", computed_bool())
            .attr("aup_timeout_in_days", computed_int())
            .attr("profile", computed_string())
            .attr("description", computed_string())
    }

    async fn read(&self, d: &mut ResourceData, meta: &Meta) -> Result<(), ProviderError> {
        let location = match Lookup::from_data(d, "name")? {
            Lookup::Id(id) => meta.client.get_location(id).await?,
            Lookup::Name(name) => meta.client.get_location_by_name(&name).await?,
        };
        flatten_location(d, &location)
    }
}

// ── Location groups ──────────────────────────────────────────────────

pub struct LocationGroupsDataSource;

fn flatten_group(d: &mut ResourceData, group: &LocationGroup) -> Result<(), ProviderError> {
    set_identity(d, group.id)?;
    d.set("name", group.name.as_str())?;
    d.set("deleted", group.deleted)?;
    d.set("group_type", group.group_type.as_str())?;
    d.set("comments", group.comments.as_str())?;
    d.set("locations", flatten_id_name_extensions(&group.locations))?;
    d.set("last_mod_time", group.last_mod_time)?;
    Ok(())
}

#[async_trait]
impl DataSource for LocationGroupsDataSource {
    fn type_name(&self) -> &'static str {
        "zia_location_groups"
    }

    fn schema(&self) -> Schema {
        lookup_schema("name")
            .attr("deleted", computed_bool())
            .attr("group_type", computed_string())
            .attr("comments", computed_string())
            .attr("locations", computed_id_name_extensions("Member locations"))
            .attr("last_mod_time", computed_int())
    }

    async fn read(&self, d: &mut ResourceData, meta: &Meta) -> Result<(), ProviderError> {
        let group = match Lookup::from_data(d, "name")? {
            Lookup::Id(id) => meta.client.get_location_group(id).await?,
            Lookup::Name(name) => meta.client.get_location_group_by_name(&name).await?,
        };
        flatten_group(d, &group)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::Map;

    use super::*;

    #[test]
    fn location_lists_linked_credentials() {
        let location = Location {
            id: 5,
            name: "HQ".into(),
            vpn_credentials: vec![VpnCredential {
                id: 9,
                credential_type: "UFQDN".into(),
                fqdn: "hq@example.com".into(),
                ..VpnCredential::default()
            }],
            ..Location::default()
        };
        let mut d = ResourceData::from_state(LocationManagementDataSource.schema(), "", Map::new());
        flatten_location(&mut d, &location).unwrap();
        assert_eq!(d.id(), Some("5"));
        assert_eq!(d.get_int("vpn_credentials.0.id"), 9);
        assert_eq!(d.get_string("vpn_credentials.0.fqdn"), "hq@example.com");
    }

    #[test]
    fn empty_group_has_empty_location_list() {
        let group = LocationGroup {
            id: 11,
            name: "Corporate".into(),
            ..LocationGroup::default()
        };
        let mut d = ResourceData::from_state(LocationGroupsDataSource.schema(), "", Map::new());
        flatten_group(&mut d, &group).unwrap();
        assert_eq!(d.get_int("id"), 11);
        assert_eq!(d.get("locations"), Some(&json!([])));
    }
}
