// zia_firewall_filtering_rule, zia_firewall_filtering_network_service,
// zia_firewall_filtering_ip_source_groups,
// zia_firewall_filtering_destination_groups, zia_firewall_filtering_time_window

use async_trait::async_trait;
use serde_json::{Value, json};
use zia_api::models::{
    FirewallFilteringRule, IpDestinationGroup, IpSourceGroup, NetworkPorts, NetworkService,
    TimeWindow,
};

use super::{
    computed_bool, computed_int, computed_string, computed_strings, lookup_schema, set_identity,
};
use crate::convert::{flatten_id_name_extensions, flatten_id_name_extensions_single};
use crate::error::ProviderError;
use crate::provider::Meta;
use crate::resource::{DataSource, Lookup, not_found};
use crate::resource_data::ResourceData;
use crate::schema::{Attribute, Schema, computed_id_name_extensions};

// ── Filtering rules ──────────────────────────────────────────────────

const RULE_REFERENCES: &[&str] = &[
    "locations",
    "location_groups",
    "departments",
    "groups",
    "users",
    "time_windows",
    "labels",
    "src_ip_groups",
    "dest_ip_groups",
    "nw_services",
    "nw_service_groups",
    "nw_application_groups",
    "app_services",
    "app_service_groups",
];

pub struct FirewallFilteringRuleDataSource;

fn flatten_rule(d: &mut ResourceData, rule: &FirewallFilteringRule) -> Result<(), ProviderError> {
    set_identity(d, rule.id)?;
    d.set("name", rule.name.as_str())?;
    d.set("order", rule.order)?;
    d.set("rank", rule.rank)?;
    d.set("access_control", rule.access_control.clone())?;
    d.set("enable_full_logging", rule.enable_full_logging)?;
    d.set("action", rule.action.as_str())?;
    d.set("state", rule.state.as_str())?;
    d.set("description", rule.description.as_str())?;
    d.set("last_modified_time", rule.last_modified_time)?;
    d.set(
        "last_modified_by",
        flatten_id_name_extensions_single(rule.last_modified_by.as_ref()),
    )?;
    d.set("src_ips", json!(rule.src_ips))?;
    d.set("dest_addresses", json!(rule.dest_addresses))?;
    d.set("dest_ip_categories", json!(rule.dest_ip_categories))?;
    d.set("dest_countries", json!(rule.dest_countries))?;
    d.set("nw_applications", json!(rule.nw_applications))?;
    d.set("default_rule", rule.default_rule)?;
    d.set("predefined", rule.predefined)?;

    let references = [
        &rule.locations,
        &rule.location_groups,
        &rule.departments,
        &rule.groups,
        &rule.users,
        &rule.time_windows,
        &rule.labels,
        &rule.src_ip_groups,
        &rule.dest_ip_groups,
        &rule.nw_services,
        &rule.nw_service_groups,
        &rule.nw_application_groups,
        &rule.app_services,
        &rule.app_service_groups,
    ];
    for (key, list) in RULE_REFERENCES.iter().zip(references) {
        d.set(key, flatten_id_name_extensions(list))?;
    }
    Ok(())
}

#[async_trait]
impl DataSource for FirewallFilteringRuleDataSource {
    fn type_name(&self) -> &'static str {
        "zia_firewall_filtering_rule"
    }

    fn schema(&self) -> Schema {
        let mut schema = lookup_schema("name")
            .attr("order", computed_int())
            .attr("rank", computed_int())
            .attr("access_control", computed_string())
            .attr("enable_full_logging", computed_bool())
            .attr("action", computed_string())
            .attr("state", computed_string())
            .attr("description", computed_string())
            .attr("last_modified_time", computed_int())
            .attr(
                "last_modified_by",
                computed_id_name_extensions("Admin that last modified the rule"),
            )
            .attr("src_ips", computed_strings())
            .attr("dest_addresses", computed_strings())
            .attr("dest_ip_categories", computed_strings())
            .attr("dest_countries", computed_strings())
            .attr("nw_applications", computed_strings())
            .attr("default_rule", computed_bool())
            .attr("predefined", computed_bool());
        for key in RULE_REFERENCES {
            schema = schema.attr(key, computed_id_name_extensions(key));
        }
        schema
    }

    async fn read(&self, d: &mut ResourceData, meta: &Meta) -> Result<(), ProviderError> {
        let rule = match Lookup::from_data(d, "name")? {
            Lookup::Id(id) => meta.client.get_firewall_rule(id).await?,
            Lookup::Name(name) => meta.client.get_firewall_rule_by_name(&name).await?,
        };
        flatten_rule(d, &rule)
    }
}

// ── Network services ─────────────────────────────────────────────────

pub struct NetworkServiceDataSource;

fn flatten_port_ranges(ports: &[NetworkPorts]) -> Value {
    Value::Array(
        ports
            .iter()
            .map(|p| json!({"start": p.start, "end": p.end}))
            .collect(),
    )
}

fn port_ranges() -> Attribute {
    Attribute::list_of_block(
        Schema::new()
            .attr("start", computed_int())
            .attr("end", computed_int()),
    )
    .computed()
}

fn flatten_service(d: &mut ResourceData, service: &NetworkService) -> Result<(), ProviderError> {
    set_identity(d, service.id)?;
    d.set("name", service.name.as_str())?;
    d.set("tag", service.tag.clone())?;
    d.set("src_tcp_ports", flatten_port_ranges(&service.src_tcp_ports))?;
    d.set("dest_tcp_ports", flatten_port_ranges(&service.dest_tcp_ports))?;
    d.set("src_udp_ports", flatten_port_ranges(&service.src_udp_ports))?;
    d.set("dest_udp_ports", flatten_port_ranges(&service.dest_udp_ports))?;
    d.set("type", service.service_type.as_str())?;
    d.set("description", service.description.as_str())?;
    Ok(())
}

#[async_trait]
impl DataSource for NetworkServiceDataSource {
    fn type_name(&self) -> &'static str {
        "zia_firewall_filtering_network_service"
    }

    fn schema(&self) -> Schema {
        lookup_schema("name")
            .attr("tag", computed_string())
            .attr("src_tcp_ports", port_ranges())
            .attr("dest_tcp_ports", port_ranges())
            .attr("src_udp_ports", port_ranges())
            .attr("dest_udp_ports", port_ranges())
            .attr("type", computed_string())
            .attr("description", computed_string())
    }

    async fn read(&self, d: &mut ResourceData, meta: &Meta) -> Result<(), ProviderError> {
        let service = match Lookup::from_data(d, "name")? {
            Lookup::Id(id) => meta.client.get_network_service(id).await?,
            Lookup::Name(name) => meta.client.get_network_service_by_name(&name).await?,
        };
        flatten_service(d, &service)
    }
}

// ── IP groups ────────────────────────────────────────────────────────

pub struct IpSourceGroupsDataSource;

fn flatten_source_group(d: &mut ResourceData, group: &IpSourceGroup) -> Result<(), ProviderError> {
    set_identity(d, group.id)?;
    d.set("name", group.name.as_str())?;
    d.set("ip_addresses", json!(group.ip_addresses))?;
    d.set("description", group.description.as_str())?;
    Ok(())
}

#[async_trait]
impl DataSource for IpSourceGroupsDataSource {
    fn type_name(&self) -> &'static str {
        "zia_firewall_filtering_ip_source_groups"
    }

    fn schema(&self) -> Schema {
        lookup_schema("name")
            .attr("ip_addresses", computed_strings())
            .attr("description", computed_string())
    }

    async fn read(&self, d: &mut ResourceData, meta: &Meta) -> Result<(), ProviderError> {
        let group = match Lookup::from_data(d, "name")? {
            Lookup::Id(id) => meta.client.get_ip_source_group(id).await?,
            Lookup::Name(name) => meta.client.get_ip_source_group_by_name(&name).await?,
        };
        flatten_source_group(d, &group)
    }
}

pub struct IpDestinationGroupsDataSource;

fn flatten_destination_group(
    d: &mut ResourceData,
    group: &IpDestinationGroup,
) -> Result<(), ProviderError> {
    set_identity(d, group.id)?;
    d.set("name", group.name.as_str())?;
    d.set("type", group.group_type.as_str())?;
    d.set("addresses", json!(group.addresses))?;
    d.set("description", group.description.as_str())?;
    d.set("ip_categories", json!(group.ip_categories))?;
    d.set("countries", json!(group.countries))?;
    Ok(())
}

#[async_trait]
impl DataSource for IpDestinationGroupsDataSource {
    fn type_name(&self) -> &'static str {
        "zia_firewall_filtering_destination_groups"
    }

    fn schema(&self) -> Schema {
        lookup_schema("name")
            .attr("type", computed_string())
            .attr("addresses", computed_strings())
            .attr("description", computed_string())
            .attr("ip_categories", computed_strings())
            .attr("countries", computed_strings())
    }

    async fn read(&self, d: &mut ResourceData, meta: &Meta) -> Result<(), ProviderError> {
        let group = match Lookup::from_data(d, "name")? {
            Lookup::Id(id) => meta.client.get_ip_destination_group(id).await?,
            Lookup::Name(name) => meta.client.get_ip_destination_group_by_name(&name).await?,
        };
        flatten_destination_group(d, &group)
    }
}

// ── Time windows ─────────────────────────────────────────────────────

pub struct TimeWindowDataSource;

fn flatten_time_window(d: &mut ResourceData, window: &TimeWindow) -> Result<(), ProviderError> {
    set_identity(d, window.id)?;
    d.set("name", window.name.as_str())?;
    d.set("start_time", window.start_time)?;
    d.set("end_time", window.end_time)?;
    d.set("day_of_week", json!(window.day_of_week))?;
    Ok(())
}

#[async_trait]
impl DataSource for TimeWindowDataSource {
    fn type_name(&self) -> &'static str {
        "zia_firewall_filtering_time_window"
    }

    fn schema(&self) -> Schema {
        lookup_schema("name")
            .attr("start_time", computed_int())
            .attr("end_time", computed_int())
            .attr("day_of_week", computed_strings())
    }

    async fn read(&self, d: &mut ResourceData, meta: &Meta) -> Result<(), ProviderError> {
        let lookup = Lookup::from_data(d, "name")?;
        let window = match &lookup {
            Lookup::Id(id) => meta
                .client
                .list_time_windows()
                .await?
                .into_iter()
                .find(|w| w.id == *id),
            Lookup::Name(name) => Some(meta.client.get_time_window_by_name(name).await?),
        };
        let Some(window) = window else {
            return not_found("time window", &lookup);
        };
        flatten_time_window(d, &window)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::Map;
    use zia_api::models::IdNameExtensions;

    use super::*;

    #[test]
    fn rule_flatten_exposes_reference_names() {
        let rule = FirewallFilteringRule {
            id: 12,
            name: "allow-dns".into(),
            labels: vec![IdNameExtensions {
                id: 3,
                name: "infra".into(),
                ..IdNameExtensions::default()
            }],
            ..FirewallFilteringRule::default()
        };
        let mut d = ResourceData::from_state(FirewallFilteringRuleDataSource.schema(), "", Map::new());
        flatten_rule(&mut d, &rule).unwrap();
        assert_eq!(d.id(), Some("12"));
        assert_eq!(d.get_int("id"), 12);
        assert_eq!(d.get_string("labels.0.name"), "infra");
        assert_eq!(d.get("users"), Some(&json!([])));
    }

    #[test]
    fn every_rule_reference_is_declared() {
        let schema = FirewallFilteringRuleDataSource.schema();
        for key in RULE_REFERENCES {
            assert!(schema.contains(key), "{key} missing");
        }
    }
}
