// zia_firewall_filtering_rule

use async_trait::async_trait;
use tracing::info;
use zia_api::models::FirewallFilteringRule;

use super::RULE_STATES;
use crate::activation::trigger_activation;
use crate::convert::{
    expand_id_name_extensions_set, expand_string_set, flatten_id_extensions_list_ids,
    flatten_string_set,
};
use crate::error::ProviderError;
use crate::provider::Meta;
use crate::resource::{Resource, read_created, read_or_remove};
use crate::resource_data::ResourceData;
use crate::schema::{Attribute, AttributeType, Schema, Validation, id_set_block};

const TYPE_NAME: &str = "zia_firewall_filtering_rule";

const ACTIONS: &[&str] = &["ALLOW", "BLOCK_DROP", "BLOCK_RESET", "BLOCK_ICMP", "EVAL_NWAPP"];

/// Reference-set attributes, in the order the rule model declares them.
const REFERENCE_SETS: &[(&str, &str)] = &[
    ("locations", "Locations the rule applies to"),
    ("location_groups", "Location groups the rule applies to"),
    ("departments", "Departments the rule applies to"),
    ("groups", "Groups the rule applies to"),
    ("users", "Users the rule applies to"),
    ("time_windows", "Time intervals during which the rule applies"),
    ("labels", "Labels applicable to the rule"),
    ("src_ip_groups", "Source IP address groups"),
    ("dest_ip_groups", "Destination IP address groups"),
    ("nw_services", "Network services"),
    ("nw_service_groups", "Network service groups"),
    ("nw_application_groups", "Network application groups"),
    ("app_services", "Application services"),
    ("app_service_groups", "Application service groups"),
];

/// Cloud firewall filtering rule.
pub struct FirewallFilteringRuleResource;

fn expand(d: &ResourceData) -> Result<FirewallFilteringRule, ProviderError> {
    Ok(FirewallFilteringRule {
        name: d.get_string("name"),
        description: d.get_string("description"),
        order: d.get_i32("order")?,
        rank: d.get_i32("rank")?,
        action: d.get_string("action"),
        state: d.get_string("state"),
        enable_full_logging: d.get_bool("enable_full_logging"),
        src_ips: expand_string_set(d, "src_ips"),
        dest_addresses: expand_string_set(d, "dest_addresses"),
        dest_ip_categories: expand_string_set(d, "dest_ip_categories"),
        dest_countries: expand_string_set(d, "dest_countries"),
        nw_applications: expand_string_set(d, "nw_applications"),
        default_rule: d.get_bool("default_rule"),
        predefined: d.get_bool("predefined"),
        locations: expand_id_name_extensions_set(d, "locations"),
        location_groups: expand_id_name_extensions_set(d, "location_groups"),
        departments: expand_id_name_extensions_set(d, "departments"),
        groups: expand_id_name_extensions_set(d, "groups"),
        users: expand_id_name_extensions_set(d, "users"),
        time_windows: expand_id_name_extensions_set(d, "time_windows"),
        labels: expand_id_name_extensions_set(d, "labels"),
        src_ip_groups: expand_id_name_extensions_set(d, "src_ip_groups"),
        dest_ip_groups: expand_id_name_extensions_set(d, "dest_ip_groups"),
        nw_services: expand_id_name_extensions_set(d, "nw_services"),
        nw_service_groups: expand_id_name_extensions_set(d, "nw_service_groups"),
        nw_application_groups: expand_id_name_extensions_set(d, "nw_application_groups"),
        app_services: expand_id_name_extensions_set(d, "app_services"),
        app_service_groups: expand_id_name_extensions_set(d, "app_service_groups"),
        ..FirewallFilteringRule::default()
    })
}

fn flatten(d: &mut ResourceData, rule: &FirewallFilteringRule) -> Result<(), ProviderError> {
    d.set("rule_id", rule.id)?;
    d.set("name", rule.name.as_str())?;
    d.set("description", rule.description.as_str())?;
    d.set("order", rule.order)?;
    d.set("rank", rule.rank)?;
    d.set("action", rule.action.as_str())?;
    d.set("state", rule.state.as_str())?;
    d.set("access_control", rule.access_control.clone())?;
    d.set("enable_full_logging", rule.enable_full_logging)?;
    d.set("last_modified_time", rule.last_modified_time)?;
    d.set("src_ips", flatten_string_set(&rule.src_ips))?;
    d.set("dest_addresses", flatten_string_set(&rule.dest_addresses))?;
    d.set("dest_ip_categories", flatten_string_set(&rule.dest_ip_categories))?;
    d.set("dest_countries", flatten_string_set(&rule.dest_countries))?;
    d.set("nw_applications", flatten_string_set(&rule.nw_applications))?;
    d.set("default_rule", rule.default_rule)?;
    d.set("predefined", rule.predefined)?;

    let references = [
        ("locations", &rule.locations),
        ("location_groups", &rule.location_groups),
        ("departments", &rule.departments),
        ("groups", &rule.groups),
        ("users", &rule.users),
        ("time_windows", &rule.time_windows),
        ("labels", &rule.labels),
        ("src_ip_groups", &rule.src_ip_groups),
        ("dest_ip_groups", &rule.dest_ip_groups),
        ("nw_services", &rule.nw_services),
        ("nw_service_groups", &rule.nw_service_groups),
        ("nw_application_groups", &rule.nw_application_groups),
        ("app_services", &rule.app_services),
        ("app_service_groups", &rule.app_service_groups),
    ];
    for (key, list) in references {
        d.set(key, flatten_id_extensions_list_ids(list))?;
    }
    Ok(())
}

#[async_trait]
impl Resource for FirewallFilteringRuleResource {
    fn type_name(&self) -> &'static str {
        TYPE_NAME
    }

    fn schema(&self) -> Schema {
        let mut schema = Schema::new()
            .attr("rule_id", Attribute::int().computed())
            .attr(
                "name",
                Attribute::string()
                    .required()
                    .validate(Validation::StringLenBetween(1, 31))
                    .description("Name of the firewall filtering policy rule"),
            )
            .attr(
                "description",
                Attribute::string()
                    .optional()
                    .validate(Validation::StringLenBetween(0, 10240)),
            )
            .attr(
                "order",
                Attribute::int()
                    .required()
                    .description("Rule order number of the Firewall Filtering policy rule"),
            )
            .attr(
                "rank",
                Attribute::int()
                    .optional()
                    .default(7)
                    .validate(Validation::IntBetween(0, 7)),
            )
            .attr(
                "action",
                Attribute::string()
                    .optional()
                    .computed()
                    .validate(Validation::one_of(ACTIONS)),
            )
            .attr(
                "state",
                Attribute::string()
                    .optional()
                    .computed()
                    .validate(Validation::one_of(RULE_STATES)),
            )
            .attr("access_control", Attribute::string().computed())
            .attr("enable_full_logging", Attribute::boolean().optional())
            .attr("last_modified_time", Attribute::int().computed())
            .attr(
                "src_ips",
                Attribute::set_of(AttributeType::String)
                    .optional()
                    .computed()
                    .description("User-defined source IP addresses"),
            )
            .attr(
                "dest_addresses",
                Attribute::set_of(AttributeType::String).optional().computed(),
            )
            .attr(
                "dest_ip_categories",
                Attribute::set_of(AttributeType::String).optional().computed(),
            )
            .attr(
                "dest_countries",
                Attribute::set_of(AttributeType::String).optional().computed(),
            )
            .attr(
                "nw_applications",
                Attribute::set_of(AttributeType::String).optional().computed(),
            )
            .attr("default_rule", Attribute::boolean().optional().computed())
            .attr("predefined", Attribute::boolean().optional().computed());

        for (key, description) in REFERENCE_SETS {
            schema = schema.attr(key, id_set_block(description));
        }
        schema
    }

    async fn create(&self, d: &mut ResourceData, meta: &Meta) -> Result<(), ProviderError> {
        let rule = meta.client.create_firewall_rule(&expand(d)?).await?;
        info!(resource = TYPE_NAME, id = rule.id, "created");
        d.set_id(rule.id.to_string());
        trigger_activation(meta).await?;
        read_created(self, d, meta).await
    }

    async fn read(&self, d: &mut ResourceData, meta: &Meta) -> Result<(), ProviderError> {
        let id = d.numeric_id()?;
        let result = meta.client.get_firewall_rule(id).await;
        let Some(rule) = read_or_remove(d, TYPE_NAME, result)? else {
            return Ok(());
        };
        d.set_id(rule.id.to_string());
        flatten(d, &rule)
    }

    async fn update(&self, d: &mut ResourceData, meta: &Meta) -> Result<(), ProviderError> {
        let id = d.numeric_id()?;
        let result = meta.client.update_firewall_rule(id, &expand(d)?).await;
        if read_or_remove(d, TYPE_NAME, result)?.is_none() {
            return Ok(());
        }
        info!(resource = TYPE_NAME, id, "updated");
        trigger_activation(meta).await?;
        self.read(d, meta).await
    }

    async fn delete(&self, d: &mut ResourceData, meta: &Meta) -> Result<(), ProviderError> {
        let id = d.numeric_id()?;
        meta.client.delete_firewall_rule(id).await?;
        info!(resource = TYPE_NAME, id, "deleted");
        d.clear_id();
        trigger_activation(meta).await
    }

    async fn lookup_id(&self, name: &str, meta: &Meta) -> Result<String, ProviderError> {
        let rule = meta.client.get_firewall_rule_by_name(name).await?;
        Ok(rule.id.to_string())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use zia_api::models::IdNameExtensions;

    use super::*;

    #[test]
    fn expand_then_flatten_round_trips() {
        let schema = FirewallFilteringRuleResource.schema();
        let config = json!({
            "name": "allow-dns",
            "order": 3,
            "action": "ALLOW",
            "state": "ENABLED",
            "src_ips": ["10.0.0.0/8"],
            "labels": [{"id": [7]}],
            "nw_services": [{"id": [200, 100]}]
        });
        let d = ResourceData::from_config(schema.clone(), config.as_object().cloned().unwrap())
            .unwrap();
        let mut rule = expand(&d).unwrap();
        assert_eq!(rule.rank, 7);
        assert_eq!(rule.labels, vec![IdNameExtensions::from_id(7)]);

        rule.id = 55;
        let mut out = ResourceData::from_state(schema, "55", serde_json::Map::new());
        flatten(&mut out, &rule).unwrap();
        assert_eq!(out.get_int("rule_id"), 55);
        assert_eq!(out.get("nw_services"), Some(&json!([{"id": [100, 200]}])));
        assert!(out.get("users").is_none());
        assert_eq!(out.get_string_set("src_ips"), vec!["10.0.0.0/8"]);
    }

    #[test]
    fn rejects_unknown_action() {
        let config = json!({"name": "r", "order": 1, "action": "PERMIT"});
        let err = ResourceData::from_config(
            FirewallFilteringRuleResource.schema(),
            config.as_object().cloned().unwrap(),
        )
        .unwrap_err();
        assert!(matches!(err, ProviderError::Validation(_)));
    }
}
