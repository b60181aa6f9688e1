// zia_url_filtering_rules

use async_trait::async_trait;
use tracing::info;
use zia_api::models::UrlFilteringRule;

use super::RULE_STATES;
use crate::activation::trigger_activation;
use crate::convert::{
    expand_id_name_extensions_set, expand_string_set, flatten_id_extensions_list_ids,
    flatten_id_name_extensions_single, flatten_string_set,
};
use crate::error::ProviderError;
use crate::provider::Meta;
use crate::resource::{Resource, read_created, read_or_remove};
use crate::resource_data::ResourceData;
use crate::schema::{
    Attribute, AttributeType, Schema, Validation, computed_id_name_extensions, id_set_block,
};

const TYPE_NAME: &str = "zia_url_filtering_rules";

const ACTIONS: &[&str] = &["ALLOW", "CAUTION", "BLOCK", "ISOLATE", "ICAP_RESPONSE"];

const REFERENCE_SETS: &[(&str, &str)] = &[
    ("locations", "Locations the rule applies to"),
    ("location_groups", "Location groups the rule applies to"),
    ("groups", "Groups the rule applies to"),
    ("departments", "Departments the rule applies to"),
    ("users", "Users the rule applies to"),
    ("time_windows", "Time intervals during which the rule applies"),
    ("override_users", "Users allowed to override a block"),
    ("override_groups", "Groups allowed to override a block"),
    ("labels", "Labels applicable to the rule"),
];

/// URL filtering policy rule.
pub struct UrlFilteringRulesResource;

fn expand(d: &ResourceData) -> Result<UrlFilteringRule, ProviderError> {
    Ok(UrlFilteringRule {
        name: d.get_string("name"),
        description: d.get_string("description"),
        order: d.get_i32("order")?,
        rank: d.get_i32("rank")?,
        state: d.get_string("state"),
        action: d.get_string("action"),
        protocols: expand_string_set(d, "protocols"),
        url_categories: expand_string_set(d, "url_categories"),
        request_methods: expand_string_set(d, "request_methods"),
        user_agent_types: expand_string_set(d, "user_agent_types"),
        device_trust_levels: expand_string_set(d, "device_trust_levels"),
        end_user_notification_url: d.get_string("end_user_notification_url"),
        block_override: d.get_bool("block_override"),
        time_quota: d.get_i32("time_quota")?,
        size_quota: d.get_i32("size_quota")?,
        enforce_time_validity: d.get_bool("enforce_time_validity"),
        validity_start_time: d.get_int("validity_start_time"),
        validity_end_time: d.get_int("validity_end_time"),
        validity_time_zone_id: d.get_string("validity_time_zone_id"),
        ciparule: d.get_bool("ciparule"),
        locations: expand_id_name_extensions_set(d, "locations"),
        location_groups: expand_id_name_extensions_set(d, "location_groups"),
        groups: expand_id_name_extensions_set(d, "groups"),
        departments: expand_id_name_extensions_set(d, "departments"),
        users: expand_id_name_extensions_set(d, "users"),
        time_windows: expand_id_name_extensions_set(d, "time_windows"),
        override_users: expand_id_name_extensions_set(d, "override_users"),
        override_groups: expand_id_name_extensions_set(d, "override_groups"),
        labels: expand_id_name_extensions_set(d, "labels"),
        ..UrlFilteringRule::default()
    })
}

fn flatten(d: &mut ResourceData, rule: &UrlFilteringRule) -> Result<(), ProviderError> {
    d.set("rule_id", rule.id)?;
    d.set("name", rule.name.as_str())?;
    d.set("description", rule.description.as_str())?;
    d.set("order", rule.order)?;
    d.set("rank", rule.rank)?;
    d.set("state", rule.state.as_str())?;
    d.set("action", rule.action.as_str())?;
    d.set("protocols", flatten_string_set(&rule.protocols))?;
    d.set("url_categories", flatten_string_set(&rule.url_categories))?;
    d.set("request_methods", flatten_string_set(&rule.request_methods))?;
    d.set("user_agent_types", flatten_string_set(&rule.user_agent_types))?;
    d.set("device_trust_levels", flatten_string_set(&rule.device_trust_levels))?;
    d.set("end_user_notification_url", rule.end_user_notification_url.as_str())?;
    d.set("block_override", rule.block_override)?;
    d.set("time_quota", rule.time_quota)?;
    d.set("size_quota", rule.size_quota)?;
    d.set("enforce_time_validity", rule.enforce_time_validity)?;
    d.set("validity_start_time", rule.validity_start_time)?;
    d.set("validity_end_time", rule.validity_end_time)?;
    d.set("validity_time_zone_id", rule.validity_time_zone_id.as_str())?;
    d.set("ciparule", rule.ciparule)?;
    d.set("last_modified_time", rule.last_modified_time)?;
    d.set(
        "last_modified_by",
        flatten_id_name_extensions_single(rule.last_modified_by.as_ref()),
    )?;

    let references = [
        ("locations", &rule.locations),
        ("location_groups", &rule.location_groups),
        ("groups", &rule.groups),
        ("departments", &rule.departments),
        ("users", &rule.users),
        ("time_windows", &rule.time_windows),
        ("override_users", &rule.override_users),
        ("override_groups", &rule.override_groups),
        ("labels", &rule.labels),
    ];
    for (key, list) in references {
        d.set(key, flatten_id_extensions_list_ids(list))?;
    }
    Ok(())
}

/// Time validity needs a window and a zone; block override needs BLOCK.
fn check_rule(d: &ResourceData) -> Result<(), ProviderError> {
    if d.get_bool("enforce_time_validity") {
        for key in ["validity_start_time", "validity_end_time", "validity_time_zone_id"] {
            if d.get_ok(key).is_none() {
                return Err(ProviderError::invalid(
                    key,
                    "required when enforce_time_validity is set",
                ));
            }
        }
    }
    if d.get_bool("block_override") && d.get_str("action") != Some("BLOCK") {
        return Err(ProviderError::invalid(
            "block_override",
            "only valid when action is BLOCK",
        ));
    }
    Ok(())
}

fn string_set(description: &str) -> Attribute {
    Attribute::set_of(AttributeType::String)
        .optional()
        .computed()
        .description(description)
}

#[async_trait]
impl Resource for UrlFilteringRulesResource {
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
                    .validate(Validation::StringLenBetween(1, 31)),
            )
            .attr(
                "description",
                Attribute::string()
                    .optional()
                    .validate(Validation::StringLenBetween(0, 10240)),
            )
            .attr("order", Attribute::int().required())
            .attr(
                "rank",
                Attribute::int()
                    .optional()
                    .default(7)
                    .validate(Validation::IntBetween(0, 7)),
            )
            .attr(
                "state",
                Attribute::string()
                    .optional()
                    .computed()
                    .validate(Validation::one_of(RULE_STATES)),
            )
            .attr(
                "action",
                Attribute::string()
                    .optional()
                    .computed()
                    .validate(Validation::one_of(ACTIONS)),
            )
            .attr("protocols", string_set("Protocols the rule matches"))
            .attr("url_categories", string_set("URL categories the rule matches"))
            .attr("request_methods", string_set("HTTP request methods the rule matches"))
            .attr("user_agent_types", string_set("User agents the rule matches"))
            .attr("device_trust_levels", string_set("Device trust levels the rule matches"))
            .attr("end_user_notification_url", Attribute::string().optional())
            .attr("block_override", Attribute::boolean().optional().default(false))
            .attr(
                "time_quota",
                Attribute::int()
                    .optional()
                    .validate(Validation::IntBetween(0, 360))
                    .description("Daily time quota in minutes for CAUTION rules"),
            )
            .attr(
                "size_quota",
                Attribute::int()
                    .optional()
                    .validate(Validation::IntBetween(0, 100_000))
                    .description("Daily bandwidth quota in MB for CAUTION rules"),
            )
            .attr("enforce_time_validity", Attribute::boolean().optional().default(false))
            .attr("validity_start_time", Attribute::int().optional())
            .attr("validity_end_time", Attribute::int().optional())
            .attr("validity_time_zone_id", Attribute::string().optional())
            .attr("ciparule", Attribute::boolean().optional().computed())
            .attr("last_modified_time", Attribute::int().computed())
            .attr(
                "last_modified_by",
                computed_id_name_extensions("Admin that last modified the rule"),
            );

        for (key, description) in REFERENCE_SETS {
            schema = schema.attr(key, id_set_block(description));
        }
        schema
    }

    async fn create(&self, d: &mut ResourceData, meta: &Meta) -> Result<(), ProviderError> {
        check_rule(d)?;
        let rule = meta.client.create_url_filtering_rule(&expand(d)?).await?;
        info!(resource = TYPE_NAME, id = rule.id, "created");
        d.set_id(rule.id.to_string());
        trigger_activation(meta).await?;
        read_created(self, d, meta).await
    }

    async fn read(&self, d: &mut ResourceData, meta: &Meta) -> Result<(), ProviderError> {
        let id = d.numeric_id()?;
        let result = meta.client.get_url_filtering_rule(id).await;
        let Some(rule) = read_or_remove(d, TYPE_NAME, result)? else {
            return Ok(());
        };
        d.set_id(rule.id.to_string());
        flatten(d, &rule)
    }

    async fn update(&self, d: &mut ResourceData, meta: &Meta) -> Result<(), ProviderError> {
        check_rule(d)?;
        let id = d.numeric_id()?;
        let result = meta.client.update_url_filtering_rule(id, &expand(d)?).await;
        if read_or_remove(d, TYPE_NAME, result)?.is_none() {
            return Ok(());
        }
        info!(resource = TYPE_NAME, id, "updated");
        trigger_activation(meta).await?;
        self.read(d, meta).await
    }

    async fn delete(&self, d: &mut ResourceData, meta: &Meta) -> Result<(), ProviderError> {
        let id = d.numeric_id()?;
        meta.client.delete_url_filtering_rule(id).await?;
        info!(resource = TYPE_NAME, id, "deleted");
        d.clear_id();
        trigger_activation(meta).await
    }

    async fn lookup_id(&self, name: &str, meta: &Meta) -> Result<String, ProviderError> {
        let rule = meta.client.get_url_filtering_rule_by_name(name).await?;
        Ok(rule.id.to_string())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::{Map, Value, json};

    use super::*;

    fn data(config: Value) -> ResourceData {
        ResourceData::from_config(
            UrlFilteringRulesResource.schema(),
            config.as_object().cloned().unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn expand_carries_categories_and_references() {
        let d = data(json!({
            "name": "block-gambling",
            "order": 1,
            "action": "BLOCK",
            "url_categories": ["GAMBLING"],
            "protocols": ["HTTPS_RULE", "ANY_RULE"],
            "groups": [{"id": [12]}]
        }));
        let rule = expand(&d).unwrap();
        assert_eq!(rule.url_categories, vec!["GAMBLING"]);
        assert_eq!(rule.protocols, vec!["ANY_RULE", "HTTPS_RULE"]);
        assert_eq!(rule.groups.len(), 1);
        assert_eq!(rule.rank, 7);
    }

    #[test]
    fn flatten_skips_empty_references() {
        let rule = UrlFilteringRule {
            id: 9,
            name: "r".into(),
            order: 2,
            state: "ENABLED".into(),
            ..UrlFilteringRule::default()
        };
        let mut d = ResourceData::from_state(UrlFilteringRulesResource.schema(), "9", Map::new());
        flatten(&mut d, &rule).unwrap();
        assert_eq!(d.get_int("rule_id"), 9);
        assert!(d.get("locations").is_none());
        assert!(d.get("url_categories").is_none());
        assert_eq!(d.get("last_modified_by"), Some(&json!([])));
    }

    #[test]
    fn time_validity_needs_window() {
        let d = data(json!({"name": "r", "order": 1, "enforce_time_validity": true}));
        assert!(check_rule(&d).is_err());
    }

    #[test]
    fn block_override_needs_block_action() {
        let d = data(json!({"name": "r", "order": 1, "action": "CAUTION", "block_override": true}));
        assert!(check_rule(&d).is_err());
        let d = data(json!({"name": "r", "order": 1, "action": "BLOCK", "block_override": true}));
        assert!(check_rule(&d).is_ok());
    }
}
