// zia_url_categories, zia_url_filtering_rules

use async_trait::async_trait;
use serde_json::{Value, json};
use zia_api::models::{UrlCategory, UrlFilteringRule};

use super::{
    computed_bool, computed_int, computed_string, computed_strings, lookup_schema, set_identity,
};
use crate::convert::{flatten_id_name_extensions, flatten_id_name_extensions_single};
use crate::error::ProviderError;
use crate::provider::Meta;
use crate::resource::{DataSource, Lookup};
use crate::resource_data::ResourceData;
use crate::schema::{Attribute, Schema, computed_id_name_extensions};

// ── URL categories ───────────────────────────────────────────────────

/// Category IDs are strings (`CUSTOM_01`, `NEWS_AND_MEDIA`), so this data
/// source keeps its own `id` handling.
pub struct UrlCategoriesDataSource;

fn flatten_category(d: &mut ResourceData, category: &UrlCategory) -> Result<(), ProviderError> {
    d.set_id(category.id.as_str());
    d.set("id", category.id.as_str())?;
    d.set("configured_name", category.configured_name.as_str())?;
    d.set("keywords", json!(category.keywords))?;
    d.set(
        "keywords_retaining_parent_category",
        json!(category.keywords_retaining_parent_category),
    )?;
    d.set("urls", json!(category.urls))?;
    d.set("db_categorized_urls", json!(category.db_categorized_urls))?;
    d.set("custom_category", category.custom_category)?;
    d.set(
        "scopes",
        Value::Array(
            category
                .scopes
                .iter()
                .map(|scope| {
                    json!({
                        "type": scope.scope_type,
                        "scope_entities": flatten_id_name_extensions(&scope.scope_entities),
                        "scope_group_member_entities":
                            flatten_id_name_extensions(&scope.scope_group_member_entities),
                    })
                })
                .collect(),
        ),
    )?;
    d.set("editable", category.editable)?;
    d.set("description", category.description.as_str())?;
    d.set("type", category.category_type.as_str())?;
    d.set(
        "url_keyword_counts",
        category.url_keyword_counts.map_or(json!([]), |c| {
            json!([{
                "total_url_count": c.total_url_count,
                "retain_parent_url_count": c.retain_parent_url_count,
                "total_keyword_count": c.total_keyword_count,
                "retain_parent_keyword_count": c.retain_parent_keyword_count,
            }])
        }),
    )?;
    d.set("val", category.val)?;
    d.set("custom_urls_count", category.custom_urls_count)?;
    d.set(
        "urls_retaining_parent_category_count",
        category.urls_retaining_parent_category_count,
    )?;
    d.set("super_category", category.super_category.as_str())?;
    d.set("ip_ranges", json!(category.ip_ranges))?;
    d.set(
        "ip_ranges_retaining_parent_category",
        json!(category.ip_ranges_retaining_parent_category),
    )?;
    d.set("custom_ip_ranges_count", category.custom_ip_ranges_count)?;
    d.set(
        "ip_range_retaining_parent_category_count",
        category.ip_range_retaining_parent_category_count,
    )?;
    Ok(())
}

#[async_trait]
impl DataSource for UrlCategoriesDataSource {
    fn type_name(&self) -> &'static str {
        "zia_url_categories"
    }

    fn schema(&self) -> Schema {
        let scope = Schema::new()
            .attr("type", computed_string())
            .attr("scope_entities", computed_id_name_extensions("Scope entities"))
            .attr(
                "scope_group_member_entities",
                computed_id_name_extensions("Scope group members"),
            );
        let counts = Schema::new()
            .attr("total_url_count", computed_int())
            .attr("retain_parent_url_count", computed_int())
            .attr("total_keyword_count", computed_int())
            .attr("retain_parent_keyword_count", computed_int());

        Schema::new()
            .attr("id", Attribute::string().optional().computed())
            .attr("configured_name", Attribute::string().optional().computed())
            .attr("keywords", computed_strings())
            .attr("keywords_retaining_parent_category", computed_strings())
            .attr("urls", computed_strings())
            .attr("db_categorized_urls", computed_strings())
            .attr("custom_category", computed_bool())
            .attr("scopes", Attribute::list_of_block(scope).computed())
            .attr("editable", computed_bool())
            .attr("description", computed_string())
            .attr("type", computed_string())
            .attr("url_keyword_counts", Attribute::list_of_block(counts).computed())
            .attr("val", computed_int())
            .attr("custom_urls_count", computed_int())
            .attr("urls_retaining_parent_category_count", computed_int())
            .attr("super_category", computed_string())
            .attr("ip_ranges", computed_strings())
            .attr("ip_ranges_retaining_parent_category", computed_strings())
            .attr("custom_ip_ranges_count", computed_int())
            .attr("ip_range_retaining_parent_category_count", computed_int())
    }

    async fn read(&self, d: &mut ResourceData, meta: &Meta) -> Result<(), ProviderError> {
        let id = d.get_ok("id").and_then(Value::as_str).map(str::to_owned);
        let name = d
            .get_ok("configured_name")
            .and_then(Value::as_str)
            .map(str::to_owned);
        let category = match (id, name) {
            (Some(id), _) => meta.client.get_url_category(&id).await?,
            (None, Some(name)) => meta.client.get_url_category_by_name(&name).await?,
            (None, None) => {
                return Err(ProviderError::MissingAttribute {
                    attribute: "id or configured_name".into(),
                });
            }
        };
        flatten_category(d, &category)
    }
}

// ── URL filtering rules ──────────────────────────────────────────────

const RULE_REFERENCES: &[&str] = &[
    "locations",
    "location_groups",
    "groups",
    "departments",
    "users",
    "time_windows",
    "override_users",
    "override_groups",
    "labels",
];

pub struct UrlFilteringRulesDataSource;

fn flatten_rule(d: &mut ResourceData, rule: &UrlFilteringRule) -> Result<(), ProviderError> {
    set_identity(d, rule.id)?;
    d.set("name", rule.name.as_str())?;
    d.set("order", rule.order)?;
    d.set("rank", rule.rank)?;
    d.set("state", rule.state.as_str())?;
    d.set("action", rule.action.as_str())?;
    d.set("description", rule.description.as_str())?;
    d.set("protocols", json!(rule.protocols))?;
    d.set("url_categories", json!(rule.url_categories))?;
    d.set("request_methods", json!(rule.request_methods))?;
    d.set("user_agent_types", json!(rule.user_agent_types))?;
    d.set("device_trust_levels", json!(rule.device_trust_levels))?;
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
        &rule.locations,
        &rule.location_groups,
        &rule.groups,
        &rule.departments,
        &rule.users,
        &rule.time_windows,
        &rule.override_users,
        &rule.override_groups,
        &rule.labels,
    ];
    for (key, list) in RULE_REFERENCES.iter().zip(references) {
        d.set(key, flatten_id_name_extensions(list))?;
    }
    Ok(())
}

#[async_trait]
impl DataSource for UrlFilteringRulesDataSource {
    fn type_name(&self) -> &'static str {
        "zia_url_filtering_rules"
    }

    fn schema(&self) -> Schema {
        let mut schema = lookup_schema("name")
            .attr("order", computed_int())
            .attr("rank", computed_int())
            .attr("state", computed_string())
            .attr("action", computed_string())
            .attr("description", computed_string())
            .attr("protocols", computed_strings())
            .attr("url_categories", computed_strings())
            .attr("request_methods", computed_strings())
            .attr("user_agent_types", computed_strings())
            .attr("device_trust_levels", computed_strings())
            .attr("end_user_notification_url", computed_string())
            .attr("block_override", computed_bool())
            .attr("time_quota", computed_int())
            .attr("size_quota", computed_int())
            .attr("enforce_time_validity", computed_bool())
            .attr("validity_start_time", computed_int())
            .attr("validity_end_time", computed_int())
            .attr("validity_time_zone_id", computed_string())
            .attr("ciparule", computed_bool())
            .attr("last_modified_time", computed_int())
            .attr("last_modified_by", computed_id_name_extensions("Last editor"));
        for key in RULE_REFERENCES {
            schema = schema.attr(key, computed_id_name_extensions(key));
        }
        schema
    }

    async fn read(&self, d: &mut ResourceData, meta: &Meta) -> Result<(), ProviderError> {
        let rule = match Lookup::from_data(d, "name")? {
            Lookup::Id(id) => meta.client.get_url_filtering_rule(id).await?,
            Lookup::Name(name) => meta.client.get_url_filtering_rule_by_name(&name).await?,
        };
        flatten_rule(d, &rule)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::Map;

    use super::*;

    #[test]
    fn category_keeps_string_id() {
        let category = UrlCategory {
            id: "CUSTOM_01".into(),
            configured_name: "Blocked sites".into(),
            urls: vec!["bad.example.com".into()],
            custom_category: true,
            ..UrlCategory::default()
        };
        let mut d = ResourceData::from_state(UrlCategoriesDataSource.schema(), "", Map::new());
        flatten_category(&mut d, &category).unwrap();
        assert_eq!(d.id(), Some("CUSTOM_01"));
        assert_eq!(d.get_string("id"), "CUSTOM_01");
        assert_eq!(d.get_string("configured_name"), "Blocked sites");
        assert!(d.get_bool("custom_category"));
        assert_eq!(d.get("scopes"), Some(&json!([])));
        assert_eq!(d.get("url_keyword_counts"), Some(&json!([])));
    }

    #[test]
    fn rule_without_references_flattens_to_empty_lists() {
        let rule = UrlFilteringRule {
            id: 21,
            name: "block-gambling".into(),
            ..UrlFilteringRule::default()
        };
        let mut d = ResourceData::from_state(UrlFilteringRulesDataSource.schema(), "", Map::new());
        flatten_rule(&mut d, &rule).unwrap();
        assert_eq!(d.id(), Some("21"));
        for key in RULE_REFERENCES {
            assert_eq!(d.get(key), Some(&json!([])), "{key}");
        }
        assert_eq!(d.get("last_modified_by"), Some(&json!([])));
    }
}
