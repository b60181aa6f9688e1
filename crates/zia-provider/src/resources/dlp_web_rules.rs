// zia_dlp_web_rules

use async_trait::async_trait;
use tracing::info;
use zia_api::models::WebDlpRule;

use super::RULE_STATES;
use crate::activation::trigger_activation;
use crate::convert::{
    expand_id_name_extensions_set, expand_id_name_extensions_single, expand_string_set,
    flatten_id_extensions_list_ids, flatten_id_extensions_single, flatten_string_set,
};
use crate::error::ProviderError;
use crate::provider::Meta;
use crate::resource::{Resource, read_created, read_or_remove};
use crate::resource_data::ResourceData;
use crate::schema::{Attribute, AttributeType, Schema, Validation, id_block, id_set_block};

const TYPE_NAME: &str = "zia_dlp_web_rules";

const ACTIONS: &[&str] = &["ANY", "NONE", "BLOCK", "ALLOW", "ICAP_RESPONSE"];

const SEVERITIES: &[&str] = &[
    "RULE_SEVERITY_HIGH",
    "RULE_SEVERITY_MEDIUM",
    "RULE_SEVERITY_LOW",
    "RULE_SEVERITY_INFO",
];

const REFERENCE_SETS: &[(&str, &str)] = &[
    ("dlp_engines", "DLP engines the rule evaluates"),
    ("url_categories", "URL categories the rule applies to"),
    ("locations", "Locations the rule applies to"),
    ("location_groups", "Location groups the rule applies to"),
    ("groups", "Groups the rule applies to"),
    ("departments", "Departments the rule applies to"),
    ("users", "Users the rule applies to"),
    ("excluded_groups", "Groups exempted from the rule"),
    ("excluded_departments", "Departments exempted from the rule"),
    ("excluded_users", "Users exempted from the rule"),
    ("time_windows", "Time intervals during which the rule applies"),
    ("labels", "Labels applicable to the rule"),
];

const SINGLE_REFERENCES: &[(&str, &str)] = &[
    ("auditor", "Auditor notified of violations"),
    ("notification_template", "Template used for violation notifications"),
    ("icap_server", "DLP incident receiver server"),
];

/// Web DLP policy rule.
pub struct DlpWebRulesResource;

fn expand(d: &ResourceData) -> Result<WebDlpRule, ProviderError> {
    Ok(WebDlpRule {
        name: d.get_string("name"),
        order: d.get_i32("order")?,
        rank: d.get_i32("rank")?,
        description: d.get_string("description"),
        action: d.get_string("action"),
        state: d.get_string("state"),
        severity: d.get_string("severity"),
        protocols: expand_string_set(d, "protocols"),
        file_types: expand_string_set(d, "file_types"),
        cloud_applications: expand_string_set(d, "cloud_applications"),
        min_size: d.get_i32("min_size")?,
        match_only: d.get_bool("match_only"),
        without_content_inspection: d.get_bool("without_content_inspection"),
        ocr_enabled: d.get_bool("ocr_enabled"),
        zscaler_incident_receiver: d.get_bool("zscaler_incident_receiver"),
        external_auditor_email: d.get_string("external_auditor_email"),
        auditor: expand_id_name_extensions_single(d, "auditor"),
        notification_template: expand_id_name_extensions_single(d, "notification_template"),
        icap_server: expand_id_name_extensions_single(d, "icap_server"),
        dlp_engines: expand_id_name_extensions_set(d, "dlp_engines"),
        url_categories: expand_id_name_extensions_set(d, "url_categories"),
        locations: expand_id_name_extensions_set(d, "locations"),
        location_groups: expand_id_name_extensions_set(d, "location_groups"),
        groups: expand_id_name_extensions_set(d, "groups"),
        departments: expand_id_name_extensions_set(d, "departments"),
        users: expand_id_name_extensions_set(d, "users"),
        excluded_groups: expand_id_name_extensions_set(d, "excluded_groups"),
        excluded_departments: expand_id_name_extensions_set(d, "excluded_departments"),
        excluded_users: expand_id_name_extensions_set(d, "excluded_users"),
        time_windows: expand_id_name_extensions_set(d, "time_windows"),
        labels: expand_id_name_extensions_set(d, "labels"),
        ..WebDlpRule::default()
    })
}

fn flatten(d: &mut ResourceData, rule: &WebDlpRule) -> Result<(), ProviderError> {
    d.set("rule_id", rule.id)?;
    d.set("name", rule.name.as_str())?;
    d.set("order", rule.order)?;
    d.set("rank", rule.rank)?;
    d.set("description", rule.description.as_str())?;
    d.set("action", rule.action.as_str())?;
    d.set("state", rule.state.as_str())?;
    d.set("severity", rule.severity.as_str())?;
    d.set("protocols", flatten_string_set(&rule.protocols))?;
    d.set("file_types", flatten_string_set(&rule.file_types))?;
    d.set("cloud_applications", flatten_string_set(&rule.cloud_applications))?;
    d.set("min_size", rule.min_size)?;
    d.set("match_only", rule.match_only)?;
    d.set("without_content_inspection", rule.without_content_inspection)?;
    d.set("ocr_enabled", rule.ocr_enabled)?;
    d.set("zscaler_incident_receiver", rule.zscaler_incident_receiver)?;
    d.set("external_auditor_email", rule.external_auditor_email.as_str())?;
    d.set("last_modified_time", rule.last_modified_time)?;

    let singles = [
        ("auditor", rule.auditor.as_ref()),
        ("notification_template", rule.notification_template.as_ref()),
        ("icap_server", rule.icap_server.as_ref()),
    ];
    for (key, reference) in singles {
        d.set(key, flatten_id_extensions_single(reference))?;
    }

    let references = [
        ("dlp_engines", &rule.dlp_engines),
        ("url_categories", &rule.url_categories),
        ("locations", &rule.locations),
        ("location_groups", &rule.location_groups),
        ("groups", &rule.groups),
        ("departments", &rule.departments),
        ("users", &rule.users),
        ("excluded_groups", &rule.excluded_groups),
        ("excluded_departments", &rule.excluded_departments),
        ("excluded_users", &rule.excluded_users),
        ("time_windows", &rule.time_windows),
        ("labels", &rule.labels),
    ];
    for (key, list) in references {
        d.set(key, flatten_id_extensions_list_ids(list))?;
    }
    Ok(())
}

/// Inspection-free rules cannot reference DLP engines, and the Zscaler
/// incident receiver excludes a custom ICAP server.
fn check_rule(d: &ResourceData) -> Result<(), ProviderError> {
    if d.get_bool("without_content_inspection") && d.get_ok("dlp_engines").is_some() {
        return Err(ProviderError::invalid(
            "dlp_engines",
            "cannot be set when without_content_inspection is true",
        ));
    }
    if d.get_bool("zscaler_incident_receiver") && d.get_ok("icap_server").is_some() {
        return Err(ProviderError::invalid(
            "icap_server",
            "cannot be set when zscaler_incident_receiver is true",
        ));
    }
    Ok(())
}

#[async_trait]
impl Resource for DlpWebRulesResource {
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
            .attr("order", Attribute::int().required())
            .attr(
                "rank",
                Attribute::int()
                    .optional()
                    .default(7)
                    .validate(Validation::IntBetween(0, 7)),
            )
            .attr(
                "description",
                Attribute::string()
                    .optional()
                    .validate(Validation::StringLenBetween(0, 10240)),
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
            .attr(
                "severity",
                Attribute::string()
                    .optional()
                    .computed()
                    .validate(Validation::one_of(SEVERITIES)),
            )
            .attr(
                "protocols",
                Attribute::set_of(AttributeType::String).optional().computed(),
            )
            .attr(
                "file_types",
                Attribute::set_of(AttributeType::String)
                    .optional()
                    .computed()
                    .description("File types the rule inspects"),
            )
            .attr(
                "cloud_applications",
                Attribute::set_of(AttributeType::String).optional().computed(),
            )
            .attr(
                "min_size",
                Attribute::int()
                    .optional()
                    .validate(Validation::IntBetween(0, 409_600))
                    .description("Minimum file size in KB the rule applies to"),
            )
            .attr("match_only", Attribute::boolean().optional().computed())
            .attr("without_content_inspection", Attribute::boolean().optional().computed())
            .attr("ocr_enabled", Attribute::boolean().optional().computed())
            .attr("zscaler_incident_receiver", Attribute::boolean().optional().computed())
            .attr("external_auditor_email", Attribute::string().optional())
            .attr("last_modified_time", Attribute::int().computed());

        for (key, description) in SINGLE_REFERENCES {
            schema = schema.attr(key, id_block(description));
        }
        for (key, description) in REFERENCE_SETS {
            schema = schema.attr(key, id_set_block(description));
        }
        schema
    }

    async fn create(&self, d: &mut ResourceData, meta: &Meta) -> Result<(), ProviderError> {
        check_rule(d)?;
        let rule = meta.client.create_web_dlp_rule(&expand(d)?).await?;
        info!(resource = TYPE_NAME, id = rule.id, "created");
        d.set_id(rule.id.to_string());
        trigger_activation(meta).await?;
        read_created(self, d, meta).await
    }

    async fn read(&self, d: &mut ResourceData, meta: &Meta) -> Result<(), ProviderError> {
        let id = d.numeric_id()?;
        let result = meta.client.get_web_dlp_rule(id).await;
        let Some(rule) = read_or_remove(d, TYPE_NAME, result)? else {
            return Ok(());
        };
        d.set_id(rule.id.to_string());
        flatten(d, &rule)
    }

    async fn update(&self, d: &mut ResourceData, meta: &Meta) -> Result<(), ProviderError> {
        check_rule(d)?;
        let id = d.numeric_id()?;
        let result = meta.client.update_web_dlp_rule(id, &expand(d)?).await;
        if read_or_remove(d, TYPE_NAME, result)?.is_none() {
            return Ok(());
        }
        info!(resource = TYPE_NAME, id, "updated");
        trigger_activation(meta).await?;
        self.read(d, meta).await
    }

    async fn delete(&self, d: &mut ResourceData, meta: &Meta) -> Result<(), ProviderError> {
        let id = d.numeric_id()?;
        meta.client.delete_web_dlp_rule(id).await?;
        info!(resource = TYPE_NAME, id, "deleted");
        d.clear_id();
        trigger_activation(meta).await
    }

    async fn lookup_id(&self, name: &str, meta: &Meta) -> Result<String, ProviderError> {
        let rule = meta.client.get_web_dlp_rule_by_name(name).await?;
        Ok(rule.id.to_string())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::{Map, Value, json};
    use zia_api::models::IdNameExtensions;

    use super::*;

    fn data(config: Value) -> ResourceData {
        ResourceData::from_config(DlpWebRulesResource.schema(), config.as_object().cloned().unwrap())
            .unwrap()
    }

    #[test]
    fn single_references_round_trip() {
        let d = data(json!({
            "name": "pci",
            "order": 1,
            "auditor": [{"id": 4}],
            "notification_template": [{"id": 8}],
            "dlp_engines": [{"id": [61]}]
        }));
        let mut rule = expand(&d).unwrap();
        assert_eq!(rule.auditor, Some(IdNameExtensions::from_id(4)));
        assert!(rule.icap_server.is_none());

        rule.id = 3;
        let mut out = ResourceData::from_state(DlpWebRulesResource.schema(), "3", Map::new());
        flatten(&mut out, &rule).unwrap();
        assert_eq!(out.get("auditor"), Some(&json!([{"id": 4}])));
        assert_eq!(out.get("dlp_engines"), Some(&json!([{"id": [61]}])));
        assert!(out.get("icap_server").is_none());
    }

    #[test]
    fn inspection_free_rule_rejects_engines() {
        let d = data(json!({
            "name": "r",
            "order": 1,
            "without_content_inspection": true,
            "dlp_engines": [{"id": [1]}]
        }));
        assert!(check_rule(&d).is_err());
    }
}
