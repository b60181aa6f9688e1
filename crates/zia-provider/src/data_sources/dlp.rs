// zia_dlp_web_rules, zia_dlp_notification_templates

use async_trait::async_trait;
use serde_json::json;
use zia_api::models::{DlpNotificationTemplate, WebDlpRule};

use super::{
    computed_bool, computed_int, computed_string, computed_strings, lookup_schema, set_identity,
};
use crate::convert::{flatten_id_name_extensions, flatten_id_name_extensions_single};
use crate::error::ProviderError;
use crate::provider::Meta;
use crate::resource::{DataSource, Lookup};
use crate::resource_data::ResourceData;
use crate::schema::{Schema, computed_id_name_extensions};

// ── Web DLP rules ────────────────────────────────────────────────────

const RULE_REFERENCES: &[&str] = &[
    "dlp_engines",
    "url_categories",
    "locations",
    "location_groups",
    "groups",
    "departments",
    "users",
    "excluded_groups",
    "excluded_departments",
    "excluded_users",
    "time_windows",
    "labels",
];

const SINGLE_REFERENCES: &[&str] = &[
    "auditor",
    "notification_template",
    "icap_server",
    "last_modified_by",
];

pub struct DlpWebRulesDataSource;

fn flatten_rule(d: &mut ResourceData, rule: &WebDlpRule) -> Result<(), ProviderError> {
    set_identity(d, rule.id)?;
    d.set("name", rule.name.as_str())?;
    d.set("order", rule.order)?;
    d.set("rank", rule.rank)?;
    d.set("description", rule.description.as_str())?;
    d.set("action", rule.action.as_str())?;
    d.set("state", rule.state.as_str())?;
    d.set("severity", rule.severity.as_str())?;
    d.set("protocols", json!(rule.protocols))?;
    d.set("file_types", json!(rule.file_types))?;
    d.set("cloud_applications", json!(rule.cloud_applications))?;
    d.set("min_size", rule.min_size)?;
    d.set("match_only", rule.match_only)?;
    d.set("without_content_inspection", rule.without_content_inspection)?;
    d.set("ocr_enabled", rule.ocr_enabled)?;
    d.set("zscaler_incident_receiver", rule.zscaler_incident_receiver)?;
    d.set("external_auditor_email", rule.external_auditor_email.as_str())?;
    d.set("last_modified_time", rule.last_modified_time)?;

    let singles = [
        rule.auditor.as_ref(),
        rule.notification_template.as_ref(),
        rule.icap_server.as_ref(),
        rule.last_modified_by.as_ref(),
    ];
    for (key, reference) in SINGLE_REFERENCES.iter().zip(singles) {
        d.set(key, flatten_id_name_extensions_single(reference))?;
    }

    let references = [
        &rule.dlp_engines,
        &rule.url_categories,
        &rule.locations,
        &rule.location_groups,
        &rule.groups,
        &rule.departments,
        &rule.users,
        &rule.excluded_groups,
        &rule.excluded_departments,
        &rule.excluded_users,
        &rule.time_windows,
        &rule.labels,
    ];
    for (key, list) in RULE_REFERENCES.iter().zip(references) {
        d.set(key, flatten_id_name_extensions(list))?;
    }
    Ok(())
}

#[async_trait]
impl DataSource for DlpWebRulesDataSource {
    fn type_name(&self) -> &'static str {
        "zia_dlp_web_rules"
    }

    fn schema(&self) -> Schema {
        let mut schema = lookup_schema("name")
            .attr("order", computed_int())
            .attr("rank", computed_int())
            .attr("description", computed_string())
            .attr("action", computed_string())
            .attr("state", computed_string())
            .attr("severity", computed_string())
            .attr("protocols", computed_strings())
            .attr("file_types", computed_strings())
            .attr("cloud_applications", computed_strings())
            .attr("min_size", computed_int())
            .attr("match_only", computed_bool())
            .attr("without_content_inspection", computed_bool())
            .attr("ocr_enabled", computed_bool())
            .attr("zscaler_incident_receiver", computed_bool())
            .attr("external_auditor_email", computed_string())
            .attr("last_modified_time", computed_int());
        for key in SINGLE_REFERENCES.iter().chain(RULE_REFERENCES) {
            schema = schema.attr(key, computed_id_name_extensions(key));
        }
        schema
    }

    async fn read(&self, d: &mut ResourceData, meta: &Meta) -> Result<(), ProviderError> {
        let rule = match Lookup::from_data(d, "name")? {
            Lookup::Id(id) => meta.client.get_web_dlp_rule(id).await?,
            Lookup::Name(name) => meta.client.get_web_dlp_rule_by_name(&name).await?,
        };
        flatten_rule(d, &rule)
    }
}

// ── Notification templates ───────────────────────────────────────────

pub struct DlpNotificationTemplatesDataSource;

fn flatten_template(
    d: &mut ResourceData,
    template: &DlpNotificationTemplate,
) -> Result<(), ProviderError> {
    set_identity(d, template.id)?;
    d.set("name", template.name.as_str())?;
    d.set("subject", template.subject.as_str())?;
    d.set("attach_content", template.attach_content)?;
    d.set("tls_enabled", template.tls_enabled)?;
    d.set("plain_text_message", template.plain_text_message.as_str())?;
    d.set("html_message", template.html_message.as_str())?;
    Ok(())
}

#[async_trait]
impl DataSource for DlpNotificationTemplatesDataSource {
    fn type_name(&self) -> &'static str {
        "zia_dlp_notification_templates"
    }

    fn schema(&self) -> Schema {
        lookup_schema("name")
            .attr("subject", computed_string())
            .attr("attach_content", computed_bool())
            .attr("tls_enabled", computed_bool())
            .attr("plain_text_message", computed_string())
            .attr("html_message", computed_string())
    }

    async fn read(&self, d: &mut ResourceData, meta: &Meta) -> Result<(), ProviderError> {
        let template = match Lookup::from_data(d, "name")? {
            Lookup::Id(id) => meta.client.get_dlp_notification_template(id).await?,
            Lookup::Name(name) => {
                meta.client
                    .get_dlp_notification_template_by_name(&name)
                    .await?
            }
        };
        flatten_template(d, &template)
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
    fn rule_references_flatten_to_lists() {
        let rule = WebDlpRule {
            id: 40,
            name: "pci".into(),
            dlp_engines: vec![IdNameExtensions::from_id(62)],
            notification_template: Some(IdNameExtensions::from_id(4)),
            ..WebDlpRule::default()
        };
        let mut d = ResourceData::from_state(DlpWebRulesDataSource.schema(), "", Map::new());
        flatten_rule(&mut d, &rule).unwrap();
        assert_eq!(d.get_int("dlp_engines.0.id"), 62);
        assert_eq!(d.get_int("notification_template.0.id"), 4);
        assert_eq!(d.get("auditor"), Some(&json!([])));
        assert_eq!(d.get("excluded_users"), Some(&json!([])));
    }

    #[test]
    fn every_reference_is_declared() {
        let schema = DlpWebRulesDataSource.schema();
        for key in RULE_REFERENCES.iter().chain(SINGLE_REFERENCES) {
            assert!(schema.contains(key), "{key} missing");
        }
    }

    #[test]
    fn template_flatten_sets_identity() {
        let template = DlpNotificationTemplate {
            id: 4,
            name: "incident-mail".into(),
            attach_content: true,
            ..DlpNotificationTemplate::default()
        };
        let mut d =
            ResourceData::from_state(DlpNotificationTemplatesDataSource.schema(), "", Map::new());
        flatten_template(&mut d, &template).unwrap();
        assert_eq!(d.id(), Some("4"));
        assert_eq!(d.get_string("name"), "incident-mail");
        assert!(d.get_bool("attach_content"));
        assert!(!d.get_bool("tls_enabled"));
    }
}
