// zia_dlp_notification_templates

use async_trait::async_trait;
use tracing::info;
use zia_api::models::DlpNotificationTemplate;

use crate::activation::trigger_activation;
use crate::error::ProviderError;
use crate::provider::Meta;
use crate::resource::{Resource, read_created, read_or_remove};
use crate::resource_data::ResourceData;
use crate::schema::{Attribute, Schema};

const TYPE_NAME: &str = "zia_dlp_notification_templates";

pub struct DlpNotificationTemplatesResource;

fn expand(d: &ResourceData) -> DlpNotificationTemplate {
    DlpNotificationTemplate {
        name: d.get_string("name"),
        subject: d.get_string("subject"),
        attach_content: d.get_bool("attach_content"),
        tls_enabled: d.get_bool("tls_enabled"),
        plain_text_message: d.get_string("plain_text_message"),
        html_message: d.get_string("html_message"),
        ..DlpNotificationTemplate::default()
    }
}

fn flatten(d: &mut ResourceData, template: &DlpNotificationTemplate) -> Result<(), ProviderError> {
    d.set("template_id", template.id)?;
    d.set("name", template.name.as_str())?;
    d.set("subject", template.subject.as_str())?;
    d.set("attach_content", template.attach_content)?;
    d.set("tls_enabled", template.tls_enabled)?;
    d.set("plain_text_message", template.plain_text_message.as_str())?;
    d.set("html_message", template.html_message.as_str())?;
    Ok(())
}

#[async_trait]
impl Resource for DlpNotificationTemplatesResource {
    fn type_name(&self) -> &'static str {
        TYPE_NAME
    }

    fn schema(&self) -> Schema {
        Schema::new()
            .attr("template_id", Attribute::int().computed())
            .attr("name", Attribute::string().required())
            .attr(
                "subject",
                Attribute::string()
                    .optional()
                    .description("Subject line of the notification email"),
            )
            .attr(
                "attach_content",
                Attribute::boolean()
                    .optional()
                    .default(true)
                    .description("Attach the offending content to the email"),
            )
            .attr("tls_enabled", Attribute::boolean().optional().default(true))
            .attr("plain_text_message", Attribute::string().optional())
            .attr("html_message", Attribute::string().optional())
    }

    async fn create(&self, d: &mut ResourceData, meta: &Meta) -> Result<(), ProviderError> {
        let template = meta
            .client
            .create_dlp_notification_template(&expand(d))
            .await?;
        info!(resource = TYPE_NAME, id = template.id, "created");
        d.set_id(template.id.to_string());
        trigger_activation(meta).await?;
        read_created(self, d, meta).await
    }

    async fn read(&self, d: &mut ResourceData, meta: &Meta) -> Result<(), ProviderError> {
        let id = d.numeric_id()?;
        let result = meta.client.get_dlp_notification_template(id).await;
        let Some(template) = read_or_remove(d, TYPE_NAME, result)? else {
            return Ok(());
        };
        d.set_id(template.id.to_string());
        flatten(d, &template)
    }

    async fn update(&self, d: &mut ResourceData, meta: &Meta) -> Result<(), ProviderError> {
        let id = d.numeric_id()?;
        let result = meta
            .client
            .update_dlp_notification_template(id, &expand(d))
            .await;
        if read_or_remove(d, TYPE_NAME, result)?.is_none() {
            return Ok(());
        }
        info!(resource = TYPE_NAME, id, "updated");
        trigger_activation(meta).await?;
        self.read(d, meta).await
    }

    async fn delete(&self, d: &mut ResourceData, meta: &Meta) -> Result<(), ProviderError> {
        let id = d.numeric_id()?;
        meta.client.delete_dlp_notification_template(id).await?;
        info!(resource = TYPE_NAME, id, "deleted");
        d.clear_id();
        trigger_activation(meta).await
    }

    async fn lookup_id(&self, name: &str, meta: &Meta) -> Result<String, ProviderError> {
        let template = meta.client.get_dlp_notification_template_by_name(name).await?;
        Ok(template.id.to_string())
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
        let schema = DlpNotificationTemplatesResource.schema();
        let config = json!({
            "name": "incident-mail",
            "subject": "DLP violation ${TRANSACTION_ID}",
            "tls_enabled": false,
            "plain_text_message": "A policy was violated."
        });
        let d = ResourceData::from_config(schema.clone(), config.as_object().cloned().unwrap())
            .unwrap();
        let mut template = expand(&d);
        assert!(template.attach_content, "attach_content defaults to true");
        assert!(!template.tls_enabled);

        template.id = 4;
        let mut out = ResourceData::from_state(schema, "4", Map::new());
        flatten(&mut out, &template).unwrap();
        assert_eq!(out.get_int("template_id"), 4);
        assert_eq!(out.get_string("subject"), "DLP violation ${TRANSACTION_ID}");
        assert!(out.get_bool("attach_content"));
        assert!(!out.get_bool("tls_enabled"));
        assert_eq!(out.get_string("plain_text_message"), "A policy was violated.");
    }
}
