// Data loss prevention endpoints

use tracing::debug;

use crate::client::{ZiaClient, find_by_name};
use crate::error::Error;
use crate::models::{DlpNotificationTemplate, WebDlpRule};

impl ZiaClient {
    // ── Web DLP rules ────────────────────────────────────────────────

    /// `GET /webDlpRules`
    pub async fn list_web_dlp_rules(&self) -> Result<Vec<WebDlpRule>, Error> {
        self.get("webDlpRules").await
    }

    /// `GET /webDlpRules/{id}`
    pub async fn get_web_dlp_rule(&self, id: i64) -> Result<WebDlpRule, Error> {
        self.get(&format!("webDlpRules/{id}")).await
    }

    pub async fn get_web_dlp_rule_by_name(&self, name: &str) -> Result<WebDlpRule, Error> {
        let rules = self.list_web_dlp_rules().await?;
        find_by_name(rules, name, |r| r.name.as_str(), "web dlp rule")
    }

    /// `POST /webDlpRules`
    pub async fn create_web_dlp_rule(&self, rule: &WebDlpRule) -> Result<WebDlpRule, Error> {
        debug!(name = %rule.name, "creating web dlp rule");
        self.post("webDlpRules", rule).await
    }

    /// `PUT /webDlpRules/{id}`
    pub async fn update_web_dlp_rule(
        &self,
        id: i64,
        rule: &WebDlpRule,
    ) -> Result<WebDlpRule, Error> {
        debug!(id, "updating web dlp rule");
        self.put(&format!("webDlpRules/{id}"), rule).await
    }

    /// `DELETE /webDlpRules/{id}`
    pub async fn delete_web_dlp_rule(&self, id: i64) -> Result<(), Error> {
        debug!(id, "deleting web dlp rule");
        self.delete(&format!("webDlpRules/{id}")).await
    }

    // ── Notification templates ───────────────────────────────────────

    /// `GET /dlpNotificationTemplates`
    pub async fn list_dlp_notification_templates(
        &self,
    ) -> Result<Vec<DlpNotificationTemplate>, Error> {
        self.get("dlpNotificationTemplates").await
    }

    /// `GET /dlpNotificationTemplates/{id}`
    pub async fn get_dlp_notification_template(
        &self,
        id: i64,
    ) -> Result<DlpNotificationTemplate, Error> {
        self.get(&format!("dlpNotificationTemplates/{id}")).await
    }

    pub async fn get_dlp_notification_template_by_name(
        &self,
        name: &str,
    ) -> Result<DlpNotificationTemplate, Error> {
        let templates = self.list_dlp_notification_templates().await?;
        find_by_name(templates, name, |t| t.name.as_str(), "dlp notification template")
    }

    /// `POST /dlpNotificationTemplates`
    pub async fn create_dlp_notification_template(
        &self,
        template: &DlpNotificationTemplate,
    ) -> Result<DlpNotificationTemplate, Error> {
        debug!(name = %template.name, "creating dlp notification template");
        self.post("dlpNotificationTemplates", template).await
    }

    /// `PUT /dlpNotificationTemplates/{id}`
    pub async fn update_dlp_notification_template(
        &self,
        id: i64,
        template: &DlpNotificationTemplate,
    ) -> Result<DlpNotificationTemplate, Error> {
        debug!(id, "updating dlp notification template");
        self.put(&format!("dlpNotificationTemplates/{id}"), template)
            .await
    }

    /// `DELETE /dlpNotificationTemplates/{id}`
    pub async fn delete_dlp_notification_template(&self, id: i64) -> Result<(), Error> {
        debug!(id, "deleting dlp notification template");
        self.delete(&format!("dlpNotificationTemplates/{id}")).await
    }
}
