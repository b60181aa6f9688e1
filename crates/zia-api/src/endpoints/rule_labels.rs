// Rule label endpoints

use tracing::debug;

use crate::client::{ZiaClient, find_by_name};
use crate::error::Error;
use crate::models::RuleLabel;

impl ZiaClient {
    /// `GET /ruleLabels` (paginated)
    pub async fn list_rule_labels(&self) -> Result<Vec<RuleLabel>, Error> {
        self.get_all_pages("ruleLabels", &[]).await
    }

    /// `GET /ruleLabels/{id}`
    pub async fn get_rule_label(&self, id: i64) -> Result<RuleLabel, Error> {
        self.get(&format!("ruleLabels/{id}")).await
    }

    pub async fn get_rule_label_by_name(&self, name: &str) -> Result<RuleLabel, Error> {
        let labels = self.list_rule_labels().await?;
        find_by_name(labels, name, |l| l.name.as_str(), "rule label")
    }

    /// `POST /ruleLabels`
    pub async fn create_rule_label(&self, label: &RuleLabel) -> Result<RuleLabel, Error> {
        debug!(name = %label.name, "creating rule label");
        self.post("ruleLabels", label).await
    }

    /// `PUT /ruleLabels/{id}`
    pub async fn update_rule_label(&self, id: i64, label: &RuleLabel) -> Result<RuleLabel, Error> {
        debug!(id, "updating rule label");
        self.put(&format!("ruleLabels/{id}"), label).await
    }

    /// `DELETE /ruleLabels/{id}`
    pub async fn delete_rule_label(&self, id: i64) -> Result<(), Error> {
        debug!(id, "deleting rule label");
        self.delete(&format!("ruleLabels/{id}")).await
    }
}
