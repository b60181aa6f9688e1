// zia_rule_labels

use async_trait::async_trait;
use tracing::info;
use zia_api::models::RuleLabel;

use crate::activation::trigger_activation;
use crate::convert::flatten_id_name_extensions_single;
use crate::error::ProviderError;
use crate::provider::Meta;
use crate::resource::{Resource, read_created, read_or_remove};
use crate::resource_data::ResourceData;
use crate::schema::{Attribute, Schema, Validation, computed_id_name_extensions};

const TYPE_NAME: &str = "zia_rule_labels";

/// Labels attached to policy rules for grouping.
pub struct RuleLabelsResource;

fn expand(d: &ResourceData) -> RuleLabel {
    RuleLabel {
        name: d.get_string("name"),
        description: d.get_string("description"),
        ..RuleLabel::default()
    }
}

fn flatten(d: &mut ResourceData, label: &RuleLabel) -> Result<(), ProviderError> {
    d.set("label_id", label.id)?;
    d.set("name", label.name.as_str())?;
    d.set("description", label.description.as_str())?;
    d.set("last_modified_time", label.last_modified_time)?;
    d.set("referenced_rule_count", label.referenced_rule_count)?;
    d.set(
        "last_modified_by",
        flatten_id_name_extensions_single(label.last_modified_by.as_ref()),
    )?;
    d.set(
        "created_by",
        flatten_id_name_extensions_single(label.created_by.as_ref()),
    )?;
    Ok(())
}

#[async_trait]
impl Resource for RuleLabelsResource {
    fn type_name(&self) -> &'static str {
        TYPE_NAME
    }

    fn schema(&self) -> Schema {
        Schema::new()
            .attr("label_id", Attribute::int().computed())
            .attr(
                "name",
                Attribute::string()
                    .required()
                    .validate(Validation::StringLenBetween(1, 255))
                    .description("Label name"),
            )
            .attr(
                "description",
                Attribute::string()
                    .optional()
                    .validate(Validation::StringLenBetween(0, 10240)),
            )
            .attr("last_modified_time", Attribute::int().computed())
            .attr("referenced_rule_count", Attribute::int().computed())
            .attr("last_modified_by", computed_id_name_extensions("Admin that last modified the label"))
            .attr("created_by", computed_id_name_extensions("Admin that created the label"))
    }

    async fn create(&self, d: &mut ResourceData, meta: &Meta) -> Result<(), ProviderError> {
        let label = meta.client.create_rule_label(&expand(d)).await?;
        info!(resource = TYPE_NAME, id = label.id, "created");
        d.set_id(label.id.to_string());
        trigger_activation(meta).await?;
        read_created(self, d, meta).await
    }

    async fn read(&self, d: &mut ResourceData, meta: &Meta) -> Result<(), ProviderError> {
        let id = d.numeric_id()?;
        let result = meta.client.get_rule_label(id).await;
        let Some(label) = read_or_remove(d, TYPE_NAME, result)? else {
            return Ok(());
        };
        d.set_id(label.id.to_string());
        flatten(d, &label)
    }

    async fn update(&self, d: &mut ResourceData, meta: &Meta) -> Result<(), ProviderError> {
        let id = d.numeric_id()?;
        let result = meta.client.update_rule_label(id, &expand(d)).await;
        if read_or_remove(d, TYPE_NAME, result)?.is_none() {
            return Ok(());
        }
        info!(resource = TYPE_NAME, id, "updated");
        trigger_activation(meta).await?;
        self.read(d, meta).await
    }

    async fn delete(&self, d: &mut ResourceData, meta: &Meta) -> Result<(), ProviderError> {
        let id = d.numeric_id()?;
        meta.client.delete_rule_label(id).await?;
        info!(resource = TYPE_NAME, id, "deleted");
        d.clear_id();
        trigger_activation(meta).await
    }

    async fn lookup_id(&self, name: &str, meta: &Meta) -> Result<String, ProviderError> {
        let label = meta.client.get_rule_label_by_name(name).await?;
        Ok(label.id.to_string())
    }
}
