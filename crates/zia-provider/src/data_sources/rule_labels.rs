// zia_rule_labels

use async_trait::async_trait;
use zia_api::models::RuleLabel;

use super::{computed_int, computed_string, lookup_schema, set_identity};
use crate::convert::flatten_id_name_extensions_single;
use crate::error::ProviderError;
use crate::provider::Meta;
use crate::resource::{DataSource, Lookup};
use crate::resource_data::ResourceData;
use crate::schema::{Schema, computed_id_name_extensions};

pub struct RuleLabelsDataSource;

fn flatten(d: &mut ResourceData, label: &RuleLabel) -> Result<(), ProviderError> {
    set_identity(d, label.id)?;
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
impl DataSource for RuleLabelsDataSource {
    fn type_name(&self) -> &'static str {
        "zia_rule_labels"
    }

    fn schema(&self) -> Schema {
        lookup_schema("name")
            .attr("description", computed_string())
            .attr("last_modified_time", computed_int())
            .attr("referenced_rule_count", computed_int())
            .attr("last_modified_by", computed_id_name_extensions("Last editor"))
            .attr("created_by", computed_id_name_extensions("Creator"))
    }

    async fn read(&self, d: &mut ResourceData, meta: &Meta) -> Result<(), ProviderError> {
        let label = match Lookup::from_data(d, "name")? {
            Lookup::Id(id) => meta.client.get_rule_label(id).await?,
            Lookup::Name(name) => meta.client.get_rule_label_by_name(&name).await?,
        };
        flatten(d, &label)
    }
}
