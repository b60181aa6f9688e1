// zia_activation_status

use async_trait::async_trait;

use super::computed_string;
use crate::error::ProviderError;
use crate::provider::Meta;
use crate::resource::DataSource;
use crate::resource_data::ResourceData;
use crate::schema::Schema;

/// Current activation state of the tenant configuration.
pub struct ActivationStatusDataSource;

#[async_trait]
impl DataSource for ActivationStatusDataSource {
    fn type_name(&self) -> &'static str {
        "zia_activation_status"
    }

    fn schema(&self) -> Schema {
        Schema::new().attr("status", computed_string())
    }

    async fn read(&self, d: &mut ResourceData, meta: &Meta) -> Result<(), ProviderError> {
        let activation = meta.client.activation_status().await?;
        d.set_id("activation");
        d.set("status", activation.status)
    }
}
