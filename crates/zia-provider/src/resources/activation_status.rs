// zia_activation_status

use async_trait::async_trait;
use serde_json::Map;
use tracing::info;
use zia_api::models::Activation;

use crate::error::ProviderError;
use crate::provider::Meta;
use crate::resource::{Resource, read_created};
use crate::resource_data::ResourceData;
use crate::schema::{Attribute, Schema, Validation};

const TYPE_NAME: &str = "zia_activation_status";

const ACTIVATION_ID: &str = "activation";

/// Explicit activation of pending configuration.
///
/// Create and update activate immediately, independent of the
/// `ZIA_ACTIVATION` toggle; read reports the current status.
pub struct ActivationStatusResource;

#[async_trait]
impl Resource for ActivationStatusResource {
    fn type_name(&self) -> &'static str {
        TYPE_NAME
    }

    fn schema(&self) -> Schema {
        Schema::new().attr(
            "status",
            Attribute::string()
                .required()
                .validate(Validation::one_of(&[Activation::ACTIVE]))
                .description("Desired activation state"),
        )
    }

    async fn create(&self, d: &mut ResourceData, meta: &Meta) -> Result<(), ProviderError> {
        let activation = meta.client.activate().await?;
        info!(resource = TYPE_NAME, status = %activation.status, "configuration activated");
        d.set_id(ACTIVATION_ID);
        read_created(self, d, meta).await
    }

    async fn read(&self, d: &mut ResourceData, meta: &Meta) -> Result<(), ProviderError> {
        let activation = meta.client.activation_status().await?;
        d.set_id(ACTIVATION_ID);
        d.set("status", activation.status)
    }

    async fn update(&self, d: &mut ResourceData, meta: &Meta) -> Result<(), ProviderError> {
        self.create(d, meta).await
    }

    async fn delete(&self, d: &mut ResourceData, _meta: &Meta) -> Result<(), ProviderError> {
        d.clear_id();
        Ok(())
    }

    async fn import(&self, _raw: &str, meta: &Meta) -> Result<ResourceData, ProviderError> {
        let mut d = ResourceData::from_state(self.schema(), ACTIVATION_ID, Map::new());
        self.read(&mut d, meta).await?;
        Ok(d)
    }
}
