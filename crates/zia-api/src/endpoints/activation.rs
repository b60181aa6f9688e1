// Configuration activation
//
// Policy edits stay pending until activated; `POST /status/activate`
// pushes them to the enforcement nodes.

use tracing::debug;

use crate::client::ZiaClient;
use crate::error::Error;
use crate::models::Activation;

impl ZiaClient {
    /// Current activation state.
    ///
    /// `GET /status`
    pub async fn activation_status(&self) -> Result<Activation, Error> {
        self.get("status").await
    }

    /// Activate pending configuration changes.
    ///
    /// `POST /status/activate`
    pub async fn activate(&self) -> Result<Activation, Error> {
        debug!("activating pending configuration");
        self.post("status/activate", &serde_json::json!({})).await
    }
}
